//! Test-harness entry point: verify and panic with a readable report.

use std::path::Path;

use import_fence_core::{clickable_error_message, verify_architecture, ArchitectureSpec};

/// Verifies `spec` as part of `cargo test`.
///
/// # Panics
///
/// Panics with the clickable violation report when any scanned file depends
/// on the forbidden folder, and with the underlying error when verification
/// itself fails (bad configuration, missing folders, unreadable files).
pub fn assert_architecture(spec: &ArchitectureSpec, tsconfig: impl AsRef<Path>) {
    match verify_architecture(spec, tsconfig.as_ref()) {
        Ok(violations) if violations.is_empty() => {}
        Ok(violations) => panic!("{}", clickable_error_message(spec, &violations)),
        Err(error) => panic!("import-fence: verification failed: {error}"),
    }
}
