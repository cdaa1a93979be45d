//! Violation matching against the forbidden folder.

use crate::types::{ArchitectureSpec, Dependency, FileDependencies, Violation};

/// Collects one [`Violation`] per file that depends on the forbidden folder.
///
/// Files without a matching dependency are omitted; there is no "pass"
/// record. Input order is preserved.
#[must_use]
pub fn match_violations(
    spec: &ArchitectureSpec,
    files: &[FileDependencies],
) -> Vec<Violation> {
    files
        .iter()
        .filter_map(|file| violation_for_file(spec, file))
        .collect()
}

fn violation_for_file(spec: &ArchitectureSpec, file: &FileDependencies) -> Option<Violation> {
    // Literal prefix test with no segment-boundary awareness: a forbidden
    // folder "db" also matches "db2" or "db-utils".
    let forbidden: Vec<Dependency> = file
        .dependencies
        .iter()
        .filter(|dependency| {
            dependency
                .effective_specifier()
                .starts_with(&spec.not_depend_on_folder)
        })
        .cloned()
        .collect();

    if forbidden.is_empty() {
        return None;
    }
    Some(Violation {
        file: file.file.clone(),
        message: format!("should not depend on folder {}", spec.not_depend_on_folder),
        forbidden_dependencies: forbidden,
    })
}
