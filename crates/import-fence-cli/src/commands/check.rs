//! Check command: run the verifier and print results.

use anyhow::{Context, Result};
use std::path::Path;

use import_fence_core::{ArchitectureSpec, Verifier};

use crate::OutputFormat;

/// Runs the check command. Exits with status 1 when violations are found.
pub fn run(from: String, deny: String, tsconfig: &Path, format: OutputFormat) -> Result<()> {
    let spec = ArchitectureSpec::new(from, deny);
    let report = Verifier::new(spec.clone(), tsconfig)
        .run()
        .with_context(|| format!("verification against {} failed", tsconfig.display()))?;

    super::output::print(&spec, &report, format)?;

    if report.has_violations() {
        std::process::exit(1);
    }
    Ok(())
}
