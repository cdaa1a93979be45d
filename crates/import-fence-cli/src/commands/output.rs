//! Shared output formatting for check results.

use anyhow::Result;
use import_fence_core::{clickable_error_message, ArchitectureSpec, RunReport};

use crate::OutputFormat;

/// Print a run report in the specified format.
pub fn print(spec: &ArchitectureSpec, report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(spec, report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(spec: &ArchitectureSpec, report: &RunReport) {
    if report.violations.is_empty() {
        println!(
            "\x1b[32mOK: {} does not depend on {} ({} file(s) checked)\x1b[0m",
            spec.files_from_folder, spec.not_depend_on_folder, report.files_checked
        );
        return;
    }

    print!("{}", clickable_error_message(spec, &report.violations));
    println!(
        "\x1b[31mFound {} violating file(s) in {} file(s) checked\x1b[0m",
        report.violations.len(),
        report.files_checked
    );
}

fn print_json(report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &RunReport) {
    for violation in &report.violations {
        println!(
            "{}:0: {} ({} forbidden)",
            violation.file,
            violation.message,
            violation.forbidden_dependencies.len(),
        );
    }
}
