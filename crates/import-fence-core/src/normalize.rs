//! Specifier normalization: alias substitution, then relative resolution.

use crate::paths;
use crate::types::{Dependency, PathReplacement};

/// Produces a normalized copy of `dependency` with `resolved_specifier` set.
///
/// Both steps are always attempted, in this order:
///
/// 1. the first replacement whose alias prefixes the raw specifier is
///    applied (prefix swapped, remainder untouched);
/// 2. a result that still begins with `.` is resolved against the directory
///    of `referencing_file` (the file's configuration-relative path).
///
/// Alias targets are expressed relative to the configuration root, which is
/// why substitution runs before — never as part of — relative resolution.
#[must_use]
pub fn resolve_specifier(
    dependency: &Dependency,
    replacements: &[PathReplacement],
    referencing_file: &str,
) -> Dependency {
    let substituted = apply_replacements(&dependency.raw_specifier, replacements);
    let resolved = if substituted.starts_with('.') {
        paths::resolve_against_file(&substituted, referencing_file)
    } else {
        substituted
    };
    dependency.with_resolved(resolved)
}

fn apply_replacements(specifier: &str, replacements: &[PathReplacement]) -> String {
    match replacements
        .iter()
        .find(|replacement| specifier.starts_with(replacement.alias.as_str()))
    {
        Some(replacement) => format!(
            "{}{}",
            replacement.target,
            &specifier[replacement.alias.len()..]
        ),
        None => specifier.to_string(),
    }
}
