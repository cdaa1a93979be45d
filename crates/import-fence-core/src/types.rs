//! Core types for dependency edges, violations and run results.

use serde::{Deserialize, Serialize};

use crate::extract::Diagnostic;

/// How a module reference appears in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// Static `import ... from "specifier"`.
    Import,
    /// `export ... from "specifier"`.
    ReExport,
    /// `import("specifier")` or `require("specifier")`.
    DynamicCall,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Import => write!(f, "import"),
            Self::ReExport => write!(f, "re-export"),
            Self::DynamicCall => write!(f, "dynamic-call"),
        }
    }
}

/// One discovered module reference.
///
/// `raw_specifier` is the string exactly as written in source and is never
/// mutated; normalization fills `resolved_specifier` on a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Reference shape.
    pub kind: DependencyKind,
    /// True when the reference exists purely for static type information.
    pub type_only: bool,
    /// True when the original specifier begins with `.` or `..`.
    pub is_relative: bool,
    /// The untouched specifier string as written in source.
    pub raw_specifier: String,
    /// The specifier after alias substitution and relative resolution.
    /// Absent until normalization has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_specifier: Option<String>,
}

impl Dependency {
    /// Creates a freshly extracted, not-yet-normalized dependency.
    #[must_use]
    pub fn new(kind: DependencyKind, type_only: bool, specifier: impl Into<String>) -> Self {
        let raw_specifier = specifier.into();
        Self {
            kind,
            type_only,
            is_relative: raw_specifier.starts_with('.'),
            raw_specifier,
            resolved_specifier: None,
        }
    }

    /// Returns a copy with `resolved_specifier` filled in.
    #[must_use]
    pub fn with_resolved(&self, resolved: impl Into<String>) -> Self {
        Self {
            resolved_specifier: Some(resolved.into()),
            ..self.clone()
        }
    }

    /// The normalized specifier, falling back to the raw one when
    /// normalization has not run.
    #[must_use]
    pub fn effective_specifier(&self) -> &str {
        self.resolved_specifier
            .as_deref()
            .unwrap_or(&self.raw_specifier)
    }
}

/// A source file together with its extracted dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDependencies {
    /// Path relative to the configuration root.
    pub file: String,
    /// All dependencies found in the file.
    pub dependencies: Vec<Dependency>,
}

/// A single alias substitution: specifiers beginning with `alias` have that
/// prefix replaced with `target`.
///
/// Replacement lists are ordered and the first matching prefix wins; ties
/// are broken by declaration order, not by specificity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReplacement {
    /// Prefix to look for in raw specifiers.
    pub alias: String,
    /// Config-root-relative prefix that replaces `alias`.
    pub target: String,
}

/// One offending source file and every forbidden dependency in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Path of the offending file, relative to the configuration root.
    pub file: String,
    /// Human-readable summary.
    pub message: String,
    /// Every dependency in the file that targets the forbidden folder.
    pub forbidden_dependencies: Vec<Dependency>,
}

/// The inputs of one verification run, both folders relative to the
/// configuration root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureSpec {
    /// Folder whose files are scanned.
    pub files_from_folder: String,
    /// Folder those files must not depend on.
    pub not_depend_on_folder: String,
}

impl ArchitectureSpec {
    /// Creates a spec from the scanned folder and the forbidden folder.
    #[must_use]
    pub fn new(
        files_from_folder: impl Into<String>,
        not_depend_on_folder: impl Into<String>,
    ) -> Self {
        Self {
            files_from_folder: files_from_folder.into(),
            not_depend_on_folder: not_depend_on_folder.into(),
        }
    }
}

/// An extraction diagnostic attributed to the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiagnostic {
    /// Path relative to the configuration root.
    pub file: String,
    /// The diagnostic itself.
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// Aggregate result of one verification run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Violations in file-enumeration order.
    pub violations: Vec<Violation>,
    /// Extraction diagnostics collected across all scanned files.
    pub diagnostics: Vec<FileDiagnostic>,
    /// Number of files read and extracted.
    pub files_checked: usize,
}

impl RunReport {
    /// Returns true when at least one file violated the rule.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Renders violations as a clickable `file:line` list.
#[must_use]
pub fn clickable_error_message(spec: &ArchitectureSpec, violations: &[Violation]) -> String {
    use std::fmt::Write;

    // TODO: report the first offending reference's line once Dependency carries one
    let line_number = 0;
    let mut message = format!(
        "these files should NOT depend on {}\n",
        spec.not_depend_on_folder
    );
    for violation in violations {
        let _ = writeln!(message, "{}:{line_number}", violation.file);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dependency_classifies_relative_specifier() {
        let dep = Dependency::new(DependencyKind::Import, false, "../db/x");
        assert!(dep.is_relative);
        assert!(dep.resolved_specifier.is_none());
        assert_eq!(dep.effective_specifier(), "../db/x");
    }

    #[test]
    fn new_dependency_classifies_module_specifier() {
        let dep = Dependency::new(DependencyKind::DynamicCall, false, "fs");
        assert!(!dep.is_relative);
    }

    #[test]
    fn with_resolved_preserves_raw_specifier() {
        let dep = Dependency::new(DependencyKind::Import, false, "$lib/db/x");
        let resolved = dep.with_resolved("src/lib/db/x");
        assert_eq!(resolved.raw_specifier, "$lib/db/x");
        assert_eq!(resolved.effective_specifier(), "src/lib/db/x");
        assert_eq!(dep.resolved_specifier, None);
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&DependencyKind::ReExport).expect("serialize");
        assert_eq!(json, "\"re-export\"");
        let json = serde_json::to_string(&DependencyKind::DynamicCall).expect("serialize");
        assert_eq!(json, "\"dynamic-call\"");
    }

    #[test]
    fn clickable_message_lists_each_file_at_line_zero() {
        let spec = ArchitectureSpec::new("repositories", "db");
        let violations = vec![
            Violation {
                file: "repositories/a.ts".into(),
                message: "should not depend on folder db".into(),
                forbidden_dependencies: vec![],
            },
            Violation {
                file: "repositories/b.ts".into(),
                message: "should not depend on folder db".into(),
                forbidden_dependencies: vec![],
            },
        ];

        let message = clickable_error_message(&spec, &violations);
        assert!(message.starts_with("these files should NOT depend on db\n"));
        assert!(message.contains("repositories/a.ts:0\n"));
        assert!(message.ends_with("repositories/b.ts:0\n"));
    }
}
