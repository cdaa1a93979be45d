//! # import-fence-core
//!
//! Folder-level dependency conformance checking for TypeScript/JavaScript
//! projects: files under one folder must not reference modules under a
//! forbidden folder, directly or through tsconfig path aliases.
//!
//! The pipeline runs in three stages:
//!
//! - [`TsExtractor`] walks each file's syntax tree and yields raw
//!   [`Dependency`] edges
//! - [`replacement_paths`] flattens the tsconfig alias table, chasing the
//!   `extends` chain
//! - [`normalize::resolve_specifier`] rewrites every edge into a
//!   config-root-relative path, and [`matcher::match_violations`] collects
//!   the files whose edges land under the forbidden folder
//!
//! [`Verifier`] ties the stages together over a folder on disk:
//!
//! ```ignore
//! use import_fence_core::{verify_architecture, ArchitectureSpec};
//!
//! let violations = verify_architecture(
//!     &ArchitectureSpec::new("src/repositories", "src/db"),
//!     "tsconfig.json",
//! )?;
//! assert!(violations.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extract;
pub mod matcher;
pub mod normalize;
pub mod paths;
pub mod tsconfig;
mod types;
mod verifier;

pub use extract::{Diagnostic, DiagnosticKind, Extraction, TsExtractor};
pub use tsconfig::{replacement_paths, ConfigError};
pub use types::{
    clickable_error_message, ArchitectureSpec, Dependency, DependencyKind, FileDependencies,
    FileDiagnostic, PathReplacement, RunReport, Violation,
};
pub use verifier::{verify_architecture, Verifier, VerifyError, DEFAULT_TSCONFIG};
