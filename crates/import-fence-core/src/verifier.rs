//! Run orchestration: enumerate files, extract, normalize, match.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::extract::{Extraction, TsExtractor};
use crate::tsconfig::{self, ConfigError};
use crate::types::{
    ArchitectureSpec, FileDependencies, FileDiagnostic, RunReport, Violation,
};
use crate::{matcher, normalize, paths};

/// Configuration file used when the caller does not name one.
pub const DEFAULT_TSCONFIG: &str = "tsconfig.json";

/// File name suffixes treated as code files.
const CODE_FILE_SUFFIXES: &[&str] = &[".ts", ".js"];

/// Errors that abort a verification run.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The configuration file or one of its ancestors is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The forbidden folder does not exist under the configuration root.
    #[error("not_depend_on_folder must exist: {0}")]
    ForbiddenFolderMissing(String),

    /// The scanned folder argument is empty.
    #[error("files_from_folder cannot be empty")]
    EmptyScanFolder,

    /// The scanned folder does not exist under the configuration root.
    #[error("files_from_folder must exist: {0}")]
    ScanFolderMissing(String),

    /// A candidate file could not be read (and is not a directory).
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        #[source]
        source: std::io::Error,
    },

    /// Directory enumeration failed.
    #[error("failed to list files: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One candidate entry under the scanned folder.
struct ScanEntry {
    /// Path relative to the configuration root, `/`-separated.
    rel: String,
    abs: PathBuf,
}

/// Checks an [`ArchitectureSpec`] against the files on disk.
///
/// All state is local to one [`run`](Verifier::run); the alias table is
/// computed once per run and read-only thereafter.
pub struct Verifier {
    spec: ArchitectureSpec,
    tsconfig: PathBuf,
}

impl Verifier {
    /// Creates a verifier for `spec` governed by the given tsconfig file.
    #[must_use]
    pub fn new(spec: ArchitectureSpec, tsconfig: impl Into<PathBuf>) -> Self {
        Self {
            spec,
            tsconfig: tsconfig.into(),
        }
    }

    /// Runs the verification and returns the aggregate report.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError`] on configuration or precondition failures and
    /// on any file read error other than "the entry is a directory".
    pub fn run(&self) -> Result<RunReport, VerifyError> {
        let root = self
            .tsconfig
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();

        if self.spec.files_from_folder.is_empty() {
            return Err(VerifyError::EmptyScanFolder);
        }
        if !root.join(&self.spec.not_depend_on_folder).exists() {
            return Err(VerifyError::ForbiddenFolderMissing(
                self.spec.not_depend_on_folder.clone(),
            ));
        }

        info!(
            "verifying {} against forbidden folder {}",
            self.spec.files_from_folder, self.spec.not_depend_on_folder
        );

        let replacements = tsconfig::replacement_paths(&self.tsconfig)?;
        debug!("alias table carries {} replacement(s)", replacements.len());

        let entries = self.discover_entries(&root)?;
        let extractor = TsExtractor::new();

        let mut report = RunReport::default();
        let mut file_dependencies: Vec<FileDependencies> = Vec::new();

        for entry in entries {
            let Some(extraction) = read_and_extract(&extractor, &entry)? else {
                continue;
            };
            debug!(
                "{}: {} dependency(ies)",
                entry.rel,
                extraction.dependencies.len()
            );

            for diagnostic in extraction.diagnostics {
                warn!("{}: {diagnostic}", entry.rel);
                report.diagnostics.push(FileDiagnostic {
                    file: entry.rel.clone(),
                    diagnostic,
                });
            }

            let dependencies = extraction
                .dependencies
                .iter()
                .map(|dependency| {
                    normalize::resolve_specifier(dependency, &replacements, &entry.rel)
                })
                .collect();
            file_dependencies.push(FileDependencies {
                file: entry.rel,
                dependencies,
            });
            report.files_checked += 1;
        }

        report.violations = matcher::match_violations(&self.spec, &file_dependencies);
        info!(
            "found {} violating file(s) in {} file(s) checked",
            report.violations.len(),
            report.files_checked
        );
        Ok(report)
    }

    /// Enumerates entries under the scanned folder in deterministic order.
    ///
    /// Directories whose names carry a code-file suffix are kept; the read
    /// step recognizes and skips them, matching how a recursive directory
    /// listing surfaces them.
    fn discover_entries(&self, root: &Path) -> Result<Vec<ScanEntry>, VerifyError> {
        let folder_abs = root.join(&self.spec.files_from_folder);
        if !folder_abs.exists() {
            return Err(VerifyError::ScanFolderMissing(
                self.spec.files_from_folder.clone(),
            ));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&folder_abs).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy();
            if !CODE_FILE_SUFFIXES
                .iter()
                .any(|suffix| name.ends_with(suffix))
            {
                continue;
            }

            let within = entry.path().strip_prefix(&folder_abs).unwrap_or(entry.path());
            entries.push(ScanEntry {
                rel: format!(
                    "{}/{}",
                    self.spec.files_from_folder,
                    paths::to_slash_string(within)
                ),
                abs: entry.path().to_path_buf(),
            });
        }
        Ok(entries)
    }
}

fn read_and_extract(
    extractor: &TsExtractor,
    entry: &ScanEntry,
) -> Result<Option<Extraction>, VerifyError> {
    match std::fs::read_to_string(&entry.abs) {
        Ok(source) => Ok(Some(extractor.extract(&source))),
        Err(_) if entry.abs.is_dir() => {
            debug!("{} is a directory, contributes no dependencies", entry.rel);
            Ok(None)
        }
        Err(source) => Err(VerifyError::FileRead {
            path: entry.abs.clone(),
            source,
        }),
    }
}

/// Verifies `spec` and returns the violations only.
///
/// This is the plain entry point for architecture tests; use
/// [`Verifier::run`] when diagnostics or file counts matter.
///
/// # Errors
///
/// See [`Verifier::run`].
pub fn verify_architecture(
    spec: &ArchitectureSpec,
    tsconfig: impl AsRef<Path>,
) -> Result<Vec<Violation>, VerifyError> {
    Verifier::new(spec.clone(), tsconfig.as_ref())
        .run()
        .map(|report| report.violations)
}
