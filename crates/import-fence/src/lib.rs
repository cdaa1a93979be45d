//! # import-fence
//!
//! Folder-level dependency conformance testing for TypeScript/JavaScript
//! projects: assert that files under one folder never reference modules
//! under another, directly or through tsconfig path aliases.
//!
//! This is the facade crate; it re-exports the core pipeline and adds
//! [`assert_architecture`] for `cargo test` integration.
//!
//! ## Quick Start
//!
//! ```toml
//! [dev-dependencies]
//! import-fence = "0.2"
//! ```
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! use import_fence::ArchitectureSpec;
//!
//! #[test]
//! fn repositories_do_not_touch_db() {
//!     import_fence::assert_architecture(
//!         &ArchitectureSpec::new("src/repositories", "src/db"),
//!         "web/tsconfig.json",
//!     );
//! }
//! ```
//!
//! On violation the test fails with a clickable `file:line` list of every
//! offending file.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use import_fence::{verify_architecture, ArchitectureSpec};
//!
//! let violations = verify_architecture(
//!     &ArchitectureSpec::new("src/repositories", "src/db"),
//!     "tsconfig.json",
//! )?;
//! ```

#![forbid(unsafe_code)]

// Re-export the core pipeline types and entry points
pub use import_fence_core::*;

mod runner;

pub use runner::assert_architecture;
