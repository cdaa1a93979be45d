//! Alias table loading from tsconfig-style configuration files.
//!
//! Builds the flattened [`PathReplacement`] list visible to files governed
//! by a configuration: entries inherited through the `extends` chain come
//! first (re-based into the current file's coordinate space), the file's own
//! `compilerOptions.paths` entries last. The format tolerates comments and
//! trailing commas, which real tsconfig files carry.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;
use crate::types::PathReplacement;

#[derive(Debug, Deserialize)]
struct RawTsconfig {
    #[serde(rename = "compilerOptions")]
    compiler_options: Option<RawCompilerOptions>,
    extends: Option<String>,
}

/// `paths` is an `IndexMap`: declaration order is load-bearing because the
/// replacement list is matched first-prefix-wins.
#[derive(Debug, Deserialize)]
struct RawCompilerOptions {
    paths: Option<IndexMap<String, Vec<String>>>,
}

/// Errors when loading a configuration file or its ancestors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file (including an `extends` target).
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        #[source]
        source: std::io::Error,
    },
    /// Configuration is not valid JSON (after comment stripping).
    #[error("invalid tsconfig {path}: {message}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Parse error detail.
        message: String,
    },
    /// A `paths` alias maps to something other than exactly one target.
    #[error("{path}: paths alias \"{alias}\" must map to exactly one target")]
    MultiTarget {
        /// Configuration file declaring the alias.
        path: PathBuf,
        /// The offending alias.
        alias: String,
    },
}

/// Returns the flattened replacement list for `tsconfig`, including entries
/// inherited through its `extends` chain.
///
/// A configuration with neither `extends` nor `paths` yields an empty list.
///
/// # Errors
///
/// Returns [`ConfigError`] when any file in the chain cannot be read or
/// parsed, or an alias has other than exactly one target.
pub fn replacement_paths(tsconfig: &Path) -> Result<Vec<PathReplacement>, ConfigError> {
    let content = std::fs::read_to_string(tsconfig).map_err(|e| ConfigError::Io {
        path: tsconfig.to_path_buf(),
        source: e,
    })?;
    let raw: RawTsconfig =
        serde_json::from_str(&strip_jsonc(&content)).map_err(|e| ConfigError::Parse {
            path: tsconfig.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut replacements = Vec::new();

    if let Some(parent_ref) = &raw.extends {
        let parent_path = tsconfig
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(parent_ref);
        let base = paths::to_slash_string(tsconfig);
        for inherited in replacement_paths(&parent_path)? {
            replacements.push(PathReplacement {
                target: paths::rebase_through_extends(&base, parent_ref, &inherited.target),
                ..inherited
            });
        }
    }

    if let Some(own) = raw.compiler_options.and_then(|options| options.paths) {
        for (alias, targets) in own {
            if targets.len() != 1 {
                return Err(ConfigError::MultiTarget {
                    path: tsconfig.to_path_buf(),
                    alias,
                });
            }
            let target = targets.into_iter().next().unwrap_or_default();
            replacements.push(PathReplacement { alias, target });
        }
    }

    Ok(replacements)
}

fn strip_jsonc(content: &str) -> String {
    strip_trailing_commas(&strip_comments(content))
}

/// Removes `//` and `/* */` comments, tracking string state so specifiers
/// containing slashes survive.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    // keep the newline so line numbers in parse errors hold up
                    while chars.peek().is_some_and(|&n| n != '\n') {
                        chars.next();
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = ' ';
                    for n in chars.by_ref() {
                        if prev == '*' && n == '/' {
                            break;
                        }
                        prev = n;
                    }
                }
                _ => result.push('/'),
            },
            _ => result.push(c),
        }
    }
    result
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            ',' => {
                let next = chars[i + 1..]
                    .iter()
                    .copied()
                    .find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}' | ']')) {
                    result.push(c);
                }
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) -> PathBuf {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    #[test]
    fn own_paths_in_declaration_order() {
        let dir = TempDir::new().expect("tempdir");
        let config = write(
            &dir,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "$lib": ["src/lib"], "$app": ["src/app"] } } }"#,
        );

        let replacements = replacement_paths(&config).expect("resolve");
        assert_eq!(
            replacements,
            vec![
                PathReplacement {
                    alias: "$lib".into(),
                    target: "src/lib".into()
                },
                PathReplacement {
                    alias: "$app".into(),
                    target: "src/app".into()
                },
            ]
        );
    }

    #[test]
    fn bare_config_yields_empty_list() {
        let dir = TempDir::new().expect("tempdir");
        let config = write(&dir, "tsconfig.json", "{}");
        assert!(replacement_paths(&config).expect("resolve").is_empty());
    }

    #[test]
    fn multi_target_alias_is_fatal() {
        let dir = TempDir::new().expect("tempdir");
        let config = write(
            &dir,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "$lib": ["src/lib", "fallback/lib"] } } }"#,
        );

        let error = replacement_paths(&config).expect_err("must fail");
        assert!(matches!(error, ConfigError::MultiTarget { ref alias, .. } if alias == "$lib"));
    }

    #[test]
    fn comments_and_trailing_commas_tolerated() {
        let dir = TempDir::new().expect("tempdir");
        let config = write(
            &dir,
            "tsconfig.json",
            "{\n  // project aliases\n  \"compilerOptions\": {\n    /* one entry */\n    \"paths\": {\n      \"$lib\": [\"src/lib\"],\n    },\n  },\n}\n",
        );

        let replacements = replacement_paths(&config).expect("resolve");
        assert_eq!(replacements.len(), 1);
        assert_eq!(replacements[0].alias, "$lib");
    }

    #[test]
    fn inherited_targets_are_rebased_into_child_space() {
        let dir = TempDir::new().expect("tempdir");
        write(
            &dir,
            "parent/tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "$lib": ["../src/lib"], "$lib/*": ["../src/lib/*"] } } }"#,
        );
        let child = write(&dir, "tsconfig.json", r#"{ "extends": "./parent/tsconfig.json" }"#);

        let replacements = replacement_paths(&child).expect("resolve");
        assert_eq!(
            replacements,
            vec![
                PathReplacement {
                    alias: "$lib".into(),
                    target: "src/lib".into()
                },
                PathReplacement {
                    alias: "$lib/*".into(),
                    target: "src/lib/*".into()
                },
            ]
        );
    }

    #[test]
    fn own_entries_follow_inherited_entries() {
        let dir = TempDir::new().expect("tempdir");
        write(
            &dir,
            "parent/tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "$lib": ["../src/lib"] } } }"#,
        );
        let child = write(
            &dir,
            "tsconfig.json",
            r#"{ "extends": "./parent/tsconfig.json", "compilerOptions": { "paths": { "$lib": ["src/other"] } } }"#,
        );

        let replacements = replacement_paths(&child).expect("resolve");
        assert_eq!(replacements.len(), 2);
        assert_eq!(replacements[0].target, "src/lib");
        assert_eq!(replacements[1].target, "src/other");
    }

    #[test]
    fn unreadable_extends_target_is_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let config = write(&dir, "tsconfig.json", r#"{ "extends": "./missing/tsconfig.json" }"#);

        let error = replacement_paths(&config).expect_err("must fail");
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let config = write(&dir, "tsconfig.json", "{ not json ");

        let error = replacement_paths(&config).expect_err("must fail");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn strip_comments_preserves_strings_with_slashes() {
        let stripped = strip_comments(r#"{ "a": "no//comment" } // tail"#);
        assert!(stripped.contains("no//comment"));
        assert!(!stripped.contains("tail"));
    }
}
