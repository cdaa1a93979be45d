//! Pure string-path helpers for specifier and tsconfig resolution.
//!
//! Specifiers and folder arguments are `/`-separated strings relative to the
//! configuration root, not OS paths, so these helpers work on strings
//! directly instead of going through `std::path`.

use std::path::Path;

/// Returns the directory portion of a path string.
///
/// A path without a separator has directory `"."`; a single trailing slash
/// is ignored.
///
/// # Examples
///
/// ```
/// use import_fence_core::paths::dirname;
///
/// assert_eq!(dirname("grandparent/parent/child.txt"), "grandparent/parent");
/// assert_eq!(dirname("tsconfig.json"), ".");
/// ```
#[must_use]
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') { "/" } else { "." };
    }
    match trimmed.rfind('/') {
        None => ".",
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
    }
}

/// Collapses `.` and `..` segments in a path string.
///
/// Leading `..` segments of a relative path are kept (the path may escape
/// its starting directory); an empty result collapses to `"."`.
#[must_use]
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Expresses `to` as a path relative to the directory `from`.
///
/// Both arguments are understood relative to the same (implicit) root.
/// Returns an empty string when the two normalize to the same path.
#[must_use]
pub fn relative(from: &str, to: &str) -> String {
    let from = normalize(from);
    let to = normalize(to);
    if from == to {
        return String::new();
    }

    let from_segments = split_segments(&from);
    let to_segments = split_segments(&to);
    let common = from_segments
        .iter()
        .zip(&to_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_segments.len() {
        parts.push("..");
    }
    parts.extend(&to_segments[common..]);
    parts.join("/")
}

fn split_segments(path: &str) -> Vec<&str> {
    if path == "." || path == "/" {
        return Vec::new();
    }
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolves a specifier against the file it was written in.
///
/// The target is "directory of `base_file`" joined with `specifier`, with
/// `.`/`..` segments collapsed.
///
/// # Examples
///
/// ```
/// use import_fence_core::paths::resolve_against_file;
///
/// assert_eq!(
///     resolve_against_file("../db/x", "src/lib/repositories/a.ts"),
///     "src/lib/db/x",
/// );
/// ```
#[must_use]
pub fn resolve_against_file(specifier: &str, base_file: &str) -> String {
    normalize(&format!("{}/{specifier}", dirname(base_file)))
}

/// Re-bases a path-alias target inherited through an `extends` chain.
///
/// The parent configuration declared `target` relative to its own location;
/// the result expresses the same path relative to the child configuration at
/// `base`. Computed in two hops: locate the parent file via the `extends`
/// reference, resolve `target` against it, then re-express the result
/// relative to the child's directory.
#[must_use]
pub fn rebase_through_extends(base: &str, extends: &str, target: &str) -> String {
    let parent_config = resolve_against_file(extends, base);
    let full_path = resolve_against_file(target, &parent_config);
    relative(dirname(base), &full_path)
}

/// Renders an OS path with forward slashes, for config-root-relative keys.
#[must_use]
pub fn to_slash_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirname_strips_last_segment() {
        assert_eq!(dirname("./grandparent/parent/sibling.txt"), "./grandparent/parent");
        assert_eq!(dirname("./grandparent/parent/"), "./grandparent");
        assert_eq!(dirname("./grandparent/parent"), "./grandparent");
    }

    #[test]
    fn dirname_of_bare_name_is_dot() {
        assert_eq!(dirname("tsconfig.json"), ".");
        assert_eq!(dirname("./tsconfig.json"), ".");
    }

    #[test]
    fn normalize_collapses_dot_segments() {
        assert_eq!(normalize("./grandparent/parent/sibling.txt"), "grandparent/parent/sibling.txt");
        assert_eq!(normalize("./grandparent/parent/../uncle.txt"), "grandparent/uncle.txt");
        assert_eq!(normalize("./grandparent/parent/./child.txt"), "grandparent/parent/child.txt");
    }

    #[test]
    fn normalize_keeps_escaping_parent_segments() {
        assert_eq!(normalize("../src/lib"), "../src/lib");
        assert_eq!(normalize("a/../../b"), "../b");
    }

    #[test]
    fn normalize_empty_is_dot() {
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("."), ".");
    }

    #[test]
    fn resolve_sibling() {
        assert_eq!(
            resolve_against_file("sibling.txt", "grandparent/parent/child.txt"),
            "grandparent/parent/sibling.txt",
        );
    }

    #[test]
    fn resolve_into_parent_directory() {
        assert_eq!(
            resolve_against_file("../otherParent.txt", "./grandparent/parent/child.txt"),
            "grandparent/otherParent.txt",
        );
    }

    #[test]
    fn resolve_extends_reference() {
        assert_eq!(
            resolve_against_file("./parent/tsconfig.json", "./testdata/inheritance/tsconfig.json"),
            "testdata/inheritance/parent/tsconfig.json",
        );
        assert_eq!(
            resolve_against_file("../src/lib", "testdata/inheritance/parent/tsconfig.json"),
            "testdata/inheritance/src/lib",
        );
    }

    #[test]
    fn relative_descends_from_common_prefix() {
        assert_eq!(relative("testdata/inheritance", "testdata/inheritance/src/lib"), "src/lib");
        assert_eq!(relative("a/b", "a/c/d"), "../c/d");
        assert_eq!(relative("a/b", "a/b"), "");
    }

    #[test]
    fn rebase_through_extends_double_hop() {
        assert_eq!(
            rebase_through_extends(
                "./testdata/inheritance/tsconfig.json",
                "./parent/tsconfig.json",
                "../src/lib",
            ),
            "src/lib",
        );
    }
}
