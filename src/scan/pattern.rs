//! Pattern resolution and sibling coalescing (spec.md §3 "Pattern",
//! §4.6 "Pattern grouping"), grounded on `original_source/patterns.cpp`'s
//! per-directory grouping of command-line arguments.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::model::Pattern;

/// Whether a bare (no path separator) argument should be treated as a
/// wildcard pattern against the current directory rather than a literal
/// path (spec.md §4.3 glob metacharacters).
fn looks_like_glob(raw: &str) -> bool {
    raw.contains(['*', '?', '['])
}

/// Splits a raw command-line argument into a directory portion and a
/// sibling (filename/glob) portion, the way `patterns.cpp` splits a
/// path at its last separator.
fn split_directory_and_sibling(raw: &str) -> (PathBuf, String, bool) {
    let path = Path::new(raw);
    if path.is_dir() {
        return (path.to_path_buf(), "*".to_string(), true);
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            (parent.to_path_buf(), name.to_string_lossy().into_owned(), false)
        }
        (Some(_), Some(_)) if !path.exists() && !looks_like_glob(raw) => {
            // A bare argument with no separator that doesn't exist and
            // isn't a glob is a literal missing directory, not a
            // non-matching sibling pattern against `.` (spec.md §4.6 "A
            // missing directory that is the only pattern yields
            // `ErrorKind::FileNotFound` with exit code 1").
            (PathBuf::from(raw), "*".to_string(), false)
        }
        (Some(_), Some(name)) => (PathBuf::from("."), name.to_string_lossy().into_owned(), false),
        _ => (PathBuf::from("."), raw.to_string(), false),
    }
}

/// Resolves the raw CLI arguments into coalesced [`Pattern`]s: one per
/// distinct directory, each carrying every sibling pattern that targets it
/// (spec.md §3 "Multiple command-line patterns targeting the same
/// directory are coalesced").
#[must_use]
pub fn resolve_patterns(raw_args: &[String]) -> Vec<Pattern> {
    let args: Vec<&str> = if raw_args.is_empty() { vec!["."] } else { raw_args.iter().map(String::as_str).collect() };

    // `IndexMap` rather than a `Vec` + linear scan: lookup by directory is
    // O(1) per argument instead of O(n), while still iterating patterns in
    // first-seen directory order (spec.md §3 coalescing doesn't reorder
    // patterns relative to their first mention on the command line).
    let mut patterns: IndexMap<PathBuf, Pattern> = IndexMap::new();
    for raw in args {
        let (dir, sibling, implicit) = split_directory_and_sibling(raw);
        let pattern = patterns
            .entry(dir.clone())
            .or_insert_with(|| Pattern::new(dir));
        pattern.siblings.push(sibling);
        pattern.implicit_wildcard = pattern.implicit_wildcard || implicit;
    }
    patterns.into_values().collect()
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
