//! `GlobPatterns`: an ordered, possibly-negated ignore list (spec.md §4.3
//! "Glob ordered list"), grounded on `original_source/patterns.cpp`'s
//! per-directory ignore-glob vector and the teacher's `GlobFilter`
//! (`src/scanner/filter.rs`) for the builder/error shape.

use std::path::{Path, PathBuf};

use super::wildmatch::{wildmatch, MatchFlags};

struct CompiledPattern {
    negated: bool,
    /// `true` when the raw pattern had no embedded `/` (other than a
    /// trailing one): such patterns match at any directory depth.
    any_depth: bool,
    /// `true` when the raw pattern started with `/`: top-level only.
    top_level_only: bool,
    pattern: String,
}

/// An ordered list of (possibly negated) glob patterns anchored to a root
/// directory, matched the way `.gitignore` resolves overrides: the last
/// matching rule wins.
pub struct GlobPatterns {
    root: PathBuf,
    patterns: Vec<CompiledPattern>,
    has_negation: bool,
    flags: MatchFlags,
}

impl GlobPatterns {
    #[must_use]
    pub fn new(root: PathBuf, raw_patterns: &[String], flags: MatchFlags) -> Self {
        let mut has_negation = false;
        let patterns = raw_patterns
            .iter()
            .map(|raw| {
                let (negated, body) = if let Some(rest) = raw.strip_prefix('!') {
                    has_negation = true;
                    (true, rest)
                } else {
                    (false, raw.as_str())
                };
                let top_level_only = body.starts_with('/');
                let body = body.strip_prefix('/').unwrap_or(body);
                let any_depth = !body.trim_end_matches('/').contains('/');
                CompiledPattern {
                    negated,
                    any_depth,
                    top_level_only,
                    pattern: body.to_string(),
                }
            })
            .collect();

        Self {
            root,
            patterns,
            has_negation,
            flags,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `true` when `path` (relative to [`Self::root`]) should be
    /// ignored: the most recently matching non-negated rule wins.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let full = path.to_string_lossy();

        let mut ignored = false;
        for rule in &self.patterns {
            let candidate = if rule.top_level_only { &*full } else { filename };
            let target = if rule.any_depth && !rule.top_level_only {
                filename
            } else {
                candidate
            };

            if wildmatch(&rule.pattern, target, self.flags) {
                ignored = !rule.negated;
                // Short-circuit: with no negations present, the first
                // positive hit is final (spec.md §4.3).
                if !self.has_negation && ignored {
                    return true;
                }
            }
        }
        ignored
    }
}

#[cfg(test)]
#[path = "ignore_tests.rs"]
mod tests;
