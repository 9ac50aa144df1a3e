//! Parses `git status --porcelain --no-ahead-behind -unormal --branch
//! [--ignored]` output (spec.md §6), invoked synchronously per repository
//! root and cached in a repo map so recursion never re-invokes it
//! (spec.md §5 "Git subprocess").

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DirpixError, Result};

/// Two-character working/staged status for one tracked or untracked path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Index (staged) status character, e.g. `M`, `A`, `D`, `R`, `C`, `?`, `!`.
    pub staged: char,
    /// Working-tree status character.
    pub working: char,
    /// Path relative to the repository root. For renames this is the
    /// *new* name; `original` carries the pre-rename name.
    pub path: PathBuf,
    pub original: Option<PathBuf>,
}

/// One repository's status snapshot: branch name plus per-file entries,
/// keyed for fast per-entry lookup by the picture engine's `GitFile` field.
#[derive(Debug, Clone, Default)]
pub struct RepoStatus {
    pub branch: Option<String>,
    pub files: HashMap<PathBuf, FileStatus>,
    /// True if `git status` reported any entries at all (dirty working tree).
    pub dirty: bool,
}

impl RepoStatus {
    #[must_use]
    pub fn lookup(&self, relative: &Path) -> Option<&FileStatus> {
        self.files.get(relative)
    }
}

/// Invokes and caches `git status` per repository root.
#[derive(Debug, Default)]
pub struct GitStatus {
    cache: HashMap<PathBuf, Option<RepoStatus>>,
}

impl GitStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status for the repository containing `dir`, invoking
    /// `git` at most once per distinct repository root.
    ///
    /// # Errors
    /// Returns [`DirpixError::GitUnavailable`] if the `git` executable
    /// cannot be spawned at all; a non-repository directory is not an
    /// error, it simply yields `None`.
    pub fn status_for(&mut self, dir: &Path, include_ignored: bool) -> Result<Option<&RepoStatus>> {
        let root = discover_repo_root(dir);
        let Some(root) = root else {
            return Ok(None);
        };

        if !self.cache.contains_key(&root) {
            let status = run_git_status(&root, include_ignored)?;
            self.cache.insert(root.clone(), status);
        }

        Ok(self.cache.get(&root).and_then(Option::as_ref))
    }
}

/// Walks upward from `dir` looking for a `.git` entry, the way the scan
/// driver needs a cheap pre-check before paying for a subprocess spawn.
fn discover_repo_root(dir: &Path) -> Option<PathBuf> {
    let mut current = dir;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

fn run_git_status(root: &Path, include_ignored: bool) -> Result<Option<RepoStatus>> {
    let mut command = Command::new("git");
    command
        .arg("status")
        .arg("--porcelain")
        .arg("--no-ahead-behind")
        .arg("-unormal")
        .arg("--branch")
        .current_dir(root);
    if include_ignored {
        command.arg("--ignored");
    }

    let output = command
        .output()
        .map_err(|e| DirpixError::GitUnavailable(format!("failed to spawn git: {e}")))?;

    if !output.status.success() {
        // Not a repository, or git itself errored; treated as "no status"
        // rather than a hard failure (spec.md §7: recoverable, non-fatal).
        return Ok(None);
    }

    let text = String::from_utf8_lossy(&output.stdout);
    Ok(Some(parse_porcelain(&text)))
}

fn parse_porcelain(text: &str) -> RepoStatus {
    let mut status = RepoStatus::default();

    for line in text.lines() {
        if let Some(branch_line) = line.strip_prefix("## ") {
            status.branch = Some(parse_branch_header(branch_line));
            continue;
        }
        if line.len() < 3 {
            continue;
        }
        let mut chars = line.chars();
        let staged = chars.next().unwrap_or(' ');
        let working = chars.next().unwrap_or(' ');
        let rest = &line[2..];
        let rest = rest.strip_prefix(' ').unwrap_or(rest);

        status.dirty = true;

        let (original, path) = if staged == 'R' || working == 'R' {
            if let Some((from, to)) = rest.split_once(" -> ") {
                (Some(unquote(from)), unquote(to))
            } else {
                (None, unquote(rest))
            }
        } else {
            (None, unquote(rest))
        };

        status.files.insert(
            path.clone(),
            FileStatus {
                staged,
                working,
                path,
                original,
            },
        );
    }

    status
}

/// `## branch...tracking [ahead N, behind M]` or `## HEAD (no branch)`.
fn parse_branch_header(rest: &str) -> String {
    let name = rest.split("...").next().unwrap_or(rest);
    let name = name.split(' ').next().unwrap_or(name);
    name.to_string()
}

/// Git quotes paths containing unusual bytes in double quotes with C-style
/// escapes; UTF-8 filenames without special characters pass through bare.
fn unquote(raw: &str) -> PathBuf {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                match chars.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => out.push(other),
                    None => {}
                }
            } else {
                out.push(ch);
            }
        }
        PathBuf::from(out)
    } else {
        PathBuf::from(raw)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
