//! Scan driver (spec.md §4.6, L6), grounded on `original_source/scan.cpp`'s
//! `ScanDir` state machine and the teacher's `src/scanner/directory.rs`
//! traversal shape, reworked from callback-object dispatch into an explicit
//! pending-directory work queue (per spec.md §9 design note: "keep it that
//! way").

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::color::{self, CategoryIndex, ContentFlags};
use crate::error::{DirpixError, Result};
use crate::git::GitStatus;
use crate::glob::{FilenamePattern, GlobPatterns, MatchFlags};
use crate::layout::{self, Direction};
use crate::model::{Attributes, Entry, Pattern};
use crate::output::{OutputSink, Reporter};
use crate::picture::{Picture, RenderContext};
use crate::text::display_width;

use super::pattern::resolve_patterns;
use super::sorting::{SortKey, SortOrder};
use super::volume::{VolumeTracker, VolumeTransition};

/// Everything the driver needs besides the pattern list: the negotiated
/// picture, ordering, traversal limits, and display geometry.
pub struct ScanOptions {
    pub picture: Picture,
    pub sort: SortOrder,
    pub recurse: bool,
    pub limit_depth: Option<usize>,
    pub skip_hidden: bool,
    pub use_gitignore: bool,
    pub use_git: bool,
    pub extra_ignore_globs: Vec<String>,
    pub lowercase: bool,
    pub truncate_glyph: char,
    pub full_path: bool,
    pub wide: bool,
    pub direction: Direction,
    pub column_padding: usize,
    pub max_line_width: usize,
    pub color_rules: Vec<color::Rule>,
    pub executable_exts: Vec<String>,
}

/// Drives the whole scan: resolves patterns, recurses, renders.
pub struct ScanDriver<'a> {
    options: ScanOptions,
    sink: &'a OutputSink,
    reporter: &'a dyn Reporter,
    git: GitStatus,
    volumes: VolumeTracker,
    total_files: u64,
    total_bytes: u64,
}

struct PendingDir {
    path: PathBuf,
    depth: usize,
}

impl<'a> ScanDriver<'a> {
    #[must_use]
    pub fn new(options: ScanOptions, sink: &'a OutputSink, reporter: &'a dyn Reporter) -> Self {
        Self {
            options,
            sink,
            reporter,
            git: GitStatus::default(),
            volumes: VolumeTracker::new(),
            total_files: 0,
            total_bytes: 0,
        }
    }

    /// Runs the whole scan over `raw_args`, returning the process exit code
    /// (spec.md §6 "Exit codes").
    ///
    /// An unrecoverable failure (a malformed regex, glob, or picture in one
    /// pattern's matcher construction) aborts only that pattern; every
    /// remaining pattern still runs (spec.md §7 "Propagation": "Unrecoverable
    /// failures abort the current pattern only; subsequent patterns still
    /// run"). Only a usage error during CLI-argument parsing, which happens
    /// before this loop even starts, aborts the whole process.
    pub fn run(&mut self, raw_args: &[String]) -> i32 {
        let patterns = resolve_patterns(raw_args);
        let mut saw_any_pattern_error = false;

        for pattern in patterns {
            if let Err(err) = self.run_pattern(&pattern) {
                self.reporter.report(&err);
                saw_any_pattern_error = true;
            }
        }

        if saw_any_pattern_error {
            1
        } else {
            0
        }
    }

    fn run_pattern(&mut self, pattern: &Pattern) -> Result<()> {
        match self.volumes.advance(&pattern.directory) {
            VolumeTransition::Same => {}
            VolumeTransition::Begin => self.sink.write_line(&format!(
                "Volume: {}",
                pattern.directory.display()
            )),
            VolumeTransition::Changed { footer_for_previous } => {
                if footer_for_previous {
                    self.sink
                        .write_line(&format!("{} file(s)", self.volumes.files_seen()));
                }
                self.sink.write_line(&format!(
                    "Volume: {}",
                    pattern.directory.display()
                ));
            }
        }

        let matchers: Vec<FilenamePattern> = pattern
            .siblings
            .iter()
            .map(|s| FilenamePattern::parse(s, MatchFlags::CASEFOLD))
            .collect::<Result<_>>()?;

        let mut queue = vec![PendingDir {
            path: pattern.directory.clone(),
            depth: 0,
        }];

        while let Some(dir) = queue.pop() {
            if let Some(limit) = self.options.limit_depth {
                if dir.depth > limit {
                    continue;
                }
            }
            let mut subdirs = self.run_directory(&dir.path, &matchers)?;
            if self.options.recurse {
                subdirs.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
                for sub in subdirs.into_iter().rev() {
                    queue.push(PendingDir {
                        path: sub,
                        depth: dir.depth + 1,
                    });
                }
            }
        }

        Ok(())
    }

    /// Lists, filters, sorts, and renders one directory; returns the
    /// subdirectories discovered for the recursion queue.
    fn run_directory(&mut self, dir: &Path, matchers: &[FilenamePattern]) -> Result<Vec<PathBuf>> {
        // `WalkDir` reports a missing root as a per-item error from the
        // first `next()` call, which the loop below treats as a
        // recoverable per-entry failure; a missing root is the whole
        // pattern failing, so it's checked explicitly and propagated
        // (spec.md §6 "usage error or 'file not found' for a non-glob
        // pattern").
        if !dir.is_dir() {
            return Err(DirpixError::FileNotFound { path: dir.to_path_buf() });
        }

        let ignore = self.load_ignore_globs(dir)?;

        // A single-level `WalkDir` read rather than its own recursion: the
        // driver's explicit `PendingDir` queue in `run_pattern` is what
        // walks subdirectories (spec.md §9 design note), so every directory
        // is still read exactly once through the same entry point.
        let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1).into_iter();

        let mut entries = Vec::new();
        let mut subdirs = Vec::new();

        while let Some(item) = walker.next() {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    let io_err = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    self.reporter.report(&DirpixError::from(io_err));
                    continue;
                }
            };
            let name = item.file_name().to_string_lossy().into_owned();

            if self.options.skip_hidden && name.starts_with('.') {
                continue;
            }
            if ignore.is_ignored(item.path()) {
                continue;
            }

            let entry = match entry_from_dir_entry(&item) {
                Ok(entry) => entry,
                Err(err) => {
                    self.reporter.report(&err);
                    continue;
                }
            };

            if entry.is_directory() && self.options.recurse {
                subdirs.push(item.path().to_path_buf());
            }

            if !matchers.iter().any(|m| m.matches(&name)) {
                continue;
            }

            entries.push(entry);
        }

        entries.sort_by(|a, b| self.options.sort.compare(a, b));

        let repo = if self.options.use_git {
            self.git.status_for(dir, false).ok().flatten().cloned()
        } else {
            None
        };

        for entry in &entries {
            self.total_files += 1;
            self.total_bytes += entry.logical_size;
            self.volumes.record_file();
        }

        if self.options.wide {
            self.render_wide(&entries);
        } else {
            // Accumulate/finalize pass: negotiate auto-width fields (filename,
            // filesize, owner, relative time, branch) across this directory's
            // entries before the render pass, so they line up (spec.md §4.4
            // "Two-pass width protocol").
            let branch = repo.as_ref().and_then(|r| r.branch.as_deref());
            let picture =
                crate::picture::negotiate_widths(&self.options.picture, &entries, self.options.lowercase, branch);
            for entry in &entries {
                self.render_and_write(&picture, dir, entry, repo.as_ref());
            }
        }

        Ok(subdirs)
    }

    /// Grid-packs bare filenames into columns (spec.md §4.5), used for the
    /// wide/bare display mode rather than the full per-field picture: a
    /// directory of many small names reads better in columns than one name
    /// per line.
    fn render_wide(&self, entries: &[Entry]) {
        if entries.is_empty() {
            return;
        }

        let names: Vec<String> = entries
            .iter()
            .map(|e| {
                let mut name = e.long_name.clone();
                if e.is_directory() {
                    name.push('\\');
                } else if e.is_reparse_point() {
                    name.push('@');
                }
                name
            })
            .collect();

        let widths = layout::pack_columns(
            names.len(),
            |i| display_width(&names[i]),
            self.options.direction,
            self.options.column_padding,
            self.options.max_line_width,
        );
        let columns = widths.len().max(1);
        let rows = entries.len().div_ceil(columns);

        for row in 0..rows {
            let mut line = String::new();
            for col in 0..columns {
                let idx = match self.options.direction {
                    Direction::Horizontal => row * columns + col,
                    Direction::Vertical => col * rows + row,
                };
                let Some(name) = names.get(idx) else { break };
                let is_last_in_row = col + 1 == columns || idx + 1 == names.len();
                if is_last_in_row {
                    line.push_str(name);
                } else {
                    let pad = widths[col].saturating_sub(display_width(name));
                    line.push_str(name);
                    line.push_str(&" ".repeat(pad + self.options.column_padding));
                }
            }
            self.sink.write_line(&line);
        }
    }

    fn load_ignore_globs(&self, dir: &Path) -> Result<GlobPatterns> {
        let mut patterns = self.options.extra_ignore_globs.clone();
        if self.options.use_gitignore {
            let gitignore_path = dir.join(".gitignore");
            if let Ok(text) = fs::read_to_string(&gitignore_path) {
                patterns.extend(text.lines().map(str::to_string));
            }
        }
        Ok(GlobPatterns::new(dir.to_path_buf(), &patterns, MatchFlags::SLASHFOLD))
    }

    fn render_and_write(&mut self, picture: &Picture, dir: &Path, entry: &Entry, repo: Option<&crate::git::RepoStatus>) {
        let reparse_missing = entry.is_reparse_point() && !dir.join(&entry.long_name).exists();
        let color = color::lookup_color(entry, &self.options.color_rules, &self.options.executable_exts, reparse_missing);

        let full_path = if self.options.full_path {
            let joined = dir.join(&entry.long_name);
            Some(dunce::simplified(&joined).to_string_lossy().into_owned())
        } else {
            None
        };

        let git_file_status = repo
            .and_then(|r| r.lookup(Path::new(&entry.long_name)))
            .map(|status| (status.staged, status.working));
        let git_repo_status = repo.map(|r| (r.dirty, r.branch.clone().unwrap_or_default()));

        let ctx = RenderContext {
            lowercase: self.options.lowercase,
            truncate_glyph: self.options.truncate_glyph,
            filename_color: color,
            git_file_status,
            git_repo_status,
            full_path,
        };

        let line = crate::picture::render_entry(picture, entry, &ctx);
        self.sink.write_line(&line);
    }
}

fn entry_from_dir_entry(item: &walkdir::DirEntry) -> Result<Entry> {
    let name = item.file_name().to_string_lossy().into_owned();
    let metadata = item.metadata().map_err(|e| {
        let path = item.path().to_path_buf();
        let io_err = e.into_io_error().unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
        DirpixError::io_with_context(io_err, path, "reading metadata")
    })?;

    let mut attrs = Attributes::NONE;
    if metadata.is_dir() {
        attrs |= Attributes::DIRECTORY;
    }
    if metadata.file_type().is_symlink() {
        attrs |= Attributes::REPARSE_POINT;
    }
    if metadata.permissions().readonly() {
        attrs |= Attributes::READONLY;
    }
    if name.starts_with('.') {
        attrs |= Attributes::HIDDEN;
    }

    let mut entry = Entry::new(name, attrs);
    entry.logical_size = metadata.len();
    entry.allocation_size = metadata.len();
    entry.compressed_size = metadata.len();
    entry.modified = metadata.modified().ok().or(Some(SystemTime::now()));
    entry.accessed = metadata.accessed().ok();
    entry.created = metadata.created().ok();
    Ok(entry)
}

/// Extension -> content-flag classification plumbed from `color::lookup`,
/// used by callers building a [`ScanOptions`] that need the same table the
/// color engine consults (e.g. for `--filter` by content flag).
#[must_use]
pub fn classify_extension(name: &str) -> ContentFlags {
    let ext = name.rfind('.').map_or("", |i| &name[i + 1..]);
    color::flags_for_extension(ext)
}

#[must_use]
pub fn category_for(entry: &Entry) -> CategoryIndex {
    CategoryIndex::classify(entry.attributes, false)
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
