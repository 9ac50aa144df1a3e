//! Git integration: per-repository status via the `git` executable
//! (spec.md §6 "Git integration"), not a linked library.
//!
//! The core never links `gix`; it shells out to `git status --porcelain` and
//! parses the textual wire format, same as the original's `git.cpp`. This
//! keeps the dependency footprint matching what a directory-listing tool
//! actually needs: one subprocess call per repository root, cached.

mod status;

pub use status::{FileStatus, GitStatus, RepoStatus};
