//! Volume boundary tracking (spec.md §4.6 "Volume tracking").
//!
//! Keeps the last-seen drive/root component so the driver knows when to
//! emit a volume footer for the previous root and a header for the next.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Default)]
pub struct VolumeTracker {
    current: Option<PathBuf>,
    files_seen: u64,
}

/// What the driver should do as it moves to a new directory's root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeTransition {
    /// Same volume as before; no header/footer needed.
    Same,
    /// First volume seen; emit a header only.
    Begin,
    /// Volume changed; emit a footer for the previous one (only if it saw
    /// files) and a header for the new one.
    Changed { footer_for_previous: bool },
}

impl VolumeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the root component (drive letter or UNC share) from a path,
    /// used as the volume identity.
    #[must_use]
    pub fn root_of(path: &Path) -> PathBuf {
        let mut root = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(p) => root.push(p.as_os_str()),
                Component::RootDir => root.push(component.as_os_str()),
                _ => break,
            }
        }
        root
    }

    /// Advances to `dir`'s volume, returning what changed.
    pub fn advance(&mut self, dir: &Path) -> VolumeTransition {
        let root = Self::root_of(dir);
        match &self.current {
            None => {
                self.current = Some(root);
                self.files_seen = 0;
                VolumeTransition::Begin
            }
            Some(prev) if *prev == root => VolumeTransition::Same,
            Some(_) => {
                let footer_for_previous = self.files_seen > 0;
                self.current = Some(root);
                self.files_seen = 0;
                VolumeTransition::Changed { footer_for_previous }
            }
        }
    }

    pub fn record_file(&mut self) {
        self.files_seen += 1;
    }

    #[must_use]
    pub const fn files_seen(&self) -> u64 {
        self.files_seen
    }
}

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
