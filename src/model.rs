//! Entry/attribute/time/size data model (spec.md §3).

use std::path::PathBuf;
use std::time::SystemTime;

/// Attribute bit-set carried by an [`Entry`].
///
/// Hand-rolled rather than pulled from the `bitflags` crate: twelve fixed
/// bits with no need for iteration or serde support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Attributes(u16);

impl Attributes {
    pub const NONE: Self = Self(0);
    pub const READONLY: Self = Self(1 << 0);
    pub const HIDDEN: Self = Self(1 << 1);
    pub const SYSTEM: Self = Self(1 << 2);
    pub const DIRECTORY: Self = Self(1 << 3);
    pub const ARCHIVE: Self = Self(1 << 4);
    pub const ENCRYPTED: Self = Self(1 << 5);
    pub const SPARSE: Self = Self(1 << 6);
    pub const TEMPORARY: Self = Self(1 << 7);
    pub const COMPRESSED: Self = Self(1 << 8);
    pub const OFFLINE: Self = Self(1 << 9);
    pub const NOT_CONTENT_INDEXED: Self = Self(1 << 10);
    pub const REPARSE_POINT: Self = Self(1 << 11);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self(bits)
    }
}

impl std::ops::BitOr for Attributes {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Attributes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for Attributes {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Which of the three sizes a [`Field`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhichSize {
    Logical,
    Allocation,
    Compressed,
}

/// Which of the three timestamps a [`Field`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhichTime {
    Accessed,
    Created,
    Modified,
}

/// One alternate data stream attached to an [`Entry`].
#[derive(Debug, Clone)]
pub struct Stream {
    pub name: String,
    pub logical_size: u64,
}

/// A single filesystem entry, populated once by the scan and treated as
/// immutable thereafter.
#[derive(Debug, Clone)]
pub struct Entry {
    pub long_name: String,
    pub short_name: Option<String>,
    pub attributes: Attributes,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
    pub logical_size: u64,
    pub allocation_size: u64,
    pub compressed_size: u64,
    pub reparse_tag: Option<u32>,
    pub owner: Option<String>,
    streams: Option<Vec<Stream>>,
}

impl Entry {
    #[must_use]
    pub fn new(long_name: String, attributes: Attributes) -> Self {
        Self {
            long_name,
            short_name: None,
            attributes,
            accessed: None,
            created: None,
            modified: None,
            logical_size: 0,
            allocation_size: 0,
            compressed_size: 0,
            reparse_tag: None,
            owner: None,
            streams: None,
        }
    }

    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.attributes.contains(Attributes::DIRECTORY)
    }

    #[must_use]
    pub const fn is_reparse_point(&self) -> bool {
        self.attributes.contains(Attributes::REPARSE_POINT)
    }

    #[must_use]
    pub fn size(&self, which: WhichSize) -> u64 {
        match which {
            WhichSize::Logical => self.logical_size,
            WhichSize::Allocation => self.allocation_size,
            WhichSize::Compressed => self.compressed_size,
        }
    }

    #[must_use]
    pub const fn time(&self, which: WhichTime) -> Option<SystemTime> {
        match which {
            WhichTime::Accessed => self.accessed,
            WhichTime::Created => self.created,
            WhichTime::Modified => self.modified,
        }
    }

    /// Lazily-populated list of alternate data streams; `None` until the
    /// scan driver decides it needs them (spec.md §3 "lazily populated").
    #[must_use]
    pub fn streams(&self) -> Option<&[Stream]> {
        self.streams.as_deref()
    }

    pub fn set_streams(&mut self, streams: Vec<Stream>) {
        self.streams = Some(streams);
    }

    /// Compression ratio of `compressed_size` against `logical_size`, or
    /// `None` when the file isn't compressed or is empty.
    #[must_use]
    pub fn compression_ratio(&self) -> Option<f64> {
        if self.logical_size == 0 || self.compressed_size == 0 {
            return None;
        }
        Some(self.compressed_size as f64 / self.logical_size as f64)
    }
}

/// A per-directory pattern: a directory portion plus the sibling patterns
/// (filenames/globs) that target it, coalesced so headers/footers print once
/// per directory even when multiple command-line arguments share it.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub directory: PathBuf,
    pub siblings: Vec<String>,
    pub implicit_wildcard: bool,
    pub ignore_globs: Vec<String>,
}

impl Pattern {
    #[must_use]
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            siblings: Vec::new(),
            implicit_wildcard: false,
            ignore_globs: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
