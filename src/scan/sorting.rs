//! Entry ordering (spec.md §4.6 "Pattern grouping"), grounded on
//! `original_source/sorting.cpp`'s comparator-chain, reworked from a
//! mutable global sort-order string into an owned `Vec<SortKey>` chain.

use std::cmp::Ordering;

use crate::model::{Entry, WhichSize, WhichTime};

/// Whether directories sort before, after, or alongside files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirGrouping {
    /// Directories first, same as the original's default `g` key.
    #[default]
    First,
    Last,
    Mixed,
}

/// One key in a sort comparator chain, combinable with a reverse flag
/// (the original's leading `-` per sort letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Extension,
    Size(WhichSize),
    Date(WhichTime),
    CompressionRatio,
}

#[derive(Debug, Clone, Copy)]
pub struct SortSpec {
    pub key: SortKey,
    pub reverse: bool,
}

/// A full ordering: `None` means the scan driver preserves enumeration
/// order (the original's `u` "unsorted" key).
#[derive(Debug, Clone, Default)]
pub struct SortOrder {
    pub keys: Vec<SortSpec>,
    pub grouping: DirGrouping,
    pub unsorted: bool,
}

impl SortOrder {
    #[must_use]
    pub fn unsorted() -> Self {
        Self {
            unsorted: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_grouping(mut self, grouping: DirGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    #[must_use]
    pub fn push(mut self, key: SortKey, reverse: bool) -> Self {
        self.keys.push(SortSpec { key, reverse });
        self
    }

    /// Stable comparator over a directory's entries: grouping first, then
    /// the configured key chain, then a name tie-break.
    #[must_use]
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        if self.unsorted {
            return Ordering::Equal;
        }

        if let Some(ord) = self.compare_grouping(a, b) {
            return ord;
        }

        for spec in &self.keys {
            let ord = compare_key(spec.key, a, b);
            let ord = if spec.reverse { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }

        compare_name(a, b)
    }

    fn compare_grouping(&self, a: &Entry, b: &Entry) -> Option<Ordering> {
        match self.grouping {
            DirGrouping::Mixed => None,
            DirGrouping::First | DirGrouping::Last => {
                let (da, db) = (a.is_directory(), b.is_directory());
                if da == db {
                    return None;
                }
                let dirs_win = matches!(self.grouping, DirGrouping::First);
                Some(if da == dirs_win {
                    Ordering::Less
                } else {
                    Ordering::Greater
                })
            }
        }
    }
}

fn compare_key(key: SortKey, a: &Entry, b: &Entry) -> Ordering {
    match key {
        SortKey::Name => compare_name(a, b),
        SortKey::Extension => extension(&a.long_name).cmp(extension(&b.long_name)),
        SortKey::Size(which) => a.size(which).cmp(&b.size(which)),
        SortKey::Date(which) => a.time(which).cmp(&b.time(which)),
        SortKey::CompressionRatio => a
            .compression_ratio()
            .unwrap_or(0.0)
            .partial_cmp(&b.compression_ratio().unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
    }
}

fn compare_name(a: &Entry, b: &Entry) -> Ordering {
    a.long_name.to_lowercase().cmp(&b.long_name.to_lowercase())
}

fn extension(name: &str) -> &str {
    name.rfind('.').map_or("", |i| &name[i + 1..])
}

#[cfg(test)]
#[path = "sorting_tests.rs"]
mod tests;
