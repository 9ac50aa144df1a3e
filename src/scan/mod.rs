//! Scan driver and its supplements (spec.md §4.6, L6): pattern resolution,
//! entry ordering, volume-boundary tracking, and the directory-recursion
//! state machine itself.

mod driver;
mod pattern;
mod sorting;
mod volume;

pub use driver::{category_for, classify_extension, ScanDriver, ScanOptions};
pub use pattern::resolve_patterns;
pub use sorting::{DirGrouping, SortKey, SortOrder, SortSpec};
pub use volume::{VolumeTracker, VolumeTransition};
