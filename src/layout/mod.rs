//! Column packer (spec.md §4.5, L5).

mod columns;

pub use columns::{pack_columns, Direction};
