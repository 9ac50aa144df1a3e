//! Color engine (spec.md §4.2, L2).

mod gradient;
mod lookup;
mod rules;

pub use gradient::gradient_remap;
pub use lookup::{executable_extensions_from_pathext, flags_for_extension, lookup_color, CategoryIndex, ContentFlags};
pub use rules::{parse_rules, Rule, DEFAULT_RULE_TEXT};
