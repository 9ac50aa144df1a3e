//! Cell-width & escape iterator (spec.md §4.1, L1).

mod ecma48;
mod width;

pub use ecma48::{decode_osc, process, Code, CodeKind, Ecma48Iter, OscVariant, ProcessorFlags};
pub use width::{char_width, display_width, grapheme_width, truncate_to_width, CellWidthIter};
