//! Format-picture engine (spec.md §4.4, L4).

mod field;
mod parse;
mod render;

pub use field::{CompressionKind, Field, FieldKind, NameStyle, SizeStyle, TimeStyle};
pub use parse::{parse_picture, DeferredNeeds, Picture, PictureOptions, Segment};
pub use render::{negotiate_widths, render_entry, RenderContext};
