//! Field model for the format-picture engine (spec.md §3 "Field", §4.4),
//! grounded on `original_source/fields.h`'s `FieldInfo`, reworked per the
//! design note into a tagged-variant-per-kind struct with an explicit
//! offset into a shared template vector instead of the placeholder-char
//! trick.

use crate::model::{Attributes, WhichSize, WhichTime};

/// Size rendering style (spec.md §4.4 `S` options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeStyle {
    Mini,
    Short,
    Normal,
}

/// Date/time rendering style (spec.md §4.4 `D` options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    Mini,
    Short,
    Iso,
    Long,
    LongIso,
    Relative,
    Extended,
    Locale,
    Compact,
    Normal,
}

/// Filename rendering variant (spec.md §4.4 `F` options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    Normal,
    Fat,
    Long,
    ShortVariant,
}

/// Which ratio a `C` field reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionKind {
    Allocation,
    Compressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Filename,
    Short,
    Size,
    Time,
    Compression,
    Attributes,
    Owner,
    GitFile,
    GitRepo,
}

/// One typed field within a [`super::Picture`] (spec.md §3 "Field").
#[derive(Debug, Clone)]
pub struct Field {
    pub kind: FieldKind,
    pub name_style: NameStyle,
    pub size_style: SizeStyle,
    pub size_which: WhichSize,
    pub time_style: TimeStyle,
    pub time_which: WhichTime,
    pub compression_kind: CompressionKind,
    /// Declared width; `0` means auto (negotiated in the width-discovery
    /// pass or sized to content at render time).
    pub width: usize,
    /// Byte offset of this field's placeholder within the picture's
    /// template string.
    pub offset: usize,
    /// Attribute mask for an `Attributes` field (letters like `rhs`).
    pub attr_mask: Option<Attributes>,
    /// `true` when this field's availability depends on a CLI flag
    /// (the `?` option) and that flag was not given — the field and its
    /// enclosing bracket group are dropped at render time.
    pub conditional: bool,
    pub conditional_satisfied: bool,
    /// `true` for filename fields with unspecified width in a multi-field
    /// or multi-column picture: leftover space is redistributed across all
    /// such fields (spec.md §3 invariants).
    pub auto_filename_width: bool,
}

impl Field {
    #[must_use]
    pub fn new(kind: FieldKind, offset: usize) -> Self {
        Self {
            kind,
            name_style: NameStyle::Normal,
            size_style: SizeStyle::Short,
            size_which: WhichSize::Logical,
            time_style: TimeStyle::Normal,
            time_which: WhichTime::Modified,
            compression_kind: CompressionKind::Compressed,
            width: 0,
            offset,
            attr_mask: None,
            conditional: false,
            conditional_satisfied: true,
            auto_filename_width: false,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.conditional || self.conditional_satisfied
    }
}
