//! Picture grammar parser (spec.md §4.4 "Picture grammar"), grounded on
//! `original_source/fields.cpp`'s specifier scanner.

use crate::error::{DirpixError, Result};
use crate::model::{Attributes, WhichSize, WhichTime};

use super::field::{CompressionKind, Field, FieldKind, NameStyle, SizeStyle, TimeStyle};

/// A literal run of text, or a reference to a field by index into
/// [`Picture::fields`] — the "explicit offset into a shared template
/// vector" the design notes call for, instead of embedding placeholder
/// characters in a string.
#[derive(Debug, Clone)]
pub enum Segment {
    Literal(String),
    Field(usize),
}

/// Which CLI flags are in effect, resolving `?`-conditional fields
/// (spec.md §4.4).
#[derive(Debug, Clone, Copy, Default)]
pub struct PictureOptions {
    pub short_names: bool,
    pub owner: bool,
    pub ratio: bool,
}

/// Which width-discovery passes a picture requires before it can render
/// (spec.md §4.4 "Two-pass width protocol").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeferredNeeds {
    pub filename: bool,
    pub branch: bool,
    pub relative_time: bool,
    pub filesize: bool,
    pub owner: bool,
}

impl DeferredNeeds {
    #[must_use]
    pub const fn any(self) -> bool {
        self.filename || self.branch || self.relative_time || self.filesize || self.owner
    }
}

/// A parsed format picture: an ordered field list plus the template
/// segments that interleave literal text with field placeholders.
#[derive(Debug, Clone)]
pub struct Picture {
    pub fields: Vec<Field>,
    pub segments: Vec<Segment>,
    pub deferred: DeferredNeeds,
}

struct BracketGroup {
    /// Index into `segments` where this group's literal/field content begins.
    start: usize,
    /// Index into `fields` of the first field parsed inside this group.
    first_field: usize,
    /// Set when a conditional field inside this group was skipped because
    /// its CLI option wasn't enabled.
    any_skipped: bool,
}

/// Parses a picture string into an ordered field list plus template
/// segments (spec.md §4.4).
///
/// # Errors
/// Returns [`DirpixError::BadPicture`] on an unrecognized field letter, a
/// dangling `[`/`]`, or a trailing `\` with no character to escape.
pub fn parse_picture(input: &str, options: PictureOptions) -> Result<Picture> {
    let mut fields = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();
    let mut literal = String::new();
    let mut groups: Vec<BracketGroup> = Vec::new();
    let mut deferred = DeferredNeeds::default();

    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    macro_rules! flush_literal {
        () => {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
        };
    }

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\\' => {
                let Some(&escaped) = chars.get(i + 1) else {
                    return Err(DirpixError::BadPicture(
                        "trailing backslash with nothing to escape".to_string(),
                    ));
                };
                literal.push(escaped);
                i += 2;
            }
            '[' => {
                flush_literal!();
                groups.push(BracketGroup {
                    start: segments.len(),
                    first_field: fields.len(),
                    any_skipped: false,
                });
                i += 1;
            }
            ']' => {
                flush_literal!();
                let Some(group) = groups.pop() else {
                    return Err(DirpixError::BadPicture("unmatched ']'".to_string()));
                };
                // If any conditional field inside this group was skipped,
                // the whole bracketed literal content disappears so
                // adjacent fields don't acquire extra padding.
                if group.any_skipped {
                    segments.truncate(group.start);
                    fields.truncate(group.first_field);
                }
                i += 1;
            }
            c if c.is_ascii_uppercase() => {
                flush_literal!();
                let (field, consumed) = parse_field_specifier(&chars[i..], options, &mut deferred)?;
                let conditional = field.conditional;
                let satisfied = field.conditional_satisfied;
                if conditional && !satisfied {
                    // Dropped inline (no enclosing bracket); still record
                    // it so an enclosing `[...]` knows to strip itself.
                    if let Some(group) = groups.last_mut() {
                        group.any_skipped = true;
                    }
                    i += consumed;
                    continue;
                }
                segments.push(Segment::Field(fields.len()));
                fields.push(field);
                i += consumed;
            }
            other => {
                literal.push(other);
                i += 1;
            }
        }
    }

    if !groups.is_empty() {
        return Err(DirpixError::BadPicture("unmatched '['".to_string()));
    }
    flush_literal!();

    Ok(Picture {
        fields,
        segments,
        deferred,
    })
}

fn parse_field_specifier(
    chars: &[char],
    options: PictureOptions,
    deferred: &mut DeferredNeeds,
) -> Result<(Field, usize)> {
    let letter = chars[0];
    let mut idx = 1;
    let options_str: String = chars[idx..]
        .iter()
        .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || **c == '?')
        .collect();
    idx += options_str.chars().count();

    let mut field = match letter {
        'F' => Field::new(FieldKind::Filename, 0),
        'X' => Field::new(FieldKind::Short, 0),
        'S' => Field::new(FieldKind::Size, 0),
        'D' => Field::new(FieldKind::Time, 0),
        'C' => Field::new(FieldKind::Compression, 0),
        'O' => Field::new(FieldKind::Owner, 0),
        'T' => Field::new(FieldKind::Attributes, 0),
        'R' => Field::new(FieldKind::GitRepo, 0),
        'G' => Field::new(FieldKind::GitFile, 0),
        other => {
            return Err(DirpixError::BadPicture(format!(
                "unrecognized field letter '{other}'"
            )))
        }
    };

    let mut declared_width = String::new();
    for opt in options_str.chars() {
        if opt.is_ascii_digit() {
            declared_width.push(opt);
            continue;
        }
        match (letter, opt) {
            ('F', 'f') => field.name_style = NameStyle::Fat,
            ('F', 'l') => field.name_style = NameStyle::Long,
            ('F', 'x') => field.name_style = NameStyle::ShortVariant,
            ('X', '?') => {
                field.conditional = true;
                field.conditional_satisfied = options.short_names;
            }
            ('S', 'm') => field.size_style = SizeStyle::Mini,
            ('S', 's') => field.size_style = SizeStyle::Short,
            ('S', 'a') => field.size_which = WhichSize::Allocation,
            ('S', 'c') => field.size_which = WhichSize::Compressed,
            ('S', 'f') => field.size_which = WhichSize::Logical,
            ('S', '?') => {
                field.conditional = true;
                field.conditional_satisfied = options.ratio;
            }
            ('D', 'l') => field.time_style = TimeStyle::Long,
            ('D', 'm') => field.time_style = TimeStyle::Mini,
            ('D', 'i') => field.time_style = TimeStyle::Iso,
            ('D', 'p') => field.time_style = TimeStyle::Compact,
            ('D', 's') => field.time_style = TimeStyle::Short,
            ('D', 'o') => field.time_style = TimeStyle::LongIso,
            ('D', 'n') => field.time_style = TimeStyle::Locale,
            ('D', 'x') => field.time_style = TimeStyle::Extended,
            ('D', 'r') => {
                field.time_style = TimeStyle::Relative;
                deferred.relative_time = true;
            }
            ('D', 'a') => field.time_which = WhichTime::Accessed,
            ('D', 'c') => field.time_which = WhichTime::Created,
            ('D', 'w') => field.time_which = WhichTime::Modified,
            ('C', 'a') => field.compression_kind = CompressionKind::Allocation,
            ('C', 'c') => field.compression_kind = CompressionKind::Compressed,
            ('C', '?') => {
                field.conditional = true;
                field.conditional_satisfied = options.ratio;
            }
            ('O', '?') => {
                field.conditional = true;
                field.conditional_satisfied = options.owner;
            }
            // Attribute mask letters for 'T' are reinterpreted as a bitmask
            // below, not validated here.
            ('T', _) => {}
            _ => {
                return Err(DirpixError::BadPicture(format!(
                    "unrecognized option '{opt}' for field '{letter}'"
                )))
            }
        }
    }

    if letter == 'T' {
        // Attribute mask letters follow directly and were already consumed
        // as part of `options_str` (all lowercase); reinterpret them as a
        // mask instead of generic options.
        let mut mask = Attributes::NONE;
        for opt in options_str.chars() {
            if let Some(bit) = attribute_letter(opt) {
                mask |= bit;
            }
        }
        field.attr_mask = Some(mask);
    }

    if !declared_width.is_empty() {
        field.width = declared_width.parse().unwrap_or(0);
    } else if letter == 'X' {
        field.width = 12;
    } else if letter == 'F' && field.width == 0 {
        field.auto_filename_width = true;
        deferred.filename = true;
    }

    if letter == 'S' && field.width == 0 {
        deferred.filesize = true;
    }
    if letter == 'O' && field.width == 0 {
        deferred.owner = true;
    }
    if letter == 'R' {
        deferred.branch = true;
    }

    Ok((field, idx))
}

fn attribute_letter(letter: char) -> Option<Attributes> {
    Some(match letter {
        'r' => Attributes::READONLY,
        'h' => Attributes::HIDDEN,
        's' => Attributes::SYSTEM,
        'd' => Attributes::DIRECTORY,
        'a' => Attributes::ARCHIVE,
        'e' => Attributes::ENCRYPTED,
        'p' => Attributes::SPARSE,
        't' => Attributes::TEMPORARY,
        'c' => Attributes::COMPRESSED,
        'o' => Attributes::OFFLINE,
        'n' => Attributes::NOT_CONTENT_INDEXED,
        'j' => Attributes::REPARSE_POINT,
        _ => return None,
    })
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
