//! Per-entry renderer (spec.md §4.4 "Rendering"), grounded on
//! `original_source/formatter.cpp`'s per-field switch, reworked to render
//! each field to an owned `String` plus its cell width rather than writing
//! through a shared output buffer.

use crate::model::{Entry, WhichSize, WhichTime};
use crate::text::{display_width, truncate_to_width};

use super::field::{CompressionKind, Field, FieldKind, NameStyle, SizeStyle, TimeStyle};
use super::parse::{Picture, Segment};

/// Per-render context: flags and externally-supplied strings that aren't
/// derivable from the `Entry` alone.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub lowercase: bool,
    pub truncate_glyph: char,
    /// Filename color, pre-resolved by the L2 cascade for this entry.
    pub filename_color: Option<String>,
    /// `(staged, working)` git status characters for a `GitFile` field.
    pub git_file_status: Option<(char, char)>,
    /// `(dirty, branch)` for a `GitRepo` field; `branch` pre-truncated by
    /// the caller to the negotiated width (clamped to 10 cells).
    pub git_repo_status: Option<(bool, String)>,
    /// When set, the final filename field emits this instead of the bare
    /// name, without truncation (spec.md §4.4 "full-path" case).
    pub full_path: Option<String>,
}

/// Renders one entry through `picture`, returning the composed line.
#[must_use]
pub fn render_entry(picture: &Picture, entry: &Entry, ctx: &RenderContext) -> String {
    let mut out = String::new();
    for (idx, segment) in picture.segments.iter().enumerate() {
        match segment {
            Segment::Literal(text) => {
                let is_trailing = idx == picture.segments.len() - 1;
                if is_trailing {
                    out.push_str(text.trim_end_matches(' '));
                } else {
                    out.push_str(text);
                }
            }
            Segment::Field(field_idx) => {
                let field = &picture.fields[*field_idx];
                if !field.is_active() {
                    continue;
                }
                let is_last_field = is_last_field_segment(picture, idx);
                out.push_str(&render_field(field, entry, ctx, is_last_field));
            }
        }
    }
    out
}

fn is_last_field_segment(picture: &Picture, idx: usize) -> bool {
    !picture.segments[idx + 1..]
        .iter()
        .any(|s| matches!(s, Segment::Field(_)))
}

fn render_field(field: &Field, entry: &Entry, ctx: &RenderContext, is_last_field: bool) -> String {
    match field.kind {
        FieldKind::Filename => render_filename(field, entry, ctx, is_last_field),
        FieldKind::Short => pad(entry.short_name.as_deref().unwrap_or(""), field.width),
        FieldKind::Size => render_size(field, entry),
        FieldKind::Time => render_time(field, entry),
        FieldKind::Compression => render_compression(field, entry),
        FieldKind::Attributes => render_attributes(field, entry),
        FieldKind::Owner => pad(entry.owner.as_deref().unwrap_or(""), field.width),
        FieldKind::GitFile => render_git_file(ctx),
        FieldKind::GitRepo => render_git_repo(field, ctx),
    }
}

fn pad(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    let w = display_width(text);
    if w >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - w))
    }
}

fn wrap_color(text: &str, color: Option<&str>) -> String {
    match color {
        Some(c) if !c.is_empty() => format!("\u{1B}[{c}m{text}\u{1B}[0m"),
        _ => text.to_string(),
    }
}

fn classify_suffix(entry: &Entry) -> &'static str {
    if entry.is_directory() {
        "\\"
    } else if entry.is_reparse_point() {
        "@"
    } else {
        ""
    }
}

fn render_filename(field: &Field, entry: &Entry, ctx: &RenderContext, is_last_field: bool) -> String {
    if is_last_field {
        if let Some(full_path) = &ctx.full_path {
            let text = apply_case(full_path, ctx.lowercase);
            return wrap_color(&text, ctx.filename_color.as_deref());
        }
    }

    let name = filename_cell_text(entry, ctx.lowercase);

    match field.name_style {
        NameStyle::Fat => fat_justify(&name),
        // A declared width always pads out fully, even as the final field:
        // only *auto*-width filenames trim their trailing pad at end of
        // line (spec.md §8 scenario 2 vs. §4.4 "Literal padding").
        _ if field.width > 0 => {
            let truncated = truncate_to_width(&name, field.width, ctx.truncate_glyph);
            let width = display_width(&truncated);
            wrap_color(
                &format!("{truncated}{}", " ".repeat(field.width.saturating_sub(width))),
                ctx.filename_color.as_deref(),
            )
        }
        _ => wrap_color(&name, ctx.filename_color.as_deref()),
    }
}

fn apply_case(s: &str, lowercase: bool) -> String {
    if lowercase {
        s.to_lowercase()
    } else {
        s.to_string()
    }
}

/// The unpadded, untruncated filename cell text (name plus `\`/`@` suffix),
/// shared between [`render_filename`] and the auto-width negotiation in
/// [`negotiate_widths`].
fn filename_cell_text(entry: &Entry, lowercase: bool) -> String {
    let mut name = apply_case(&entry.long_name, lowercase);
    name.push_str(classify_suffix(entry));
    name
}

/// FAT-style justification: basename padded to 8, extension padded to 3,
/// joined by a literal `.` (spec.md §4.4 "FAT justification").
fn fat_justify(name: &str) -> String {
    let (base, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    format!("{:<8}.{:<3}", truncate_chars(base, 8), truncate_chars(ext, 3))
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

const SIZE_TAG_DIR: &str = "<DIR>";
const SIZE_TAG_JUNCTION: &str = "<JUNCTION>";
const SIZE_TAG_SYMLINK: &str = "<SYMLINK>";
const SIZE_TAG_SYMLINKD: &str = "<SYMLINKD>";

fn render_size(field: &Field, entry: &Entry) -> String {
    let text = size_text(field, entry);
    let width = if field.width > 0 {
        field.width
    } else if entry.is_directory() || entry.is_reparse_point() {
        field_display_width(field, SizeStyle::Short)
    } else {
        style_default_width(field.size_style)
    };
    pad(&text, width)
}

/// The unpadded size cell text: a directory/reparse tag, or the formatted
/// byte count (spec.md §4.4 "Size field"). Shared between [`render_size`]
/// and the directory-wide width negotiation in [`negotiate_widths`].
fn size_text(field: &Field, entry: &Entry) -> String {
    if entry.is_directory() {
        return if entry.is_reparse_point() {
            SIZE_TAG_JUNCTION.to_string()
        } else {
            SIZE_TAG_DIR.to_string()
        };
    }
    if entry.is_reparse_point() {
        let tag = if entry.is_directory() {
            SIZE_TAG_SYMLINKD
        } else {
            SIZE_TAG_SYMLINK
        };
        return tag.to_string();
    }

    let bytes = entry.size(field.size_which);
    match field.size_style {
        SizeStyle::Mini => format_size_mini(bytes),
        SizeStyle::Short => format_size_short(bytes),
        SizeStyle::Normal => format_size_normal(bytes),
    }
}

const fn style_default_width(style: SizeStyle) -> usize {
    match style {
        SizeStyle::Mini => 4,
        SizeStyle::Short => 9,
        SizeStyle::Normal => 16,
    }
}

fn field_display_width(field: &Field, fallback: SizeStyle) -> usize {
    if field.width > 0 {
        field.width
    } else {
        style_default_width(fallback)
    }
}

const SIZE_UNITS: &[char] = &['B', 'K', 'M', 'G', 'T', 'P'];

/// Mini style: 4 cells, e.g. `9.9M` (spec.md §4.4).
fn format_size_mini(bytes: u64) -> String {
    let (value, unit) = scale_size(bytes);
    if unit == 'B' {
        return format!("{bytes}B");
    }
    if value >= 9.95 {
        format!("{:.0}{unit}", value.min(9.0))
    } else {
        format!("{value:.1}{unit}")
    }
}

fn format_size_short(bytes: u64) -> String {
    let (value, unit) = scale_size(bytes);
    if unit == 'B' {
        return format!("{bytes} B");
    }
    format!("{value:.1} {unit}")
}

fn format_size_normal(bytes: u64) -> String {
    let s = bytes.to_string();
    let mut out = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

/// Scales `bytes` to the largest unit where the value is `< 1024`; a size
/// of exactly `1024^n` switches to the next unit (spec.md §8 boundary
/// behavior).
fn scale_size(bytes: u64) -> (f64, char) {
    let mut value = bytes as f64;
    let mut unit_idx = 0;
    while value >= 1024.0 && unit_idx < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit_idx += 1;
    }
    (value, SIZE_UNITS[unit_idx])
}

fn render_time(field: &Field, entry: &Entry) -> String {
    let width = if field.width > 0 {
        field.width
    } else {
        time_style_width(field.time_style)
    };
    pad(&time_text(field, entry), width)
}

/// The unpadded time cell text, shared between [`render_time`] and the
/// relative-time width negotiation in [`negotiate_widths`].
fn time_text(field: &Field, entry: &Entry) -> String {
    let Some(time) = entry.time(field.time_which) else {
        return String::new();
    };
    match field.time_style {
        TimeStyle::Relative => format_relative_time(time),
        _ => format_absolute_time(time, field.time_style),
    }
}

const fn time_style_width(style: TimeStyle) -> usize {
    match style {
        TimeStyle::Mini => 11,
        TimeStyle::Short | TimeStyle::Compact => 12,
        TimeStyle::Iso => 10,
        TimeStyle::LongIso => 16,
        TimeStyle::Long | TimeStyle::Extended => 24,
        TimeStyle::Relative => 6,
        TimeStyle::Locale | TimeStyle::Normal => 17,
    }
}

fn format_absolute_time(time: std::time::SystemTime, style: TimeStyle) -> String {
    let secs = time
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    let (y, mo, d, h, mi, s) = civil_from_unix(secs);
    match style {
        TimeStyle::Iso => format!("{y:04}-{mo:02}-{d:02}"),
        TimeStyle::LongIso => format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}"),
        TimeStyle::Long | TimeStyle::Extended => {
            format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}.000")
        }
        _ => format!("{mo:02}/{d:02} {h:02}:{mi:02}"),
    }
}

/// Renders `now` for sub-second deltas, otherwise the largest whole unit
/// among `{s, m, hr, dy, wk, mo, yr, C}` (spec.md §4.4 / §8).
fn format_relative_time(time: std::time::SystemTime) -> String {
    let Ok(elapsed) = std::time::SystemTime::now().duration_since(time) else {
        return "now".to_string();
    };
    let secs = elapsed.as_secs();
    if secs < 1 {
        return "now".to_string();
    }
    const UNITS: &[(u64, &str)] = &[
        (60, "s"),
        (60, "m"),
        (24, "hr"),
        (7, "dy"),
        (4, "wk"),
        (12, "mo"),
        (100, "yr"),
    ];
    let mut remaining = secs;
    let mut label = "s";
    let mut value = remaining;
    for &(divisor, unit) in UNITS {
        if remaining < divisor {
            label = unit;
            value = remaining;
            break;
        }
        remaining /= divisor;
        label = unit;
        value = remaining;
    }
    if value >= 100 {
        format!("{value}C")
    } else {
        format!("{value} {label}")
    }
}

/// Civil calendar conversion (Howard Hinnant's days-from-civil algorithm),
/// avoiding a chrono dependency for a handful of date fields.
#[allow(clippy::many_single_char_names)]
fn civil_from_unix(unix_secs: i64) -> (i64, u32, u32, u32, u32, u32) {
    let days = unix_secs.div_euclid(86_400);
    let time_of_day = unix_secs.rem_euclid(86_400);
    let h = (time_of_day / 3600) as u32;
    let mi = ((time_of_day % 3600) / 60) as u32;
    let s = (time_of_day % 60) as u32;

    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let y = if m <= 2 { y + 1 } else { y };

    (y, m, d, h, mi, s)
}

fn render_compression(field: &Field, entry: &Entry) -> String {
    let ratio = match field.compression_kind {
        CompressionKind::Allocation if entry.logical_size > 0 => {
            Some(entry.allocation_size as f64 / entry.logical_size as f64)
        }
        CompressionKind::Compressed => entry.compression_ratio(),
        _ => None,
    };
    let text = match ratio {
        // Rounded down, per spec.md §4.4 "Compression ratio".
        Some(r) => format!("{}%", ((1.0 - r) * 100.0).floor().clamp(0.0, 99.0) as u32),
        None => String::new(),
    };
    pad(&text, field.width.max(4))
}

fn render_attributes(field: &Field, entry: &Entry) -> String {
    let Some(mask) = field.attr_mask else {
        return String::new();
    };
    const BITS: &[(crate::model::Attributes, char)] = &[
        (crate::model::Attributes::READONLY, 'r'),
        (crate::model::Attributes::HIDDEN, 'h'),
        (crate::model::Attributes::SYSTEM, 's'),
        (crate::model::Attributes::DIRECTORY, 'd'),
        (crate::model::Attributes::ARCHIVE, 'a'),
        (crate::model::Attributes::ENCRYPTED, 'e'),
        (crate::model::Attributes::SPARSE, 'p'),
        (crate::model::Attributes::TEMPORARY, 't'),
        (crate::model::Attributes::COMPRESSED, 'c'),
        (crate::model::Attributes::OFFLINE, 'o'),
        (crate::model::Attributes::NOT_CONTENT_INDEXED, 'n'),
        (crate::model::Attributes::REPARSE_POINT, 'j'),
    ];
    let mut out = String::new();
    for &(bit, letter) in BITS {
        if mask.contains(bit) {
            out.push(if entry.attributes.contains(bit) { letter } else { '_' });
        }
    }
    out
}

fn render_git_file(ctx: &RenderContext) -> String {
    match ctx.git_file_status {
        Some((staged, working)) => format!("{staged}{working}"),
        None => "  ".to_string(),
    }
}

fn render_git_repo(field: &Field, ctx: &RenderContext) -> String {
    match &ctx.git_repo_status {
        Some((dirty, branch)) => {
            let marker = if *dirty { '+' } else { '|' };
            let width = if field.width > 0 { field.width } else { 11 };
            let branch_width = width.saturating_sub(2);
            let truncated = truncate_to_width(branch, branch_width.min(10), '\0');
            format!("{marker} {truncated}")
        }
        None => "- ".to_string(),
    }
}

/// Computes this directory's negotiated widths for the picture's auto-width
/// fields and returns an adjusted copy with those widths filled in
/// (spec.md §4.4 "Two-pass width protocol", §3 invariants): a first pass
/// over every entry accumulates the widest observed cell for each deferred
/// field, then the returned picture is used to render every entry in the
/// same directory so their auto-width columns line up.
///
/// A no-op clone when the picture has no deferred needs or the directory
/// has no entries.
#[must_use]
pub fn negotiate_widths(picture: &Picture, entries: &[Entry], lowercase: bool, branch: Option<&str>) -> Picture {
    let mut out = picture.clone();
    if !picture.deferred.any() || entries.is_empty() {
        return out;
    }

    for field in &mut out.fields {
        match field.kind {
            FieldKind::Filename if field.auto_filename_width => {
                field.width = entries
                    .iter()
                    .map(|e| display_width(&filename_cell_text(e, lowercase)))
                    .max()
                    .unwrap_or(0);
            }
            FieldKind::Size if field.width == 0 => {
                let max = entries.iter().map(|e| display_width(&size_text(field, e))).max().unwrap_or(0);
                field.width = max.max(style_default_width(field.size_style));
            }
            FieldKind::Owner if field.width == 0 => {
                field.width = entries
                    .iter()
                    .map(|e| display_width(e.owner.as_deref().unwrap_or("")))
                    .max()
                    .unwrap_or(0);
            }
            FieldKind::Time if field.width == 0 && field.time_style == TimeStyle::Relative => {
                let max = entries.iter().map(|e| display_width(&time_text(field, e))).max().unwrap_or(0);
                field.width = max.max(time_style_width(field.time_style));
            }
            FieldKind::GitRepo if field.width == 0 => {
                if let Some(name) = branch {
                    field.width = display_width(name).min(10) + 2;
                }
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
