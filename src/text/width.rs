//! Per-codepoint and per-grapheme cell widths, and the wcwidth-aware truncator.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// The zero-width-joiner that stitches emoji scalars into one grapheme.
const ZWJ: char = '\u{200D}';
/// Emoji presentation selector: upgrades a narrow emoji-capable scalar to width 2.
const VS16_EMOJI_PRESENTATION: char = '\u{FE0F}';

/// Display width in terminal cells of a single codepoint: 0, 1, or 2.
///
/// Combining marks are 0; CJK wide and most emoji are 2; everything else
/// defaults to 1 (spec.md §4.1).
#[must_use]
pub fn char_width(ch: char) -> u8 {
    if ch == '\0' {
        return 0;
    }
    match UnicodeWidthChar::width(ch) {
        Some(w) => w as u8,
        // Control characters report `None`; they occupy no visible cell here
        // because they never reach this function un-escaped (the ecma48
        // iterator strips them out first).
        None => 0,
    }
}

/// Width of a grapheme cluster (as produced by [`CellWidthIter`]).
///
/// A ZWJ sequence collapses to the width of its first scalar; a trailing
/// emoji presentation selector (`FE0F`) upgrades that width to 2.
#[must_use]
pub fn grapheme_width(grapheme: &str) -> u8 {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if grapheme.contains(ZWJ) {
        let base = char_width(first);
        return if grapheme.contains(VS16_EMOJI_PRESENTATION) {
            base.max(2)
        } else {
            base
        };
    }

    if grapheme.contains(VS16_EMOJI_PRESENTATION) {
        return char_width(first).max(2);
    }

    // Multi-codepoint grapheme with no ZWJ/VS16 (e.g. base + combining
    // mark): width is the base scalar's width, combining marks add nothing.
    char_width(first)
}

/// Iterates a string's extended grapheme clusters alongside their display
/// width in terminal cells.
///
/// Invalid UTF-16 surrogates are not representable in a Rust `&str` (they
/// are rejected at the UTF-8 boundary already), so the "fold to replacement
/// codepoint" behavior from spec.md §4.1 is handled by whoever decodes raw
/// bytes into this iterator's input; by the time a `&str` reaches here any
/// such codepoint is already `\u{FFFD}`, whose width this iterator reports
/// as 1 like any other narrow scalar.
pub struct CellWidthIter<'a> {
    graphemes: unicode_segmentation::Graphemes<'a>,
}

impl<'a> CellWidthIter<'a> {
    #[must_use]
    pub fn new(s: &'a str) -> Self {
        Self {
            graphemes: s.graphemes(true),
        }
    }
}

impl<'a> Iterator for CellWidthIter<'a> {
    type Item = (&'a str, u8);

    fn next(&mut self) -> Option<Self::Item> {
        let g = self.graphemes.next()?;
        Some((g, grapheme_width(g)))
    }
}

/// Total display width, in cells, of `s`. Escape sequences are not stripped
/// here; callers that may encounter them should route through
/// [`crate::text::process`] first.
#[must_use]
pub fn display_width(s: &str) -> usize {
    CellWidthIter::new(s).map(|(_, w)| w as usize).sum()
}

/// Truncates `s` to at most `max_width` display cells, appending `glyph`
/// (which may be `'\0'` for "no glyph") if any content was dropped.
///
/// Width is measured in cells, not codepoints or bytes.
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize, glyph: char) -> String {
    let glyph_width = if glyph == '\0' {
        0
    } else {
        char_width(glyph) as usize
    };
    let budget = max_width.saturating_sub(glyph_width);

    let mut out = String::new();
    let mut used = 0usize;
    let mut truncated = false;

    for (grapheme, width) in CellWidthIter::new(s) {
        let width = width as usize;
        if used + width > budget {
            truncated = true;
            break;
        }
        out.push_str(grapheme);
        used += width;
    }

    if truncated && glyph != '\0' {
        out.push(glyph);
    }
    out
}

#[cfg(test)]
#[path = "width_tests.rs"]
mod tests;
