use super::*;

#[test]
fn char_width_ascii_is_one() {
    assert_eq!(char_width('a'), 1);
    assert_eq!(char_width('0'), 1);
}

#[test]
fn char_width_cjk_is_two() {
    assert_eq!(char_width('日'), 2);
    assert_eq!(char_width('字'), 2);
}

#[test]
fn char_width_combining_mark_is_zero() {
    // U+0301 COMBINING ACUTE ACCENT
    assert_eq!(char_width('\u{0301}'), 0);
}

#[test]
fn grapheme_width_plain_ascii() {
    assert_eq!(grapheme_width("a"), 1);
}

#[test]
fn grapheme_width_zwj_sequence_collapses_to_first_scalar() {
    // family emoji: man + ZWJ + woman + ZWJ + girl, no VS16
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
    assert_eq!(grapheme_width(family), char_width('\u{1F468}'));
}

#[test]
fn grapheme_width_zwj_with_vs16_is_at_least_two() {
    let with_selector = "\u{1F468}\u{200D}\u{1F469}\u{FE0F}";
    assert_eq!(grapheme_width(with_selector), 2);
}

#[test]
fn grapheme_width_vs16_upgrades_narrow_base_to_two() {
    // keycap-style base scalar followed by emoji presentation selector
    let upgraded = "\u{2764}\u{FE0F}";
    assert_eq!(grapheme_width(upgraded), 2);
}

#[test]
fn cell_width_iter_yields_grapheme_and_width_pairs() {
    let collected: Vec<(&str, u8)> = CellWidthIter::new("a日b").collect();
    assert_eq!(collected, vec![("a", 1), ("日", 2), ("b", 1)]);
}

#[test]
fn display_width_sums_grapheme_widths() {
    assert_eq!(display_width("日本語"), 6);
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width(""), 0);
}

#[test]
fn truncate_to_width_leaves_short_strings_untouched() {
    assert_eq!(truncate_to_width("abc", 10, '~'), "abc");
}

#[test]
fn truncate_to_width_appends_glyph_when_content_dropped() {
    assert_eq!(truncate_to_width("abcdef", 4, '~'), "abc~");
}

#[test]
fn truncate_to_width_no_glyph_when_nul() {
    assert_eq!(truncate_to_width("abcdef", 4, '\0'), "abcd");
}

#[test]
fn truncate_to_width_respects_double_width_graphemes() {
    // budget 3: first two wide chars (width 2 each) would overflow after one
    assert_eq!(truncate_to_width("日本語", 3, '\0'), "日");
}

#[test]
fn truncate_to_width_pi_dot_txt_reserves_trailing_cells() {
    // spec.md §8: "F17" picture on `π.txt` pads to 12 cells of field width;
    // the filename itself is 5 display cells (π=1, '.'=1, t=1, x=1, t=1),
    // leaving 7 trailing pad cells once a caller pads the truncated output
    // out to the field width.
    let name = "\u{03C0}.txt";
    assert_eq!(display_width(name), 5);
    let field_width = 12usize;
    let padded = format!("{name:<width$}", width = field_width);
    assert_eq!(padded.len() - name.len(), field_width - display_width(name));
}
