use super::*;

#[test]
fn star_matches_within_segment() {
    assert!(wildmatch("*.log", "a.log", MatchFlags::CASEFOLD));
}

#[test]
fn casefold_matches_different_case() {
    assert!(wildmatch("*.LOG", "a.log", MatchFlags::CASEFOLD));
    assert!(!wildmatch("*.LOG", "a.log", MatchFlags::NONE));
}

#[test]
fn wildstar_matches_any_depth_including_zero() {
    let flags = MatchFlags::WILDSTAR;
    assert!(wildmatch("**/secret", "secret", flags));
    assert!(wildmatch("**/secret", "etc/x/secret", flags));
    assert!(wildmatch("**/secret", "a/secret", flags));
}

#[test]
fn pathname_flag_prevents_star_crossing_separator() {
    assert!(!wildmatch("/top", "a/top", MatchFlags::PATHNAME));
}

#[test]
fn single_star_does_not_cross_separator_under_pathname() {
    let flags = MatchFlags::PATHNAME;
    assert!(!wildmatch("a*c", "a/b/c", flags));
    assert!(wildmatch("a*c", "abc", flags));
}

#[test]
fn question_mark_matches_single_char() {
    assert!(wildmatch("a?c", "abc", MatchFlags::NONE));
    assert!(!wildmatch("a?c", "ac", MatchFlags::NONE));
}

#[test]
fn character_class_matches_range() {
    assert!(wildmatch("[a-c].txt", "b.txt", MatchFlags::NONE));
    assert!(!wildmatch("[a-c].txt", "d.txt", MatchFlags::NONE));
}

#[test]
fn negated_character_class() {
    assert!(wildmatch("[!a-c].txt", "d.txt", MatchFlags::NONE));
    assert!(!wildmatch("[!a-c].txt", "b.txt", MatchFlags::NONE));
}

#[test]
fn posix_class_digit() {
    assert!(wildmatch("[[:digit:]].txt", "5.txt", MatchFlags::NONE));
    assert!(!wildmatch("[[:digit:]].txt", "a.txt", MatchFlags::NONE));
}

#[test]
fn period_flag_requires_explicit_leading_dot() {
    let flags = MatchFlags::PERIOD;
    assert!(!wildmatch("*", ".hidden", flags));
    assert!(wildmatch(".*", ".hidden", flags));
    assert!(wildmatch("*", "visible", flags));
}

#[test]
fn slashfold_treats_backslash_as_separator() {
    let flags = MatchFlags::SLASHFOLD | MatchFlags::WILDSTAR;
    assert!(wildmatch("**/x", "a\\x", flags));
}

#[test]
fn leading_dir_matches_prefix_directory() {
    assert!(wildmatch("target", "target/debug", MatchFlags::LEADING_DIR));
    assert!(!wildmatch(
        "target",
        "targetfoo",
        MatchFlags::LEADING_DIR
    ));
}

#[test]
fn noescape_treats_backslash_literally() {
    assert!(wildmatch("a\\*", "a\\b", MatchFlags::NOESCAPE));
}

#[test]
fn escape_matches_literal_star() {
    assert!(wildmatch("a\\*b", "a*b", MatchFlags::NONE));
}
