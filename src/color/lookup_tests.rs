use super::*;
use crate::color::rules::parse_rules;

#[test]
fn directory_with_no_rule_uses_category_fallback() {
    let rules = parse_rules("di=1;33:ln=1;34:*.zip=36:or=31").unwrap();
    let entry = Entry::new("sub".into(), Attributes::DIRECTORY);
    let color = lookup_color(&entry, &rules, &[], false);
    assert_eq!(color.as_deref(), Some("1;33"));
}

#[test]
fn regular_file_matches_glob_rule_case_insensitively() {
    let rules = parse_rules("di=1;33:ln=1;34:*.zip=36:or=31").unwrap();
    let entry = Entry::new("archive.ZIP".into(), Attributes::NONE);
    let color = lookup_color(&entry, &rules, &[], false);
    assert_eq!(color.as_deref(), Some("36"));
}

#[test]
fn flags_for_wav_carries_music_and_lossless() {
    let flags = flags_for_extension("wav");
    assert!(flags.contains(ContentFlags::MUSIC));
    assert!(flags.contains(ContentFlags::LOSSLESS));
}

#[test]
fn pathext_extensions_fold_into_executable() {
    let exts = executable_extensions_from_pathext(".COM;.EXE;.BAT");
    assert_eq!(exts, vec!["com", "exe", "bat"]);
}

#[test]
fn category_classify_prioritizes_directory_over_readonly() {
    let attrs = Attributes::DIRECTORY | Attributes::READONLY;
    assert_eq!(CategoryIndex::classify(attrs, false), CategoryIndex::Directory);
}

#[test]
fn category_classify_orphaned_reparse_takes_priority() {
    let attrs = Attributes::REPARSE_POINT;
    assert_eq!(
        CategoryIndex::classify(attrs, true),
        CategoryIndex::OrphanedReparse
    );
    assert_eq!(CategoryIndex::classify(attrs, false), CategoryIndex::Reparse);
}

#[test]
fn no_matching_rule_and_no_fallback_returns_none() {
    let entry = Entry::new("plain.txt".into(), Attributes::NONE);
    let color = lookup_color(&entry, &[], &[], false);
    assert_eq!(color, None);
}
