use super::*;

#[test]
fn bare_glob_splits_into_dir_and_sibling() {
    let patterns = resolve_patterns(&["src/*.rs".to_string()]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].directory, PathBuf::from("src"));
    assert_eq!(patterns[0].siblings, vec!["*.rs".to_string()]);
    assert!(!patterns[0].implicit_wildcard);
}

#[test]
fn directory_argument_implies_wildcard() {
    let dir = tempfile::tempdir().unwrap();
    let patterns = resolve_patterns(&[dir.path().to_string_lossy().into_owned()]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].siblings, vec!["*".to_string()]);
    assert!(patterns[0].implicit_wildcard);
}

#[test]
fn no_arguments_defaults_to_current_directory() {
    let patterns = resolve_patterns(&[]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].directory, PathBuf::from("."));
}

#[test]
fn siblings_sharing_a_directory_are_coalesced() {
    let patterns = resolve_patterns(&["src/*.rs".to_string(), "src/*.toml".to_string()]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].siblings, vec!["*.rs".to_string(), "*.toml".to_string()]);
}

#[test]
fn distinct_directories_produce_distinct_patterns() {
    let patterns = resolve_patterns(&["src/*.rs".to_string(), "tests/*.rs".to_string()]);
    assert_eq!(patterns.len(), 2);
}

#[test]
fn bare_nonexistent_non_glob_argument_resolves_to_itself_not_current_directory() {
    let patterns = resolve_patterns(&["no-such-directory-xyz".to_string()]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].directory, PathBuf::from("no-such-directory-xyz"));
}

#[test]
fn bare_nonexistent_glob_still_matches_against_current_directory() {
    let patterns = resolve_patterns(&["*.no-such-extension-xyz".to_string()]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].directory, PathBuf::from("."));
    assert_eq!(patterns[0].siblings, vec!["*.no-such-extension-xyz".to_string()]);
}
