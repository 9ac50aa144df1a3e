use super::*;

fn reporter(use_colors: bool) -> StderrReporter {
    StderrReporter { use_colors }
}

#[test]
fn plain_error_has_no_escape_codes() {
    let r = reporter(false);
    let mut buf = Vec::new();
    r.write_error(&mut buf, &DirpixError::Usage("bad flag".to_string()));
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("usage error: bad flag"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn colored_error_wraps_kind_in_sgr() {
    let r = reporter(true);
    let mut buf = Vec::new();
    r.write_error(&mut buf, &DirpixError::Usage("bad flag".to_string()));
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("\u{1b}[1;31m✖ UsageError:\u{1b}[0m"));
}

#[test]
fn plain_warning_has_no_escape_codes() {
    let r = reporter(false);
    let mut buf = Vec::new();
    r.write_warning(&mut buf, "heads up");
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text, "⚠ Warning: heads up\n");
}
