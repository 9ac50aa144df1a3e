use super::*;

#[test]
fn arg_message_substitutes_positional_placeholders() {
    let msg = ArgMessage::new("cannot find %1 because %2");
    assert_eq!(
        msg.substitute(&["foo.txt", "it does not exist"]),
        "cannot find foo.txt because it does not exist"
    );
}

#[test]
fn arg_message_chain_trims_trailing_whitespace() {
    let msg = ArgMessage::new("base   ").chain("continuation   ");
    assert_eq!(msg.to_string(), "base    continuation");
}

#[test]
fn io_error_with_path_formats_context() {
    let err = DirpixError::io_with_context(
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        PathBuf::from("/root/secret"),
        "reading directory",
    );
    let rendered = err.to_string();
    assert!(rendered.contains("reading directory"));
    assert!(rendered.contains("/root/secret"));
}

#[test]
fn file_not_found_and_access_denied_are_recoverable_during_recursion() {
    let fnf = DirpixError::FileNotFound {
        path: PathBuf::from("x"),
    };
    let denied = DirpixError::AccessDenied {
        path: PathBuf::from("x"),
    };
    let bad = DirpixError::BadPicture("oops".into());
    assert!(fnf.is_recoverable_during_recursion());
    assert!(denied.is_recoverable_during_recursion());
    assert!(!bad.is_recoverable_during_recursion());
}

#[test]
fn kind_name_matches_taxonomy() {
    assert_eq!(DirpixError::Usage("x".into()).kind_name(), "UsageError");
    assert_eq!(
        DirpixError::GitUnavailable("x".into()).kind_name(),
        "GitUnavailable"
    );
}
