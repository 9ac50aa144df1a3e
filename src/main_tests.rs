use dirpix::{EXIT_ERROR, EXIT_SUCCESS};

#[test]
fn exit_codes_documented() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_ERROR, 1);
}
