use super::*;

#[test]
fn attributes_combine_and_test_membership() {
    let combo = Attributes::HIDDEN | Attributes::READONLY;
    assert!(combo.contains(Attributes::HIDDEN));
    assert!(combo.contains(Attributes::READONLY));
    assert!(!combo.contains(Attributes::DIRECTORY));
    assert!(combo.intersects(Attributes::DIRECTORY | Attributes::HIDDEN));
}

#[test]
fn entry_size_selects_requested_variant() {
    let mut entry = Entry::new("a.txt".into(), Attributes::NONE);
    entry.logical_size = 10;
    entry.allocation_size = 4096;
    entry.compressed_size = 5;
    assert_eq!(entry.size(WhichSize::Logical), 10);
    assert_eq!(entry.size(WhichSize::Allocation), 4096);
    assert_eq!(entry.size(WhichSize::Compressed), 5);
}

#[test]
fn entry_is_directory_reads_attribute_bit() {
    let dir = Entry::new("sub".into(), Attributes::DIRECTORY);
    let file = Entry::new("a.txt".into(), Attributes::NONE);
    assert!(dir.is_directory());
    assert!(!file.is_directory());
}

#[test]
fn compression_ratio_is_none_when_uncompressed() {
    let mut entry = Entry::new("a.txt".into(), Attributes::NONE);
    entry.logical_size = 100;
    entry.compressed_size = 0;
    assert_eq!(entry.compression_ratio(), None);

    entry.compressed_size = 40;
    assert_eq!(entry.compression_ratio(), Some(0.4));
}

#[test]
fn streams_are_absent_until_populated() {
    let mut entry = Entry::new("a.txt".into(), Attributes::NONE);
    assert!(entry.streams().is_none());
    entry.set_streams(vec![Stream {
        name: ":meta".into(),
        logical_size: 12,
    }]);
    assert_eq!(entry.streams().unwrap().len(), 1);
}

#[test]
fn pattern_new_has_no_siblings() {
    let pattern = Pattern::new(PathBuf::from("/tmp"));
    assert!(pattern.siblings.is_empty());
    assert!(!pattern.implicit_wildcard);
}
