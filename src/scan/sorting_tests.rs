use super::*;
use crate::model::Attributes;

fn entry(name: &str, attrs: Attributes, size: u64) -> Entry {
    let mut e = Entry::new(name.to_string(), attrs);
    e.logical_size = size;
    e
}

#[test]
fn unsorted_preserves_enumeration_order() {
    let order = SortOrder::unsorted();
    let a = entry("b.txt", Attributes::NONE, 0);
    let b = entry("a.txt", Attributes::NONE, 0);
    assert_eq!(order.compare(&a, &b), Ordering::Equal);
}

#[test]
fn directories_first_by_default() {
    let order = SortOrder::default().push(SortKey::Name, false);
    let file = entry("a.txt", Attributes::NONE, 0);
    let dir = entry("z_dir", Attributes::DIRECTORY, 0);
    assert_eq!(order.compare(&dir, &file), Ordering::Less);
}

#[test]
fn mixed_grouping_sorts_purely_by_key() {
    let order = SortOrder::default()
        .with_grouping(DirGrouping::Mixed)
        .push(SortKey::Name, false);
    let file = entry("a.txt", Attributes::NONE, 0);
    let dir = entry("z_dir", Attributes::DIRECTORY, 0);
    assert_eq!(order.compare(&file, &dir), Ordering::Less);
}

#[test]
fn name_sort_is_case_insensitive() {
    let order = SortOrder::default()
        .with_grouping(DirGrouping::Mixed)
        .push(SortKey::Name, false);
    let upper = entry("Banana.txt", Attributes::NONE, 0);
    let lower = entry("apple.txt", Attributes::NONE, 0);
    assert_eq!(order.compare(&lower, &upper), Ordering::Less);
}

#[test]
fn reverse_flag_inverts_size_comparison() {
    let order = SortOrder::default()
        .with_grouping(DirGrouping::Mixed)
        .push(SortKey::Size(WhichSize::Logical), true);
    let small = entry("a.txt", Attributes::NONE, 10);
    let big = entry("b.txt", Attributes::NONE, 100);
    assert_eq!(order.compare(&small, &big), Ordering::Greater);
}

#[test]
fn extension_sort_groups_by_suffix() {
    let order = SortOrder::default()
        .with_grouping(DirGrouping::Mixed)
        .push(SortKey::Extension, false);
    let a = entry("z.a", Attributes::NONE, 0);
    let b = entry("a.z", Attributes::NONE, 0);
    assert_eq!(order.compare(&a, &b), Ordering::Less);
}

#[test]
fn falls_back_to_name_on_tie() {
    let order = SortOrder::default()
        .with_grouping(DirGrouping::Mixed)
        .push(SortKey::Size(WhichSize::Logical), false);
    let a = entry("a.txt", Attributes::NONE, 10);
    let b = entry("b.txt", Attributes::NONE, 10);
    assert_eq!(order.compare(&a, &b), Ordering::Less);
}
