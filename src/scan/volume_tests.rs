use super::*;

#[test]
fn first_directory_begins_a_volume() {
    let mut tracker = VolumeTracker::new();
    assert_eq!(tracker.advance(Path::new("/a/b")), VolumeTransition::Begin);
}

#[test]
fn same_root_is_unchanged() {
    let mut tracker = VolumeTracker::new();
    tracker.advance(Path::new("/a/b"));
    assert_eq!(tracker.advance(Path::new("/a/c")), VolumeTransition::Same);
}

#[test]
fn changed_root_reports_whether_previous_saw_files() {
    let mut tracker = VolumeTracker::new();
    tracker.advance(Path::new("/a"));
    tracker.record_file();
    let transition = tracker.advance(Path::new("/other"));
    assert_eq!(
        transition,
        VolumeTransition::Changed {
            footer_for_previous: true
        }
    );
}

#[test]
fn changed_root_with_no_files_skips_footer() {
    let mut tracker = VolumeTracker::new();
    tracker.advance(Path::new("/a"));
    let transition = tracker.advance(Path::new("/other"));
    assert_eq!(
        transition,
        VolumeTransition::Changed {
            footer_for_previous: false
        }
    );
}

#[test]
fn root_of_strips_everything_past_the_prefix() {
    assert_eq!(
        VolumeTracker::root_of(Path::new("/a/b/c")),
        PathBuf::from("/")
    );
}
