use super::*;
use crate::model::{Attributes, Entry};
use crate::picture::parse::{parse_picture, PictureOptions};

fn entry_with_size(name: &str, size: u64) -> Entry {
    let mut e = Entry::new(name.to_string(), Attributes::NONE);
    e.logical_size = size;
    e
}

#[test]
fn scenario_filename_and_mini_size() {
    let picture = parse_picture("F Sm", PictureOptions::default()).unwrap();
    let entry = entry_with_size("hello.txt", 1_234_567);
    let ctx = RenderContext::default();
    assert_eq!(render_entry(&picture, &entry, &ctx), "hello.txt 1.2M");
}

#[test]
fn scenario_declared_width_pads_trailing_spaces() {
    let picture = parse_picture("F17", PictureOptions::default()).unwrap();
    let entry = Entry::new("\u{03C0}.txt".to_string(), Attributes::NONE);
    let ctx = RenderContext::default();
    let rendered = render_entry(&picture, &entry, &ctx);
    assert_eq!(rendered, format!("\u{03C0}.txt{}", " ".repeat(12)));
}

#[test]
fn directory_renders_dir_tag_in_size_field() {
    let picture = parse_picture("F Ss", PictureOptions::default()).unwrap();
    let entry = Entry::new("sub".to_string(), Attributes::DIRECTORY);
    let ctx = RenderContext::default();
    let rendered = render_entry(&picture, &entry, &ctx);
    assert!(rendered.contains("<DIR>"));
}

#[test]
fn size_switches_unit_at_exact_1024_boundary() {
    assert_eq!(format_size_mini(1023), "1023B");
    assert_eq!(format_size_mini(1024), "1.0K");
    assert_eq!(format_size_mini(1024 * 1024), "1.0M");
}

#[test]
fn relative_time_under_one_second_is_now() {
    let rendered = format_relative_time(std::time::SystemTime::now());
    assert_eq!(rendered, "now");
}

#[test]
fn relative_time_45_minutes_ago() {
    let time = std::time::SystemTime::now() - std::time::Duration::from_secs(45 * 60);
    assert_eq!(format_relative_time(time), "45 m");
}

#[test]
fn relative_time_3_days_ago() {
    let time = std::time::SystemTime::now() - std::time::Duration::from_secs(3 * 86_400);
    assert_eq!(format_relative_time(time), "3 dy");
}

#[test]
fn attributes_field_renders_mask_with_underscore_for_absent() {
    let picture = parse_picture("Trh", PictureOptions::default()).unwrap();
    let entry = Entry::new("a.txt".to_string(), Attributes::READONLY);
    let ctx = RenderContext::default();
    assert_eq!(render_entry(&picture, &entry, &ctx), "r_");
}

#[test]
fn git_file_field_renders_status_pair() {
    let picture = parse_picture("G", PictureOptions::default()).unwrap();
    let entry = Entry::new("a.txt".to_string(), Attributes::NONE);
    let mut ctx = RenderContext::default();
    ctx.git_file_status = Some(('M', ' '));
    assert_eq!(render_entry(&picture, &entry, &ctx), "M ");
}

#[test]
fn git_repo_field_renders_marker_and_branch() {
    let picture = parse_picture("R", PictureOptions::default()).unwrap();
    let entry = Entry::new("a.txt".to_string(), Attributes::NONE);
    let mut ctx = RenderContext::default();
    ctx.git_repo_status = Some((true, "main".to_string()));
    assert_eq!(render_entry(&picture, &entry, &ctx), "+ main");
}

#[test]
fn filename_color_wraps_with_sgr() {
    let picture = parse_picture("F", PictureOptions::default()).unwrap();
    let entry = Entry::new("a.txt".to_string(), Attributes::NONE);
    let mut ctx = RenderContext::default();
    ctx.filename_color = Some("1;33".to_string());
    let rendered = render_entry(&picture, &entry, &ctx);
    assert_eq!(rendered, "\u{1B}[1;33ma.txt\u{1B}[0m");
}

#[test]
fn negotiate_widths_aligns_auto_filename_column_to_longest_name() {
    let picture = parse_picture("F Sm", PictureOptions::default()).unwrap();
    let entries = vec![
        entry_with_size("a.txt", 10),
        entry_with_size("much-longer-name.txt", 20),
    ];
    let negotiated = negotiate_widths(&picture, &entries, false, None);
    let ctx = RenderContext::default();

    let short = render_entry(&negotiated, &entries[0], &ctx);
    let long = render_entry(&negotiated, &entries[1], &ctx);
    assert_eq!(display_width(&short), display_width(&long));
    assert!(short.starts_with("a.txt "));
}

#[test]
fn negotiate_widths_is_a_no_op_clone_without_deferred_needs() {
    let picture = parse_picture("F12", PictureOptions::default()).unwrap();
    assert!(!picture.deferred.any());
    let entries = vec![entry_with_size("a.txt", 10)];
    let negotiated = negotiate_widths(&picture, &entries, false, None);
    assert_eq!(negotiated.fields[0].width, 12);
}

#[test]
fn negotiate_widths_clamps_branch_to_ten_cells_plus_marker() {
    let picture = parse_picture("R", PictureOptions::default()).unwrap();
    let entries = vec![entry_with_size("a.txt", 10)];
    let negotiated = negotiate_widths(&picture, &entries, false, Some("a-very-long-branch-name"));
    assert_eq!(negotiated.fields[0].width, 12);
}

#[test]
fn compression_ratio_rounds_down() {
    let mut entry = Entry::new("a.txt".to_string(), Attributes::NONE);
    entry.logical_size = 100;
    entry.compressed_size = 61;
    let picture = parse_picture("Cc", PictureOptions::default()).unwrap();
    let ctx = RenderContext::default();
    let rendered = render_entry(&picture, &entry, &ctx);
    assert_eq!(rendered.trim_end(), "39%");
}
