//! Category index, content-flag extension tables, and the lookup cascade
//! (spec.md §4.2 "Lookup cascade"), grounded on `original_source/colors.cpp`'s
//! extension-table + category-priority walk.

use crate::model::{Attributes, Entry};

use super::rules::Rule;

/// Content-flag bit-set derived from extension/filename tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentFlags(u16);

impl ContentFlags {
    pub const NONE: Self = Self(0);
    pub const DOCUMENT: Self = Self(1 << 0);
    pub const IMAGE: Self = Self(1 << 1);
    pub const VIDEO: Self = Self(1 << 2);
    pub const MUSIC: Self = Self(1 << 3);
    pub const LOSSLESS: Self = Self(1 << 4);
    pub const COMPRESSED: Self = Self(1 << 5);
    pub const CRYPTO: Self = Self(1 << 6);
    pub const BUILD: Self = Self(1 << 7);
    pub const SOURCE: Self = Self(1 << 8);
    pub const TEMP: Self = Self(1 << 9);
    pub const EXECUTABLE: Self = Self(1 << 10);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ContentFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Attribute-derived lookup category (spec.md §4.2 step 1), in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIndex {
    OrphanedReparse,
    Directory,
    Reparse,
    Readonly,
    Hidden,
    CompressedAttribute,
    TemporaryAttribute,
    RegularFile,
}

impl CategoryIndex {
    /// Key this category falls back to in the user rule table / fixed
    /// fallback table (spec.md §4.2 step 4).
    #[must_use]
    pub const fn fallback_key(self) -> &'static str {
        match self {
            Self::OrphanedReparse => "or",
            Self::Directory => "di",
            Self::Reparse => "ln",
            Self::Readonly => "ro",
            Self::Hidden => "hi",
            Self::CompressedAttribute => "ca",
            Self::TemporaryAttribute => "ta",
            Self::RegularFile => "fi",
        }
    }

    #[must_use]
    pub fn classify(attrs: Attributes, reparse_target_missing: bool) -> Self {
        if attrs.contains(Attributes::REPARSE_POINT) && reparse_target_missing {
            return Self::OrphanedReparse;
        }
        if attrs.contains(Attributes::DIRECTORY) {
            return Self::Directory;
        }
        if attrs.contains(Attributes::REPARSE_POINT) {
            return Self::Reparse;
        }
        if attrs.contains(Attributes::READONLY) {
            return Self::Readonly;
        }
        if attrs.contains(Attributes::HIDDEN) {
            return Self::Hidden;
        }
        if attrs.contains(Attributes::COMPRESSED) {
            return Self::CompressedAttribute;
        }
        if attrs.contains(Attributes::TEMPORARY) {
            return Self::TemporaryAttribute;
        }
        Self::RegularFile
    }
}

const DOCUMENT_EXT: &[&str] = &["pdf", "doc", "docx", "odt", "md", "txt", "rtf"];
const IMAGE_EXT: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "ico", "tiff"];
const VIDEO_EXT: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "flv", "wmv"];
const MUSIC_LOSSY_EXT: &[&str] = &["mp3", "aac", "ogg", "wma", "opus"];
const MUSIC_LOSSLESS_EXT: &[&str] = &["flac", "wav", "alac", "ape"];
const COMPRESSED_EXT: &[&str] = &["zip", "tar", "gz", "bz2", "xz", "7z", "rar", "zst"];
const CRYPTO_EXT: &[&str] = &["pem", "key", "crt", "gpg", "asc", "pgp"];
const BUILD_EXT: &[&str] = &["o", "obj", "lock", "class", "pyc"];
const SOURCE_EXT: &[&str] = &[
    "rs", "c", "h", "cpp", "hpp", "py", "js", "ts", "go", "java", "rb",
];
const TEMP_EXT: &[&str] = &["tmp", "bak", "swp", "swo", "~"];

/// Content flags for an extension, case-insensitively (spec.md §4.2 step 2).
/// `.wav` deliberately carries both `music` and `lossless`, matching the
/// spec's explicit example of an extension with multiple flags.
#[must_use]
pub fn flags_for_extension(ext: &str) -> ContentFlags {
    let ext = ext.to_ascii_lowercase();
    let mut flags = ContentFlags::NONE;
    if DOCUMENT_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::DOCUMENT;
    }
    if IMAGE_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::IMAGE;
    }
    if VIDEO_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::VIDEO;
    }
    if MUSIC_LOSSY_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::MUSIC;
    }
    if MUSIC_LOSSLESS_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::MUSIC | ContentFlags::LOSSLESS;
    }
    if COMPRESSED_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::COMPRESSED;
    }
    if CRYPTO_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::CRYPTO;
    }
    if BUILD_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::BUILD;
    }
    if SOURCE_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::SOURCE;
    }
    if TEMP_EXT.contains(&ext.as_str()) {
        flags |= ContentFlags::TEMP;
    }
    flags
}

/// Folds `PATHEXT`-listed extensions into the executable flag at startup
/// (spec.md §4.2 "The `ex` category auto-imports `PATHEXT`").
#[must_use]
pub fn executable_extensions_from_pathext(pathext: &str) -> Vec<String> {
    pathext
        .split(';')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_start_matches('.').to_ascii_lowercase())
        .collect()
}

/// Runs the full lookup cascade for `entry`, returning the resolved SGR
/// string if any rule or fallback applies.
#[must_use]
pub fn lookup_color(
    entry: &Entry,
    rules: &[Rule],
    executable_exts: &[String],
    reparse_target_missing: bool,
) -> Option<String> {
    let category = CategoryIndex::classify(entry.attributes, reparse_target_missing);

    let ext = std::path::Path::new(&entry.long_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let mut flags = flags_for_extension(ext);
    if executable_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        flags |= ContentFlags::EXECUTABLE;
    }

    for rule in rules {
        if rule.matches(entry.attributes, flags, &entry.long_name) {
            return Some(rule.sgr.clone());
        }
    }

    // Fall back to the category's own color if a rule exists keyed by its
    // two-letter fallback key (e.g. a bare `di=...` rule), else the fixed
    // fallback table (spec.md §4.2 step 4).
    let key = category.fallback_key();
    for rule in rules {
        if rule.globs.is_empty()
            && rule.required_flags == ContentFlags::NONE
            && key_matches_attrs(key, rule.required_attrs)
        {
            return Some(rule.sgr.clone());
        }
    }

    match category {
        CategoryIndex::CompressedAttribute => find_fallback(rules, "co"),
        CategoryIndex::Hidden => find_fallback(rules, "hi"),
        _ => None,
    }
}

fn key_matches_attrs(key: &str, required: Attributes) -> bool {
    matches!(
        (key, required),
        ("di", a) if a == Attributes::DIRECTORY
    ) || matches!((key, required), ("ro", a) if a == Attributes::READONLY)
        || matches!((key, required), ("hi", a) if a == Attributes::HIDDEN)
        || matches!((key, required), ("ln", a) if a == Attributes::REPARSE_POINT)
}

fn find_fallback(rules: &[Rule], key: &str) -> Option<String> {
    rules
        .iter()
        .find(|r| r.globs.is_empty() && key_matches_attrs(key, r.required_attrs))
        .map(|r| r.sgr.clone())
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
