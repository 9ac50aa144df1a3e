//! Glob & regex matcher (spec.md §4.3, L3).

mod ignore;
mod wildmatch;

pub use ignore::GlobPatterns;
pub use wildmatch::{wildmatch, MatchFlags};

use crate::error::{DirpixError, Result};
use regex::Regex;

/// A compiled filename pattern: either a wildmatch glob or, when the
/// pattern is prefixed with `::`, an ECMAScript-syntax regex applied to
/// the filename component only (spec.md §4.3 "Regex").
pub enum FilenamePattern {
    Glob { pattern: String, flags: MatchFlags },
    Regex(Regex),
}

impl FilenamePattern {
    /// # Errors
    /// Returns [`DirpixError::BadRegex`] if a `::`-prefixed pattern fails to
    /// compile.
    pub fn parse(raw: &str, flags: MatchFlags) -> Result<Self> {
        if let Some(body) = raw.strip_prefix("::") {
            let regex = Regex::new(&format!("(?i){body}")).map_err(|source| {
                DirpixError::BadRegex {
                    pattern: body.to_string(),
                    source,
                }
            })?;
            return Ok(Self::Regex(regex));
        }
        Ok(Self::Glob {
            pattern: raw.to_string(),
            flags,
        })
    }

    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        match self {
            Self::Glob { pattern, flags } => wildmatch(pattern, filename, *flags),
            Self::Regex(regex) => regex.is_match(filename),
        }
    }
}
