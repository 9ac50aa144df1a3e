use std::path::PathBuf;

use thiserror::Error;

/// A chained, `%1`..`%9`-substitutable error message.
///
/// Some source messages are built up across several calls (a base message
/// plus continuation fragments); each fragment has its trailing whitespace
/// trimmed before being joined, matching the chained-message-node behavior
/// described for multi-part error reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgMessage {
    fragments: Vec<String>,
}

impl ArgMessage {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            fragments: vec![base.into()],
        }
    }

    /// Appends a continuation fragment, trimming its trailing whitespace.
    #[must_use]
    pub fn chain(mut self, fragment: impl Into<String>) -> Self {
        self.fragments.push(fragment.into().trim_end().to_string());
        self
    }

    /// Substitutes `%1`..`%9` placeholders with the given arguments, in order.
    #[must_use]
    pub fn substitute(&self, args: &[&str]) -> String {
        let mut out = self.fragments.join(" ");
        for (i, arg) in args.iter().enumerate().take(9) {
            let placeholder = format!("%{}", i + 1);
            out = out.replace(&placeholder, arg);
        }
        out
    }
}

impl std::fmt::Display for ArgMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fragments.join(" "))
    }
}

#[derive(Error, Debug)]
pub enum DirpixError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("File Not Found - {path}")]
    FileNotFound { path: PathBuf },

    #[error("Access is denied - {path}")]
    AccessDenied { path: PathBuf },

    #[error("The filename or extension is too long: {path}")]
    PathTooLong { path: PathBuf },

    #[error("malformed pattern: {0}")]
    MalformedPattern(String),

    #[error("invalid regex pattern: {pattern}")]
    BadRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid glob pattern: {pattern}: {reason}")]
    BadGlob { pattern: String, reason: String },

    #[error("invalid color rule: {0}")]
    BadColorSyntax(String),

    #[error("invalid escape code in color rule: {0}")]
    BadEscapeCode(String),

    #[error("invalid format picture: {0}")]
    BadPicture(String),

    #[error("{}", format_io_error(source, path, operation))]
    Io {
        #[source]
        source: std::io::Error,
        path: Option<PathBuf>,
        operation: Option<&'static str>,
    },

    #[error("system error ({code}): {message}")]
    SystemError { code: i32, message: String },

    #[error("git is not available: {0}")]
    GitUnavailable(String),
}

fn format_io_error(
    source: &std::io::Error,
    path: &Option<PathBuf>,
    operation: &Option<&'static str>,
) -> String {
    match (path.as_ref(), *operation) {
        (Some(p), Some(op)) => format!("IO error ({op} '{}'): {source}", p.display()),
        (Some(p), None) => format!("IO error ('{}'): {source}", p.display()),
        (None, Some(op)) => format!("IO error ({op}): {source}"),
        (None, None) => format!("IO error: {source}"),
    }
}

impl From<std::io::Error> for DirpixError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            source: e,
            path: None,
            operation: None,
        }
    }
}

impl DirpixError {
    #[must_use]
    pub const fn io_with_path(source: std::io::Error, path: PathBuf) -> Self {
        Self::Io {
            source,
            path: Some(path),
            operation: None,
        }
    }

    #[must_use]
    pub const fn io_with_context(
        source: std::io::Error,
        path: PathBuf,
        operation: &'static str,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path),
            operation: Some(operation),
        }
    }

    /// Short taxonomy identifier, used by the reporter for `--verbose` diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Usage(_) => "UsageError",
            Self::FileNotFound { .. } => "FileNotFound",
            Self::AccessDenied { .. } => "AccessDenied",
            Self::PathTooLong { .. } => "PathTooLong",
            Self::MalformedPattern(_) => "MalformedPattern",
            Self::BadRegex { .. } => "BadRegex",
            Self::BadGlob { .. } => "BadGlob",
            Self::BadColorSyntax(_) => "BadColorSyntax",
            Self::BadEscapeCode(_) => "BadEscapeCode",
            Self::BadPicture(_) => "BadPicture",
            Self::Io { .. } => "SystemError",
            Self::SystemError { .. } => "SystemError",
            Self::GitUnavailable(_) => "GitUnavailable",
        }
    }

    /// The process exit code this error should produce (spec.md §6).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::FileNotFound { .. } => 1,
            _ => 1,
        }
    }

    /// Whether this error is recoverable during recursive scanning: `ERROR_FILE_NOT_FOUND`
    /// and `ERROR_ACCESS_DENIED` are absorbed silently, everything else propagates.
    #[must_use]
    pub const fn is_recoverable_during_recursion(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::AccessDenied { .. })
    }
}

pub type Result<T> = std::result::Result<T, DirpixError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
