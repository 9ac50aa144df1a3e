//! Error/warning reporting to stderr (spec.md §7 "Error Handling Design"),
//! grounded on the teacher's `output/error_output.rs`: colored when stderr
//! is a terminal and `NO_COLOR` is unset, plain otherwise.

use std::io::{IsTerminal, Write};

use crate::error::DirpixError;

/// Sink for errors/warnings encountered during a scan. A trait so tests can
/// substitute a buffer instead of real stderr.
pub trait Reporter {
    fn report(&self, error: &DirpixError);
    fn warn(&self, message: &str);
}

/// Stderr reporter with auto-detected color support.
pub struct StderrReporter {
    use_colors: bool,
}

impl StderrReporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            use_colors: Self::stderr_supports_color(),
        }
    }

    fn stderr_supports_color() -> bool {
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }
        std::io::stderr().is_terminal()
    }

    fn write_error<W: Write>(&self, w: &mut W, error: &DirpixError) {
        // A closed or redirected stderr has nowhere left to report failure to.
        if self.use_colors {
            let _ = writeln!(w, "\u{1b}[1;31m✖ {}:\u{1b}[0m {error}", error.kind_name());
        } else {
            let _ = writeln!(w, "✖ {}: {error}", error.kind_name());
        }
    }

    fn write_warning<W: Write>(&self, w: &mut W, message: &str) {
        if self.use_colors {
            let _ = writeln!(w, "\u{1b}[1;33m⚠ Warning:\u{1b}[0m {message}");
        } else {
            let _ = writeln!(w, "⚠ Warning: {message}");
        }
    }
}

impl Default for StderrReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for StderrReporter {
    fn report(&self, error: &DirpixError) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(&mut stderr, error);
    }

    fn warn(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message);
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
