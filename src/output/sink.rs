//! The "console mutex" (spec.md §5 "Concurrency & Resource Model"): a single
//! guarded stdout writer so that, if a future revision of the driver ever
//! renders columns from more than one worker, no two entries interleave
//! mid-line. Single-threaded today, but the mutex costs nothing and keeps
//! the write path the one place that touches stdout.

use std::io::{self, Write};
use std::sync::Mutex;

pub struct OutputSink {
    stdout: Mutex<io::Stdout>,
}

impl OutputSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(io::stdout()),
        }
    }

    /// Writes one rendered line, appending a newline. Write failures (a
    /// closed pipe, `stdout` redirected to a full disk) are swallowed: a
    /// directory listing has nothing useful left to do once its own output
    /// can't be delivered.
    pub fn write_line(&self, line: &str) {
        if let Ok(mut out) = self.stdout.lock() {
            let _ = writeln!(out, "{line}");
        }
    }

    /// Resets any open SGR sequence, used by the Ctrl+C handler so an
    /// interrupted color run doesn't leave the terminal colored
    /// (spec.md §5 "Break handling").
    pub fn reset_color(&self) {
        if let Ok(mut out) = self.stdout.lock() {
            let _ = write!(out, "\u{1b}[0m");
            let _ = out.flush();
        }
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new()
    }
}
