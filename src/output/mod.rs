//! Output sink and error reporting (spec.md §5 "Concurrency & Resource
//! Model", §7 "Error Handling Design").

mod reporter;
mod sink;

pub use reporter::{Reporter, StderrReporter};
pub use sink::OutputSink;

use std::sync::Arc;

/// Installs a Ctrl+C handler that resets the terminal's SGR state before the
/// process exits, so an interrupted colored listing doesn't leave stray
/// formatting behind (spec.md §5 "Break handling").
///
/// # Errors
/// Returns an error if a handler is already installed (`ctrlc` only allows
/// one per process).
pub fn install_interrupt_reset(sink: Arc<OutputSink>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        sink.reset_color();
        std::process::exit(130);
    })
}
