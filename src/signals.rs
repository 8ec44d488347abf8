//! Interrupt/signal handling
//!
//! The batch driver polls the flag between entries; a command that is
//! already running is left to finish.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::status::ExitStatus;

/// Global flag for Ctrl+C interrupt handling
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Check if the application was interrupted (Ctrl+C pressed)
#[inline]
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Set the interrupted flag (called from signal handler)
#[inline]
pub fn set_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Reset the interrupted flag
#[inline]
pub fn reset_interrupted() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Install the Ctrl+C handler.
///
/// The first interrupt only raises the flag. A second one exits immediately.
pub fn install_handler() {
    static SECOND_CTRL_C: AtomicBool = AtomicBool::new(false);

    let installed = ctrlc::set_handler(move || {
        set_interrupted();
        eprintln!("\nInterrupted, stopping after the current request");

        if SECOND_CTRL_C.swap(true, Ordering::SeqCst) {
            std::process::exit(ExitStatus::Interrupted.code());
        }
    });

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Ctrl+C handler not installed");
    }
}
