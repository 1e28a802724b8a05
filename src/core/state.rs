//! Process state for Ctrl+C handling.
//!
//! - `CHILD_RUNNING`: a foreground child owns the terminal (dev server)
//! - `SHUTDOWN`: Ctrl+C was received
//!
//! Ctrl+C reaches the whole foreground process group. While a child is
//! running it gets the signal too, so cavy waits for it to exit instead of
//! leaving it orphaned.

use std::sync::atomic::{AtomicBool, Ordering};

/// Exit code for termination by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

static CHILD_RUNNING: AtomicBool = AtomicBool::new(false);

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start.
///
/// - No child running: exit immediately
/// - Child running: record the request and let the child shut down
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if is_child_running() {
            crate::log!("serve"; "shutting down...");
        } else {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Check if a foreground child is running
pub fn is_child_running() -> bool {
    CHILD_RUNNING.load(Ordering::SeqCst)
}

/// Marks a foreground child as running for as long as it is alive.
#[must_use = "the child is only tracked while the guard lives"]
pub struct ChildGuard(());

impl ChildGuard {
    pub fn enter() -> Self {
        CHILD_RUNNING.store(true, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        CHILD_RUNNING.store(false, Ordering::SeqCst);
    }
}
