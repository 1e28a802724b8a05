//! Process-wide state.

mod state;

pub use state::{ChildGuard, is_shutdown, setup_shutdown_handler};
