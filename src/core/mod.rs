//! Process-wide state of the command-line front end.

mod state;

pub use state::{setup_shutdown_handler, shutdown_signal};
