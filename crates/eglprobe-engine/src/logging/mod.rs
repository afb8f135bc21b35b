//! Logging utilities.
//!
//! Every binary in the workspace initializes the `log` facade through here so
//! filter handling stays identical across tools.

mod init;

pub use init::{init_logging, LoggingConfig};
