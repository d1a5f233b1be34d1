//! Logging utilities.
//!
//! Centralizes logger initialization. The rest of the crate only uses the
//! `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
