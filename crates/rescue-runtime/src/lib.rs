//! Rescue Runtime - Host side of the exception model
//!
//! This crate connects `rescue-core` to a running process: it walks the
//! native stack, resolves POSIX signals, links causes at raise time and
//! reports errors that reach the top level.

pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod raise;
pub mod reporter;
pub mod signals;

// Re-export main types
pub use capture::HostFrameCapture;
pub use config::ReporterConfig;
pub use error::{Result, RuntimeError};
pub use logging::init_tracing;
pub use raise::Raiser;
pub use reporter::Reporter;
pub use signals::PosixSignals;
