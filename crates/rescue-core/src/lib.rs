//! Rescue Core - Exception objects for a language runtime
//!
//! This crate provides the error-reporting model shared by the runtime:
//! - Exception objects with lazy backtraces and cause chains
//! - The static exception taxonomy (classes and per-kind records)
//! - The errno registry that turns system error codes into classes
//! - Host-facing interfaces for frame capture and signal lookup

pub mod backtrace;
pub mod capture;
pub mod errno;
pub mod error;
pub mod exception;
pub mod signal;
pub mod taxonomy;
pub mod types;

// Re-export commonly used types
pub use backtrace::{Backtrace, BacktraceInput, FrameDescriptor};
pub use capture::{FrameCapture, RawFrame, RecordedStack};
pub use errno::{Errno, ErrnoRegistry};
pub use error::CoreError;
pub use exception::{Exception, Reraise, SystemCallError, EXIT_FAILURE, EXIT_SUCCESS};
pub use signal::{SignalSpec, SignalTable};
pub use taxonomy::{Class, Kind};
pub use types::Value;
