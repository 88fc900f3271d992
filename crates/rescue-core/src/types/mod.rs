//! Host values seen by the exception subsystem
//!
//! Constructors and `set_backtrace` accept values coming straight from the
//! interpreter; this module holds their representation.

pub mod value;

pub use value::Value;
