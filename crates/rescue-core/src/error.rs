//! Error types for Rescue Core
//!
//! These are the failures the exception subsystem raises about its own
//! inputs. They convert into regular [`Exception`](crate::Exception) values
//! (`TypeError` / `ArgumentError`) so a runtime can raise them like any other.

use crate::taxonomy::Class;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A value of the wrong type was supplied
    #[error("{0}")]
    TypeMismatch(String),

    /// Malformed constructor arguments
    #[error("{0}")]
    Argument(String),
}

impl CoreError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        CoreError::TypeMismatch(message.into())
    }

    pub fn argument(message: impl Into<String>) -> Self {
        CoreError::Argument(message.into())
    }

    /// Argument count outside the accepted range, e.g. `"1..3"`
    pub fn wrong_arity(given: usize, accepted: &str) -> Self {
        CoreError::Argument(format!(
            "wrong number of arguments ({} for {})",
            given, accepted
        ))
    }

    /// The taxonomy class this failure is raised as
    pub fn class(&self) -> Class {
        match self {
            CoreError::TypeMismatch(_) => Class::TypeError,
            CoreError::Argument(_) => Class::ArgumentError,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
