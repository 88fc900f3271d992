//! The exception taxonomy
//!
//! [`Class`] names every exception class and fixes its parent, forming a
//! single-inheritance tree rooted at `Exception`. [`Kind`] is the record an
//! exception carries: one variant per class, holding the fields that class
//! adds on top of message, backtrace and cause.

pub mod kind;

pub use kind::{Arity, BytecodeSite, Kind, NameInfo, Signal, SourcePosition};

use crate::errno::Errno;
use serde::{Serialize, Serializer};
use std::fmt;

/// Exception class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Exception,
    PrimitiveFailure,
    ScriptError,
    StandardError,
    SignalException,
    NoMemoryError,
    ZeroDivisionError,
    ArgumentError,
    UncaughtThrowError,
    IndexError,
    StopIteration,
    KeyError,
    RangeError,
    FloatDomainError,
    LocalJumpError,
    NameError,
    NoMethodError,
    RuntimeError,
    SecurityError,
    ThreadError,
    FiberError,
    TypeError,
    RegexpError,
    LoadError,
    InvalidExtensionError,
    MriExtensionError,
    NotImplementedError,
    Interrupt,
    IoError,
    EofError,
    SyntaxError,
    SystemExit,
    SystemCallError,
    Errno(Errno),
    VmException,
    AssertionError,
    ObjectBoundsExceededError,
    InvalidBytecode,
    InterpreterError,
    DeadlockError,
    FatalError,
}

impl Class {
    /// Every class except the errno classes
    pub const BUILTIN: &'static [Class] = &[
        Class::Exception,
        Class::PrimitiveFailure,
        Class::ScriptError,
        Class::StandardError,
        Class::SignalException,
        Class::NoMemoryError,
        Class::ZeroDivisionError,
        Class::ArgumentError,
        Class::UncaughtThrowError,
        Class::IndexError,
        Class::StopIteration,
        Class::KeyError,
        Class::RangeError,
        Class::FloatDomainError,
        Class::LocalJumpError,
        Class::NameError,
        Class::NoMethodError,
        Class::RuntimeError,
        Class::SecurityError,
        Class::ThreadError,
        Class::FiberError,
        Class::TypeError,
        Class::RegexpError,
        Class::LoadError,
        Class::InvalidExtensionError,
        Class::MriExtensionError,
        Class::NotImplementedError,
        Class::Interrupt,
        Class::IoError,
        Class::EofError,
        Class::SyntaxError,
        Class::SystemExit,
        Class::SystemCallError,
        Class::VmException,
        Class::AssertionError,
        Class::ObjectBoundsExceededError,
        Class::InvalidBytecode,
        Class::InterpreterError,
        Class::DeadlockError,
        Class::FatalError,
    ];

    /// Builtin classes followed by every errno class
    pub fn all() -> impl Iterator<Item = Class> {
        Self::BUILTIN
            .iter()
            .copied()
            .chain(Errno::ALL.iter().map(|e| Class::Errno(*e)))
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Class::Exception => "Exception",
            Class::PrimitiveFailure => "PrimitiveFailure",
            Class::ScriptError => "ScriptError",
            Class::StandardError => "StandardError",
            Class::SignalException => "SignalException",
            Class::NoMemoryError => "NoMemoryError",
            Class::ZeroDivisionError => "ZeroDivisionError",
            Class::ArgumentError => "ArgumentError",
            Class::UncaughtThrowError => "UncaughtThrowError",
            Class::IndexError => "IndexError",
            Class::StopIteration => "StopIteration",
            Class::KeyError => "KeyError",
            Class::RangeError => "RangeError",
            Class::FloatDomainError => "FloatDomainError",
            Class::LocalJumpError => "LocalJumpError",
            Class::NameError => "NameError",
            Class::NoMethodError => "NoMethodError",
            Class::RuntimeError => "RuntimeError",
            Class::SecurityError => "SecurityError",
            Class::ThreadError => "ThreadError",
            Class::FiberError => "FiberError",
            Class::TypeError => "TypeError",
            Class::RegexpError => "RegexpError",
            Class::LoadError => "LoadError",
            Class::InvalidExtensionError => "LoadError::InvalidExtensionError",
            Class::MriExtensionError => "LoadError::MRIExtensionError",
            Class::NotImplementedError => "NotImplementedError",
            Class::Interrupt => "Interrupt",
            Class::IoError => "IOError",
            Class::EofError => "EOFError",
            Class::SyntaxError => "SyntaxError",
            Class::SystemExit => "SystemExit",
            Class::SystemCallError => "SystemCallError",
            Class::Errno(errno) => errno.class_name(),
            Class::VmException => "VMException",
            Class::AssertionError => "AssertionError",
            Class::ObjectBoundsExceededError => "ObjectBoundsExceededError",
            Class::InvalidBytecode => "InvalidBytecode",
            Class::InterpreterError => "InterpreterError",
            Class::DeadlockError => "DeadlockError",
            Class::FatalError => "FatalError",
        }
    }

    /// Direct superclass; `None` only for `Exception`
    pub fn parent(self) -> Option<Class> {
        let parent = match self {
            Class::Exception => return None,

            Class::PrimitiveFailure
            | Class::ScriptError
            | Class::StandardError
            | Class::SignalException
            | Class::NoMemoryError
            | Class::SystemExit
            | Class::VmException
            | Class::InterpreterError
            | Class::DeadlockError
            | Class::FatalError => Class::Exception,

            Class::ZeroDivisionError
            | Class::ArgumentError
            | Class::IndexError
            | Class::RangeError
            | Class::LocalJumpError
            | Class::NameError
            | Class::RuntimeError
            | Class::SecurityError
            | Class::ThreadError
            | Class::FiberError
            | Class::TypeError
            | Class::RegexpError
            | Class::IoError
            | Class::SystemCallError => Class::StandardError,

            Class::UncaughtThrowError => Class::ArgumentError,
            Class::StopIteration | Class::KeyError => Class::IndexError,
            Class::FloatDomainError => Class::RangeError,
            Class::NoMethodError => Class::NameError,
            Class::EofError => Class::IoError,
            Class::Errno(_) => Class::SystemCallError,

            Class::SyntaxError | Class::LoadError | Class::NotImplementedError => {
                Class::ScriptError
            }
            Class::InvalidExtensionError => Class::LoadError,
            Class::MriExtensionError => Class::InvalidExtensionError,

            Class::Interrupt => Class::SignalException,

            Class::AssertionError | Class::ObjectBoundsExceededError | Class::InvalidBytecode => {
                Class::VmException
            }
        };
        Some(parent)
    }

    /// This class followed by each superclass up to `Exception`
    pub fn ancestors(self) -> impl Iterator<Item = Class> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// Whether `self` is `other` or inherits from it
    pub fn is_a(self, other: Class) -> bool {
        self.ancestors().any(|class| class == other)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Class {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_reaches_exception() {
        for class in Class::all() {
            assert_eq!(class.ancestors().last(), Some(Class::Exception), "{}", class);
            assert!(class.is_a(Class::Exception));
        }
    }

    #[test]
    fn test_parent_links() {
        assert_eq!(Class::NoMethodError.parent(), Some(Class::NameError));
        assert_eq!(Class::KeyError.parent(), Some(Class::IndexError));
        assert_eq!(Class::StopIteration.parent(), Some(Class::IndexError));
        assert_eq!(Class::Interrupt.parent(), Some(Class::SignalException));
        assert_eq!(Class::SyntaxError.parent(), Some(Class::ScriptError));
        assert_eq!(Class::SystemExit.parent(), Some(Class::Exception));
        assert_eq!(Class::Errno(Errno::ENOENT).parent(), Some(Class::SystemCallError));
        assert_eq!(Class::Exception.parent(), None);
    }

    #[test]
    fn test_is_a() {
        assert!(Class::MriExtensionError.is_a(Class::LoadError));
        assert!(Class::MriExtensionError.is_a(Class::ScriptError));
        assert!(Class::Errno(Errno::EPIPE).is_a(Class::StandardError));
        assert!(!Class::SignalException.is_a(Class::StandardError));
        assert!(!Class::StandardError.is_a(Class::NameError));
    }

    #[test]
    fn test_names() {
        assert_eq!(Class::IoError.to_string(), "IOError");
        assert_eq!(Class::MriExtensionError.name(), "LoadError::MRIExtensionError");
        assert_eq!(Class::Errno(Errno::EEXIST).name(), "Errno::EEXIST");
    }

    #[test]
    fn test_taxonomy_size() {
        assert_eq!(Class::BUILTIN.len(), 40);
        assert_eq!(Class::all().count(), 40 + Errno::ALL.len());
    }
}
