//! Per-class exception records

use super::Class;
use crate::errno::Errno;
use crate::types::Value;
use serde::Serialize;

/// The lookup-failure fields of `NameError` and `NoMethodError`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NameInfo {
    /// The name that failed to resolve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The object the lookup was performed on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Value>,

    /// Call arguments; only set for `NoMethodError`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,
}

/// Argument-count details of an `ArgumentError`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Arity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<usize>,

    /// Accepted count, e.g. `"2"` or `"1..3"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
}

impl Arity {
    /// Message text when both the given and expected counts are known
    pub fn describe(&self) -> Option<String> {
        let (given, expected) = (self.given?, self.expected.as_deref()?);
        Some(match &self.method_name {
            Some(method) => format!(
                "method '{}': given {}, expected {}",
                method, given, expected
            ),
            None => format!("given {}, expected {}", given, expected),
        })
    }
}

/// Signal number and display name, e.g. `(2, "SIGINT")`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signo: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signm: Option<String>,
}

/// Where a `SyntaxError` was detected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub column: Option<u32>,
    pub line: Option<u32>,
    pub file: Option<String>,
    /// The offending source text
    pub code: Option<String>,
}

/// Compiled code and instruction pointer of an `InvalidBytecode` failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BytecodeSite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiled_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<i64>,
}

impl BytecodeSite {
    fn decorate(&self, base: &str) -> String {
        match (&self.compiled_code, self.ip) {
            (Some(code), Some(ip)) if ip >= 0 => format!("{} - at {}+{}", base, code, ip),
            (Some(code), _) => format!("{} - method {}", base, code),
            (None, _) => base.to_string(),
        }
    }
}

/// Exception record, one variant per class
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Kind {
    Exception,
    PrimitiveFailure,
    ScriptError,
    StandardError,
    NoMemoryError,
    SignalException(Signal),
    Interrupt(Signal),
    ZeroDivisionError,
    ArgumentError(Arity),
    UncaughtThrowError(Arity),
    IndexError,
    KeyError,
    StopIteration {
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
    },
    RangeError,
    FloatDomainError,
    LocalJumpError,
    NameError(NameInfo),
    NoMethodError(NameInfo),
    RuntimeError,
    SecurityError,
    ThreadError,
    FiberError,
    TypeError,
    RegexpError,
    LoadError {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    InvalidExtensionError {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    #[serde(rename = "MRIExtensionError")]
    MriExtensionError {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    NotImplementedError,
    #[serde(rename = "IOError")]
    IoError,
    #[serde(rename = "EOFError")]
    EofError,
    SyntaxError(SourcePosition),
    SystemExit {
        status: i32,
    },
    SystemCallError {
        errno: Option<i32>,
    },
    Errno {
        class: Errno,
        errno: Option<i32>,
    },
    #[serde(rename = "VMException")]
    VmException,
    AssertionError,
    ObjectBoundsExceededError,
    InvalidBytecode(BytecodeSite),
    InterpreterError,
    DeadlockError,
    FatalError,
}

impl Kind {
    /// The record of `class` with every extra field unset
    ///
    /// `SystemExit` gets the success status.
    pub fn plain(class: Class) -> Kind {
        match class {
            Class::Exception => Kind::Exception,
            Class::PrimitiveFailure => Kind::PrimitiveFailure,
            Class::ScriptError => Kind::ScriptError,
            Class::StandardError => Kind::StandardError,
            Class::SignalException => Kind::SignalException(Signal::default()),
            Class::NoMemoryError => Kind::NoMemoryError,
            Class::ZeroDivisionError => Kind::ZeroDivisionError,
            Class::ArgumentError => Kind::ArgumentError(Arity::default()),
            Class::UncaughtThrowError => Kind::UncaughtThrowError(Arity::default()),
            Class::IndexError => Kind::IndexError,
            Class::StopIteration => Kind::StopIteration { result: None },
            Class::KeyError => Kind::KeyError,
            Class::RangeError => Kind::RangeError,
            Class::FloatDomainError => Kind::FloatDomainError,
            Class::LocalJumpError => Kind::LocalJumpError,
            Class::NameError => Kind::NameError(NameInfo::default()),
            Class::NoMethodError => Kind::NoMethodError(NameInfo::default()),
            Class::RuntimeError => Kind::RuntimeError,
            Class::SecurityError => Kind::SecurityError,
            Class::ThreadError => Kind::ThreadError,
            Class::FiberError => Kind::FiberError,
            Class::TypeError => Kind::TypeError,
            Class::RegexpError => Kind::RegexpError,
            Class::LoadError => Kind::LoadError { path: None },
            Class::InvalidExtensionError => Kind::InvalidExtensionError { path: None },
            Class::MriExtensionError => Kind::MriExtensionError { path: None },
            Class::NotImplementedError => Kind::NotImplementedError,
            Class::Interrupt => Kind::Interrupt(Signal::default()),
            Class::IoError => Kind::IoError,
            Class::EofError => Kind::EofError,
            Class::SyntaxError => Kind::SyntaxError(SourcePosition::default()),
            Class::SystemExit => Kind::SystemExit {
                status: crate::exception::EXIT_SUCCESS,
            },
            Class::SystemCallError => Kind::SystemCallError { errno: None },
            Class::Errno(class) => Kind::Errno { class, errno: None },
            Class::VmException => Kind::VmException,
            Class::AssertionError => Kind::AssertionError,
            Class::ObjectBoundsExceededError => Kind::ObjectBoundsExceededError,
            Class::InvalidBytecode => Kind::InvalidBytecode(BytecodeSite::default()),
            Class::InterpreterError => Kind::InterpreterError,
            Class::DeadlockError => Kind::DeadlockError,
            Class::FatalError => Kind::FatalError,
        }
    }

    pub fn class(&self) -> Class {
        match self {
            Kind::Exception => Class::Exception,
            Kind::PrimitiveFailure => Class::PrimitiveFailure,
            Kind::ScriptError => Class::ScriptError,
            Kind::StandardError => Class::StandardError,
            Kind::NoMemoryError => Class::NoMemoryError,
            Kind::SignalException(_) => Class::SignalException,
            Kind::Interrupt(_) => Class::Interrupt,
            Kind::ZeroDivisionError => Class::ZeroDivisionError,
            Kind::ArgumentError(_) => Class::ArgumentError,
            Kind::UncaughtThrowError(_) => Class::UncaughtThrowError,
            Kind::IndexError => Class::IndexError,
            Kind::KeyError => Class::KeyError,
            Kind::StopIteration { .. } => Class::StopIteration,
            Kind::RangeError => Class::RangeError,
            Kind::FloatDomainError => Class::FloatDomainError,
            Kind::LocalJumpError => Class::LocalJumpError,
            Kind::NameError(_) => Class::NameError,
            Kind::NoMethodError(_) => Class::NoMethodError,
            Kind::RuntimeError => Class::RuntimeError,
            Kind::SecurityError => Class::SecurityError,
            Kind::ThreadError => Class::ThreadError,
            Kind::FiberError => Class::FiberError,
            Kind::TypeError => Class::TypeError,
            Kind::RegexpError => Class::RegexpError,
            Kind::LoadError { .. } => Class::LoadError,
            Kind::InvalidExtensionError { .. } => Class::InvalidExtensionError,
            Kind::MriExtensionError { .. } => Class::MriExtensionError,
            Kind::NotImplementedError => Class::NotImplementedError,
            Kind::IoError => Class::IoError,
            Kind::EofError => Class::EofError,
            Kind::SyntaxError(_) => Class::SyntaxError,
            Kind::SystemExit { .. } => Class::SystemExit,
            Kind::SystemCallError { .. } => Class::SystemCallError,
            Kind::Errno { class, .. } => Class::Errno(*class),
            Kind::VmException => Class::VmException,
            Kind::AssertionError => Class::AssertionError,
            Kind::ObjectBoundsExceededError => Class::ObjectBoundsExceededError,
            Kind::InvalidBytecode(_) => Class::InvalidBytecode,
            Kind::InterpreterError => Class::InterpreterError,
            Kind::DeadlockError => Class::DeadlockError,
            Kind::FatalError => Class::FatalError,
        }
    }

    /// Message-rendering hook
    ///
    /// `base` is the stored message, or the class name when there is none.
    /// Kinds that format their own message override it here; everything else
    /// returns `base` unchanged.
    pub fn render_text(&self, base: &str) -> String {
        match self {
            Kind::ArgumentError(arity) | Kind::UncaughtThrowError(arity) => {
                arity.describe().unwrap_or_else(|| base.to_string())
            }
            Kind::InvalidBytecode(site) => site.decorate(base),
            _ => base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_round_trips_class() {
        for class in Class::all() {
            assert_eq!(Kind::plain(class).class(), class);
        }
    }

    #[test]
    fn test_arity_describe() {
        let arity = Arity {
            given: Some(1),
            expected: Some("2".to_string()),
            method_name: Some("foo".to_string()),
        };
        assert_eq!(
            arity.describe().as_deref(),
            Some("method 'foo': given 1, expected 2")
        );

        let anonymous = Arity {
            method_name: None,
            ..arity
        };
        assert_eq!(anonymous.describe().as_deref(), Some("given 1, expected 2"));

        let incomplete = Arity {
            given: Some(1),
            ..Arity::default()
        };
        assert!(incomplete.describe().is_none());
    }

    #[test]
    fn test_render_text_defaults_to_base() {
        assert_eq!(Kind::RuntimeError.render_text("boom"), "boom");
        assert_eq!(
            Kind::ArgumentError(Arity::default()).render_text("bad value"),
            "bad value"
        );
    }

    #[test]
    fn test_invalid_bytecode_text() {
        let at_ip = Kind::InvalidBytecode(BytecodeSite {
            compiled_code: Some("Object#run".to_string()),
            ip: Some(12),
        });
        assert_eq!(at_ip.render_text("stack overflow"), "stack overflow - at Object#run+12");

        let no_ip = Kind::InvalidBytecode(BytecodeSite {
            compiled_code: Some("Object#run".to_string()),
            ip: Some(-1),
        });
        assert_eq!(no_ip.render_text("bad"), "bad - method Object#run");

        assert_eq!(
            Kind::InvalidBytecode(BytecodeSite::default()).render_text("bad"),
            "bad"
        );
    }
}
