//! `SystemCallError` construction
//!
//! Asking for a `SystemCallError` with an errno returns an instance of the
//! errno class registered for that code when there is one. Asking for a
//! specific errno class always returns that class.

use super::Exception;
use crate::errno::{compose_message, Errno, ErrnoRegistry};
use crate::error::{CoreError, Result};
use crate::taxonomy::{Class, Kind};
use crate::types::Value;

/// Factory for `SystemCallError` and the errno classes
pub struct SystemCallError;

impl SystemCallError {
    /// Construct `class` from host arguments
    ///
    /// For `SystemCallError` itself: `(errno)`, `(message)`,
    /// `(message, errno)` or `(message, errno, location)`. For an errno
    /// class: `()`, `(message)` or `(message, location)`.
    pub fn new(class: Class, args: &[Value]) -> Result<Exception> {
        match class {
            Class::SystemCallError => Self::new_generic(args),
            Class::Errno(errno) => Self::new_specific(errno, args),
            other => Err(CoreError::argument(format!(
                "{} is not a SystemCallError",
                other
            ))),
        }
    }

    fn new_generic(args: &[Value]) -> Result<Exception> {
        let (message, errno, location) = match args {
            [only @ Value::Number(_)] => (None, errno_arg(only)?, None),
            [message] => (Some(string_arg(message)?), None, None),
            [message, errno] => (message_arg(message)?, errno_arg(errno)?, None),
            [message, errno, location] => (
                message_arg(message)?,
                errno_arg(errno)?,
                message_arg(location)?,
            ),
            _ => return Err(CoreError::wrong_arity(args.len(), "1..3")),
        };

        Ok(Self::with_errno(
            message.as_deref(),
            errno,
            location.as_deref(),
        ))
    }

    fn new_specific(class: Errno, args: &[Value]) -> Result<Exception> {
        let (message, location) = match args {
            [] => (None, None),
            [message] => (Some(string_arg(message)?), None),
            [message, location] => (message_arg(message)?, message_arg(location)?),
            _ => return Err(CoreError::wrong_arity(args.len(), "0..2")),
        };

        Ok(Self::for_class(class, message.as_deref(), location.as_deref()))
    }

    /// The registered errno class for `errno`, or a generic
    /// `SystemCallError` carrying the raw code
    pub fn with_errno(
        message: Option<&str>,
        errno: Option<i32>,
        location: Option<&str>,
    ) -> Exception {
        if let Some(code) = errno {
            if let Some(resolved) = ErrnoRegistry::global().resolve(message, code, location) {
                return resolved;
            }
        }

        Exception::new(
            Kind::SystemCallError { errno },
            Some(compose_message(message, location)),
        )
    }

    /// An instance of exactly `class`
    ///
    /// The registry's instance is used only when it resolves the class's code
    /// back to `class`; otherwise the class is built directly, without an
    /// errno.
    pub fn for_class(class: Errno, message: Option<&str>, location: Option<&str>) -> Exception {
        if let Some(resolved) = ErrnoRegistry::global().resolve(message, class.code(), location) {
            if resolved.class() == Class::Errno(class) {
                return resolved;
            }
            log::debug!(
                "errno {} resolves to {}, building {} directly",
                class.code(),
                resolved.class(),
                class.class_name()
            );
        }

        Exception::new(
            Kind::Errno { class, errno: None },
            Some(compose_message(message, location)),
        )
    }
}

/// A lone message argument must be a string; `nil` is rejected too
fn string_arg(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(CoreError::type_mismatch(format!(
            "no implicit conversion of {} into String",
            other.type_name()
        ))),
    }
}

fn message_arg(value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        other => string_arg(other).map(Some),
    }
}

fn errno_arg(value: &Value) -> Result<Option<i32>> {
    if value.is_null() {
        return Ok(None);
    }
    value.as_i32().map(Some).ok_or_else(|| {
        CoreError::type_mismatch(format!(
            "no implicit conversion of {} into Integer",
            value.type_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_redirects_to_errno_class() {
        let exc = SystemCallError::new(
            Class::SystemCallError,
            &[Value::from("open"), Value::from(libc::ENOENT), Value::from("/x")],
        )
        .unwrap();
        assert_eq!(exc.class(), Class::Errno(Errno::ENOENT));
        assert_eq!(exc.errno(), Some(libc::ENOENT));
        assert_eq!(exc.message(), "unknown error @ /x - open");
    }

    #[test]
    fn test_generic_errno_only() {
        let exc = SystemCallError::new(Class::SystemCallError, &[Value::from(libc::EPIPE)]).unwrap();
        assert_eq!(exc.class(), Class::Errno(Errno::EPIPE));
        assert_eq!(exc.message(), "unknown error");
    }

    #[test]
    fn test_generic_message_only() {
        let exc = SystemCallError::new(Class::SystemCallError, &[Value::from("oops")]).unwrap();
        assert_eq!(exc.class(), Class::SystemCallError);
        assert_eq!(exc.errno(), None);
        assert_eq!(exc.message(), "unknown error - oops");
    }

    #[test]
    fn test_generic_unmapped_errno_falls_back() {
        let exc = SystemCallError::new(
            Class::SystemCallError,
            &[Value::from("weird"), Value::from(99_999)],
        )
        .unwrap();
        assert_eq!(exc.class(), Class::SystemCallError);
        assert_eq!(exc.errno(), Some(99_999));
        assert_eq!(exc.message(), "unknown error - weird");
    }

    #[test]
    fn test_generic_arity() {
        let err = SystemCallError::new(Class::SystemCallError, &[]).unwrap_err();
        assert_eq!(err.to_string(), "wrong number of arguments (0 for 1..3)");

        let four = vec![Value::Null; 4];
        let err = SystemCallError::new(Class::SystemCallError, &four).unwrap_err();
        assert_eq!(err.to_string(), "wrong number of arguments (4 for 1..3)");
    }

    #[test]
    fn test_generic_rejects_bad_argument_types() {
        let err = SystemCallError::new(Class::SystemCallError, &[Value::Bool(true)]).unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch(_)));

        let err = SystemCallError::new(
            Class::SystemCallError,
            &[Value::from("m"), Value::from("not a number")],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "no implicit conversion of String into Integer");
    }

    #[test]
    fn test_lone_nil_message_rejected() {
        let err = SystemCallError::new(Class::SystemCallError, &[Value::Null]).unwrap_err();
        assert_eq!(err, CoreError::type_mismatch("no implicit conversion of nil into String"));

        let err = SystemCallError::new(Class::Errno(Errno::ENOENT), &[Value::Null]).unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch(_)));
    }

    #[test]
    fn test_nil_message_with_errno_allowed() {
        let exc = SystemCallError::new(
            Class::SystemCallError,
            &[Value::Null, Value::from(libc::ENOENT)],
        )
        .unwrap();
        assert_eq!(exc.class(), Class::Errno(Errno::ENOENT));
        assert_eq!(exc.message(), "unknown error");
    }

    #[test]
    fn test_specific_class_confirmed_by_registry() {
        let exc = SystemCallError::new(
            Class::Errno(Errno::EACCES),
            &[Value::from("write"), Value::from("/root")],
        )
        .unwrap();
        assert_eq!(exc.class(), Class::Errno(Errno::EACCES));
        assert_eq!(exc.errno(), Some(libc::EACCES));
        assert_eq!(exc.message(), "unknown error @ /root - write");
    }

    #[test]
    fn test_specific_class_mismatch_builds_directly() {
        // EWOULDBLOCK shares its code with EAGAIN, which owns the registry slot
        let exc = SystemCallError::new(Class::Errno(Errno::EWOULDBLOCK), &[]).unwrap();
        assert_eq!(exc.class(), Class::Errno(Errno::EWOULDBLOCK));
        assert_eq!(exc.errno(), None);
        assert_eq!(exc.message(), "unknown error");
    }

    #[test]
    fn test_specific_arity() {
        let args = vec![Value::Null; 3];
        let err = SystemCallError::new(Class::Errno(Errno::ENOENT), &args).unwrap_err();
        assert_eq!(err.to_string(), "wrong number of arguments (3 for 0..2)");
    }

    #[test]
    fn test_non_system_call_class_rejected() {
        assert!(SystemCallError::new(Class::RuntimeError, &[]).is_err());
    }
}
