//! Constructors and accessors for kinds with extra state

use super::Exception;
use crate::error::{CoreError, Result};
use crate::signal::{SignalSpec, SignalTable};
use crate::taxonomy::{Arity, BytecodeSite, Class, Kind, NameInfo, Signal, SourcePosition};
use crate::types::Value;

/// Process exit status of a successful run
pub const EXIT_SUCCESS: i32 = libc::EXIT_SUCCESS;

/// Process exit status of a failed run
pub const EXIT_FAILURE: i32 = libc::EXIT_FAILURE;

impl Exception {
    // ---------------------------------------------------------------------
    // NameError / NoMethodError
    // ---------------------------------------------------------------------

    pub fn name_error(
        message: Option<String>,
        name: Option<String>,
        receiver: Option<Value>,
    ) -> Self {
        Self::new(
            Kind::NameError(NameInfo {
                name,
                receiver,
                args: None,
            }),
            message,
        )
    }

    pub fn no_method_error(
        message: Option<String>,
        name: Option<String>,
        args: Option<Vec<Value>>,
        receiver: Option<Value>,
    ) -> Self {
        Self::new(
            Kind::NoMethodError(NameInfo {
                name,
                receiver,
                args,
            }),
            message,
        )
    }

    fn name_info(&self) -> Option<&NameInfo> {
        match self.kind() {
            Kind::NameError(info) | Kind::NoMethodError(info) => Some(info),
            _ => None,
        }
    }

    /// The name a lookup failed on
    pub fn name(&self) -> Option<&str> {
        self.name_info()?.name.as_deref()
    }

    /// The lookup receiver; an `ArgumentError` when none was recorded
    ///
    /// A `nil` or `false` receiver counts as none.
    pub fn receiver(&self) -> Result<&Value> {
        self.name_info()
            .and_then(|info| info.receiver.as_ref())
            .filter(|receiver| !matches!(receiver, Value::Null | Value::Bool(false)))
            .ok_or_else(|| CoreError::argument("no receiver is available"))
    }

    pub fn args(&self) -> Option<&[Value]> {
        match self.kind() {
            Kind::NoMethodError(info) => info.args.as_deref(),
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // ArgumentError
    // ---------------------------------------------------------------------

    pub fn argument_error(message: impl Into<String>) -> Self {
        Self::with_text(Class::ArgumentError, message)
    }

    /// An `ArgumentError` reporting a mismatched argument count
    pub fn arity_error(
        given: usize,
        expected: impl ToString,
        method_name: Option<String>,
    ) -> Self {
        Self::new(
            Kind::ArgumentError(Arity {
                given: Some(given),
                expected: Some(expected.to_string()),
                method_name,
            }),
            None,
        )
    }

    pub fn arity(&self) -> Option<&Arity> {
        match self.kind() {
            Kind::ArgumentError(arity) | Kind::UncaughtThrowError(arity) => Some(arity),
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // SignalException / Interrupt
    // ---------------------------------------------------------------------

    /// Build a `SignalException`, resolving the signal through `table`
    ///
    /// A number must be known to the table; `signm` then overrides the
    /// display name. A name may carry the `SIG` prefix and cannot be combined
    /// with `signm`.
    pub fn signal_exception(
        table: &dyn SignalTable,
        signal: Option<SignalSpec>,
        signm: Option<String>,
    ) -> Result<Self> {
        let resolved = match signal {
            None => Signal::default(),
            Some(SignalSpec::Number(signo)) => {
                let name = table.name_for_number(signo).ok_or_else(|| {
                    CoreError::argument(format!("invalid signal number {}", signo))
                })?;
                Signal {
                    signo: Some(signo),
                    signm: Some(signm.unwrap_or_else(|| format!("SIG{}", name))),
                }
            }
            Some(SignalSpec::Name(name)) => {
                if signm.is_some() {
                    return Err(CoreError::wrong_arity(2, "1"));
                }
                let bare = name.strip_prefix("SIG").unwrap_or(&name);
                let signo = table.number_for_name(bare).ok_or_else(|| {
                    CoreError::argument(format!("invalid signal name {}", bare))
                })?;
                Signal {
                    signo: Some(signo),
                    signm: Some(format!("SIG{}", bare)),
                }
            }
        };

        let message = resolved.signm.clone();
        Ok(Self::new(Kind::SignalException(resolved), message))
    }

    /// An `Interrupt`, bound to the table's `INT` signal
    pub fn interrupt(table: &dyn SignalTable, message: Option<String>) -> Result<Self> {
        let signo = table
            .number_for_name("INT")
            .ok_or_else(|| CoreError::argument("invalid signal name INT"))?;
        Ok(Self::new(
            Kind::Interrupt(Signal {
                signo: Some(signo),
                signm: Some("SIGINT".to_string()),
            }),
            message,
        ))
    }

    fn signal(&self) -> Option<&Signal> {
        match self.kind() {
            Kind::SignalException(signal) | Kind::Interrupt(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn signo(&self) -> Option<i32> {
        self.signal()?.signo
    }

    pub fn signm(&self) -> Option<&str> {
        self.signal()?.signm.as_deref()
    }

    // ---------------------------------------------------------------------
    // SyntaxError
    // ---------------------------------------------------------------------

    pub fn syntax_error(
        message: impl Into<String>,
        column: u32,
        line: u32,
        code: Option<String>,
        file: Option<String>,
    ) -> Self {
        Self::new(
            Kind::SyntaxError(SourcePosition {
                column: Some(column),
                line: Some(line),
                file,
                code,
            }),
            Some(message.into()),
        )
    }

    pub fn source_position(&self) -> Option<&SourcePosition> {
        match self.kind() {
            Kind::SyntaxError(position) => Some(position),
            _ => None,
        }
    }

    pub fn source_position_mut(&mut self) -> Option<&mut SourcePosition> {
        match self.kind_mut() {
            Kind::SyntaxError(position) => Some(position),
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // LoadError family
    // ---------------------------------------------------------------------

    /// A `LoadError` or one of its extension subclasses
    pub fn load_error(class: Class, message: Option<String>, path: Option<String>) -> Self {
        let kind = match class {
            Class::InvalidExtensionError => Kind::InvalidExtensionError { path },
            Class::MriExtensionError => Kind::MriExtensionError { path },
            _ => Kind::LoadError { path },
        };
        Self::new(kind, message)
    }

    pub fn path(&self) -> Option<&str> {
        match self.kind() {
            Kind::LoadError { path }
            | Kind::InvalidExtensionError { path }
            | Kind::MriExtensionError { path } => path.as_deref(),
            _ => None,
        }
    }

    /// Set the path of a load failure; ignored for other kinds
    pub fn set_path(&mut self, new_path: Option<String>) {
        if let Kind::LoadError { path }
        | Kind::InvalidExtensionError { path }
        | Kind::MriExtensionError { path } = self.kind_mut()
        {
            *path = new_path;
        }
    }

    // ---------------------------------------------------------------------
    // SystemExit
    // ---------------------------------------------------------------------

    /// A `SystemExit`; the status defaults to `EXIT_SUCCESS`
    pub fn system_exit(status: Option<i32>, message: Option<String>) -> Self {
        Self::new(
            Kind::SystemExit {
                status: status.unwrap_or(EXIT_SUCCESS),
            },
            message,
        )
    }

    pub fn status(&self) -> Option<i32> {
        match self.kind() {
            Kind::SystemExit { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether a `SystemExit` carries the success status
    pub fn is_success(&self) -> bool {
        self.status() == Some(EXIT_SUCCESS)
    }

    // ---------------------------------------------------------------------
    // SystemCallError
    // ---------------------------------------------------------------------

    pub fn errno(&self) -> Option<i32> {
        match self.kind() {
            Kind::SystemCallError { errno } | Kind::Errno { errno, .. } => *errno,
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // StopIteration
    // ---------------------------------------------------------------------

    /// A `StopIteration` carrying the iteration's final value
    pub fn stop_iteration(message: Option<String>, result: Option<Value>) -> Self {
        let mut exc = Self::from_class(Class::StopIteration, message);
        exc.set_result(result);
        exc
    }

    pub fn result(&self) -> Option<&Value> {
        match self.kind() {
            Kind::StopIteration { result } => result.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn set_result(&mut self, value: Option<Value>) {
        if let Kind::StopIteration { result } = self.kind_mut() {
            *result = value;
        }
    }

    // ---------------------------------------------------------------------
    // InvalidBytecode
    // ---------------------------------------------------------------------

    pub fn invalid_bytecode(
        message: impl Into<String>,
        compiled_code: Option<String>,
        ip: Option<i64>,
    ) -> Self {
        Self::new(
            Kind::InvalidBytecode(BytecodeSite { compiled_code, ip }),
            Some(message.into()),
        )
    }
}
