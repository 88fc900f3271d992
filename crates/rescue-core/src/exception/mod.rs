//! Exception objects
//!
//! An [`Exception`] is cheap to build: it stores its kind record and message
//! and nothing else. Raw frames are captured only when a raiser asks for
//! them, and turned into a [`Backtrace`] only when someone reads it.

mod kinds;
mod render;
mod system_call;

pub use kinds::{EXIT_FAILURE, EXIT_SUCCESS};
pub use system_call::SystemCallError;

use crate::backtrace::{Backtrace, BacktraceInput};
use crate::capture::{FrameCapture, RawFrame};
use crate::error::{CoreError, Result};
use crate::taxonomy::{Class, Kind};
use crate::types::Value;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// An exception: kind record, message, backtrace and cause
///
/// Serialization keeps the class, message, kind fields, raw locations and
/// cause; the materialized and user-defined backtraces are left out.
#[derive(Debug, Clone, Serialize)]
pub struct Exception {
    #[serde(flatten)]
    kind: Kind,

    message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    locations: Option<Arc<[RawFrame]>>,

    /// Built from `locations` on first read, or attached directly
    #[serde(skip)]
    backtrace: OnceCell<Arc<Backtrace>>,

    #[serde(skip)]
    custom_backtrace: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Arc<Exception>>,
}

/// The argument of a re-raise
#[derive(Debug, Clone)]
pub enum Reraise {
    /// An exception object; re-raising with the receiver itself is a no-op
    Error(Arc<Exception>),
    /// A replacement message
    Text(String),
}

impl From<&str> for Reraise {
    fn from(text: &str) -> Self {
        Reraise::Text(text.to_string())
    }
}

impl From<String> for Reraise {
    fn from(text: String) -> Self {
        Reraise::Text(text)
    }
}

impl From<Arc<Exception>> for Reraise {
    fn from(exception: Arc<Exception>) -> Self {
        Reraise::Error(exception)
    }
}

impl Exception {
    /// Create an exception; the message is stored verbatim
    pub fn new(kind: Kind, message: Option<String>) -> Self {
        Self {
            kind,
            message,
            locations: None,
            backtrace: OnceCell::new(),
            custom_backtrace: None,
            cause: None,
        }
    }

    /// Create an exception of `class` with every kind-specific field unset
    pub fn from_class(class: Class, message: Option<String>) -> Self {
        Self::new(Kind::plain(class), message)
    }

    /// Shorthand for `from_class` with a message
    pub fn with_text(class: Class, message: impl Into<String>) -> Self {
        Self::from_class(class, Some(message.into()))
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut Kind {
        &mut self.kind
    }

    pub fn class(&self) -> Class {
        self.kind.class()
    }

    pub fn is_a(&self, class: Class) -> bool {
        self.class().is_a(class)
    }

    /// The message exactly as stored
    pub fn reason(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The stored message, or the class name, run through the kind's
    /// rendering hook
    pub fn message(&self) -> String {
        let base = self.message.as_deref().unwrap_or_else(|| self.class().name());
        self.kind.render_text(base)
    }

    /// `#<Class: message>`, or just the class name for an empty message
    pub fn inspect(&self) -> String {
        let message = self.message();
        if message.is_empty() {
            self.class().name().to_string()
        } else {
            format!("#<{}: {}>", self.class(), message)
        }
    }

    /// Snapshot the host call stack, hiding the `offset` innermost frames
    ///
    /// Replaces earlier locations together with anything materialized from
    /// them.
    pub fn capture_backtrace(&mut self, capture: &dyn FrameCapture, offset: usize) {
        let frames = capture.snapshot(offset);
        self.locations = Some(frames.into());
        self.backtrace = OnceCell::new();
    }

    pub fn locations(&self) -> Option<&[RawFrame]> {
        self.locations.as_deref()
    }

    /// `(file, line)` of the innermost captured frame
    pub fn location(&self) -> Option<(String, u32)> {
        let frame = self.locations.as_deref()?.first()?;
        Some((frame.file.clone()?, frame.line?))
    }

    /// Whether frames were captured or a backtrace was attached
    pub fn has_backtrace(&self) -> bool {
        self.backtrace.get().is_some() || self.locations.is_some()
    }

    /// The structured backtrace, materialized from the captured locations on
    /// first call
    ///
    /// Concurrent first calls materialize once; every caller sees the same
    /// `Arc`.
    pub fn awesome_backtrace(&self) -> Option<&Arc<Backtrace>> {
        if let Some(bt) = self.backtrace.get() {
            return Some(bt);
        }
        let locations = self.locations.as_deref()?;
        Some(
            self.backtrace
                .get_or_init(|| Arc::new(Backtrace::from_locations(locations))),
        )
    }

    /// Backtrace lines: the user-defined ones when set, otherwise the lines
    /// of the structured backtrace
    pub fn backtrace(&self) -> Option<Vec<String>> {
        if let Some(custom) = &self.custom_backtrace {
            return Some(custom.clone());
        }
        self.awesome_backtrace().map(|bt| bt.lines())
    }

    pub fn custom_backtrace(&self) -> Option<&[String]> {
        self.custom_backtrace.as_deref()
    }

    /// Attach a backtrace
    ///
    /// A structured backtrace is shared, not copied, and replaces any
    /// user-defined lines. Text sets the user-defined lines; `Absent` clears
    /// them.
    pub fn set_backtrace(&mut self, input: impl Into<BacktraceInput>) {
        match input.into() {
            BacktraceInput::Structured(bt) => {
                self.backtrace = OnceCell::with_value(bt);
                self.custom_backtrace = None;
            }
            BacktraceInput::Lines(lines) => self.custom_backtrace = Some(lines),
            BacktraceInput::Line(line) => self.custom_backtrace = Some(vec![line]),
            BacktraceInput::Absent => self.custom_backtrace = None,
        }
    }

    /// `set_backtrace` for an untyped host value
    pub fn set_backtrace_value(&mut self, value: Value) -> Result<()> {
        let input = BacktraceInput::try_from(value)?;
        self.set_backtrace(input);
        Ok(())
    }

    pub fn cause(&self) -> Option<&Arc<Exception>> {
        self.cause.as_ref()
    }

    pub fn set_cause(&mut self, cause: Option<Arc<Exception>>) {
        self.cause = cause;
    }

    /// The cause chain, nearest cause first
    pub fn causes(&self) -> impl Iterator<Item = &Exception> {
        std::iter::successors(self.cause.as_deref(), |e| e.cause.as_deref())
    }

    /// Re-raise protocol
    ///
    /// No argument, or the receiver itself, returns the receiver. Anything
    /// else returns a copy carrying the new message.
    pub fn exception(self: &Arc<Self>, message: Option<Reraise>) -> Arc<Exception> {
        match message {
            None => Arc::clone(self),
            Some(Reraise::Error(other)) if Arc::ptr_eq(self, &other) => Arc::clone(self),
            Some(Reraise::Error(other)) => Arc::new(self.with_new_message(other.message())),
            Some(Reraise::Text(text)) => Arc::new(self.with_new_message(text)),
        }
    }

    /// A copy of the same kind with only the base message replaced
    ///
    /// Kind fields, backtrace and cause are carried over as they are; no
    /// kind-specific construction runs again.
    pub fn with_new_message(&self, message: impl Into<String>) -> Exception {
        let mut copy = self.clone();
        copy.message = Some(message.into());
        copy
    }
}

impl PartialEq for Exception {
    /// Same class, same message, same backtrace; the cause is not compared
    fn eq(&self, other: &Self) -> bool {
        self.class() == other.class()
            && self.message() == other.message()
            && self.backtrace() == other.backtrace()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Exception {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<CoreError> for Exception {
    fn from(err: CoreError) -> Self {
        let class = err.class();
        let message = match err {
            CoreError::TypeMismatch(message) | CoreError::Argument(message) => message,
        };
        Exception::with_text(class, message)
    }
}
