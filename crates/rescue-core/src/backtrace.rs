//! Materialized backtraces
//!
//! A [`Backtrace`] is built from the raw frames an exception captured, on the
//! first occasion someone looks at it. Once built it never changes and is
//! shared by `Arc`, so attaching one exception's backtrace to another costs a
//! reference count.

use crate::capture::RawFrame;
use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Widest method column used when aligning frames in `show`
const MAX_METHOD_WIDTH: usize = 40;

const LOCATION_COLOR: &str = "\x1b[0;36m";
const COLOR_RESET: &str = "\x1b[0m";

/// One displayable frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Method or function name
    pub method: String,

    /// Source position (`file:line`)
    pub location: String,
}

impl FrameDescriptor {
    pub fn display_location(&self) -> &str {
        &self.location
    }

    /// MRI-style line, e.g. ``app.rb:3:in `run'``
    pub fn line(&self) -> String {
        format!("{}:in `{}'", self.location, self.method)
    }

    fn render(&self, width: usize, colorize: bool) -> String {
        if colorize {
            format!(
                "{:>width$} at {}{}{}",
                self.method,
                LOCATION_COLOR,
                self.location,
                COLOR_RESET,
                width = width
            )
        } else {
            format!("{:>width$} at {}", self.method, self.location, width = width)
        }
    }
}

impl From<&RawFrame> for FrameDescriptor {
    fn from(frame: &RawFrame) -> Self {
        Self {
            method: frame.method.clone(),
            location: frame.position(),
        }
    }
}

/// An ordered sequence of frames, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backtrace {
    frames: Vec<FrameDescriptor>,
}

impl Backtrace {
    /// Materialize raw frame records; the order is preserved as captured
    pub fn from_locations(locations: &[RawFrame]) -> Self {
        Self {
            frames: locations.iter().map(FrameDescriptor::from).collect(),
        }
    }

    pub fn from_frames(frames: Vec<FrameDescriptor>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[FrameDescriptor] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Plain text lines, one per frame
    pub fn lines(&self) -> Vec<String> {
        self.frames.iter().map(FrameDescriptor::line).collect()
    }

    /// Lazily render frames with the method column right-aligned
    pub fn rendered(&self, colorize: bool) -> impl Iterator<Item = String> + '_ {
        let width = self
            .frames
            .iter()
            .map(|f| f.method.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_METHOD_WIDTH);

        self.frames.iter().map(move |f| f.render(width, colorize))
    }

    /// Join the rendered frames with `separator`
    pub fn show(&self, separator: &str, colorize: bool) -> String {
        self.rendered(colorize).collect::<Vec<_>>().join(separator)
    }

    /// `show` with newline separators and color
    pub fn show_default(&self) -> String {
        self.show("\n", true)
    }

    /// Recognize a host value that already carries a materialized backtrace
    pub fn detect_embedded(value: &Value) -> Option<Arc<Backtrace>> {
        match value {
            Value::Backtrace(bt) => Some(Arc::clone(bt)),
            _ => None,
        }
    }
}

/// What `Exception::set_backtrace` accepts
#[derive(Debug, Clone, PartialEq)]
pub enum BacktraceInput {
    /// Reuse an existing backtrace as is
    Structured(Arc<Backtrace>),
    /// User-defined backtrace lines
    Lines(Vec<String>),
    /// A single user-defined line
    Line(String),
    /// Clear the user-defined backtrace
    Absent,
}

impl From<Arc<Backtrace>> for BacktraceInput {
    fn from(bt: Arc<Backtrace>) -> Self {
        BacktraceInput::Structured(bt)
    }
}

impl From<Backtrace> for BacktraceInput {
    fn from(bt: Backtrace) -> Self {
        BacktraceInput::Structured(Arc::new(bt))
    }
}

impl From<Vec<String>> for BacktraceInput {
    fn from(lines: Vec<String>) -> Self {
        BacktraceInput::Lines(lines)
    }
}

impl From<String> for BacktraceInput {
    fn from(line: String) -> Self {
        BacktraceInput::Line(line)
    }
}

impl From<&str> for BacktraceInput {
    fn from(line: &str) -> Self {
        BacktraceInput::Line(line.to_string())
    }
}

impl TryFrom<Value> for BacktraceInput {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        if let Some(bt) = Backtrace::detect_embedded(&value) {
            return Ok(BacktraceInput::Structured(bt));
        }

        let mismatch = || CoreError::type_mismatch("backtrace must be Array of String");
        match value {
            Value::Null => Ok(BacktraceInput::Absent),
            Value::String(line) => Ok(BacktraceInput::Line(line)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(mismatch()),
                })
                .collect::<Result<Vec<_>>>()
                .map(BacktraceInput::Lines),
            _ => Err(mismatch()),
        }
    }
}
