//! Frame capture interface
//!
//! The host owns the call stack. Exceptions only ask it for a snapshot of raw
//! frame records when a backtrace is captured, and keep those records
//! untouched until someone inspects the backtrace.

use serde::{Deserialize, Serialize};

/// A raw stack frame record as produced by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Method or function name
    pub method: String,

    /// Source file, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Source line, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl RawFrame {
    /// Create a frame with only a method name
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            file: None,
            line: None,
        }
    }

    /// Attach a source position
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// `file:line`, `file`, or a placeholder when the position is unknown
    pub fn position(&self) -> String {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file.clone(),
            (None, _) => "(unknown)".to_string(),
        }
    }
}

/// Snapshotting of the host call stack
pub trait FrameCapture {
    /// Return the current call stack, innermost frame first, with the
    /// `skip` innermost frames removed
    fn snapshot(&self, skip: usize) -> Vec<RawFrame>;
}

impl<T: FrameCapture + ?Sized> FrameCapture for &T {
    fn snapshot(&self, skip: usize) -> Vec<RawFrame> {
        (**self).snapshot(skip)
    }
}

/// A call stack maintained by the host itself, e.g. an interpreter's frame list
#[derive(Debug, Clone, Default)]
pub struct RecordedStack {
    frames: Vec<RawFrame>,
}

impl RecordedStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from frames listed innermost first
    pub fn from_frames(frames: Vec<RawFrame>) -> Self {
        Self { frames }
    }

    /// Enter a new innermost frame
    pub fn push(&mut self, frame: RawFrame) {
        self.frames.insert(0, frame);
    }

    /// Leave the innermost frame
    pub fn pop(&mut self) -> Option<RawFrame> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl FrameCapture for RecordedStack {
    fn snapshot(&self, skip: usize) -> Vec<RawFrame> {
        self.frames.iter().skip(skip).cloned().collect()
    }
}
