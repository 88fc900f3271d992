//! Native call-stack capture
//!
//! `HostFrameCapture` walks the real process stack with the `backtrace`
//! crate. Frames belonging to the walker itself are dropped so that skip
//! counts start at the caller of `snapshot`.

use rescue_core::{FrameCapture, RawFrame};

const UNKNOWN_SYMBOL: &str = "<unknown>";

/// Frame capture over the native stack of the calling thread
#[derive(Debug, Clone, Default)]
pub struct HostFrameCapture {
    max_depth: Option<usize>,
}

impl HostFrameCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `depth` frames per snapshot
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn symbol_frames(trace: &backtrace::Backtrace) -> Vec<RawFrame> {
        let mut frames = Vec::new();
        for frame in trace.frames() {
            for symbol in frame.symbols() {
                let method = symbol
                    .name()
                    .map(|name| format!("{:#}", name))
                    .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());

                let mut raw = RawFrame::new(method);
                if let Some(file) = symbol.filename() {
                    raw.file = Some(file.display().to_string());
                    raw.line = symbol.lineno();
                }
                frames.push(raw);
            }
        }
        frames
    }
}

fn is_capture_machinery(frame: &RawFrame) -> bool {
    frame.method.starts_with("backtrace::")
        || frame.method.contains("HostFrameCapture")
        || frame.method.contains("FrameCapture>::snapshot")
}

impl FrameCapture for HostFrameCapture {
    fn snapshot(&self, skip: usize) -> Vec<RawFrame> {
        let trace = backtrace::Backtrace::new();
        let frames = Self::symbol_frames(&trace)
            .into_iter()
            .skip_while(is_capture_machinery)
            .skip(skip);

        let frames: Vec<RawFrame> = match self.max_depth {
            Some(depth) => frames.take(depth).collect(),
            None => frames.collect(),
        };

        tracing::trace!(depth = frames.len(), skip, "captured native stack");
        frames
    }
}
