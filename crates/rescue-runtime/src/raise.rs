//! Raise and rescue bookkeeping for one thread of control
//!
//! The raiser captures a backtrace when an error is raised and links the
//! error being handled at that moment as its cause.

use crate::config::ReporterConfig;
use rescue_core::{CoreError, Exception, FrameCapture, Reraise, SystemCallError};
use std::sync::Arc;

/// Tracks the error currently being handled and raises new ones
#[derive(Debug)]
pub struct Raiser<C: FrameCapture> {
    capture: C,
    offset: usize,
    active: Option<Arc<Exception>>,
}

impl<C: FrameCapture> Raiser<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            offset: 1,
            active: None,
        }
    }

    /// Build a raiser using the configured backtrace offset
    pub fn from_config(capture: C, config: &ReporterConfig) -> Self {
        Self::new(capture).with_offset(config.backtrace_offset)
    }

    /// Number of innermost frames dropped at capture
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// The error being handled, if any
    pub fn active(&self) -> Option<&Arc<Exception>> {
        self.active.as_ref()
    }

    /// Raise a fresh error
    ///
    /// A backtrace is captured unless one is already attached. When another
    /// error is being handled and the new one has no cause yet, the handled
    /// error becomes its cause. The raised error becomes the active one.
    pub fn raise(&mut self, mut exc: Exception) -> Arc<Exception> {
        if !exc.has_backtrace() {
            exc.capture_backtrace(&self.capture, self.offset);
        }

        if exc.cause().is_none() {
            if let Some(active) = &self.active {
                exc.set_cause(Some(Arc::clone(active)));
            }
        }

        let exc = Arc::new(exc);
        tracing::debug!(
            class = %exc.class(),
            message = %exc.message(),
            caused = exc.cause().is_some(),
            "raise"
        );
        self.active = Some(Arc::clone(&exc));
        exc
    }

    /// Raise an existing error again, optionally with a new message
    ///
    /// Re-raising keeps the original backtrace and cause.
    pub fn reraise(&mut self, exc: &Arc<Exception>, message: Option<Reraise>) -> Arc<Exception> {
        let raised = exc.exception(message);
        tracing::debug!(
            class = %raised.class(),
            same = Arc::ptr_eq(exc, &raised),
            "reraise"
        );
        self.active = Some(Arc::clone(&raised));
        raised
    }

    /// Raise a validation failure from the exception model as a regular error
    pub fn raise_core(&mut self, err: CoreError) -> Arc<Exception> {
        self.raise(Exception::from(err))
    }

    /// Raise the errno class for an OS error, or `IOError` when it carries no code
    pub fn raise_io(&mut self, err: &std::io::Error, location: Option<&str>) -> Arc<Exception> {
        let exc = match err.raw_os_error() {
            Some(code) => SystemCallError::with_errno(None, Some(code), location),
            None => Exception::with_text(rescue_core::Class::IoError, err.to_string()),
        };
        self.raise(exc)
    }

    /// Enter a handler for `exc`
    pub fn rescue(&mut self, exc: Arc<Exception>) {
        tracing::trace!(class = %exc.class(), "rescue");
        self.active = Some(exc);
    }

    /// Leave the current handler, returning the error it was handling
    pub fn ensure_done(&mut self) -> Option<Arc<Exception>> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescue_core::{Class, Errno, RawFrame, RecordedStack};

    fn stack() -> RecordedStack {
        RecordedStack::from_frames(vec![
            RawFrame::new("Kernel#raise").at("kernel.rb", 1),
            RawFrame::new("Worker#run").at("worker.rb", 8),
            RawFrame::new("main").at("main.rb", 2),
        ])
    }

    #[test]
    fn test_raise_captures_backtrace() {
        let mut raiser = Raiser::new(stack());
        let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "boom"));

        let lines = exc.backtrace().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "worker.rb:8:in `Worker#run'");
        assert!(Arc::ptr_eq(raiser.active().unwrap(), &exc));
    }

    #[test]
    fn test_raise_keeps_existing_backtrace() {
        let mut prepared = Exception::with_text(Class::RuntimeError, "boom");
        prepared.capture_backtrace(&RecordedStack::from_frames(vec![RawFrame::new("elsewhere")]), 0);

        let mut raiser = Raiser::new(stack());
        let exc = raiser.raise(prepared);
        assert_eq!(exc.locations().unwrap()[0].method, "elsewhere");
    }

    #[test]
    fn test_offset_from_config() {
        let config = ReporterConfig {
            backtrace_offset: 2,
            ..ReporterConfig::default()
        };
        let mut raiser = Raiser::from_config(stack(), &config);
        let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "boom"));
        assert_eq!(exc.locations().unwrap().len(), 1);
    }

    #[test]
    fn test_raise_while_handling_links_cause_once() {
        let mut raiser = Raiser::new(stack());
        let first = raiser.raise(Exception::with_text(Class::KeyError, "missing"));
        raiser.rescue(Arc::clone(&first));

        let second = raiser.raise(Exception::with_text(Class::RuntimeError, "lookup failed"));
        assert!(Arc::ptr_eq(second.cause().unwrap(), &first));
        assert!(first.cause().is_none());
        assert_eq!(second.causes().count(), 1);
    }

    #[test]
    fn test_explicit_cause_is_kept() {
        let mut raiser = Raiser::new(stack());
        let handled = raiser.raise(Exception::with_text(Class::KeyError, "missing"));
        raiser.rescue(handled);

        let explicit = Arc::new(Exception::with_text(Class::IoError, "closed"));
        let mut exc = Exception::with_text(Class::RuntimeError, "failed");
        exc.set_cause(Some(Arc::clone(&explicit)));

        let raised = raiser.raise(exc);
        assert!(Arc::ptr_eq(raised.cause().unwrap(), &explicit));
    }

    #[test]
    fn test_no_cause_after_ensure_done() {
        let mut raiser = Raiser::new(stack());
        let first = raiser.raise(Exception::with_text(Class::KeyError, "missing"));
        raiser.rescue(Arc::clone(&first));
        let done = raiser.ensure_done().unwrap();
        assert!(Arc::ptr_eq(&done, &first));

        let second = raiser.raise(Exception::with_text(Class::RuntimeError, "later"));
        assert!(second.cause().is_none());
    }

    #[test]
    fn test_reraise_same_object() {
        let mut raiser = Raiser::new(stack());
        let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "boom"));
        let again = raiser.reraise(&exc, None);
        assert!(Arc::ptr_eq(&exc, &again));
    }

    #[test]
    fn test_reraise_with_message_keeps_backtrace() {
        let mut raiser = Raiser::new(stack());
        let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "boom"));
        let copy = raiser.reraise(&exc, Some("boom again".into()));

        assert!(!Arc::ptr_eq(&exc, &copy));
        assert_eq!(copy.message(), "boom again");
        assert_eq!(copy.backtrace(), exc.backtrace());
        assert!(Arc::ptr_eq(raiser.active().unwrap(), &copy));
    }

    #[test]
    fn test_raise_core_error() {
        let mut raiser = Raiser::new(stack());
        let exc = raiser.raise_core(CoreError::type_mismatch("backtrace must be Array of String"));
        assert_eq!(exc.class(), Class::TypeError);
        assert!(exc.has_backtrace());
    }

    #[test]
    fn test_raise_io_error() {
        let mut raiser = Raiser::new(stack());

        let os = std::io::Error::from_raw_os_error(libc::ENOENT);
        let exc = raiser.raise_io(&os, Some("/missing"));
        assert_eq!(exc.class(), Class::Errno(Errno::ENOENT));
        assert_eq!(exc.message(), "unknown error @ /missing");

        let plain = std::io::Error::new(std::io::ErrorKind::Other, "stream closed");
        let exc = raiser.raise_io(&plain, None);
        assert_eq!(exc.class(), Class::IoError);
        assert_eq!(exc.message(), "stream closed");
    }
}
