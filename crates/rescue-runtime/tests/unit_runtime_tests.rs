//! Unit tests for rescue-runtime
//!
//! Drives the raiser, signal table and reporter together against both a
//! recorded interpreter stack and the native stack.

use rescue_core::{
    Class, CoreError, Errno, Exception, FrameCapture, RawFrame, RecordedStack, SignalSpec,
    SystemCallError, Value,
};
use rescue_runtime::error::RuntimeError;
use rescue_runtime::{HostFrameCapture, PosixSignals, Raiser, Reporter, ReporterConfig};
use std::sync::Arc;

fn interpreter_stack() -> RecordedStack {
    let mut stack = RecordedStack::new();
    stack.push(RawFrame::new("main").at("script.rb", 40));
    stack.push(RawFrame::new("Loader#load").at("lib/loader.rb", 17));
    stack.push(RawFrame::new("Kernel#raise").at("kernel/common/kernel.rb", 5));
    stack
}

fn plain_config() -> ReporterConfig {
    ReporterConfig {
        colorize: false,
        ..ReporterConfig::default()
    }
}

// ========== Signal Tests ==========

#[test]
fn test_signal_exception_from_number() {
    let exc =
        Exception::signal_exception(&PosixSignals, Some(SignalSpec::Number(libc::SIGINT)), None)
            .unwrap();
    assert_eq!(exc.signo(), Some(libc::SIGINT));
    assert_eq!(exc.signm(), Some("SIGINT"));
    assert_eq!(exc.message(), "SIGINT");
}

#[test]
fn test_signal_exception_from_prefixed_name() {
    let exc = Exception::signal_exception(&PosixSignals, Some("SIGHUP".into()), None).unwrap();
    assert_eq!(exc.signo(), Some(libc::SIGHUP));
    assert_eq!(exc.signm(), Some("SIGHUP"));
}

#[test]
fn test_signal_exception_invalid_number() {
    let err = Exception::signal_exception(&PosixSignals, Some(SignalSpec::Number(999)), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid signal number 999");
    assert_eq!(Exception::from(err).class(), Class::ArgumentError);
}

#[test]
fn test_interrupt_uses_platform_number() {
    let exc = Exception::interrupt(&PosixSignals, None).unwrap();
    assert_eq!(exc.class(), Class::Interrupt);
    assert_eq!(exc.signo(), Some(libc::SIGINT));
    assert!(exc.is_a(Class::SignalException));
}

// ========== Raise / Rescue Tests ==========

#[test]
fn test_nested_raise_builds_cause_chain() {
    let mut raiser = Raiser::new(interpreter_stack());

    let low = raiser.raise(SystemCallError::with_errno(
        Some("open"),
        Some(libc::EACCES),
        Some("/etc/shadow"),
    ));
    raiser.rescue(Arc::clone(&low));
    let mid = raiser.raise(Exception::with_text(Class::IoError, "read failed"));
    raiser.rescue(Arc::clone(&mid));
    let top = raiser.raise(Exception::with_text(Class::RuntimeError, "boot failed"));

    let chain: Vec<Class> = top.causes().map(|c| c.class()).collect();
    assert_eq!(chain, vec![Class::IoError, Class::Errno(Errno::EACCES)]);
    assert_eq!(low.errno(), Some(libc::EACCES));
}

#[test]
fn test_raise_with_native_capture() {
    let mut raiser = Raiser::new(HostFrameCapture::new()).with_offset(0);
    let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "native"));

    assert!(exc.has_backtrace());
    let bt = exc.awesome_backtrace().unwrap();
    assert!(!bt.is_empty());
    assert_eq!(bt.lines().len(), bt.len());
}

#[test]
fn test_raise_core_validation_failure() {
    let mut exc = Exception::with_text(Class::RuntimeError, "boom");
    let err = exc.set_backtrace_value(Value::Number(3.0)).unwrap_err();

    let mut raiser = Raiser::new(interpreter_stack());
    let raised = raiser.raise_core(err);
    assert_eq!(raised.class(), Class::TypeError);
    assert_eq!(raised.message(), "backtrace must be Array of String");
}

#[test]
fn test_lazy_backtrace_shared_across_threads() {
    let mut raiser = Raiser::new(interpreter_stack());
    let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "shared"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let exc = Arc::clone(&exc);
            std::thread::spawn(move || Arc::clone(exc.awesome_backtrace().unwrap()))
        })
        .collect();

    let seen: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for bt in &seen[1..] {
        assert!(Arc::ptr_eq(bt, &seen[0]));
    }
}

// ========== Reporter Tests ==========

#[test]
fn test_report_cause_chain() {
    let mut raiser = Raiser::new(interpreter_stack());
    let low = raiser.raise(Exception::with_text(Class::KeyError, "key not found: :db"));
    raiser.rescue(low);
    let top = raiser.raise(Exception::with_text(Class::RuntimeError, "config invalid"));

    let mut reporter = Reporter::new(plain_config());
    let mut out = Vec::new();
    reporter.report(&top, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("An exception occurred\n\n    config invalid (RuntimeError)\n"));
    assert_eq!(text.matches("Caused by: key not found: :db (KeyError)").count(), 1);
    assert_eq!(text.matches("Loader#load at lib/loader.rb:17").count(), 2);
    assert!(!text.contains("Kernel#raise"));
}

#[test]
fn test_report_colorized_keeps_frames() {
    let mut raiser = Raiser::new(interpreter_stack());
    let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "boom"));

    let mut colored = Vec::new();
    Reporter::default().report(&exc, &mut colored).unwrap();
    let mut plain = Vec::new();
    Reporter::new(plain_config()).report(&exc, &mut plain).unwrap();

    let colored = String::from_utf8(colored).unwrap();
    let plain = String::from_utf8(plain).unwrap();
    assert!(colored.contains("\u{1b}["));
    assert_eq!(colored.lines().count(), plain.lines().count());
}

#[test]
fn test_report_to_broken_sink() {
    struct Closed;

    impl std::io::Write for Closed {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let exc = Arc::new(Exception::with_text(Class::RuntimeError, "boom"));
    let mut reporter = Reporter::new(plain_config());
    let err = reporter.report(&exc, &mut Closed).unwrap_err();

    assert!(matches!(err, RuntimeError::Io(_)));
    assert_eq!(reporter.reported_count(), 0);
}

#[test]
fn test_exit_status_flow() {
    let mut reporter = Reporter::new(plain_config());
    let mut out = Vec::new();

    let ok = Arc::new(Exception::system_exit(None, None));
    assert_eq!(reporter.handle_uncaught(&ok, &mut out).unwrap(), rescue_core::EXIT_SUCCESS);

    let failed = Arc::new(Exception::with_text(Class::RuntimeError, "boom"));
    assert_eq!(
        reporter.handle_uncaught(&failed, &mut out).unwrap(),
        rescue_core::EXIT_FAILURE
    );
}

#[test]
fn test_core_error_into_runtime_error() {
    fn validate() -> rescue_runtime::Result<()> {
        let checked: rescue_core::error::Result<()> = Err(CoreError::wrong_arity(2, "1"));
        checked?;
        Ok(())
    }

    let err = validate().unwrap_err();
    assert_eq!(err.to_string(), "wrong number of arguments (2 for 1)");
}

#[test]
fn test_config_file_drives_raiser() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rescue.yaml");
    std::fs::write(&path, "backtrace_offset: 2\nheader: Crash\n")?;

    let config = ReporterConfig::from_file(&path)?;
    let stack = interpreter_stack();
    let mut raiser = Raiser::from_config(&stack, &config);
    let exc = raiser.raise(Exception::with_text(Class::RuntimeError, "boom"));

    assert_eq!(exc.locations().map(|l| l.len()), Some(1));
    assert_eq!(stack.snapshot(0).len(), 3);
    Ok(())
}
