//! Uncaught Error Example
//!
//! Raises an errno error from a failed file open, raises a second error
//! while handling it and reports the chain the way a top-level handler
//! would.
//!
//! To run this example:
//! ```bash
//! cargo run --package rescue-runtime --example report_uncaught
//! RESCUE_COLORIZE=false cargo run --package rescue-runtime --example report_uncaught
//! DEMO_SIGNAL=TERM cargo run --package rescue-runtime --example report_uncaught
//! ```

use rescue_core::{Class, Exception, SignalSpec};
use rescue_runtime::{init_tracing, HostFrameCapture, PosixSignals, Raiser, Reporter, ReporterConfig};
use std::env;
use std::sync::Arc;

fn open_settings(raiser: &mut Raiser<HostFrameCapture>) -> Result<String, Arc<Exception>> {
    let path = "/nonexistent/settings.yaml";
    std::fs::read_to_string(path).map_err(|err| raiser.raise_io(&err, Some(path)))
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = ReporterConfig::load()?;
    let mut raiser = Raiser::from_config(HostFrameCapture::new().with_max_depth(8), &config);
    let mut reporter = Reporter::new(config);

    if let Ok(name) = env::var("DEMO_SIGNAL") {
        let exc = Exception::signal_exception(&PosixSignals, Some(SignalSpec::from(name)), None)
            .unwrap_or_else(Exception::from);
        println!("{} ({})", exc.message(), exc.class());
    }

    let failure = match open_settings(&mut raiser) {
        Ok(_) => return Ok(()),
        Err(exc) => exc,
    };

    raiser.rescue(failure);
    let top = raiser.raise(Exception::with_text(
        Class::RuntimeError,
        "could not load settings",
    ));

    let status = reporter.handle_uncaught(&top, &mut std::io::stderr())?;
    std::process::exit(status);
}
