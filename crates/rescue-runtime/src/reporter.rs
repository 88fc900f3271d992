//! Top-level handler for errors nobody rescued

use crate::config::ReporterConfig;
use crate::error::Result;
use rescue_core::{Class, Exception, EXIT_FAILURE, EXIT_SUCCESS};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Weak};

/// Renders each uncaught error exactly once
///
/// Reported errors are remembered by address through weak handles, so the
/// reporter never keeps an error or its causes alive.
#[derive(Debug, Default)]
pub struct Reporter {
    config: ReporterConfig,
    reported: HashMap<usize, Weak<Exception>>,
    reported_total: usize,
}

impl Reporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            config,
            reported: HashMap::new(),
            reported_total: 0,
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Number of distinct errors rendered so far
    pub fn reported_count(&self) -> usize {
        self.reported_total
    }

    /// Reported errors that are still alive somewhere
    pub fn tracked_count(&self) -> usize {
        self.reported.len()
    }

    fn key(exc: &Arc<Exception>) -> usize {
        Arc::as_ptr(exc) as usize
    }

    fn already_reported(&self, exc: &Arc<Exception>) -> bool {
        self.reported
            .get(&Self::key(exc))
            .is_some_and(|seen| seen.as_ptr() == Arc::as_ptr(exc))
    }

    fn remember(&mut self, exc: &Arc<Exception>) {
        self.reported.retain(|_, seen| seen.strong_count() > 0);
        self.reported.insert(Self::key(exc), Arc::downgrade(exc));
        self.reported_total += 1;
    }

    /// Render `exc` to `sink` unless this exact error was reported before
    ///
    /// Returns whether anything was written.
    pub fn report<W: Write + ?Sized>(&mut self, exc: &Arc<Exception>, sink: &mut W) -> Result<bool> {
        if self.already_reported(exc) {
            tracing::debug!(class = %exc.class(), "error already reported");
            return Ok(false);
        }

        exc.render(&self.config.header, sink, self.config.colorize)?;
        tracing::error!(
            class = %exc.class(),
            message = %exc.message(),
            location = ?exc.location(),
            "uncaught exception"
        );
        self.remember(exc);
        Ok(true)
    }

    /// Render to standard error
    pub fn report_stderr(&mut self, exc: &Arc<Exception>) -> Result<bool> {
        let stderr = std::io::stderr();
        let mut sink = stderr.lock();
        self.report(exc, &mut sink)
    }

    /// Handle an error that reached the top level and return the exit status
    ///
    /// `SystemExit` ends quietly with its own status. Anything else is
    /// reported and ends with `EXIT_FAILURE`.
    pub fn handle_uncaught<W: Write + ?Sized>(
        &mut self,
        exc: &Arc<Exception>,
        sink: &mut W,
    ) -> Result<i32> {
        if exc.class() == Class::SystemExit {
            let status = exc.status().unwrap_or(EXIT_SUCCESS);
            tracing::info!(status, "exit requested");
            return Ok(status);
        }

        self.report(exc, sink)?;
        Ok(EXIT_FAILURE)
    }
}
