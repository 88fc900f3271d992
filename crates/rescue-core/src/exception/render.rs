//! Diagnostic dump of an exception and its causes

use super::Exception;
use std::io::{self, Write};

impl Exception {
    /// Write a human-readable report to `sink`
    ///
    /// The header, the indented message annotated with the class, the
    /// user-defined and captured backtraces, then the same blocks for each
    /// cause until the chain ends. The sink is flushed before returning.
    pub fn render<W: Write + ?Sized>(
        &self,
        header: &str,
        sink: &mut W,
        colorize: bool,
    ) -> io::Result<()> {
        writeln!(sink, "{}", header)?;
        writeln!(sink)?;

        let message = self.message();
        let mut lines: Vec<&str> = message.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let mut lines = lines.into_iter();
        writeln!(
            sink,
            "    {} ({})",
            lines.next().unwrap_or_default(),
            self.class()
        )?;
        for line in lines {
            writeln!(sink, "    {}", line)?;
        }

        self.render_backtraces(sink, colorize)?;

        for cause in self.causes() {
            writeln!(sink, "\nCaused by: {} ({})", cause.message(), cause.class())?;
            cause.render_backtraces(sink, colorize)?;
        }

        sink.flush()
    }

    fn render_backtraces<W: Write + ?Sized>(&self, sink: &mut W, colorize: bool) -> io::Result<()> {
        if let Some(custom) = self.custom_backtrace() {
            writeln!(sink, "\nUser defined backtrace:")?;
            writeln!(sink)?;
            for line in custom {
                writeln!(sink, "    {}", line)?;
            }
        }

        writeln!(sink, "\nBacktrace:")?;
        writeln!(sink)?;
        let shown = self
            .awesome_backtrace()
            .map(|bt| bt.show("\n", colorize))
            .unwrap_or_default();
        writeln!(sink, "{}", shown)
    }

    /// `render` into a string
    pub fn render_to_string(&self, header: &str, colorize: bool) -> String {
        let mut buffer = Vec::new();
        // writing to a Vec cannot fail
        let _ = self.render(header, &mut buffer, colorize);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
