/// Output streams and formatting: JSON and key/value table modes.
use std::io::{self, Stderr, Stdout, Write};

use comfy_table::{ContentArrangement, Table, presets::NOTHING};
use serde::Serialize;

use super::args::OutputFormat;
use crate::quota::QuotaRow;
use crate::types::ErrorOutput;

/// Resolve the effective output format, handling the `--json` flag.
///
/// `Auto` is the table layout whether or not stdout is a terminal; JSON is
/// only produced when asked for explicitly.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    match (fmt, json_flag) {
        (_, true) => OutputFormat::Json,
        (OutputFormat::Auto, false) => OutputFormat::Table,
        (fmt, false) => fmt,
    }
}

/// Output context passed to all commands.
#[derive(Debug, Clone, Copy)]
pub struct OutputCtx {
    pub format: OutputFormat,
    /// When true, report phase timings.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            debug,
        }
    }

    /// Whether results are written as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::Compact)
    }

    /// Start a named debug timer. Reports elapsed time on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

/// The two output streams: primary results (`out`) and diagnostics (`err`).
pub struct Ui<O, E> {
    out: O,
    err: E,
}

impl Ui<Stdout, Stderr> {
    /// Process stdout/stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Ui<O, E> {
    #[must_use]
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Write one line to the primary stream.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn display_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Write an empty line to the primary stream.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn display_newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Write one line to the diagnostic stream.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn display_diagnostic(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "{text}")
    }

    /// Write every warning, in order, to the diagnostic stream.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn display_warnings(&mut self, warnings: &[String]) -> io::Result<()> {
        for warning in warnings {
            writeln!(self.err, "{warning}")?;
        }
        self.err.flush()
    }

    /// Write `label: text` rows with the values aligned in one column.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn display_key_value_table(&mut self, rows: &[QuotaRow]) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(NOTHING)
            .set_content_arrangement(ContentArrangement::Disabled);
        for row in rows {
            table.add_row([format!("{}:", row.label), row.text.clone()]);
        }
        for column in table.column_iter_mut() {
            column.set_padding((0, 3));
        }

        for line in table.lines() {
            writeln!(self.out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    /// Serialize `value` as JSON to the primary stream.
    ///
    /// # Errors
    ///
    /// Propagates serialization and write failures.
    pub fn display_json<T: Serialize + ?Sized>(&mut self, value: &T, compact: bool) -> io::Result<()> {
        if compact {
            serde_json::to_writer(&mut self.out, value)?;
        } else {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        }
        writeln!(self.out)
    }

    /// Consume the UI and return the underlying streams.
    #[cfg(test)]
    #[must_use]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Table | OutputFormat::Auto => {
            let _ = writeln!(out, "{}", err.error.message);
            let _ = writeln!(out, "FAILED");
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            tracing::debug!(phase = self.label, elapsed_ms = ms, "timing");
        }
    }
}
