//! Default console backend
//!
//! Renders each message as one line (JSON by default) and writes it to a
//! mutex-guarded sink: the process-wide sink shared by every console backend,
//! or a writer owned by this backend.

use crate::core::{Emit, LogMessage, LoggerError, OutputFormat, Result, TimestampFormat};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

type BoxedWriter = Box<dyn Write + Send>;

/// Process-wide sink; `None` means stdout.
static PROCESS_SINK: Mutex<Option<BoxedWriter>> = Mutex::new(None);

/// Redirect the process-wide sink used by every console backend without its
/// own writer
pub fn set_process_sink<W: Write + Send + 'static>(writer: W) {
    *PROCESS_SINK.lock() = Some(Box::new(writer));
}

/// Restore stdout as the process-wide sink
pub fn reset_process_sink() {
    *PROCESS_SINK.lock() = None;
}

enum Sink {
    Process,
    Writer(Arc<Mutex<BoxedWriter>>),
}

/// Console backend writing one line per message.
///
/// The backend never terminates the process, including for `fatal`.
/// Rendering or write failures are reported on stderr and the line is
/// dropped.
///
/// # Example
///
/// ```
/// use ecto_logger::{ConsoleBackend, Logger, OutputFormat, TimestampFormat};
///
/// let backend = ConsoleBackend::new()
///     .with_output_format(OutputFormat::Json)
///     .with_timestamp_format(TimestampFormat::Rfc3339Millis);
///
/// let logger = Logger::new(backend);
/// logger.with_field("port", 8080).info("listening");
/// ```
pub struct ConsoleBackend {
    sink: Sink,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
    use_colors: bool,
}

impl ConsoleBackend {
    pub fn new() -> Self {
        Self {
            sink: Sink::Process,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
            use_colors: true,
        }
    }

    /// Write to `writer` instead of the process-wide sink
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.sink = Sink::Writer(Arc::new(Mutex::new(Box::new(writer))));
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Enable or disable ANSI colors in the text format
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Render a message as it would be written, without the newline
    pub fn render(&self, message: &LogMessage) -> Result<String> {
        self.output_format
            .format(message, &self.timestamp_format, self.use_colors)
    }

    /// Render and write one message
    pub fn write_message(&self, message: &LogMessage) -> Result<()> {
        let line = self.render(message)?;
        self.write_line(&line)
    }

    fn write_line(&self, line: &str) -> Result<()> {
        match &self.sink {
            Sink::Process => {
                let mut guard = PROCESS_SINK.lock();
                match guard.as_mut() {
                    Some(writer) => write_to(&mut **writer, line),
                    None => write_to(&mut io::stdout().lock(), line),
                }
            }
            Sink::Writer(writer) => write_to(&mut **writer.lock(), line),
        }
    }
}

fn write_to(writer: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(writer, "{}", line)
        .and_then(|_| writer.flush())
        .map_err(|e| LoggerError::io_operation("writing log line", "sink rejected the write", e))
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Emit for ConsoleBackend {
    fn emit(&self, message: LogMessage) {
        if let Err(e) = self.write_message(&message) {
            eprintln!(
                "[LOGGER ERROR] Console backend dropped a {} line: {}",
                message.severity, e
            );
        }
    }
}
