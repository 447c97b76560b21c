//! Log output for the command line tool.
//!
//! Records go to two sinks: stderr, which `--quiet` silences, and an
//! append-only file that stays closed until one is configured. Stdout only
//! ever carries rendered results. The level filter starts from `RUST_LOG`
//! (or [`DEFAULT_LOG_LEVEL`]) and can be replaced once the config file and
//! flags are known.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{self, FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::config::DEFAULT_LOG_LEVEL;

/// `2026-01-31T09:15:02.417+05:30  WARN tax_ui::app: message key=value`
struct LineFormat;

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "1;32",
        Level::DEBUG => "1;34",
        Level::TRACE => "1;35",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            let colour = level_colour(meta.level());
            write!(writer, "\x1b[2m{stamp}\x1b[0m \x1b[{colour}m{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{stamp} {:>5} ", meta.level())?;
        }

        write!(writer, "{}: ", meta.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Destination of one layer's formatted records.
enum Sink {
    Discard,
    Stderr,
    File(File),
}

/// A [`Sink`] that can be swapped after the subscriber is installed.
#[derive(Clone)]
struct SinkSwitch(Arc<Mutex<Sink>>);

impl SinkSwitch {
    fn new(sink: Sink) -> Self {
        Self(Arc::new(Mutex::new(sink)))
    }

    fn replace(
        &self,
        sink: Sink,
    ) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = sink;
    }
}

struct SinkGuard<'a>(MutexGuard<'a, Sink>);

impl Write for SinkGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Sink::Discard => Ok(buf.len()),
            Sink::Stderr => io::stderr().write(buf),
            Sink::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Sink::Discard => Ok(()),
            Sink::Stderr => io::stderr().flush(),
            Sink::File(file) => file.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for SinkSwitch {
    type Writer = SinkGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkGuard(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

/// Controls for the installed subscriber, returned by [`init_logging`].
pub struct Logging {
    level: reload::Handle<EnvFilter, Registry>,
    console: SinkSwitch,
    file: SinkSwitch,
}

impl Logging {
    /// Replaces the level filter. Accepts a bare level such as `debug` or any
    /// `EnvFilter` directive such as `tax_core=trace,warn`.
    pub fn set_level(
        &self,
        directive: &str,
    ) -> Result<()> {
        let filter = parse_filter(directive)?;
        self.level
            .reload(filter)
            .context("failed to replace the log filter")
    }

    /// Shows or hides stderr output. File logging is unaffected.
    pub fn set_console(
        &self,
        enabled: bool,
    ) {
        self.console
            .replace(if enabled { Sink::Stderr } else { Sink::Discard });
    }

    /// Appends records to `path`, creating it if needed. The parent directory
    /// must exist.
    pub fn log_to_file(
        &self,
        path: &Path,
    ) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        self.file.replace(Sink::File(file));
        Ok(())
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_logging() -> Result<Logging> {
    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let (filter, level) = reload::Layer::new(initial);
    let console = SinkSwitch::new(Sink::Stderr);
    let file = SinkSwitch::new(Sink::Discard);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .event_format(LineFormat)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(console.clone()),
        )
        .with(
            fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(file.clone()),
        )
        .try_init()
        .context("a global log subscriber is already installed")?;

    Ok(Logging {
        level,
        console,
        file,
    })
}
