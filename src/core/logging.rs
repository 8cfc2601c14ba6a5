//! Console logging backend
//!
//! Installs a `tracing` fmt subscriber whose writer forwards each formatted
//! event to the browser console, picking `console.warn` / `console.error`
//! by level. Timestamps are off: `SystemTime` is unavailable on wasm32.

use std::io;
use std::str::FromStr;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Default level when the host does not ask for one
pub const DEFAULT_LEVEL: Level = Level::INFO;

#[derive(Clone, Copy)]
enum ConsoleTarget {
    Log,
    Warn,
    Error,
}

/// Buffers one formatted event and hands it to the console on drop
pub struct ConsoleWriter {
    target: ConsoleTarget,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = wasm_bindgen::JsValue::from_str(text.trim_end());
        match self.target {
            ConsoleTarget::Log => web_sys::console::log_1(&line),
            ConsoleTarget::Warn => web_sys::console::warn_1(&line),
            ConsoleTarget::Error => web_sys::console::error_1(&line),
        }
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// `MakeWriter` routing events to the console by level
#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { target: ConsoleTarget::Log, buf: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        let target = match *meta.level() {
            Level::ERROR => ConsoleTarget::Error,
            Level::WARN => ConsoleTarget::Warn,
            _ => ConsoleTarget::Log,
        };
        ConsoleWriter { target, buf: Vec::new() }
    }
}

/// Parse a level name ("warn", "DEBUG", ...), falling back to [`DEFAULT_LEVEL`]
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(DEFAULT_LEVEL)
}

/// Install the console subscriber. Returns false if one was already set.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(level)
        .without_time()
        .with_target(true)
        .try_init()
        .is_ok()
}
