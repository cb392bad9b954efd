//! Structured logging routed to the browser console.
//!
//! `tracing` events are formatted by `tracing-subscriber` and each line is
//! written to the `console` method matching its level.

use std::io;
use std::sync::Once;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

use crate::config::LOG_LEVEL;

/// Console method a line is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<Level> for ConsoleMethod {
    fn from(level: Level) -> Self {
        if level == Level::ERROR {
            Self::Error
        } else if level == Level::WARN {
            Self::Warn
        } else if level == Level::INFO {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

/// Buffers one formatted event and flushes it to the console on drop.
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }

        let message = JsValue::from_str(line);
        match self.method {
            ConsoleMethod::Error => web_sys::console::error_1(&message),
            ConsoleMethod::Warn => web_sys::console::warn_1(&message),
            ConsoleMethod::Info => web_sys::console::info_1(&message),
            ConsoleMethod::Debug => web_sys::console::debug_1(&message),
        }
    }
}

/// Hands out a [`ConsoleWriter`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> ConsoleWriter {
        ConsoleWriter {
            method: ConsoleMethod::Info,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> ConsoleWriter {
        ConsoleWriter {
            method: ConsoleMethod::from(*meta.level()),
            buffer: Vec::new(),
        }
    }
}

/// Install the panic hook and the console subscriber. Safe to call twice.
pub fn init() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        let installed = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_max_level(LOG_LEVEL)
            .without_time()
            .with_ansi(false)
            .with_target(false)
            .try_init();

        if installed.is_err() {
            web_sys::console::warn_1(&"a tracing subscriber was already installed".into());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_to_console_method() {
        assert_eq!(ConsoleMethod::from(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::from(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::from(Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::from(Level::DEBUG), ConsoleMethod::Debug);
        assert_eq!(ConsoleMethod::from(Level::TRACE), ConsoleMethod::Debug);
    }
}
