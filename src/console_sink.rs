// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::context;
use crate::format::render_display;
use crate::level::level_from_name;
use crate::log_record::LogRecord;
use crate::sink::Sink;
use crate::sys::{Duration, Instant, thread_label};
use crate::Level;
use std::fmt::Write;
use std::sync::OnceLock;

/// Threshold used when nothing else is configured.
pub const DEFAULT_THRESHOLD: Level = Level::DEBUG;

static START: OnceLock<Instant> = OnceLock::new();

fn elapsed() -> Duration {
    START.get_or_init(Instant::now).elapsed()
}

/**
A reference sink that writes to stderr, or to the browser console on wasm.

Each record is one line:

```text
<elapsed> [<thread>] [<context>] <LEVEL> <logger> - <message>
```

`<elapsed>` is the time since the sink first rendered a record in this process,
not a wall-clock date; pipe through a timestamping collector when dates are
needed.  `<context>` is the emitting thread's context labels, or `(null)` when
there are none.  A message or cause whose `Display` fails or panics renders as
empty.  An attached failure adds one indented line with its summary, followed by a
`caused by:` line for each error in its source chain.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleSink {
    threshold: Level,
}

/*
Boilerplate notes for ConsoleSink:

- Copy/Clone: a threshold is all there is.
- PartialEq/Eq/Hash: by threshold.
- Default: uses DEFAULT_THRESHOLD.
- Display: not implemented; no meaningful string form for a destination.
*/

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ConsoleSink {
    pub const fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    /// Reads the threshold from the environment variable `var`.
    ///
    /// An unset variable gives `default`.  A set but unknown name is reported on the
    /// diagnostic channel and gives [`Level::ALL`].
    ///
    /// ```
    /// use tierlog::{ConsoleSink, Level};
    ///
    /// let sink = ConsoleSink::from_env("TIERLOG_DOCTEST_UNSET_VARIABLE", Level::WARN);
    /// assert_eq!(sink.threshold(), Level::WARN);
    /// ```
    pub fn from_env(var: &str, default: Level) -> Self {
        match std::env::var(var) {
            Ok(name) => Self::new(level_from_name(name)),
            Err(_) => Self::new(default),
        }
    }

    pub const fn threshold(&self) -> Level {
        self.threshold
    }

    /// Renders `record` the way this sink writes it, without the trailing newline.
    pub fn render(record: &LogRecord<'_>) -> String {
        let mut line = String::new();
        let context = context::render();
        let _ = write!(
            line,
            "{:.3?} [{}] [{}] {} {} - {}",
            elapsed(),
            thread_label(),
            context.as_deref().unwrap_or("(null)"),
            record.level(),
            record.logger(),
            render_display(record.message()),
        );
        if let Some(failure) = record.failure() {
            let _ = write!(line, "\n    {}", failure.summary());
            let mut source = failure.error().source();
            while let Some(cause) = source {
                let _ = write!(line, "\n    caused by: {}", render_display(&cause));
                source = cause.source();
            }
        }
        line
    }
}

impl Sink for ConsoleSink {
    fn is_enabled_for(&self, level: Level) -> bool {
        level.passes(self.threshold)
    }

    fn log(&self, record: LogRecord<'_>) {
        if !self.is_enabled_for(record.level()) {
            return;
        }
        let line = Self::render(&record);
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let mut lock = std::io::stderr().lock();
            // nowhere left to report a failed write to stderr
            let _ = writeln!(lock, "{}", line);
        }
        #[cfg(target_arch = "wasm32")]
        {
            let level = record.level();
            let line = line.into();
            if level >= Level::ERROR {
                web_sys::console::error_1(&line);
            } else if level >= Level::WARN {
                web_sys::console::warn_1(&line);
            } else if level >= Level::INFO {
                web_sys::console::info_1(&line);
            } else if level >= Level::DEBUG {
                web_sys::console::debug_1(&line);
            } else {
                web_sys::console::log_1(&line);
            }
        }
    }

    fn flush(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::Failure;
    use crate::log_record::Message;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct RequestFailed(#[source] std::io::Error);

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn test_render_layout() {
        context::clear();
        let record = LogRecord::new("net", Level::WARN, Message::from("retrying"));
        let line = ConsoleSink::render(&record);
        assert!(line.ends_with("] [(null)] WARN net - retrying"), "{line}");

        let _scope = context::push("conn-3");
        let line = ConsoleSink::render(&record);
        assert!(line.ends_with("] [conn-3] WARN net - retrying"), "{line}");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn test_render_failure_chain() {
        let failure = Failure::new(RequestFailed(std::io::Error::other("reset by peer")));
        let record = LogRecord::new("net", Level::ERROR, Message::from("giving up"))
            .with_failure(Some(&failure));
        let line = ConsoleSink::render(&record);
        let mut lines = line.lines().skip(1);
        assert_eq!(lines.next(), Some("    RequestFailed: request failed"));
        assert_eq!(lines.next(), Some("    caused by: reset by peer"));
        assert_eq!(lines.next(), None);
    }

    #[derive(Debug)]
    struct Garbled;
    impl std::fmt::Display for Garbled {
        fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }
    impl std::error::Error for Garbled {}

    #[derive(Debug, thiserror::Error)]
    #[error("wrapper")]
    struct Wrapper(#[source] Garbled);

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn test_render_survives_failing_display() {
        context::clear();
        let record = LogRecord::new("net", Level::ERROR, Message::display(&Garbled));
        assert!(ConsoleSink::render(&record).ends_with("] ERROR net - "));

        let failure = Failure::new(Wrapper(Garbled));
        let record = LogRecord::new("net", Level::ERROR, Message::from("x"))
            .with_failure(Some(&failure));
        let line = ConsoleSink::render(&record);
        assert_eq!(line.lines().last(), Some("    caused by: "));
        ConsoleSink::new(Level::ALL).log(record);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn test_threshold() {
        let sink = ConsoleSink::default();
        assert_eq!(sink.threshold(), DEFAULT_THRESHOLD);
        assert!(sink.is_enabled_for(Level::DEBUG));
        assert!(!sink.is_enabled_for(Level::TRACE));
        assert!(!ConsoleSink::new(Level::OFF).is_enabled_for(Level::EMERGENCY));
    }
}
