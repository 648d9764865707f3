// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! A [`Sink`] that keeps records in memory instead of writing them anywhere, for:
//!
//! - Unit testing code that logs through a [`Log`](crate::Log)
//! - Capturing logs where stderr is redirected or unavailable
//! - Examining log output programmatically
//!
//! Records only live for the duration of a [`Sink::log`] call, so the sink copies
//! what it keeps into a [`CapturedRecord`], rendering the message and the attached
//! failure's summary and snapshotting the context stack of the emitting thread.

use crate::context;
use crate::format::render_display;
use crate::log_record::{Caller, LogRecord};
use crate::sink::Sink;
use crate::Level;
use std::fmt::{self, Display};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An owned copy of a [`LogRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapturedRecord {
    pub logger: String,
    pub level: Level,
    pub message: String,
    /// Summary of the attached failure, if one was attached.
    pub failure: Option<String>,
    pub caller: Option<Caller>,
    /// The emitting thread's context labels, outermost first.
    pub context: Vec<String>,
    pub file: &'static str,
    pub line: u32,
}

impl CapturedRecord {
    fn capture(record: &LogRecord<'_>) -> Self {
        Self {
            logger: record.logger().to_string(),
            level: record.level(),
            message: record
                .formatted_message()
                .map_or_else(|| render_display(record.message()), str::to_string),
            failure: record.failure().map(|f| f.summary()),
            caller: record.caller(),
            context: context::snapshot(),
            file: record.location().file(),
            line: record.location().line(),
        }
    }
}

impl Display for CapturedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.level, self.logger, self.message)
    }
}

/// A sink that stores records in a `Vec`.
///
/// Thread-safe; share it with `Arc` and keep a clone to inspect what was logged.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tierlog::{InMemorySink, Level, Log};
///
/// let sink = Arc::new(InMemorySink::with_threshold(Level::WARN));
/// let log = Log::new("jobs", sink.clone());
///
/// log.info("started");
/// log.warn_format("job {0} is slow", &[&23]);
///
/// let records = sink.drain();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].message, "job 23 is slow");
/// assert!(sink.is_empty());
/// ```
#[derive(Debug)]
pub struct InMemorySink {
    threshold: Level,
    records: Mutex<Vec<CapturedRecord>>,
}

/*
Boilerplate notes for InMemorySink:

- Default: keeps everything, same as new().
- Clone: not implemented; clones would silently stop sharing the buffer.  Share through Arc.
- PartialEq/Eq/Hash: not implemented; comparing mutex-guarded buffers is not meaningful.
- Send/Sync: automatic through Mutex, and required by Sink.
*/

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    /// Creates a sink that keeps records at every level.
    pub fn new() -> Self {
        Self::with_threshold(Level::ALL)
    }

    pub fn with_threshold(threshold: Level) -> Self {
        Self {
            threshold,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    // a panic while holding the lock only means a record may be missing
    fn lock(&self) -> MutexGuard<'_, Vec<CapturedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copies the records captured so far.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().clone()
    }

    /// Takes the records captured so far, leaving the buffer empty.
    pub fn drain(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.lock())
    }

    /// Drains all records into a single string, one `LEVEL logger - message` per line.
    pub fn drain_logs(&self) -> String {
        self.drain()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes all records to stderr (the browser console on wasm) and clears the buffer.
    pub fn drain_to_console(&self) {
        for record in self.drain() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&record.to_string().into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", record);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Sink for InMemorySink {
    fn is_enabled_for(&self, level: Level) -> bool {
        level.passes(self.threshold)
    }

    fn log(&self, record: LogRecord<'_>) {
        if !self.is_enabled_for(record.level()) {
            return;
        }
        let captured = CapturedRecord::capture(&record);
        self.lock().push(captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::Failure;
    use crate::log_record::Message;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn test_threshold_filters() {
        let sink = InMemorySink::with_threshold(Level::NOTICE);
        assert!(!sink.is_enabled_for(Level::INFO));
        assert!(sink.is_enabled_for(Level::NOTICE));
        assert!(!sink.is_enabled_for(Level::OFF));

        sink.log(LogRecord::new("t", Level::INFO, Message::from("no")));
        sink.log(LogRecord::new("t", Level::ALERT, Message::from("yes")));
        assert_eq!(sink.drain_logs(), "ALERT t - yes");
        assert_eq!(sink.drain_logs(), "");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn test_capture_copies_everything() {
        let sink = InMemorySink::new();
        let failure = Failure::new(crate::failure::Interrupted);
        let _scope = context::push("capture");
        let caller = Caller { name: "f", line: 1 };

        sink.log(
            LogRecord::new("t", Level::ERROR, Message::from("boom"))
                .with_failure(Some(&failure))
                .with_caller(Some(caller)),
        );

        let records = sink.records();
        assert_eq!(sink.len(), 1);
        let record = &records[0];
        assert_eq!(record.message, "boom");
        assert_eq!(record.failure.as_deref(), Some("Interrupted"));
        assert_eq!(record.caller, Some(caller));
        assert_eq!(record.context, ["capture"]);
        assert_eq!(record.file, file!());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_capture_survives_failing_display() {
        struct Refuses;
        impl Display for Refuses {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }
        struct Explodes;
        impl Display for Explodes {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("display blew up")
            }
        }

        let sink = InMemorySink::new();
        sink.log(LogRecord::new("t", Level::INFO, Message::display(&Refuses)));
        sink.log(LogRecord::new("t", Level::INFO, Message::display(&Explodes)));
        let records = sink.drain();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.message.is_empty()));
    }
}
