// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide sink.
//!
//! Libraries obtain a [`Log`] with [`logger`] and never pick a destination themselves;
//! the application decides where records go by installing a sink with
//! [`set_global_sink`] (or [`configure_console`]) at startup.
//!
//! # Default Behavior
//!
//! Until something is installed, the global sink is a [`ConsoleSink`] at
//! [`DEFAULT_THRESHOLD`](crate::console_sink::DEFAULT_THRESHOLD), so logging works
//! without any configuration.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tierlog::{InMemorySink, Level};
//! use tierlog::global_sink::{logger, set_global_sink};
//!
//! let log = logger("startup");
//!
//! let sink = Arc::new(InMemorySink::with_threshold(Level::INFO));
//! let previous = set_global_sink(sink.clone());
//!
//! // handles created earlier follow the newly installed sink
//! log.info("configured");
//! assert_eq!(sink.drain_logs(), "INFO startup - configured");
//!
//! set_global_sink(previous);
//! ```
//!
//! # Implementation Notes
//!
//! The slot is a spinlock rather than a `std::sync::Mutex` so it can be read from the
//! wasm main thread.  Reads clone one `Arc`; writes swap one `Arc`.  A sink that is
//! replaced stays alive until in-flight calls holding a clone of it finish.

use crate::console_sink::ConsoleSink;
use crate::log::Log;
use crate::log_record::LogRecord;
use crate::sink::Sink;
use crate::spinlock::Spinlock;
use crate::Level;
use std::sync::{Arc, OnceLock};

static GLOBAL_SINK: OnceLock<Spinlock<Arc<dyn Sink>>> = OnceLock::new();

fn slot() -> &'static Spinlock<Arc<dyn Sink>> {
    GLOBAL_SINK.get_or_init(|| Spinlock::new(Arc::new(ConsoleSink::default())))
}

/// The currently installed sink.
pub fn global_sink() -> Arc<dyn Sink> {
    slot().load()
}

/// Installs `sink` as the global sink and returns the one it replaces.
///
/// This function is thread-safe and can be called from any thread.
pub fn set_global_sink(sink: Arc<dyn Sink>) -> Arc<dyn Sink> {
    slot().replace(sink)
}

/// Installs a [`ConsoleSink`] at `threshold` as the global sink.
pub fn configure_console(threshold: Level) {
    set_global_sink(Arc::new(ConsoleSink::new(threshold)));
}

/// Installs a [`ConsoleSink`] whose threshold is read from the environment variable `var`.
///
/// See [`ConsoleSink::from_env`].
pub fn configure_console_from_env(var: &str, default: Level) {
    set_global_sink(Arc::new(ConsoleSink::from_env(var, default)));
}

/// A [`Log`] named `name` that writes to whatever the global sink is at the time of
/// each call.
pub fn logger(name: impl Into<Arc<str>>) -> Log {
    Log::new(name, Arc::new(GlobalSink))
}

/// Forwards every call to the sink installed at the time of the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GlobalSink;

impl Sink for GlobalSink {
    fn is_enabled_for(&self, level: Level) -> bool {
        global_sink().is_enabled_for(level)
    }

    fn log(&self, record: LogRecord<'_>) {
        global_sink().log(record);
    }

    fn flush(&self) {
        global_sink().flush();
    }
}
