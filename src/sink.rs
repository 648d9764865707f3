//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Level;
use crate::log_record::LogRecord;
use std::fmt::Debug;

/// The destination a [`Log`](crate::Log) hands its records to.
///
/// Sinks are shared between threads and called concurrently; the facade adds no
/// locking of its own.
pub trait Sink: Debug + Send + Sync {
    /**
    Whether a record at `level` would be kept.

    This is the guard evaluated before any formatting work, so it should be cheap:
    usually one comparison against a configured threshold.
    */
    fn is_enabled_for(&self, level: Level) -> bool;

    /**
    Submits the record.

    Called for plain emissions without a prior [`Self::is_enabled_for`] check, so
    implementations filter here as well.
    */
    fn log(&self, record: LogRecord<'_>);

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn flush(&self) {}
}

/*
Boilerplate notes.

# Sink

Clone makes no sense on the trait; sinks are shared through Arc.
PartialEq and Eq are possible but it's unclear whether we mean data or provenance equality.  Avoid.
Default is not sensible since a sink may need a destination to be constructed.
Send/Sync are required: one sink serves every thread.
*/
