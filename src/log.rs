// SPDX-License-Identifier: MIT OR Apache-2.0

//! The emission facade.
//!
//! A [`Log`] pairs a logger name with a [`Sink`].  Every operation takes a [`Level`];
//! the per-level methods (`info`, `warn_format`, `error_failure`, ...) are thin
//! forwarders to the generic ones.
//!
//! # Operation families
//!
//! | Operation          | Guard first | Payload                                           |
//! |--------------------|-------------|---------------------------------------------------|
//! | `log`, `log_with`  | no          | the message, unrendered; the sink filters         |
//! | `log_format`       | yes         | [`safe_format`] of a runtime composite format     |
//! | `log_as_self`      | yes         | `#<line> <caller>() <message>`                    |
//! | `log_failure`      | yes         | a one-line failure summary, via `log_as_self`     |
//!
//! No operation returns an error or panics on bad input: format problems produce an
//! empty message and unreadable failures produce a fixed fallback text.

use crate::failure::{self, Failure};
use crate::format::{FormatProvider, Invariant, safe_format, safe_format_with};
use crate::log_record::{Caller, LogRecord, Message};
use crate::sink::Sink;
use crate::Level;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// A named handle onto a sink.
///
/// Cheap to clone; clones share the sink.
///
/// ```
/// use std::sync::Arc;
/// use tierlog::{InMemorySink, Level, Log};
///
/// let sink = Arc::new(InMemorySink::with_threshold(Level::INFO));
/// let log = Log::new("orders", sink.clone());
///
/// log.notice("accepted");
/// log.debug("dropped below the threshold");
/// log.warn_format("{0} items backordered", &[&3]);
///
/// assert_eq!(sink.drain_logs(), "NOTICE orders - accepted\nWARN orders - 3 items backordered");
/// ```
#[derive(Clone)]
pub struct Log {
    name: Arc<str>,
    sink: Arc<dyn Sink>,
}

impl Debug for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Log")
            .field("name", &self.name)
            .field("sink", &self.sink)
            .finish()
    }
}

impl Log {
    pub fn new(name: impl Into<Arc<str>>, sink: Arc<dyn Sink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// The guard: whether the sink keeps records at `level`.
    #[inline]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.sink.is_enabled_for(level)
    }

    /// Forwards `message` unrendered.  The sink decides whether to keep it.
    #[track_caller]
    pub fn log<'m>(&self, level: Level, message: impl Into<Message<'m>>) {
        self.sink.log(LogRecord::new(&self.name, level, message.into()));
    }

    /// Forwards `message` and `failure` unrendered.
    #[track_caller]
    pub fn log_with<'m, 'f>(
        &self,
        level: Level,
        message: impl Into<Message<'m>>,
        failure: impl Into<Option<&'f Failure>>,
    ) {
        self.sink
            .log(LogRecord::new(&self.name, level, message.into()).with_failure(failure.into()));
    }

    /// Formats `args` into `format` and forwards the text, if `level` is enabled.
    ///
    /// Nothing in `args` is rendered when the guard fails.  A malformed format or
    /// argument mismatch forwards an empty message.
    #[track_caller]
    pub fn log_format<'f>(
        &self,
        level: Level,
        format: impl Into<Option<&'f str>>,
        args: &[&dyn Display],
    ) {
        self.log_format_with(level, &Invariant, format, args);
    }

    /// [`log_format`](Self::log_format) with a custom [`FormatProvider`].
    #[track_caller]
    pub fn log_format_with<'f>(
        &self,
        level: Level,
        provider: &dyn FormatProvider,
        format: impl Into<Option<&'f str>>,
        args: &[&dyn Display],
    ) {
        if !self.is_enabled_for(level) {
            return;
        }
        let text = safe_format_with(provider, format.into(), args);
        self.sink.log(LogRecord::formatted(&self.name, level, text));
    }

    /// Forwards `#<line> <caller>() <message>`, if `level` is enabled.
    ///
    /// Usually called through [`log_as_self!`](crate::log_as_self), which captures the caller.
    #[track_caller]
    pub fn log_as_self<'m, 'f>(
        &self,
        level: Level,
        message: impl Into<Message<'m>>,
        failure: impl Into<Option<&'f Failure>>,
        caller: Caller,
    ) {
        if !self.is_enabled_for(level) {
            return;
        }
        let message = message.into();
        let text = safe_format(
            Some("#{0} {1}() {2}"),
            &[&caller.line, &caller.name, &message],
        );
        self.sink.log(
            LogRecord::formatted(&self.name, level, text)
                .with_failure(failure.into())
                .with_caller(Some(caller)),
        );
    }

    /// Logs a one-line summary of `failure` through [`log_as_self`](Self::log_as_self).
    ///
    /// - `None` logs a fixed text reporting the misuse.
    /// - A cancellation signal logs its kind name and does not attach the failure.
    /// - Anything else logs `"<kind>: <message>"`.
    ///
    /// The failure itself is attached only at [`Level::ERROR`] and above.
    ///
    /// Usually called through [`log_failure!`](crate::log_failure), which captures the caller.
    #[track_caller]
    pub fn log_failure<'f>(
        &self,
        level: Level,
        failure: impl Into<Option<&'f Failure>>,
        caller: Caller,
    ) {
        if !self.is_enabled_for(level) {
            return;
        }
        let failure = failure.into();
        let summary = failure::summarize(failure);
        let attached = failure.filter(|f| !f.is_cancellation() && level >= Level::ERROR);
        self.log_as_self(level, summary.as_str(), attached, caller);
    }
}

macro_rules! level_methods {
    (
        $level:expr,
        $is_enabled:ident,
        $plain:ident,
        $with:ident,
        $format:ident,
        $format_with:ident,
        $as_self:ident,
        $failure:ident
    ) => {
        #[doc = concat!("Whether `", stringify!($level), "` records are kept.")]
        #[inline]
        pub fn $is_enabled(&self) -> bool {
            self.is_enabled_for($level)
        }

        #[doc = concat!("[`log`](Self::log) at `", stringify!($level), "`.")]
        #[track_caller]
        pub fn $plain<'m>(&self, message: impl Into<Message<'m>>) {
            self.log($level, message);
        }

        #[doc = concat!("[`log_with`](Self::log_with) at `", stringify!($level), "`.")]
        #[track_caller]
        pub fn $with<'m, 'f>(
            &self,
            message: impl Into<Message<'m>>,
            failure: impl Into<Option<&'f Failure>>,
        ) {
            self.log_with($level, message, failure);
        }

        #[doc = concat!("[`log_format`](Self::log_format) at `", stringify!($level), "`.")]
        #[track_caller]
        pub fn $format<'f>(&self, format: impl Into<Option<&'f str>>, args: &[&dyn Display]) {
            self.log_format($level, format, args);
        }

        #[doc = concat!("[`log_format_with`](Self::log_format_with) at `", stringify!($level), "`.")]
        #[track_caller]
        pub fn $format_with<'f>(
            &self,
            provider: &dyn FormatProvider,
            format: impl Into<Option<&'f str>>,
            args: &[&dyn Display],
        ) {
            self.log_format_with($level, provider, format, args);
        }

        #[doc = concat!("[`log_as_self`](Self::log_as_self) at `", stringify!($level), "`.")]
        #[track_caller]
        pub fn $as_self<'m, 'f>(
            &self,
            message: impl Into<Message<'m>>,
            failure: impl Into<Option<&'f Failure>>,
            caller: Caller,
        ) {
            self.log_as_self($level, message, failure, caller);
        }

        #[doc = concat!("[`log_failure`](Self::log_failure) at `", stringify!($level), "`.")]
        #[track_caller]
        pub fn $failure<'f>(&self, failure: impl Into<Option<&'f Failure>>, caller: Caller) {
            self.log_failure($level, failure, caller);
        }
    };
}

impl Log {
    level_methods!(Level::FINEST, is_finest_enabled, finest, finest_with, finest_format, finest_format_with, finest_as_self, finest_failure);
    level_methods!(Level::FINER, is_finer_enabled, finer, finer_with, finer_format, finer_format_with, finer_as_self, finer_failure);
    level_methods!(Level::FINE, is_fine_enabled, fine, fine_with, fine_format, fine_format_with, fine_as_self, fine_failure);
    level_methods!(Level::VERBOSE, is_verbose_enabled, verbose, verbose_with, verbose_format, verbose_format_with, verbose_as_self, verbose_failure);
    level_methods!(Level::TRACE, is_trace_enabled, trace, trace_with, trace_format, trace_format_with, trace_as_self, trace_failure);
    level_methods!(Level::DEBUG, is_debug_enabled, debug, debug_with, debug_format, debug_format_with, debug_as_self, debug_failure);
    level_methods!(Level::INFO, is_info_enabled, info, info_with, info_format, info_format_with, info_as_self, info_failure);
    level_methods!(Level::NOTICE, is_notice_enabled, notice, notice_with, notice_format, notice_format_with, notice_as_self, notice_failure);
    level_methods!(Level::WARN, is_warn_enabled, warn, warn_with, warn_format, warn_format_with, warn_as_self, warn_failure);
    level_methods!(Level::ERROR, is_error_enabled, error, error_with, error_format, error_format_with, error_as_self, error_failure);
    level_methods!(Level::SEVERE, is_severe_enabled, severe, severe_with, severe_format, severe_format_with, severe_as_self, severe_failure);
    level_methods!(Level::CRITICAL, is_critical_enabled, critical, critical_with, critical_format, critical_format_with, critical_as_self, critical_failure);
    level_methods!(Level::ALERT, is_alert_enabled, alert, alert_with, alert_format, alert_format_with, alert_as_self, alert_failure);
    level_methods!(Level::FATAL, is_fatal_enabled, fatal, fatal_with, fatal_format, fatal_format_with, fatal_as_self, fatal_failure);
    level_methods!(Level::EMERGENCY, is_emergency_enabled, emergency, emergency_with, emergency_format, emergency_format_with, emergency_as_self, emergency_failure);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemorySink;
    use crate::failure::{Cancelled, MESSAGE_FAILED, MISUSED_FAILURE_CALL};

    fn fixture(threshold: Level) -> (Arc<InMemorySink>, Log) {
        let sink = Arc::new(InMemorySink::with_threshold(threshold));
        let log = Log::new("test", sink.clone());
        (sink, log)
    }

    const HERE: Caller = Caller {
        name: "handler",
        line: 12,
    };

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn plain_emission_reaches_the_sink_filter() {
        let (sink, log) = fixture(Level::WARN);
        log.info("hidden");
        log.error("shown");
        log.log(Level::custom(65_000, "AUDIT"), "custom");
        let records = sink.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "shown");
        assert_eq!(records[1].level, Level::custom(65_000, "AUDIT"));
    }

    #[test]
    fn plain_emission_with_absent_message() {
        let (sink, log) = fixture(Level::ALL);
        log.debug(None::<&str>);
        log.debug("");
        let records = sink.drain();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.message.is_empty()));
    }

    #[test]
    fn plain_emission_keeps_failure_at_any_level() {
        let (sink, log) = fixture(Level::ALL);
        let failure = Failure::new(DiskFull);
        log.trace_with("flush skipped", &failure);
        let record = sink.drain().pop().unwrap();
        assert_eq!(record.failure.as_deref(), Some("DiskFull: disk full"));
    }

    #[test]
    fn format_emission_uses_safe_format() {
        let (sink, log) = fixture(Level::ALL);
        log.info_format("{0}/{1}", &[&1, &2]);
        log.info_format("{0}/{1}", &[&1]);
        log.info_format(None, &[&1]);
        let messages: Vec<_> = sink.drain().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, ["1/2", "", ""]);
    }

    #[test]
    fn as_self_prefixes_line_and_caller() {
        let (sink, log) = fixture(Level::ALL);
        log.notice_as_self("ready", None, HERE);
        let record = sink.drain().pop().unwrap();
        assert_eq!(record.message, "#12 handler() ready");
        assert_eq!(record.caller, Some(HERE));
    }

    #[test]
    fn failure_below_error_is_summarized_but_not_attached() {
        let (sink, log) = fixture(Level::ALL);
        let failure = Failure::new(DiskFull);
        log.warn_failure(&failure, HERE);
        log.error_failure(&failure, HERE);
        let records = sink.drain();
        assert_eq!(records[0].message, "#12 handler() DiskFull: disk full");
        assert_eq!(records[0].failure, None);
        assert_eq!(records[1].message, "#12 handler() DiskFull: disk full");
        assert_eq!(records[1].failure.as_deref(), Some("DiskFull: disk full"));
    }

    #[test]
    fn cancellation_is_reduced_to_its_kind() {
        let (sink, log) = fixture(Level::ALL);
        log.fatal_failure(&Failure::new(Cancelled), HERE);
        let record = sink.drain().pop().unwrap();
        assert_eq!(record.message, "#12 handler() Cancelled");
        assert_eq!(record.failure, None);
    }

    #[test]
    fn missing_failure_reports_misuse() {
        let (sink, log) = fixture(Level::ALL);
        log.error_failure(None, HERE);
        let record = sink.drain().pop().unwrap();
        assert_eq!(record.message, format!("#12 handler() {MISUSED_FAILURE_CALL}"));
        assert_eq!(record.failure, None);
    }

    #[test]
    fn unreadable_failure_message_falls_back() {
        #[derive(Debug)]
        struct Broken;
        impl Display for Broken {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }
        impl std::error::Error for Broken {}

        let (sink, log) = fixture(Level::ALL);
        log.debug_failure(&Failure::new(Broken), HERE);
        let record = sink.drain().pop().unwrap();
        assert_eq!(record.message, format!("#12 handler() Broken: {MESSAGE_FAILED}"));
    }

    #[test]
    fn guarded_operations_skip_disabled_levels() {
        let (sink, log) = fixture(Level::OFF);
        let failure = Failure::new(DiskFull);
        log.emergency_format("{0}", &[&1]);
        log.emergency_as_self("x", &failure, HERE);
        log.emergency_failure(&failure, HERE);
        assert!(sink.is_empty());
        assert!(!log.is_emergency_enabled());
    }

    #[test]
    fn every_level_forwarder_uses_its_level() {
        let (sink, log) = fixture(Level::ALL);
        log.finest("m");
        log.finer("m");
        log.fine("m");
        log.verbose("m");
        log.trace("m");
        log.debug("m");
        log.info("m");
        log.notice("m");
        log.warn("m");
        log.error("m");
        log.severe("m");
        log.critical("m");
        log.alert("m");
        log.fatal("m");
        log.emergency("m");
        let levels: Vec<Level> = sink.drain().into_iter().map(|r| r.level).collect();
        assert_eq!(levels, Level::STANDARD);
    }
}
