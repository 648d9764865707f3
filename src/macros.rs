// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call-site macros.
//!
//! The [`Log`](crate::Log) methods can be called directly, but the macros here add two
//! things a function cannot:
//!
//! 1. [`caller!`] names the enclosing function, for the self-identifying operations.
//! 2. The emission macros evaluate their arguments only after the guard passes, so an
//!    expensive argument expression costs nothing when its level is disabled.

/// Strips the helper item name and any closure segments from a `type_name` path,
/// leaving the enclosing function's bare name.
#[doc(hidden)]
pub fn enclosing_function(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__tierlog_here").unwrap_or(path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    match path.rfind("::") {
        Some(at) => &path[at + 2..],
        None => path,
    }
}

/**
Captures the enclosing function name and the current line as a [`Caller`](crate::Caller).

Closures report the function they are written in.

```
fn reconnect() -> tierlog::Caller {
    tierlog::caller!()
}
let caller = reconnect();
assert_eq!(caller.name, "reconnect");
```
*/
#[macro_export]
macro_rules! caller {
    () => {
        $crate::Caller {
            name: {
                fn __tierlog_here() {}
                $crate::hidden::enclosing_function(::core::any::type_name_of_val(&__tierlog_here))
            },
            line: ::core::line!(),
        }
    };
}

/**
Guarded composite-format emission.

```
# use std::sync::Arc;
use tierlog::{InMemorySink, Level, Log};

let sink = Arc::new(InMemorySink::new());
let log = Log::new("cache", sink.clone());
tierlog::log_format!(log, Level::INFO, "{0} hits, {1} misses", 12, 3);
assert_eq!(sink.drain()[0].message, "12 hits, 3 misses");
```

The argument expressions are not evaluated unless the level is enabled.
*/
#[macro_export]
macro_rules! log_format {
    ($log:expr, $level:expr, $format:expr $(, $arg:expr)* $(,)?) => {{
        let __log: &$crate::Log = &$log;
        let __level: $crate::Level = $level;
        if __log.is_enabled_for(__level) {
            __log.log_format(__level, $format, &[$(&$arg as &dyn ::core::fmt::Display),*]);
        }
    }};
}

/// [`log_format!`] with a [`FormatProvider`](crate::format::FormatProvider) as the third argument.
#[macro_export]
macro_rules! log_format_with {
    ($log:expr, $level:expr, $provider:expr, $format:expr $(, $arg:expr)* $(,)?) => {{
        let __log: &$crate::Log = &$log;
        let __level: $crate::Level = $level;
        if __log.is_enabled_for(__level) {
            __log.log_format_with(
                __level,
                $provider,
                $format,
                &[$(&$arg as &dyn ::core::fmt::Display),*],
            );
        }
    }};
}

/**
Self-identifying emission: logs `#<line> <function>() <message>`.

```
# use std::sync::Arc;
use tierlog::{InMemorySink, Level, Log};

fn drain_queue(log: &Log) {
    tierlog::log_as_self!(log, Level::DEBUG, "empty");
}

let sink = Arc::new(InMemorySink::new());
drain_queue(&Log::new("queue", sink.clone()));
assert!(sink.drain()[0].message.ends_with(" drain_queue() empty"));
```
*/
#[macro_export]
macro_rules! log_as_self {
    ($log:expr, $level:expr, $message:expr $(,)?) => {
        $crate::log_as_self!($log, $level, $message, ::core::option::Option::None::<&$crate::Failure>)
    };
    ($log:expr, $level:expr, $message:expr, $failure:expr $(,)?) => {{
        let __log: &$crate::Log = &$log;
        let __level: $crate::Level = $level;
        if __log.is_enabled_for(__level) {
            __log.log_as_self(__level, $message, $failure, $crate::caller!());
        }
    }};
}

/**
Logs a one-line summary of a [`Failure`](crate::Failure), identifying the caller.

```
# use std::sync::Arc;
use tierlog::{Failure, InMemorySink, Level, Log};

let sink = Arc::new(InMemorySink::new());
let log = Log::new("io", sink.clone());
let failure = Failure::new(std::io::Error::other("broken pipe"));

fn report(log: &Log, failure: &Failure) {
    tierlog::log_failure!(log, Level::ERROR, failure);
}
report(&log, &failure);

let record = sink.drain().remove(0);
assert!(record.message.ends_with(" report() Error: broken pipe"));
assert!(record.failure.is_some());
```
*/
#[macro_export]
macro_rules! log_failure {
    ($log:expr, $level:expr, $failure:expr $(,)?) => {{
        let __log: &$crate::Log = &$log;
        let __level: $crate::Level = $level;
        if __log.is_enabled_for(__level) {
            __log.log_failure(__level, $failure, $crate::caller!());
        }
    }};
}
