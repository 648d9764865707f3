//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# tierlog

tierlog is a leveled logging facade with a fine-grained severity scale and scoped
diagnostic contexts.

# The problem

Five levels (`error`, `warn`, `info`, `debug`, `trace`) are not enough to say what a
record means.  Operations staff want to tell "the disk is full" from "the building is
on fire", and library authors want somewhere below `trace` for the firehose they only
turn on while chasing a bug.  At the same time, a facade that forwards every call
unconditionally pays for formatting messages nobody will read.

# The levels

tierlog ships fifteen standard levels, each an integer rank with a display name.  A
sink keeps a record when the record's rank is at or above its threshold.

| Name      | Rank    | Usecase                                         |
|-----------|---------|-------------------------------------------------|
| FINEST    | 2500    | the firehose                                    |
| FINER     | 5000    |                                                 |
| FINE      | 7500    |                                                 |
| VERBOSE   | 10000   | detailed tracing                                |
| TRACE     | 20000   |                                                 |
| DEBUG     | 30000   | print-style debugging                           |
| INFO      | 40000   | normal operation                                |
| NOTICE    | 50000   | normal but significant                          |
| WARN      | 60000   | suspicious condition                            |
| ERROR     | 70000   | an operation failed                             |
| SEVERE    | 80000   |                                                 |
| CRITICAL  | 90000   | a component failed                              |
| ALERT     | 100000  | someone must act now                            |
| FATAL     | 110000  | the process cannot continue                     |
| EMERGENCY | 120000  | the system is unusable                          |

`ALL` and `OFF` are thresholds only.  Custom levels are a [`Level::custom`] away.

# The facade

A [`Log`] pairs a logger name with a [`Sink`].  Each level has a family of methods:

```rust
use std::sync::Arc;
use tierlog::{Failure, InMemorySink, Level, Log};

let sink = Arc::new(InMemorySink::with_threshold(Level::INFO));
let log = Log::new("billing", sink.clone());

// plain: forwarded unrendered, the sink filters
log.notice("invoice run started");

// composite format: guarded, never fails
log.warn_format("{0} invoices over {1,6}", &[&3, &"limit"]);

// self-identifying, with the enclosing function filled in
tierlog::log_as_self!(log, Level::INFO, "checkpoint");

// failure summary
let failure = Failure::new(std::io::Error::other("timeout"));
tierlog::log_failure!(log, Level::ERROR, &failure);

assert_eq!(sink.len(), 4);
```

Only plain emission forwards without checking the level.  Everything that does work
before forwarding (formatting, summarizing a failure) checks
[`Log::is_enabled_for`] first.  The macros go further and do not even evaluate
their argument expressions when the level is disabled.

Logging never fails and never panics on bad input.  A malformed format string logs
an empty message; a failure whose message cannot be read logs a fixed fallback text.

# Sinks

[`ConsoleSink`] writes one line per record to stderr (the browser console on wasm).
[`InMemorySink`] keeps records for inspection in tests.  Implement [`Sink`] for
anything else.

Libraries should not choose a sink.  They call [`global_sink::logger`] and let the
application install one:

```rust
use tierlog::Level;

tierlog::global_sink::configure_console(Level::NOTICE);
let log = tierlog::global_sink::logger("app");
log.notice("ready");
```

# Context

[`context`] keeps a per-thread stack of labels that sinks attach to every record.
Push one with [`context::push`], or wrap a whole function with [`log_scope`].  Async
tasks get their own stack through [`context::ApplyContext`].
*/

mod level;
mod sink;
mod log_record;
mod log;
mod macros;
mod inmemory_sink;
mod spinlock;
mod sys;
pub mod console_sink;
pub mod context;
pub mod failure;
pub mod format;
pub mod global_sink;

pub use level::{Level, ParseLevelError, level_from_name};
pub use sink::Sink;
pub use log_record::{Caller, DECLARING_IDENTITY, LogRecord, Message};
pub use log::Log;
pub use failure::Failure;
pub use inmemory_sink::{CapturedRecord, InMemorySink};
pub use console_sink::ConsoleSink;

pub use tierlog_proc::log_scope;

#[doc(hidden)]
pub mod hidden {
    pub use crate::macros::enclosing_function;
}
extern crate self as tierlog;
