// SPDX-License-Identifier: MIT OR Apache-2.0

//! The record handed to a [`Sink`](crate::Sink).
//!
//! A [`LogRecord`] borrows everything it can from the emitting call: the logger
//! name, the failure, and for plain emissions the message itself.  Nothing is
//! rendered until the sink decides to render it, so a sink that drops a record
//! pays nothing for its message.
//!
//! ```rust
//! use tierlog::{Level, LogRecord, Message};
//!
//! let record = LogRecord::new("db", Level::NOTICE, Message::from("connected"));
//! assert_eq!(record.to_string(), "NOTICE db - connected");
//! ```

use crate::Level;
use crate::failure::Failure;
use std::fmt::{self, Arguments, Debug, Display};
use std::panic::Location;

/// Identity of the facade type that produced every record.
///
/// Renderers that walk back to the "real" caller skip frames belonging to it.
pub const DECLARING_IDENTITY: &str = "tierlog::Log";

/// The function name and source line of the code that emitted a record.
///
/// Built at the call site by [`caller!`](crate::caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caller {
    pub name: &'static str,
    pub line: u32,
}

impl Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}()", self.line, self.name)
    }
}

/// The payload of a record.
///
/// Every variant renders lazily; guarded operations forward pre-formatted text instead.
#[derive(Clone, Copy, Default)]
pub enum Message<'a> {
    #[default]
    Empty,
    Str(&'a str),
    Args(Arguments<'a>),
    Display(&'a (dyn Display + 'a)),
}

/// An already-formatted message.
///
/// Kept separate from [`Message`] so that `Message` stays `Copy`; records own one via
/// [`Payload`].
#[derive(Clone)]
pub(crate) enum Payload<'a> {
    Borrowed(Message<'a>),
    Text(String),
}

impl<'a> Message<'a> {
    /// Borrows any displayable value without rendering it.
    pub fn display(value: &'a (dyn Display + 'a)) -> Self {
        Message::Display(value)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Message::Empty => true,
            Message::Str(s) => s.is_empty(),
            Message::Args(args) => args.as_str() == Some(""),
            Message::Display(_) => false,
        }
    }
}

impl Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Empty => Ok(()),
            Message::Str(s) => f.write_str(s),
            Message::Args(args) => f.write_fmt(*args),
            Message::Display(d) => Display::fmt(d, f),
        }
    }
}

impl Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Empty => f.write_str("Empty"),
            Message::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Message::Args(args) => f.debug_tuple("Args").field(args).finish(),
            Message::Display(_) => f.write_str("Display(..)"),
        }
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(s: &'a str) -> Self {
        Message::Str(s)
    }
}

impl<'a> From<&'a String> for Message<'a> {
    fn from(s: &'a String) -> Self {
        Message::Str(s)
    }
}

impl<'a> From<Arguments<'a>> for Message<'a> {
    fn from(args: Arguments<'a>) -> Self {
        Message::Args(args)
    }
}

impl<'a> From<&'a (dyn Display + 'a)> for Message<'a> {
    fn from(d: &'a (dyn Display + 'a)) -> Self {
        Message::Display(d)
    }
}

impl<'a, M> From<Option<M>> for Message<'a>
where
    M: Into<Message<'a>>,
{
    fn from(m: Option<M>) -> Self {
        m.map_or(Message::Empty, Into::into)
    }
}

impl Display for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Borrowed(m) => Display::fmt(m, f),
            Payload::Text(s) => f.write_str(s),
        }
    }
}

/**
A log record.

Records live only for the duration of one [`Sink::log`](crate::Sink::log) call.  A
sink that keeps records around must copy what it needs out of them; see
[`InMemorySink`](crate::InMemorySink) for an example.
*/
#[derive(Clone)]
pub struct LogRecord<'a> {
    logger: &'a str,
    level: Level,
    payload: Payload<'a>,
    failure: Option<&'a Failure>,
    caller: Option<Caller>,
    location: &'static Location<'static>,
}

impl<'a> LogRecord<'a> {
    /// Creates a record located at the caller of this function.
    #[track_caller]
    pub fn new(logger: &'a str, level: Level, message: Message<'a>) -> Self {
        Self {
            logger,
            level,
            payload: Payload::Borrowed(message),
            failure: None,
            caller: None,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub(crate) fn formatted(logger: &'a str, level: Level, text: String) -> Self {
        Self {
            payload: Payload::Text(text),
            ..Self::new(logger, level, Message::Empty)
        }
    }

    pub fn with_failure(mut self, failure: Option<&'a Failure>) -> Self {
        self.failure = failure;
        self
    }

    pub fn with_caller(mut self, caller: Option<Caller>) -> Self {
        self.caller = caller;
        self
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = location;
        self
    }

    /// Name of the [`Log`](crate::Log) that emitted the record.
    pub fn logger(&self) -> &'a str {
        self.logger
    }

    pub fn declaring(&self) -> &'static str {
        DECLARING_IDENTITY
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The message, rendered lazily through `Display`.
    pub fn message(&self) -> &dyn Display {
        &self.payload
    }

    /// The message if it was already formatted by the emitting call.
    pub fn formatted_message(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(s) => Some(s),
            Payload::Borrowed(Message::Str(s)) => Some(s),
            Payload::Borrowed(Message::Empty) => Some(""),
            Payload::Borrowed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&'a Failure> {
        self.failure
    }

    /// Caller identity captured by the self-identifying emission operations.
    pub fn caller(&self) -> Option<Caller> {
        self.caller
    }

    /// Source location of the emitting call.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl Debug for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("logger", &self.logger)
            .field("level", &self.level)
            .field("message", &self.formatted_message())
            .field("failure", &self.failure)
            .field("caller", &self.caller)
            .field("location", &self.location)
            .finish()
    }
}

impl Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.level, self.logger, self.payload)
    }
}

/*
Boilerplate notes for LogRecord:

- Clone: cheap for borrowed payloads, copies the text for formatted ones.
- PartialEq/Eq/Hash: not implemented; borrowed Display payloads have no equality.
- Default: not implemented; a record without a logger name or location makes no sense.
- Send/Sync: not implemented; `dyn Display` payloads are not required to be thread-safe
  and records never leave the emitting thread.
*/
