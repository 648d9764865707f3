// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failures attached to log records.
//!
//! A [`Failure`] wraps any error together with the name of its concrete type, which
//! is what the exception-aware emission path prints in place of a full report.  It
//! also remembers whether the error is a cooperative cancellation signal; those are
//! expected and are logged as a bare kind name without the error attached.

use std::any::{TypeId, type_name};
use std::error::Error;
use std::fmt::{self, Display, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Summary used when the exception-aware path is called without a failure.
pub const MISUSED_FAILURE_CALL: &str = "tierlog log_failure called without a failure (failure is None)";

/// Summary text used in place of a message whose `Display` failed.
pub const MESSAGE_FAILED: &str = "(log sys err) ex.Message failed";

/// Signals that an operation was cancelled cooperatively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, thiserror::Error)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// Signals that a blocked thread was interrupted so it could wind down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, thiserror::Error)]
#[error("thread was interrupted")]
pub struct Interrupted;

/// An error value carried by a log record.
///
/// ```
/// use tierlog::failure::{Cancelled, Failure};
///
/// let parse = "x".parse::<u8>().unwrap_err();
/// let failure = Failure::new(parse);
/// assert_eq!(failure.kind(), "ParseIntError");
/// assert_eq!(failure.summary(), "ParseIntError: invalid digit found in string");
///
/// let cancelled = Failure::new(Cancelled);
/// assert!(cancelled.is_cancellation());
/// assert_eq!(cancelled.summary(), "Cancelled");
/// ```
#[derive(Debug)]
pub struct Failure {
    error: Box<dyn Error + Send + Sync + 'static>,
    kind: &'static str,
    cancellation: bool,
}

impl Failure {
    /// Wraps an error.  [`Cancelled`] and [`Interrupted`] are recognized as cancellation signals.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let id = TypeId::of::<E>();
        Self {
            error: Box::new(error),
            kind: short_type_name(type_name::<E>()),
            cancellation: id == TypeId::of::<Cancelled>() || id == TypeId::of::<Interrupted>(),
        }
    }

    /// Wraps an error that the caller knows to be a cancellation signal.
    pub fn cancellation<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            cancellation: true,
            ..Self::new(error)
        }
    }

    /// Replaces the kind name, e.g. when the concrete type was erased before wrapping.
    pub fn with_kind(self, kind: &'static str) -> Self {
        Self { kind, ..self }
    }

    /// Name of the wrapped error's concrete type, without module path or generics.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn is_cancellation(&self) -> bool {
        self.cancellation
    }

    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.error
    }

    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.error
    }

    /// The wrapped error's message.
    ///
    /// Errors when its `Display` implementation errors or panics.
    pub fn message(&self) -> Result<String, fmt::Error> {
        catch_unwind(AssertUnwindSafe(|| {
            let mut message = String::new();
            write!(message, "{}", self.error).map(|_| message)
        }))
        .unwrap_or(Err(fmt::Error))
    }

    /// One-line summary: the kind name alone for cancellation signals, otherwise
    /// `"<kind>: <message>"` with [`MESSAGE_FAILED`] standing in for an unreadable message.
    pub fn summary(&self) -> String {
        if self.cancellation {
            return self.kind.to_string();
        }
        let message = self
            .message()
            .unwrap_or_else(|_| MESSAGE_FAILED.to_string());
        format!("{}: {}", self.kind, message)
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for Failure {
    fn from(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        let cancellation = error.is::<Cancelled>() || error.is::<Interrupted>();
        let kind = if error.is::<Cancelled>() {
            "Cancelled"
        } else if error.is::<Interrupted>() {
            "Interrupted"
        } else {
            "Error"
        };
        Self {
            error,
            kind,
            cancellation,
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.error)
    }
}

/// The text logged by the exception-aware path for an optional failure.
pub(crate) fn summarize(failure: Option<&Failure>) -> String {
    match failure {
        None => MISUSED_FAILURE_CALL.to_string(),
        Some(failure) => failure.summary(),
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Unprintable;
    impl Display for Unprintable {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }
    impl Error for Unprintable {}

    #[derive(Debug)]
    struct Panicky;
    impl Display for Panicky {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("message accessor blew up")
        }
    }
    impl Error for Panicky {}

    #[derive(Debug, thiserror::Error)]
    #[error("wrapped {0}")]
    struct Wrapper<T: fmt::Debug + Display>(T);

    #[test]
    fn kind_is_the_short_type_name() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(short_type_name("a::b::Wrapper<core::num::ParseIntError>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(Failure::new(Wrapper(3)).kind(), "Wrapper");
        assert_eq!(Failure::new(Wrapper(3)).summary(), "Wrapper: wrapped 3");
    }

    #[test]
    fn unreadable_messages_fall_back() {
        assert_eq!(Failure::new(Unprintable).summary(), format!("Unprintable: {MESSAGE_FAILED}"));
        assert_eq!(Failure::new(Panicky).summary(), format!("Panicky: {MESSAGE_FAILED}"));
        assert!(Failure::new(Panicky).message().is_err());
    }

    #[test]
    fn cancellation_signals() {
        assert!(Failure::new(Cancelled).is_cancellation());
        assert!(Failure::new(Interrupted).is_cancellation());
        assert_eq!(Failure::new(Interrupted).summary(), "Interrupted");
        assert!(!Failure::new(Unprintable).is_cancellation());

        let io = std::io::Error::other("worker stopped");
        let explicit = Failure::cancellation(io);
        assert!(explicit.is_cancellation());
        assert_eq!(explicit.summary(), "Error");
    }

    #[test]
    fn boxed_errors_keep_cancellation() {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(Cancelled);
        let failure = Failure::from(boxed);
        assert!(failure.is_cancellation());
        assert_eq!(failure.summary(), "Cancelled");

        let boxed: Box<dyn Error + Send + Sync> = "plain text".into();
        let failure = Failure::from(boxed).with_kind("StringError");
        assert_eq!(failure.summary(), "StringError: plain text");
    }

    #[test]
    fn missing_failure_is_reported_as_misuse() {
        assert_eq!(summarize(None), MISUSED_FAILURE_CALL);
    }
}
