// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core context stack implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    pub(crate) static STACK: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Pushes `label` onto the current thread's context stack.
///
/// `None` pushes nothing and returns an inert handle, so call sites can wrap a
/// scope unconditionally whether or not they have a label.
///
/// # Examples
///
/// ```rust
/// use tierlog::context::{self, push_context};
///
/// let request_id: Option<String> = Some("req-17".to_string());
/// {
///     let _scope = push_context(request_id.as_deref());
///     assert_eq!(context::render().as_deref(), Some("req-17"));
/// }
/// assert_eq!(context::depth(), 0);
///
/// let _inert = push_context(None);
/// assert_eq!(context::depth(), 0);
/// ```
pub fn push_context(label: Option<&str>) -> ContextScope {
    match label {
        Some(label) => push(label),
        None => ContextScope::inert(),
    }
}

/// Pushes a label that is always present.
///
/// # Examples
///
/// ```rust
/// use tierlog::context;
///
/// let outer = context::push(format!("job-{}", 4));
/// let inner = context::push("step-1");
/// assert_eq!(context::snapshot(), ["job-4", "step-1"]);
/// drop(inner);
/// drop(outer);
/// ```
pub fn push(label: impl Into<String>) -> ContextScope {
    let label = label.into();
    let depth = STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(label);
        stack.len()
    });
    ContextScope {
        depth: Some(depth),
        _thread: PhantomData,
    }
}

/// A pushed context label.
///
/// Dropping the handle (or calling [`dispose`](ContextScope::dispose)) pops the label
/// again.  Disposal is idempotent.
///
/// The handle records the stack depth its label was pushed at.  Disposing it
/// truncates the stack back to the depth it had before the push, which also removes
/// any labels pushed after it that are still on the stack.
///
/// A handle whose label was already removed that way is not inert: if the stack has
/// since grown back to its depth, disposing it truncates the newer labels too.
/// Dispose handles in reverse order of creation to avoid this.
///
/// Handles are bound to the thread that created them and are neither `Send` nor `Sync`.
#[derive(Debug)]
#[must_use = "the context label is popped as soon as the scope is dropped"]
pub struct ContextScope {
    depth: Option<usize>,
    _thread: PhantomData<*const ()>,
}

impl ContextScope {
    fn inert() -> Self {
        Self {
            depth: None,
            _thread: PhantomData,
        }
    }

    /// Whether this handle still owns a label on the stack.
    pub fn is_active(&self) -> bool {
        self.depth.is_some()
    }

    /// Pops this scope's label.  Subsequent calls do nothing.
    pub fn dispose(&mut self) {
        let Some(depth) = self.depth.take() else {
            return;
        };
        // the thread-local may already be gone during thread teardown
        let _ = STACK.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.len() >= depth {
                stack.truncate(depth - 1);
            }
        });
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// A detached context stack.
///
/// Used to carry a stack into a cooperative task with
/// [`ApplyContext`](super::ApplyContext), or to start a thread with its parent's labels.
///
/// # Examples
///
/// ```rust
/// use tierlog::context::{self, ContextStack};
///
/// let _scope = context::push("parent");
/// let captured = ContextStack::capture();
/// std::thread::spawn(move || {
///     assert_eq!(context::depth(), 0);
///     captured.install();
///     assert_eq!(context::snapshot(), ["parent"]);
/// })
/// .join()
/// .unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContextStack {
    pub(crate) labels: Vec<String>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current thread's stack.
    pub fn capture() -> Self {
        Self {
            labels: super::snapshot(),
        }
    }

    /// Replaces the current thread's stack with this one.
    pub fn install(self) {
        STACK.with(|stack| *stack.borrow_mut() = self.labels);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Exchanges this value with the current thread's stack.
    pub(crate) fn swap_with_current(&mut self) {
        let _ = STACK.try_with(|stack| std::mem::swap(&mut *stack.borrow_mut(), &mut self.labels));
    }
}

impl From<Vec<String>> for ContextStack {
    fn from(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl<S: Into<String>> FromIterator<S> for ContextStack {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}
