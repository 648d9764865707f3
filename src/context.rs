// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped diagnostic context.
//!
//! Each thread keeps a stack of text labels.  Code tags a span of execution by
//! pushing a label and holding the returned [`ContextScope`]; every record emitted
//! while the scope is alive can then be correlated by the labels on the stack.
//!
//! The emitting side never reads the stack.  Sinks and renderers do, through
//! [`snapshot`], [`depth`] and [`render`].
//!
//! # Thread-local stacks
//!
//! ```rust
//! use tierlog::context;
//!
//! fn handle(request_id: &str) {
//!     let _request = context::push(request_id);
//!     for step in ["parse", "apply"] {
//!         let _step = context::push(step);
//!         assert_eq!(context::depth(), 2);
//!     }
//!     assert_eq!(context::render().as_deref(), Some(request_id));
//! }
//!
//! handle("req-1");
//! assert_eq!(context::render(), None);
//! ```
//!
//! Labels are popped when the scope is dropped, so they are released on every exit
//! path including `?` returns and unwinding.
//!
//! # Task-local stacks
//!
//! Async tasks share threads.  Wrap a task's future in [`ApplyContext`] to give it a
//! stack of its own:
//!
//! ```rust
//! use tierlog::context::{ApplyContext, ContextStack};
//! # async fn serve() {}
//!
//! # async fn example() {
//! let task = ApplyContext::new(ContextStack::from(vec!["conn-7".to_string()]), serve());
//! task.await;
//! # }
//! ```
//!
//! # Functions
//!
//! The [`log_scope`](crate::log_scope) attribute wraps a whole function body in a scope.

mod apply_context;
mod stack;


pub use apply_context::ApplyContext;
pub use stack::{ContextScope, ContextStack, push, push_context};

use stack::STACK;

/// Copies the current thread's labels, outermost first.
pub fn snapshot() -> Vec<String> {
    STACK
        .try_with(|stack| stack.borrow().clone())
        .unwrap_or_default()
}

/// Number of labels on the current thread's stack.
pub fn depth() -> usize {
    STACK.try_with(|stack| stack.borrow().len()).unwrap_or(0)
}

/// The labels joined by single spaces, or `None` when the stack is empty.
pub fn render() -> Option<String> {
    STACK
        .try_with(|stack| {
            let stack = stack.borrow();
            if stack.is_empty() {
                None
            } else {
                Some(stack.join(" "))
            }
        })
        .ok()
        .flatten()
}

/// Empties the current thread's stack.
///
/// For threads that are reused between unrelated jobs.  Drop outstanding scope
/// handles first; a handle disposed after the stack has grown past its depth again
/// would pop the newer labels.
pub fn clear() {
    let _ = STACK.try_with(|stack| stack.borrow_mut().clear());
}
