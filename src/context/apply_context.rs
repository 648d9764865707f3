// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task-local context stacks.

use std::future::Future;
use std::pin::Pin;
use std::task::Poll;

use super::stack::ContextStack;

/// A [`Future`] wrapper that gives a task its own context stack.
///
/// Async executors poll many tasks on one thread, and may move a task between
/// threads, so the thread-local stack alone would mix labels from unrelated tasks.
/// `ApplyContext` keeps a [`ContextStack`] with the future and installs it around
/// every poll.
///
/// # Examples
///
/// ```rust
/// use tierlog::context::{self, ApplyContext, ContextStack};
///
/// async fn handle() -> usize {
///     let _scope = context::push("handler");
///     context::depth()
/// }
///
/// # async fn example() {
/// let stack: ContextStack = ["conn-7"].into_iter().collect();
/// let depth = ApplyContext::new(stack, handle()).await;
/// assert_eq!(depth, 2);
/// # }
/// ```
///
/// # Implementation Details
///
/// `ApplyContext` implements [`Future`] by:
/// 1. Swapping its stack into the thread-local slot
/// 2. Polling the inner future
/// 3. Swapping the (possibly modified) stack back out, even if the poll panics
///
/// Scope handles created inside the future must be dropped inside it; a handle that
/// outlives the wrapper would pop whatever stack the thread holds at that point.
pub struct ApplyContext<F> {
    stack: ContextStack,
    future: F,
}

impl<F> ApplyContext<F> {
    /// Creates a new `ApplyContext` wrapper.
    pub fn new(stack: ContextStack, future: F) -> Self {
        Self { stack, future }
    }

    /// Wraps `future` with a copy of the current thread's stack.
    pub fn inherit(future: F) -> Self {
        Self::new(ContextStack::capture(), future)
    }

    /// The stack as of the end of the last poll.
    pub fn stack(&self) -> &ContextStack {
        &self.stack
    }
}

struct SwapBack<'a>(&'a mut ContextStack);

impl Drop for SwapBack<'_> {
    fn drop(&mut self) {
        self.0.swap_with_current();
    }
}

impl<F> Future for ApplyContext<F>
where
    F: Future,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<Self::Output> {
        //safety: the stack is never pinned, and the future is never moved out of self
        let (stack, fut) = unsafe {
            let d = self.get_unchecked_mut();
            (&mut d.stack, Pin::new_unchecked(&mut d.future))
        };
        stack.swap_with_current();
        let _restore = SwapBack(stack);
        fut.poll(cx)
    }
}
