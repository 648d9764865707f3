// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform shims.
//!
//! - `Instant`/`Duration` come from `std::time` natively and from `web_time` on wasm.
//! - [`diagnostic`] is the low-level side channel the library uses to report on itself.
//!   It never routes through a [`Sink`](crate::Sink), so a misbehaving sink cannot
//!   recurse into it.

use std::fmt::Arguments;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};

/// Writes one line to the diagnostic channel (stderr, or the browser console on wasm).
///
/// Write failures are swallowed.
pub(crate) fn diagnostic(args: Arguments<'_>) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::io::Write;
        let mut lock = std::io::stderr().lock();
        let _ = writeln!(lock, "tierlog: {}", args);
    }
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&format!("tierlog: {}", args).into());
    }
}

/// A printable name for the current thread: its name if it has one, otherwise its id.
pub(crate) fn thread_label() -> String {
    let current = std::thread::current();
    match current.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", current.id()),
    }
}
