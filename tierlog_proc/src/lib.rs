//SPDX-License-Identifier: MIT OR Apache-2.0

//! # tierlog procedural macros
//!
//! This crate provides the attribute macros re-exported by `tierlog`.
//!
//! ## `#[log_scope]`
//!
//! Tags every log record emitted while a function runs with a context label.
//!
//! ```rust
//! use tierlog::log_scope;
//!
//! #[log_scope]
//! fn handle_request() {
//!     // context stack is ["my_crate::handle_request"] here
//! }
//!
//! #[log_scope("billing")]
//! fn charge() {
//!     // context stack is ["billing"] here
//! }
//! # handle_request();
//! # charge();
//! ```
//!
//! The expansion is equivalent to
//!
//! ```rust
//! fn charge() {
//!     let _tierlog_scope = tierlog::context::push_context(Some("billing"));
//!     {
//!         // original body
//!     }
//! }
//! # charge();
//! ```
//!
//! `async fn` is rejected at compile time because the scope handle is bound to
//! the thread that created it.  Wrap the future in `tierlog::context::ApplyContext`
//! instead.

use proc_macro::TokenStream;

mod log_scope;

/// Pushes a context label for the duration of the annotated function.
///
/// With no argument the label is `module_path!()::fn_name`.  A single string literal
/// argument replaces it.
#[proc_macro_attribute]
pub fn log_scope(attr: TokenStream, item: TokenStream) -> TokenStream {
    log_scope::log_scope_impl(attr, item)
}
