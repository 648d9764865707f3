// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safe runtime formatting.
//!
//! Format strings handed to the `*_format` emission operations are runtime values
//! (often read from configuration or resources), so they cannot be checked by
//! `format!`.  They use positional composite syntax:
//!
//! ```text
//! {index[,alignment][:spec]}
//! ```
//!
//! `{{` and `}}` are literal braces.  A positive alignment right-aligns the argument
//! in a field of that width, a negative one left-aligns it.  The `spec` is handed to
//! the [`FormatProvider`] untouched.
//!
//! Formatting here never fails and never panics.  Any problem (an index past the end
//! of the argument list, an unbalanced brace, an argument whose `Display` errors or
//! panics) makes the whole result the empty string.
//!
//! ```
//! use tierlog::format::safe_format;
//!
//! assert_eq!(safe_format(Some("{0} of {1}"), &[&3, &"7"]), "3 of 7");
//! assert_eq!(safe_format(Some("[{0,4}|{0,-4}]"), &[&1]), "[   1|1   ]");
//! assert_eq!(safe_format(Some("{{{0}}}"), &[&"x"]), "{x}");
//! assert_eq!(safe_format(Some("{2}"), &[&1]), "");
//! assert_eq!(safe_format(None, &[&1]), "");
//! ```

use std::fmt::{self, Display, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Renders one argument of a composite format.
///
/// Implement this to honor the `:spec` part of a placeholder, e.g. for
/// locale-specific number rendering.  Closures with the same signature
/// implement it too.
pub trait FormatProvider: Send + Sync {
    fn format_arg(&self, arg: &dyn Display, spec: Option<&str>, out: &mut String) -> fmt::Result;
}

impl<F> FormatProvider for F
where
    F: Fn(&dyn Display, Option<&str>, &mut String) -> fmt::Result + Send + Sync,
{
    fn format_arg(&self, arg: &dyn Display, spec: Option<&str>, out: &mut String) -> fmt::Result {
        self(arg, spec, out)
    }
}

/// The default provider: writes each argument with `Display` and ignores the spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Invariant;

impl FormatProvider for Invariant {
    fn format_arg(&self, arg: &dyn Display, _spec: Option<&str>, out: &mut String) -> fmt::Result {
        write!(out, "{}", arg)
    }
}

/// Formats with the [`Invariant`] provider.  Returns `""` on any failure.
pub fn safe_format(format: Option<&str>, args: &[&dyn Display]) -> String {
    safe_format_with(&Invariant, format, args)
}

/// Formats with the given provider.  Returns `""` on any failure.
pub fn safe_format_with(
    provider: &dyn FormatProvider,
    format: Option<&str>,
    args: &[&dyn Display],
) -> String {
    let Some(format) = format.filter(|f| !f.is_empty()) else {
        return String::new();
    };
    catch_unwind(AssertUnwindSafe(|| compose(provider, format, args)))
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Field widths at or above this are rejected as malformed.
const MAX_ALIGNMENT: usize = 1_000_000;

/// Renders one value with `Display`, or `""` if it errors or panics.
pub(crate) fn render_display(value: &dyn Display) -> String {
    catch_unwind(AssertUnwindSafe(|| {
        let mut out = String::new();
        write!(out, "{}", value).map(|_| out)
    }))
    .ok()
    .and_then(Result::ok)
    .unwrap_or_default()
}

fn compose(provider: &dyn FormatProvider, format: &str, args: &[&dyn Display]) -> Option<String> {
    let bytes = format.as_bytes();
    let mut out = String::with_capacity(format.len() + 16);
    let mut literal_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                out.push_str(&format[literal_start..i]);
                if bytes.get(i + 1) == Some(&b'{') {
                    out.push('{');
                    i += 2;
                } else {
                    let close = i + 1 + format[i + 1..].find('}')?;
                    write_item(provider, &format[i + 1..close], args, &mut out)?;
                    i = close + 1;
                }
                literal_start = i;
            }
            b'}' => {
                out.push_str(&format[literal_start..i]);
                if bytes.get(i + 1) != Some(&b'}') {
                    return None;
                }
                out.push('}');
                i += 2;
                literal_start = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&format[literal_start..]);
    Some(out)
}

fn write_item(
    provider: &dyn FormatProvider,
    item: &str,
    args: &[&dyn Display],
    out: &mut String,
) -> Option<()> {
    if item.contains('{') {
        return None;
    }
    let (head, spec) = match item.split_once(':') {
        Some((head, spec)) => (head, Some(spec)),
        None => (item, None),
    };
    let (index, alignment) = match head.split_once(',') {
        Some((index, alignment)) => (index, Some(alignment.trim().parse::<i32>().ok()?)),
        None => (head, None),
    };
    let arg = args.get(index.trim().parse::<usize>().ok()?)?;

    let Some(alignment) = alignment else {
        return provider.format_arg(*arg, spec, out).ok();
    };
    let mut rendered = String::new();
    provider.format_arg(*arg, spec, &mut rendered).ok()?;
    let width = alignment.unsigned_abs() as usize;
    if width >= MAX_ALIGNMENT {
        return None;
    }
    let padding = width.saturating_sub(rendered.chars().count());
    if alignment >= 0 {
        out.extend(std::iter::repeat_n(' ', padding));
        out.push_str(&rendered);
    } else {
        out.push_str(&rendered);
        out.extend(std::iter::repeat_n(' ', padding));
    }
    Some(())
}
