// SPDX-License-Identifier: MIT OR Apache-2.0
use proc_macro::{Delimiter, TokenStream, TokenTree};

fn compile_error(message: &str) -> TokenStream {
    format!("compile_error!({:?});", message).parse().unwrap()
}

/// Reads the optional label argument of `#[log_scope("label")]`.
///
/// Returns `Ok(None)` for a bare `#[log_scope]`, `Ok(Some(literal))` for a single
/// string literal, and an error message for anything else.
fn parse_label(attr: TokenStream) -> Result<Option<String>, &'static str> {
    let mut tokens = attr.into_iter();
    let label = match tokens.next() {
        None => return Ok(None),
        Some(TokenTree::Literal(literal)) => {
            let text = literal.to_string();
            if !(text.starts_with('"') || text.starts_with("r\"") || text.starts_with("r#")) {
                return Err("#[log_scope] expects a string literal label");
            }
            text
        }
        Some(_) => return Err("#[log_scope] expects a string literal label"),
    };
    if tokens.next().is_some() {
        return Err("#[log_scope] takes at most one label");
    }
    Ok(Some(label))
}

/// Implementation of the `#[log_scope]` attribute macro.
///
/// Wraps the function body so that a context scope is pushed on entry and popped
/// on every exit path, including unwinding.
pub fn log_scope_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label = match parse_label(attr) {
        Ok(label) => label,
        Err(message) => return compile_error(message),
    };

    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    let mut fn_name: Option<String> = None;
    let mut is_async = false;
    let mut body_idx: Option<usize> = None;

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            TokenTree::Ident(ident) if fn_name.is_none() && ident.to_string() == "async" => {
                is_async = true;
            }
            TokenTree::Ident(ident) if fn_name.is_none() && ident.to_string() == "fn" => {
                if let Some(TokenTree::Ident(name)) = tokens.get(i + 1) {
                    fn_name = Some(name.to_string());
                }
            }
            TokenTree::Group(g) if fn_name.is_some() && g.delimiter() == Delimiter::Brace => {
                body_idx = Some(i);
            }
            _ => {}
        }
        i += 1;
    }

    let Some(fn_name) = fn_name else {
        return compile_error("#[log_scope] can only be applied to functions");
    };
    if is_async {
        // the scope handle is thread-bound and would be held across await points
        return compile_error(
            "#[log_scope] cannot wrap an async fn; wrap the future in tierlog::context::ApplyContext instead",
        );
    }
    let Some(body_idx) = body_idx else {
        return compile_error("#[log_scope] requires a function with a body");
    };

    let original_body = if let TokenTree::Group(g) = &tokens[body_idx] {
        g.stream()
    } else {
        return compile_error("expected function body");
    };

    let label_expr = match label {
        Some(literal) => literal,
        None => format!(r#"concat!(module_path!(), "::", "{fn_name}")"#),
    };

    let new_body_src = format!(
        r#"{{
            let _tierlog_scope = tierlog::context::push_context(::core::option::Option::Some({label_expr}));
            {{ {original_body} }}
        }}"#
    );

    let new_body: TokenStream = new_body_src.parse().unwrap();
    let new_body_group = new_body.into_iter().next().unwrap();

    tokens[body_idx] = new_body_group;

    tokens.into_iter().collect()
}
