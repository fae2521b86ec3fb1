// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! String interpolation.

use crate::env::Scope;
use crate::reify::reify;

use super::{evaluate, EvalError};

/// Expand a double-quoted string.
///
/// Each `{expr}` is parsed, evaluated in `scope` and replaced by its text.
/// Braces nest, so `{ {a: 1}->a }` works. `\{` is a literal brace; an
/// empty or unclosed `{` is copied as written, and so is a backslash
/// before anything that is not a known escape.
pub(super) fn interpolate(text: &str, scope: &Scope) -> Result<String, EvalError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, c @ ('{' | '}' | '\\' | '"'))) => out.push(c),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '{' => match closing_brace(&text[i + 1..]) {
                Some(len) if len > 0 => {
                    let source = &text[i + 1..i + 1 + len];
                    tracing::trace!(fragment = source, "interpolate");
                    let node = virsh_parser::parse(source)?;
                    let value = reify(&evaluate(&node, scope, true)?)?;
                    out.push_str(&value.to_string());
                    // Skip the expression and its closing brace.
                    while chars.next_if(|&(j, _)| j <= i + 1 + len).is_some() {}
                }
                _ => out.push('{'),
            },
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Byte length of the expression before the `}` that closes an already
/// opened brace. Quoted strings inside are skipped.
fn closing_brace(rest: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') if depth == 0 => return Some(i),
            (None, '}') => depth -= 1,
            (None, _) => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_matching_brace() {
        assert_eq!(closing_brace("name}"), Some(4));
        assert_eq!(closing_brace("{a: 1}->a} rest"), Some(9));
        assert_eq!(closing_brace("'}'}"), Some(3));
        assert_eq!(closing_brace("open"), None);
    }

    #[test]
    fn escapes_and_unclosed_braces() {
        let scope = Scope::new();
        assert_eq!(interpolate("a\\{b}\\n", &scope).unwrap(), "a{b}\n");
        assert_eq!(interpolate("x { y", &scope).unwrap(), "x { y");
        assert_eq!(interpolate("{}", &scope).unwrap(), "{}");
    }

    #[test]
    fn unknown_escapes_keep_their_backslash() {
        let scope = Scope::new();
        assert_eq!(interpolate("a\\qb {1 + 1}", &scope).unwrap(), "a\\qb 2");
        assert_eq!(interpolate("C:\\dir \\\\ \\\"", &scope).unwrap(), "C:\\dir \\ \"");
    }
}
