//! LaTeX escaping for user-supplied text.
//!
//! Single pass over the input, so a substitute (e.g. the braces of
//! `\textbackslash{}`) is never escaped a second time.

use serde_json::Value;

use crate::models::loose::Text;

/// Escapes `text` so it can sit in any LaTeX text position.
///
/// - `\` → `\textbackslash{}`
/// - `& % $ # _ { }` → prefixed with `\`
/// - `~` `^` → `\~{}` `\^{}` (the empty group stops them accenting the next glyph)
/// - `[` `]` → `{[}` `{]}` so they never read as optional-argument delimiters
/// - control characters → a space, so user text cannot end a paragraph inside a macro argument
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\~{}"),
            '^' => out.push_str("\\^{}"),
            '[' => out.push_str("{[}"),
            ']' => out.push_str("{]}"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Escapes any JSON value, coercing non-strings first. Null and empty values yield `""`.
pub fn escape_value(value: &Value) -> String {
    escape_text(&Text::from_value(value))
}

/// Escapes a present `Text`; absent text yields `""`.
pub fn escape_text(text: &Text) -> String {
    text.get().map(escape).unwrap_or_default()
}

/// Escapes a present `Text`, keeping absence as `None`.
pub fn escape_opt(text: &Text) -> Option<String> {
    text.get().map(escape)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
