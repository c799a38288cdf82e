use std::fmt::{self, Write as _};

use super::core::Value;

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Str(v) => format!("\"{}\"", escape_str(v)),
        Value::Record(fields) => {
            if fields.is_empty() {
                return "{}".to_string();
            }
            let inner = fields
                .iter()
                .map(|field| format!("{} = {}", field.name, format_value(&field.value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{inner}}}")
        }
        Value::Variant(variant) => {
            format!("<<{} = {}>>", variant.tag, format_value(&variant.payload))
        }
        Value::Vector(items) => {
            let inner = items.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{inner}]")
        }
        Value::Continuation(_) | Value::Halt | Value::Function(_) | Value::FunctionGroup(_) => {
            "<function>".to_string()
        }
        Value::Error(message) => format!("<error: {message}>"),
    }
}

/// Escapes `text` for display inside double quotes. Control characters
/// without a named escape are written as three-digit octal.
pub fn escape_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\{:03o}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape_str`]. Returns `None` for a dangling or unknown
/// escape.
pub fn unescape_str(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = match chars.next()? {
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{c}',
            'r' => '\r',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            first @ '0'..='7' => {
                let mut code = first.to_digit(8)?;
                for _ in 0..2 {
                    let digit = chars.next()?.to_digit(8)?;
                    code = code * 8 + digit;
                }
                char::from_u32(code)?
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}
