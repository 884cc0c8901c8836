//! Convenience HCL serialiser.
//!
//! Emits an object as `key = value` lines for scalar children, `[section]`
//! headers for object children and `[[section]]` header runs for lists of
//! objects. The output is meant for human consumption and simple re-reading
//! of flat documents; nested sections do not round-trip through the parser.

use std::fmt::{self, Write};

use crate::error::{Error, Result};
use crate::value::Value;

impl Value {
    /// Write the value as HCL text.
    ///
    /// `key_prefix` seeds the dotted section path (pass `""` at the top).
    /// `indent` is the starting indent level; `None` writes flat. Writing a
    /// `Null` anywhere in the tree is an error.
    pub fn write<W: Write>(&self, out: &mut W, key_prefix: &str, indent: Option<usize>) -> Result<()> {
        match self {
            Value::Null => Err(Error::Type {
                expected: "a writable value",
                actual: "null",
            }),
            Value::Bool(b) => {
                out.write_str(if *b { "true" } else { "false" })?;
                Ok(())
            }
            Value::Int(n) => {
                write!(out, "{n}")?;
                Ok(())
            }
            Value::Double(d) => {
                // Fixed-point with a trailing decimal: 1.000000, not 1.
                write!(out, "{d:.6}")?;
                Ok(())
            }
            Value::String(s) => {
                write!(out, "\"{}\"", escape_string(s))?;
                Ok(())
            }
            Value::List(items) => {
                out.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    item.write(out, key_prefix, None)?;
                }
                out.write_char(']')?;
                Ok(())
            }
            Value::Object(map) => {
                let child_indent = indent.map(|n| n + 1);

                for (key, child) in map {
                    if matches!(child, Value::Object(_)) || is_object_list(child) {
                        continue;
                    }
                    write!(out, "{}{} = ", spaces(indent), escape_key(key))?;
                    child.write(out, key_prefix, child_indent)?;
                    out.write_char('\n')?;
                }

                for (key, child) in map {
                    if matches!(child, Value::Object(_)) {
                        let key_path = join_key(key_prefix, key);
                        write!(out, "\n{}[{}]\n", spaces(indent), key_path)?;
                        child.write(out, &key_path, child_indent)?;
                    }
                    if let Value::List(items) = child {
                        if is_object_list(child) {
                            let key_path = join_key(key_prefix, key);
                            for item in items {
                                write!(out, "\n{}[[{}]]\n", spaces(indent), key_path)?;
                                item.write(out, &key_path, child_indent)?;
                            }
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Value {
    /// Renders through the convenience writer with no indentation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, "", None).map_err(|_| fmt::Error)
    }
}

/// A list whose first element is an object is emitted as `[[section]]`
/// headers rather than inline.
fn is_object_list(value: &Value) -> bool {
    match value {
        Value::List(items) => items.first().is_some_and(|v| matches!(v, Value::Object(_))),
        _ => false,
    }
}

fn spaces(indent: Option<usize>) -> String {
    match indent {
        Some(n) => " ".repeat(n),
        None => String::new(),
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    let escaped = escape_key(key);
    if prefix.is_empty() {
        escaped
    } else {
        format!("{prefix}.{escaped}")
    }
}

/// Keys matching `[A-Za-z0-9_-]+` are emitted bare; all others are quoted
/// with `\` and `"` escaped.
fn escape_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        return key.to_string();
    }

    let mut escaped = String::with_capacity(key.len() + 2);
    escaped.push('"');
    for c in key.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('"');
    escaped
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}
