//! Renders a [`SafeValue`] tree as a `@{ }` / `@( )` configuration document.
//!
//! ```text
//! @{
//!     Key1 = 'Value1'
//!     Nested = @{
//!         Inner = 'X'
//!     }
//!     List = @('a', 'b', 'c')
//! }
//! ```
//!
//! Every leaf is a single-quoted literal with embedded quotes doubled. Keys
//! are bare when they are plain identifiers and quoted otherwise.

use super::safe::SafeValue;
use crate::options::DEFAULT_INDENT_WIDTH;

/// Text renderer for snapshot trees. Pure; performs no I/O.
#[derive(Clone, Copy, Debug)]
pub struct Encoder {
    indent_width: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

impl Encoder {
    /// Creates an encoder indenting each level by `indent_width` spaces.
    pub const fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Renders `tree`. No trailing newline is added.
    pub fn encode(&self, tree: &SafeValue) -> String {
        let mut out = String::new();
        self.write_value(&mut out, tree, 0);
        out
    }

    fn write_value(&self, out: &mut String, value: &SafeValue, level: usize) {
        match value {
            SafeValue::Scalar(text) => write_quoted(out, text),
            SafeValue::Sentinel(sentinel) => write_quoted(out, sentinel.marker()),
            SafeValue::Mapping(entries) => self.write_mapping(out, entries, level),
            SafeValue::Sequence(items) => self.write_sequence(out, items, level),
        }
    }

    fn write_mapping(&self, out: &mut String, entries: &[(String, SafeValue)], level: usize) {
        if entries.is_empty() {
            out.push_str("@{}");
            return;
        }
        out.push_str("@{\n");
        for (key, value) in entries {
            self.write_indent(out, level + 1);
            write_key(out, key);
            out.push_str(" = ");
            self.write_value(out, value, level + 1);
            out.push('\n');
        }
        self.write_indent(out, level);
        out.push('}');
    }

    fn write_sequence(&self, out: &mut String, items: &[SafeValue], level: usize) {
        if items.is_empty() {
            out.push_str("@()");
            return;
        }
        if items.iter().all(is_leaf) {
            out.push_str("@(");
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                self.write_value(out, item, level);
            }
            out.push(')');
            return;
        }
        out.push_str("@(\n");
        let last = items.len() - 1;
        for (index, item) in items.iter().enumerate() {
            self.write_indent(out, level + 1);
            self.write_value(out, item, level + 1);
            if index < last {
                out.push(',');
            }
            out.push('\n');
        }
        self.write_indent(out, level);
        out.push(')');
    }

    fn write_indent(&self, out: &mut String, level: usize) {
        out.extend(std::iter::repeat(' ').take(level * self.indent_width));
    }
}

/// Renders `tree` with the default four-space indent.
pub fn encode(tree: &SafeValue) -> String {
    Encoder::default().encode(tree)
}

fn is_leaf(value: &SafeValue) -> bool {
    matches!(value, SafeValue::Scalar(_) | SafeValue::Sentinel(_))
}

/// Whether `key` can be written without quotes: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
}
