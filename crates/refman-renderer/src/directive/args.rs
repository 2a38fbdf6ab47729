//! Parsed directive arguments.

use std::collections::HashMap;
use std::fmt::Write;

/// Arguments attached to a directive occurrence.
///
/// The bracket part becomes [`content`](Self::content). The brace part
/// is tokenized into an optional `#id`, `.class` entries, and
/// `key="value"` pairs. Bare tokens without a prefix or `=` are
/// treated as classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Content from the `[...]` part, empty when absent.
    pub content: String,
    /// Identifier from a `#id` token.
    pub id: Option<String>,
    /// Classes from `.class` and bare tokens, in source order.
    pub classes: Vec<String>,
    /// Key/value options from `key="value"` tokens.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse the bracket content and brace attribute string.
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Self::default()
        };
        for token in tokenize(attrs_str) {
            if let Some(id) = token.strip_prefix('#') {
                args.id = Some(id.to_owned());
            } else if let Some(class) = token.strip_prefix('.') {
                args.classes.push(class.to_owned());
            } else if let Some((key, value)) = token.split_once('=') {
                args.attrs
                    .insert(key.to_owned(), unquote(value).to_owned());
            } else if !token.is_empty() {
                args.classes.push(token);
            }
        }
        args
    }

    /// Look up a key/value option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Look up an option and parse it as an unsigned integer.
    #[must_use]
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|value| value.trim().parse().ok())
    }

    /// Look up an option holding a list of unsigned integers separated
    /// by spaces or commas. Returns `None` when the option is missing,
    /// empty, or contains a value that does not parse.
    #[must_use]
    pub fn get_usize_list(&self, key: &str) -> Option<Vec<usize>> {
        let raw = self.get(key)?;
        let values = raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse().ok())
            .collect::<Option<Vec<usize>>>()?;
        if values.is_empty() { None } else { Some(values) }
    }

    /// Rebuild the source syntax for passthrough of unhandled
    /// directives. Attribute keys are emitted in sorted order so the
    /// output is deterministic.
    #[must_use]
    pub fn to_syntax(&self) -> String {
        let mut syntax = String::new();
        if !self.content.is_empty() {
            let _ = write!(syntax, "[{}]", self.content);
        }
        let mut parts = Vec::new();
        if let Some(id) = &self.id {
            parts.push(format!("#{id}"));
        }
        for class in &self.classes {
            parts.push(format!(".{class}"));
        }
        let mut keys: Vec<&String> = self.attrs.keys().collect();
        keys.sort();
        for key in keys {
            parts.push(format!("{key}=\"{}\"", self.attrs[key]));
        }
        if !parts.is_empty() {
            let _ = write!(syntax, "{{{}}}", parts.join(" "));
        }
        syntax
    }
}

/// Split an attribute string into tokens, keeping quoted values
/// (including any spaces inside them) attached to their key.
fn tokenize(attrs_str: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in attrs_str.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Strip one layer of surrounding double quotes.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
