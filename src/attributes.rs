//! The `{.class #id key=value}` attribute block syntax.
//!
//! [`AttributeBuilder`] knows nothing about markdown: the attribute plugins
//! hand it the body of a `{...}` block and ask it for an HTML attribute
//! string.
//!
//! ```
//! # use markdownmaster::AttributeBuilder;
//! let mut attrs = AttributeBuilder::parse(".big .red #Main-Title data-x='1'");
//! attrs.set("href", "/docs");
//! assert_eq!(
//!     attrs.to_string(),
//!     "class=\"big red\" id=\"main-title\" data-x='1' href=\"/docs\""
//! );
//! ```

use smallvec::SmallVec;
use std::fmt;

/// The values recorded for one attribute key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    /// Values in the order they were given.
    pub values: SmallVec<[String; 1]>,
    /// The quote character the value was written with, if it was quoted.
    pub quote: Option<char>,
}

impl AttributeValue {
    /// All values joined by single spaces.
    pub fn joined(&self) -> String {
        self.values.join(" ")
    }
}

/// An ordered map of HTML attributes.
///
/// Keys keep the position in which they were first seen. Repeated keys
/// accumulate values, except `id`, which keeps its first value only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBuilder {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeBuilder {
    /// An empty set of attributes.
    pub fn new() -> Self {
        AttributeBuilder::default()
    }

    /// Parses the body of an attribute block.
    pub fn parse(body: &str) -> Self {
        let mut builder = AttributeBuilder::new();
        builder.load_string(body);
        builder
    }

    /// Parses the body of an attribute block into this builder.
    ///
    /// Pairs are separated by unquoted whitespace. The first unquoted `=` of
    /// a pair splits key from value; values may be wrapped in single or
    /// double quotes. Unkeyed `.name` and `#name` stand for `class` and `id`.
    pub fn load_string(&mut self, body: &str) {
        let mut key: Option<String> = None;
        let mut buffer = String::new();
        let mut in_quote: Option<char> = None;
        let mut quote: Option<char> = None;

        for c in body.chars() {
            if let Some(q) = in_quote {
                if c == q {
                    in_quote = None;
                } else {
                    buffer.push(c);
                }
                continue;
            }

            match c {
                '"' | '\'' => {
                    in_quote = Some(c);
                    quote = Some(c);
                }
                '=' if key.is_none() && !buffer.is_empty() => {
                    key = Some(std::mem::take(&mut buffer));
                }
                c if c.is_whitespace() => {
                    let value = std::mem::take(&mut buffer);
                    self.add_attribute(key.take(), &value, quote.take());
                }
                c => buffer.push(c),
            }
        }

        self.add_attribute(key, &buffer, quote);
    }

    /// Records one parsed pair. Unkeyed values must use the `.` or `#`
    /// shorthand; anything else is dropped with a warning.
    pub fn add_attribute(&mut self, key: Option<String>, value: &str, quote: Option<char>) {
        let (key, value) = match key {
            Some(key) => (key, value),
            None if value.is_empty() => return,
            None => {
                if let Some(class) = value.strip_prefix('.') {
                    ("class".to_string(), class)
                } else if let Some(id) = value.strip_prefix('#') {
                    ("id".to_string(), id)
                } else {
                    log::warn!("dropping malformed attribute `{}`", value);
                    return;
                }
            }
        };

        if key == "id" {
            if self.get("id").is_some() {
                return;
            }
            let id = sanitize_id(value);
            if id.is_empty() {
                log::warn!("dropping empty id from attribute `{}`", value);
                return;
            }
            self.entries.push((
                key,
                AttributeValue {
                    values: SmallVec::from_elem(id, 1),
                    quote,
                },
            ));
            return;
        }

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                existing.values.push(value.to_string());
                if quote.is_some() {
                    existing.quote = quote;
                }
            }
            None => self.entries.push((
                key,
                AttributeValue {
                    values: SmallVec::from_elem(value.to_string(), 1),
                    quote,
                },
            )),
        }
    }

    /// Sets `key` to exactly `value`. An existing key keeps its position but
    /// loses its old values and quote style.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = AttributeValue {
            values: SmallVec::from_elem(value.into(), 1),
            quote: None,
        };
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// The values recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The values of `key` joined by spaces, or an empty string.
    pub fn get_value(&self, key: &str) -> String {
        self.get(key).map(AttributeValue::joined).unwrap_or_default()
    }

    /// Iterates over keys and values in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serializes to `key="value"` pairs separated by spaces.
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttributeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ix, (key, value)) in self.entries.iter().enumerate() {
            if ix > 0 {
                f.write_str(" ")?;
            }
            let q = value.quote.unwrap_or('"');
            write!(f, "{}={}{}{}", key, q, value.joined(), q)?;
        }
        Ok(())
    }
}

/// Turns an arbitrary string into a usable element id: lowercase ASCII
/// letters, digits and single dashes, never starting with a digit.
pub fn sanitize_id(value: &str) -> String {
    let mut id = String::with_capacity(value.len());
    for c in value.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
        } else if c == '_' {
            continue;
        } else if !id.ends_with('-') {
            id.push('-');
        }
    }

    let id = id.trim_matches('-');
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        format!("id-{}", id)
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_and_pairs() {
        let mut attrs =
            AttributeBuilder::parse(".purple .large is=\"cms-button\" title=\"Goes somewhere\"");
        attrs.set("href", "https://example.tld");
        assert_eq!(
            attrs.as_string(),
            "class=\"purple large\" is=\"cms-button\" title=\"Goes somewhere\" href=\"https://example.tld\""
        );
    }

    #[test]
    fn system_attributes_keep_position() {
        let mut attrs = AttributeBuilder::parse("href=/old .x");
        attrs.set("href", "/new");
        assert_eq!(attrs.as_string(), "href=\"/new\" class=\"x\"");
    }

    #[test]
    fn id_keeps_first_value_and_is_sanitized() {
        let attrs = AttributeBuilder::parse("#Hello_World!! #second");
        assert_eq!(attrs.get_value("id"), "helloworld");

        assert_eq!(sanitize_id("4th Detail Block"), "id-4th-detail-block");
        assert_eq!(sanitize_id("--Ünïcode  mess--"), "n-code-mess");
        assert_eq!(sanitize_id("a_-_b"), "a-b");
    }

    #[test]
    fn malformed_tokens_are_dropped() {
        let attrs = AttributeBuilder::parse("bare .ok  =nope");
        assert_eq!(attrs.as_string(), "class=\"ok\"");
    }

    #[test]
    fn quotes_protect_separators() {
        let attrs = AttributeBuilder::parse("data-x='a b=c' title=\"it's\"");
        assert_eq!(attrs.get_value("data-x"), "a b=c");
        assert_eq!(attrs.get_value("title"), "it's");
        assert_eq!(attrs.as_string(), "data-x='a b=c' title=\"it's\"");
    }

    #[test]
    fn first_equals_splits() {
        let attrs = AttributeBuilder::parse("data-eq=a=b");
        assert_eq!(attrs.get_value("data-eq"), "a=b");
    }

    #[test]
    fn serialization_is_idempotent() {
        for body in [
            ".a #b c=d",
            "title='single' data-x=\"double\"",
            "#7up style=color:red",
        ] {
            let once = AttributeBuilder::parse(body).as_string();
            let twice = AttributeBuilder::parse(&once).as_string();
            assert_eq!(once, twice, "{}", body);
        }
    }
}
