//! Adapter for the Syntect syntax highlighter plugin.

use std::collections::HashMap;

use crate::adapters::SyntaxHighlighterAdapter;
use crate::html::escape;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Syntect syntax highlighter plugin.
///
/// Code blocks are highlighted with inline styles from one of syntect's
/// default themes, such as `"base16-ocean.dark"`. An unknown theme leaves
/// code unhighlighted.
#[derive(Debug)]
pub struct SyntectAdapter {
    theme: String,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntectAdapter {
    /// Construct a new `SyntectAdapter` object and set the syntax highlighting theme.
    pub fn new(theme: &str) -> Self {
        SyntectAdapter {
            theme: theme.to_string(),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn syntax(&self, lang: Option<&str>, code: &str) -> &SyntaxReference {
        lang.filter(|l| !l.is_empty())
            .and_then(|l| {
                self.syntax_set
                    .find_syntax_by_token(l)
                    .or_else(|| self.syntax_set.find_syntax_by_name(l))
            })
            .or_else(|| self.syntax_set.find_syntax_by_first_line(code))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Highlighted HTML, with syntect's own `<pre>` wrapper.
    fn highlighted(&self, lang: Option<&str>, code: &str) -> Option<String> {
        let theme = self.theme_set.themes.get(&self.theme)?;
        let syntax = self.syntax(lang, code);
        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(html) => Some(html),
            Err(err) => {
                log::warn!("syntax highlighting failed: {}", err);
                None
            }
        }
    }
}

impl SyntaxHighlighterAdapter for SyntectAdapter {
    fn highlight(&self, lang: Option<&str>, code: &str) -> String {
        match self.highlighted(lang, code) {
            Some(html) => remove_pre_tag(&html).to_string(),
            None => escape(code, true).into_owned(),
        }
    }

    fn build_pre_tag(&self, attributes: &HashMap<String, String>) -> String {
        let mut pre_attributes = self
            .highlighted(None, "")
            .map(|html| extract_attributes_from_tag(&html))
            .unwrap_or_default();

        for (attr, val) in attributes {
            match pre_attributes.iter().position(|(k, _)| k == attr) {
                Some(ix) => pre_attributes[ix].1 = format!("{} {}", pre_attributes[ix].1, val),
                None => pre_attributes.push((attr.clone(), val.clone())),
            }
        }

        build_opening_tag("pre", &pre_attributes)
    }

    fn build_code_tag(&self, attributes: &HashMap<String, String>) -> String {
        let mut attributes: Vec<_> = attributes.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        attributes.sort();
        build_opening_tag("code", &attributes)
    }
}

/// Drops syntect's `<pre ...>` and `</pre>`, keeping the highlighted spans.
fn remove_pre_tag(html: &str) -> &str {
    let body = match html.strip_prefix("<pre") {
        Some(rest) => rest.find('>').map_or(html, |ix| &rest[ix + 1..]),
        None => html,
    };
    let body = body.trim_end_matches('\n');
    body.strip_suffix("</pre>").unwrap_or(body)
}

/// The `key="value"` pairs of the first tag in `html`, in order.
fn extract_attributes_from_tag(html: &str) -> Vec<(String, String)> {
    let mut attributes = vec![];
    let Some(end) = html.find('>') else {
        return attributes;
    };
    let mut rest = html[..end].split_once(char::is_whitespace).map_or("", |(_, r)| r);

    while let Some(eq) = rest.find("=\"") {
        let key = rest[..eq].trim();
        let value_start = eq + 2;
        let Some(len) = rest[value_start..].find('"') else {
            break;
        };
        attributes.push((key.to_string(), rest[value_start..value_start + len].to_string()));
        rest = &rest[value_start + len + 1..];
    }
    attributes
}

fn build_opening_tag(tag: &str, attributes: &[(String, String)]) -> String {
    let mut out = format!("<{}", tag);
    for (key, value) in attributes {
        out += &format!(" {}=\"{}\"", key, value);
    }
    out.push('>');
    out
}
