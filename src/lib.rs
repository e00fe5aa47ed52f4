//! A Markdown to HTML compiler in the style of marked, with attribute blocks
//! for links, images and paragraphs.
//!
//! Compilation runs in two passes. The [lexer](parser::Lexer) turns the
//! source into a tree of [tokens](nodes::Token): block structure first,
//! then the inline content of every block in document order. The
//! [renderer](html::HtmlRenderer) walks that tree and writes HTML.
//!
//! ```
//! use markdownmaster::{markdown_to_html, Options};
//! assert_eq!(
//!     markdown_to_html("# Title\n\nHello **world**.", &Options::default()).unwrap(),
//!     "<h1 id=\"title\">Title</h1>\n<p>Hello <strong>world</strong>.</p>\n"
//! );
//! ```
//!
//! Both passes can be extended through [`Plugins`]: tokenizers adding or
//! replacing syntax, renderers for token types, and token walkers run in
//! between. The attribute block syntax is itself a set of such extensions,
//! installed by [`Plugins::standard`].
//!
//! ```
//! use markdownmaster::{markdown_to_html, Options};
//! assert_eq!(
//!     markdown_to_html("![Logo](/logo.png){.small}", &Options::default()).unwrap(),
//!     "<p><img class=\"small\" src=\"/logo.png\" alt=\"Logo\"/></p>\n"
//! );
//! ```

pub mod adapters;
pub mod attributes;
mod character_set;
mod ctype;
mod entity;
pub mod error;
pub mod html;
pub mod nodes;
pub mod parser;
pub mod plugins;
mod scanners;
mod strings;
#[cfg(test)]
mod tests;

pub use attributes::AttributeBuilder;
pub use error::{Error, Result};
pub use html::format_html;
pub use parser::options::{Extension, Parse, Render};
pub use parser::{parse_document, parse_inline, Document, Options};
pub use plugins::Plugins;

/// Render Markdown to HTML, with the attribute block extensions.
///
/// See the documentation of [`Options`] for what each option does.
pub fn markdown_to_html(md: &str, options: &Options) -> Result<String> {
    markdown_to_html_with_plugins(md, options, &Plugins::standard())
}

/// Render Markdown to HTML using only the given plugins.
pub fn markdown_to_html_with_plugins(md: &str, options: &Options, plugins: &Plugins<'_>) -> Result<String> {
    let doc = parse_document(md, options, plugins)?;
    format_html(&doc.tokens, options, plugins)
}

/// Render Markdown as inline content to HTML: no paragraphs or other
/// blocks, and no reference definitions.
///
/// ```
/// # use markdownmaster::{markdown_inline_to_html, Options};
/// assert_eq!(
///     markdown_inline_to_html("*so*  [this](/x)", &Options::default()).unwrap(),
///     "<em>so</em>  <a href=\"/x\">this</a>"
/// );
/// ```
pub fn markdown_inline_to_html(md: &str, options: &Options) -> Result<String> {
    let plugins = Plugins::standard();
    let tokens = parse_inline(md, options, &plugins)?;
    html::HtmlRenderer::new(options, &plugins).render_inline(&tokens)
}
