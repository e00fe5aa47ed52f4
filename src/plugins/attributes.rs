//! `{.class #id key=value}` attribute blocks on links, images and
//! paragraphs.
//!
//! ```
//! # use markdownmaster::{markdown_to_html, Options};
//! let options = Options::default();
//! assert_eq!(
//!     markdown_to_html("[Docs](/docs){.button #docs}", &options).unwrap(),
//!     "<p><a class=\"button\" id=\"docs\" href=\"/docs\">Docs</a></p>\n"
//! );
//! assert_eq!(
//!     markdown_to_html("Centered. {.center}", &options).unwrap(),
//!     "<p class=\"center\">Centered. </p>\n"
//! );
//! ```

use crate::adapters::{Level, TokenizerExtension};
use crate::attributes::AttributeBuilder;
use crate::html::{escape, HtmlRenderer};
use crate::nodes::Token;
use crate::parser::inlines::{finish_link, scan_inline_link};
use crate::parser::Lexer;
use crate::plugins::Plugins;
use crate::Result;

/// Installs the link tokenizer and the link, image and paragraph renderers.
pub fn install(plugins: &mut Plugins<'_>) -> Result<()> {
    plugins.add_tokenizer(AttributeLink)?;
    plugins.add_renderer("link", render_link)?;
    plugins.add_renderer("image", render_image)?;
    plugins.add_renderer("paragraph", render_paragraph)?;
    Ok(())
}

/// The inline link rule, additionally taking a `{...}` block right after
/// the closing `)`.
#[derive(Debug, Clone, Copy)]
pub struct AttributeLink;

impl TokenizerExtension for AttributeLink {
    fn name(&self) -> &str {
        "link"
    }

    fn level(&self) -> Level {
        Level::Inline
    }

    fn tokenize(&self, lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
        if lexer.options().parse.pedantic {
            return Ok(None);
        }
        match scan_inline_link(src) {
            Some(span) => finish_link(lexer, src, span, true),
            None => Ok(None),
        }
    }
}

/// Links carrying attributes render as `<a {attributes}>`, with `href`
/// and `title` set over whatever the block says.
pub fn render_link(renderer: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>> {
    let Token::Link(link) = token else {
        return Ok(None);
    };
    let Some(body) = &link.attributes else {
        return Ok(None);
    };

    let text = renderer.render_inline(&link.tokens)?;
    let Some(href) = renderer.clean_url(&link.href) else {
        return Ok(Some(text));
    };

    let mut attrs = AttributeBuilder::parse(body);
    attrs.set("href", escape(&href, false));
    if let Some(title) = &link.title {
        attrs.set("title", title.as_str());
    }
    Ok(Some(format!("<a {}>{}</a>", attrs, text)))
}

pub fn render_image(renderer: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>> {
    let Token::Image(image) = token else {
        return Ok(None);
    };
    let Some(body) = &image.attributes else {
        return Ok(None);
    };

    let Some(src) = renderer.clean_url(&image.href) else {
        return Ok(Some(image.text.clone()));
    };

    let mut attrs = AttributeBuilder::parse(body);
    attrs.set("src", src);
    if !image.text.is_empty() {
        attrs.set("alt", image.text.as_str());
    }
    if let Some(title) = &image.title {
        attrs.set("title", title.as_str());
    }
    Ok(Some(format!("<img {}/>", attrs)))
}

/// A paragraph whose rendered text ends in `{...}` takes the block as its
/// attributes. The text before the block is kept as is.
pub fn render_paragraph(renderer: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>> {
    let Token::Paragraph { tokens, .. } = token else {
        return Ok(None);
    };

    let text = renderer.render_inline(tokens)?;
    let Some(open) = trailing_block(&text) else {
        return Ok(Some(renderer.paragraph(&text)));
    };

    let body = text[open + 1..text.len() - 1].replace("&quot;", "\"");
    let attrs = AttributeBuilder::parse(&body);
    let text = &text[..open];
    if attrs.is_empty() {
        return Ok(Some(renderer.paragraph(text)));
    }
    Ok(Some(format!("<p {}>{}</p>\n", attrs, text)))
}

/// Where a `{...}` block closing the text opens. Its body is restricted to
/// what survives HTML rendering of an attribute list.
fn trailing_block(text: &str) -> Option<usize> {
    let inner = text.strip_suffix('}')?;
    let open = inner.rfind('{')?;
    let body = &inner[open + 1..];
    let allowed = |c: char| c.is_ascii_alphanumeric() || " #;:=_-[&].'".contains(c);
    (!body.is_empty() && body.chars().all(allowed)).then_some(open)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_registers_every_extension() {
        let mut plugins = Plugins::default();
        install(&mut plugins).unwrap();
        assert_eq!(plugins.tokenizers.len(), 1);
        let names: Vec<&str> = plugins.renderers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["link", "image", "paragraph"]);
    }

    #[test]
    fn trailing_blocks() {
        assert_eq!(trailing_block("a {.b}"), Some(2));
        assert_eq!(trailing_block("a {title=&quot;x y&quot;}"), Some(2));
        assert_eq!(trailing_block("a {}"), None);
        assert_eq!(trailing_block("a {b} c"), None);
        assert_eq!(trailing_block("a {b/c}"), None);
        assert_eq!(trailing_block("a {x} {.b}"), Some(6));
    }
}
