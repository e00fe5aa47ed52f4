//! Adapter traits for plugins.
//!
//! Each plugin has to implement one of the traits available in this module.

use std::collections::HashMap;

use crate::html::HtmlRenderer;
use crate::nodes::Token;
use crate::parser::Lexer;
use crate::Result;

/// Implement this adapter for creating a plugin for custom syntax highlighting of codefence blocks.
pub trait SyntaxHighlighterAdapter {
    /// Generates a syntax highlighted HTML output.
    ///
    /// lang: Name of the programming language (the first word of the info string after the
    /// opening fence).
    /// code: The source code to be syntax highlighted.
    fn highlight(&self, lang: Option<&str>, code: &str) -> String;

    /// Generates the opening `<pre>` tag. Some syntax highlighter libraries might include their own
    /// `<pre>` tag possibly with some HTML attribute pre-filled.
    ///
    /// `attributes`: A map of HTML attributes provided by the renderer.
    fn build_pre_tag(&self, attributes: &HashMap<String, String>) -> String;

    /// Generates the opening `<code>` tag. Some syntax highlighter libraries might include their own
    /// `<code>` tag possibly with some HTML attribute pre-filled.
    ///
    /// `attributes`: A map of HTML attributes provided by the renderer. Holds `class` when the
    /// block has a language.
    fn build_code_tag(&self, attributes: &HashMap<String, String>) -> String;
}

/// The grammar level a tokenizer extension runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Tried against the remaining source at the start of each block.
    Block,
    /// Tried against the remaining text of an inline run.
    Inline,
}

/// Implement this adapter to teach the lexer new syntax, or to replace a
/// built-in rule by registering an extension under that rule's name.
pub trait TokenizerExtension {
    /// The extension's name. Custom tokens it produces are rendered by the
    /// renderer registered under the same name.
    fn name(&self) -> &str;

    /// Whether this extension runs in the block or inline pass.
    fn level(&self) -> Level;

    /// Index in `src` at which this extension's syntax might start, if it
    /// could start anywhere in it. Paragraphs and text runs are cut short at
    /// the smallest such index so the extension gets a chance to match.
    fn start(&self, _src: &str) -> Option<usize> {
        None
    }

    /// Tries to match at the very beginning of `src`. The returned token's
    /// raw text must be a non-empty prefix of `src`.
    ///
    /// The lexer is handed over so an extension can tokenize nested content
    /// with [`Lexer::block_tokens`] or [`Lexer::inline_tokens`].
    fn tokenize(&self, lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>>;
}

/// Implement this adapter to change how tokens of one type are rendered, or
/// to render the custom tokens of a [`TokenizerExtension`] of the same name.
///
/// Closures taking the renderer and the token work as renderer extensions.
pub trait RendererExtension {
    /// Renders `token`, or returns `None` to let the next renderer for this
    /// type, and finally the built-in one, have it.
    ///
    /// Child tokens can be rendered with [`HtmlRenderer::render`] and
    /// [`HtmlRenderer::render_inline`].
    fn render(&self, renderer: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>>;
}

impl<F> RendererExtension for F
where
    F: Fn(&mut HtmlRenderer<'_>, &Token) -> Result<Option<String>>,
{
    fn render(&self, renderer: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>> {
        self(renderer, token)
    }
}
