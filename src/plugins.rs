//! The extension registry: tokenizer and renderer extensions, token walkers
//! and the syntax highlighter.

pub mod attributes;
#[cfg(feature = "syntect")]
pub mod syntect;

use std::fmt;

use crate::adapters::{Level, RendererExtension, SyntaxHighlighterAdapter, TokenizerExtension};
use crate::error::Error;
use crate::nodes::Token;
use crate::parser::rules;
use crate::Result;

/// Everything beyond [`Options`](crate::Options) that changes how a
/// document is lexed and rendered. Set up once, then shared by any number
/// of compilations.
///
/// ```
/// # use markdownmaster::{markdown_to_html_with_plugins, Options, Plugins};
/// let mut plugins = Plugins::default();
/// plugins.add_walker(|token| {
///     if let markdownmaster::nodes::Token::Codespan { text, .. } = token {
///         *text = text.to_uppercase();
///     }
/// });
/// assert_eq!(
///     markdown_to_html_with_plugins("`shout`", &Options::default(), &plugins).unwrap(),
///     "<p><code>SHOUT</code></p>\n"
/// );
/// ```
#[derive(Default)]
pub struct Plugins<'p> {
    /// Configure render-time plugins.
    pub render: RenderPlugins<'p>,

    tokenizers: Vec<Box<dyn TokenizerExtension + 'p>>,
    renderers: Vec<(String, Box<dyn RendererExtension + 'p>)>,
    walkers: Vec<Box<dyn Fn(&mut Token) + 'p>>,
}

#[derive(Default, Clone, Copy)]
/// Plugins for alternative rendering.
pub struct RenderPlugins<'p> {
    /// Provide a syntax highlighter adapter implementation for syntax
    /// highlighting of code blocks.
    ///
    /// ```
    /// # use markdownmaster::{markdown_to_html_with_plugins, Options, Plugins};
    /// # use markdownmaster::adapters::SyntaxHighlighterAdapter;
    /// # use std::collections::HashMap;
    /// struct Potato;
    ///
    /// impl SyntaxHighlighterAdapter for Potato {
    ///     fn highlight(&self, lang: Option<&str>, code: &str) -> String {
    ///         format!("potato {} {}", lang.unwrap_or("-"), code)
    ///     }
    ///     fn build_pre_tag(&self, _: &HashMap<String, String>) -> String {
    ///         "<pre lang=\"potato\">".to_string()
    ///     }
    ///     fn build_code_tag(&self, _: &HashMap<String, String>) -> String {
    ///         "<code>".to_string()
    ///     }
    /// }
    ///
    /// let adapter = Potato;
    /// let mut plugins = Plugins::default();
    /// plugins.render.codefence_syntax_highlighter = Some(&adapter);
    /// assert_eq!(
    ///     markdown_to_html_with_plugins("```rust\nfn\n```", &Options::default(), &plugins).unwrap(),
    ///     "<pre lang=\"potato\"><code>potato rust fn\n</code></pre>\n"
    /// );
    /// ```
    pub codefence_syntax_highlighter: Option<&'p dyn SyntaxHighlighterAdapter>,
}

impl fmt::Debug for RenderPlugins<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPlugins")
            .field(
                "codefence_syntax_highlighter",
                &self.codefence_syntax_highlighter.map(|_| "impl SyntaxHighlighterAdapter"),
            )
            .finish()
    }
}

impl fmt::Debug for Plugins<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugins")
            .field("render", &self.render)
            .field(
                "tokenizers",
                &self.tokenizers.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field(
                "renderers",
                &self.renderers.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .field("walkers", &self.walkers.len())
            .finish()
    }
}

impl<'p> Plugins<'p> {
    /// A registry with the attribute block extensions installed: `{...}`
    /// after links and images, and at the end of paragraphs.
    pub fn standard() -> Self {
        let mut plugins = Plugins::default();
        if let Err(err) = attributes::install(&mut plugins) {
            log::error!("attribute extensions not installed: {}", err);
        }
        plugins
    }

    /// Registers a tokenizer extension.
    ///
    /// An extension named after a built-in rule of its level is tried in
    /// place of that rule, which still runs when the extension declines.
    /// Any other extension is tried before every built-in rule of its level,
    /// after the extensions registered later than it.
    pub fn add_tokenizer(&mut self, ext: impl TokenizerExtension + 'p) -> Result<()> {
        if ext.name().is_empty() {
            return Err(Error::MissingExtensionName);
        }
        if rules::is_builtin(ext.level(), ext.name()) {
            log::debug!("tokenizer `{}` overrides the built-in rule", ext.name());
        } else {
            log::debug!("installed {:?} tokenizer `{}`", ext.level(), ext.name());
        }
        self.tokenizers.push(Box::new(ext));
        Ok(())
    }

    /// Registers a renderer for tokens of type `name`: a built-in type such
    /// as `"paragraph"`, or the name of a tokenizer extension making custom
    /// tokens. Renderers for one type are tried in registration order.
    pub fn add_renderer(&mut self, name: &str, ext: impl RendererExtension + 'p) -> Result<()> {
        if name.is_empty() {
            return Err(Error::MissingExtensionName);
        }
        log::debug!("installed renderer for `{}`", name);
        self.renderers.push((name.to_string(), Box::new(ext)));
        Ok(())
    }

    /// Registers a callback run on every token after lexing, before
    /// rendering. Walkers run in registration order, each over the whole
    /// tree.
    pub fn add_walker(&mut self, walker: impl Fn(&mut Token) + 'p) {
        self.walkers.push(Box::new(walker));
    }

    /// Extensions adding new syntax at `level`, latest first.
    pub(crate) fn tokenizers(&self, level: Level) -> impl Iterator<Item = &dyn TokenizerExtension> + '_ {
        self.tokenizers
            .iter()
            .rev()
            .map(|ext| ext.as_ref() as &dyn TokenizerExtension)
            .filter(move |ext| ext.level() == level && !rules::is_builtin(level, ext.name()))
    }

    /// Extensions replacing the built-in rule `name`, in registration order.
    pub(crate) fn overrides<'s>(
        &'s self,
        level: Level,
        name: &'s str,
    ) -> impl Iterator<Item = &'s dyn TokenizerExtension> + 's {
        self.tokenizers
            .iter()
            .map(|ext| ext.as_ref() as &dyn TokenizerExtension)
            .filter(move |ext| ext.level() == level && ext.name() == name)
    }

    /// Extensions that may say where their syntax starts.
    pub(crate) fn start_probes(&self, level: Level) -> impl Iterator<Item = &dyn TokenizerExtension> + '_ {
        self.tokenizers(level)
    }

    pub(crate) fn renderers<'s>(&'s self, kind: &'s str) -> impl Iterator<Item = &'s dyn RendererExtension> + 's {
        self.renderers
            .iter()
            .filter(move |(k, _)| k == kind)
            .map(|(_, ext)| ext.as_ref() as &dyn RendererExtension)
    }

    pub(crate) fn walkers(&self) -> impl Iterator<Item = &dyn Fn(&mut Token)> + '_ {
        self.walkers.iter().map(|w| w.as_ref() as &dyn Fn(&mut Token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Lexer;

    struct Named(&'static str, Level);

    impl TokenizerExtension for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn level(&self) -> Level {
            self.1
        }

        fn tokenize(&self, _: &mut Lexer<'_>, _: &str) -> Result<Option<Token>> {
            Ok(None)
        }
    }

    #[test]
    fn later_extensions_come_first() {
        let mut plugins = Plugins::default();
        plugins.add_tokenizer(Named("one", Level::Inline)).unwrap();
        plugins.add_tokenizer(Named("two", Level::Inline)).unwrap();
        plugins.add_tokenizer(Named("three", Level::Block)).unwrap();
        let names: Vec<_> = plugins.tokenizers(Level::Inline).map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["two", "one"]);
    }

    #[test]
    fn built_in_names_override() {
        let mut plugins = Plugins::default();
        plugins.add_tokenizer(Named("link", Level::Inline)).unwrap();
        plugins.add_tokenizer(Named("link", Level::Block)).unwrap();
        assert_eq!(plugins.tokenizers(Level::Inline).count(), 0);
        assert_eq!(plugins.overrides(Level::Inline, "link").count(), 1);
        assert_eq!(plugins.tokenizers(Level::Block).count(), 1);
    }

    #[test]
    fn names_are_required() {
        let mut plugins = Plugins::default();
        assert!(matches!(
            plugins.add_tokenizer(Named("", Level::Block)),
            Err(Error::MissingExtensionName)
        ));
    }
}
