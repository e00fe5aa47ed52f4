use std::cell::Cell;
use std::collections::HashMap;

use crate::adapters::{Level, SyntaxHighlighterAdapter, TokenizerExtension};
use crate::html::HtmlRenderer;
use crate::nodes::CustomToken;
use crate::parser::Lexer;
use crate::{Error, Result};

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn syntax_highlighter_plugin() {
    pub struct MockAdapter {}

    impl SyntaxHighlighterAdapter for MockAdapter {
        fn highlight(&self, lang: Option<&str>, code: &str) -> String {
            format!("<!--{}--><span>{}</span>", lang.unwrap_or("none"), code)
        }

        fn build_pre_tag(&self, _attributes: &HashMap<String, String>) -> String {
            "<pre>".to_string()
        }

        fn build_code_tag(&self, attributes: &HashMap<String, String>) -> String {
            match attributes.get("class") {
                Some(class) => format!("<code class=\"{}\">", class),
                None => "<code>".to_string(),
            }
        }
    }

    let input = concat!("``` rust yum\n", "fn main<'a>();\n", "```\n");
    let expected = concat!(
        "<pre><code class=\"language-rust\"><!--rust--><span>fn main<'a>();\n</span>",
        "</code></pre>\n"
    );

    let adapter = MockAdapter {};
    let mut plugins = Plugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);

    html_plugins(input, expected, &plugins);
    html_plugins(
        "    plain",
        "<pre><code><!--none--><span>plain\n</span></code></pre>\n",
        &plugins,
    );
}

/// `@name` mentions.
struct Mention;

impl TokenizerExtension for Mention {
    fn name(&self) -> &str {
        "mention"
    }

    fn level(&self) -> Level {
        Level::Inline
    }

    fn start(&self, src: &str) -> Option<usize> {
        src.find('@')
    }

    fn tokenize(&self, _: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
        let Some(rest) = src.strip_prefix('@') else {
            return Ok(None);
        };
        let len = rest.bytes().take_while(u8::is_ascii_alphanumeric).count();
        if len == 0 {
            return Ok(None);
        }
        Ok(Some(Token::Custom(CustomToken {
            name: "mention".to_string(),
            raw: src[..len + 1].to_string(),
            text: rest[..len].to_string(),
            ..Default::default()
        })))
    }
}

fn render_mention(_: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>> {
    let Token::Custom(mention) = token else {
        return Ok(None);
    };
    Ok(Some(format!("<span class=\"mention\">{}</span>", mention.text)))
}

#[test]
fn inline_tokenizer_and_renderer() {
    let mut plugins = Plugins::default();
    plugins.add_tokenizer(Mention).unwrap();
    plugins.add_renderer("mention", render_mention).unwrap();

    html_plugins(
        "hi @bob!",
        "<p>hi <span class=\"mention\">bob</span>!</p>\n",
        &plugins,
    );
    html_plugins("mail @ home", "<p>mail @ home</p>\n", &plugins);
}

#[test]
fn unknown_token_type() {
    let mut plugins = Plugins::default();
    plugins.add_tokenizer(Mention).unwrap();

    let mut options = Options::default();
    let err = markdown_to_html_with_plugins("hi @bob!", &options, &plugins).unwrap_err();
    assert!(matches!(&err, Error::UnknownTokenType(name) if name == "mention"));
    assert_eq!(err.to_string(), "Token with \"mention\" type was not found.");

    options.parse.silent = true;
    assert_eq!(
        markdown_to_html_with_plugins("hi @bob!", &options, &plugins).unwrap(),
        "<p>hi !</p>\n"
    );
}

/// `:::note` ... `:::` asides with inline content.
struct Note;

impl TokenizerExtension for Note {
    fn name(&self) -> &str {
        "note"
    }

    fn level(&self) -> Level {
        Level::Block
    }

    fn start(&self, src: &str) -> Option<usize> {
        src.find(":::")
    }

    fn tokenize(&self, _: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
        const OPEN: &str = ":::note\n";
        let Some(rest) = src.strip_prefix(OPEN) else {
            return Ok(None);
        };
        let Some(close) = rest.find("\n:::") else {
            return Ok(None);
        };
        let mut end = OPEN.len() + close + 4;
        if src[end..].starts_with('\n') {
            end += 1;
        }
        Ok(Some(Token::Custom(CustomToken {
            name: "note".to_string(),
            raw: src[..end].to_string(),
            text: rest[..close].to_string(),
            inline: true,
            ..Default::default()
        })))
    }
}

fn render_note(renderer: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>> {
    let Token::Custom(note) = token else {
        return Ok(None);
    };
    let body = renderer.render_inline(&note.tokens)?;
    Ok(Some(format!("<aside class=\"note\">{}</aside>\n", body)))
}

#[test]
fn block_tokenizer_interrupts_paragraphs() {
    let mut plugins = Plugins::default();
    plugins.add_tokenizer(Note).unwrap();
    plugins.add_renderer("note", render_note).unwrap();

    html_plugins(
        "para\n:::note\nhi *there*\n:::\n",
        "<p>para</p>\n<aside class=\"note\">hi <em>there</em></aside>\n",
        &plugins,
    );
}

/// Replaces the `hr` rule, also taking `%%%` lines.
struct PercentRule;

impl TokenizerExtension for PercentRule {
    fn name(&self) -> &str {
        "hr"
    }

    fn level(&self) -> Level {
        Level::Block
    }

    fn tokenize(&self, _: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
        Ok(src.starts_with("%%%").then(|| Token::Hr {
            raw: "%%%".to_string(),
        }))
    }
}

#[test]
fn built_in_rule_override_falls_back() {
    let mut plugins = Plugins::default();
    plugins.add_tokenizer(PercentRule).unwrap();

    html_plugins("%%%\n\n***", "<hr>\n<hr>\n", &plugins);
}

fn loud_h1(renderer: &mut HtmlRenderer<'_>, token: &Token) -> Result<Option<String>> {
    match token {
        Token::Heading {
            depth: 1, tokens, ..
        } => {
            let text = renderer.render_inline(tokens)?;
            Ok(Some(format!("<h1 class=\"loud\">{}</h1>\n", text.to_uppercase())))
        }
        _ => Ok(None),
    }
}

#[test]
fn renderer_declines_to_the_built_in() {
    let mut plugins = Plugins::default();
    plugins.add_renderer("heading", loud_h1).unwrap();

    html_plugins(
        "# hi\n\n## there",
        "<h1 class=\"loud\">HI</h1>\n<h2 id=\"there\">there</h2>\n",
        &plugins,
    );
}

#[test]
fn walkers_see_every_token() {
    let texts = Cell::new(0);
    let mut plugins = Plugins::default();
    plugins.add_walker(|token| {
        if matches!(token, Token::Text { .. }) {
            texts.set(texts.get() + 1);
        }
    });

    html_plugins("a *b*", "<p>a <em>b</em></p>\n", &plugins);
    assert_eq!(texts.get(), 2);
}

#[test]
fn names_are_required() {
    let mut plugins = Plugins::default();
    assert!(matches!(
        plugins.add_renderer("", render_note),
        Err(Error::MissingExtensionName)
    ));
}
