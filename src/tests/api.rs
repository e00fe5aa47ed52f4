use crate::adapters::Level;
use crate::html::HtmlRenderer;
use crate::nodes::TableAlignment;
use crate::{format_html, markdown_inline_to_html, parse_inline, AttributeBuilder, Error};

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn exercise_full_api() {
    let options = Options::default();
    let plugins = Plugins::standard();

    // Not looking for specific outputs, just want to know if the API changes shape.
    let doc = parse_document("# My document\n\n[r]: /u\n", &options, &plugins).unwrap();
    let _: &Vec<Token> = &doc.tokens;
    let _: usize = doc.links.len();
    let _: String = format_html(&doc.tokens, &options, &plugins).unwrap();
    let _: Vec<Token> = parse_inline("*a*", &options, &plugins).unwrap();
    let _: String = markdown_inline_to_html("*a*", &options).unwrap();
    let _: String = markdown_to_html_with_plugins("a", &options, &plugins).unwrap();

    let mut renderer = HtmlRenderer::new(&options, &plugins);
    let _: String = renderer.slugger().slug("a");
    let _: String = renderer.tablecell("a", true, Some(TableAlignment::Center));
    let _: Option<String> = renderer.clean_url("/x");

    let _: String = AttributeBuilder::parse(".a").as_string();
    let _: String = format!("{:?}", plugins);
}

#[test]
fn document_keeps_definitions() {
    let options = Options::default();
    let plugins = Plugins::default();
    let doc = parse_document("[Home]: / \"Start\"\n\n[a][home]", &options, &plugins).unwrap();
    let home = doc.links.lookup("HOME").unwrap();
    assert_eq!(home.href, "/");
    assert_eq!(home.title.as_deref(), Some("Start"));
}

#[test]
fn raw_text_covers_the_document() {
    let input = "# h\n\npara\ngraph\n\n- a\n- b\n\n> q\n\n***\n";
    let raw: String = tokens(input).iter().map(Token::raw).collect();
    assert_eq!(raw, input);
}

#[test]
fn format_html_renders_given_tokens() {
    let options = Options::default();
    let plugins = Plugins::default();
    let tokens = tokens("a\n\n***");
    assert_eq!(
        format_html(&tokens[tokens.len() - 1..], &options, &plugins).unwrap(),
        "<hr>\n"
    );
}

#[test]
fn error_messages() {
    let err = Error::UngroundedParse {
        level: Level::Block,
        byte: b'!',
        offset: 3,
    };
    assert!(err.to_string().starts_with("Infinite loop on byte: 33"));
    assert_eq!(
        Error::UnknownTokenType("x".to_string()).to_string(),
        "Token with \"x\" type was not found."
    );
}

#[test]
fn inline_rendering_has_no_blocks() {
    let options = Options::default();
    assert_eq!(
        markdown_inline_to_html("# not a heading", &options).unwrap(),
        "# not a heading"
    );
}
