use crate::nodes::Token;
use crate::{markdown_to_html, markdown_to_html_with_plugins, parse_document, Options, Plugins};

mod api;
mod attributes;
mod autolink;
mod code;
mod core;
mod escape;
mod header_ids;
mod html;
mod lists;
mod options;
mod pathological;
mod pedantic;
mod plugins;
mod sanitize;
mod tasklist;

#[track_caller]
fn html(input: &str, expected: &str) {
    html_opts_w(input, expected, &Options::default());
}

#[track_caller]
fn html_opts_i<F>(input: &str, expected: &str, opts: F)
where
    F: FnOnce(&mut Options),
{
    let mut options = Options::default();
    opts(&mut options);
    html_opts_w(input, expected, &options);
}

#[track_caller]
fn html_opts_w(input: &str, expected: &str, options: &Options) {
    let output = markdown_to_html(input, options).unwrap();
    pretty_assertions::assert_eq!(output, expected, "input: {:?}", input);
}

#[track_caller]
fn html_plugins(input: &str, expected: &str, plugins: &Plugins) {
    let options = Options::default();
    let output = markdown_to_html_with_plugins(input, &options, plugins).unwrap();
    pretty_assertions::assert_eq!(output, expected, "input: {:?}", input);
}

/// The top-level tokens of `input`, lexed with default options and no
/// plugins.
fn tokens(input: &str) -> Vec<Token> {
    let options = Options::default();
    let plugins = Plugins::default();
    parse_document(input, &options, &plugins).unwrap().tokens
}

macro_rules! html_opts {
    ([$($optclass:ident.$optname:ident),*], $lhs:expr, $rhs:expr) => {
        html_opts!([$($optclass.$optname = true),*], $lhs, $rhs)
    };
    ([$($optclass:ident.$optname:ident = $val:expr),*], $lhs:expr, $rhs:expr) => {
        $crate::tests::html_opts_i($lhs, $rhs, |opts| {
            $(opts.$optclass.$optname = $val;)*
        })
    };
}

pub(crate) use html_opts;
