use super::*;
use pretty_assertions::assert_eq;
#[cfg(feature = "bon")]
use crate::{Extension, Parse, Render};

#[test]
fn breaks() {
    html_opts!([parse.breaks], "a\nb", "<p>a<br>b</p>\n");
}

#[test]
fn smart_dashes() {
    html_opts!(
        [parse.smart],
        "a -- b --- c",
        "<p>a \u{2013} b \u{2014} c</p>\n"
    );
}

#[test]
fn smart_leaves_code_alone() {
    html_opts!(
        [parse.smart],
        "`\"a\" -- b`",
        "<p><code>&quot;a&quot; -- b</code></p>\n"
    );
}

#[test]
fn xhtml() {
    html_opts!([render.xhtml], "a  \nb", "<p>a<br/>b</p>\n");
    html_opts!([render.xhtml], "***", "<hr/>\n");
    html_opts!(
        [render.xhtml],
        "![i](/i.png)",
        "<p><img src=\"/i.png\" alt=\"i\"/></p>\n"
    );
}

#[test]
fn base_url() {
    let base = || Some("https://a.tld/docs/".to_string());
    html_opts!(
        [render.base_url = base()],
        "![x](//cdn.tld/x.png)",
        "<p><img src=\"https://cdn.tld/x.png\" alt=\"x\"></p>\n"
    );
    html_opts!(
        [render.base_url = base()],
        "[x](/root)",
        "<p><a href=\"https://a.tld/root\">x</a></p>\n"
    );
    html_opts!(
        [render.base_url = base()],
        "[x](mailto:me@a.tld)",
        "<p><a href=\"mailto:me@a.tld\">x</a></p>\n"
    );
}

#[test]
fn lang_prefix() {
    html_opts!(
        [render.lang_prefix = String::new()],
        "```rust\nx\n```",
        "<pre><code class=\"rust\">x\n</code></pre>\n"
    );
}

#[cfg(feature = "bon")]
#[test]
fn builders() {
    let options = Options {
        extension: Extension::builder().table(false).build(),
        parse: Parse::builder().smart(true).build(),
        render: Render::builder().xhtml(true).build(),
    };
    assert!(options.extension.strikethrough);
    assert_eq!(options.extension.header_ids, None);
    assert_eq!(options.render.lang_prefix, "language-");
    html_opts_w("'a'", "<p>\u{2018}a\u{2019}</p>\n", &options);
}
