use super::*;

#[test]
fn duplicates_are_numbered() {
    html(
        "# Foo\n\n## Foo\n\n### Foo",
        "<h1 id=\"foo\">Foo</h1>\n<h2 id=\"foo-1\">Foo</h2>\n<h3 id=\"foo-2\">Foo</h3>\n",
    );
}

#[test]
fn slugs_use_plain_text() {
    html(
        "# Hello *World* & `Co`",
        "<h1 id=\"hello-world--co\">Hello <em>World</em> &amp; <code>Co</code></h1>\n",
    );
}

#[test]
fn prefix() {
    html_opts!(
        [extension.header_ids = Some("p-".to_string())],
        "## Hello World",
        "<h2 id=\"p-hello-world\">Hello World</h2>\n"
    );
}

#[test]
fn disabled() {
    html_opts!(
        [extension.header_ids = None],
        "# Foo\n\nBar\n---",
        "<h1>Foo</h1>\n<h2>Bar</h2>\n"
    );
}
