use super::*;

#[test]
fn headings_need_no_space() {
    html_opts!(
        [parse.pedantic],
        "#Heading",
        "<h1 id=\"heading\">Heading</h1>\n"
    );
    html("#Heading", "<p>#Heading</p>\n");
}

#[test]
fn no_fences() {
    html_opts!(
        [parse.pedantic],
        "```\na\n```",
        "<p><code>a</code></p>\n"
    );
}

#[test]
fn any_bullet_continues_a_list() {
    html_opts!(
        [parse.pedantic],
        "- a\n* b",
        "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
    );
}

#[test]
fn spaced_reference_links() {
    html_opts!(
        [parse.pedantic],
        "[a] [r]\n\n[r]: /u",
        "<p><a href=\"/u\">a</a></p>\n"
    );
    html("[a] [r]\n\n[r]: /u", "<p>[a] <a href=\"/u\">r</a></p>\n");
}

#[test]
fn attribute_links_are_off() {
    html_opts!(
        [parse.pedantic],
        "[x](/u){.c}",
        "<p class=\"c\"><a href=\"/u\">x</a></p>\n"
    );
}
