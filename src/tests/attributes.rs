use super::*;

#[test]
fn links() {
    html(
        "Check out [x](http://a.tld){.big #y}",
        "<p>Check out <a class=\"big\" id=\"y\" href=\"http://a.tld\">x</a></p>\n",
    );
    html(
        "[x](/u \"T\"){target=_blank}",
        "<p><a target=\"_blank\" href=\"/u\" title=\"T\">x</a></p>\n",
    );
}

#[test]
fn whitespace_before_the_block() {
    html("[x](/u) {.c}", "<p><a class=\"c\" href=\"/u\">x</a></p>\n");
}

#[test]
fn system_attributes_win() {
    html(
        "[x](/u){href=/evil .c}",
        "<p><a href=\"/u\" class=\"c\">x</a></p>\n",
    );
}

#[test]
fn malformed_pairs_are_dropped() {
    html(
        "[x](/u){bare .ok}",
        "<p><a class=\"ok\" href=\"/u\">x</a></p>\n",
    );
}

#[test]
fn images() {
    html(
        "![alt](/i.png \"T\"){width=100}",
        "<p><img width=\"100\" src=\"/i.png\" alt=\"alt\" title=\"T\"/></p>\n",
    );
    html(
        "![](/i.png){.icon}",
        "<p><img class=\"icon\" src=\"/i.png\"/></p>\n",
    );
}

#[test]
fn paragraphs() {
    html(
        "Hello {.lead #intro}",
        "<p class=\"lead\" id=\"intro\">Hello </p>\n",
    );
    html(
        "Note {title=\"a b\"}",
        "<p title=\"a b\">Note </p>\n",
    );
    html("Just {braces/here}", "<p>Just {braces/here}</p>\n");
}

#[test]
fn reference_links_leave_the_block_to_the_paragraph() {
    html(
        "[x][r]{.c}\n\n[r]: /u",
        "<p class=\"c\"><a href=\"/u\">x</a></p>\n",
    );
}

#[test]
fn sanitized_links_drop_to_text() {
    html_opts!(
        [parse.sanitize],
        "[x](javascript:void(0)){.c}",
        "<p>x</p>\n"
    );
}

#[test]
fn plain_registry_ignores_blocks() {
    html_plugins(
        "[x](/u){.c}",
        "<p><a href=\"/u\">x</a>{.c}</p>\n",
        &Plugins::default(),
    );
    html_plugins("Hello {.lead}", "<p>Hello {.lead}</p>\n", &Plugins::default());
}
