use super::*;

#[test]
fn basic() {
    html(
        concat!(
            "My **document**.\n\n",
            "It's mine.\n\n",
            "> Yes.\n\n",
            "## Hi!\n\n",
            "Okay.\n"
        ),
        concat!(
            "<p>My <strong>document</strong>.</p>\n",
            "<p>It&#39;s mine.</p>\n",
            "<blockquote>\n",
            "<p>Yes.</p>\n",
            "</blockquote>\n",
            "<h2 id=\"hi\">Hi!</h2>\n",
            "<p>Okay.</p>\n"
        ),
    );
}

#[test]
fn title_and_paragraph() {
    html(
        "# Title\n\nHello **world**.",
        "<h1 id=\"title\">Title</h1>\n<p>Hello <strong>world</strong>.</p>\n",
    );
}

#[test]
fn unterminated_emphasis_is_literal() {
    html("*unterminated", "<p>*unterminated</p>\n");
}

#[test]
fn emphasis_parity() {
    html("*a*", "<p><em>a</em></p>\n");
    html("**a**", "<p><strong>a</strong></p>\n");
    html("***a***", "<p><em><strong>a</strong></em></p>\n");
    html(
        "*a* **b** ***c***",
        "<p><em>a</em> <strong>b</strong> <em><strong>c</strong></em></p>\n",
    );
}

#[test]
fn reference_links() {
    html(
        "[link][ref]\n\n[ref]: http://b.tld \"T\"",
        "<p><a href=\"http://b.tld\" title=\"T\">link</a></p>\n",
    );
}

#[test]
fn references_resolve_in_either_order() {
    let expected = "<p><a href=\"/u\">a</a></p>\n";
    html("[ref]: /u\n\n[a][ref]", expected);
    html("[a][ref]\n\n[ref]: /u", expected);

    html("[ref][]\n\n[ref]: /u", "<p><a href=\"/u\">ref</a></p>\n");
    html("[ref]\n\n[ref]: /u", "<p><a href=\"/u\">ref</a></p>\n");
}

#[test]
fn unknown_reference_stays_text() {
    html("[a][missing]", "<p>[a][missing]</p>\n");
}

#[test]
fn thematic_breaks() {
    html("***\n\n- - -\n\n___\n", "<hr>\n<hr>\n<hr>\n");
}

#[test]
fn setext_heading() {
    html(
        "Hi\n==\n\nOk\n-----\n",
        "<h1 id=\"hi\">Hi</h1>\n<h2 id=\"ok\">Ok</h2>\n",
    );
}

#[test]
fn blockquote() {
    html("> a\n> b", "<blockquote>\n<p>a\nb</p>\n</blockquote>\n");
    html(
        "> a\n>\n> > b",
        "<blockquote>\n<p>a</p>\n<blockquote>\n<p>b</p>\n</blockquote>\n</blockquote>\n",
    );
}

#[test]
fn hard_breaks() {
    html("a  \nb", "<p>a<br>b</p>\n");
    html("a\\\nb", "<p>a<br>b</p>\n");
    html("a\nb", "<p>a\nb</p>\n");
}

#[test]
fn entities_pass_through() {
    html(
        "AT&amp;T &copy; 1 < 2",
        "<p>AT&amp;T &copy; 1 &lt; 2</p>\n",
    );
}

#[test]
fn links_and_images() {
    html(
        "[a](/u \"t\") ![i](/i.png)",
        "<p><a href=\"/u\" title=\"t\">a</a> <img src=\"/i.png\" alt=\"i\"></p>\n",
    );
}
