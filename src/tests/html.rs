use super::*;

#[test]
fn block_passes_through() {
    html("<div>\nhi\n</div>\n", "<div>\nhi\n</div>\n");
}

#[test]
fn inline_passes_through() {
    html(
        "a <span class=\"x\">b</span>",
        "<p>a <span class=\"x\">b</span></p>\n",
    );
}

#[test]
fn comments() {
    html("<!-- note -->\n", "<!-- note -->\n");
}
