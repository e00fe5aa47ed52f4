use super::*;

#[test]
fn html_blocks_become_text() {
    html_opts!(
        [parse.sanitize],
        "<div>\nhi\n</div>",
        "<p>&lt;div&gt;\nhi\n&lt;/div&gt;</p>\n"
    );
}

#[test]
fn script_urls_are_dropped() {
    html_opts!(
        [parse.sanitize],
        "[x](javascript:alert(1))",
        "<p>x</p>\n"
    );
    html_opts!(
        [parse.sanitize],
        "[x](/fine)",
        "<p><a href=\"/fine\">x</a></p>\n"
    );
}

#[test]
fn unsanitized_urls_are_kept() {
    html(
        "[x](javascript:alert(1))",
        "<p><a href=\"javascript:alert(1)\">x</a></p>\n",
    );
}
