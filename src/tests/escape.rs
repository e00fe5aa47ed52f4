use super::*;

#[test]
fn backslash_escapes() {
    html("\\# not heading", "<p># not heading</p>\n");
    html("\\*not em\\*", "<p>*not em*</p>\n");
    html("a \\_b\\_", "<p>a _b_</p>\n");
}

#[test]
fn special_characters() {
    html(
        "`<code>` & <",
        "<p><code>&lt;code&gt;</code> &amp; &lt;</p>\n",
    );
    html("\"quoted\"", "<p>&quot;quoted&quot;</p>\n");
}
