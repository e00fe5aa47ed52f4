use super::*;

#[test]
fn indented() {
    html("    let a;", "<pre><code>let a;\n</code></pre>\n");
}

#[test]
fn fenced_with_language() {
    html(
        "``` rust\nfn main<'a>();\n```\n",
        "<pre><code class=\"language-rust\">fn main&lt;&#39;a&gt;();\n</code></pre>\n",
    );
    html("~~~\na\n~~~", "<pre><code>a\n</code></pre>\n");
}

#[test]
fn unclosed_fence_runs_to_the_end() {
    html("```\na", "<pre><code>a\n</code></pre>\n");
}

#[test]
fn code_spans() {
    html("`a < b`", "<p><code>a &lt; b</code></p>\n");
    html("`` a`b ``", "<p><code>a`b</code></p>\n");
    html("`unclosed", "<p>`unclosed</p>\n");
}
