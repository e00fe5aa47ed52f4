use super::*;

#[test]
fn tight_and_loose() {
    html("- a\n- b", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
    html(
        "- a\n\n- b",
        "<ul>\n<li><p>a</p>\n</li>\n<li><p>b</p>\n</li>\n</ul>\n",
    );
}

#[test]
fn ordered_start() {
    html("3. a\n4. b", "<ol start=\"3\">\n<li>a</li>\n<li>b</li>\n</ol>\n");
    html("1. a\n2. b", "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n");
}

#[test]
fn nested() {
    html(
        "- a\n  - b",
        "<ul>\n<li>a<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>\n",
    );
}

#[test]
fn bullet_change_starts_a_new_list() {
    html(
        "- a\n* b",
        "<ul>\n<li>a</li>\n</ul>\n<ul>\n<li>b</li>\n</ul>\n",
    );
}
