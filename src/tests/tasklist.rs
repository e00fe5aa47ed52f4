use super::*;

#[test]
fn tight_items() {
    html(
        "- [x] done\n- [ ] todo",
        concat!(
            "<ul>\n",
            "<li><input checked=\"\" disabled=\"\" type=\"checkbox\"> done</li>\n",
            "<li><input disabled=\"\" type=\"checkbox\"> todo</li>\n",
            "</ul>\n"
        ),
    );
}

#[test]
fn loose_items_put_the_box_in_the_paragraph() {
    html(
        "- [x] a\n\n- [ ] b",
        concat!(
            "<ul>\n",
            "<li><p><input checked=\"\" disabled=\"\" type=\"checkbox\">  a</p>\n</li>\n",
            "<li><p><input disabled=\"\" type=\"checkbox\">  b</p>\n</li>\n",
            "</ul>\n"
        ),
    );
}

#[test]
fn xhtml_checkbox() {
    html_opts!(
        [render.xhtml],
        "- [x] done",
        "<ul>\n<li><input checked=\"\" disabled=\"\" type=\"checkbox\" /> done</li>\n</ul>\n"
    );
}

#[test]
fn disabled() {
    html_opts!(
        [extension.tasklist = false],
        "- [x] done",
        "<ul>\n<li>[x] done</li>\n</ul>\n"
    );
}
