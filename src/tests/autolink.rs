use super::*;

#[test]
fn bare_urls() {
    html(
        "Visit https://example.com/a?b=c.",
        "<p>Visit <a href=\"https://example.com/a?b=c\">https://example.com/a?b=c</a>.</p>\n",
    );
}

#[test]
fn bare_emails() {
    html(
        "Mail me@example.com now",
        "<p>Mail <a href=\"mailto:me@example.com\">me@example.com</a> now</p>\n",
    );
}

#[test]
fn angle_brackets() {
    html(
        "<https://a.tld/x>",
        "<p><a href=\"https://a.tld/x\">https://a.tld/x</a></p>\n",
    );
    html(
        "<me@a.tld>",
        "<p><a href=\"mailto:me@a.tld\">me@a.tld</a></p>\n",
    );
}

#[test]
fn not_inside_link_text() {
    html(
        "[see www.a.tld](/x)",
        "<p><a href=\"/x\">see www.a.tld</a></p>\n",
    );
}

#[test]
fn disabled() {
    html_opts!(
        [extension.autolink = false],
        "www.a.tld",
        "<p>www.a.tld</p>\n"
    );
    html_opts!(
        [extension.autolink = false],
        "<https://a.tld>",
        "<p><a href=\"https://a.tld\">https://a.tld</a></p>\n"
    );
}
