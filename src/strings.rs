use crate::ctype::{ispunct, isspace};
use std::borrow::Cow;

/// Removes backslashes that escape ASCII punctuation.
pub fn unescape(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if !bytes.contains(&b'\\') {
        return Cow::Borrowed(text);
    }

    let mut v = String::with_capacity(text.len());
    let mut org = 0;
    let mut r = 0;
    while r < bytes.len() {
        if bytes[r] == b'\\' && r + 1 < bytes.len() && ispunct(bytes[r + 1]) {
            v.push_str(&text[org..r]);
            org = r + 1;
            r += 2;
        } else {
            r += 1;
        }
    }
    v.push_str(&text[org..]);
    Cow::Owned(v)
}

/// Collapses whitespace runs and folds case, so reference labels compare
/// equal regardless of how they were typed.
pub fn normalize_label(i: &str) -> String {
    let i = i.trim_matches(|c: char| c.is_ascii() && isspace(c as u8));

    let mut v = String::with_capacity(i.len());
    let mut last_was_whitespace = false;
    for c in i.chars() {
        if c.is_whitespace() {
            if !last_was_whitespace {
                last_was_whitespace = true;
                v.push(' ');
            }
        } else {
            last_was_whitespace = false;
            v.push(c);
        }
    }
    caseless::default_case_fold_str(&v)
}

/// Strips trailing occurrences of `c`, or with `invert`, trailing characters
/// that are anything but `c`.
pub fn rtrim_char(s: &str, c: char, invert: bool) -> &str {
    s.trim_end_matches(|ch: char| (ch == c) != invert)
}

/// The text before the first `\n`.
pub fn first_line(s: &str) -> &str {
    match s.find('\n') {
        Some(ix) => &s[..ix],
        None => s,
    }
}

/// Number of leading space characters.
pub fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}

/// Finds the index of the first unbalanced `close` in `s`, skipping
/// backslash-escaped characters.
pub fn find_closing_bracket(s: &str, open: u8, close: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    if !bytes.contains(&close) {
        return None;
    }
    let mut level = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == open {
            level += 1;
        } else if bytes[i] == close {
            if level == 0 {
                return Some(i);
            }
            level -= 1;
        }
        i += 1;
    }
    None
}

/// Normalizes line endings, then expands tabs: every tab in pedantic mode,
/// only those in the leading indentation otherwise.
pub fn normalize_source(src: &str, pedantic: bool) -> String {
    let src = src.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(src.len());

    for (ix, line) in src.split('\n').enumerate() {
        if ix > 0 {
            out.push('\n');
        }
        if pedantic {
            let line = line.replace('\t', "    ");
            if !line.bytes().all(|b| b == b' ') {
                out.push_str(&line);
            }
        } else {
            let spaces = leading_spaces(line);
            let tabs = line[spaces..].bytes().take_while(|&b| b == b'\t').count();
            if tabs == 0 {
                out.push_str(line);
            } else {
                out.push_str(&line[..spaces]);
                for _ in 0..tabs {
                    out.push_str("    ");
                }
                out.push_str(&line[spaces + tabs..]);
            }
        }
    }
    out
}

/// Shifts the lines of a fenced code block left by the indentation of its
/// opening fence.
pub fn indent_code_compensation<'a>(raw: &str, text: &'a str) -> Cow<'a, str> {
    let indent = raw
        .bytes()
        .take_while(|&b| b.is_ascii_whitespace())
        .count();
    if indent == 0 || !raw[indent..].starts_with("```") {
        return Cow::Borrowed(text);
    }

    let lines = text
        .split('\n')
        .map(|line| {
            let own = line
                .bytes()
                .take_while(|&b| b.is_ascii_whitespace())
                .count();
            if own >= indent {
                &line[indent..]
            } else {
                line
            }
        })
        .collect::<Vec<_>>();
    Cow::Owned(lines.join("\n"))
}

/// Typographic replacements for quotes, dashes and ellipses.
pub fn smartypants(text: &str) -> String {
    let text = text.replace("---", "\u{2014}").replace("--", "\u{2013}");
    let text = smart_quote(&text, '\'', '\u{2018}', '\u{2019}', |c| {
        matches!(c, '-' | '\u{2014}' | '/' | '(' | '[' | '{' | '"') || c.is_whitespace()
    });
    let text = smart_quote(&text, '"', '\u{201c}', '\u{201d}', |c| {
        matches!(c, '-' | '\u{2014}' | '/' | '(' | '[' | '{' | '\u{2018}') || c.is_whitespace()
    });
    text.replace("...", "\u{2026}")
}

fn smart_quote(
    text: &str,
    quote: char,
    opening: char,
    closing: char,
    opens_after: impl Fn(char) -> bool,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c == quote {
            match prev {
                None => out.push(opening),
                Some(p) if opens_after(p) => out.push(opening),
                Some(_) => out.push(closing),
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
