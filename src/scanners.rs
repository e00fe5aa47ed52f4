//! Anchored matchers shared by the block and inline rules.
//!
//! Every function here looks only at the start of its input and reports how
//! many bytes it would consume, or whether a construct starts there.

use crate::ctype::{isalnum, isalpha, isspace, isword};
use jetscii::Substring;

include!(concat!(env!("OUT_DIR"), "/blocktags.rs"));

const RAW_TEXT_TAGS: [&str; 4] = ["script", "pre", "style", "textarea"];

/// Number of leading spaces, if there are no more than `max`.
pub fn indent_upto(s: &str, max: usize) -> Option<usize> {
    let n = s.bytes().take_while(|&b| b == b' ').count();
    if n <= max {
        Some(n)
    } else {
        None
    }
}

/// Skips a run of `\n` at `from`.
pub(crate) fn skip_newlines(b: &[u8], mut from: usize) -> usize {
    while from < b.len() && b[from] == b'\n' {
        from += 1;
    }
    from
}

pub(crate) fn line_end(b: &[u8], from: usize) -> usize {
    b[from..]
        .iter()
        .position(|&c| c == b'\n')
        .map_or(b.len(), |ix| from + ix)
}

/// A thematic break: three or more of the same `-`, `_` or `*`, separated by
/// spaces or tabs, with at most `max_indent` spaces before. Consumes the
/// trailing newlines.
fn thematic_break(s: &str, max_indent: usize, tabs: bool) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = indent_upto(s, max_indent)?;
    let c = *b.get(i)?;
    if !matches!(c, b'-' | b'_' | b'*') {
        return None;
    }

    let mut count = 0;
    while i < b.len() {
        match b[i] {
            x if x == c => count += 1,
            b' ' => {}
            b'\t' if tabs => {}
            _ => break,
        }
        i += 1;
    }

    if count < 3 {
        return None;
    }
    match b.get(i) {
        None => Some(i),
        Some(b'\n') => Some(skip_newlines(b, i)),
        Some(_) => None,
    }
}

/// `* * *`, `---`, `___` and friends.
pub fn hr(s: &str) -> Option<usize> {
    thematic_break(s, 3, true)
}

/// The thematic break that ends a list item whose content starts at column
/// `indent`.
pub fn hr_within(s: &str, indent: usize) -> Option<usize> {
    thematic_break(s, indent.saturating_sub(1).min(3), false)
}

/// `#` through `######` followed by a space.
pub fn heading_interrupt(s: &str) -> bool {
    let b = s.as_bytes();
    let Some(i) = indent_upto(s, 3) else {
        return false;
    };
    let hashes = b[i..].iter().take_while(|&&c| c == b'#').count();
    (1..=6).contains(&hashes) && b.get(i + hashes) == Some(&b' ')
}

/// A code fence opener followed by a newline.
pub fn fence_start(s: &str) -> bool {
    let b = s.as_bytes();
    let Some(i) = indent_upto(s, 3) else {
        return false;
    };
    let Some(&c) = b.get(i) else {
        return false;
    };
    if c != b'`' && c != b'~' {
        return false;
    }
    let run = b[i..].iter().take_while(|&&x| x == c).count();
    if run < 3 {
        return false;
    }
    let end = line_end(b, i + run);
    if end == b.len() {
        return false;
    }
    c == b'~' || !b[i + run..end].contains(&b'`')
}

/// `>` with at most three spaces before it.
pub fn blockquote_start(s: &str) -> bool {
    indent_upto(s, 3).map_or(false, |i| s.as_bytes().get(i) == Some(&b'>'))
}

/// The list markers allowed to interrupt a paragraph: a bullet, `1.` or `1)`,
/// followed by a space.
pub fn list_interrupt(s: &str) -> bool {
    let b = s.as_bytes();
    let Some(i) = indent_upto(s, 3) else {
        return false;
    };
    let marker = match b.get(i) {
        Some(b'*' | b'+' | b'-') => 1,
        Some(b'1') if matches!(b.get(i + 1), Some(b'.' | b')')) => 2,
        _ => return false,
    };
    b.get(i + marker) == Some(&b' ')
}

/// Block-level HTML that may interrupt a paragraph: a known block tag, or
/// the opening of a raw text element or comment.
pub fn html_interrupt(s: &str) -> bool {
    let b = s.as_bytes();
    if b.first() != Some(&b'<') {
        return false;
    }
    let rest = &s[1..];
    if starts_with_ci(rest, "!--") || RAW_TEXT_TAGS.iter().any(|t| starts_with_ci(rest, t)) {
        return true;
    }
    block_tag_open(s).is_some()
}

/// A line holding only spaces, followed by a newline.
pub fn spaces_line(s: &str) -> bool {
    let n = s.bytes().take_while(|&b| b == b' ').count();
    n > 0 && s.as_bytes().get(n) == Some(&b'\n')
}

pub(crate) fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if h.len() < n.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    Substring::new(needle)
        .find(&haystack[from..])
        .map(|ix| from + ix)
}

/// `<tag` or `</tag` for a tag in the block tag set, followed by a space, a
/// newline, `>` or `/>`. Returns the length up to the tag name's end.
fn block_tag_open(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = 1;
    if b.get(i) == Some(&b'/') {
        i += 1;
    }
    let name_len = b[i..].iter().take_while(|&&c| isalnum(c)).count();
    if name_len == 0 {
        return None;
    }
    let name = s[i..i + name_len].to_ascii_lowercase();
    if !BLOCK_TAGS.contains(name.as_str()) {
        return None;
    }
    let end = i + name_len;
    match b.get(end) {
        Some(b' ' | b'\n' | b'>') => Some(end),
        Some(b'/') if b.get(end + 1) == Some(&b'>') => Some(end),
        _ => None,
    }
}

/// Consumes up to and including the first blank line at or after `from`, or
/// to the end of input.
fn through_blank_line(s: &str, from: usize) -> usize {
    let b = s.as_bytes();
    let mut p = from;
    while let Some(ix) = b[p..].iter().position(|&c| c == b'\n') {
        let q = p + ix;
        let mut k = q;
        let mut segments = 0;
        let mut last = q;
        while k < b.len() && b[k] == b'\n' {
            last = k;
            segments += 1;
            k += 1;
            while k < b.len() && b[k] == b' ' {
                k += 1;
            }
        }
        if segments >= 2 {
            return last + 1;
        }
        p = q + 1;
    }
    b.len()
}

/// One attribute of an HTML tag. With `inline`, any whitespace may separate
/// parts and quoted values may span lines; otherwise only spaces.
fn tag_attribute(s: &str, from: usize, inline: bool) -> Option<usize> {
    let b = s.as_bytes();
    let is_sep = |c: u8| if inline { isspace(c) } else { c == b' ' };
    let skip = |mut i: usize| {
        while i < b.len() && is_sep(b[i]) {
            i += 1;
        }
        i
    };

    let mut i = from;
    let ws = skip(i);
    if ws == i {
        return None;
    }
    i = ws;
    match b.get(i) {
        Some(&c) if isalpha(c) || c == b':' || c == b'_' => i += 1,
        _ => return None,
    }
    while i < b.len() && (isword(b[i]) || matches!(b[i], b'.' | b':' | b'-')) {
        i += 1;
    }

    let name_end = i;
    let j = skip(i);
    if b.get(j) != Some(&b'=') {
        return Some(name_end);
    }
    let v = skip(j + 1);
    match b.get(v) {
        Some(&q @ (b'"' | b'\'')) => {
            let close = b[v + 1..]
                .iter()
                .position(|&c| c == q || (!inline && c == b'\n'))
                .map(|ix| v + 1 + ix);
            match close {
                Some(end) if b[end] == q => Some(end + 1),
                _ => Some(name_end),
            }
        }
        _ => {
            let len = b[v..]
                .iter()
                .take_while(|&&c| !isspace(c) && !matches!(c, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`'))
                .count();
            if len == 0 {
                Some(name_end)
            } else {
                Some(v + len)
            }
        }
    }
}

/// An open tag body after its name: attributes, optional `/`, then `>`.
fn open_tag_rest(s: &str, from: usize, inline: bool) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = from;
    loop {
        let mut j = i;
        while j < b.len() && (if inline { isspace(b[j]) } else { b[j] == b' ' }) {
            j += 1;
        }
        if b.get(j) == Some(&b'/') {
            j += 1;
        }
        if b.get(j) == Some(&b'>') {
            return Some(j + 1);
        }
        i = tag_attribute(s, i, inline)?;
    }
}

fn tag_name_len(b: &[u8], from: usize, extra: &[u8]) -> usize {
    match b.get(from) {
        Some(&c) if isalpha(c) => {
            1 + b[from + 1..]
                .iter()
                .take_while(|&&c| isword(c) || extra.contains(&c))
                .count()
        }
        _ => 0,
    }
}

/// Only spaces or tabs remain on the line.
fn rest_of_line_blank(b: &[u8], from: usize) -> bool {
    b[from..]
        .iter()
        .take_while(|&&c| c != b'\n')
        .all(|&c| c == b' ' || c == b'\t')
}

/// A block of raw HTML, in any of the seven forms: raw text elements, comments,
/// processing instructions, declarations, CDATA, block tags, or any other
/// tag alone on its line.
pub fn html_block(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let indent = indent_upto(s, 3)?;
    if b.get(indent) != Some(&b'<') {
        return None;
    }
    let start = indent;
    let rest = &s[start + 1..];

    for tag in RAW_TEXT_TAGS {
        if starts_with_ci(rest, tag) {
            let after = start + 1 + tag.len();
            if b.get(after).map_or(false, |&c| isspace(c) || c == b'>') {
                let closing = format!("</{}>", tag);
                let mut from = after + 1;
                while let Some(ix) = find_ci(s, &closing, from) {
                    let end = line_end(b, ix + closing.len());
                    if end < b.len() {
                        return Some(skip_newlines(b, end));
                    }
                    from = ix + 1;
                }
                return Some(b.len());
            }
        }
    }

    if rest.starts_with("!--") && !rest[3..].starts_with('>') && !rest[3..].starts_with("->") {
        return Some(match find_from(s, "-->", start + 4) {
            Some(ix) => skip_newlines(b, line_end(b, ix + 3)),
            None => b.len(),
        });
    }

    if rest.starts_with('?') {
        return Some(match find_from(s, "?>", start + 2) {
            Some(ix) => skip_newlines(b, ix + 2),
            None => b.len(),
        });
    }

    if rest.starts_with('!') && b.get(start + 2).map_or(false, |&c| isalpha(c)) {
        return Some(match find_from(s, ">", start + 2) {
            Some(ix) => skip_newlines(b, ix + 1),
            None => b.len(),
        });
    }

    if rest.starts_with("![CDATA[") {
        return Some(match find_from(s, "]]>", start + 9) {
            Some(ix) => skip_newlines(b, ix + 3),
            None => b.len(),
        });
    }

    if let Some(end) = block_tag_open(&s[start..]) {
        return Some(through_blank_line(s, start + end));
    }

    if RAW_TEXT_TAGS.iter().any(|t| starts_with_ci(rest.trim_start_matches('/'), t)) {
        return None;
    }

    if b.get(start + 1) == Some(&b'/') {
        let name = tag_name_len(b, start + 2, b"-");
        if name == 0 {
            return None;
        }
        let mut i = start + 2 + name;
        while i < b.len() && isspace(b[i]) {
            i += 1;
        }
        if b.get(i) != Some(&b'>') || !rest_of_line_blank(b, i + 1) {
            return None;
        }
        return Some(through_blank_line(s, i + 1));
    }

    let name = tag_name_len(b, start + 1, b"-");
    if name == 0 {
        return None;
    }
    let end = open_tag_rest(s, start + 1 + name, false)?;
    if !rest_of_line_blank(b, end) {
        return None;
    }
    Some(through_blank_line(s, end))
}

/// An inline HTML tag, comment, processing instruction, declaration or CDATA
/// section.
pub fn html_tag(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    if b.first() != Some(&b'<') {
        return None;
    }

    if s.starts_with("<!--") {
        if s[4..].starts_with('>') || s[4..].starts_with("->") {
            return None;
        }
        return find_from(s, "-->", 4).map(|ix| ix + 3);
    }

    if b.get(1) == Some(&b'/') {
        let name = tag_name_len(b, 2, b":-");
        if name == 0 {
            return None;
        }
        let mut i = 2 + name;
        while i < b.len() && isspace(b[i]) {
            i += 1;
        }
        return (b.get(i) == Some(&b'>')).then_some(i + 1);
    }

    let name = tag_name_len(b, 1, b"-");
    if name > 0 {
        return open_tag_rest(s, 1 + name, true);
    }

    if s.starts_with("<?") {
        return find_from(s, "?>", 2).map(|ix| ix + 2);
    }

    if s.starts_with("<![CDATA[") {
        return find_from(s, "]]>", 9).map(|ix| ix + 3);
    }

    if s.starts_with("<!") {
        let letters = b[2..].iter().take_while(|&&c| isalpha(c)).count();
        if letters > 0 && b.get(2 + letters).map_or(false, |&c| isspace(c)) {
            return find_from(s, ">", 2 + letters).map(|ix| ix + 1);
        }
    }

    None
}

/// A link title at the start of `s`, quoted with `"`, `'` or parentheses.
/// Returns every length a title could have there, longest first: a
/// backslash before the closing quote may escape it or be taken literally.
///
/// Titles of reference definitions (`definition`) only honour escapes
/// inside double quotes, may not span a blank line, and may not nest
/// parentheses.
pub fn link_title(s: &str, definition: bool) -> Vec<usize> {
    let b = s.as_bytes();
    let close = match b.first() {
        Some(b'"') => b'"',
        Some(b'\'') => b'\'',
        Some(b'(') => b')',
        _ => return vec![],
    };
    let escapes = !definition || close == b'"';

    let mut ends = vec![];
    let mut i = 1;
    while i < b.len() {
        let c = b[i];
        if escapes && c == b'\\' {
            if b.get(i + 1) == Some(&close) {
                ends.push(i + 2);
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }
        if c == close {
            ends.push(i + 1);
            break;
        }
        if definition && close == b')' && c == b'(' {
            break;
        }
        if definition && close == b'\'' && c == b'\n' && matches!(b.get(i + 1), Some(b'\n')) {
            break;
        }
        i += 1;
    }

    ends.reverse();
    ends
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thematic_breaks() {
        assert_eq!(hr("***\n\nx"), Some(5));
        assert_eq!(hr(" - - -"), Some(6));
        assert_eq!(hr("_\t_ _\n"), Some(6));
        assert_eq!(hr("--"), None);
        assert_eq!(hr("    ***"), None);
        assert_eq!(hr("*-*"), None);
    }

    #[test]
    fn interrupts() {
        assert!(heading_interrupt("## x"));
        assert!(!heading_interrupt("#"));
        assert!(!heading_interrupt("#x"));
        assert!(!heading_interrupt("####### x"));
        assert!(fence_start("```rust\n"));
        assert!(!fence_start("```rust"));
        assert!(!fence_start("``` a`b\n"));
        assert!(list_interrupt("- x"));
        assert!(list_interrupt("1. x"));
        assert!(!list_interrupt("2. x"));
        assert!(html_interrupt("<div>"));
        assert!(html_interrupt("</table\n"));
        assert!(html_interrupt("<!-- c"));
        assert!(!html_interrupt("<span>"));
    }

    #[test]
    fn html_blocks() {
        assert_eq!(html_block("<div>\nhi\n\nafter"), Some(10));
        assert_eq!(html_block("<pre>\na\n\nb\n</pre>\nc"), Some(18));
        assert_eq!(html_block("<!-- x -->\n\ny"), Some(12));
        assert_eq!(html_block("<custom-el a=\"1\">\ntext"), Some(22));
        assert_eq!(html_block("<span>text</span>"), None);
        assert_eq!(html_block("    <div>"), None);
        assert_eq!(html_block("<prefix>"), None);
    }

    #[test]
    fn titles() {
        assert_eq!(link_title("\"a\" b", false), vec![3]);
        assert_eq!(link_title(r#""a\"b" c"#, false), vec![6, 4]);
        assert_eq!(link_title("(a(b)c)", false), vec![5]);
        assert_eq!(link_title("'a\\'b'", true), vec![4]);
        assert_eq!(link_title("'a\n\nb'", true), Vec::<usize>::new());
        assert_eq!(link_title("(a(b))", true), Vec::<usize>::new());
        assert_eq!(link_title("\"open", false), Vec::<usize>::new());
        assert_eq!(link_title("x", false), Vec::<usize>::new());
    }

    #[test]
    fn inline_tags() {
        assert_eq!(html_tag("<a href=\"x\">y"), Some(12));
        assert_eq!(html_tag("</a >z"), Some(5));
        assert_eq!(html_tag("<br/>"), Some(5));
        assert_eq!(html_tag("<!-- c -->"), Some(10));
        assert_eq!(html_tag("<!DOCTYPE html>"), Some(15));
        assert_eq!(html_tag("<a b='c\nd'>"), Some(11));
        assert_eq!(html_tag("< a>"), None);
        assert_eq!(html_tag("<a"), None);
    }
}
