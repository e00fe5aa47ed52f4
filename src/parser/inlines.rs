//! Inline rules. Each looks at the start of the remaining text of an inline
//! run and returns a token whose `raw` is the prefix it consumed.

pub(crate) mod emphasis;

use crate::html::escape;
use crate::nodes::{NodeLink, Token};
use crate::parser::block::scan_ref_label;
use crate::parser::{Lexer, RefMap};
use crate::scanners;
use crate::strings;
use crate::Result;

/// What an inline rule may know beyond the remaining text.
pub(crate) struct Cursor<'m> {
    /// The masked copy of the run, aligned with the remaining text.
    pub masked: &'m str,
    /// The last character of the preceding text token, if the previous
    /// token was text.
    pub prev_char: Option<char>,
}

/// Builds the masked copy of an inline run used to look for closing
/// emphasis delimiters. Known reference links, inline links, code spans
/// and tags are blanked out to `[aaa]` of the same length, and escaped `*`
/// and `_` become `++`.
pub(crate) fn mask(src: &str, links: &RefMap) -> String {
    let mut masked = src.to_string();

    if !links.is_empty() {
        let mut i = 0;
        while i < masked.len() {
            match reference_span(&masked, i) {
                Some((end, label)) => {
                    if links.contains(label) {
                        blank(&mut masked, i, end);
                    }
                    i = end;
                }
                None => i += char_len(&masked, i),
            }
        }
    }

    let mut i = 0;
    while i < masked.len() {
        match skipped_span(&masked, i) {
            Some(end) => {
                blank(&mut masked, i, end);
                i = end;
            }
            None => i += char_len(&masked, i),
        }
    }

    let mut run = 0;
    let mut escaped_at = vec![];
    for (i, c) in masked.bytes().enumerate() {
        match c {
            b'\\' => {
                run += 1;
                continue;
            }
            b'*' | b'_' if run % 2 == 1 => escaped_at.push(i - 1),
            _ => {}
        }
        run = 0;
    }
    for i in escaped_at {
        masked.replace_range(i..i + 2, "++");
    }

    masked
}

fn char_len(s: &str, at: usize) -> usize {
    s[at..].chars().next().map_or(1, char::len_utf8)
}

fn blank(masked: &mut String, start: usize, end: usize) {
    let filler = format!("[{}]", "a".repeat(end - start - 2));
    masked.replace_range(start..end, &filler);
}

/// A reference link or image at `at`, as `[text][label]`, `[label][]` or
/// `[label]` not followed by `(`. Returns its end and its label.
fn reference_span(s: &str, at: usize) -> Option<(usize, &str)> {
    let b = s.as_bytes();
    let open = at + usize::from(b[at] == b'!');
    if b.get(open) != Some(&b'[') {
        return None;
    }

    if let Some(close) = link_label(s, open + 1) {
        if b.get(close + 1) == Some(&b'[') {
            if let Some(rc) = scan_ref_label(s, close + 2) {
                return Some((rc + 1, &s[close + 2..rc]));
            }
        }
    }

    let rc = scan_ref_label(s, open + 1)?;
    let label = &s[open + 1..rc];
    let after = rc + 1;
    if s[after..].starts_with("[]") && b.get(after + 2) != Some(&b'(') {
        return Some((after + 2, label));
    }
    (b.get(after) != Some(&b'(')).then_some((after, label))
}

/// Spans emphasis never closes inside: `[text](dest)`, code spans and tags.
fn skipped_span(s: &str, at: usize) -> Option<usize> {
    let b = s.as_bytes();
    let find = |from: usize, c: char| s[from..].find(c).map(|ix| from + ix);
    match b[at] {
        b'[' => {
            let close = find(at + 1, ']')?;
            if b.get(close + 1) != Some(&b'(') {
                return None;
            }
            find(close + 2, ')').map(|ix| ix + 1)
        }
        b'`' => find(at + 1, '`').map(|ix| ix + 1),
        b'<' => find(at + 1, '>').map(|ix| ix + 1),
        _ => None,
    }
}

/// The text of a link: bracketed groups one level deep, escapes, code spans
/// and anything but brackets. Returns the index of the closing `]`.
pub(crate) fn link_label(s: &str, from: usize) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = from;
    loop {
        match *b.get(i)? {
            b']' => return Some(i),
            b'[' => {
                i += 1;
                loop {
                    match *b.get(i)? {
                        b']' => break,
                        b'[' => return None,
                        b'\\' => i += 1 + escaped_char_len(s, i + 1)?,
                        _ => i += 1,
                    }
                }
                i += 1;
            }
            b'\\' => i += 1 + escaped_char_len(s, i + 1)?,
            b'`' => i = i + 1 + s[i + 1..].find('`')? + 1,
            _ => i += 1,
        }
    }
}

/// Length of the character after a backslash, which may not be a newline.
fn escaped_char_len(s: &str, at: usize) -> Option<usize> {
    s[at..].chars().next().filter(|&c| c != '\n').map(char::len_utf8)
}

fn skip_whitespace(s: &str, from: usize) -> usize {
    from + s[from..]
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(s.len() - from)
}

/// A backslash before ASCII punctuation.
pub(crate) fn backslash_escape(_: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let b = src.as_bytes();
    if b.first() != Some(&b'\\') || !b.get(1).map_or(false, |&c| crate::ctype::ispunct(c)) {
        return Ok(None);
    }
    Ok(Some(Token::Escape {
        raw: src[..2].to_string(),
        text: escape(&src[1..2], false).into_owned(),
    }))
}

/// Inline HTML. Tracks whether the lexer is inside a link or a raw text
/// element.
pub(crate) fn tag(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let Some(len) = scanners::html_tag(src) else {
        return Ok(None);
    };
    let raw = &src[..len];

    let state = lexer.state_mut();
    if !state.in_link && scanners::starts_with_ci(raw, "<a ") {
        state.in_link = true;
    } else if state.in_link && scanners::starts_with_ci(raw, "</a>") {
        state.in_link = false;
    }
    if !state.in_raw_block && raw_block_tag(raw, "<") {
        state.in_raw_block = true;
    } else if state.in_raw_block && raw_block_tag(raw, "</") {
        state.in_raw_block = false;
    }

    if lexer.options().parse.sanitize {
        return Ok(Some(Token::text(raw, escape(raw, false))));
    }
    Ok(Some(Token::Html {
        raw: raw.to_string(),
        text: raw.to_string(),
        block: false,
    }))
}

fn raw_block_tag(raw: &str, opener: &str) -> bool {
    let Some(rest) = raw.strip_prefix(opener) else {
        return false;
    };
    ["pre", "code", "kbd", "script"].iter().any(|name| {
        scanners::starts_with_ci(rest, name)
            && rest[name.len()..]
                .chars()
                .next()
                .map_or(false, |c| c == '>' || c.is_whitespace())
    })
}

/// Where the parts of an inline link were found.
pub(crate) struct LinkSpan {
    /// Length of `[` or `![`.
    open: usize,
    /// The closing `]` of the text.
    label_end: usize,
    dest: (usize, usize),
    /// Quotes included.
    title: Option<(usize, usize)>,
    end: usize,
}

/// `[text](destination "title")`, or the `![` image form.
pub(crate) fn scan_inline_link(src: &str) -> Option<LinkSpan> {
    let b = src.as_bytes();
    let open = if src.starts_with("![") {
        2
    } else if src.starts_with('[') {
        1
    } else {
        return None;
    };
    let label_end = link_label(src, open)?;
    if b.get(label_end + 1) != Some(&b'(') {
        return None;
    }

    let start = skip_whitespace(src, label_end + 2);
    let span = |dest_end: usize| {
        link_tail(src, dest_end).map(|(title, end)| LinkSpan {
            open,
            label_end,
            dest: (start, dest_end),
            title,
            end,
        })
    };

    if b.get(start) == Some(&b'<') {
        if let Some(found) = angle_destination(src, start).and_then(span) {
            return Some(found);
        }
    }

    let bare_end = start
        + src[start..]
            .find(|c: char| c.is_whitespace() || (c as u32) < 0x20)
            .unwrap_or(src.len() - start);
    if let Some(found) = span(bare_end) {
        return Some(found);
    }
    // Backtrack to a shorter destination ending right before a `)`.
    (start..bare_end)
        .rev()
        .filter(|&k| b[k] == b')')
        .find_map(span)
}

/// `<...>` without newlines or unescaped angle brackets. Returns its end.
fn angle_destination(src: &str, at: usize) -> Option<usize> {
    let b = src.as_bytes();
    let mut i = at + 1;
    loop {
        match *b.get(i)? {
            b'>' if i > at + 1 => return Some(i + 1),
            b'\n' | b'<' | b'>' => return None,
            b'\\' => i += 1 + escaped_char_len(src, i + 1)?,
            _ => i += char_len(src, i),
        }
    }
}

/// An optional title and the closing `)` after a destination ending at
/// `at`.
fn link_tail(src: &str, at: usize) -> Option<(Option<(usize, usize)>, usize)> {
    let b = src.as_bytes();
    let ws = skip_whitespace(src, at);
    if ws > at {
        for len in scanners::link_title(&src[ws..], false) {
            let after = skip_whitespace(src, ws + len);
            if b.get(after) == Some(&b')') {
                return Some((Some((ws, ws + len)), after + 1));
            }
        }
    }
    (b.get(ws) == Some(&b')')).then_some((None, ws + 1))
}

/// A `{...}` attribute block right after a link, on the same line. Returns
/// the body and the end of the block.
pub(crate) fn trailing_attributes(src: &str, at: usize) -> Option<(&str, usize)> {
    let open = skip_whitespace(src, at);
    if src.as_bytes().get(open) != Some(&b'{') {
        return None;
    }
    let len = src[open + 1..].find(['}', '\n'])?;
    let close = open + 1 + len;
    (src.as_bytes()[close] == b'}').then(|| (&src[open + 1..close], close + 1))
}

pub(crate) fn link(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    match scan_inline_link(src) {
        Some(span) => finish_link(lexer, src, span, false),
        None => Ok(None),
    }
}

/// Completes an inline link: checks the destination, drops what follows an
/// unbalanced `)`, and picks up a trailing attribute block when asked.
pub(crate) fn finish_link(
    lexer: &mut Lexer<'_>,
    src: &str,
    span: LinkSpan,
    with_attributes: bool,
) -> Result<Option<Token>> {
    let mut dest = &src[span.dest.0..span.dest.1];
    let mut title = span.title;
    let mut end = span.end;
    let mut truncated = false;

    let trimmed = dest.trim();
    if trimmed.starts_with('<') {
        if !trimmed.ends_with('>') || trimmed.len() < 2 {
            return Ok(None);
        }
        let inner = &trimmed[..trimmed.len() - 1];
        let slashes = inner.len() - strings::rtrim_char(inner, '\\', false).len();
        if slashes % 2 == 1 {
            return Ok(None);
        }
    } else if let Some(ix) = strings::find_closing_bracket(dest, b'(', b')') {
        dest = &dest[..ix];
        end = span.dest.0 + ix + 1;
        title = None;
        truncated = true;
    }

    let mut href = dest.trim();
    if href.starts_with('<') {
        href = href.get(1..href.len() - 1).unwrap_or_default();
    }
    let title = title.map(|(s, e)| strings::unescape(&src[s + 1..e - 1]).into_owned());

    let mut attributes = None;
    if with_attributes && !truncated {
        if let Some((body, after)) = trailing_attributes(src, end) {
            attributes = Some(body.to_string());
            end = after;
        }
    }

    let label = &src[span.open..span.label_end];
    output_link(
        lexer,
        &src[..end],
        label,
        strings::unescape(href).into_owned(),
        title,
        span.open == 2,
        attributes,
    )
    .map(Some)
}

/// `[text](destination "title")` the markdown.pl way: the destination runs
/// to the first `)`, and a quoted title is split off its end.
pub(crate) fn link_pedantic(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let open = if src.starts_with("![") {
        2
    } else if src.starts_with('[') {
        1
    } else {
        return Ok(None);
    };
    let Some(label_end) = link_label(src, open) else {
        return Ok(None);
    };
    if b.get(label_end + 1) != Some(&b'(') {
        return Ok(None);
    }
    let start = label_end + 2;
    let Some(close) = src[start..].find([')', '\n']).map(|ix| start + ix) else {
        return Ok(None);
    };
    if b[close] != b')' {
        return Ok(None);
    }

    let inner = &src[start..close];
    let trimmed = inner.trim();
    let (mut href, title) = match split_pedantic_title(inner) {
        Some((href, title)) => (href.trim(), Some(title)),
        None => (inner.trim(), None),
    };
    if href.starts_with('<') {
        href = if trimmed.ends_with('>') {
            href.get(1..href.len() - 1).unwrap_or_default()
        } else {
            &href[1..]
        };
    }

    output_link(
        lexer,
        &src[..close + 1],
        &src[open..label_end],
        strings::unescape(href).into_owned(),
        title.map(|t| strings::unescape(t).into_owned()),
        open == 2,
        None,
    )
    .map(Some)
}

/// `destination "title"`: a destination without quotes ending in a
/// non-space, whitespace, then a title quoted with `"` or `'` running to the
/// last matching quote.
fn split_pedantic_title(s: &str) -> Option<(&str, &str)> {
    let quote_at = s.find(['"', '\'']).unwrap_or(s.len());
    let longest = (quote_at + 1).min(s.len());
    (1..=longest).rev().filter(|&end| s.is_char_boundary(end)).find_map(|end| {
        let last = s[..end].chars().next_back()?;
        if last.is_whitespace() {
            return None;
        }
        let q = skip_whitespace(s, end);
        if q == end {
            return None;
        }
        let quote = s[q..].chars().next().filter(|&c| c == '"' || c == '\'')?;
        let close = s[q + 1..].rfind(quote)?;
        Some((&s[..end], &s[q + 1..q + 1 + close]))
    })
}

/// Builds a link or image token. Link text is tokenized with the lexer in
/// link state so bare URLs inside it stay text.
pub(crate) fn output_link(
    lexer: &mut Lexer<'_>,
    raw: &str,
    label: &str,
    href: String,
    title: Option<String>,
    image: bool,
    attributes: Option<String>,
) -> Result<Token> {
    let title = title
        .filter(|t| !t.is_empty())
        .map(|t| escape(&t, false).into_owned());
    let text = label.replace("\\[", "[").replace("\\]", "]");

    if image {
        return Ok(Token::Image(NodeLink {
            raw: raw.to_string(),
            href,
            title,
            text: escape(&text, false).into_owned(),
            tokens: vec![],
            attributes,
        }));
    }

    lexer.state_mut().in_link = true;
    let tokens = lexer.inline_tokens(&text);
    lexer.state_mut().in_link = false;
    Ok(Token::Link(NodeLink {
        raw: raw.to_string(),
        href,
        title,
        text,
        tokens: tokens?,
        attributes,
    }))
}

/// `[text][label]`, `[label][]` and `[label]`. An unknown label leaves the
/// opening character as text.
pub(crate) fn reflink(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let open = if src.starts_with("![") {
        2
    } else if src.starts_with('[') {
        1
    } else {
        return Ok(None);
    };

    let full = link_label(src, open).and_then(|close| {
        if b.get(close + 1) != Some(&b'[') {
            return None;
        }
        scan_ref_label(src, close + 2).map(|rc| (close, &src[close + 2..rc], rc + 1))
    });
    match full {
        Some((close, key, end)) => resolve_reference(lexer, src, open, close, key, end),
        None => nolink(lexer, src, open),
    }
}

/// `[text] [label]` is allowed, and an empty second label falls back to
/// the text.
pub(crate) fn reflink_pedantic(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let open = if src.starts_with("![") {
        2
    } else if src.starts_with('[') {
        1
    } else {
        return Ok(None);
    };

    let full = link_label(src, open).and_then(|close| {
        let i = skip_whitespace(src, close + 1);
        if b.get(i) != Some(&b'[') {
            return None;
        }
        let rc = i + 1 + src[i + 1..].find(']')?;
        let key = &src[i + 1..rc];
        let key = if key.is_empty() { &src[open..close] } else { key };
        Some((close, key, rc + 1))
    });
    match full {
        Some((close, key, end)) => resolve_reference(lexer, src, open, close, key, end),
        None => nolink(lexer, src, open),
    }
}

fn nolink(lexer: &mut Lexer<'_>, src: &str, open: usize) -> Result<Option<Token>> {
    let Some(rc) = scan_ref_label(src, open) else {
        return Ok(None);
    };
    let end = if src[rc + 1..].starts_with("[]") {
        rc + 3
    } else {
        rc + 1
    };
    resolve_reference(lexer, src, open, rc, &src[open..rc], end)
}

fn resolve_reference(
    lexer: &mut Lexer<'_>,
    src: &str,
    open: usize,
    label_end: usize,
    key: &str,
    end: usize,
) -> Result<Option<Token>> {
    let target = lexer
        .links()
        .lookup(key)
        .filter(|r| !r.href.is_empty())
        .cloned();
    let Some(target) = target else {
        let first = &src[..1];
        return Ok(Some(Token::text(first, first)));
    };
    output_link(
        lexer,
        &src[..end],
        &src[open..label_end],
        target.href,
        target.title,
        open == 2,
        None,
    )
    .map(Some)
}

/// A run of backticks, code, and a closing run of the same length.
pub(crate) fn codespan(_: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let n = b.iter().take_while(|&&c| c == b'`').count();
    if n == 0 || n == b.len() {
        return Ok(None);
    }

    let mut i = n + 1;
    while i < b.len() {
        if b[i] != b'`' {
            i += 1;
            continue;
        }
        let run = b[i..].iter().take_while(|&&c| c == b'`').count();
        if run == n {
            let mut text = src[n..i].replace('\n', " ");
            if text.bytes().any(|c| c != b' ') && text.starts_with(' ') && text.ends_with(' ') {
                text = text[1..text.len() - 1].to_string();
            }
            return Ok(Some(Token::Codespan {
                raw: src[..i + n].to_string(),
                text: escape(&text, true).into_owned(),
            }));
        }
        i += run;
    }
    Ok(None)
}

/// Two or more spaces, or a backslash, before a newline that does not end
/// the run. With `breaks`, any newline.
pub(crate) fn br(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let options = lexer.options();
    let breaks = options.parse.breaks && !options.parse.pedantic;
    let b = src.as_bytes();

    let nl = if b.first() == Some(&b'\\') {
        1
    } else {
        let spaces = b.iter().take_while(|&&c| c == b' ').count();
        if spaces < 2 && !breaks {
            return Ok(None);
        }
        spaces
    };
    if b.get(nl) != Some(&b'\n') || src[nl + 1..].trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(Token::Br {
        raw: src[..nl + 1].to_string(),
    }))
}

/// `~text~` or `~~text~~`.
pub(crate) fn del(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    if !lexer.options().extension.strikethrough {
        return Ok(None);
    }
    let tildes = src.bytes().take_while(|&c| c == b'~').count().min(2);
    let edge = |c: char| !c.is_whitespace() && c != '~';

    for n in (1..=tildes).rev() {
        let delim = &src[..n];
        if !src[n..].chars().next().map_or(false, edge) {
            continue;
        }
        let mut prev = None;
        for (ix, c) in src[n..].char_indices() {
            let at = n + ix;
            if prev.map_or(false, edge)
                && src[at..].starts_with(delim)
                && src.as_bytes().get(at + n) != Some(&b'~')
            {
                let text = &src[n..at];
                let tokens = lexer.inline_tokens(text)?;
                return Ok(Some(Token::Del {
                    raw: src[..at + n].to_string(),
                    text: text.to_string(),
                    tokens,
                }));
            }
            prev = Some(c);
        }
    }
    Ok(None)
}

/// Characters that may start an email address in running text.
fn is_email_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".!#$%&'*+/=?_`{|}~-".contains(c)
}

/// One or more email characters and an `@` at `s`.
fn email_ahead(s: &str) -> bool {
    let n = s.find(|c: char| !is_email_char(c)).unwrap_or(s.len());
    n > 0 && s[n..].starts_with('@')
}

/// Spaces before a newline: two or more, or with `breaks` any number.
fn line_break_ahead(s: &str, breaks: bool) -> bool {
    let n = strings::leading_spaces(s);
    (n >= 2 || breaks) && s[n..].starts_with('\n')
}

/// Plain text up to the next character another rule might want.
pub(crate) fn inline_text(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    let options = lexer.options();
    let pedantic = options.parse.pedantic;
    let tildes = options.extension.strikethrough && !pedantic;
    let links = options.extension.autolink && !pedantic;
    let breaks = options.parse.breaks && !pedantic;

    let Some(first) = src.chars().next() else {
        return Ok(None);
    };
    let grouped = |c: char| c == '`' || (tildes && c == '~');
    let first_end = if grouped(first) {
        src.find(|c: char| !grouped(c)).unwrap_or(src.len())
    } else {
        first.len_utf8()
    };

    let stops_at = |s: &str| {
        let Some(c) = s.chars().next() else {
            return true;
        };
        matches!(c, '\\' | '<' | '!' | '[' | '`' | '*' | '_')
            || (tildes && c == '~')
            || (links
                && (s.starts_with("http://")
                    || s.starts_with("https://")
                    || s.starts_with("ftp://")
                    || s.starts_with("www.")))
            || (breaks && line_break_ahead(s, true))
    };

    let mut end = first_end;
    let rest = &src[first_end..];
    if !(line_break_ahead(rest, breaks) || (links && email_ahead(rest))) {
        for (ix, c) in rest.char_indices() {
            let at = first_end + ix;
            if stops_at(&src[at..]) {
                end = at;
                break;
            }
            let next = at + c.len_utf8();
            if (c != ' ' && line_break_ahead(&src[next..], breaks))
                || (links && !is_email_char(c) && email_ahead(&src[next..]))
            {
                end = next;
                break;
            }
            end = next;
        }
    }

    let raw = &src[..end];
    let text = if lexer.state().in_raw_block {
        if options.parse.sanitize {
            escape(raw, false).into_owned()
        } else {
            raw.to_string()
        }
    } else if options.parse.smart {
        escape(&strings::smartypants(raw), false).into_owned()
    } else {
        escape(raw, false).into_owned()
    };
    Ok(Some(Token::text(raw, text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ResolvedReference;

    #[test]
    fn masking_keeps_length() {
        let mut links = RefMap::new();
        links.insert(
            "ref",
            ResolvedReference {
                href: "/".to_string(),
                title: None,
            },
        );
        let src = "*a [ref] `c*` <b*> [x](y*) \\* é*";
        let masked = mask(src, &links);
        assert_eq!(masked.len(), src.len());
        assert_eq!(masked, "*a [aaa] [aa] [aa] [aaaaa] ++ é*");
    }

    #[test]
    fn escaped_delimiters_after_even_backslashes_stay() {
        assert_eq!(mask("\\\\*a", &RefMap::new()), "\\\\*a");
        assert_eq!(mask("\\*\\*", &RefMap::new()), "++++");
    }

    #[test]
    fn labels() {
        assert_eq!(link_label("a [b] `]` \\] c](", 0), Some(14));
        assert_eq!(link_label("a [b [c]]", 0), None);
        assert_eq!(link_label("a `b]", 0), None);
    }

    #[test]
    fn inline_link_spans() {
        let span = scan_inline_link("[a](b \"t\") x").unwrap();
        assert_eq!(span.dest, (4, 5));
        assert_eq!(span.title, Some((6, 9)));
        assert_eq!(span.end, 10);

        let span = scan_inline_link("[a](b)c)").unwrap();
        assert_eq!(span.dest, (4, 7));
        assert_eq!(span.end, 8);

        let span = scan_inline_link("![a](<b c>)").unwrap();
        assert_eq!(span.dest, (5, 10));
        assert!(scan_inline_link("[a](b").is_none());
        assert!(scan_inline_link("[a] (b)").is_none());
    }

    #[test]
    fn pedantic_titles() {
        assert_eq!(split_pedantic_title("/u \"t\""), Some(("/u", "t")));
        assert_eq!(split_pedantic_title("/u 'a' b'"), Some(("/u", "a' b")));
        assert_eq!(split_pedantic_title("/u"), None);
    }

    #[test]
    fn attribute_blocks() {
        assert_eq!(trailing_attributes("  {.a #b} x", 0), Some((".a #b", 9)));
        assert_eq!(trailing_attributes("{.a\n}", 0), None);
        assert_eq!(trailing_attributes("x {.a}", 0), None);
    }
}
