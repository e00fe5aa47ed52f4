//! Block rules. Each looks at the start of the remaining source and returns
//! a token whose `raw` is the prefix it consumed.

use crate::html::escape;
use crate::nodes::{CodeBlockStyle, ListItem, NodeList, Token};
use crate::parser::{table, Lexer};
use crate::scanners::{self, line_end, skip_newlines};
use crate::strings;
use crate::Result;

pub(crate) fn space(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let mut end = 0;
    let mut i = 0;
    loop {
        let j = i + b[i..].iter().take_while(|&&c| c == b' ').count();
        if j == b.len() {
            end = j;
            break;
        }
        if b[j] != b'\n' {
            break;
        }
        i = j + 1;
        end = i;
    }

    Ok((end > 0).then(|| Token::Space {
        raw: src[..end].to_string(),
    }))
}

/// Indented code: lines starting with four spaces, with blank lines between
/// them.
pub(crate) fn code(lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let mut i = 0;
    while src[i..].starts_with("    ") && b.get(i + 4).map_or(false, |&c| c != b'\n') {
        i = line_end(b, i + 4);
        if i == b.len() {
            break;
        }
        i += 1;
        loop {
            let j = i + b[i..].iter().take_while(|&&c| c == b' ').count();
            if j == b.len() {
                i = j;
                break;
            }
            if b[j] != b'\n' {
                break;
            }
            i = j + 1;
        }
    }
    if i == 0 {
        return Ok(None);
    }

    let raw = &src[..i];
    let mut text = raw
        .split('\n')
        .map(|line| &line[line.bytes().take(4).take_while(|&c| c == b' ').count()..])
        .collect::<Vec<_>>()
        .join("\n");
    if !lexer.options().parse.pedantic {
        text.truncate(text.trim_end_matches('\n').len());
    }

    Ok(Some(Token::Code {
        raw: raw.to_string(),
        lang: None,
        text,
        style: CodeBlockStyle::Indented,
    }))
}

/// A closing fence for an opener of `run` times `c`, at `at`. Returns the
/// end of the line, before its newline.
fn closing_fence(src: &str, at: usize, c: u8, run: usize) -> Option<usize> {
    let s = &src[at..];
    let b = s.as_bytes();
    let mut i = scanners::indent_upto(s, 3)?;
    let n = b[i..].iter().take_while(|&&x| x == c).count();
    if n < run {
        return None;
    }
    i += n;
    i += b[i..].iter().take_while(|&&x| x == b'`' || x == b'~').count();
    i += b[i..].iter().take_while(|&&x| x == b' ').count();
    (i == b.len() || b[i] == b'\n').then_some(at + i)
}

/// Fenced code. A block with no closing fence runs to the end of input.
pub(crate) fn fences(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let Some(indent) = scanners::indent_upto(src, 3) else {
        return Ok(None);
    };
    let c = match b.get(indent) {
        Some(&c @ (b'`' | b'~')) => c,
        _ => return Ok(None),
    };
    let run = b[indent..].iter().take_while(|&&x| x == c).count();
    if run < 3 {
        return Ok(None);
    }
    let info_end = line_end(b, indent + run);
    let info = &src[indent + run..info_end];
    if info_end == b.len() || (c == b'`' && info.contains('`')) {
        return Ok(None);
    }

    let body = info_end + 1;
    let (text, end) = match closing_fence(src, body, c, run) {
        Some(end) if body < b.len() => ("", end),
        _ => {
            let mut k = body;
            loop {
                match b[k..].iter().position(|&x| x == b'\n') {
                    Some(ix) => {
                        let nl = k + ix;
                        if let Some(end) = closing_fence(src, nl + 1, c, run) {
                            break (&src[body..nl], end);
                        }
                        if nl + 1 == b.len() {
                            break (&src[body..nl], b.len());
                        }
                        k = nl + 1;
                    }
                    None => break (&src[body..], b.len()),
                }
            }
        }
    };

    let raw = &src[..end];
    let lang = strings::unescape(info.trim());
    Ok(Some(Token::Code {
        raw: raw.to_string(),
        lang: (!lang.is_empty()).then(|| lang.into_owned()),
        text: strings::indent_code_compensation(raw, text).into_owned(),
        style: CodeBlockStyle::Fenced,
    }))
}

fn strip_closing_sequence(text: &str, always: bool) -> &str {
    if !text.ends_with('#') {
        return text;
    }
    let trimmed = strings::rtrim_char(text, '#', false);
    if always || trimmed.is_empty() || trimmed.ends_with(' ') {
        trimmed.trim()
    } else {
        text
    }
}

fn heading_token(src: &str, depth: usize, text: &str, end: usize) -> Token {
    Token::Heading {
        raw: src[..end].to_string(),
        depth: depth as u8,
        text: text.to_string(),
        tokens: vec![],
    }
}

/// `## Heading`, with an optional closing sequence of `#`.
pub(crate) fn heading(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let Some(i) = scanners::indent_upto(src, 3) else {
        return Ok(None);
    };
    let depth = b[i..].iter().take_while(|&&c| c == b'#').count();
    if !(1..=6).contains(&depth) {
        return Ok(None);
    }
    if src[i + depth..].chars().next().map_or(false, |c| !c.is_whitespace()) {
        return Ok(None);
    }

    let eol = line_end(b, i + depth);
    let text = strip_closing_sequence(src[i + depth..eol].trim(), false);
    Ok(Some(heading_token(src, depth, text, skip_newlines(b, eol))))
}

/// `##Heading`: no space needed, closing `#`s always removed.
pub(crate) fn heading_pedantic(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let depth = b.iter().take_while(|&&c| c == b'#').count();
    if !(1..=6).contains(&depth) {
        return Ok(None);
    }
    let eol = line_end(b, depth);
    let text = strip_closing_sequence(src[depth..eol].trim(), true);
    Ok(Some(heading_token(src, depth, text, skip_newlines(b, eol))))
}

pub(crate) fn hr(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    Ok(scanners::hr(src).map(|end| Token::Hr {
        raw: src[..end].to_string(),
    }))
}

/// Whether the line at the start of `line` may cut a paragraph short.
pub(crate) fn interrupts_paragraph(lexer: &Lexer<'_>, line: &str) -> bool {
    if scanners::hr(line).is_some()
        || scanners::blockquote_start(line)
        || scanners::spaces_line(line)
    {
        return true;
    }

    let b = line.as_bytes();
    if lexer.options().parse.pedantic {
        let spaces = strings::leading_spaces(line);
        let hashes = b[spaces..].iter().take_while(|&&c| c == b'#').count();
        if (1..=6).contains(&hashes) {
            let rest = &b[spaces + hashes..];
            let pad = rest.iter().take_while(|&&c| c == b' ').count();
            if rest.get(pad).map_or(false, |&c| c != b'\n') {
                return true;
            }
        }
        let eol = line_end(b, 0);
        return eol > 0 && eol < b.len() && setext_underline(line, eol + 1).is_some();
    }

    scanners::heading_interrupt(line)
        || (lexer.options().extension.table && table::starts_table(line))
        || scanners::fence_start(line)
        || scanners::list_interrupt(line)
        || scanners::html_interrupt(line)
}

fn blockquote_line_marker(line: &str) -> Option<usize> {
    let i = scanners::indent_upto(line, 3)?;
    (line.as_bytes().get(i) == Some(&b'>')).then_some(i + 1)
}

pub(crate) fn blockquote(lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let mut i = 0;
    while i < b.len() {
        let Some(marker) = blockquote_line_marker(&src[i..]) else {
            break;
        };
        let mut content = i + marker;
        if b.get(content) == Some(&b' ') {
            content += 1;
        }
        let mut eol = line_end(b, content);
        if eol > content {
            // lazy continuation
            while eol < b.len() {
                let next = &src[eol + 1..];
                let next_eol = line_end(b, eol + 1);
                if next_eol == eol + 1
                    || blockquote_line_marker(next).is_some()
                    || interrupts_paragraph(lexer, next)
                {
                    break;
                }
                eol = next_eol;
            }
        }
        i = if eol < b.len() { eol + 1 } else { eol };
    }
    if i == 0 {
        return Ok(None);
    }

    let raw = &src[..i];
    let text = raw
        .split('\n')
        .map(|line| {
            let spaces = strings::leading_spaces(line);
            if line.as_bytes().get(spaces) == Some(&b'>') {
                let rest = &line[spaces + 1..];
                rest.strip_prefix([' ', '\t']).unwrap_or(rest)
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let tokens = lexer.block_tokens(&text)?;
    Ok(Some(Token::Blockquote {
        raw: raw.to_string(),
        text,
        tokens,
    }))
}

/// A list marker at the start of `s`, after at most `max` spaces. Returns
/// the marker's end. With `only`, the marker must end in that byte.
fn list_marker(s: &str, max: usize, only: Option<u8>) -> Option<usize> {
    let b = s.as_bytes();
    let i = scanners::indent_upto(s, max)?;
    let end = match b.get(i)? {
        b'*' | b'+' | b'-' => i + 1,
        c if c.is_ascii_digit() => {
            let digits = b[i..].iter().take_while(|c| c.is_ascii_digit()).count();
            if digits > 9 || !matches!(b.get(i + digits), Some(b'.' | b')')) {
                return None;
            }
            i + digits + 1
        }
        _ => return None,
    };
    match only {
        Some(c) if b[end - 1] != c => None,
        _ => Some(end),
    }
}

/// The rest of a bullet line: nothing, or a space or tab and anything up to
/// the newline. Returns the end, newline included.
fn item_line_rest(b: &[u8], from: usize) -> Option<usize> {
    match b.get(from) {
        None => Some(from),
        Some(b'\n') => Some(from + 1),
        Some(b' ' | b'\t') => {
            let eol = line_end(b, from);
            Some((eol + 1).min(b.len()))
        }
        Some(_) => None,
    }
}

fn next_bullet(line: &str, max: usize) -> bool {
    list_marker(line, max, None)
        .map_or(false, |end| matches!(line.as_bytes().get(end), None | Some(b' ')))
}

fn fence_begin(line: &str, max: usize) -> bool {
    scanners::indent_upto(line, max)
        .map_or(false, |i| line[i..].starts_with("```") || line[i..].starts_with("~~~"))
}

fn heading_begin(line: &str, max: usize) -> bool {
    scanners::indent_upto(line, max).map_or(false, |i| line[i..].starts_with('#'))
}

fn first_non_space(s: &str) -> Option<usize> {
    s.bytes().position(|c| c != b' ')
}

/// Pedantic continuation lines: indentation made of whole four-space steps
/// is normalized to two spaces.
fn pedantic_indent(line: &str) -> std::borrow::Cow<'_, str> {
    let spaces = strings::leading_spaces(line);
    let cut = spaces.min(4);
    if cut > 0 && spaces < line.len() && (spaces - cut) % 4 == 0 {
        format!("  {}", &line[cut..]).into()
    } else {
        line.into()
    }
}

pub(crate) fn list(lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let pedantic = lexer.options().parse.pedantic;
    let tasks = lexer.options().extension.tasklist;
    let b = src.as_bytes();

    let Some(marker_end) = list_marker(src, 3, None) else {
        return Ok(None);
    };
    match b.get(marker_end) {
        None | Some(b'\n') => {}
        Some(b' ' | b'\t') if b.get(marker_end + 1).map_or(false, |&c| c != b'\n') => {}
        _ => return Ok(None),
    }

    let bullet = src[..marker_end].trim_start_matches(' ');
    let ordered = bullet.len() > 1;
    let start = if ordered {
        bullet[..bullet.len() - 1].parse::<u32>().ok()
    } else {
        None
    };
    let only = match (ordered, pedantic) {
        (_, true) if !ordered => None,
        _ => bullet.as_bytes().last().copied(),
    };

    let mut items: Vec<ListItem> = vec![];
    let mut list_raw = String::new();
    let mut loose = false;
    let mut ends_with_blank = false;
    let mut rest = src;

    while !rest.is_empty() {
        let Some(cap1) = list_marker(rest, 3, only) else {
            break;
        };
        if ordered != (rest[..cap1].trim_start_matches(' ').len() > 1) {
            break;
        }
        let rb = rest.as_bytes();
        let Some(cap2_end) = item_line_rest(rb, cap1) else {
            break;
        };
        if scanners::hr(rest).is_some() {
            break;
        }

        let cap2 = &rest[cap1..cap2_end];
        let mut raw = rest[..cap2_end].to_string();
        rest = &rest[cap2_end..];

        let first = strings::first_line(cap2);
        let tabs = first.bytes().take_while(|&c| c == b'\t').count();
        let line = format!("{}{}", " ".repeat(3 * tabs), &first[tabs..]);
        let next_line = strings::first_line(rest);

        let indent;
        let mut contents: String;
        if pedantic {
            indent = 2;
            contents = line.trim_start().to_string();
        } else {
            let found = match first_non_space(cap2) {
                Some(n) if n > 4 => 1,
                Some(n) => n,
                None => line.len(),
            };
            contents = line.get(found..).unwrap_or("").to_string();
            indent = found + cap1;
        }

        let mut blank_line = false;
        let mut ended_early = false;
        if line.is_empty() && next_line.bytes().all(|c| c == b' ') {
            let consumed = (next_line.len() + 1).min(rest.len());
            raw.push_str(&rest[..consumed]);
            rest = &rest[consumed..];
            ended_early = true;
        }

        if !ended_early {
            let max = indent.saturating_sub(1).min(3);
            while !rest.is_empty() {
                let raw_line = strings::first_line(rest);
                let line = if pedantic {
                    pedantic_indent(raw_line)
                } else {
                    raw_line.into()
                };

                if fence_begin(&line, max)
                    || heading_begin(&line, max)
                    || next_bullet(&line, max)
                    || scanners::hr_within(rest, indent).is_some()
                {
                    break;
                }

                let blank = line.trim().is_empty();
                if blank || first_non_space(&line).map_or(false, |n| n >= indent) {
                    contents.push('\n');
                    contents.push_str(line.get(indent..).unwrap_or(""));
                } else if !blank_line {
                    // lazy continuation
                    contents.push('\n');
                    contents.push_str(&line);
                } else {
                    break;
                }

                if blank {
                    blank_line = true;
                }

                let consumed = (raw_line.len() + 1).min(rest.len());
                raw.push_str(&rest[..consumed]);
                rest = &rest[consumed..];
            }
        }

        if !loose {
            if ends_with_blank {
                loose = true;
            } else if ends_in_blank_line(&raw) {
                ends_with_blank = true;
            }
        }

        let mut checked = None;
        if tasks {
            let cb = contents.as_bytes();
            if cb.len() >= 4 && cb[0] == b'[' && matches!(cb[1], b' ' | b'x' | b'X') && cb[2] == b']' && cb[3] == b' ' {
                checked = Some(cb[1] != b' ');
                let after = 3 + cb[3..].iter().take_while(|&&c| c == b' ').count();
                contents.replace_range(..after, "");
            }
        }

        list_raw.push_str(&raw);
        items.push(ListItem {
            raw,
            task: checked.is_some(),
            checked,
            loose: false,
            text: contents,
            tokens: vec![],
        });
    }

    let Some(last) = items.last_mut() else {
        return Ok(None);
    };
    last.raw.truncate(last.raw.trim_end().len());
    last.text.truncate(last.text.trim_end().len());
    list_raw.truncate(list_raw.trim_end().len());

    for item in &mut items {
        item.tokens = lexer.blocks(&item.text, false)?;
        if !loose {
            loose = item.tokens.iter().any(|t| {
                matches!(t, Token::Space { raw } if raw.bytes().filter(|&c| c == b'\n').count() >= 2)
            });
        }
    }
    if loose {
        for item in &mut items {
            item.loose = true;
        }
    }

    Ok(Some(Token::List(NodeList {
        raw: list_raw,
        ordered,
        start,
        loose,
        items,
    })))
}

/// `\n`, optional spaces, `\n`, optional spaces, end.
fn ends_in_blank_line(raw: &str) -> bool {
    let t = raw.trim_end_matches(' ');
    let Some(t) = t.strip_suffix('\n') else {
        return false;
    };
    t.trim_end_matches(' ').ends_with('\n')
}

pub(crate) fn html(lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let Some(end) = scanners::html_block(src) else {
        return Ok(None);
    };
    let raw = &src[..end];
    if lexer.options().parse.sanitize {
        return Ok(Some(Token::Paragraph {
            raw: raw.to_string(),
            text: escape(raw.trim_end_matches('\n'), false).into_owned(),
            tokens: vec![],
        }));
    }
    Ok(Some(Token::Html {
        raw: raw.to_string(),
        text: raw.to_string(),
        block: true,
    }))
}

/// A link label: escapes and anything but brackets, not blank. Returns the
/// index of the closing `]`.
pub(crate) fn scan_ref_label(src: &str, from: usize) -> Option<usize> {
    let b = src.as_bytes();
    let mut i = from;
    while i < b.len() {
        match b[i] {
            b']' => break,
            b'[' => return None,
            b'\\' => {
                let c = src[i + 1..].chars().next().filter(|&c| c != '\n')?;
                i += 1 + c.len_utf8();
            }
            _ => i += 1,
        }
    }
    if i >= b.len() || src[from..i].trim().is_empty() {
        return None;
    }
    Some(i)
}

/// Where a definition ends after `at`: trailing spaces, then newlines or the
/// end of input.
fn definition_end(b: &[u8], at: usize) -> Option<usize> {
    let q = at + b[at..].iter().take_while(|&&c| c == b' ').count();
    match b.get(q) {
        None => Some(q),
        Some(b'\n') => Some(skip_newlines(b, q)),
        Some(_) => None,
    }
}

/// Title and end of a definition whose destination ends at `at`.
fn definition_tail(src: &str, at: usize) -> Option<(Option<(usize, usize)>, usize)> {
    let b = src.as_bytes();
    let spaces = b[at..].iter().take_while(|&&c| c == b' ').count();
    let mut starts = vec![];
    if b.get(at + spaces) == Some(&b'\n') {
        let t = at + spaces + 1;
        starts.push(t + b[t..].iter().take_while(|&&c| c == b' ').count());
    }
    if spaces > 0 {
        starts.push(at + spaces);
    }

    for start in starts {
        for len in scanners::link_title(&src[start..], true) {
            if let Some(end) = definition_end(b, start + len) {
                return Some((Some((start, start + len)), end));
            }
        }
    }

    definition_end(b, at).map(|end| (None, end))
}

fn def_token(raw: &str, label: &str, href: &str, title: Option<&str>) -> Token {
    Token::Def {
        raw: raw.to_string(),
        tag: strings::normalize_label(label),
        href: strings::unescape(href).into_owned(),
        title: title.map(|t| strings::unescape(t).into_owned()),
    }
}

/// `[label]: destination "title"`
pub(crate) fn def(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let Some(i) = scanners::indent_upto(src, 3) else {
        return Ok(None);
    };
    if b.get(i) != Some(&b'[') {
        return Ok(None);
    }
    let Some(close) = scan_ref_label(src, i + 1) else {
        return Ok(None);
    };
    if b.get(close + 1) != Some(&b':') {
        return Ok(None);
    }
    let label = &src[i + 1..close];

    let mut j = close + 2;
    j += b[j..].iter().take_while(|&&c| c == b' ').count();
    if b.get(j) == Some(&b'\n') {
        j += 1;
        j += b[j..].iter().take_while(|&&c| c == b' ').count();
    }

    let start = j + usize::from(b.get(j) == Some(&b'<'));
    let href_len = src[start..]
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(src.len() - start);
    if href_len == 0 {
        return Ok(None);
    }
    let href = &src[start..start + href_len];
    let mut k = start + href_len;
    if b.get(k) == Some(&b'>') {
        k += 1;
    }

    Ok(definition_tail(src, k).map(|(title, end)| {
        let title = title.map(|(s, e)| &src[s + 1..e - 1]);
        def_token(&src[..end], label, href, title)
    }))
}

/// `[label]: <destination> "title"`, the markdown.pl way.
pub(crate) fn def_pedantic(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let i = strings::leading_spaces(src);
    if b.get(i) != Some(&b'[') {
        return Ok(None);
    }
    let Some(close) = src[i + 1..].find(']').map(|ix| i + 1 + ix) else {
        return Ok(None);
    };
    if close == i + 1 || b.get(close + 1) != Some(&b':') {
        return Ok(None);
    }
    let label = &src[i + 1..close];

    let mut j = close + 2;
    j += b[j..].iter().take_while(|&&c| c == b' ').count();
    if b.get(j) == Some(&b'<') {
        j += 1;
    }
    let href_len = src[j..]
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(src.len() - j);
    if href_len == 0 {
        return Ok(None);
    }
    let href = &src[j..j + href_len];
    let mut k = j + href_len;
    if b.get(k) == Some(&b'>') {
        k += 1;
    }

    let spaces = b[k..].iter().take_while(|&&c| c == b' ').count();
    if spaces > 0 && matches!(b.get(k + spaces), Some(b'"' | b'(')) {
        let t = k + spaces;
        let eol = line_end(b, t);
        let line = &src[t..eol];
        if let Some(close) = line.rfind(['"', ')']).filter(|&ix| ix > 1) {
            if let Some(end) = definition_end(b, t + close + 1) {
                let title = &src[t + 1..t + close];
                return Ok(Some(def_token(&src[..end], label, href, Some(title))));
            }
        }
    }

    Ok(definition_end(b, k).map(|end| def_token(&src[..end], label, href, None)))
}

/// A setext underline on the line starting at `at`. Returns its depth and
/// where the heading ends.
fn setext_underline(src: &str, at: usize) -> Option<(usize, usize)> {
    let s = &src[at..];
    let b = s.as_bytes();
    let i = scanners::indent_upto(s, 3)?;
    let c = *b.get(i)?;
    let depth = match c {
        b'=' => 1,
        b'-' => 2,
        _ => return None,
    };
    let run = b[i..].iter().take_while(|&&x| x == c).count();
    definition_end(b, i + run).map(|end| (depth, at + end))
}

/// A line of text underlined with `===` or `---`.
pub(crate) fn lheading(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let eol = line_end(b, 0);
    if eol == 0 || eol == b.len() {
        return Ok(None);
    }
    Ok(setext_underline(src, eol + 1).map(|(depth, end)| heading_token(src, depth, &src[..eol], end)))
}

/// Consecutive lines not interrupted by another block.
pub(crate) fn paragraph(lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let b = src.as_bytes();
    let mut eol = line_end(b, 0);
    if eol == 0 {
        return Ok(None);
    }
    while eol < b.len() {
        let next = &src[eol + 1..];
        if next.is_empty() || next.starts_with('\n') || interrupts_paragraph(lexer, next) {
            break;
        }
        eol = line_end(b, eol + 1);
    }

    let raw = &src[..eol];
    Ok(Some(Token::Paragraph {
        raw: raw.to_string(),
        text: raw.to_string(),
        tokens: vec![],
    }))
}

/// One line of text; paragraphs are not allowed at this level.
pub(crate) fn text(_: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    let eol = line_end(src.as_bytes(), 0);
    Ok((eol > 0).then(|| Token::Text {
        raw: src[..eol].to_string(),
        text: src[..eol].to_string(),
        tokens: vec![],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, Plugins};

    fn with_lexer<T>(f: impl FnOnce(&mut Lexer<'_>) -> T) -> T {
        let options = Options::default();
        let plugins = Plugins::default();
        let mut lexer = Lexer::new(&options, &plugins);
        f(&mut lexer)
    }

    #[test]
    fn unclosed_fence_runs_to_the_end() {
        let token = with_lexer(|l| fences(l, "```js\nlet a;\n").unwrap()).unwrap();
        assert_eq!(
            token,
            Token::Code {
                raw: "```js\nlet a;\n".to_string(),
                lang: Some("js".to_string()),
                text: "let a;".to_string(),
                style: CodeBlockStyle::Fenced,
            }
        );
    }

    #[test]
    fn closing_fence_line_break_is_left_behind() {
        let token = with_lexer(|l| fences(l, "~~~\na\n~~~~\n\nb").unwrap()).unwrap();
        assert_eq!(token.raw(), "~~~\na\n~~~~");
    }

    #[test]
    fn heading_closing_sequence() {
        let t = with_lexer(|l| heading(l, "## a ##\n\n").unwrap()).unwrap();
        assert!(matches!(&t, Token::Heading { depth: 2, text, raw, .. } if text == "a" && raw == "## a ##\n\n"));
        let t = with_lexer(|l| heading(l, "# a#").unwrap()).unwrap();
        assert!(matches!(&t, Token::Heading { text, .. } if text == "a#"));
        assert!(with_lexer(|l| heading(l, "#a").unwrap()).is_none());
    }

    #[test]
    fn definitions() {
        let t = with_lexer(|l| def(l, "[Foo Bar]: <my-url> 'title'\n\nx").unwrap()).unwrap();
        assert_eq!(
            t,
            Token::Def {
                raw: "[Foo Bar]: <my-url> 'title'\n\n".to_string(),
                tag: "foo bar".to_string(),
                href: "my-url".to_string(),
                title: Some("title".to_string()),
            }
        );

        assert!(with_lexer(|l| def(l, "[a]: <my url>").unwrap()).is_none());
        // a title followed by junk is not a title
        assert!(with_lexer(|l| def(l, "[a]: /u \"t\" junk").unwrap()).is_none());
        let t = with_lexer(|l| def(l, "[a]: /u\n\"t\" junk").unwrap()).unwrap();
        assert_eq!(t.raw(), "[a]: /u\n");
    }

    #[test]
    fn blockquote_lazy_lines() {
        let t = with_lexer(|l| blockquote(l, "> a\nb\n\nc").unwrap()).unwrap();
        assert!(matches!(&t, Token::Blockquote { raw, text, .. } if raw == "> a\nb\n" && text == "a\nb\n"));
    }

    #[test]
    fn list_items_and_tasks() {
        let t = with_lexer(|l| list(l, "- [x] done\n- [ ] todo\n\nafter").unwrap()).unwrap();
        let Token::List(list) = t else {
            panic!("expected a list");
        };
        assert_eq!(list.raw, "- [x] done\n- [ ] todo");
        assert!(!list.loose);
        assert_eq!(list.items[0].checked, Some(true));
        assert_eq!(list.items[1].checked, Some(false));
        assert_eq!(list.items[1].text, "todo");
    }

    #[test]
    fn ordered_list_start_and_looseness() {
        let t = with_lexer(|l| list(l, "3. a\n\n4. b\n").unwrap()).unwrap();
        let Token::List(list) = t else {
            panic!("expected a list");
        };
        assert!(list.ordered);
        assert_eq!(list.start, Some(3));
        assert!(list.loose);
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn setext_headings() {
        let t = with_lexer(|l| lheading(l, "Title\n===\n\nx").unwrap()).unwrap();
        assert!(matches!(&t, Token::Heading { depth: 1, text, raw, .. } if text == "Title" && raw == "Title\n===\n\n"));
        let t = with_lexer(|l| lheading(l, "b\n  --- ").unwrap()).unwrap();
        assert!(matches!(&t, Token::Heading { depth: 2, .. }));
        assert!(with_lexer(|l| lheading(l, "a\n\n---").unwrap()).is_none());
        assert!(with_lexer(|l| lheading(l, "a\n-- -").unwrap()).is_none());
    }
}
