//! GFM tables: a header row, a delimiter row, then body rows until a blank
//! line or another block.

use crate::nodes::{NodeTable, TableAlignment, TableCell, Token};
use crate::parser::Lexer;
use crate::scanners::{self, line_end, skip_newlines};
use crate::Result;

struct Shape<'s> {
    header: &'s str,
    delimiter: &'s str,
    body: &'s str,
    end: usize,
}

pub(crate) fn table(lexer: &mut Lexer<'_>, src: &str) -> Result<Option<Token>> {
    if !lexer.options().extension.table {
        return Ok(None);
    }
    let Some(shape) = scan(src) else {
        return Ok(None);
    };

    let header = split_cells(shape.header, None);
    let align = shape
        .delimiter
        .split('|')
        .map(|cell| alignment(cell.trim()))
        .collect::<Vec<_>>();
    if header.len() != align.len() {
        return Ok(None);
    }

    let rows = if shape.body.trim().is_empty() {
        vec![]
    } else {
        strip_last_blank_line(shape.body)
            .split('\n')
            .map(|row| split_cells(row, Some(header.len())))
            .collect()
    };

    let cells = |texts: Vec<String>| {
        texts
            .into_iter()
            .map(|text| TableCell {
                text,
                tokens: vec![],
            })
            .collect::<Vec<_>>()
    };

    Ok(Some(Token::Table(NodeTable {
        raw: src[..shape.end].to_string(),
        align,
        header: cells(header),
        rows: rows.into_iter().map(cells).collect(),
    })))
}

/// Whether a header and delimiter row start at `line`.
pub(crate) fn starts_table(line: &str) -> bool {
    scan(line).is_some()
}

fn scan(src: &str) -> Option<Shape<'_>> {
    let b = src.as_bytes();

    let lead = b.iter().take_while(|&&c| c == b' ').count();
    let header_end = line_end(b, lead);
    if header_end == lead || header_end == b.len() || !src[lead..header_end].contains('|') {
        return None;
    }
    let header = &src[lead..header_end];

    let (delimiter, delimiter_end) = delimiter_row(src, header_end + 1)?;
    if delimiter_end == b.len() {
        return Some(Shape {
            header,
            delimiter,
            body: "",
            end: delimiter_end,
        });
    }

    let body_start = delimiter_end + 1;
    let mut i = body_start;
    while i < b.len() && !ends_body(&src[i..]) {
        i = line_end(b, i);
        if i < b.len() {
            i += 1;
        }
    }

    Some(Shape {
        header,
        delimiter,
        body: &src[body_start..i],
        end: skip_newlines(b, i),
    })
}

/// `| :-- | --: |`, at most three spaces in. Returns the cells between the
/// outer pipes, and the end of the line.
fn delimiter_row(src: &str, at: usize) -> Option<(&str, usize)> {
    let b = src.as_bytes();
    let mut i = at + scanners::indent_upto(&src[at..], 3)?;
    if b.get(i) == Some(&b'|') {
        i = skip_spaces(b, i + 1);
    }

    let start = i;
    i = delimiter_cell(b, i)?;
    loop {
        if b.get(i) != Some(&b'|') {
            break;
        }
        match delimiter_cell(b, skip_spaces(b, i + 1)) {
            Some(next) => i = next,
            None => break,
        }
    }
    let cells = src[start..i].trim_end_matches(' ');

    if b.get(i) == Some(&b'|') {
        i = skip_spaces(b, i + 1);
    }
    match b.get(i) {
        None | Some(b'\n') => Some((cells, i)),
        _ => None,
    }
}

/// `:?-+:? *`
fn delimiter_cell(b: &[u8], mut i: usize) -> Option<usize> {
    if b.get(i) == Some(&b':') {
        i += 1;
    }
    let dashes = b[i.min(b.len())..].iter().take_while(|&&c| c == b'-').count();
    if dashes == 0 {
        return None;
    }
    i += dashes;
    if b.get(i) == Some(&b':') {
        i += 1;
    }
    Some(skip_spaces(b, i))
}

fn skip_spaces(b: &[u8], from: usize) -> usize {
    from + b[from.min(b.len())..].iter().take_while(|&&c| c == b' ').count()
}

fn alignment(cell: &str) -> Option<TableAlignment> {
    match (cell.starts_with(':'), cell.ends_with(':') && cell.len() > 1) {
        (true, true) => Some(TableAlignment::Center),
        (true, false) => Some(TableAlignment::Left),
        (false, true) => Some(TableAlignment::Right),
        (false, false) => None,
    }
}

/// Lines that end a table body.
fn ends_body(line: &str) -> bool {
    let b = line.as_bytes();
    scanners::spaces_line(line)
        || b.first() == Some(&b'\n')
        || scanners::hr(line).is_some()
        || scanners::heading_interrupt(line)
        || scanners::blockquote_start(line)
        || (line.starts_with("    ") && b.get(4).map_or(false, |&c| c != b'\n'))
        || scanners::fence_start(line)
        || scanners::list_interrupt(line)
        || scanners::html_interrupt(line)
}

/// Drops a final line made of spaces and tabs, with the newline before it.
fn strip_last_blank_line(body: &str) -> &str {
    match body.rfind('\n') {
        Some(ix) if body[ix + 1..].bytes().all(|c| c == b' ' || c == b'\t') => &body[..ix],
        _ => body,
    }
}

/// Splits a row at unescaped pipes. Empty leading and trailing cells left by
/// outer pipes are dropped; with `count`, the row is cut or padded to that
/// many cells.
fn split_cells(row: &str, count: Option<usize>) -> Vec<String> {
    let mut cells = vec![];
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in row.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '|' if !escaped => {
                cells.push(&row[start..i]);
                start = i + 1;
            }
            _ => escaped = false,
        }
        if c == '|' {
            escaped = false;
        }
    }
    cells.push(&row[start..]);

    if cells.first().map_or(false, |c| c.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().map_or(false, |c| c.trim().is_empty()) {
        cells.pop();
    }

    let mut cells = cells
        .into_iter()
        .map(|c| c.trim().replace("\\|", "|"))
        .collect::<Vec<_>>();
    if let Some(count) = count {
        cells.resize(count, String::new());
    }
    cells
}
