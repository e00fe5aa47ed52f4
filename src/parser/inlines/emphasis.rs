//! Emphasis and strong emphasis. A run of `*` or `_` opens; closing runs
//! are searched for in the masked copy of the text, counting nested
//! openers, until the delimiters balance.

use crate::nodes::Token;
use crate::parser::inlines::Cursor;
use crate::parser::Lexer;
use crate::Result;
use unicode_categories::UnicodeCategories;

const PUNCTUATION: &str = "!\"#$%&'()+-.,/:;<=>?@[]`^{|}~";

fn is_punct(c: char) -> bool {
    PUNCTUATION.contains(c)
}

/// Neither punctuation, a delimiter nor whitespace.
fn is_plain(c: char) -> bool {
    !is_punct(c) && c != '*' && c != '_' && !c.is_whitespace()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Text between delimiters.
    Skip,
    Right,
    Left,
    /// Could open or close, depending on what is still open.
    Either,
}

#[derive(Debug)]
struct Found {
    kind: Kind,
    run_start: usize,
    run: usize,
    end: usize,
}

struct Delimiters {
    delim: char,
    other: char,
}

impl Delimiters {
    fn flanking(&self, c: char) -> bool {
        is_punct(c) || c == self.other
    }

    /// A character, or a backslash escape, other than a delimiter,
    /// punctuation or whitespace. Returns its end.
    fn prefix_unit(&self, s: &str, at: usize) -> Option<usize> {
        let c = s[at..].chars().next()?;
        if c == '\\' {
            return escape_unit(s, at);
        }
        is_plain(c).then(|| at + c.len_utf8())
    }

    /// The run of delimiters at `at` and the character after it.
    fn run(&self, s: &str, at: usize) -> Option<(usize, Option<char>)> {
        let run = s[at..].bytes().take_while(|&c| c == self.delim as u8).count();
        (run > 0).then(|| (run, s[at + run..].chars().next()))
    }

    /// Tries every alternative at `at`, in order.
    fn match_at(&self, s: &str, at: usize) -> Option<Found> {
        if at == 0 {
            if let Some(end) = self.orphan(s) {
                return Some(Found {
                    kind: Kind::Skip,
                    run_start: 0,
                    run: 0,
                    end,
                });
            }
        }
        if let Some(end) = self.text_run(s, at) {
            return Some(Found {
                kind: Kind::Skip,
                run_start: at,
                run: 0,
                end,
            });
        }

        let c = s[at..].chars().next()?;
        let after_char = at + c.len_utf8();
        let found = |kind, run_start: usize, run: usize| {
            Some(Found {
                kind,
                run_start,
                run,
                end: run_start + run,
            })
        };

        if self.flanking(c) {
            if let Some((run, next)) = self.run(s, after_char) {
                if next.map_or(true, char::is_whitespace) {
                    return found(Kind::Right, after_char, run);
                }
            }
        }
        if let Some(unit_end) = self.prefix_unit(s, at) {
            if let Some((run, next)) = self.run(s, unit_end) {
                if next.map_or(true, |n| n.is_whitespace() || self.flanking(n)) {
                    return found(Kind::Right, unit_end, run);
                }
            }
        }
        if self.flanking(c) || c.is_whitespace() {
            if let Some((run, Some(next))) = self.run(s, after_char) {
                if is_plain(next) || next == '\\' {
                    return found(Kind::Left, after_char, run);
                }
            }
        }
        if c.is_whitespace() {
            if let Some((run, Some(next))) = self.run(s, after_char) {
                if self.flanking(next) {
                    return found(Kind::Left, after_char, run);
                }
            }
        }
        if self.flanking(c) {
            if let Some((run, Some(next))) = self.run(s, after_char) {
                if self.flanking(next) {
                    return found(Kind::Either, after_char, run);
                }
            }
        }
        // `_` cannot close between two plain characters.
        if self.delim == '*' {
            if let Some(unit_end) = self.prefix_unit(s, at) {
                if let Some((run, Some(next))) = self.run(s, unit_end) {
                    if is_plain(next) || next == '\\' {
                        return found(Kind::Either, unit_end, run);
                    }
                }
            }
        }
        None
    }

    /// A single delimiter of the other kind inside a doubled one, as the `*`
    /// in `__a*b__`, which must not be taken for a closer.
    fn orphan(&self, s: &str) -> Option<usize> {
        let neither = |c: char| c != '*' && c != '_';
        let mut i = units(s, 0, neither);
        let pair = [self.other as u8; 2];
        if !s[i..].as_bytes().starts_with(&pair) {
            return None;
        }
        i = units(s, i + 2, neither);
        if s.as_bytes().get(i) != Some(&(self.delim as u8)) {
            return None;
        }
        i = units(s, i + 1, neither);
        s[i..].as_bytes().starts_with(&pair).then_some(i)
    }

    /// Characters and escapes other than the delimiter, up to one that is
    /// followed by something other than the delimiter.
    fn text_run(&self, s: &str, at: usize) -> Option<usize> {
        let delim = self.delim;
        let mut ends = vec![];
        let mut i = at;
        while let Some(next) = unit(s, i, |c| c != delim) {
            ends.push(next);
            i = next;
        }
        let last = *ends.last()?;
        match s[last..].chars().next() {
            Some(c) if c != delim => Some(last),
            _ if ends.len() >= 2 => Some(ends[ends.len() - 2]),
            _ => None,
        }
    }
}

fn escape_unit(s: &str, at: usize) -> Option<usize> {
    let c = s[at + 1..].chars().next().filter(|&c| c != '\n')?;
    Some(at + 1 + c.len_utf8())
}

/// One character accepted by `allowed`, or a backslash escape.
fn unit(s: &str, at: usize, allowed: impl Fn(char) -> bool) -> Option<usize> {
    let c = s[at..].chars().next()?;
    if c == '\\' {
        return escape_unit(s, at);
    }
    allowed(c).then(|| at + c.len_utf8())
}

fn units(s: &str, mut at: usize, allowed: impl Fn(char) -> bool + Copy) -> usize {
    while let Some(next) = unit(s, at, allowed) {
        at = next;
    }
    at
}

/// The leftmost match at or after `from`.
fn next_delimiter(d: &Delimiters, s: &str, from: usize) -> Option<Found> {
    let mut at = from;
    while at < s.len() {
        if let Some(found) = d.match_at(s, at) {
            return Some(found);
        }
        at += s[at..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

pub(crate) fn em_strong(lexer: &mut Lexer<'_>, src: &str, cursor: &Cursor<'_>) -> Result<Option<Token>> {
    let delim = match src.chars().next() {
        Some(c @ ('*' | '_')) => c,
        _ => return Ok(None),
    };
    let d = Delimiters {
        delim,
        other: if delim == '*' { '_' } else { '*' },
    };

    let l = src.bytes().take_while(|&c| c == delim as u8).count();
    let Some(next) = src[l..].chars().next() else {
        return Ok(None);
    };
    let punct_next = d.flanking(next);
    if !punct_next && next.is_whitespace() {
        return Ok(None);
    }
    let prev = cursor.prev_char;
    if delim == '_' && !punct_next && prev.map_or(false, |p| p.is_letter() || p.is_number()) {
        return Ok(None);
    }
    if punct_next && !prev.map_or(true, |p| p.is_whitespace() || is_punct(p)) {
        return Ok(None);
    }

    let masked = &cursor.masked[l..];
    let mut delim_total = l as isize;
    let mut mid_total = 0isize;
    let mut from = 0;

    while let Some(found) = next_delimiter(&d, masked, from) {
        from = found.end;
        let r = found.run as isize;
        match found.kind {
            Kind::Skip => continue,
            Kind::Left => {
                delim_total += r;
                continue;
            }
            Kind::Either if l % 3 != 0 && (l + found.run) % 3 == 0 => {
                mid_total += r;
                continue;
            }
            _ => {}
        }

        delim_total -= r;
        if delim_total > 0 {
            continue;
        }

        let r = r.min(r + delim_total + mid_total) as usize;
        let raw = &src[..l + found.run_start + r];
        let (inner, strong) = if l.min(r) % 2 == 1 {
            (&raw[1..raw.len() - 1], false)
        } else {
            (&raw[2..raw.len() - 2], true)
        };
        let tokens = lexer.inline_tokens(inner)?;
        let (raw, text) = (raw.to_string(), inner.to_string());
        return Ok(Some(if strong {
            Token::Strong { raw, text, tokens }
        } else {
            Token::Em { raw, text, tokens }
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use crate::nodes::Token;
    use crate::parser::parse_inline;
    use crate::{Options, Plugins};

    fn lex(md: &str) -> Vec<Token> {
        parse_inline(md, &Options::default(), &Plugins::default()).unwrap()
    }

    fn kinds(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn single_and_double() {
        let tokens = lex("*a* __b__");
        assert_eq!(kinds(&tokens), ["em", "text", "strong"]);
        let Token::Strong { text, .. } = &tokens[2] else {
            panic!("expected strong");
        };
        assert_eq!(text, "b");
    }

    #[test]
    fn triple_nests_strong_in_em() {
        let tokens = lex("***a***");
        let Token::Em { tokens, .. } = &tokens[0] else {
            panic!("expected em");
        };
        assert_eq!(kinds(tokens), ["strong"]);
    }

    #[test]
    fn nested_openers_are_counted() {
        let tokens = lex("*a **b** c*");
        assert_eq!(kinds(&tokens), ["em"]);
        let Token::Em { text, tokens, .. } = &tokens[0] else {
            panic!("expected em");
        };
        assert_eq!(text, "a **b** c");
        assert_eq!(kinds(tokens), ["text", "strong", "text"]);
    }

    #[test]
    fn intraword_underscores_stay_text() {
        assert_eq!(kinds(&lex("snake_case_name")), ["text"]);
        assert_eq!(kinds(&lex("_a_b")), ["text"]);
        assert_eq!(kinds(&lex("a*b*")), ["text", "em"]);
    }

    #[test]
    fn unmatched_opener_is_text() {
        assert_eq!(kinds(&lex("*a")), ["text"]);
        assert_eq!(kinds(&lex("* a*")), ["text"]);
    }

    #[test]
    fn code_spans_hide_closers() {
        let tokens = lex("*a `b*` c*");
        let Token::Em { text, .. } = &tokens[0] else {
            panic!("expected em");
        };
        assert_eq!(text, "a `b*` c");
    }
}
