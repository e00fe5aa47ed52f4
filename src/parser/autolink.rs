//! Links without brackets: `<scheme:...>` and `<user@host>` autolinks, and
//! bare URLs, `www.` hosts and email addresses in running text.

use crate::ctype::isalnum;
use crate::html::escape;
use crate::nodes::{NodeLink, Token};
use crate::parser::inlines::Cursor;
use crate::parser::Lexer;
use crate::Result;

fn link_token(raw: &str, text: String, href: String) -> Token {
    Token::Link(NodeLink {
        raw: raw.to_string(),
        href,
        title: None,
        tokens: vec![Token::text(text.clone(), text.clone())],
        text,
        attributes: None,
    })
}

/// `<https://example.com>` or `<user@example.com>`.
pub(crate) fn autolink(_: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    if !src.starts_with('<') {
        return Ok(None);
    }
    let inner_end = if let Some(end) = scheme_autolink(src, 1) {
        end
    } else if let Some(end) = email_autolink(src, 1) {
        end
    } else {
        return Ok(None);
    };
    if src.as_bytes().get(inner_end) != Some(&b'>') {
        return Ok(None);
    }

    let inner = &src[1..inner_end];
    let text = escape(inner, false).into_owned();
    let href = if scheme_autolink(src, 1).is_some() {
        text.clone()
    } else {
        format!("mailto:{}", text)
    };
    Ok(Some(link_token(&src[..inner_end + 1], text, href)))
}

/// A scheme of 2 to 32 characters, a colon, and anything but whitespace,
/// controls and angle brackets. Returns the end.
fn scheme_autolink(s: &str, at: usize) -> Option<usize> {
    let b = s.as_bytes();
    if !b.get(at).map_or(false, u8::is_ascii_alphabetic) {
        return None;
    }
    let len = b[at..]
        .iter()
        .take_while(|&&c| isalnum(c) || c == b'+' || c == b'.' || c == b'-')
        .count();
    if !(2..=32).contains(&len) || b.get(at + len) != Some(&b':') {
        return None;
    }
    let rest = at + len + 1;
    Some(
        rest + s[rest..]
            .find(|c: char| c.is_whitespace() || c.is_control() || c == '<' || c == '>')
            .unwrap_or(s.len() - rest),
    )
}

fn is_local_char(c: u8) -> bool {
    isalnum(c) || b".!#$%&'*+/=?^_`{|}~-".contains(&c)
}

/// `local@label.label`, where labels are alphanumeric with inner hyphens
/// and at most 63 long. Returns the end.
fn email_autolink(s: &str, at: usize) -> Option<usize> {
    let b = s.as_bytes();
    let local = b[at..].iter().take_while(|&&c| is_local_char(c)).count();
    if local == 0 || b.get(at + local) != Some(&b'@') {
        return None;
    }
    let start = at + local + 1;
    let len = b[start..]
        .iter()
        .take_while(|&&c| isalnum(c) || c == b'-' || c == b'.')
        .count();
    let domain = &s[start..start + len];

    let mut labels = 0;
    for label in domain.split('.') {
        let lb = label.as_bytes();
        let valid = !lb.is_empty()
            && lb.len() <= 63
            && isalnum(lb[0])
            && isalnum(lb[lb.len() - 1]);
        if !valid {
            return None;
        }
        labels += 1;
    }
    (labels >= 2).then_some(start + len)
}

/// Bare `http://`, `https://`, `ftp://` and `www.` links, and email
/// addresses.
pub(crate) fn url(lexer: &mut Lexer<'_>, src: &str, _: &Cursor<'_>) -> Result<Option<Token>> {
    if !lexer.options().extension.autolink || lexer.state().in_link {
        return Ok(None);
    }

    if let Some(end) = bare_url(src) {
        let raw = backpedal(&src[..end]);
        let text = escape(raw, false).into_owned();
        let href = if raw.starts_with("www.") {
            format!("http://{}", text)
        } else {
            text.clone()
        };
        return Ok(Some(link_token(raw, text, href)));
    }

    if let Some(end) = extended_email(src) {
        let raw = &src[..end];
        let text = escape(raw, false).into_owned();
        let href = format!("mailto:{}", text);
        return Ok(Some(link_token(raw, text, href)));
    }

    Ok(None)
}

/// The scheme or `www.`, at least one host character, then everything up to
/// whitespace or `<`.
fn bare_url(src: &str) -> Option<usize> {
    let prefix = ["http://", "https://", "ftp://", "www."]
        .iter()
        .find(|p| src.len() >= p.len() && src.as_bytes()[..p.len()].eq_ignore_ascii_case(p.as_bytes()))?;
    let host = prefix.len();
    if !src.as_bytes().get(host).map_or(false, |&c| isalnum(c) || c == b'-') {
        return None;
    }
    Some(
        host + src[host..]
            .find(|c: char| c.is_whitespace() || c == '<')
            .unwrap_or(src.len() - host),
    )
}

const TRAILING: &[u8] = b"?!.,:;*_~)";

/// Drops trailing punctuation, unbalanced parentheses and a lone `&` from
/// the end of a bare URL, until nothing changes.
fn backpedal(url: &str) -> &str {
    let mut current = url;
    loop {
        let next = backpedal_once(current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn backpedal_once(s: &str) -> &str {
    let b = s.as_bytes();
    let mut i = 0;
    while i < b.len() {
        let c = b[i];
        if !b"?!.,:;*_~()&".contains(&c) {
            i += 1;
        } else if c == b'(' {
            match s[i..].find(')') {
                Some(ix) => i += ix + 1,
                None => break,
            }
        } else if c == b'&' {
            if is_entity_at_end(&s[i + 1..]) {
                break;
            }
            i += 1;
        } else {
            let run = b[i..].iter().take_while(|c| TRAILING.contains(c)).count();
            if i + run < b.len() {
                i += run;
            } else {
                if run > 1 {
                    i += run - 1;
                }
                break;
            }
        }
    }
    &s[..i]
}

/// `name;` running to the end.
fn is_entity_at_end(s: &str) -> bool {
    s.len() > 1 && s.ends_with(';') && s[..s.len() - 1].bytes().all(|c| isalnum(c))
}

fn is_domain_char(c: u8) -> bool {
    isalnum(c) || c == b'-' || c == b'_'
}

/// `local@domain.tld` in running text. Returns the end.
fn extended_email(src: &str) -> Option<usize> {
    let b = src.as_bytes();
    let local = b
        .iter()
        .take_while(|&&c| isalnum(c) || b"._+-".contains(&c))
        .count();
    if local == 0 || b.get(local) != Some(&b'@') {
        return None;
    }
    let host = local + 1;
    let first = b[host..].iter().take_while(|&&c| is_domain_char(c)).count();
    if first == 0 {
        return None;
    }
    domain_parts(b, host + first)
}

/// One or more `.part` segments, each ending in an alphanumeric, not
/// followed by `-` or `_`. The longest such match wins.
fn domain_parts(b: &[u8], at: usize) -> Option<usize> {
    if b.get(at) != Some(&b'.') {
        return None;
    }
    let run_end = at + 1 + b[at + 1..].iter().take_while(|&&c| is_domain_char(c)).count();
    (at + 1..run_end).rev().filter(|&k| isalnum(b[k])).find_map(|k| {
        let end = k + 1;
        domain_parts(b, end).or_else(|| (!matches!(b.get(end), Some(b'-' | b'_'))).then_some(end))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_autolinks() {
        assert_eq!(scheme_autolink("<https://a.b/c?d>", 1), Some(16));
        assert_eq!(scheme_autolink("<a:b>", 1), None);
        assert_eq!(email_autolink("<me@example.com>", 1), Some(15));
        assert_eq!(email_autolink("<me@localhost>", 1), None);
        assert_eq!(email_autolink("<me@-a.com>", 1), None);
    }

    #[test]
    fn trailing_punctuation_is_dropped() {
        assert_eq!(backpedal("www.a.com."), "www.a.com");
        assert_eq!(backpedal("www.a.com/b?!"), "www.a.com/b");
        assert_eq!(backpedal("www.a.com/(b)"), "www.a.com/(b)");
        assert_eq!(backpedal("www.a.com/b)"), "www.a.com/b");
        assert_eq!(backpedal("www.a.com/b&amp;"), "www.a.com/b");
        assert_eq!(backpedal("www.a.com/b&c"), "www.a.com/b&c");
        assert_eq!(backpedal("www.a.com/a.b"), "www.a.com/a.b");
    }

    #[test]
    fn bare_urls() {
        assert_eq!(bare_url("https://a.b c"), Some(11));
        assert_eq!(bare_url("WWW.a.b<c"), Some(7));
        assert_eq!(bare_url("http:// a"), None);
        assert_eq!(bare_url("mailto:a"), None);
    }

    #[test]
    fn emails_in_text() {
        assert_eq!(extended_email("a.b@c.de x"), Some(8));
        assert_eq!(extended_email("a@b.cd-"), Some(5));
        assert_eq!(extended_email("a@b.c_d."), Some(7));
        assert_eq!(extended_email("a@b"), None);
        assert_eq!(extended_email("@b.c"), None);
    }
}
