use crate::ctype::{isdigit, isxdigit};
use std::char;
use std::cmp::min;

include!(concat!(env!("OUT_DIR"), "/entitydata.rs"));

const MAX_NAME_LENGTH: usize = 32;

/// Decodes one entity body, the text after an `&`. Returns the decoded
/// characters and how many bytes of `text` were consumed, including the `;`.
pub fn unescape(text: &str) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'#' {
        let mut codepoint: u32 = 0;
        let mut i;

        let num_digits = if isdigit(bytes[1]) {
            i = 1;
            while i < bytes.len() && isdigit(bytes[i]) {
                codepoint = (codepoint * 10) + (bytes[i] - b'0') as u32;
                codepoint = min(codepoint, 0x110000);
                i += 1;
            }
            i - 1
        } else if bytes[1] == b'x' || bytes[1] == b'X' {
            i = 2;
            while i < bytes.len() && isxdigit(bytes[i]) {
                codepoint = (codepoint * 16) + ((bytes[i] as u32 | 32) % 39 - 9);
                codepoint = min(codepoint, 0x110000);
                i += 1;
            }
            i - 2
        } else {
            return None;
        };

        if (1..=8).contains(&num_digits) && i < bytes.len() && bytes[i] == b';' {
            if codepoint == 0 || (0xD800..=0xE000).contains(&codepoint) || codepoint >= 0x110000
            {
                codepoint = 0xFFFD;
            }
            return Some((
                char::from_u32(codepoint).unwrap_or('\u{FFFD}').to_string(),
                i + 1,
            ));
        }
        return None;
    }

    let end = min(bytes.len(), MAX_NAME_LENGTH);
    for i in 1..end {
        if !bytes[i].is_ascii_alphanumeric() {
            if bytes[i] == b';' {
                return lookup(&text[..i]).map(|e| (e.to_string(), i + 1));
            }
            return None;
        }
    }

    None
}

fn lookup(name: &str) -> Option<&'static str> {
    ENTITIES.get(name).copied()
}

/// Replaces every recognised entity reference in `src` with the characters it
/// stands for. Unrecognised `&` sequences are kept as they are.
pub fn unescape_html(src: &str) -> String {
    let mut i = 0;
    let mut v = String::with_capacity(src.len());
    let size = src.len();

    while i < size {
        let org = i;
        while i < size && src.as_bytes()[i] != b'&' {
            i += 1;
        }

        if i > org {
            if org == 0 && i >= size {
                return src.to_string();
            }

            v += &src[org..i];
        }

        if i >= size {
            return v;
        }

        i += 1;
        match unescape(&src[i..]) {
            Some((chs, size)) => {
                v += &chs;
                i += size;
            }
            None => v.push('&'),
        }
    }

    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_numeric() {
        assert_eq!(unescape_html("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(unescape_html("&#39;quoted&#x27;"), "'quoted'");
        assert_eq!(unescape_html("caf&eacute;"), "café");
    }

    #[test]
    fn unknown_entities_survive() {
        assert_eq!(unescape_html("a &bogus; b & c"), "a &bogus; b & c");
        assert_eq!(unescape_html("&#;"), "&#;");
    }
}
