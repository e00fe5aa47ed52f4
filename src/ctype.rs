use crate::character_set::character_set;

const CMARK_CTYPE_SPACE: [bool; 256] = character_set!(b"\t\n\x0b\x0c\r ");
const CMARK_CTYPE_PUNCT: [bool; 256] =
    character_set!(b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~");
const CMARK_CTYPE_DIGIT: [bool; 256] = character_set!(b"0123456789");
const CMARK_CTYPE_ALPHA: [bool; 256] =
    character_set!(b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ");

pub fn isspace(ch: u8) -> bool {
    CMARK_CTYPE_SPACE[ch as usize]
}

pub fn ispunct(ch: u8) -> bool {
    CMARK_CTYPE_PUNCT[ch as usize]
}

pub fn isdigit(ch: u8) -> bool {
    CMARK_CTYPE_DIGIT[ch as usize]
}

pub fn isxdigit(ch: u8) -> bool {
    isdigit(ch) || matches!(ch, b'a'..=b'f' | b'A'..=b'F')
}

pub fn isalpha(ch: u8) -> bool {
    CMARK_CTYPE_ALPHA[ch as usize]
}

pub fn isalnum(ch: u8) -> bool {
    isdigit(ch) || isalpha(ch)
}

/// `\w` in the ASCII sense: letters, digits and underscore.
pub fn isword(ch: u8) -> bool {
    isalnum(ch) || ch == b'_'
}
