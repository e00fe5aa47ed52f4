/// Builds a 256-entry byte lookup table at compile time; every byte that
/// appears in one of the given byte-string literals maps to `true`.
///
/// ```ignore
/// const QUOTES: [bool; 256] = character_set!(b"\"'", b"`");
/// assert!(QUOTES[b'`' as usize]);
/// ```
macro_rules! character_set {
    () => {{
        [false; 256]
    }};

    ($value:literal $(,$rest:literal)*) => {{
        const BYTES: &[u8] = $value;
        let mut table = character_set!($($rest),*);
        let mut i = 0;
        while i < BYTES.len() {
            table[BYTES[i] as usize] = true;
            i += 1;
        }
        table
    }}
}

pub(crate) use character_set;
