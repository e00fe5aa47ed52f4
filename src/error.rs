//! Errors raised while compiling a document.

use crate::adapters::Level;
use thiserror::Error;

/// The error type for every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No rule of the active grammar matched the remaining input.
    #[error("Infinite loop on byte: {byte} ({level:?} level, offset {offset})")]
    UngroundedParse {
        /// The grammar level being scanned.
        level: Level,
        /// The first byte of the input no rule could consume.
        byte: u8,
        /// Byte offset of that input within the slice being tokenized.
        offset: usize,
    },

    /// The renderer met a token type with no built-in handler and no
    /// extension renderer registered for it.
    #[error("Token with \"{0}\" type was not found.")]
    UnknownTokenType(String),

    /// An extension was registered without a name.
    #[error("extension name required")]
    MissingExtensionName,

    /// Reading input or writing output failed.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
