use std::io;

/// Errors produced while encoding, decoding or reading a compressed container.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// A byte in the input has no entry in the code table.
    #[error("symbol 0x{0:02x} has no code in the table")]
    MissingCode(u8),

    /// The serialized tree ended before every expected node was read.
    #[error("serialized tree is truncated at token {0}")]
    TruncatedTree(usize),

    /// A node marker other than `'0'` or `'1'` was found.
    #[error("invalid tree token 0x{token:02x} at offset {offset}")]
    InvalidToken { token: u8, offset: usize },

    /// Tokens remain after the root node was fully reconstructed.
    #[error("{0} trailing bytes after serialized tree")]
    TrailingTokens(usize),

    /// The serialized tree is a single leaf with no path to reach it.
    #[error("serialized tree is a bare leaf")]
    BareLeafRoot,

    /// A bit in the encoded stream walked off the tree.
    #[error("encoded bit {0} follows a branch that does not exist")]
    InvalidPath(usize),

    /// A fixed-width field or payload of the container is missing.
    #[error("compressed container is truncated: missing {0}")]
    TruncatedContainer(&'static str),

    /// Bytes follow the packed payload.
    #[error("unexpected bytes after packed data")]
    TrailingContainerBytes,

    /// The stored bit count does not fit in the packed payload.
    #[error("bit count {bits} exceeds packed payload of {bytes} bytes")]
    BitCountOverflow { bits: u64, bytes: usize },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl HuffmanError {
    /// True for errors caused by malformed compressed input, as opposed to I/O failures.
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, HuffmanError::Io(_) | HuffmanError::MissingCode(_))
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
