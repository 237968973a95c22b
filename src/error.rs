//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for codec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A byte in the input has no entry in the encode table. The table was
    /// built from different data; retrying cannot succeed.
    #[error("no code for byte {0:#04x} in encode table")]
    UnknownSymbol(u8),

    /// Two leaves produced the same code while populating the tables.
    /// Indicates a broken tree, never a state the caller can recover from.
    #[error("code collision between bytes {first:#04x} and {second:#04x}")]
    DuplicateCode {
        /// Symbol that first claimed the code.
        first: u8,
        /// Symbol that tried to claim it again.
        second: u8,
    },

    /// Accumulated bits match no code in the table, either mid-stream or
    /// as leftover bits once the meaningful bits are exhausted.
    #[error("{leftover} trailing bits match no code in the table")]
    TruncatedStream {
        /// Number of unmatched bits.
        leftover: usize,
    },

    /// The payload header declares more meaningful bits than are present.
    #[error("payload declares {declared} bits but only {available} are present")]
    BitCountMismatch {
        /// Bit count from the payload header.
        declared: u64,
        /// Bits actually available after the header.
        available: u64,
    },

    /// A serialized codebook failed structural validation.
    #[error("malformed codebook: {0}")]
    Codebook(&'static str),

    /// An I/O error occurred while reading or writing files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
