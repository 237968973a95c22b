//! # Huffman Coding
//!
//! *Optimal prefix codes from observed byte frequencies.*
//!
//! ## Intuition First
//!
//! Imagine writing a telegram where every letter costs the same. You would
//! pay as much for a `z` as for an `e`, even though `e` shows up ten times
//! as often. Huffman coding re-prices the alphabet: frequent bytes get
//! short bit sequences, rare bytes get long ones, and because no sequence
//! is a prefix of another the stream needs no delimiters at all.
//!
//! ## The Problem
//!
//! A fixed-width encoding spends 8 bits on every byte regardless of how
//! skewed the data is. Shannon showed the real cost of a symbol is
//! $-\log_2 p$ bits; Huffman's construction is the optimal way to
//! approximate that with whole-bit codes.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon    Entropy as the fundamental limit
//! 1949  Fano       Top-down splitting: close, but not optimal
//! 1952  Huffman    Bottom-up merging: provably optimal prefix codes
//! 1985  Knuth      Dynamic Huffman updating
//! 1996  Deutsch    DEFLATE ships Huffman codes in every gzip stream
//! ```
//!
//! David Huffman's insight, produced for a term paper at MIT, was to build
//! the tree from the *least* frequent symbols upward. Repeatedly merging
//! the two lightest subtrees guarantees the deepest leaves are the rarest
//! symbols, which is exactly the optimality condition Fano's top-down
//! splits kept missing.
//!
//! ## Mathematical Formulation
//!
//! Given symbols $s$ with frequencies $f_s$, the expected code length
//!
//! ```text
//! L = \sum_s f_s \cdot len(code_s) / \sum_s f_s
//! ```
//!
//! is minimized over all prefix-free codes by the Huffman tree, and
//! satisfies $H \le L < H + 1$ where $H$ is the empirical entropy.
//!
//! ## Complexity Analysis
//!
//! - **Construction**: $O(n \log n)$ over $n \le 256$ distinct symbols
//!   (binary min-heap of candidate subtrees).
//! - **Encode / decode**: $O(1)$ amortized table work per consumed bit.
//!
//! ## Failure Modes
//!
//! 1. **Table mismatch**: decoding with a codebook built from different
//!    data either strands unmatched bits or reconstructs garbage; the
//!    decoder surfaces the former as an error and the payload's explicit
//!    bit count keeps padding out of the picture entirely.
//! 2. **Degenerate alphabets**: zero or one distinct symbols produce no
//!    tree edges to derive codes from; both cases are handled explicitly
//!    rather than rejected.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`FreqTable`]: byte frequency counting.
//! - [`CodeBook`]: the symbol↔code table pair, with a versioned wire
//!   format for persistence.
//! - [`compress`] / [`decompress`]: whole-buffer entry points built on
//!   [`Encoder`] and [`Decoder`].
//! - [`Progress`] / [`Reporter`]: observation-only decode progress.
//!
//! The tree itself is an internal construction artifact; only the flat
//! codebook is needed to encode or decode, and only it is persisted.
//!
//! ## References
//!
//! - Huffman, D. (1952). "A Method for the Construction of
//!   Minimum-Redundancy Codes."
//! - Shannon, C. (1948). "A Mathematical Theory of Communication."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code;
pub mod codebook;
pub mod codec;
pub mod error;
pub mod freq;
pub mod progress;
pub mod tree;

pub use code::Code;
pub use codebook::CodeBook;
pub use codec::{compress, decompress, Decoder, Encoder};
pub use error::Error;
pub use freq::FreqTable;
pub use progress::{Progress, Reporter};
