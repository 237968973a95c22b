//! The codec table pair and its persistence format.
//!
//! A [`CodeBook`] holds the two flat mappings derived from a Huffman
//! tree: symbol→code for encoding and code→symbol for decoding. The pair,
//! not the tree, is what travels between an encode and a later decode, so
//! it has an explicit versioned wire format instead of an opaque object
//! dump.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use log::trace;

use crate::code::Code;
use crate::error::{Error, Result};
use crate::freq::FreqTable;
use crate::tree::Tree;

const MAGIC: [u8; 4] = *b"HUFB";
const VERSION: u8 = 1;

/// Paired symbol↔code tables, immutable once built.
///
/// The prefix-free property of the underlying tree carries over: no code
/// in the decode map is a proper prefix of another, which is what lets
/// the decoder emit on first match without backtracking.
#[derive(Debug, Clone, Default)]
pub struct CodeBook {
    encode: HashMap<u8, Code>,
    decode: HashMap<Code, u8>,
    max_code_len: usize,
}

impl CodeBook {
    /// Derive both tables from a frequency table.
    ///
    /// An empty table yields an empty book. A single-entry table maps the
    /// lone symbol to the reserved one-bit code `0`, since its tree path
    /// is empty and an empty code cannot participate in bit-level
    /// concatenation; the payload's stored bit count carries the repeat
    /// count. Any code collision fails with [`Error::DuplicateCode`]
    /// rather than overwriting.
    pub fn from_frequencies(freqs: &FreqTable) -> Result<Self> {
        let mut book = Self::default();
        let tree = match Tree::from_frequencies(freqs) {
            Some(tree) => tree,
            None => return Ok(book),
        };

        for (symbol, code) in tree.leaves() {
            let code = if code.is_empty() {
                Code::zero()
            } else {
                code.clone()
            };
            book.insert(symbol, code)?;
        }

        trace!("derived {} codes: {:?}", book.len(), book.encode);
        Ok(book)
    }

    fn insert(&mut self, symbol: u8, code: Code) -> Result<()> {
        self.max_code_len = self.max_code_len.max(code.len());
        if let Some(&first) = self.decode.get(&code) {
            return Err(Error::DuplicateCode {
                first,
                second: symbol,
            });
        }
        self.decode.insert(code.clone(), symbol);
        self.encode.insert(symbol, code);
        Ok(())
    }

    /// The code assigned to `symbol`, if the symbol occurred in the data
    /// the book was built from.
    pub fn code_for(&self, symbol: u8) -> Option<&Code> {
        self.encode.get(&symbol)
    }

    /// The symbol a complete code decodes to. Partial prefixes return
    /// `None`, which is how the decoder knows to keep accumulating.
    pub fn symbol_for(&self, code: &Code) -> Option<u8> {
        self.decode.get(code).copied()
    }

    /// Number of symbol↔code pairs.
    pub fn len(&self) -> usize {
        self.encode.len()
    }

    /// True for the empty book (built from empty input).
    pub fn is_empty(&self) -> bool {
        self.encode.is_empty()
    }

    /// Length in bits of the longest code. Once a decode candidate grows
    /// past this, no match can ever occur.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Frequency-weighted mean code length in bits per symbol.
    ///
    /// Strictly below 8 for skewed distributions; exactly 8 for a uniform
    /// 256-symbol alphabet. Zero for an empty book.
    pub fn mean_code_length(&self, freqs: &FreqTable) -> f64 {
        if freqs.total() == 0 {
            return 0.0;
        }
        let weighted: u64 = freqs
            .iter()
            .map(|(symbol, count)| {
                count * self.code_for(symbol).map_or(0, |code| code.len() as u64)
            })
            .sum();
        weighted as f64 / freqs.total() as f64
    }

    /// Serialize to the versioned wire layout:
    ///
    /// ```text
    /// magic "HUFB" | version u8 | entries u16 LE
    /// then per entry: symbol u8 | code length u8 | code bits MSB-first
    /// ```
    ///
    /// Entries are written in ascending symbol order, so equal books
    /// serialize to identical bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(7 + self.len() * 3);
        bytes.extend_from_slice(&MAGIC);
        bytes.push(VERSION);
        bytes.extend_from_slice(&(self.len() as u16).to_le_bytes());

        let mut entries: Vec<(&u8, &Code)> = self.encode.iter().collect();
        entries.sort();
        for (&symbol, code) in entries {
            bytes.push(symbol);
            bytes.push(code.len() as u8);
            bytes.extend_from_slice(&code.to_packed());
        }
        bytes
    }

    /// Rebuild a book from its wire form, re-checking the duplicate-code
    /// invariant.
    ///
    /// # Errors
    /// [`Error::Codebook`] on bad magic, unknown version, or truncated
    /// layout; [`Error::DuplicateCode`] if two entries share a code.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        read_field(&mut cursor, &mut magic, "missing magic")?;
        if magic != MAGIC {
            return Err(Error::Codebook("bad magic"));
        }
        let mut version = [0u8; 1];
        read_field(&mut cursor, &mut version, "missing version")?;
        if version[0] != VERSION {
            return Err(Error::Codebook("unsupported version"));
        }
        let mut count_bytes = [0u8; 2];
        read_field(&mut cursor, &mut count_bytes, "missing entry count")?;
        let count = u16::from_le_bytes(count_bytes) as usize;

        let mut book = Self::default();
        for _ in 0..count {
            let mut header = [0u8; 2];
            read_field(&mut cursor, &mut header, "truncated entry")?;
            let (symbol, len) = (header[0], header[1] as usize);

            let mut packed = vec![0u8; len.div_ceil(8)];
            read_field(&mut cursor, &mut packed, "truncated code bits")?;
            let code = Code::from_packed(len, &packed)?;

            if book.encode.contains_key(&symbol) {
                return Err(Error::Codebook("repeated symbol"));
            }
            book.insert(symbol, code)?;
        }
        Ok(book)
    }
}

fn read_field(cursor: &mut Cursor<&[u8]>, buf: &mut [u8], context: &'static str) -> Result<()> {
    cursor
        .read_exact(buf)
        .map_err(|_| Error::Codebook(context))
}
