//! Bit-level packing and unpacking against a codebook.
//!
//! The packed payload is framed with an explicit meaningful-bit count so
//! decoding never has to guess where data ends and byte-alignment padding
//! begins:
//!
//! ```text
//! [bit count: u64 LE][packed bits, MSB-first, zero-padded to a byte]
//! ```
//!
//! The one exception is empty input, which packs to a completely empty
//! payload and decodes back to empty output.

use log::debug;

use crate::bits::{BitReader, BitVec};
use crate::code::Code;
use crate::codebook::CodeBook;
use crate::error::{Error, Result};
use crate::freq::FreqTable;
use crate::progress::Progress;

const HEADER_LEN: usize = 8;

/// Packs byte sequences into bit streams using a codebook.
pub struct Encoder<'a> {
    book: &'a CodeBook,
}

impl<'a> Encoder<'a> {
    /// Create an encoder over `book`.
    pub fn new(book: &'a CodeBook) -> Self {
        Self { book }
    }

    /// Encode `data` into a framed payload.
    ///
    /// Codes are concatenated in input order; order is what recreates the
    /// original sequence on decode.
    ///
    /// # Errors
    /// [`Error::UnknownSymbol`] if a byte has no table entry, meaning the
    /// book was built from different data.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let mut bits = BitVec::new();
        for &byte in data {
            let code = self
                .book
                .code_for(byte)
                .ok_or(Error::UnknownSymbol(byte))?;
            bits.push_code(code);
        }

        debug!(
            "encoded {} bytes into {} bits ({:.3} bits/symbol)",
            data.len(),
            bits.bit_len(),
            bits.bit_len() as f64 / data.len() as f64
        );

        let mut payload = Vec::with_capacity(HEADER_LEN + bits.as_bytes().len());
        payload.extend_from_slice(&(bits.bit_len() as u64).to_le_bytes());
        payload.extend_from_slice(&bits.into_bytes());
        Ok(payload)
    }
}

/// Unpacks framed payloads back into byte sequences.
pub struct Decoder<'a> {
    book: &'a CodeBook,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over `book`.
    pub fn new(book: &'a CodeBook) -> Self {
        Self { book }
    }

    /// Decode a framed payload.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        self.decode_with_progress(payload, &Progress::new())
    }

    /// Decode a framed payload, advancing `progress` as bits are consumed.
    ///
    /// Reads one bit at a time into a growing candidate; because the
    /// table is prefix-free, the first exact match is the only possible
    /// one, so each match emits a symbol and resets the candidate.
    ///
    /// # Errors
    /// [`Error::BitCountMismatch`] if the header declares more bits than
    /// the payload holds, [`Error::TruncatedStream`] if bits accumulate
    /// past the longest code or remain unmatched at end of stream. Both
    /// mean the book does not match the payload; no partial output is
    /// returned.
    pub fn decode_with_progress(&self, payload: &[u8], progress: &Progress) -> Result<Vec<u8>> {
        if payload.is_empty() {
            return Ok(Vec::new());
        }
        if payload.len() < HEADER_LEN {
            return Err(Error::BitCountMismatch {
                declared: 0,
                available: payload.len() as u64 * 8,
            });
        }

        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&payload[..HEADER_LEN]);
        let declared = u64::from_le_bytes(header);
        let body = &payload[HEADER_LEN..];
        let available = body.len() as u64 * 8;
        if declared > available {
            return Err(Error::BitCountMismatch {
                declared,
                available,
            });
        }

        progress.start(declared);
        let mut reader = BitReader::new(body, declared as usize);
        let mut out = Vec::new();
        let mut candidate = Code::new();

        while let Some(bit) = reader.next_bit() {
            candidate.push(bit);
            progress.advance(1);
            if let Some(symbol) = self.book.symbol_for(&candidate) {
                out.push(symbol);
                candidate.clear();
            } else if candidate.len() > self.book.max_code_len() {
                return Err(Error::TruncatedStream {
                    leftover: candidate.len(),
                });
            }
        }
        if !candidate.is_empty() {
            return Err(Error::TruncatedStream {
                leftover: candidate.len(),
            });
        }

        debug!("decoded {} bits into {} bytes", declared, out.len());
        Ok(out)
    }
}

/// Encode `input` end to end: count frequencies, derive a codebook, pack.
///
/// Returns the framed payload and the codebook; both must be persisted
/// for a later [`decompress`] to reconstruct the input.
pub fn compress(input: &[u8]) -> Result<(Vec<u8>, CodeBook)> {
    let freqs = FreqTable::from_bytes(input);
    let book = CodeBook::from_frequencies(&freqs)?;
    debug!(
        "{} distinct symbols, mean code length {:.3} bits",
        book.len(),
        book.mean_code_length(&freqs)
    );
    let payload = Encoder::new(&book).encode(input)?;
    Ok((payload, book))
}

/// Decode a framed payload against the codebook that produced it.
pub fn decompress(payload: &[u8], book: &CodeBook) -> Result<Vec<u8>> {
    Decoder::new(book).decode(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_roundtrip_example_sentence() {
        let input = b"this is an example of a huffman tree";
        let (payload, book) = compress(input).unwrap();
        assert_eq!(decompress(&payload, &book).unwrap(), input.to_vec());

        let distinct: HashSet<u8> = input.iter().copied().collect();
        assert_eq!(book.len(), distinct.len());
    }

    #[test]
    fn test_roundtrip_compresses_skewed_input() {
        let mut input = vec![b'a'; 4000];
        input.extend_from_slice(&[b'b'; 100]);
        input.extend_from_slice(b"cdef");
        let (payload, book) = compress(&input).unwrap();
        assert_eq!(decompress(&payload, &book).unwrap(), input);
        // Mean code length under 8 implies the payload beats raw storage.
        assert!(payload.len() < input.len());
    }

    #[test]
    fn test_roundtrip_single_symbol() {
        let (payload, book) = compress(b"aaaa").unwrap();
        // One bit per repeat plus the 8-byte frame.
        assert_eq!(payload.len(), 9);
        assert_eq!(decompress(&payload, &book).unwrap(), b"aaaa".to_vec());
    }

    #[test]
    fn test_roundtrip_empty_input() {
        let (payload, book) = compress(b"").unwrap();
        assert!(payload.is_empty());
        assert!(book.is_empty());
        assert_eq!(decompress(&payload, &book).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_roundtrip_full_alphabet() {
        let input: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
        let (payload, book) = compress(&input).unwrap();
        assert_eq!(book.len(), 256);
        assert_eq!(decompress(&payload, &book).unwrap(), input);
    }

    #[test]
    fn test_encode_rejects_unknown_symbol() {
        let book = CodeBook::from_frequencies(&FreqTable::from_bytes(b"aabb")).unwrap();
        let err = Encoder::new(&book).encode(b"abc").unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol(b'c')));
    }

    #[test]
    fn test_decode_rejects_mismatched_book() {
        // A single-symbol book only knows the code `0`; the first 1 bit in
        // the payload strands the candidate, mid-stream or at the end.
        let (payload, _) = compress(b"the payload side of the mismatch").unwrap();
        let other = CodeBook::from_frequencies(&FreqTable::from_bytes(b"zzzz")).unwrap();
        assert!(matches!(
            decompress(&payload, &other),
            Err(Error::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let (mut payload, book) = compress(b"truncate me somewhere in the middle").unwrap();
        payload.truncate(payload.len() - 2);
        assert!(matches!(
            decompress(&payload, &book),
            Err(Error::BitCountMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_stream_cut_mid_code() {
        let input = b"abcabcabcx";
        let (payload, book) = compress(input).unwrap();
        // Rewrite the header to claim one bit fewer, stranding a partial
        // code at the end of the stream.
        let declared = u64::from_le_bytes(payload[..8].try_into().unwrap());
        let mut cut = payload.clone();
        cut[..8].copy_from_slice(&(declared - 1).to_le_bytes());
        assert!(matches!(
            decompress(&cut, &book),
            Err(Error::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_decode_reports_progress() {
        let input = vec![b'x'; 500];
        let (payload, book) = compress(&input).unwrap();
        let progress = Progress::new();
        let out = Decoder::new(&book)
            .decode_with_progress(&payload, &progress)
            .unwrap();
        assert_eq!(out, input);
        assert_eq!(progress.total_bits(), 500);
        assert_eq!(progress.bits_consumed(), 500);
    }
}
