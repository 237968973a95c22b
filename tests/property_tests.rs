use huff::{compress, decompress, Code, CodeBook, FreqTable};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_roundtrip_arbitrary_bytes(
        input in prop::collection::vec(any::<u8>(), 0..2000),
    ) {
        let (payload, book) = compress(&input).unwrap();
        let output = decompress(&payload, &book).unwrap();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_roundtrip_small_alphabet(
        input in prop::collection::vec(0u8..4, 1..500),
    ) {
        let (payload, book) = compress(&input).unwrap();
        let output = decompress(&payload, &book).unwrap();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_codes_are_prefix_free(
        input in prop::collection::vec(any::<u8>(), 1..1000),
    ) {
        let freqs = FreqTable::from_bytes(&input);
        let book = CodeBook::from_frequencies(&freqs).unwrap();

        let codes: Vec<Code> = (0u16..=255)
            .filter_map(|s| book.code_for(s as u8).cloned())
            .collect();
        for a in &codes {
            for b in &codes {
                prop_assert!(!a.is_prefix_of(b));
            }
        }
    }

    #[test]
    fn test_table_derivation_is_idempotent(
        input in prop::collection::vec(any::<u8>(), 1..800),
    ) {
        let freqs = FreqTable::from_bytes(&input);
        let first = CodeBook::from_frequencies(&freqs).unwrap();
        let second = CodeBook::from_frequencies(&freqs).unwrap();
        prop_assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn test_codebook_survives_the_wire(
        input in prop::collection::vec(any::<u8>(), 1..800),
    ) {
        let (payload, book) = compress(&input).unwrap();
        let revived = CodeBook::from_bytes(&book.to_bytes()).unwrap();
        let output = decompress(&payload, &revived).unwrap();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_mean_code_length_never_exceeds_byte_width(
        input in prop::collection::vec(any::<u8>(), 1..1000),
    ) {
        let freqs = FreqTable::from_bytes(&input);
        let book = CodeBook::from_frequencies(&freqs).unwrap();
        // A 256-leaf tree is at worst uniform-depth 8; anything smaller
        // or more skewed only shortens the weighted mean.
        prop_assert!(book.mean_code_length(&freqs) <= 8.0);
    }
}
