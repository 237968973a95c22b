#![no_main]
use huff::{compress, decompress};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (payload, book) = compress(data).expect("compress never fails on owned input");
    let output = decompress(&payload, &book).expect("decode with the matching book");
    assert_eq!(data, output.as_slice());

    if data.is_empty() {
        assert!(payload.is_empty());
        assert!(book.is_empty());
    }
});
