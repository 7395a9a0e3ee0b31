#![no_main]

use bacwire_core::encoding::{reader::Reader, tag::Tag};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    while let Ok(tag) = Tag::decode(&mut r) {
        let _ = tag.encoded_len();
    }
});
