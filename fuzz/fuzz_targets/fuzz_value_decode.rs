#![no_main]

use bacwire_core::encoding::reader::Reader;
use bacwire_core::value_codec::ApplicationValues;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    for value in ApplicationValues::new(&mut r) {
        if value.is_err() {
            break;
        }
    }
});
