#![no_main]

use bacwire_core::apdu::ConfirmedRequestHeader;
use bacwire_core::encoding::reader::Reader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    let _ = ConfirmedRequestHeader::decode(&mut r);
});
