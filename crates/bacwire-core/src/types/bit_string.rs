/// A borrowed BACnet bit string: the count of unused trailing bits in the
/// last octet, and the packed octets.
///
/// Present so the value model is complete; this codec neither encodes nor
/// decodes bit-string payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitString<'a> {
    pub unused_bits: u8,
    pub data: &'a [u8],
}

impl<'a> BitString<'a> {
    pub const fn new(unused_bits: u8, data: &'a [u8]) -> Self {
        Self { unused_bits, data }
    }
}
