use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Application tag numbers; the wire discriminant of a primitive value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppTag {
    Null = 0,
    Boolean = 1,
    UnsignedInt = 2,
    SignedInt = 3,
    Real = 4,
    Double = 5,
    OctetString = 6,
    CharacterString = 7,
    BitString = 8,
    Enumerated = 9,
    Date = 10,
    Time = 11,
    ObjectId = 12,
}

impl AppTag {
    /// Maps a tag number to its application type. Numbers 13 and up are
    /// reserved and have no mapping.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Null),
            1 => Some(Self::Boolean),
            2 => Some(Self::UnsignedInt),
            3 => Some(Self::SignedInt),
            4 => Some(Self::Real),
            5 => Some(Self::Double),
            6 => Some(Self::OctetString),
            7 => Some(Self::CharacterString),
            8 => Some(Self::BitString),
            9 => Some(Self::Enumerated),
            10 => Some(Self::Date),
            11 => Some(Self::Time),
            12 => Some(Self::ObjectId),
            _ => None,
        }
    }
}

/// Largest encodable tag number; 255 is reserved.
pub const MAX_TAG_NUMBER: u8 = 254;

const CONTEXT_BIT: u8 = 0b0000_1000;
const EXTENDED_TAG_NUMBER: u8 = 0x0F;
const EXTENDED_LENGTH: u8 = 5;
const OPENING: u8 = 6;
const CLOSING: u8 = 7;
const LENGTH_MARKER_U16: u8 = 254;
const LENGTH_MARKER_U32: u8 = 255;

/// A decoded tag header.
///
/// `len` is the length/value field: the payload octet count for most tags,
/// the value itself for application booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    Application { tag_num: u8, len: u32 },
    Context { tag_num: u8, len: u32 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

impl Tag {
    pub const fn new(tag_num: u8, context_specific: bool, len: u32) -> Self {
        if context_specific {
            Tag::Context { tag_num, len }
        } else {
            Tag::Application { tag_num, len }
        }
    }

    pub const fn application(tag: AppTag, len: u32) -> Self {
        Tag::Application {
            tag_num: tag as u8,
            len,
        }
    }

    pub const fn tag_number(self) -> u8 {
        match self {
            Tag::Application { tag_num, .. }
            | Tag::Context { tag_num, .. }
            | Tag::Opening { tag_num }
            | Tag::Closing { tag_num } => tag_num,
        }
    }

    pub const fn is_context_specific(self) -> bool {
        !matches!(self, Tag::Application { .. })
    }

    /// The length/value field. Opening and closing tags carry none.
    pub const fn len_value(self) -> u32 {
        match self {
            Tag::Application { len, .. } | Tag::Context { len, .. } => len,
            Tag::Opening { .. } | Tag::Closing { .. } => 0,
        }
    }

    /// Octets this header occupies on the wire.
    pub const fn encoded_len(self) -> usize {
        let ext_tag = if self.tag_number() > 14 { 1 } else { 0 };
        let ext_len = match self {
            Tag::Opening { .. } | Tag::Closing { .. } => 0,
            Tag::Application { len, .. } | Tag::Context { len, .. } => {
                if len < 5 {
                    0
                } else if len < 254 {
                    1
                } else if len < 65536 {
                    3
                } else {
                    5
                }
            }
        };
        1 + ext_tag + ext_len
    }

    pub fn encode(self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        if self.tag_number() > MAX_TAG_NUMBER {
            return Err(EncodeError::ReservedTagNumber);
        }
        match self {
            Tag::Application { tag_num, len } => encode_with_meta(w, tag_num, false, len),
            Tag::Context { tag_num, len } => encode_with_meta(w, tag_num, true, len),
            Tag::Opening { tag_num } => encode_open_close(w, tag_num, OPENING),
            Tag::Closing { tag_num } => encode_open_close(w, tag_num, CLOSING),
        }
    }

    /// Reads one tag header.
    ///
    /// A missing first octet is [`DecodeError::InsufficientBytes`]; missing
    /// extension octets after it are [`DecodeError::MalformedTag`].
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = r.read_u8()?;
        let class_context = (first & CONTEXT_BIT) != 0;

        let mut tag_num = first >> 4;
        if tag_num == EXTENDED_TAG_NUMBER {
            tag_num = r.read_u8().map_err(|_| DecodeError::MalformedTag)?;
            if tag_num > MAX_TAG_NUMBER {
                return Err(DecodeError::MalformedTag);
            }
        }

        let len_val = first & 0x07;
        if class_context && len_val == OPENING {
            return Ok(Tag::Opening { tag_num });
        }
        if class_context && len_val == CLOSING {
            return Ok(Tag::Closing { tag_num });
        }

        let len = decode_len(r, len_val).map_err(|_| DecodeError::MalformedTag)?;
        Ok(Tag::new(tag_num, class_context, len))
    }
}

fn first_octet(tag_num: u8, is_context: bool, len_code: u8) -> u8 {
    let mut first = if tag_num <= 14 { tag_num << 4 } else { 0xF0 };
    if is_context {
        first |= CONTEXT_BIT;
    }
    first | len_code
}

fn encode_with_meta(
    w: &mut Writer<'_>,
    tag_num: u8,
    is_context: bool,
    len: u32,
) -> Result<(), EncodeError> {
    let len_code = if len < 5 { len as u8 } else { EXTENDED_LENGTH };
    w.write_u8(first_octet(tag_num, is_context, len_code))?;

    if tag_num > 14 {
        w.write_u8(tag_num)?;
    }

    if len_code == EXTENDED_LENGTH {
        if len < 254 {
            w.write_u8(len as u8)?;
        } else if len < 65536 {
            w.write_u8(LENGTH_MARKER_U16)?;
            w.write_be_u16(len as u16)?;
        } else {
            w.write_u8(LENGTH_MARKER_U32)?;
            w.write_be_u32(len)?;
        }
    }

    Ok(())
}

fn encode_open_close(w: &mut Writer<'_>, tag_num: u8, code: u8) -> Result<(), EncodeError> {
    w.write_u8(first_octet(tag_num, true, code))?;
    if tag_num > 14 {
        w.write_u8(tag_num)?;
    }
    Ok(())
}

// Application-class codes 6 and 7 have no special meaning and pass through
// as literal length/values.
fn decode_len(r: &mut Reader<'_>, len_code: u8) -> Result<u32, DecodeError> {
    if len_code != EXTENDED_LENGTH {
        return Ok(len_code as u32);
    }
    match r.read_u8()? {
        LENGTH_MARKER_U16 => Ok(r.read_be_u16()? as u32),
        LENGTH_MARKER_U32 => r.read_be_u32(),
        v => Ok(v as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppTag, Tag};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::{DecodeError, EncodeError};

    #[test]
    fn roundtrip_application_tag() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        Tag::application(AppTag::UnsignedInt, 3).encode(&mut w).unwrap();
        assert_eq!(w.as_written(), &[0x23]);

        let mut r = Reader::new(w.as_written());
        let t = Tag::decode(&mut r).unwrap();
        assert_eq!(
            t,
            Tag::Application {
                tag_num: AppTag::UnsignedInt as u8,
                len: 3
            }
        );
    }

    #[test]
    fn roundtrip_across_tag_numbers_and_lengths() {
        let tag_numbers = [0u8, 1, 14, 15, 100, 254];
        let lengths: [(u32, usize); 7] = [
            (0, 0),
            (4, 0),
            (5, 1),
            (253, 1),
            (254, 3),
            (65535, 3),
            (65536, 5),
        ];

        for &tag_num in &tag_numbers {
            for &(len, ext) in &lengths {
                for context in [false, true] {
                    let tag = Tag::new(tag_num, context, len);
                    let mut buf = [0u8; 8];
                    let mut w = Writer::new(&mut buf);
                    tag.encode(&mut w).unwrap();

                    let ext_tag = usize::from(tag_num >= 15);
                    assert_eq!(w.position(), 1 + ext_tag + ext, "tag {tag_num} len {len}");
                    assert_eq!(tag.encoded_len(), w.position());

                    let mut r = Reader::new(w.as_written());
                    let got = Tag::decode(&mut r).unwrap();
                    assert_eq!(got.tag_number(), tag_num);
                    assert_eq!(got.is_context_specific(), context);
                    assert_eq!(got.len_value(), len);
                    assert!(r.is_empty());
                }
            }
        }
    }

    #[test]
    fn extended_length_markers() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        Tag::Context {
            tag_num: 30,
            len: 300,
        }
        .encode(&mut w)
        .unwrap();
        assert_eq!(w.as_written(), &[0xFD, 30, 0xFE, 0x01, 0x2C]);

        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        Tag::application(AppTag::OctetString, 70_000)
            .encode(&mut w)
            .unwrap();
        assert_eq!(w.as_written(), &[0x65, 0xFF, 0x00, 0x01, 0x11, 0x70]);
    }

    #[test]
    fn reserved_tag_number_is_rejected() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        assert_eq!(
            Tag::new(255, true, 1).encode(&mut w).unwrap_err(),
            EncodeError::ReservedTagNumber
        );
        assert_eq!(w.position(), 0);

        let mut r = Reader::new(&[0xF9, 0xFF]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::MalformedTag);
    }

    #[test]
    fn truncated_extensions_are_malformed() {
        for bytes in [
            &[0xF1][..],
            &[0x25][..],
            &[0x25, 0xFE, 0x01][..],
            &[0x25, 0xFF, 0x00, 0x00, 0x01][..],
        ] {
            let mut r = Reader::new(bytes);
            assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::MalformedTag);
        }

        let mut r = Reader::new(&[]);
        assert_eq!(
            Tag::decode(&mut r).unwrap_err(),
            DecodeError::InsufficientBytes
        );
    }

    #[test]
    fn opening_and_closing_tags() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        Tag::Opening { tag_num: 3 }.encode(&mut w).unwrap();
        Tag::Closing { tag_num: 20 }.encode(&mut w).unwrap();
        assert_eq!(w.as_written(), &[0x3E, 0xFF, 20]);

        let mut r = Reader::new(w.as_written());
        assert_eq!(Tag::decode(&mut r).unwrap(), Tag::Opening { tag_num: 3 });
        assert_eq!(Tag::decode(&mut r).unwrap(), Tag::Closing { tag_num: 20 });
    }

    #[test]
    fn application_class_codes_six_and_seven_are_literal() {
        let mut r = Reader::new(&[0x17]);
        assert_eq!(
            Tag::decode(&mut r).unwrap(),
            Tag::Application { tag_num: 1, len: 7 }
        );
    }

    #[test]
    fn reserved_numbers_have_no_app_tag() {
        assert_eq!(AppTag::from_u8(12), Some(AppTag::ObjectId));
        assert_eq!(AppTag::from_u8(13), None);
        assert_eq!(AppTag::from_u8(254), None);
    }
}
