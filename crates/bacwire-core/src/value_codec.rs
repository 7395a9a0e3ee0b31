use crate::encoding::{
    primitives::{
        decode_character_string, decode_date, decode_double, decode_object_id, decode_real,
        decode_signed, decode_time, decode_unsigned, encode_character_string, encode_date,
        encode_double, encode_object_id, encode_real, encode_signed, encode_time,
        encode_unsigned, signed_len, unsigned_len, DATE_LEN, DOUBLE_LEN, OBJECT_ID_LEN, REAL_LEN,
        TIME_LEN,
    },
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::DataValue;
use crate::{DecodeError, EncodeError};
use core::iter::FusedIterator;

fn u32_len(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::ValueOutOfRange)
}

/// Encodes one application-tagged value.
///
/// Bit strings and octet strings have no encoder here and fail with
/// [`EncodeError::UnsupportedValueType`] before anything is written.
pub fn encode_application_value(
    w: &mut Writer<'_>,
    value: &DataValue<'_>,
) -> Result<(), EncodeError> {
    let tag = value.app_tag();
    match value {
        DataValue::Null => Tag::application(tag, 0).encode(w),
        DataValue::Boolean(v) => Tag::application(tag, u32::from(*v)).encode(w),
        DataValue::Unsigned(v) | DataValue::Enumerated(v) => {
            Tag::application(tag, unsigned_len(*v)).encode(w)?;
            encode_unsigned(w, *v).map(drop)
        }
        DataValue::Signed(v) => {
            Tag::application(tag, signed_len(*v)).encode(w)?;
            encode_signed(w, *v).map(drop)
        }
        DataValue::Real(v) => {
            Tag::application(tag, REAL_LEN).encode(w)?;
            encode_real(w, *v)
        }
        DataValue::Double(v) => {
            Tag::application(tag, DOUBLE_LEN).encode(w)?;
            encode_double(w, *v)
        }
        DataValue::CharacterString(v) => {
            Tag::application(tag, u32_len(v.len())?).encode(w)?;
            encode_character_string(w, v)
        }
        DataValue::Date(v) => {
            v.wire_year().ok_or(EncodeError::ValueOutOfRange)?;
            Tag::application(tag, DATE_LEN).encode(w)?;
            encode_date(w, *v)
        }
        DataValue::Time(v) => {
            v.hundredths().ok_or(EncodeError::ValueOutOfRange)?;
            Tag::application(tag, TIME_LEN).encode(w)?;
            encode_time(w, *v)
        }
        DataValue::ObjectId(v) => {
            v.to_raw().ok_or(EncodeError::ValueOutOfRange)?;
            Tag::application(tag, OBJECT_ID_LEN).encode(w)?;
            encode_object_id(w, *v)
        }
        DataValue::OctetString(_) | DataValue::BitString(_) => {
            Err(EncodeError::UnsupportedValueType)
        }
    }
}

/// Decodes one application-tagged value.
///
/// A null tag yields `Ok(DataValue::Null)`: an empty but valid result.
pub fn decode_application_value<'a>(r: &mut Reader<'a>) -> Result<DataValue<'a>, DecodeError> {
    let tag = Tag::decode(r)?;
    decode_application_value_from_tag(r, tag)
}

/// Decodes the payload that follows an already-read tag header.
///
/// Dispatch looks only at the tag number; the class bit is not consulted.
/// Fixed-width payloads (real, double, date, time, object id) are read at
/// their natural size regardless of the header's length field.
pub fn decode_application_value_from_tag<'a>(
    r: &mut Reader<'a>,
    tag: Tag,
) -> Result<DataValue<'a>, DecodeError> {
    let (tag_num, len) = match tag {
        Tag::Application { tag_num, len } | Tag::Context { tag_num, len } => (tag_num, len),
        Tag::Opening { tag_num } | Tag::Closing { tag_num } => {
            log::debug!("constructed delimiter {tag_num} where a primitive value was expected");
            return Err(DecodeError::UnsupportedTag(tag_num));
        }
    };
    let len = len as usize;

    let Some(app_tag) = AppTag::from_u8(tag_num) else {
        log::debug!("reserved application tag {tag_num}");
        return Err(DecodeError::UnsupportedTag(tag_num));
    };

    match app_tag {
        AppTag::Null => Ok(DataValue::Null),
        AppTag::Boolean => Ok(DataValue::Boolean(len != 0)),
        AppTag::UnsignedInt => Ok(DataValue::Unsigned(decode_unsigned(r, len)?)),
        AppTag::SignedInt => Ok(DataValue::Signed(decode_signed(r, len)?)),
        AppTag::Real => Ok(DataValue::Real(decode_real(r)?)),
        AppTag::Double => Ok(DataValue::Double(decode_double(r)?)),
        AppTag::CharacterString => Ok(DataValue::CharacterString(decode_character_string(
            r, len,
        )?)),
        AppTag::Enumerated => Ok(DataValue::Enumerated(decode_unsigned(r, len)?)),
        AppTag::Date => Ok(DataValue::Date(decode_date(r)?)),
        AppTag::Time => Ok(DataValue::Time(decode_time(r)?)),
        AppTag::ObjectId => Ok(DataValue::ObjectId(decode_object_id(r)?)),
        AppTag::OctetString | AppTag::BitString => {
            log::debug!("no decoder for application tag {tag_num} ({len} octets)");
            Err(DecodeError::UnsupportedTag(tag_num))
        }
    }
}

/// Iterator over consecutive application values in one buffer.
///
/// Yields until the reader is exhausted. The first error is yielded once
/// and ends the iteration.
#[derive(Debug)]
pub struct ApplicationValues<'a, 'r> {
    reader: &'r mut Reader<'a>,
    failed: bool,
}

impl<'a, 'r> ApplicationValues<'a, 'r> {
    pub fn new(reader: &'r mut Reader<'a>) -> Self {
        Self {
            reader,
            failed: false,
        }
    }
}

impl<'a> Iterator for ApplicationValues<'a, '_> {
    type Item = Result<DataValue<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let item = decode_application_value(self.reader);
        self.failed = item.is_err();
        Some(item)
    }
}

impl FusedIterator for ApplicationValues<'_, '_> {}
