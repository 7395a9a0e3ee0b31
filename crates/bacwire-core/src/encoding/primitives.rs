use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::{Date, ObjectId, Time};
use crate::{DecodeError, EncodeError};

/// Payload size of the fixed-width application types.
pub const REAL_LEN: u32 = 4;
pub const DOUBLE_LEN: u32 = 8;
pub const DATE_LEN: u32 = 4;
pub const TIME_LEN: u32 = 4;
pub const OBJECT_ID_LEN: u32 = 4;

/// Smallest octet count that holds `value`.
pub const fn unsigned_len(value: u32) -> u32 {
    if value <= 0xFF {
        1
    } else if value <= 0xFFFF {
        2
    } else if value <= 0xFF_FFFF {
        3
    } else {
        4
    }
}

/// Smallest octet count that holds `value` in two's complement.
pub const fn signed_len(value: i32) -> u32 {
    if value >= -128 && value <= 127 {
        1
    } else if value >= -32_768 && value <= 32_767 {
        2
    } else if value >= -8_388_608 && value <= 8_388_607 {
        3
    } else {
        4
    }
}

pub fn encode_unsigned(w: &mut Writer<'_>, value: u32) -> Result<usize, EncodeError> {
    let len = unsigned_len(value) as usize;
    w.write_all(&value.to_be_bytes()[4 - len..])?;
    Ok(len)
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u32, DecodeError> {
    if len == 0 || len > 4 {
        return Err(DecodeError::InvalidLength);
    }
    let bytes = r.read_exact(len)?;
    Ok(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

pub fn encode_signed(w: &mut Writer<'_>, value: i32) -> Result<usize, EncodeError> {
    let len = signed_len(value) as usize;
    w.write_all(&value.to_be_bytes()[4 - len..])?;
    Ok(len)
}

pub fn decode_signed(r: &mut Reader<'_>, len: usize) -> Result<i32, DecodeError> {
    if len == 0 || len > 4 {
        return Err(DecodeError::InvalidLength);
    }

    let bytes = r.read_exact(len)?;
    let fill = if (bytes[0] & 0x80) != 0 { 0xFF } else { 0x00 };
    let mut out = [fill; 4];
    out[4 - len..].copy_from_slice(bytes);
    Ok(i32::from_be_bytes(out))
}

pub fn encode_real(w: &mut Writer<'_>, value: f32) -> Result<(), EncodeError> {
    w.write_be_u32(value.to_bits())
}

pub fn decode_real(r: &mut Reader<'_>) -> Result<f32, DecodeError> {
    r.read_be_u32().map(f32::from_bits)
}

pub fn encode_double(w: &mut Writer<'_>, value: f64) -> Result<(), EncodeError> {
    w.write_be_u64(value.to_bits())
}

pub fn decode_double(r: &mut Reader<'_>) -> Result<f64, DecodeError> {
    r.read_be_u64().map(f64::from_bits)
}

/// Raw payload, no character-set octet.
pub fn encode_character_string(w: &mut Writer<'_>, value: &[u8]) -> Result<(), EncodeError> {
    w.write_all(value)
}

/// Borrows `len` payload octets as they are; no character set is assumed.
pub fn decode_character_string<'a>(
    r: &mut Reader<'a>,
    len: usize,
) -> Result<&'a [u8], DecodeError> {
    r.read_exact(len)
}

pub fn encode_date(w: &mut Writer<'_>, date: Date) -> Result<(), EncodeError> {
    let year = date.wire_year().ok_or(EncodeError::ValueOutOfRange)?;
    w.write_all(&[year, date.month, date.day, date.day_of_week])
}

pub fn decode_date(r: &mut Reader<'_>) -> Result<Date, DecodeError> {
    let [year, month, day, day_of_week] = r.read_array::<4>()?;
    Ok(Date {
        year: Date::year_from_wire(year),
        month,
        day,
        day_of_week,
    })
}

pub fn encode_time(w: &mut Writer<'_>, time: Time) -> Result<(), EncodeError> {
    let hundredths = time.hundredths().ok_or(EncodeError::ValueOutOfRange)?;
    w.write_all(&[time.hour, time.minute, time.second, hundredths])
}

pub fn decode_time(r: &mut Reader<'_>) -> Result<Time, DecodeError> {
    let [hour, minute, second, hundredths] = r.read_array::<4>()?;
    Ok(Time::from_wire(hour, minute, second, hundredths))
}

pub fn encode_object_id(w: &mut Writer<'_>, id: ObjectId) -> Result<(), EncodeError> {
    let raw = id.to_raw().ok_or(EncodeError::ValueOutOfRange)?;
    w.write_be_u32(raw)
}

pub fn decode_object_id(r: &mut Reader<'_>) -> Result<ObjectId, DecodeError> {
    r.read_be_u32().map(ObjectId::from_raw)
}
