use bacwire_core::encoding::writer::Writer;
use bacwire_core::npdu::{BacnetAddress, MessagePriority, NpduHeader};
use bacwire_core::types::{DataValue, Date, ObjectId, Time, UNSPECIFIED};
use bacwire_core::value_codec::encode_application_value;
use bacwire_core::{DecodeError, EncodeError};
use clap::ValueEnum;
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

/// Errors surfaced by the command-line tools.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
    #[error("cannot parse '{text}' as {kind:?}")]
    InvalidValue { kind: ValueKindArg, text: String },
    #[error("a destination address needs a non-zero network number")]
    AddressWithoutNetwork,
}

/// CLI-friendly selector for the application value type to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKindArg {
    Null,
    Boolean,
    Unsigned,
    Signed,
    Real,
    Double,
    CharacterString,
    Enumerated,
    /// `year-month-day-weekday`, `*` for unspecified.
    Date,
    /// `hour:minute:second.millis`, `*` for unspecified.
    Time,
    /// `type:instance`.
    ObjectId,
}

/// CLI-friendly network priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PriorityArg {
    #[default]
    Normal,
    Urgent,
    Critical,
    LifeSafety,
}

impl PriorityArg {
    pub const fn into_priority(self) -> MessagePriority {
        match self {
            Self::Normal => MessagePriority::Normal,
            Self::Urgent => MessagePriority::Urgent,
            Self::Critical => MessagePriority::Critical,
            Self::LifeSafety => MessagePriority::LifeSafety,
        }
    }
}

fn field<T: FromStr>(part: &str) -> Option<T> {
    part.trim().parse().ok()
}

fn octet_or_any(part: &str) -> Option<u8> {
    if part.trim() == "*" {
        Some(UNSPECIFIED)
    } else {
        field(part)
    }
}

fn parse_date(text: &str) -> Option<Date> {
    let mut parts = text.split('-');
    let year = match parts.next()?.trim() {
        "*" => Date::UNSPECIFIED_YEAR,
        y => y.parse().ok()?,
    };
    let date = Date::new(
        year,
        octet_or_any(parts.next()?)?,
        octet_or_any(parts.next()?)?,
        parts.next().map_or(Some(UNSPECIFIED), octet_or_any)?,
    );
    parts.next().is_none().then_some(date)
}

fn parse_time(text: &str) -> Option<Time> {
    let (hms, millis) = match text.split_once('.') {
        Some((hms, "*")) => (hms, Time::UNSPECIFIED_MILLISECOND),
        Some((hms, ms)) => (hms, field(ms)?),
        None => (text, 0),
    };
    let mut parts = hms.split(':');
    let time = Time::new(
        octet_or_any(parts.next()?)?,
        octet_or_any(parts.next()?)?,
        parts.next().map_or(Some(0), octet_or_any)?,
        millis,
    );
    parts.next().is_none().then_some(time)
}

fn parse_object_id(text: &str) -> Option<ObjectId> {
    let (object_type, instance) = text.split_once(':')?;
    Some(ObjectId::new(field(object_type)?, field(instance)?))
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "active" => Some(true),
        "false" | "0" | "off" | "inactive" => Some(false),
        _ => None,
    }
}

/// Builds a value of `kind` from its command-line text. Character strings
/// borrow `text` as is.
pub fn parse_value(kind: ValueKindArg, text: &str) -> Result<DataValue<'_>, ToolError> {
    let value = match kind {
        ValueKindArg::Null => Some(DataValue::Null),
        ValueKindArg::Boolean => parse_bool(text).map(DataValue::Boolean),
        ValueKindArg::Unsigned => field(text).map(DataValue::Unsigned),
        ValueKindArg::Signed => field(text).map(DataValue::Signed),
        ValueKindArg::Real => field(text).map(DataValue::Real),
        ValueKindArg::Double => field(text).map(DataValue::Double),
        ValueKindArg::CharacterString => Some(DataValue::CharacterString(text.as_bytes())),
        ValueKindArg::Enumerated => field(text).map(DataValue::Enumerated),
        ValueKindArg::Date => parse_date(text).map(DataValue::Date),
        ValueKindArg::Time => parse_time(text).map(DataValue::Time),
        ValueKindArg::ObjectId => parse_object_id(text).map(DataValue::ObjectId),
    };
    value.ok_or_else(|| ToolError::InvalidValue {
        kind,
        text: text.to_owned(),
    })
}

/// Destination for `--dest-net`/`--dest-adr`. Without an address the
/// message is a broadcast on `net`.
pub fn destination(net: u16, adr_hex: Option<&str>) -> Result<BacnetAddress, ToolError> {
    match adr_hex {
        Some(_) if net == 0 => Err(ToolError::AddressWithoutNetwork),
        Some(hex) => Ok(BacnetAddress::remote(net, &parse_hex(hex)?)?),
        None => Ok(BacnetAddress {
            net,
            ..BacnetAddress::LOCAL
        }),
    }
}

/// Encodes `value`, preceded by an NPDU from the local station to
/// `destination` when a header is given.
pub fn encode_frame(
    value: &DataValue<'_>,
    npdu: Option<(&NpduHeader, &BacnetAddress)>,
) -> Result<Vec<u8>, ToolError> {
    let payload = match value {
        DataValue::CharacterString(raw) => raw.len(),
        _ => 0,
    };
    let mut buf = vec![0u8; payload + 64];
    let mut w = Writer::new(&mut buf);
    if let Some((header, destination)) = npdu {
        header.encode(&mut w, &BacnetAddress::LOCAL, destination)?;
    }
    encode_application_value(&mut w, value)?;
    let len = w.position();
    buf.truncate(len);
    Ok(buf)
}

/// Parses hex octets. Whitespace, `:` separators and a leading `0x` are
/// ignored.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, ToolError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = body
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(ToolError::InvalidHex(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }
    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ToolError::InvalidHex(String::from_utf8_lossy(pair).into_owned()))
        })
        .collect()
}

/// Formats octets as space-separated upper-case hex.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02X}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        destination, encode_frame, parse_hex, parse_value, to_hex, PriorityArg, ToolError,
        ValueKindArg,
    };
    use bacwire_core::npdu::{MessagePriority, NpduHeader};
    use bacwire_core::types::{DataValue, Date, ObjectId, Time, UNSPECIFIED};
    use bacwire_core::EncodeError;

    #[test]
    fn hex_roundtrip_with_separators() {
        let bytes = parse_hex("0x01 04:00 0a").unwrap();
        assert_eq!(bytes, [0x01, 0x04, 0x00, 0x0A]);
        assert_eq!(to_hex(&bytes), "01 04 00 0A");
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert!(matches!(parse_hex("123"), Err(ToolError::InvalidHex(_))));
        assert!(matches!(parse_hex("zz"), Err(ToolError::InvalidHex(_))));
    }

    #[test]
    fn parses_scalar_values() {
        assert_eq!(
            parse_value(ValueKindArg::Real, "72.5").unwrap(),
            DataValue::Real(72.5)
        );
        assert_eq!(
            parse_value(ValueKindArg::Boolean, "Active").unwrap(),
            DataValue::Boolean(true)
        );
        assert_eq!(
            parse_value(ValueKindArg::Signed, "-40").unwrap(),
            DataValue::Signed(-40)
        );
        assert_eq!(
            parse_value(ValueKindArg::CharacterString, "AHU-1").unwrap(),
            DataValue::CharacterString(b"AHU-1")
        );
        assert!(parse_value(ValueKindArg::Unsigned, "-1").is_err());
    }

    #[test]
    fn parses_structured_values() {
        assert_eq!(
            parse_value(ValueKindArg::Date, "2024-3-15-5").unwrap(),
            DataValue::Date(Date::new(2024, 3, 15, 5))
        );
        assert_eq!(
            parse_value(ValueKindArg::Date, "*-13-32").unwrap(),
            DataValue::Date(Date::new(Date::UNSPECIFIED_YEAR, 13, 32, UNSPECIFIED))
        );
        assert_eq!(
            parse_value(ValueKindArg::Time, "13:45:30.500").unwrap(),
            DataValue::Time(Time::new(13, 45, 30, 500))
        );
        assert_eq!(
            parse_value(ValueKindArg::Time, "*:*").unwrap(),
            DataValue::Time(Time::new(UNSPECIFIED, UNSPECIFIED, 0, 0))
        );
        assert_eq!(
            parse_value(ValueKindArg::ObjectId, "8:12").unwrap(),
            DataValue::ObjectId(ObjectId::new(8, 12))
        );
        assert_eq!(
            parse_value(ValueKindArg::Time, "*:*:*.*").unwrap(),
            DataValue::Time(Time::new(
                UNSPECIFIED,
                UNSPECIFIED,
                UNSPECIFIED,
                Time::UNSPECIFIED_MILLISECOND
            ))
        );
        assert!(parse_value(ValueKindArg::Date, "2024-1-1-1-1").is_err());
    }

    #[test]
    fn unspecified_time_encodes_all_sentinels() {
        let time = parse_value(ValueKindArg::Time, "*:*:*.*").unwrap();
        assert_eq!(encode_frame(&time, None).unwrap(), [0xB4, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn encode_frame_with_routed_header() {
        let dest = destination(1234, Some("0a")).unwrap();
        let header = NpduHeader::new(false, MessagePriority::Normal);
        let frame = encode_frame(&DataValue::Unsigned(7), Some((&header, &dest))).unwrap();
        assert_eq!(
            frame,
            [0x01, 0x20, 0x04, 0xD2, 0x01, 0x0A, 0x00, 0x00, 0x00, 0xFF, 0x21, 0x07]
        );
    }

    #[test]
    fn encode_failures_surface_as_tool_errors() {
        let out_of_range = DataValue::Date(Date::new(1900, 1, 1, 1));
        assert!(matches!(
            encode_frame(&out_of_range, None),
            Err(ToolError::Encode(EncodeError::ValueOutOfRange))
        ));
        assert!(matches!(
            destination(5, Some("01 02 03 04 05 06 07 08")),
            Err(ToolError::Encode(EncodeError::InvalidLength))
        ));
        assert!(matches!(
            destination(0, Some("0a")),
            Err(ToolError::AddressWithoutNetwork)
        ));
        assert_eq!(destination(9, None).unwrap().net, 9);
    }

    #[test]
    fn priority_mapping() {
        assert_eq!(
            PriorityArg::LifeSafety.into_priority(),
            MessagePriority::LifeSafety
        );
        assert_eq!(PriorityArg::default().into_priority(), MessagePriority::Normal);
    }
}
