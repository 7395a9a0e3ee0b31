use crate::encoding::tag::AppTag;
use crate::types::{BitString, Date, ObjectId, Time};

/// A primitive application value. The variant is the wire tag number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DataValue<'a> {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Signed(i32),
    Real(f32),
    Double(f64),
    OctetString(&'a [u8]),
    /// Raw payload octets; see [`DataValue::as_str`].
    CharacterString(
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_character_string"))]
        &'a [u8],
    ),
    BitString(BitString<'a>),
    Enumerated(u32),
    Date(Date),
    Time(Time),
    ObjectId(ObjectId),
}

impl<'a> DataValue<'a> {
    /// The character string as text, when its octets are UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::CharacterString(raw) => core::str::from_utf8(raw).ok(),
            _ => None,
        }
    }

    pub const fn app_tag(&self) -> AppTag {
        match self {
            Self::Null => AppTag::Null,
            Self::Boolean(_) => AppTag::Boolean,
            Self::Unsigned(_) => AppTag::UnsignedInt,
            Self::Signed(_) => AppTag::SignedInt,
            Self::Real(_) => AppTag::Real,
            Self::Double(_) => AppTag::Double,
            Self::OctetString(_) => AppTag::OctetString,
            Self::CharacterString(_) => AppTag::CharacterString,
            Self::BitString(_) => AppTag::BitString,
            Self::Enumerated(_) => AppTag::Enumerated,
            Self::Date(_) => AppTag::Date,
            Self::Time(_) => AppTag::Time,
            Self::ObjectId(_) => AppTag::ObjectId,
        }
    }
}

#[cfg(feature = "serde")]
fn serialize_character_string<S: serde::Serializer>(
    raw: &&[u8],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match core::str::from_utf8(raw) {
        Ok(text) => serializer.serialize_str(text),
        Err(_) => serializer.serialize_bytes(raw),
    }
}
