use core::fmt;

/// Failure while encoding a value or frame into a caller-owned buffer.
///
/// Encoding stops at the first error; whatever the writer holds at that
/// point is not a valid frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    BufferTooSmall,
    ValueOutOfRange,
    InvalidLength,
    /// Tag number 255 is reserved by the tag-number extension octet.
    ReservedTagNumber,
    /// The value variant has no wire encoding in this codec.
    UnsupportedValueType,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::ValueOutOfRange => f.write_str("value out of range"),
            Self::InvalidLength => f.write_str("invalid length"),
            Self::ReservedTagNumber => f.write_str("tag number 255 is reserved"),
            Self::UnsupportedValueType => f.write_str("unsupported value type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Failure while decoding a tag, value or frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    InsufficientBytes,
    /// A tag header promised extension octets that are not there.
    MalformedTag,
    /// The application tag number has no decoder (octet string, bit string,
    /// reserved numbers, constructed delimiters).
    UnsupportedTag(u8),
    InvalidLength,
    InvalidValue,
    Unsupported,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientBytes => f.write_str("insufficient bytes"),
            Self::MalformedTag => f.write_str("malformed tag"),
            Self::UnsupportedTag(tag) => write!(f, "unsupported tag {tag}"),
            Self::InvalidLength => f.write_str("invalid length"),
            Self::InvalidValue => f.write_str("invalid value"),
            Self::Unsupported => f.write_str("operation unsupported"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
