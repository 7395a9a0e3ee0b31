//! The octet a confirmed request uses to advertise how many segments and
//! how large an APDU the requester accepts in its response.

use crate::DecodeError;

/// Maximum number of response segments accepted (high nibble).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MaxSegments {
    Unspecified = 0,
    Two = 1,
    Four = 2,
    Eight = 3,
    Sixteen = 4,
    ThirtyTwo = 5,
    SixtyFour = 6,
    MoreThanSixtyFour = 7,
}

impl MaxSegments {
    /// Bucket for a segment count: the first power of two strictly above
    /// it, up to 64, which has its own code.
    pub fn from_count(count: u32) -> Self {
        match count {
            0..=1 => Self::Unspecified,
            2..=3 => Self::Two,
            4..=7 => Self::Four,
            8..=15 => Self::Eight,
            16..=31 => Self::Sixteen,
            32..=63 => Self::ThirtyTwo,
            64 => Self::SixtyFour,
            _ => Self::MoreThanSixtyFour,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unspecified),
            1 => Some(Self::Two),
            2 => Some(Self::Four),
            3 => Some(Self::Eight),
            4 => Some(Self::Sixteen),
            5 => Some(Self::ThirtyTwo),
            6 => Some(Self::SixtyFour),
            7 => Some(Self::MoreThanSixtyFour),
            _ => None,
        }
    }

    /// The segment count this code stands for; `None` when unspecified or
    /// unbounded.
    pub const fn count(self) -> Option<u32> {
        match self {
            Self::Unspecified | Self::MoreThanSixtyFour => None,
            other => Some(1 << (other as u32)),
        }
    }
}

/// Maximum APDU length accepted (low nibble).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MaxApdu {
    UpTo50 = 0,
    UpTo128 = 1,
    /// Fits a LonTalk frame.
    UpTo206 = 2,
    /// Fits an ARCNET or MS/TP frame.
    UpTo480 = 3,
    UpTo1024 = 4,
    /// Fits an ISO 8802-3 frame; the BACnet/IP maximum.
    UpTo1476 = 5,
}

impl MaxApdu {
    /// Smallest bucket holding `len`, or `None` above 1476.
    pub const fn from_len(len: u32) -> Option<Self> {
        match len {
            0..=50 => Some(Self::UpTo50),
            51..=128 => Some(Self::UpTo128),
            129..=206 => Some(Self::UpTo206),
            207..=480 => Some(Self::UpTo480),
            481..=1024 => Some(Self::UpTo1024),
            1025..=1476 => Some(Self::UpTo1476),
            _ => None,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::UpTo50),
            1 => Some(Self::UpTo128),
            2 => Some(Self::UpTo206),
            3 => Some(Self::UpTo480),
            4 => Some(Self::UpTo1024),
            5 => Some(Self::UpTo1476),
            _ => None,
        }
    }

    pub const fn max_len(self) -> u16 {
        match self {
            Self::UpTo50 => 50,
            Self::UpTo128 => 128,
            Self::UpTo206 => 206,
            Self::UpTo480 => 480,
            Self::UpTo1024 => 1024,
            Self::UpTo1476 => 1476,
        }
    }
}

/// Encodes the max-segments/max-APDU octet.
///
/// `max_apdu` is expected to be at most 1476, the largest length BACnet/IP
/// can carry. Larger values are logged and advertised as 1476.
pub fn encode_max_segs_max_apdu(max_segments: u32, max_apdu: u32) -> u8 {
    let segments = MaxSegments::from_count(max_segments);
    let apdu = MaxApdu::from_len(max_apdu).unwrap_or_else(|| {
        log::warn!("max APDU length {max_apdu} exceeds 1476; advertising 1476");
        MaxApdu::UpTo1476
    });
    log::trace!("max segments {max_segments} -> {segments:?}, max APDU {max_apdu} -> {apdu:?}");
    ((segments as u8) << 4) | apdu as u8
}

/// Splits the octet back into its two codes. The high bit of the octet is
/// reserved and ignored; APDU codes above 5 are reserved and rejected.
pub fn decode_max_segs_max_apdu(octet: u8) -> Result<(MaxSegments, MaxApdu), DecodeError> {
    let segments = MaxSegments::from_u8((octet >> 4) & 0x07).ok_or(DecodeError::InvalidValue)?;
    let apdu = MaxApdu::from_u8(octet & 0x0F).ok_or(DecodeError::InvalidValue)?;
    Ok((segments, apdu))
}

#[cfg(test)]
mod tests {
    use super::{decode_max_segs_max_apdu, encode_max_segs_max_apdu, MaxApdu, MaxSegments};
    use crate::DecodeError;

    #[test]
    fn segment_buckets() {
        assert_eq!(encode_max_segs_max_apdu(1, 50), 0x00);
        assert_eq!(encode_max_segs_max_apdu(2, 50), 0x10);
        assert_eq!(encode_max_segs_max_apdu(3, 50), 0x10);
        assert_eq!(encode_max_segs_max_apdu(4, 50), 0x20);
        assert_eq!(encode_max_segs_max_apdu(32, 50), 0x50);
        assert_eq!(encode_max_segs_max_apdu(63, 50), 0x50);
        assert_eq!(encode_max_segs_max_apdu(64, 50), 0x60);
        assert_eq!(encode_max_segs_max_apdu(65, 50), 0x70);
        assert_eq!(encode_max_segs_max_apdu(u32::MAX, 50), 0x70);
    }

    #[test]
    fn apdu_buckets() {
        for (len, code) in [
            (0u32, 0x00u8),
            (50, 0x00),
            (51, 0x01),
            (128, 0x01),
            (206, 0x02),
            (480, 0x03),
            (481, 0x04),
            (1024, 0x04),
            (1476, 0x05),
        ] {
            assert_eq!(encode_max_segs_max_apdu(1, len), code, "len {len}");
        }
    }

    #[test]
    fn oversized_apdu_is_clamped() {
        assert_eq!(encode_max_segs_max_apdu(1, 1477), 0x05);
        assert_eq!(MaxApdu::from_len(9000), None);
    }

    #[test]
    fn decode_splits_nibbles() {
        assert_eq!(
            decode_max_segs_max_apdu(0x75).unwrap(),
            (MaxSegments::MoreThanSixtyFour, MaxApdu::UpTo1476)
        );
        assert_eq!(
            decode_max_segs_max_apdu(0x13).unwrap(),
            (MaxSegments::Two, MaxApdu::UpTo480)
        );
        assert_eq!(
            decode_max_segs_max_apdu(0x06).unwrap_err(),
            DecodeError::InvalidValue
        );
    }

    #[test]
    fn segment_counts() {
        assert_eq!(MaxSegments::Unspecified.count(), None);
        assert_eq!(MaxSegments::Two.count(), Some(2));
        assert_eq!(MaxSegments::SixtyFour.count(), Some(64));
        assert_eq!(MaxSegments::MoreThanSixtyFour.count(), None);
        assert_eq!(MaxApdu::UpTo206.max_len(), 206);
    }
}
