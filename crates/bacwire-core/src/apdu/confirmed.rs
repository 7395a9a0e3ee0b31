use crate::apdu::segmentation::{decode_max_segs_max_apdu, encode_max_segs_max_apdu};
use crate::apdu::segmentation::{MaxApdu, MaxSegments};
use crate::apdu::ApduType;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Confirmed service choice for ReadProperty.
pub const SERVICE_READ_PROPERTY: u8 = 12;

const SEGMENTED_MESSAGE: u8 = 0b0000_1000;
const SEGMENTED_RESPONSE_ACCEPTED: u8 = 0b0000_0010;

/// Header of an unsegmented Confirmed-Request APDU.
///
/// The invoke id is allocated by the caller's transaction layer; this type
/// only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedRequestHeader {
    pub segmented_response_accepted: bool,
    /// The max-segments/max-APDU octet, see
    /// [`encode_max_segs_max_apdu`].
    pub max_segs_max_apdu: u8,
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl ConfirmedRequestHeader {
    pub fn new(invoke_id: u8, service_choice: u8, max_segments: u32, max_apdu: u32) -> Self {
        Self {
            segmented_response_accepted: max_segments > 1,
            max_segs_max_apdu: encode_max_segs_max_apdu(max_segments, max_apdu),
            invoke_id,
            service_choice,
        }
    }

    pub fn max_segments(&self) -> Option<MaxSegments> {
        MaxSegments::from_u8((self.max_segs_max_apdu >> 4) & 0x07)
    }

    pub fn max_apdu(&self) -> Option<MaxApdu> {
        MaxApdu::from_u8(self.max_segs_max_apdu & 0x0F)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let mut b0 = (ApduType::ConfirmedRequest as u8) << 4;
        if self.segmented_response_accepted {
            b0 |= SEGMENTED_RESPONSE_ACCEPTED;
        }
        w.write_all(&[
            b0,
            self.max_segs_max_apdu,
            self.invoke_id,
            self.service_choice,
        ])
    }

    /// Decodes the header. Segmented requests are not handled and fail with
    /// [`DecodeError::Unsupported`].
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = r.read_u8()?;
        if ApduType::of_first_octet(b0) != Some(ApduType::ConfirmedRequest) {
            return Err(DecodeError::InvalidValue);
        }
        if (b0 & SEGMENTED_MESSAGE) != 0 {
            return Err(DecodeError::Unsupported);
        }
        let max_segs_max_apdu = r.read_u8()?;
        decode_max_segs_max_apdu(max_segs_max_apdu)?;
        Ok(Self {
            segmented_response_accepted: (b0 & SEGMENTED_RESPONSE_ACCEPTED) != 0,
            max_segs_max_apdu,
            invoke_id: r.read_u8()?,
            service_choice: r.read_u8()?,
        })
    }
}
