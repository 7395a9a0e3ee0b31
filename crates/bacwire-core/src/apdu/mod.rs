/// Confirmed-request header.
pub mod confirmed;
/// APDU type discriminant.
pub mod pdu;
/// Max-segments/max-APDU octet.
pub mod segmentation;

pub use confirmed::{ConfirmedRequestHeader, SERVICE_READ_PROPERTY};
pub use pdu::ApduType;
pub use segmentation::{decode_max_segs_max_apdu, encode_max_segs_max_apdu, MaxApdu, MaxSegments};
