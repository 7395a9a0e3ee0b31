//! BACnet/IP wire codec in pure Rust.
//!
//! `bacwire-core` encodes and decodes the application-layer tagged values
//! that carry property data, the NPDU header that frames every packet, and
//! the max-segments/max-APDU octet of confirmed requests. Every function is
//! a pure transform over caller-owned buffers: no sockets, no state kept
//! between calls, `no_std`-compatible.
//!
//! # Feature flags
//!
//! - **`std`** (default): `std::error::Error` impls and socket-address helpers.
//! - **`serde`**: derives `Serialize`/`Deserialize` on domain types.
//! - **`defmt`**: derives `defmt::Format` on errors and tags.
//!
//! # Example
//!
//! ```
//! use bacwire_core::encoding::writer::Writer;
//! use bacwire_core::npdu::{BacnetAddress, MessagePriority, NpduHeader};
//! use bacwire_core::types::DataValue;
//! use bacwire_core::value_codec::encode_application_value;
//!
//! let mut buf = [0u8; 32];
//! let mut w = Writer::new(&mut buf);
//! NpduHeader::new(false, MessagePriority::Normal)
//!     .encode(&mut w, &BacnetAddress::LOCAL, &BacnetAddress::LOCAL)
//!     .unwrap();
//! encode_application_value(&mut w, &DataValue::Real(72.5)).unwrap();
//! assert_eq!(&w.as_written()[8..], &[0x44, 0x42, 0x91, 0x00, 0x00]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

/// APDU type, confirmed-request header and segmentation parameters.
pub mod apdu;
/// Tag headers, primitive payloads and the reader/writer cursors.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// NPDU (Network Protocol Data Unit) encoding and decoding.
pub mod npdu;
/// Domain values: dates, times, object identifiers and the value enum.
pub mod types;
/// Application-tagged value encoding and decoding.
pub mod value_codec;

pub use apdu::segmentation::encode_max_segs_max_apdu;
pub use error::{DecodeError, EncodeError};
pub use npdu::{BacnetAddress, MessagePriority, Npdu, NpduHeader};
pub use value_codec::{decode_application_value, encode_application_value, ApplicationValues};
