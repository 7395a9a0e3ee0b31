use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// BACnet network layer protocol version (always `0x01`).
pub const NPDU_VERSION: u8 = 0x01;
/// Hop count given to routed messages this side originates.
pub const HOP_COUNT_DEFAULT: u8 = 255;
/// Network message type of a header that carries an APDU.
pub const NETWORK_MESSAGE_INVALID: u8 = 0xFF;
/// Largest network or MAC address this crate carries. Seven octets hold
/// every data-link MAC in use (BACnet/IP is six); a DLEN or SLEN above it is
/// refused on decode with [`DecodeError::InvalidLength`].
pub const MAX_ADDRESS_LEN: usize = 7;

const CONTROL_NETWORK_MESSAGE: u8 = 1 << 7;
const CONTROL_DESTINATION: u8 = 1 << 5;
const CONTROL_SOURCE: u8 = 1 << 3;
const CONTROL_EXPECTING_REPLY: u8 = 1 << 2;
const CONTROL_PRIORITY: u8 = 0b0000_0011;

/// Network priority, the two low bits of the control octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessagePriority {
    #[default]
    Normal = 0,
    Urgent = 1,
    Critical = 2,
    LifeSafety = 3,
}

impl MessagePriority {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & CONTROL_PRIORITY {
            0 => Self::Normal,
            1 => Self::Urgent,
            2 => Self::Critical,
            _ => Self::LifeSafety,
        }
    }
}

/// A BACnet device address.
///
/// `net` 0 is the local network: `len` is zero and the device is reached
/// through its data-link `mac`. A non-zero `net` is a remote network and
/// `adr[..len]` is the address on that network.
///
/// Addresses are stored inline, so both `adr` and `mac` are capped at
/// [`MAX_ADDRESS_LEN`] octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacnetAddress {
    pub net: u16,
    pub len: u8,
    pub adr: [u8; MAX_ADDRESS_LEN],
    pub mac_len: u8,
    pub mac: [u8; MAX_ADDRESS_LEN],
}

impl BacnetAddress {
    /// The local network with no specific station.
    pub const LOCAL: Self = Self {
        net: 0,
        len: 0,
        adr: [0; MAX_ADDRESS_LEN],
        mac_len: 0,
        mac: [0; MAX_ADDRESS_LEN],
    };

    /// A station on the local network, reached through `mac`.
    pub fn local(mac: &[u8]) -> Result<Self, EncodeError> {
        let mut out = Self::LOCAL;
        out.mac_len = copy_address(&mut out.mac, mac)?;
        Ok(out)
    }

    /// A station `adr` on remote network `net`.
    pub fn remote(net: u16, adr: &[u8]) -> Result<Self, EncodeError> {
        let mut out = Self::LOCAL;
        out.net = net;
        out.len = copy_address(&mut out.adr, adr)?;
        Ok(out)
    }

    /// BACnet/IP MAC: the four IPv4 octets followed by the UDP port.
    #[cfg(feature = "std")]
    pub fn from_socket_addr(addr: std::net::SocketAddrV4) -> Self {
        let mut out = Self::LOCAL;
        out.mac[..4].copy_from_slice(&addr.ip().octets());
        out.mac[4..6].copy_from_slice(&addr.port().to_be_bytes());
        out.mac_len = 6;
        out
    }

    pub const fn is_local(&self) -> bool {
        self.net == 0
    }

    /// The network-layer address octets. Empty when `len` exceeds the
    /// address capacity.
    pub fn address(&self) -> &[u8] {
        self.adr.get(..self.len as usize).unwrap_or(&[])
    }

    pub fn mac(&self) -> &[u8] {
        self.mac.get(..self.mac_len as usize).unwrap_or(&[])
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_be_u16(self.net)?;
        w.write_u8(self.len)?;
        w.write_all(self.address())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let net = r.read_be_u16()?;
        let len = r.read_u8()?;
        if len as usize > MAX_ADDRESS_LEN {
            return Err(DecodeError::InvalidLength);
        }
        let mut out = Self::LOCAL;
        out.net = net;
        out.len = len;
        out.adr[..len as usize].copy_from_slice(r.read_exact(len as usize)?);
        Ok(out)
    }
}

fn copy_address(dst: &mut [u8; MAX_ADDRESS_LEN], src: &[u8]) -> Result<u8, EncodeError> {
    if src.len() > MAX_ADDRESS_LEN {
        return Err(EncodeError::InvalidLength);
    }
    dst[..src.len()].copy_from_slice(src);
    Ok(src.len() as u8)
}

/// The NPDU header fields that are not addresses.
///
/// On the wire `hop_count` only appears for a remote destination, and
/// `network_message_type`/`vendor_id` only for network layer messages
/// (the vendor id only for proprietary types, `0x80` and up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpduHeader {
    pub expecting_reply: bool,
    pub protocol_version: u8,
    pub network_layer_message: bool,
    pub network_message_type: u8,
    pub vendor_id: u16,
    pub priority: MessagePriority,
    pub hop_count: u8,
}

impl NpduHeader {
    /// Header for an APDU-carrying message.
    pub const fn new(expecting_reply: bool, priority: MessagePriority) -> Self {
        Self {
            expecting_reply,
            protocol_version: NPDU_VERSION,
            network_layer_message: false,
            network_message_type: NETWORK_MESSAGE_INVALID,
            vendor_id: 0,
            priority,
            hop_count: HOP_COUNT_DEFAULT,
        }
    }

    /// Header for a network layer message.
    pub const fn network_message(message_type: u8, vendor_id: u16) -> Self {
        Self {
            network_layer_message: true,
            network_message_type: message_type,
            vendor_id,
            ..Self::new(false, MessagePriority::Normal)
        }
    }

    pub fn control(&self, source: &BacnetAddress, destination: &BacnetAddress) -> u8 {
        let mut control = self.priority as u8;
        if self.network_layer_message {
            control |= CONTROL_NETWORK_MESSAGE;
        }
        if destination.net > 0 {
            control |= CONTROL_DESTINATION;
        }
        if source.net > 0 && source.len > 0 {
            control |= CONTROL_SOURCE;
        }
        if self.expecting_reply {
            control |= CONTROL_EXPECTING_REPLY;
        }
        control
    }

    /// Writes the header with both address blocks.
    ///
    /// Both addresses are always written, a local one as net 0 and length
    /// 0. Nothing is written if either address is longer than
    /// [`MAX_ADDRESS_LEN`].
    pub fn encode(
        &self,
        w: &mut Writer<'_>,
        source: &BacnetAddress,
        destination: &BacnetAddress,
    ) -> Result<(), EncodeError> {
        if source.len as usize > MAX_ADDRESS_LEN || destination.len as usize > MAX_ADDRESS_LEN {
            return Err(EncodeError::InvalidLength);
        }

        w.write_u8(NPDU_VERSION)?;
        w.write_u8(self.control(source, destination))?;
        destination.encode(w)?;
        source.encode(w)?;

        if destination.net > 0 {
            w.write_u8(self.hop_count)?;
        }
        if self.network_layer_message {
            w.write_u8(self.network_message_type)?;
            if self.network_message_type >= 0x80 {
                w.write_be_u16(self.vendor_id)?;
            }
        }
        Ok(())
    }
}

/// A decoded NPDU: header plus both addresses. The APDU is whatever the
/// reader holds afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npdu {
    pub header: NpduHeader,
    pub source: BacnetAddress,
    pub destination: BacnetAddress,
}

impl Npdu {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        self.header.encode(w, &self.source, &self.destination)
    }

    /// Mirror of [`NpduHeader::encode`]. Fields absent from the wire take
    /// their [`NpduHeader::new`] defaults.
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let version = r.read_u8()?;
        if version != NPDU_VERSION {
            return Err(DecodeError::InvalidValue);
        }

        let control = r.read_u8()?;
        let has_dest = (control & CONTROL_DESTINATION) != 0;
        let is_network_msg = (control & CONTROL_NETWORK_MESSAGE) != 0;

        let destination = BacnetAddress::decode(r)?;
        let source = BacnetAddress::decode(r)?;

        let mut header = NpduHeader::new(
            (control & CONTROL_EXPECTING_REPLY) != 0,
            MessagePriority::from_bits(control),
        );
        header.protocol_version = version;
        if has_dest {
            header.hop_count = r.read_u8()?;
        }
        if is_network_msg {
            header.network_layer_message = true;
            header.network_message_type = r.read_u8()?;
            if header.network_message_type >= 0x80 {
                header.vendor_id = r.read_be_u16()?;
            }
        }

        Ok(Self {
            header,
            source,
            destination,
        })
    }
}
