/// A BACnet object identifier: a 10-bit object type and a 22-bit instance
/// number, packed into one 32-bit word on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId {
    pub object_type: u16,
    pub instance: u32,
}

impl ObjectId {
    pub const MAX_TYPE: u16 = 0x03FF;
    pub const MAX_INSTANCE: u32 = 0x3F_FFFF;

    pub const fn new(object_type: u16, instance: u32) -> Self {
        Self {
            object_type,
            instance,
        }
    }

    /// Packs into the wire word, or `None` if either field overflows its
    /// bit width.
    pub const fn to_raw(self) -> Option<u32> {
        if self.object_type > Self::MAX_TYPE || self.instance > Self::MAX_INSTANCE {
            return None;
        }
        Some(((self.object_type as u32) << 22) | self.instance)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self {
            object_type: (raw >> 22) as u16,
            instance: raw & Self::MAX_INSTANCE,
        }
    }
}
