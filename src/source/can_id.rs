//! Decomposition of the 29-bit CAN identifier NMEA 2000 frames carry,
//! following the PDU1/PDU2 split inherited from SAE J1939 (§4.2).
use byteorder::{ByteOrder, LittleEndian};

/// A raw 29-bit CAN identifier, packed into a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanId(pub u32);

impl CanId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Build a `CanId` from its little-endian on-disk representation.
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(LittleEndian::read_u32(&bytes))
    }

    /// 3-bit transmission priority.
    pub fn priority(&self) -> u8 {
        ((self.0 >> 26) & 0x07) as u8
    }

    fn pf(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    fn ps(&self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    fn dp(&self) -> u8 {
        ((self.0 >> 24) & 0x01) as u8
    }

    /// 8-bit source address of the transmitting node.
    pub fn source(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Destination address: the explicit PS byte for PDU1 (PF < 240)
    /// messages, or the broadcast sentinel `0xFF` for PDU2 (PF >= 240).
    pub fn destination(&self) -> u8 {
        if self.pf() < 240 {
            self.ps()
        } else {
            0xFF
        }
    }

    /// The 18-bit Parameter Group Number this identifier addresses.
    pub fn pgn(&self) -> u32 {
        let dp = self.dp() as u32;
        let pf = self.pf() as u32;
        if self.pf() < 240 {
            (dp << 16) | (pf << 8)
        } else {
            (dp << 16) | (pf << 8) | self.ps() as u32
        }
    }
}

#[cfg(test)]
#[path = "can_id_tests.rs"]
mod tests;
