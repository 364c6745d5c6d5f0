//! # LSB-First Bit Reader
//!
//! The decrypted Victron records pack fields at arbitrary bit widths (2-bit
//! aux mode, 22-bit current, 10-bit state of charge). Fields are read
//! least-significant-bit first across bytes, so a 16-bit read over bytes
//! `b0, b1` yields `b0 | b1 << 8`.

use crate::error::VictronError;

/// Sequential bit reader over a decrypted record body.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of unread bits left in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    fn read_bit(&mut self) -> Result<u32, VictronError> {
        let byte = self.pos >> 3;
        if byte >= self.data.len() {
            return Err(VictronError::Parse(format!(
                "record truncated at bit {} of a {}-byte buffer",
                self.pos,
                self.data.len()
            )));
        }
        let bit = (self.data[byte] >> (self.pos & 7)) & 1;
        self.pos += 1;
        Ok(u32::from(bit))
    }

    /// Read `bits` (1..=32) as an unsigned value, LSB first.
    pub fn read_unsigned(&mut self, bits: u32) -> Result<u32, VictronError> {
        debug_assert!((1..=32).contains(&bits));
        let mut value = 0u32;
        for position in 0..bits {
            value |= self.read_bit()? << position;
        }
        Ok(value)
    }

    /// Read `bits` as a two's-complement signed value.
    pub fn read_signed(&mut self, bits: u32) -> Result<i32, VictronError> {
        Ok(Self::to_signed(self.read_unsigned(bits)?, bits))
    }

    /// Sign-extend a `bits`-wide raw value.
    pub fn to_signed(value: u32, bits: u32) -> i32 {
        if bits < 32 && value & (1 << (bits - 1)) != 0 {
            value as i32 - (1i64 << bits) as i32
        } else {
            value as i32
        }
    }
}
