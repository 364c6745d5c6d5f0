//! # Manufacturer Data Header
//!
//! Every Victron instant readout advertisement starts with an 8-byte
//! cleartext header followed by the encrypted record body:
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0      | 1    | manufacturer record type (0x10 = product advertisement) |
//! | 1      | 1    | record version/status, not interpreted |
//! | 2      | 2    | model ID, little-endian |
//! | 4      | 1    | readout record type (device family selector) |
//! | 5      | 2    | nonce / data counter, little-endian |
//! | 7      | 1    | first byte of the AES key (key check) |
//! | 8..    | n    | ciphertext |

use nom::{
    number::complete::{le_u16, u8},
    sequence::tuple,
    IResult,
};

use crate::constants::HEADER_LEN;
use crate::error::VictronError;

/// Parsed view of one manufacturer data block. Borrows the ciphertext from
/// the raw advertisement; lives only for one decode cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerData<'a> {
    /// Manufacturer record type, 0x10 for product advertisements.
    pub record_type: u8,
    /// Numeric model identifier of the advertising product.
    pub model_id: u16,
    /// Device family selector for the encrypted body.
    pub readout_type: u8,
    /// Per-advertisement counter feeding the cipher's counter block.
    pub nonce: u16,
    /// First byte of the advertisement key, used as a sanity check.
    pub key_check: u8,
    /// Encrypted record body.
    pub ciphertext: &'a [u8],
}

fn header(input: &[u8]) -> IResult<&[u8], (u8, u8, u16, u8, u16, u8)> {
    tuple((u8, u8, le_u16, u8, le_u16, u8))(input)
}

impl<'a> ManufacturerData<'a> {
    /// Split a raw manufacturer data block into header fields and ciphertext.
    pub fn parse(raw: &'a [u8]) -> Result<Self, VictronError> {
        let (ciphertext, (record_type, _status, model_id, readout_type, nonce, key_check)) =
            header(raw).map_err(|_| VictronError::MalformedCiphertext {
                needed: HEADER_LEN,
                actual: raw.len(),
            })?;

        Ok(Self {
            record_type,
            model_id,
            readout_type,
            nonce,
            key_check,
            ciphertext,
        })
    }
}
