//! DC-DC converter (Orion-Tr Smart) record parser.
//!
//! Decrypted layout, LSB-first:
//!
//! | bits | field          | scale         | sentinel |
//! |------|----------------|---------------|----------|
//! | 8    | charge_state   | enum          | -        |
//! | 8    | charger_error  | enum          | -        |
//! | 16   | input_voltage  | 0.01 V        | 0xFFFF   |
//! | 16   | output_voltage | 0.01 V signed | 0x7FFF   |
//! | 32   | off_reason     | bitmask       | -        |

use bitflags::bitflags;

use crate::devices::{ChargeState, ChargerError};
use crate::error::VictronError;
use crate::util::BitReader;

/// Minimum decrypted length for this layout (80 bits).
const MIN_LEN: usize = 10;

bitflags! {
    /// Why the converter output is off, a 32-bit mask. Unknown bits are
    /// retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OffReason: u32 {
        const NO_INPUT_POWER          = 0x0000_0001;
        const SWITCHED_OFF_SWITCH     = 0x0000_0002;
        const SWITCHED_OFF_REGISTER   = 0x0000_0004;
        const REMOTE_INPUT            = 0x0000_0008;
        const PROTECTION              = 0x0000_0010;
        const PAYGO                   = 0x0000_0020;
        const BMS                     = 0x0000_0040;
        const ENGINE_SHUTDOWN         = 0x0000_0080;
        const ANALYSING_INPUT_VOLTAGE = 0x0000_0100;
    }
}

/// Decoded DC-DC converter record.
#[derive(Debug, Clone, PartialEq)]
pub struct DcDcConverterData {
    pub charge_state: ChargeState,
    pub charger_error: ChargerError,
    /// Input (source battery) voltage in V.
    pub input_voltage: Option<f64>,
    /// Output voltage in V.
    pub output_voltage: Option<f64>,
    pub off_reason: OffReason,
}

impl DcDcConverterData {
    pub fn parse(plaintext: &[u8]) -> Result<Self, VictronError> {
        if plaintext.len() < MIN_LEN {
            return Err(VictronError::Parse(format!(
                "DC-DC converter record too short: {} bytes, need {MIN_LEN}",
                plaintext.len()
            )));
        }

        let mut reader = BitReader::new(plaintext);
        let charge_state = reader.read_unsigned(8)? as u8;
        let charger_error = reader.read_unsigned(8)? as u8;
        let input_voltage = reader.read_unsigned(16)? as u16;
        let output_voltage = reader.read_unsigned(16)? as u16;
        let off_reason = reader.read_unsigned(32)?;

        Ok(Self {
            charge_state: ChargeState::from_raw(charge_state),
            charger_error: ChargerError::from_raw(charger_error),
            input_voltage: (input_voltage != 0xFFFF).then(|| f64::from(input_voltage) / 100.0),
            output_voltage: (output_voltage != 0x7FFF)
                .then(|| f64::from(BitReader::to_signed(u32::from(output_voltage), 16)) / 100.0),
            off_reason: OffReason::from_bits_retain(off_reason),
        })
    }
}
