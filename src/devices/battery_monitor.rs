//! Battery monitor (BMV / SmartShunt) record parser.
//!
//! Decrypted layout, LSB-first:
//!
//! | bits | field          | scale        | sentinel |
//! |------|----------------|--------------|----------|
//! | 16   | remaining_mins | 1 min        | 0xFFFF   |
//! | 16   | voltage        | 0.01 V signed| 0x7FFF   |
//! | 16   | alarm          | bitmask      | -        |
//! | 16   | aux            | per aux mode | per mode |
//! | 2    | aux_mode       | selector     | -        |
//! | 22   | current        | 1 mA signed  | 0x3FFFFF |
//! | 20   | consumed_ah    | 0.1 Ah       | 0xFFFFF  |
//! | 10   | soc            | 0.1 %        | 0x3FF    |
//!
//! The aux word multiplexes three quantities; which one it carries is
//! selected by `aux_mode`. The parser exposes the mode and the raw word plus
//! typed accessors, the emitter decides which measurement to produce.

use std::fmt::{self, Write};

use bitflags::bitflags;

use crate::error::VictronError;
use crate::util::BitReader;

/// Minimum decrypted length for this layout (118 bits).
const MIN_LEN: usize = 15;

bitflags! {
    /// Active alarm conditions, a 16-bit mask. Bits outside the published
    /// set are retained so new firmware alarms stay visible.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AlarmReason: u16 {
        const LOW_VOLTAGE          = 0x0001;
        const HIGH_VOLTAGE         = 0x0002;
        const LOW_SOC              = 0x0004;
        const LOW_STARTER_VOLTAGE  = 0x0008;
        const HIGH_STARTER_VOLTAGE = 0x0010;
        const LOW_TEMPERATURE      = 0x0020;
        const HIGH_TEMPERATURE     = 0x0040;
        const MID_VOLTAGE          = 0x0080;
        const OVERLOAD             = 0x0100;
        const DC_RIPPLE            = 0x0200;
        const LOW_V_AC_OUT         = 0x0400;
        const HIGH_V_AC_OUT        = 0x0800;
        const SHORT_CIRCUIT        = 0x1000;
        const BMS_LOCKOUT          = 0x2000;
    }
}

impl fmt::Display for AlarmReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no_alarm");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_char(',')?;
            }
            for c in name.chars() {
                f.write_char(c.to_ascii_lowercase())?;
            }
            first = false;
        }
        let unknown = self.bits() & !Self::all().bits();
        if unknown != 0 {
            if !first {
                f.write_char(',')?;
            }
            write!(f, "unknown_0x{unknown:04x}")?;
        }
        Ok(())
    }
}

/// Selects which quantity the auxiliary input word carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxMode {
    StarterVoltage,
    MidpointVoltage,
    Temperature,
    Disabled,
}

impl AuxMode {
    /// Total over the 2-bit field.
    pub fn from_raw(code: u8) -> Self {
        match code & 0x03 {
            0 => Self::StarterVoltage,
            1 => Self::MidpointVoltage,
            2 => Self::Temperature,
            _ => Self::Disabled,
        }
    }
}

/// Decoded battery monitor record. Sentinel raw values decode to `None`,
/// never to a numeric zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryMonitorData {
    /// Remaining battery runtime in minutes.
    pub remaining_mins: Option<u16>,
    /// Main battery voltage in V.
    pub voltage: Option<f64>,
    /// Active alarms.
    pub alarm: AlarmReason,
    /// Meaning of the auxiliary input word.
    pub aux_mode: AuxMode,
    /// Battery current in A, positive while charging.
    pub current: Option<f64>,
    /// Consumed capacity in Ah, reported negative.
    pub consumed_ah: Option<f64>,
    /// State of charge in percent.
    pub soc: Option<f64>,
    aux_raw: u16,
}

impl BatteryMonitorData {
    pub fn parse(plaintext: &[u8]) -> Result<Self, VictronError> {
        if plaintext.len() < MIN_LEN {
            return Err(VictronError::Parse(format!(
                "battery monitor record too short: {} bytes, need {MIN_LEN}",
                plaintext.len()
            )));
        }

        let mut reader = BitReader::new(plaintext);
        let remaining_mins = reader.read_unsigned(16)? as u16;
        let voltage = reader.read_unsigned(16)? as u16;
        let alarm = reader.read_unsigned(16)? as u16;
        let aux_raw = reader.read_unsigned(16)? as u16;
        let aux_mode = AuxMode::from_raw(reader.read_unsigned(2)? as u8);
        let current = reader.read_unsigned(22)?;
        let consumed_ah = reader.read_unsigned(20)?;
        let soc = reader.read_unsigned(10)? as u16;

        Ok(Self {
            remaining_mins: (remaining_mins != 0xFFFF).then_some(remaining_mins),
            voltage: (voltage != 0x7FFF)
                .then(|| f64::from(BitReader::to_signed(u32::from(voltage), 16)) / 100.0),
            alarm: AlarmReason::from_bits_retain(alarm),
            aux_mode,
            current: (current != 0x3FFFFF)
                .then(|| f64::from(BitReader::to_signed(current, 22)) / 1000.0),
            consumed_ah: (consumed_ah != 0xFFFFF).then(|| -f64::from(consumed_ah) / 10.0),
            soc: (soc != 0x3FF).then(|| f64::from(soc) / 10.0),
            aux_raw,
        })
    }

    /// Raw auxiliary input word, interpretation depends on [`Self::aux_mode`].
    pub fn aux_raw(&self) -> u16 {
        self.aux_raw
    }

    /// Starter battery voltage in V, valid when aux mode is StarterVoltage.
    pub fn starter_voltage(&self) -> Option<f64> {
        (self.aux_raw != 0x7FFF)
            .then(|| f64::from(BitReader::to_signed(u32::from(self.aux_raw), 16)) / 100.0)
    }

    /// Midpoint voltage in V, valid when aux mode is MidpointVoltage.
    pub fn midpoint_voltage(&self) -> Option<f64> {
        (self.aux_raw != 0xFFFF).then(|| f64::from(self.aux_raw) / 100.0)
    }

    /// Battery temperature in K, valid when aux mode is Temperature.
    pub fn temperature_kelvin(&self) -> Option<f64> {
        (self.aux_raw != 0xFFFF).then(|| f64::from(self.aux_raw) / 100.0)
    }
}
