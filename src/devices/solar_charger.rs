//! Solar charger (MPPT) record parser.
//!
//! Decrypted layout, LSB-first:
//!
//! | bits | field                    | scale         | sentinel |
//! |------|--------------------------|---------------|----------|
//! | 8    | charge_state             | enum          | -        |
//! | 8    | charger_error            | enum          | -        |
//! | 16   | battery_voltage          | 0.01 V signed | 0x7FFF   |
//! | 16   | battery_charging_current | 0.1 A signed  | 0x7FFF   |
//! | 16   | yield_today              | 0.01 kWh      | 0xFFFF   |
//! | 16   | solar_power              | 1 W           | 0xFFFF   |
//! | 9    | external_device_load     | 0.1 A         | 0x1FF    |

use crate::devices::{ChargeState, ChargerError};
use crate::error::VictronError;
use crate::util::BitReader;

/// Minimum decrypted length for this layout (89 bits).
const MIN_LEN: usize = 12;

/// Decoded solar charger record.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarChargerData {
    pub charge_state: ChargeState,
    pub charger_error: ChargerError,
    /// Battery voltage in V.
    pub battery_voltage: Option<f64>,
    /// Battery charging current in A.
    pub battery_charging_current: Option<f64>,
    /// Energy harvested today in Wh.
    pub yield_today: Option<f64>,
    /// Instantaneous PV power in W.
    pub solar_power: Option<f64>,
    /// Current drawn on the load output in A.
    pub external_device_load: Option<f64>,
}

impl SolarChargerData {
    pub fn parse(plaintext: &[u8]) -> Result<Self, VictronError> {
        if plaintext.len() < MIN_LEN {
            return Err(VictronError::Parse(format!(
                "solar charger record too short: {} bytes, need {MIN_LEN}",
                plaintext.len()
            )));
        }

        let mut reader = BitReader::new(plaintext);
        let charge_state = reader.read_unsigned(8)? as u8;
        let charger_error = reader.read_unsigned(8)? as u8;
        let battery_voltage = reader.read_unsigned(16)? as u16;
        let battery_charging_current = reader.read_unsigned(16)? as u16;
        let yield_today = reader.read_unsigned(16)? as u16;
        let solar_power = reader.read_unsigned(16)? as u16;
        let external_device_load = reader.read_unsigned(9)?;

        Ok(Self {
            charge_state: ChargeState::from_raw(charge_state),
            charger_error: ChargerError::from_raw(charger_error),
            battery_voltage: (battery_voltage != 0x7FFF)
                .then(|| f64::from(BitReader::to_signed(u32::from(battery_voltage), 16)) / 100.0),
            battery_charging_current: (battery_charging_current != 0x7FFF).then(|| {
                f64::from(BitReader::to_signed(u32::from(battery_charging_current), 16)) / 10.0
            }),
            // Transmitted in 0.01 kWh steps, reported in Wh.
            yield_today: (yield_today != 0xFFFF).then(|| f64::from(yield_today) * 10.0),
            solar_power: (solar_power != 0xFFFF).then(|| f64::from(solar_power)),
            external_device_load: (external_device_load != 0x1FF)
                .then(|| f64::from(external_device_load) / 10.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bulk at 13.42 V, 5.0 A charging, 300 Wh yield, 75 W PV, load sentinel.
    const RECORD: [u8; 16] = [
        0x03, 0x00, 0x3E, 0x05, 0x32, 0x00, 0x1E, 0x00, 0x4B, 0x00, 0xFF, 0x01, 0x00, 0x00, 0x00,
        0x00,
    ];

    #[test]
    fn test_golden_record() {
        let data = SolarChargerData::parse(&RECORD).unwrap();
        assert_eq!(data.charge_state, ChargeState::Bulk);
        assert_eq!(data.charger_error, ChargerError::NoError);
        assert_eq!(data.battery_voltage, Some(13.42));
        assert_eq!(data.battery_charging_current, Some(5.0));
        assert_eq!(data.yield_today, Some(300.0));
        assert_eq!(data.solar_power, Some(75.0));
        assert_eq!(data.external_device_load, None);
    }

    #[test]
    fn test_load_current_present() {
        let mut record = RECORD;
        record[10] = 0x19; // 25 raw = 2.5 A
        record[11] = 0x00;
        let data = SolarChargerData::parse(&record).unwrap();
        assert_eq!(data.external_device_load, Some(2.5));
    }

    #[test]
    fn test_voltage_and_power_sentinels() {
        let mut record = RECORD;
        record[2] = 0xFF; // battery voltage 0x7FFF
        record[3] = 0x7F;
        record[8] = 0xFF; // solar power 0xFFFF
        record[9] = 0xFF;
        let data = SolarChargerData::parse(&record).unwrap();
        assert_eq!(data.battery_voltage, None);
        assert_eq!(data.solar_power, None);
    }

    #[test]
    fn test_unknown_charge_state() {
        let mut record = RECORD;
        record[0] = 0x17;
        let data = SolarChargerData::parse(&record).unwrap();
        assert_eq!(data.charge_state, ChargeState::Unknown(0x17));
    }

    #[test]
    fn test_unknown_charger_error() {
        let mut record = RECORD;
        record[1] = 0xC8;
        let data = SolarChargerData::parse(&record).unwrap();
        assert_eq!(data.charger_error, ChargerError::Unknown(0xC8));
    }

    #[test]
    fn test_truncated_record() {
        match SolarChargerData::parse(&RECORD[..8]) {
            Err(VictronError::Parse(_)) => {}
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
