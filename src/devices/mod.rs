//! # Device Type Registry and Parser Dispatch
//!
//! Maps the advertisement header onto one of the supported device families
//! and dispatches the decrypted body to the family's parser. The registry is
//! a closed, read-only mapping; unsupported record types are reported as
//! `None` and the caller skips the advertisement silently.

pub mod battery_monitor;
pub mod dcdc_converter;
pub mod model_ids;
pub mod solar_charger;

use std::fmt;

use crate::ble::advertisement::ManufacturerData;
use crate::constants::{record_type, MAX_SOLAR_POWER_W, PRODUCT_ADVERTISEMENT};
use crate::error::VictronError;

pub use battery_monitor::{AlarmReason, AuxMode, BatteryMonitorData};
pub use dcdc_converter::{DcDcConverterData, OffReason};
pub use model_ids::model_name;
pub use solar_charger::SolarChargerData;

/// Supported device families, selected by the readout record type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    SolarCharger,
    BatteryMonitor,
    DcDcConverter,
}

impl DeviceType {
    /// Classify a raw manufacturer data block. Returns `None` for anything
    /// that is not a product advertisement of a supported family; the caller
    /// treats that as "unsupported device, skip".
    pub fn identify(raw: &[u8]) -> Option<Self> {
        let frame = ManufacturerData::parse(raw).ok()?;
        Self::from_frame(&frame)
    }

    /// Classify an already-parsed header.
    pub fn from_frame(frame: &ManufacturerData<'_>) -> Option<Self> {
        if frame.record_type != PRODUCT_ADVERTISEMENT {
            return None;
        }
        Self::from_record_type(frame.readout_type)
    }

    pub fn from_record_type(code: u8) -> Option<Self> {
        match code {
            record_type::SOLAR_CHARGER => Some(Self::SolarCharger),
            record_type::BATTERY_MONITOR => Some(Self::BatteryMonitor),
            record_type::DCDC_CONVERTER => Some(Self::DcDcConverter),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SolarCharger => "Solar Charger",
            Self::BatteryMonitor => "Battery Monitor",
            Self::DcDcConverter => "DC-DC Converter",
        }
    }

    /// Parse a decrypted record body with this family's layout.
    pub fn parse(&self, plaintext: &[u8]) -> Result<ParsedRecord, VictronError> {
        match self {
            Self::SolarCharger => SolarChargerData::parse(plaintext).map(ParsedRecord::SolarCharger),
            Self::BatteryMonitor => {
                BatteryMonitorData::parse(plaintext).map(ParsedRecord::BatteryMonitor)
            }
            Self::DcDcConverter => {
                DcDcConverterData::parse(plaintext).map(ParsedRecord::DcDcConverter)
            }
        }
    }
}

/// Tagged union over the decoded device families. Matched exhaustively by the
/// emitter so a newly added family cannot fall through silently.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecord {
    BatteryMonitor(BatteryMonitorData),
    SolarCharger(SolarChargerData),
    DcDcConverter(DcDcConverterData),
}

impl ParsedRecord {
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::BatteryMonitor(_) => DeviceType::BatteryMonitor,
            Self::SolarCharger(_) => DeviceType::SolarCharger,
            Self::DcDcConverter(_) => DeviceType::DcDcConverter,
        }
    }
}

/// Plausibility gate applied after parsing. A failing record discards the
/// whole decode cycle; the next advertisement a few seconds later supersedes.
///
/// Solar chargers occasionally report transient garbage power readings during
/// mode transitions, so anything above [`MAX_SOLAR_POWER_W`] is rejected
/// (inclusive boundary: exactly 1500 W passes). The other families currently
/// have no known failure mode of this kind.
pub fn validate(record: &ParsedRecord) -> bool {
    match record {
        ParsedRecord::SolarCharger(data) => match data.solar_power {
            Some(power) => power <= MAX_SOLAR_POWER_W,
            None => true,
        },
        ParsedRecord::BatteryMonitor(_) | ParsedRecord::DcDcConverter(_) => true,
    }
}

/// Operating state reported by chargers and converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeState {
    Off,
    LowPower,
    Fault,
    Bulk,
    Absorption,
    Float,
    Storage,
    EqualizeManual,
    Inverting,
    PowerSupply,
    StartingUp,
    RepeatedAbsorption,
    AutoEqualize,
    BatterySafe,
    ExternalControl,
    NotAvailable,
    /// Code not in the published set; newer firmware must not crash the
    /// pipeline.
    Unknown(u8),
}

impl ChargeState {
    pub fn from_raw(code: u8) -> Self {
        match code {
            0 => Self::Off,
            1 => Self::LowPower,
            2 => Self::Fault,
            3 => Self::Bulk,
            4 => Self::Absorption,
            5 => Self::Float,
            6 => Self::Storage,
            7 => Self::EqualizeManual,
            9 => Self::Inverting,
            11 => Self::PowerSupply,
            245 => Self::StartingUp,
            246 => Self::RepeatedAbsorption,
            247 => Self::AutoEqualize,
            248 => Self::BatterySafe,
            252 => Self::ExternalControl,
            255 => Self::NotAvailable,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::LowPower => f.write_str("low_power"),
            Self::Fault => f.write_str("fault"),
            Self::Bulk => f.write_str("bulk"),
            Self::Absorption => f.write_str("absorption"),
            Self::Float => f.write_str("float"),
            Self::Storage => f.write_str("storage"),
            Self::EqualizeManual => f.write_str("equalize_manual"),
            Self::Inverting => f.write_str("inverting"),
            Self::PowerSupply => f.write_str("power_supply"),
            Self::StartingUp => f.write_str("starting_up"),
            Self::RepeatedAbsorption => f.write_str("repeated_absorption"),
            Self::AutoEqualize => f.write_str("auto_equalize"),
            Self::BatterySafe => f.write_str("battery_safe"),
            Self::ExternalControl => f.write_str("external_control"),
            Self::NotAvailable => f.write_str("not_available"),
            Self::Unknown(code) => write!(f, "unknown_{code}"),
        }
    }
}

/// Charger fault codes shared by solar chargers and DC-DC converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargerError {
    NoError,
    BatteryTemperatureHigh,
    BatteryVoltageHigh,
    RemoteTemperatureA,
    RemoteTemperatureB,
    RemoteTemperatureC,
    RemoteBatteryA,
    RemoteBatteryB,
    RemoteBatteryC,
    HighRipple,
    BatteryTemperatureLow,
    ChargerTemperature,
    OverCurrent,
    BulkTime,
    CurrentSensor,
    InternalTemperatureA,
    InternalTemperatureB,
    Fan,
    Overheated,
    ShortCircuit,
    ConverterIssue,
    OverCharge,
    InputVoltage,
    InputCurrent,
    InputPower,
    InputShutdownVoltage,
    InputShutdownCurrent,
    /// Code not in the published set.
    Unknown(u8),
}

impl ChargerError {
    pub fn from_raw(code: u8) -> Self {
        match code {
            0 => Self::NoError,
            1 => Self::BatteryTemperatureHigh,
            2 => Self::BatteryVoltageHigh,
            3 => Self::RemoteTemperatureA,
            4 => Self::RemoteTemperatureB,
            5 => Self::RemoteTemperatureC,
            6 => Self::RemoteBatteryA,
            7 => Self::RemoteBatteryB,
            8 => Self::RemoteBatteryC,
            11 => Self::HighRipple,
            14 => Self::BatteryTemperatureLow,
            17 => Self::ChargerTemperature,
            18 => Self::OverCurrent,
            20 => Self::BulkTime,
            21 => Self::CurrentSensor,
            22 => Self::InternalTemperatureA,
            23 => Self::InternalTemperatureB,
            24 => Self::Fan,
            26 => Self::Overheated,
            27 => Self::ShortCircuit,
            28 => Self::ConverterIssue,
            29 => Self::OverCharge,
            33 => Self::InputVoltage,
            34 => Self::InputCurrent,
            35 => Self::InputPower,
            38 => Self::InputShutdownVoltage,
            39 => Self::InputShutdownCurrent,
            other => Self::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_supported_families() {
        // 8-byte header: type, status, model LE, readout, nonce LE, key check
        let solar = [0x10, 0x02, 0x5F, 0xA0, 0x01, 0x00, 0x00, 0xAA];
        let shunt = [0x10, 0x02, 0x89, 0xA3, 0x02, 0x00, 0x00, 0xAA];
        let orion = [0x10, 0x02, 0xC0, 0xA3, 0x04, 0x00, 0x00, 0xAA];
        assert_eq!(DeviceType::identify(&solar), Some(DeviceType::SolarCharger));
        assert_eq!(DeviceType::identify(&shunt), Some(DeviceType::BatteryMonitor));
        assert_eq!(DeviceType::identify(&orion), Some(DeviceType::DcDcConverter));
    }

    #[test]
    fn test_identify_rejects_unknown_record_type() {
        // 0x0C is a VE.Bus readout, not supported here.
        let vebus = [0x10, 0x02, 0x89, 0xA3, 0x0C, 0x00, 0x00, 0xAA];
        assert_eq!(DeviceType::identify(&vebus), None);
    }

    #[test]
    fn test_identify_rejects_non_product_advertisement() {
        let other = [0x11, 0x02, 0x89, 0xA3, 0x02, 0x00, 0x00, 0xAA];
        assert_eq!(DeviceType::identify(&other), None);
    }

    #[test]
    fn test_identify_rejects_short_header() {
        assert_eq!(DeviceType::identify(&[0x10, 0x02]), None);
    }

    #[test]
    fn test_charge_state_codes() {
        assert_eq!(ChargeState::from_raw(3), ChargeState::Bulk);
        assert_eq!(ChargeState::from_raw(255), ChargeState::NotAvailable);
        assert_eq!(ChargeState::from_raw(23), ChargeState::Unknown(23));
        assert_eq!(ChargeState::from_raw(23).to_string(), "unknown_23");
        assert_eq!(ChargeState::Bulk.to_string(), "bulk");
    }

    #[test]
    fn test_charger_error_codes() {
        assert_eq!(ChargerError::from_raw(0), ChargerError::NoError);
        assert_eq!(ChargerError::from_raw(26), ChargerError::Overheated);
        assert_eq!(ChargerError::from_raw(200), ChargerError::Unknown(200));
    }
}
