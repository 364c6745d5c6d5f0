//! # Decode Pipeline
//!
//! One advertisement in, one measurement set out:
//! identify -> decrypt -> parse -> validate -> emit.
//!
//! Each call is an independent, synchronous, side-effect-free transformation;
//! nothing is shared between cycles except the immutable model table. Every
//! failure is local to the cycle: [`decode`] degrades to `None` with a
//! debug-level diagnostic, since the next advertisement arrives within
//! seconds and naturally retries.

use log::debug;

use crate::ble::advertisement::ManufacturerData;
use crate::ble::crypto::{self, DeviceKey};
use crate::constants::{MANUFACTURER_NAME, VICTRON_MANUFACTURER_ID};
use crate::devices::{self, model_name, DeviceType};
use crate::error::VictronError;
use crate::sensor::{emit, SensorUpdate};

/// One received BLE advertisement, as handed over by the scanner.
#[derive(Debug, Clone)]
pub struct Advertisement<'a> {
    /// Display name of the advertising device.
    pub name: &'a str,
    /// Company identifier the manufacturer data block was tagged with.
    pub manufacturer_id: u16,
    /// Raw manufacturer data block.
    pub data: &'a [u8],
}

/// Run the full decode chain, surfacing the error for callers (and tests)
/// that want to know why a cycle produced nothing.
pub fn try_decode(
    adv: &Advertisement<'_>,
    key: Option<&DeviceKey>,
) -> Result<SensorUpdate, VictronError> {
    if adv.manufacturer_id != VICTRON_MANUFACTURER_ID {
        return Err(VictronError::UnrecognizedManufacturer(adv.manufacturer_id));
    }

    let frame = ManufacturerData::parse(adv.data)?;
    let device_type = DeviceType::from_frame(&frame)
        .ok_or(VictronError::UnknownDeviceType(frame.readout_type))?;

    let key = key.ok_or(VictronError::MissingKey)?;
    let plaintext = crypto::decrypt(&frame, key)?;

    let record = device_type.parse(&plaintext)?;
    if !devices::validate(&record) {
        return Err(VictronError::ImplausibleReading(format!(
            "{} record failed plausibility check",
            device_type.name()
        )));
    }

    Ok(SensorUpdate {
        device_name: adv.name.to_string(),
        model_name: model_name(frame.model_id),
        manufacturer: MANUFACTURER_NAME,
        measurements: emit(&record),
    })
}

/// Platform-facing entry point. Any failure means "no measurements this
/// cycle": the error is logged at debug level and swallowed, never surfaced
/// to the sink.
pub fn decode(adv: &Advertisement<'_>, key: Option<&DeviceKey>) -> Option<SensorUpdate> {
    match try_decode(adv, key) {
        Ok(update) => Some(update),
        Err(err) => {
            debug!("skipping advertisement from {}: {err}", adv.name);
            None
        }
    }
}
