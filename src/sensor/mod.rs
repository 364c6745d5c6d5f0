//! # Sensor Output Model
//!
//! The externally visible shape of a decode cycle: a set of named, typed
//! measurements plus device identification, handed to the host platform's
//! sink. One update per successfully decoded advertisement; later updates
//! for the same device supersede earlier ones key by key.

pub mod emitter;

use serde::Serialize;

pub use emitter::emit;

/// Physical quantity class of a measurement, mirroring the host platform's
/// sensor device classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Voltage,
    Current,
    Power,
    Energy,
    Battery,
    Duration,
    Temperature,
    Enum,
}

/// Unit of measurement, serialized as the symbol the host platform expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "V")]
    Volt,
    #[serde(rename = "A")]
    Ampere,
    #[serde(rename = "W")]
    Watt,
    #[serde(rename = "Wh")]
    WattHour,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "min")]
    Minute,
    #[serde(rename = "K")]
    Kelvin,
}

/// Measurement value: numeric for physical quantities, a state string for
/// enumerated readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Numeric(f64),
    Enumeration(String),
}

/// One named reading. The key is stable across cycles so the sink can
/// overwrite the previous value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub key: &'static str,
    pub device_class: DeviceClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    pub value: Value,
}

impl Measurement {
    pub fn numeric(key: &'static str, device_class: DeviceClass, unit: Unit, value: f64) -> Self {
        Self {
            key,
            device_class,
            unit: Some(unit),
            value: Value::Numeric(value),
        }
    }

    pub fn enumeration(key: &'static str, state: String) -> Self {
        Self {
            key,
            device_class: DeviceClass::Enum,
            unit: None,
            value: Value::Enumeration(state),
        }
    }
}

/// Everything the host platform receives for one decoded advertisement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorUpdate {
    /// Display name from the BLE advertisement.
    pub device_name: String,
    /// Product name resolved from the model ID.
    pub model_name: String,
    /// Always "Victron Energy".
    pub manufacturer: &'static str,
    pub measurements: Vec<Measurement>,
}
