//! # victron-ble - Victron Energy Instant Readout BLE Decoder
//!
//! The victron-ble crate decodes the manufacturer-specific data block that
//! Victron Energy devices (battery monitors, solar charge controllers, DC-DC
//! converters) broadcast in their BLE advertisements. Each payload is
//! encrypted with a per-device AES-128 key; this crate recovers the plaintext,
//! parses the device-specific bit layout and republishes the result as a flat
//! set of named, typed measurements for a host monitoring platform.
//!
//! ## Features
//!
//! - Identify the device family from the advertisement header
//! - Decrypt the payload with the per-device advertisement key (AES-128-CTR)
//! - Parse battery monitor, solar charger and DC-DC converter records,
//!   including sentinel ("not available") values and unknown enum codes
//! - Reject physically implausible records instead of propagating garbage
//! - Emit named measurements with quantity class and unit per reading
//!
//! BLE scanning itself is out of scope: callers hand in the raw manufacturer
//! data block plus the advertising device's display name.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use victron_ble::{decode, Advertisement, DeviceKey};
//!
//! let key = DeviceKey::from_hex("0102030405060708090a0b0c0d0e0f10").unwrap();
//! let adv = Advertisement {
//!     name: "SmartShunt HQ2132",
//!     manufacturer_id: 0x02E1,
//!     data: &[/* manufacturer data bytes */],
//! };
//! if let Some(update) = decode(&adv, Some(&key)) {
//!     for m in &update.measurements {
//!         println!("{} = {:?}", m.key, m.value);
//!     }
//! }
//! ```

pub mod ble;
pub mod constants;
pub mod devices;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod sensor;
pub mod util;

pub use crate::error::VictronError;
pub use crate::logging::{init_logger, log_debug, log_info};

// Core pipeline types
pub use ble::crypto::DeviceKey;
pub use devices::{
    model_name, validate, AlarmReason, AuxMode, BatteryMonitorData, ChargeState, ChargerError,
    DcDcConverterData, DeviceType, OffReason, ParsedRecord, SolarChargerData,
};
pub use pipeline::{decode, try_decode, Advertisement};
pub use sensor::{emit, DeviceClass, Measurement, SensorUpdate, Unit, Value};
pub use util::{decode_hex, encode_hex};
