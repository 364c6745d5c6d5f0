//! # BLE Advertisement Handling
//!
//! Parsing of the cleartext manufacturer-data header and decryption of the
//! payload that follows it. Scanning and advertisement reception are the
//! caller's concern; this module starts at the raw byte block tagged with
//! Victron's company identifier.

pub mod advertisement;
pub mod crypto;

pub use advertisement::ManufacturerData;
pub use crypto::{decrypt, DeviceKey};
