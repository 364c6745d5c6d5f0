//! # Victron Decode Error Handling
//!
//! This module defines the VictronError enum covering every way a single
//! decode cycle can fail. All variants are locally recoverable: the pipeline
//! never raises past one advertisement, every failure degrades to "no
//! measurements this cycle" plus a debug-level log entry.

use thiserror::Error;

/// Represents the different error types that can occur while decoding one
/// advertisement.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VictronError {
    /// The company identifier does not belong to Victron Energy.
    #[error("Manufacturer ID 0x{0:04X} is not Victron Energy (0x02E1)")]
    UnrecognizedManufacturer(u16),

    /// The advertisement header does not match any supported device family.
    #[error("Unknown device type: record type 0x{0:02X}")]
    UnknownDeviceType(u8),

    /// No advertisement key has been configured for this device.
    #[error("No advertisement key configured")]
    MissingKey,

    /// The payload could not be decrypted with the configured key. The
    /// message must never contain key material.
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// The ciphertext length or structure is invalid for the detected device.
    #[error("Malformed ciphertext: need at least {needed} bytes, got {actual}")]
    MalformedCiphertext { needed: usize, actual: usize },

    /// The decrypted buffer is shorter than the device's record layout or
    /// otherwise structurally invalid.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The record parsed cleanly but fails the plausibility bounds for its
    /// device family.
    #[error("Implausible reading: {0}")]
    ImplausibleReading(String),
}
