//! # Utility Modules
//!
//! Small helpers shared across the crate: hex encoding/decoding for keys and
//! captured advertisements, and the bit reader used by the record parsers.

pub mod bitreader;
pub mod hex;

pub use bitreader::BitReader;
pub use hex::{decode_hex, encode_hex};
