//! Hex helpers for advertisement keys and captured payloads.

/// Decode a hex string into bytes. Whitespace is tolerated so captured
/// payloads can be pasted straight from sniffer output.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(cleaned)
}

/// Encode bytes as a lowercase hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
