//! Base64 decoding for inline provider payloads

use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use crate::error::{AppError, Result};

/// Standard alphabet with padding, accepting non-zero trailing bits
/// in the final symbol (e.g. `QR==`).
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Strip a `data:<mime>;base64,` prefix if present
pub fn strip_data_url(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        encoded.split_once(',').map(|(_, data)| data).unwrap_or(encoded)
    } else {
        encoded
    }
}

/// Decode base64 string to binary data
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let data = strip_data_url(encoded.trim());

    // Providers sometimes wrap long payloads
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    LENIENT
        .decode(compact)
        .map_err(|e| AppError::InvalidBase64(e.to_string()))
}
