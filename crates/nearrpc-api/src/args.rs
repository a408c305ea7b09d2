//! Contract call argument encoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

/// What a call with no arguments sends: the JSON string `""`, base64 encoded.
pub const NO_ARGS: &str = "IiI=";

/// Encode call arguments as base64 of their JSON text.
pub fn encode_args<A: Serialize + ?Sized>(args: &A) -> Result<String, serde_json::Error> {
    Ok(STANDARD.encode(serde_json::to_vec(args)?))
}

/// Decode the bytes a view call returned. Invalid UTF-8 is replaced, not
/// rejected.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
