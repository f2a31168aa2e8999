// src/upload/inline.rs — Inline file payloads (data URLs)
//
// Non-image attachments skip the upload endpoint and travel as
// `data:<mime>;base64,<bytes>`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::infra::errors::{ChatError, Result};

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

pub fn encode_inline(mime_type: &str, bytes: &[u8]) -> String {
    format!("{DATA_PREFIX}{mime_type}{BASE64_MARKER}{}", STANDARD.encode(bytes))
}

/// Split a data URL back into its MIME type and raw bytes.
pub fn decode_inline(payload: &str) -> Result<(String, Vec<u8>)> {
    let rest = payload
        .strip_prefix(DATA_PREFIX)
        .ok_or_else(|| ChatError::InvalidPayload("missing data: prefix".into()))?;
    let (mime, data) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| ChatError::InvalidPayload("not base64-encoded".into()))?;
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| ChatError::InvalidPayload(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

pub fn is_inline(file_data: &str) -> bool {
    file_data.starts_with(DATA_PREFIX)
}
