//! `data:` URLs for inline file contents.
//!
//! Contents are percent-encoded without a media type, so an empty file is
//! `data:,`.

use crate::error::IgnitionError;

const PREFIX: &str = "data:,";

/// Encodes raw bytes as a `data:` URL.
pub fn encode(contents: &[u8]) -> String {
    format!("{}{}", PREFIX, urlencoding::encode_binary(contents))
}

/// Decodes a `data:` URL produced by [`encode`].
pub fn decode(url: &str) -> Result<Vec<u8>, IgnitionError> {
    let payload = url
        .strip_prefix(PREFIX)
        .ok_or_else(|| IgnitionError::DataUrl(format!("missing {:?} prefix", PREFIX)))?;
    Ok(urlencoding::decode_binary(payload.as_bytes()).into_owned())
}
