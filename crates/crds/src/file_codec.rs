//! File content codecs
//!
//! Inline file data in an OperatingSystemConfig is either plain text or
//! base64 encoded, selected by the `encoding` field.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from decoding inline file content
#[derive(Debug, Error)]
pub enum CodecError {
    /// The `encoding` field names no known codec
    #[error("unsupported file content encoding: {0:?}")]
    UnsupportedEncoding(String),

    /// The data is not valid for the codec
    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileCodec {
    #[default]
    Plain,
    B64,
}

impl FileCodec {
    /// Codec identifier as written in the resource
    pub fn id(self) -> &'static str {
        match self {
            FileCodec::Plain => "plain",
            FileCodec::B64 => "b64",
        }
    }

    /// Decodes `data`. Line breaks in base64 input are skipped, so wrapped
    /// data and YAML block scalars decode.
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        match self {
            FileCodec::Plain => Ok(data.to_vec()),
            FileCodec::B64 => {
                let stripped: Vec<u8> = data
                    .iter()
                    .copied()
                    .filter(|b| !matches!(b, b'\r' | b'\n'))
                    .collect();
                Ok(STANDARD.decode(stripped)?)
            }
        }
    }

    pub fn encode(self, data: &[u8]) -> Vec<u8> {
        match self {
            FileCodec::Plain => data.to_vec(),
            FileCodec::B64 => STANDARD.encode(data).into_bytes(),
        }
    }
}

impl FromStr for FileCodec {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "plain" => Ok(FileCodec::Plain),
            "b64" => Ok(FileCodec::B64),
            other => Err(CodecError::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for FileCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codec_ids() {
        assert_eq!("".parse::<FileCodec>().unwrap(), FileCodec::Plain);
        assert_eq!("plain".parse::<FileCodec>().unwrap(), FileCodec::Plain);
        assert_eq!("b64".parse::<FileCodec>().unwrap(), FileCodec::B64);
    }

    #[test]
    fn test_unknown_codec() {
        let err = "gzip".parse::<FileCodec>().unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedEncoding(ref e) if e == "gzip"));
        assert_eq!(err.to_string(), "unsupported file content encoding: \"gzip\"");
    }

    #[test]
    fn test_decode_b64() {
        assert_eq!(FileCodec::B64.decode(b"YmFy").unwrap(), b"bar");
        assert_eq!(FileCodec::B64.encode(b"bar"), b"YmFy");
    }

    #[test]
    fn test_decode_b64_trailing_newline() {
        assert_eq!(FileCodec::B64.decode(b"dGVzdGhvc3Q=\n").unwrap(), b"testhost");
        assert_eq!(FileCodec::B64.decode(b"dGVzdGhvc3Q=\r\n").unwrap(), b"testhost");
    }

    #[test]
    fn test_decode_b64_wrapped_lines() {
        assert_eq!(FileCodec::B64.decode(b"dGVz\ndGhvc3Q=\n").unwrap(), b"testhost");
    }

    #[test]
    fn test_decode_invalid_b64() {
        let result = FileCodec::B64.decode(b"not base64!");
        assert!(matches!(result, Err(CodecError::Base64(_))));
    }

    #[test]
    fn test_plain_is_identity() {
        assert_eq!(FileCodec::Plain.decode(b"testhost").unwrap(), b"testhost");
    }
}
