//! Decode Adapter
//!
//! Turns a picked file into the string a block reports. An unknown mode is
//! not an error: the caller gets a diagnostic string instead.

use std::str::FromStr;

use crate::platform::{PickedFile, PlatformError};

/// How file content is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// UTF-8 text
    Text,
    /// One char per byte (U+0000..=U+00FF)
    Binary,
}

impl DecodeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeMode::Text => "text",
            DecodeMode::Binary => "binary",
        }
    }
}

/// A mode string that names no [`DecodeMode`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected error: unknown read type ({0})")]
pub struct UnknownDecodeMode(pub String);

impl FromStr for DecodeMode {
    type Err = UnknownDecodeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(DecodeMode::Text),
            "binary" => Ok(DecodeMode::Binary),
            other => Err(UnknownDecodeMode(other.to_string())),
        }
    }
}

/// Legacy "binary string": each byte becomes the char with the same code
pub fn binary_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Decode `file` according to `mode`
///
/// Unknown modes resolve to `"unexpected error: unknown read type (<mode>)"`.
/// Read failures from the platform are passed on.
pub async fn decode(file: &dyn PickedFile, mode: &str) -> Result<String, PlatformError> {
    match mode.parse::<DecodeMode>() {
        Ok(DecodeMode::Text) => file.read_text().await,
        Ok(DecodeMode::Binary) => Ok(binary_string(&file.read_bytes().await?)),
        Err(unknown) => Ok(unknown.to_string()),
    }
}
