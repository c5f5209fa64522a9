//! Client-side download payloads
//!
//! Both download implementations receive the same [`DownloadFile`]; the
//! link-based one turns it into a data URL, the legacy one into a blob.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub const PNG_MIME: &str = "image/png";
pub const TEXT_MIME: &str = "text/plain;charset=utf-8";

/// Bytes to offer to the user, with their media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DownloadFile {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// UTF-8 text file
    pub fn text(content: &str) -> Self {
        Self::new(TEXT_MIME, content.as_bytes().to_vec())
    }

    /// Encoded PNG image
    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(PNG_MIME, bytes)
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_data_url() {
        let file = DownloadFile::text("hé");
        assert_eq!(file.to_data_url(), "data:text/plain;charset=utf-8;base64,aMOp");
    }

    #[test]
    fn test_png_mime() {
        let file = DownloadFile::png(vec![0x89, b'P', b'N', b'G']);
        assert!(file.to_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(file.len(), 4);
    }

    #[test]
    fn test_empty_text() {
        let file = DownloadFile::text("");
        assert!(file.is_empty());
        assert_eq!(file.to_data_url(), "data:text/plain;charset=utf-8;base64,");
    }
}
