//! Asynchronous resource acquisition bridge
//!
//! The two flows that turn user-driven browser interactions into awaitable
//! results:
//! - file import: modal → user picks or dismisses → decode → text
//! - webcam capture: stream → video sink ready → frame → PNG → download

pub mod acquisition;
pub mod capture;
pub mod decode;
pub mod download;
pub mod modal;

pub use acquisition::FileAcquisition;
pub use capture::{CaptureError, CaptureOutcome, CapturePipeline};
pub use decode::DecodeMode;
pub use download::DownloadFile;
pub use modal::{FileSelection, ModalController, RequestState};

use crate::platform::PlatformError;

/// Errors of the file-import flow
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// Another file request still owns the modal
    #[error("A file request is already pending")]
    RequestPending,

    /// The platform failed to decode the picked file
    #[error("Decoding the selected file failed: {0}")]
    Decode(PlatformError),

    /// The modal could not be shown
    #[error(transparent)]
    Platform(#[from] PlatformError),
}
