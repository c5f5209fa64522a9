//! File Acquisition Flow
//!
//! modal → user picks or dismisses → decode once → string.

use tracing::debug;

use super::decode::decode;
use super::modal::{FileSelection, ModalController};
use super::BridgeError;
use crate::platform::ModalResources;

/// Reads a user-picked file as a string
pub struct FileAcquisition {
    controller: ModalController,
}

impl FileAcquisition {
    pub fn new(resources: ModalResources) -> Self {
        Self {
            controller: ModalController::new(resources),
        }
    }

    pub fn controller(&self) -> &ModalController {
        &self.controller
    }

    /// Ask the user for a file and decode it with `mode`
    ///
    /// A dismissed modal yields `""` without decoding anything.
    pub async fn acquire_file(&self, mode: &str) -> Result<String, BridgeError> {
        match self.controller.request_file_selection().await? {
            FileSelection::Dismissed => Ok(String::new()),
            FileSelection::Selected(file) => {
                let content = decode(file.as_ref(), mode)
                    .await
                    .map_err(BridgeError::Decode)?;
                debug!(mode, chars = content.chars().count(), "file decoded");
                Ok(content)
            }
        }
    }
}
