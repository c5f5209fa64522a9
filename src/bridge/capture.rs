//! Capture Pipeline
//!
//! Webcam snapshot to download:
//!
//! ```text
//! open stream ─▶ video sink ─▶ metadata ready ─▶ play
//!     ─▶ raster surface (native size) ─▶ PNG ─▶ client download
//! ```
//!
//! Every step reports failure through [`CaptureError`]; whether anybody
//! looks at it is the caller's business. The stream is not stopped after the
//! snapshot.

use std::io::Cursor;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use super::download::DownloadFile;
use crate::platform::{
    DownloadTrigger, FrameSize, MediaCapture, PlatformError, VideoConstraints,
};

/// Width hint sent with the stream request unless configured otherwise
pub const DEFAULT_CAPTURE_WIDTH: u32 = 400;

/// Name used when the caller gives none: `image_20211226T163043Z.png`
pub fn picture_file_name(at: DateTime<Utc>) -> String {
    format!("image_{}.png", at.format("%Y%m%dT%H%M%SZ"))
}

/// RGBA pixel buffer one video frame is drawn into
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Transparent surface of the given size
    pub fn new(size: FrameSize) -> Self {
        Self {
            image: RgbaImage::new(size.width, size.height),
        }
    }

    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Row-major RGBA bytes
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut *self.image
    }

    /// Replace the whole surface with `rgba` (row-major, 4 bytes per pixel)
    pub fn copy_from_rgba(&mut self, rgba: &[u8]) -> Result<(), PlatformError> {
        let pixels = self.pixels_mut();
        if pixels.len() != rgba.len() {
            return Err(PlatformError::Js(format!(
                "frame has {} bytes, surface expects {}",
                rgba.len(),
                pixels.len()
            )));
        }
        pixels.copy_from_slice(rgba);
        Ok(())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// PNG encoding of the surface
    pub fn encode_png(&self) -> Result<Vec<u8>, CaptureError> {
        let mut out = Cursor::new(Vec::new());
        self.image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

/// What a capture run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A picture was handed to the download trigger
    Saved {
        file_name: String,
        size: FrameSize,
        bytes: usize,
    },
    /// No media capture on this platform; nothing happened
    Unavailable,
}

/// Capture failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    /// The stream request was rejected (permission denied, no camera, ...)
    #[error("Could not open the camera stream: {0}")]
    Stream(PlatformError),

    /// The sink never became ready or refused to play
    #[error("Video playback failed: {0}")]
    Playback(PlatformError),

    /// The sink reported no picture size
    #[error("Video frame is empty ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    /// Copying the frame into the surface failed
    #[error("Drawing the video frame failed: {0}")]
    Draw(PlatformError),

    /// PNG encoding failed
    #[error("Encoding the picture failed: {0}")]
    Encode(String),

    /// The download trigger failed
    #[error("Saving the picture failed: {0}")]
    Download(PlatformError),
}

/// Webcam snapshot-to-download pipeline
#[derive(Clone)]
pub struct CapturePipeline {
    media: Rc<dyn MediaCapture>,
    downloads: Rc<dyn DownloadTrigger>,
    constraints: VideoConstraints,
}

impl CapturePipeline {
    pub fn new(media: Rc<dyn MediaCapture>, downloads: Rc<dyn DownloadTrigger>) -> Self {
        Self {
            media,
            downloads,
            constraints: VideoConstraints {
                audio: false,
                width: DEFAULT_CAPTURE_WIDTH,
            },
        }
    }

    /// Override the width hint
    pub fn with_width(mut self, width: u32) -> Self {
        self.constraints.width = width;
        self
    }

    pub fn constraints(&self) -> VideoConstraints {
        self.constraints
    }

    /// Take one picture and offer it for download as `picture_name`
    ///
    /// Returns [`CaptureOutcome::Unavailable`] without touching anything when
    /// the platform has no media capture.
    pub async fn capture_and_download(
        &self,
        picture_name: &str,
    ) -> Result<CaptureOutcome, CaptureError> {
        if !self.media.is_available() {
            debug!("media capture unavailable, skipping picture");
            return Ok(CaptureOutcome::Unavailable);
        }

        let sink = self
            .media
            .open_video(self.constraints)
            .await
            .map_err(CaptureError::Stream)?;
        sink.metadata_ready().await.map_err(CaptureError::Playback)?;
        sink.play().map_err(CaptureError::Playback)?;

        let size = sink.native_size();
        if size.is_empty() {
            return Err(CaptureError::EmptyFrame {
                width: size.width,
                height: size.height,
            });
        }

        let mut surface = RasterSurface::new(size);
        sink.draw_frame(&mut surface).map_err(CaptureError::Draw)?;
        let file = DownloadFile::png(surface.encode_png()?);
        let bytes = file.len();

        self.downloads
            .trigger(&file, picture_name)
            .map_err(CaptureError::Download)?;

        info!(
            file_name = picture_name,
            width = size.width,
            height = size.height,
            bytes,
            method = ?self.downloads.method(),
            "webcam picture saved"
        );
        Ok(CaptureOutcome::Saved {
            file_name: picture_name.to_string(),
            size,
            bytes,
        })
    }
}
