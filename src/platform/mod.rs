//! Platform seams
//!
//! The bridge and the block facade never touch the browser directly; they
//! are written against the traits in this module. On `wasm32` the [`web`]
//! module implements them over `web-sys`; [`memory`] holds plain in-process
//! implementations for native hosts and tests.
//!
//! Everything here is single-threaded: handles are shared with `Rc` and the
//! async traits are `?Send`.

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use async_trait::async_trait;
use std::rc::Rc;

use crate::bridge::capture::RasterSurface;
use crate::bridge::download::DownloadFile;

/// Callback invoked when an event source fires
pub type EventHandler = Rc<dyn Fn()>;

/// Platform errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlatformError {
    /// The capability does not exist on this platform
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    /// A page element the extension relies on is missing
    #[error("Missing page element: {0}")]
    MissingElement(String),

    /// Reading a picked file failed
    #[error("File read failed: {0}")]
    Read(String),

    /// Any other exception thrown by the platform
    #[error("Platform call failed: {0}")]
    Js(String),
}

/// Handle to an attached listener
///
/// Dropping or cancelling the handle detaches the listener. Detaching
/// happens at most once, so cancelling an already detached subscription is
/// a no-op.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the platform-specific detach action
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detach the listener now
    pub fn cancel(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Whether the listener is still attached
    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Something that fires click-like events
pub trait EventSource {
    /// Attach `handler`; it stays attached until the subscription is dropped
    fn subscribe(&self, handler: EventHandler) -> Subscription;
}

/// The reusable modal dialog hosting the file picker
#[async_trait(?Send)]
pub trait ModalSurface {
    /// Make the modal visible
    ///
    /// Resolves once the modal is on screen and the interaction that opened
    /// it has finished dispatching, so listeners attached afterwards never
    /// observe that interaction.
    async fn show(&self) -> Result<(), PlatformError>;

    /// Hide the modal
    fn hide(&self);

    /// The explicit close control inside the modal
    fn close_control(&self) -> Rc<dyn EventSource>;
}

/// The hidden file input inside the modal
pub trait FileInput {
    /// Clear any previous selection
    fn reset(&self);

    /// The first selected file, if the user picked one
    fn selected(&self) -> Option<Box<dyn PickedFile>>;
}

/// A file the user picked
#[async_trait(?Send)]
pub trait PickedFile {
    fn name(&self) -> String;

    /// Decode the content as UTF-8 text
    async fn read_text(&self) -> Result<String, PlatformError>;

    /// Raw content
    async fn read_bytes(&self) -> Result<Vec<u8>, PlatformError>;
}

/// Singleton page resources owned by the modal controller
#[derive(Clone)]
pub struct ModalResources {
    pub modal: Rc<dyn ModalSurface>,
    pub file_input: Rc<dyn FileInput>,
    /// Document-level clicks, the fallback dismissal signal
    pub outside_clicks: Rc<dyn EventSource>,
}

/// Stream request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    pub audio: bool,
    /// Ideal frame width in pixels
    pub width: u32,
}

/// Native size of a video sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Camera access
#[async_trait(?Send)]
pub trait MediaCapture {
    /// Whether the platform exposes media capture at all
    fn is_available(&self) -> bool;

    /// Acquire a stream and bind it to a fresh offscreen video sink
    async fn open_video(
        &self,
        constraints: VideoConstraints,
    ) -> Result<Box<dyn VideoSink>, PlatformError>;
}

/// An offscreen video element bound to a camera stream
#[async_trait(?Send)]
pub trait VideoSink {
    /// Resolves once the stream metadata (and so the native size) is known
    async fn metadata_ready(&self) -> Result<(), PlatformError>;

    /// Start playback
    fn play(&self) -> Result<(), PlatformError>;

    fn native_size(&self) -> FrameSize;

    /// Copy the current frame into `surface`
    fn draw_frame(&self, surface: &mut RasterSurface) -> Result<(), PlatformError>;
}

/// How a client-side download is performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMethod {
    /// Click a temporary link pointing at a data URL
    Link,
    /// Legacy `navigator.msSaveOrOpenBlob`
    BlobSave,
}

/// Client-side "save as" capability
pub trait DownloadTrigger {
    fn method(&self) -> DownloadMethod;

    /// Offer `file` to the user under `file_name`
    fn trigger(&self, file: &DownloadFile, file_name: &str) -> Result<(), PlatformError>;
}

/// Persistent string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError>;
    fn remove(&self, key: &str) -> Result<(), PlatformError>;

    fn has(&self, key: &str) -> Result<bool, PlatformError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Facts the embedding page knows about the running project
pub trait HostContext {
    fn project_id(&self) -> Option<String>;
}

/// A `projectId` as read off the host page
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Missing,
}

impl HostValue {
    /// Text form of the id, or `None` when the page value is falsy
    pub fn into_project_id(self) -> Option<String> {
        match self {
            HostValue::Text(text) if !text.is_empty() => Some(text),
            HostValue::Number(n) if n != 0.0 && !n.is_nan() => Some(number_text(n)),
            HostValue::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

fn number_text(n: f64) -> String {
    if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{}Infinity", sign)
    } else {
        n.to_string()
    }
}

/// The current page address and navigation
pub trait PageLocation {
    fn href(&self) -> Result<String, PlatformError>;

    /// Open `url` in a new browsing context
    fn open_in_new_context(&self, url: &str) -> Result<(), PlatformError>;
}

/// Blocking dialogs
pub trait Dialogs {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;

    /// `None` when the user cancels
    fn prompt(&self, question: &str, default: &str) -> Option<String>;
}

/// The element user HTML is rendered into
pub trait HtmlRenderTarget {
    /// Sanitize `markup` and replace the target's content with it
    fn render_sanitized(&self, markup: &str) -> Result<(), PlatformError>;
}

/// Every platform handle the block facade needs
#[derive(Clone)]
pub struct Platform {
    pub modal: ModalResources,
    pub media: Rc<dyn MediaCapture>,
    pub downloads: Rc<dyn DownloadTrigger>,
    pub storage: Rc<dyn KeyValueStore>,
    pub host: Rc<dyn HostContext>,
    pub location: Rc<dyn PageLocation>,
    pub dialogs: Rc<dyn Dialogs>,
    pub html: Rc<dyn HtmlRenderTarget>,
}
