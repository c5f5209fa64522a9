use std::rc::Rc;

use async_trait::async_trait;
use tracing::warn;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlElement, HtmlInputElement, Window};

use super::super::{EventSource, FileInput, ModalSurface, PickedFile, PlatformError};
use super::{js_error, next_turn};

/// The page's modal element, toggled through its `display` style
pub struct DomModal {
    window: Window,
    element: HtmlElement,
    close: Rc<dyn EventSource>,
}

impl DomModal {
    pub fn new(window: Window, element: HtmlElement, close: Rc<dyn EventSource>) -> Self {
        Self {
            window,
            element,
            close,
        }
    }

    fn set_display(&self, value: &str) -> Result<(), PlatformError> {
        self.element
            .style()
            .set_property("display", value)
            .map_err(js_error)
    }
}

#[async_trait(?Send)]
impl ModalSurface for DomModal {
    async fn show(&self) -> Result<(), PlatformError> {
        self.set_display("block")?;
        // The click that opened the modal is still bubbling up to the window.
        next_turn(&self.window).await
    }

    fn hide(&self) {
        if let Err(e) = self.set_display("none") {
            warn!(error = %e, "hiding the modal failed");
        }
    }

    fn close_control(&self) -> Rc<dyn EventSource> {
        self.close.clone()
    }
}

/// The hidden `<input type="file">`
pub struct DomFileInput {
    input: HtmlInputElement,
}

impl DomFileInput {
    pub fn new(input: HtmlInputElement) -> Self {
        Self { input }
    }
}

impl FileInput for DomFileInput {
    fn reset(&self) {
        self.input.set_value("");
    }

    fn selected(&self) -> Option<Box<dyn PickedFile>> {
        if self.input.value().is_empty() {
            return None;
        }
        let file = self.input.files()?.get(0)?;
        Some(Box::new(DomFile(file)))
    }
}

/// A `File` from the input's file list
pub struct DomFile(pub File);

#[async_trait(?Send)]
impl PickedFile for DomFile {
    fn name(&self) -> String {
        self.0.name()
    }

    async fn read_text(&self) -> Result<String, PlatformError> {
        let text = JsFuture::from(self.0.text())
            .await
            .map_err(|e| PlatformError::Read(format!("{e:?}")))?;
        text.as_string()
            .ok_or_else(|| PlatformError::Read("text() did not return a string".into()))
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, PlatformError> {
        let buffer = JsFuture::from(self.0.array_buffer())
            .await
            .map_err(|e| PlatformError::Read(format!("{e:?}")))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}
