use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, HtmlAnchorElement, Window};

use super::super::{DownloadMethod, DownloadTrigger, PlatformError};
use super::{create_element, document, js_error};
use crate::bridge::download::DownloadFile;

/// Clicks a hidden `<a download>` pointing at a data URL
pub struct LinkDownload {
    window: Window,
}

impl LinkDownload {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl DownloadTrigger for LinkDownload {
    fn method(&self) -> DownloadMethod {
        DownloadMethod::Link
    }

    fn trigger(&self, file: &DownloadFile, file_name: &str) -> Result<(), PlatformError> {
        let document = document(&self.window)?;
        let body = document
            .body()
            .ok_or_else(|| PlatformError::MissingElement("body".into()))?;

        let link: HtmlAnchorElement = create_element(&document, "a")?;
        link.set_href(&file.to_data_url());
        link.set_download(file_name);
        link.style().set_property("display", "none").map_err(js_error)?;

        body.append_child(&link).map_err(js_error)?;
        link.click();
        body.remove_child(&link).map_err(js_error)?;
        Ok(())
    }
}

/// Legacy `navigator.msSaveOrOpenBlob`
pub struct BlobSaveDownload {
    navigator: JsValue,
    save: js_sys::Function,
}

impl BlobSaveDownload {
    /// `None` when the browser has no `msSaveOrOpenBlob`
    pub fn detect(window: &Window) -> Option<Self> {
        let navigator: JsValue = window.navigator().into();
        let save = js_sys::Reflect::get(&navigator, &"msSaveOrOpenBlob".into())
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        Some(Self { navigator, save })
    }
}

impl DownloadTrigger for BlobSaveDownload {
    fn method(&self) -> DownloadMethod {
        DownloadMethod::BlobSave
    }

    fn trigger(&self, file: &DownloadFile, file_name: &str) -> Result<(), PlatformError> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"type".into(), &file.mime.as_str().into())
            .map_err(js_error)?;
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, options.unchecked_ref())
            .map_err(js_error)?;

        self.save
            .call2(&self.navigator, &blob, &file_name.into())
            .map_err(js_error)?;
        Ok(())
    }
}

/// Blob save where the browser still has it, data-URL links everywhere else
pub fn select_download_trigger(window: &Window) -> Rc<dyn DownloadTrigger> {
    match BlobSaveDownload::detect(window) {
        Some(blob_save) => {
            debug!("using msSaveOrOpenBlob downloads");
            Rc::new(blob_save)
        }
        None => Rc::new(LinkDownload::new(window.clone())),
    }
}
