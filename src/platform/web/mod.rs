//! Browser platform over `web-sys`
//!
//! Only compiled for `wasm32`. [`web_platform`] looks up the singleton page
//! elements named in the configuration and wires every platform trait to
//! the live window.

pub mod console;
mod download;
mod events;
mod media;
mod modal;
mod page;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, HtmlInputElement, Window};

use super::{ModalResources, Platform, PlatformError};
use crate::config::ExtensionConfig;

pub use download::{select_download_trigger, BlobSaveDownload, LinkDownload};
pub use events::DomEvents;
pub use media::{WebMediaCapture, WebVideoSink};
pub use modal::{DomFile, DomFileInput, DomModal};
pub use page::{DomRenderTarget, LocalStorage, WebDialogs, WebLocation, WindowHost};

/// Readable message for a thrown JS value
pub(crate) fn js_error(value: JsValue) -> PlatformError {
    PlatformError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

pub(crate) fn cast<T: JsCast>(value: impl Into<JsValue>) -> Result<T, PlatformError> {
    let value: JsValue = value.into();
    value
        .dyn_into::<T>()
        .map_err(|other| PlatformError::Js(format!("unexpected JS value {other:?}")))
}

pub(crate) fn create_element<T: JsCast>(document: &Document, tag: &str) -> Result<T, PlatformError> {
    cast(document.create_element(tag).map_err(js_error)?)
}

pub(crate) fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or_else(|| PlatformError::Unavailable("window".into()))
}

pub(crate) fn document(window: &Window) -> Result<Document, PlatformError> {
    window
        .document()
        .ok_or_else(|| PlatformError::Unavailable("document".into()))
}

pub(crate) fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, PlatformError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| PlatformError::MissingElement(id.to_string()))
}

/// Resolves on a later event-loop turn
pub(crate) async fn next_turn(window: &Window) -> Result<(), PlatformError> {
    let mut scheduled = Ok(0);
    let tick = js_sys::Promise::new(&mut |resolve, _reject| {
        scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0);
    });
    scheduled.map_err(js_error)?;
    JsFuture::from(tick).await.map_err(js_error)?;
    Ok(())
}

/// Every platform handle, bound to the current window
pub fn web_platform(config: &ExtensionConfig) -> Result<Platform, PlatformError> {
    let window = window()?;
    let document = document(&window)?;
    let dom = &config.dom;

    let modal_element: HtmlElement = element_by_id(&document, &dom.modal_id)?;
    let close_button: HtmlElement = element_by_id(&document, &dom.close_button_id)?;
    let file_input: HtmlInputElement = element_by_id(&document, &dom.file_input_id)?;

    let modal = ModalResources {
        modal: Rc::new(DomModal::new(
            window.clone(),
            modal_element,
            Rc::new(DomEvents::click(close_button.into())),
        )),
        file_input: Rc::new(DomFileInput::new(file_input)),
        outside_clicks: Rc::new(DomEvents::click(window.clone().into())),
    };

    Ok(Platform {
        modal,
        media: Rc::new(WebMediaCapture::new(window.clone())),
        downloads: select_download_trigger(&window),
        storage: Rc::new(LocalStorage::new(window.clone())),
        host: Rc::new(WindowHost::new(window.clone(), &config.host_global)),
        location: Rc::new(WebLocation::new(window.clone())),
        dialogs: Rc::new(WebDialogs::new(window.clone())),
        html: Rc::new(DomRenderTarget::new(document, &dom.render_root_id)),
    })
}
