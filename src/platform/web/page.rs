use wasm_bindgen::prelude::*;
use web_sys::{Document, Storage, Window};

use super::super::{
    Dialogs, HostContext, HostValue, HtmlRenderTarget, KeyValueStore, PageLocation, PlatformError,
};
use super::{element_by_id, js_error};

#[wasm_bindgen]
extern "C" {
    /// `DOMPurify.sanitize`, loaded by the host page
    #[wasm_bindgen(catch, js_namespace = DOMPurify, js_name = sanitize)]
    fn purify(markup: &str) -> Result<String, JsValue>;
}

/// `window.localStorage`
pub struct LocalStorage {
    window: Window,
}

impl LocalStorage {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Result<Storage, PlatformError> {
        self.window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| PlatformError::Unavailable("localStorage".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), PlatformError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

/// Reads `window[<global>].projectId`
pub struct WindowHost {
    window: Window,
    global: String,
}

impl WindowHost {
    pub fn new(window: Window, global: &str) -> Self {
        Self {
            window,
            global: global.to_string(),
        }
    }
}

fn host_value(value: &JsValue) -> HostValue {
    if let Some(text) = value.as_string() {
        HostValue::Text(text)
    } else if let Some(n) = value.as_f64() {
        HostValue::Number(n)
    } else if let Some(b) = value.as_bool() {
        HostValue::Bool(b)
    } else if value.is_undefined() || value.is_null() {
        HostValue::Missing
    } else {
        HostValue::Text(String::from(value.unchecked_ref::<js_sys::Object>().to_string()))
    }
}

impl HostContext for WindowHost {
    fn project_id(&self) -> Option<String> {
        let host = js_sys::Reflect::get(&self.window, &self.global.as_str().into()).ok()?;
        if host.is_undefined() || host.is_null() {
            return None;
        }
        let id = js_sys::Reflect::get(&host, &"projectId".into()).ok()?;
        host_value(&id).into_project_id()
    }
}

pub struct WebLocation {
    window: Window,
}

impl WebLocation {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl PageLocation for WebLocation {
    fn href(&self) -> Result<String, PlatformError> {
        self.window.location().href().map_err(js_error)
    }

    fn open_in_new_context(&self, url: &str) -> Result<(), PlatformError> {
        self.window
            .open_with_url_and_target(url, "_blank")
            .map(|_| ())
            .map_err(js_error)
    }
}

/// `alert` / `confirm` / `prompt`
pub struct WebDialogs {
    window: Window,
}

impl WebDialogs {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Dialogs for WebDialogs {
    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn prompt(&self, question: &str, default: &str) -> Option<String> {
        self.window
            .prompt_with_message_and_default(question, default)
            .ok()
            .flatten()
    }
}

/// The element `setHtml` writes into, looked up on every call
pub struct DomRenderTarget {
    document: Document,
    id: String,
}

impl DomRenderTarget {
    pub fn new(document: Document, id: &str) -> Self {
        Self {
            document,
            id: id.to_string(),
        }
    }
}

impl HtmlRenderTarget for DomRenderTarget {
    fn render_sanitized(&self, markup: &str) -> Result<(), PlatformError> {
        let root: web_sys::Element = element_by_id(&self.document, &self.id)?;
        let clean = purify(markup).map_err(js_error)?;
        root.set_inner_html(&clean);
        Ok(())
    }
}
