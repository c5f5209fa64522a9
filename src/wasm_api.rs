//! WASM API: `#[wasm_bindgen]` exports for the host's extension glue.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `initExtension` / `destroyExtension`: lifecycle
//! - `getInfo`: block catalog as JSON
//! - one export per opcode, under the opcode's host name
//! - `invoke`: generic dispatch by opcode name with JSON arguments
//!
//! The file reporters return Promises. Picture commands are spawned and not
//! awaited.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::blocks::BrowserBlocks;
use crate::config::ExtensionConfig;
use crate::core::argument::BlockArgs;
use crate::core::block::{BlockValue, Opcode};
use crate::core::locale::Locale;
use crate::platform::web::{console, web_platform};
use crate::runtime::ExtensionRuntime;

// ── Global state ────────────────────────────────────────────────────────────

thread_local! {
    static EXTENSION: RefCell<Option<Rc<ExtensionRuntime>>> = const { RefCell::new(None) };
}

fn extension() -> Result<Rc<ExtensionRuntime>, JsValue> {
    EXTENSION
        .with(|cell| cell.borrow().clone())
        .ok_or_else(|| JsValue::from_str("Extension not initialized. Call initExtension() first."))
}

fn with_blocks<R>(f: impl FnOnce(&BrowserBlocks) -> R) -> Result<R, JsValue> {
    let ext = extension()?;
    Ok(f(ext.blocks()))
}

fn to_js(value: BlockValue) -> JsValue {
    match value {
        BlockValue::Text(s) => JsValue::from_str(&s),
        BlockValue::Bool(b) => JsValue::from_bool(b),
        BlockValue::Empty => JsValue::UNDEFINED,
    }
}

// ── Lifecycle ───────────────────────────────────────────────────────────────

/// Bind the extension to the current page
///
/// `config_json` may be omitted or partial; `locale` is the host's locale
/// tag and falls back to the configured default.
#[wasm_bindgen(js_name = initExtension)]
pub fn init_extension(config_json: Option<String>, locale: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init_tracing();

    let config = ExtensionConfig::from_json(config_json.as_deref().unwrap_or(""))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let locale = locale
        .as_deref()
        .map(Locale::resolve)
        .unwrap_or(config.default_locale);
    let platform = web_platform(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let blocks = BrowserBlocks::new(platform, config).with_locale(locale);
    let runtime = ExtensionRuntime::new(blocks).map_err(|e| JsValue::from_str(&e.to_string()))?;
    tracing::info!(locale = locale.as_str(), "browser extension ready");

    EXTENSION.with(|cell| *cell.borrow_mut() = Some(Rc::new(runtime)));
    Ok(())
}

#[wasm_bindgen(js_name = destroyExtension)]
pub fn destroy_extension() {
    EXTENSION.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen(js_name = getInfo)]
pub fn get_info() -> Result<String, JsValue> {
    let info = with_blocks(|blocks| blocks.info())?;
    serde_json::to_string(&info).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ── Blocks ──────────────────────────────────────────────────────────────────

#[wasm_bindgen(js_name = getUrl)]
pub fn get_url() -> Result<String, JsValue> {
    with_blocks(|b| b.get_url())
}

#[wasm_bindgen(js_name = checkIfQueryStringFieldExists)]
pub fn check_if_query_string_field_exists(field: &str) -> Result<bool, JsValue> {
    with_blocks(|b| b.check_if_query_string_field_exists(field))
}

#[wasm_bindgen(js_name = getQueryStringFieldValue)]
pub fn get_query_string_field_value(field: &str) -> Result<String, JsValue> {
    with_blocks(|b| b.get_query_string_field_value(field))
}

#[wasm_bindgen(js_name = openUrl)]
pub fn open_url(url: &str) -> Result<(), JsValue> {
    with_blocks(|b| b.open_url(url))
}

#[wasm_bindgen(js_name = saveAsFile)]
pub fn save_as_file(text: &str, file_name: &str) -> Result<(), JsValue> {
    with_blocks(|b| b.save_as_file(text, file_name))
}

#[wasm_bindgen(js_name = openFileAsText)]
pub fn open_file_as_text() -> Result<js_sys::Promise, JsValue> {
    let ext = extension()?;
    Ok(future_to_promise(async move {
        Ok(JsValue::from_str(&ext.blocks().open_file_as_text().await))
    }))
}

#[wasm_bindgen(js_name = openFileAsBinaryString)]
pub fn open_file_as_binary_string() -> Result<js_sys::Promise, JsValue> {
    let ext = extension()?;
    Ok(future_to_promise(async move {
        Ok(JsValue::from_str(&ext.blocks().open_file_as_binary_string().await))
    }))
}

#[wasm_bindgen(js_name = localStorageSetItem)]
pub fn local_storage_set_item(name: &str, value: &str) -> Result<(), JsValue> {
    with_blocks(|b| b.local_storage_set_item(name, value))
}

#[wasm_bindgen(js_name = localStorageGetItem)]
pub fn local_storage_get_item(name: &str) -> Result<String, JsValue> {
    with_blocks(|b| b.local_storage_get_item(name))
}

#[wasm_bindgen(js_name = localStorageRemoveItem)]
pub fn local_storage_remove_item(name: &str) -> Result<(), JsValue> {
    with_blocks(|b| b.local_storage_remove_item(name))
}

#[wasm_bindgen(js_name = localStorageItemExists)]
pub fn local_storage_item_exists(name: &str) -> Result<bool, JsValue> {
    with_blocks(|b| b.local_storage_item_exists(name))
}

#[wasm_bindgen(js_name = setHtml)]
pub fn set_html(markup: &str) -> Result<(), JsValue> {
    with_blocks(|b| b.set_html(markup))
}

#[wasm_bindgen(js_name = takePictureAndSaveWithName)]
pub fn take_picture_and_save_with_name(picture_name: String) -> Result<(), JsValue> {
    let ext = extension()?;
    spawn_local(async move {
        ext.blocks().take_picture_and_save_with_name(&picture_name).await;
    });
    Ok(())
}

#[wasm_bindgen(js_name = takePictureAndSave)]
pub fn take_picture_and_save() -> Result<(), JsValue> {
    let ext = extension()?;
    spawn_local(async move {
        ext.blocks().take_picture_and_save().await;
    });
    Ok(())
}

#[wasm_bindgen(js_name = windowAlert)]
pub fn window_alert(message: &str) -> Result<(), JsValue> {
    with_blocks(|b| b.window_alert(message))
}

#[wasm_bindgen(js_name = windowPromptReporter)]
pub fn window_prompt_reporter(question: &str, default: &str) -> Result<String, JsValue> {
    with_blocks(|b| b.window_prompt_reporter(question, default))
}

#[wasm_bindgen(js_name = windowPromptNoDefaultReporter)]
pub fn window_prompt_no_default_reporter(question: &str) -> Result<String, JsValue> {
    with_blocks(|b| b.window_prompt_no_default_reporter(question))
}

#[wasm_bindgen(js_name = windowPromptCommand)]
pub fn window_prompt_command(message: &str, value: &str) -> Result<(), JsValue> {
    with_blocks(|b| b.window_prompt_command(message, value))
}

#[wasm_bindgen(js_name = windowConfirm)]
pub fn window_confirm(message: &str) -> Result<bool, JsValue> {
    with_blocks(|b| b.window_confirm(message))
}

// ── Generic dispatch ────────────────────────────────────────────────────────

/// Run any block by opcode name
///
/// `args_json` is the host's argument object, e.g. `{"FIELD": "search"}`.
/// Missing arguments take their declared defaults. Rejects only for an
/// unknown opcode or malformed arguments.
///
/// Picture commands are spawned like their own exports: the Promise
/// resolves to `undefined` right away and capture failures are only logged.
#[wasm_bindgen]
pub fn invoke(opcode: String, args_json: Option<String>) -> Result<js_sys::Promise, JsValue> {
    let ext = extension()?;
    let args: BlockArgs = match args_json.as_deref().map(str::trim) {
        None | Some("") => BlockArgs::new(),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid arguments JSON: {}", e)))?,
    };

    if opcode.parse::<Opcode>().is_ok_and(|op| op.runs_detached()) {
        spawn_local(async move {
            if let Err(e) = ext.invoke(&opcode, args).await {
                tracing::warn!(%opcode, error = %e, "detached block failed");
            }
        });
        return Ok(js_sys::Promise::resolve(&JsValue::UNDEFINED));
    }

    Ok(future_to_promise(async move {
        ext.invoke(&opcode, args)
            .await
            .map(to_js)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }))
}
