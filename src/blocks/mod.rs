//! Block Facade
//!
//! [`BrowserBlocks`] holds one method per opcode. The awaitable reporters
//! wrap the file-import flow; the picture commands wrap the capture
//! pipeline; everything else relays a single platform call. No method
//! returns an error: failures are logged and degrade to `""`, `false` or
//! nothing.

pub mod catalog;
pub mod page;
pub mod storage;
pub mod url;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::bridge::capture::picture_file_name;
use crate::bridge::{CaptureOutcome, CapturePipeline, DecodeMode, FileAcquisition};
use crate::config::ExtensionConfig;
use crate::core::argument::BlockArgs;
use crate::core::block::{BlockValue, ExtensionInfo, Opcode};
use crate::core::locale::Locale;
use crate::platform::Platform;
use crate::runtime::clock;

use self::storage::ProjectStorage;

/// The browser block extension
pub struct BrowserBlocks {
    config: ExtensionConfig,
    locale: Locale,
    platform: Platform,
    files: FileAcquisition,
    capture: CapturePipeline,
    storage: ProjectStorage,
    clock: fn() -> DateTime<Utc>,
}

impl BrowserBlocks {
    pub fn new(platform: Platform, config: ExtensionConfig) -> Self {
        let files = FileAcquisition::new(platform.modal.clone());
        let capture = CapturePipeline::new(platform.media.clone(), platform.downloads.clone())
            .with_width(config.capture_width);
        let storage = ProjectStorage::new(
            platform.storage.clone(),
            platform.host.clone(),
            config.storage_namespace.clone(),
        );
        Self {
            locale: config.default_locale,
            config,
            platform,
            files,
            capture,
            storage,
            clock: clock::now_utc,
        }
    }

    /// Label locale used by [`BrowserBlocks::info`]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Time source for generated picture names
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn files(&self) -> &FileAcquisition {
        &self.files
    }

    /// Metadata for the host's `getInfo`
    pub fn info(&self) -> ExtensionInfo {
        catalog::extension_info(&self.config, self.locale)
    }

    pub fn get_url(&self) -> String {
        page::current_url(self.platform.location.as_ref())
    }

    pub fn check_if_query_string_field_exists(&self, field: &str) -> bool {
        url::query_field_exists(&self.get_url(), field)
    }

    pub fn get_query_string_field_value(&self, field: &str) -> String {
        url::query_field_value(&self.get_url(), field)
    }

    pub fn open_url(&self, url: &str) {
        page::open_url(self.platform.location.as_ref(), url)
    }

    pub fn save_as_file(&self, text: &str, file_name: &str) {
        page::save_as_file(self.platform.downloads.as_ref(), text, file_name)
    }

    pub async fn open_file_as_text(&self) -> String {
        self.open_file(DecodeMode::Text.as_str()).await
    }

    pub async fn open_file_as_binary_string(&self) -> String {
        self.open_file(DecodeMode::Binary.as_str()).await
    }

    /// Ask the user for a file decoded with `mode`; any failure reports `""`
    pub async fn open_file(&self, mode: &str) -> String {
        self.files.acquire_file(mode).await.unwrap_or_else(|e| {
            warn!(mode, error = %e, "file import failed");
            String::new()
        })
    }

    pub fn local_storage_set_item(&self, name: &str, value: &str) {
        self.storage.set(name, value)
    }

    pub fn local_storage_get_item(&self, name: &str) -> String {
        self.storage.get(name)
    }

    pub fn local_storage_remove_item(&self, name: &str) {
        self.storage.remove(name)
    }

    pub fn local_storage_item_exists(&self, name: &str) -> bool {
        self.storage.exists(name)
    }

    pub fn set_html(&self, markup: &str) {
        page::set_html(self.platform.html.as_ref(), markup)
    }

    /// Save a webcam picture as `picture_name`
    ///
    /// The outcome is returned for callers that want it; the block itself
    /// ignores it after logging failures.
    pub async fn take_picture_and_save_with_name(&self, picture_name: &str) -> Option<CaptureOutcome> {
        match self.capture.capture_and_download(picture_name).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(picture_name, error = %e, "webcam picture not saved");
                None
            }
        }
    }

    /// Save a webcam picture under a timestamped name
    pub async fn take_picture_and_save(&self) -> Option<CaptureOutcome> {
        let name = picture_file_name((self.clock)());
        self.take_picture_and_save_with_name(&name).await
    }

    pub fn window_alert(&self, message: &str) {
        self.platform.dialogs.alert(message)
    }

    pub fn window_prompt_reporter(&self, question: &str, default: &str) -> String {
        page::prompt(self.platform.dialogs.as_ref(), question, default)
    }

    pub fn window_prompt_no_default_reporter(&self, question: &str) -> String {
        page::prompt(self.platform.dialogs.as_ref(), question, "")
    }

    pub fn window_prompt_command(&self, message: &str, value: &str) {
        self.platform.dialogs.prompt(message, value);
    }

    pub fn window_confirm(&self, message: &str) -> bool {
        self.platform.dialogs.confirm(message)
    }

    /// Run `opcode` with host arguments
    pub async fn call(&self, opcode: Opcode, args: &BlockArgs) -> BlockValue {
        let arg = |name: &str| args.text(name);
        match opcode {
            Opcode::GetUrl => self.get_url().into(),
            Opcode::CheckIfQueryStringFieldExists => {
                self.check_if_query_string_field_exists(&arg("FIELD")).into()
            }
            Opcode::GetQueryStringFieldValue => {
                self.get_query_string_field_value(&arg("FIELD")).into()
            }
            Opcode::OpenUrl => self.open_url(&arg("URL")).into(),
            Opcode::SaveAsFile => self.save_as_file(&arg("TEXT"), &arg("FILE_NAME")).into(),
            Opcode::OpenFileAsText => self.open_file_as_text().await.into(),
            Opcode::OpenFileAsBinaryString => self.open_file_as_binary_string().await.into(),
            Opcode::LocalStorageSetItem => {
                self.local_storage_set_item(&arg("NAME"), &arg("VALUE")).into()
            }
            Opcode::LocalStorageGetItem => self.local_storage_get_item(&arg("NAME")).into(),
            Opcode::LocalStorageRemoveItem => self.local_storage_remove_item(&arg("NAME")).into(),
            Opcode::LocalStorageItemExists => self.local_storage_item_exists(&arg("NAME")).into(),
            Opcode::SetHtml => self.set_html(&arg("NAME")).into(),
            Opcode::TakePictureAndSaveWithName => {
                self.take_picture_and_save_with_name(&arg("PICTURE_NAME")).await;
                BlockValue::Empty
            }
            Opcode::TakePictureAndSave => {
                self.take_picture_and_save().await;
                BlockValue::Empty
            }
            Opcode::WindowAlert => self.window_alert(&arg("MESSAGE")).into(),
            Opcode::WindowPromptReporter => self
                .window_prompt_reporter(&arg("QUESTION"), &arg("DEFAULT"))
                .into(),
            Opcode::WindowPromptNoDefaultReporter => {
                self.window_prompt_no_default_reporter(&arg("QUESTION")).into()
            }
            Opcode::WindowPromptCommand => {
                self.window_prompt_command(&arg("MESSAGE"), &arg("VALUE")).into()
            }
            Opcode::WindowConfirm => self.window_confirm(&arg("MESSAGE")).into(),
        }
    }
}
