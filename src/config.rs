//! Extension configuration
//!
//! Every field has a default matching the page the extension was written
//! for, so hosts only pass the values they need to change, as JSON.

use serde::{Deserialize, Serialize};

use crate::core::Locale;

/// Ids of the page elements the file-import flow reuses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub modal_id: String,
    pub close_button_id: String,
    pub file_input_id: String,
    pub render_root_id: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            modal_id: "adacraft-modal".into(),
            close_button_id: "adacraft-modal-close-button".into(),
            file_input_id: "adacraft-hidden-input-file-upload".into(),
            render_root_id: "dom-render-root".into(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    pub extension_id: String,
    pub name: String,
    pub docs_uri: String,
    pub dom: DomConfig,
    /// Prefix of every local storage key
    pub storage_namespace: String,
    /// Global object on `window` whose `projectId` scopes storage keys
    pub host_global: String,
    /// Width hint passed to the camera
    pub capture_width: u32,
    pub default_locale: Locale,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            extension_id: "adabrowser".into(),
            name: "Browser".into(),
            docs_uri: "https://adacraft.notion.site/9c8fb3c7ed6240e181290b2f1c70a651".into(),
            dom: DomConfig::default(),
            storage_namespace: "adacraft:project".into(),
            host_global: "adacraft".into(),
            capture_width: 400,
            default_locale: Locale::En,
        }
    }
}

impl ExtensionConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(ExtensionConfig::from_json("").unwrap(), ExtensionConfig::default());
        assert_eq!(ExtensionConfig::from_json("{}").unwrap(), ExtensionConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ExtensionConfig::from_json(
            r#"{"capture_width": 640, "dom": {"modal_id": "picker"}, "default_locale": "fr"}"#,
        )
        .unwrap();
        assert_eq!(config.capture_width, 640);
        assert_eq!(config.dom.modal_id, "picker");
        assert_eq!(config.dom.file_input_id, "adacraft-hidden-input-file-upload");
        assert_eq!(config.default_locale, Locale::Fr);
        assert_eq!(config.storage_namespace, "adacraft:project");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ExtensionConfig::from_json("{capture_width: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
