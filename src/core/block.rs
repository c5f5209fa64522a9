//! Block descriptors, values and errors
//!
//! This module defines what the host needs to know about each block (its
//! opcode, shape, label and arguments) and what a block call hands back.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::argument::ArgumentSpec;

/// Every operation the extension exposes to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Opcode {
    GetUrl,
    CheckIfQueryStringFieldExists,
    GetQueryStringFieldValue,
    OpenUrl,
    SaveAsFile,
    OpenFileAsText,
    OpenFileAsBinaryString,
    LocalStorageSetItem,
    LocalStorageGetItem,
    LocalStorageRemoveItem,
    LocalStorageItemExists,
    SetHtml,
    TakePictureAndSaveWithName,
    TakePictureAndSave,
    WindowAlert,
    WindowPromptReporter,
    WindowPromptNoDefaultReporter,
    WindowPromptCommand,
    WindowConfirm,
}

impl Opcode {
    /// All opcodes in palette order
    pub const ALL: [Opcode; 19] = [
        Opcode::GetUrl,
        Opcode::CheckIfQueryStringFieldExists,
        Opcode::GetQueryStringFieldValue,
        Opcode::OpenUrl,
        Opcode::SaveAsFile,
        Opcode::OpenFileAsText,
        Opcode::OpenFileAsBinaryString,
        Opcode::LocalStorageSetItem,
        Opcode::LocalStorageGetItem,
        Opcode::LocalStorageRemoveItem,
        Opcode::LocalStorageItemExists,
        Opcode::SetHtml,
        Opcode::TakePictureAndSaveWithName,
        Opcode::TakePictureAndSave,
        Opcode::WindowAlert,
        Opcode::WindowPromptReporter,
        Opcode::WindowPromptNoDefaultReporter,
        Opcode::WindowPromptCommand,
        Opcode::WindowConfirm,
    ];

    /// Host-facing opcode name
    pub fn as_str(&self) -> &'static str {
        match self {
            Opcode::GetUrl => "getUrl",
            Opcode::CheckIfQueryStringFieldExists => "checkIfQueryStringFieldExists",
            Opcode::GetQueryStringFieldValue => "getQueryStringFieldValue",
            Opcode::OpenUrl => "openUrl",
            Opcode::SaveAsFile => "saveAsFile",
            Opcode::OpenFileAsText => "openFileAsText",
            Opcode::OpenFileAsBinaryString => "openFileAsBinaryString",
            Opcode::LocalStorageSetItem => "localStorageSetItem",
            Opcode::LocalStorageGetItem => "localStorageGetItem",
            Opcode::LocalStorageRemoveItem => "localStorageRemoveItem",
            Opcode::LocalStorageItemExists => "localStorageItemExists",
            Opcode::SetHtml => "setHtml",
            Opcode::TakePictureAndSaveWithName => "takePictureAndSaveWithName",
            Opcode::TakePictureAndSave => "takePictureAndSave",
            Opcode::WindowAlert => "windowAlert",
            Opcode::WindowPromptReporter => "windowPromptReporter",
            Opcode::WindowPromptNoDefaultReporter => "windowPromptNoDefaultReporter",
            Opcode::WindowPromptCommand => "windowPromptCommand",
            Opcode::WindowConfirm => "windowConfirm",
        }
    }

    /// Commands whose work outlives the call; the host does not wait for them
    pub fn runs_detached(&self) -> bool {
        matches!(
            self,
            Opcode::TakePictureAndSaveWithName | Opcode::TakePictureAndSave
        )
    }
}

impl FromStr for Opcode {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| BlockError::UnknownOpcode(s.to_string()))
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block shapes understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Returns a value
    Reporter,
    /// Returns true/false
    Boolean,
    /// Effect only
    Command,
}

/// Everything the host needs to render and call one block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    pub opcode: Opcode,
    #[serde(rename = "blockType")]
    pub block_type: BlockType,
    /// Localized label; arguments appear as `[NAME]` placeholders
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentSpec>,
    /// Hide the monitor checkbox next to the reporter
    #[serde(rename = "disableMonitor", default, skip_serializing_if = "std::ops::Not::not")]
    pub disable_monitor: bool,
    /// Keep the block callable but out of the palette
    #[serde(rename = "hideFromPalette", default, skip_serializing_if = "std::ops::Not::not")]
    pub hide_from_palette: bool,
}

impl BlockDescriptor {
    /// Create a descriptor without arguments
    pub fn new(opcode: Opcode, block_type: BlockType, text: impl Into<String>) -> Self {
        Self {
            opcode,
            block_type,
            text: text.into(),
            arguments: Vec::new(),
            disable_monitor: false,
            hide_from_palette: false,
        }
    }

    /// Add an argument declaration
    pub fn with_argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Disable the reporter monitor
    pub fn without_monitor(mut self) -> Self {
        self.disable_monitor = true;
        self
    }

    /// Hide the block from the palette
    pub fn hidden(mut self) -> Self {
        self.hide_from_palette = true;
        self
    }

    /// Placeholder names found in the label, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find('[') {
            let after = &rest[start + 1..];
            match after.find(']') {
                Some(end) => {
                    found.push(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        found
    }
}

/// Extension metadata returned to the host's `getInfo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "docsURI")]
    pub docs_uri: String,
    pub blocks: Vec<BlockDescriptor>,
}

/// Value handed back to the host by a block call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockValue {
    /// Reporter result
    Text(String),
    /// Boolean block result
    Bool(bool),
    /// Command blocks report nothing
    Empty,
}

impl BlockValue {
    /// Whether this value fits the given block shape
    pub fn matches(&self, block_type: BlockType) -> bool {
        matches!(
            (self, block_type),
            (BlockValue::Text(_), BlockType::Reporter)
                | (BlockValue::Bool(_), BlockType::Boolean)
                | (BlockValue::Empty, BlockType::Command)
        )
    }

    /// Text payload, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BlockValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean payload, if any
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BlockValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for BlockValue {
    fn from(s: String) -> Self {
        BlockValue::Text(s)
    }
}

impl From<bool> for BlockValue {
    fn from(b: bool) -> Self {
        BlockValue::Bool(b)
    }
}

impl From<()> for BlockValue {
    fn from(_: ()) -> Self {
        BlockValue::Empty
    }
}

/// Block call errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// The host asked for an opcode this extension does not declare
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(String),

    /// Arguments could not be interpreted
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A block returned a value that does not fit its shape
    #[error("Block {opcode} returned a value that does not fit a {block_type:?} block")]
    UnexpectedValue { opcode: Opcode, block_type: BlockType },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_round_trips_through_name() {
        for op in Opcode::ALL {
            assert_eq!(op.as_str().parse::<Opcode>().unwrap(), op);
        }
        assert_eq!(
            "fetchUrl".parse::<Opcode>().unwrap_err(),
            BlockError::UnknownOpcode("fetchUrl".into())
        );
    }

    #[test]
    fn test_only_picture_commands_run_detached() {
        let detached: Vec<_> = Opcode::ALL.into_iter().filter(Opcode::runs_detached).collect();
        assert_eq!(
            detached,
            vec![Opcode::TakePictureAndSaveWithName, Opcode::TakePictureAndSave]
        );
        assert!(!Opcode::OpenFileAsText.runs_detached());
    }

    #[test]
    fn test_opcode_serde_name_matches_host_name() {
        for op in Opcode::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
    }

    #[test]
    fn test_placeholders() {
        let d = BlockDescriptor::new(
            Opcode::SaveAsFile,
            BlockType::Command,
            "save text [TEXT] as file [FILE_NAME]",
        );
        assert_eq!(d.placeholders(), vec!["TEXT", "FILE_NAME"]);

        let bare = BlockDescriptor::new(Opcode::GetUrl, BlockType::Reporter, "current URL");
        assert!(bare.placeholders().is_empty());
    }

    #[test]
    fn test_value_matches_block_type() {
        assert!(BlockValue::Text("x".into()).matches(BlockType::Reporter));
        assert!(BlockValue::Bool(true).matches(BlockType::Boolean));
        assert!(BlockValue::Empty.matches(BlockType::Command));
        assert!(!BlockValue::Empty.matches(BlockType::Reporter));
    }

    #[test]
    fn test_descriptor_serializes_host_field_names() {
        let d = BlockDescriptor::new(Opcode::OpenFileAsText, BlockType::Reporter, "open")
            .without_monitor();
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["opcode"], "openFileAsText");
        assert_eq!(json["blockType"], "reporter");
        assert_eq!(json["disableMonitor"], true);
        assert!(json.get("hideFromPalette").is_none());
        assert!(json.get("arguments").is_none());
    }
}
