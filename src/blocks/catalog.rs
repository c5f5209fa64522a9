//! Block catalog
//!
//! The descriptors returned to the host's `getInfo`, in palette order.

use crate::config::ExtensionConfig;
use crate::core::argument::ArgumentSpec;
use crate::core::block::{BlockDescriptor, BlockType, ExtensionInfo, Opcode};
use crate::core::locale::{self, Locale};

fn label(key: &'static str, locale: Locale) -> &'static str {
    locale::message(key, locale).unwrap_or(key)
}

/// Every block of the extension, labelled for `locale`
pub fn descriptors(locale: Locale) -> Vec<BlockDescriptor> {
    use BlockType::{Boolean, Command, Reporter};

    let block = |opcode, block_type, key| BlockDescriptor::new(opcode, block_type, label(key, locale));
    let text = ArgumentSpec::string;

    vec![
        block(Opcode::GetUrl, Reporter, "get current URL"),
        block(
            Opcode::CheckIfQueryStringFieldExists,
            Boolean,
            "check field existence in URL",
        )
        .with_argument(text("FIELD", "search")),
        block(Opcode::GetQueryStringFieldValue, Reporter, "get field value from URL")
            .with_argument(text("FIELD", "search")),
        block(Opcode::OpenUrl, Command, "open URL")
            .with_argument(text("URL", "https://adacraft.org")),
        block(Opcode::SaveAsFile, Command, "save as file")
            .with_argument(text("TEXT", "some text"))
            .with_argument(text("FILE_NAME", "file.txt")),
        block(Opcode::OpenFileAsText, Reporter, "open text file").without_monitor(),
        // Binary content is of little use as a block string; callable, not listed.
        block(Opcode::OpenFileAsBinaryString, Reporter, "open binary file")
            .without_monitor()
            .hidden(),
        block(Opcode::LocalStorageSetItem, Command, "localStorage set item")
            .with_argument(text("NAME", "name"))
            .with_argument(text("VALUE", "value")),
        block(Opcode::LocalStorageGetItem, Reporter, "localStorage get item")
            .with_argument(text("NAME", "name")),
        block(Opcode::LocalStorageRemoveItem, Command, "localStorage remove item")
            .with_argument(text("NAME", "name")),
        block(Opcode::LocalStorageItemExists, Boolean, "localStorage item exists")
            .with_argument(text("NAME", "name")),
        block(Opcode::SetHtml, Command, "set HTML").with_argument(text(
            "NAME",
            "<h1 style=\"color: orange;\">Hello</h1>World",
        )),
        block(
            Opcode::TakePictureAndSaveWithName,
            Command,
            "take picture and save it to file",
        )
        .with_argument(text("PICTURE_NAME", "image.png")),
        block(Opcode::TakePictureAndSave, Command, "save webcam picture"),
        block(Opcode::WindowAlert, Command, "window alert")
            .with_argument(text("MESSAGE", "Some important information")),
        block(Opcode::WindowPromptReporter, Reporter, "window prompt as reporter")
            .with_argument(text("QUESTION", "Please type something"))
            .with_argument(text("DEFAULT", "something")),
        block(
            Opcode::WindowPromptNoDefaultReporter,
            Reporter,
            "window prompt without default as reporter",
        )
        .with_argument(text("QUESTION", "Please type something")),
        block(Opcode::WindowPromptCommand, Command, "window prompt as command")
            .with_argument(text("MESSAGE", "Please type something"))
            .with_argument(text("VALUE", "something")),
        block(Opcode::WindowConfirm, Boolean, "window confirm")
            .with_argument(text("MESSAGE", "Do you agree?")),
    ]
}

/// Extension metadata for `getInfo`
pub fn extension_info(config: &ExtensionConfig, locale: Locale) -> ExtensionInfo {
    ExtensionInfo {
        id: config.extension_id.clone(),
        name: config.name.clone(),
        docs_uri: config.docs_uri.clone(),
        blocks: descriptors(locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::BlockRegistry;

    #[test]
    fn test_catalog_covers_every_opcode_once_in_order() {
        let opcodes: Vec<_> = descriptors(Locale::En).iter().map(|d| d.opcode).collect();
        assert_eq!(opcodes, Opcode::ALL.to_vec());
    }

    #[test]
    fn test_catalog_registers_cleanly_in_every_locale() {
        for locale in Locale::SUPPORTED {
            let registry = BlockRegistry::from_descriptors(descriptors(locale));
            assert!(registry.is_ok(), "{:?}: {:?}", locale, registry.err());
        }
    }

    #[test]
    fn test_labels_follow_locale() {
        let en = descriptors(Locale::En);
        let fr = descriptors(Locale::Fr);
        assert_eq!(en[0].text, "current URL");
        assert_eq!(fr[0].text, "URL actuelle");
    }

    #[test]
    fn test_binary_reader_is_hidden() {
        let blocks = descriptors(Locale::En);
        let hidden: Vec<_> = blocks
            .iter()
            .filter(|d| d.hide_from_palette)
            .map(|d| d.opcode)
            .collect();
        assert_eq!(hidden, vec![Opcode::OpenFileAsBinaryString]);
    }

    #[test]
    fn test_extension_info_json() {
        let info = extension_info(&ExtensionConfig::default(), Locale::En);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["id"], "adabrowser");
        assert_eq!(json["name"], "Browser");
        assert!(json["docsURI"].as_str().unwrap().starts_with("https://"));
        assert_eq!(json["blocks"].as_array().unwrap().len(), Opcode::ALL.len());
        assert_eq!(json["blocks"][1]["arguments"][0]["defaultValue"], "search");
    }
}
