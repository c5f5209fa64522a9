//! Localized block labels
//!
//! Labels are looked up by message key in a fixed table. Locales outside the
//! supported set fall back to English.

use serde::{Deserialize, Serialize};

/// Supported label locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const SUPPORTED: [Locale; 2] = [Locale::En, Locale::Fr];

    /// Map a host locale tag to a supported locale, falling back to English
    pub fn resolve(tag: &str) -> Locale {
        match tag {
            "en" => Locale::En,
            "fr" => Locale::Fr,
            _ => Locale::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }
}

struct Message {
    key: &'static str,
    en: &'static str,
    fr: &'static str,
}

const MESSAGES: &[Message] = &[
    Message {
        key: "get current URL",
        en: "current URL",
        fr: "URL actuelle",
    },
    Message {
        key: "check field existence in URL",
        en: "field [FIELD] exists in current URL",
        fr: "le champ [FIELD] existe dans l'URL courante",
    },
    Message {
        key: "get field value from URL",
        en: "field [FIELD] in current URL",
        fr: "champ [FIELD] de l'URL courante",
    },
    Message {
        key: "open URL",
        en: "open [URL] URL",
        fr: "ouvrir l'URL [URL]",
    },
    Message {
        key: "save as file",
        en: "save text [TEXT] as file [FILE_NAME]",
        fr: "enregistrer le texte [TEXT] dans le fichier [FILE_NAME]",
    },
    Message {
        key: "open text file",
        en: "ask the user to open a text file",
        fr: "demander à l'utilisateur d'ouvrir un fichier texte",
    },
    Message {
        key: "open binary file",
        en: "ask the user to open a binary file",
        fr: "demander à l'utilisateur d'ouvrir un fichier binaire",
    },
    Message {
        key: "localStorage set item",
        en: "set [NAME] to [VALUE] in local storage",
        fr: "localStorage : mettre [NAME] à [VALUE]",
    },
    Message {
        key: "localStorage get item",
        en: "item [NAME] in local storage",
        fr: "localStorage : [NAME]",
    },
    Message {
        key: "localStorage remove item",
        en: "remove [NAME] from local storage",
        fr: "localStorage : supprimer [NAME]",
    },
    Message {
        key: "localStorage item exists",
        en: "item [NAME] exists in local storage?",
        fr: "localStorage : l'élément [NAME] existe?",
    },
    Message {
        key: "set HTML",
        en: "set HTML to [NAME]",
        fr: "mettre le HTML à [NAME]",
    },
    Message {
        key: "take picture and save it to file",
        en: "save webcam picture to file [PICTURE_NAME]",
        fr: "enregistrer la webcam dans le fichier [PICTURE_NAME]",
    },
    Message {
        key: "save webcam picture",
        en: "save webcam picture",
        fr: "enregistrer la webcam",
    },
    Message {
        key: "window alert",
        en: "dialog [MESSAGE]",
        fr: "dialogue [MESSAGE]",
    },
    Message {
        key: "window prompt as reporter",
        en: "dialog with question [QUESTION] and default [DEFAULT]",
        fr: "dialogue avec question [QUESTION] et valeur [DEFAULT]",
    },
    Message {
        key: "window prompt without default as reporter",
        en: "dialog with question [QUESTION]",
        fr: "dialogue avec question [QUESTION]",
    },
    Message {
        key: "window prompt as command",
        en: "dialog with message [MESSAGE] and value [VALUE]",
        fr: "dialogue avec message [MESSAGE] et valeur [VALUE]",
    },
    Message {
        key: "window confirm",
        en: "dialog with confirmation [MESSAGE]",
        fr: "dialogue avec confirmation [MESSAGE]",
    },
];

/// All declared message keys
pub fn message_keys() -> impl Iterator<Item = &'static str> {
    MESSAGES.iter().map(|m| m.key)
}

/// Label for `key` in `locale`, or `None` for an undeclared key
pub fn message(key: &str, locale: Locale) -> Option<&'static str> {
    MESSAGES.iter().find(|m| m.key == key).map(|m| match locale {
        Locale::En => m.en,
        Locale::Fr => m.fr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_english() {
        assert_eq!(Locale::resolve("fr"), Locale::Fr);
        assert_eq!(Locale::resolve("en"), Locale::En);
        assert_eq!(Locale::resolve("de"), Locale::En);
        assert_eq!(Locale::resolve(""), Locale::En);
    }

    #[test]
    fn test_every_key_has_a_label_in_every_locale() {
        for key in message_keys() {
            for locale in Locale::SUPPORTED {
                let label = message(key, locale).unwrap();
                assert!(!label.is_empty(), "{key} is empty in {}", locale.as_str());
            }
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = message_keys().collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(message("no such block", Locale::En), None);
    }
}
