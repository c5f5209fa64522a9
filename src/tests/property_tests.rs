//! Property-based tests using proptest.
//!
//! These tests verify invariants that must hold for *any* input, catching
//! edge cases that hand-written tests miss.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use crate::blocks::storage::storage_key;
use crate::blocks::url::{query_field_exists, query_field_value};
use crate::bridge::capture::picture_file_name;
use crate::bridge::decode::binary_string;
use crate::core::argument::{ArgumentValue, BlockArgs};
use crate::core::block::Opcode;
use crate::core::locale::{message, message_keys, Locale};

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

proptest! {
    /// The key is exactly namespace, project and name joined by colons.
    #[test]
    fn storage_key_layout(
        namespace in "[a-z:]{1,20}",
        project in "[0-9a-f]{1,12}",
        name in ".{0,30}",
    ) {
        let key = storage_key(&namespace, Some(&project), &name);
        prop_assert_eq!(key, format!("{}:{}:{}", namespace, project, name));
    }

    /// No project id and an empty project id share the default scope.
    #[test]
    fn storage_key_default_scope(name in ".{0,30}") {
        let absent = storage_key("adacraft:project", None, &name);
        let empty = storage_key("adacraft:project", Some(""), &name);
        prop_assert_eq!(&absent, &empty);
        prop_assert!(absent.starts_with("adacraft:project:default:"));
    }

    /// Different names never collide within one project.
    #[test]
    fn storage_key_injective_on_names(a in "[a-z]{1,10}", b in "[a-z]{1,10}") {
        prop_assume!(a != b);
        prop_assert_ne!(
            storage_key("ns", Some("p"), &a),
            storage_key("ns", Some("p"), &b)
        );
    }
}

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

proptest! {
    /// A field written into the query string is found with its value.
    #[test]
    fn query_field_round_trip(field in "[a-z]{1,10}", value in "[A-Za-z0-9]{0,20}") {
        let href = format!("https://adacraft.org/?{}={}", field, value);
        prop_assert!(query_field_exists(&href, &field));
        prop_assert_eq!(query_field_value(&href, &field), value);
    }

    /// A field that is not in the query string reads as absent and empty.
    #[test]
    fn query_field_absent(field in "[a-z]{1,10}") {
        let href = "https://adacraft.org/?0=zero";
        prop_assert!(!query_field_exists(href, &field));
        prop_assert_eq!(query_field_value(href, &field), "");
    }

    /// Arbitrary hrefs never panic.
    #[test]
    fn query_lookup_total(href in ".{0,60}", field in ".{0,10}") {
        let _ = query_field_exists(&href, &field);
        let _ = query_field_value(&href, &field);
    }
}

// ---------------------------------------------------------------------------
// Picture names and binary strings
// ---------------------------------------------------------------------------

proptest! {
    /// `image_YYYYMMDDTHHMMSSZ.png` for any instant, milliseconds dropped.
    #[test]
    fn picture_name_shape(secs in 0i64..4_102_444_800, millis in 0i64..1000) {
        let at = Utc.timestamp_opt(secs, 0).unwrap() + chrono::Duration::milliseconds(millis);
        let name = picture_file_name(at);

        prop_assert_eq!(name.len(), "image_20211226T163043Z.png".len());
        prop_assert!(name.starts_with("image_"));
        prop_assert!(name.ends_with("Z.png"));
        prop_assert_eq!(&name[14..15], "T");
        prop_assert_eq!(name, picture_file_name(Utc.timestamp_opt(secs, 0).unwrap()));
    }

    /// One char per byte, and the byte is recoverable from the char.
    #[test]
    fn binary_string_preserves_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let s = binary_string(&bytes);
        let back: Vec<u8> = s.chars().map(|c| c as u32 as u8).collect();
        prop_assert_eq!(s.chars().count(), bytes.len());
        prop_assert!(s.chars().all(|c| (c as u32) <= 0xff));
        prop_assert_eq!(back, bytes);
    }
}

// ---------------------------------------------------------------------------
// Arguments, opcodes, locales
// ---------------------------------------------------------------------------

proptest! {
    /// String arguments read back unchanged; integral numbers have no
    /// fractional part.
    #[test]
    fn argument_text(s in ".{0,40}", n in -1_000_000i64..1_000_000) {
        let args = BlockArgs::new().with("S", s.as_str()).with("N", n as f64);
        prop_assert_eq!(args.text("S"), s);
        prop_assert_eq!(args.text("N"), n.to_string());
    }

    /// Only declared opcode names parse.
    #[test]
    fn opcode_parse(name in "[a-zA-Z]{1,30}") {
        let declared = Opcode::ALL.iter().any(|op| op.as_str() == name);
        prop_assert_eq!(name.parse::<Opcode>().is_ok(), declared);
    }

    /// Any locale tag resolves to a locale that labels every key.
    #[test]
    fn locale_fallback(tag in ".{0,8}") {
        let locale = Locale::resolve(&tag);
        for key in message_keys() {
            prop_assert!(message(key, locale).is_some_and(|label| !label.is_empty()));
        }
    }
}

#[test]
fn null_argument_is_missing() {
    let args = BlockArgs::new().with("X", ArgumentValue::Null);
    assert!(!args.contains("X"));
}
