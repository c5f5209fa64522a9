//! Integration tests: host calls through the runtime
//!
//! These tests simulate what the wasm surface does for a generic `invoke`:
//!   opcode name + JSON args → registry lookup → defaults → facade → value

#[cfg(test)]
mod tests {
    use crate::blocks::BrowserBlocks;
    use crate::config::ExtensionConfig;
    use crate::core::argument::BlockArgs;
    use crate::core::block::{BlockError, BlockValue, Opcode};
    use crate::core::locale::Locale;
    use crate::runtime::ExtensionRuntime;
    use crate::tests::fakes::{expect_ready, poll_once, FakeFile, TestBed};

    fn runtime(bed: &TestBed) -> ExtensionRuntime {
        let blocks = BrowserBlocks::new(bed.platform(), ExtensionConfig::default());
        ExtensionRuntime::new(blocks).unwrap()
    }

    fn args(json: &str) -> BlockArgs {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_registry_holds_the_whole_catalog() {
        let bed = TestBed::new();
        let runtime = runtime(&bed);
        assert_eq!(runtime.registry().count(), Opcode::ALL.len());
        for op in Opcode::ALL {
            assert!(runtime.registry().contains(op));
        }
    }

    #[tokio::test]
    async fn test_unknown_opcode_is_rejected() {
        let bed = TestBed::new();
        let err = runtime(&bed)
            .invoke("fetchUrl", BlockArgs::new())
            .await
            .unwrap_err();
        assert_eq!(err, BlockError::UnknownOpcode("fetchUrl".into()));
    }

    /// Arguments the host leaves out take the declared defaults.
    #[tokio::test]
    async fn test_missing_arguments_take_defaults() {
        let bed = TestBed::new();
        let runtime = runtime(&bed);

        // FIELD defaults to "search"
        let value = runtime
            .invoke("getQueryStringFieldValue", BlockArgs::new())
            .await
            .unwrap();
        assert_eq!(value, BlockValue::Text("cats".into()));

        // NAME / VALUE default to "name" / "value"
        runtime.invoke("localStorageSetItem", BlockArgs::new()).await.unwrap();
        assert_eq!(bed.store.keys(), vec!["adacraft:project:1234:name".to_string()]);

        runtime
            .invoke("saveAsFile", args(r#"{"TEXT": "hello"}"#))
            .await
            .unwrap();
        assert_eq!(bed.downloads.files()[0].0, "file.txt");
    }

    /// Null arguments count as missing; numbers are read as text.
    #[tokio::test]
    async fn test_host_json_arguments() {
        let bed = TestBed::new();
        let runtime = runtime(&bed);

        runtime
            .invoke("localStorageSetItem", args(r#"{"NAME": null, "VALUE": 42}"#))
            .await
            .unwrap();
        let value = runtime
            .invoke("localStorageGetItem", args(r#"{"NAME": "name"}"#))
            .await
            .unwrap();
        assert_eq!(value, BlockValue::Text("42".into()));

        let exists = runtime
            .invoke("localStorageItemExists", args(r#"{"NAME": "other"}"#))
            .await
            .unwrap();
        assert_eq!(exists, BlockValue::Bool(false));
    }

    #[tokio::test]
    async fn test_command_blocks_report_nothing() {
        let bed = TestBed::new();
        let runtime = runtime(&bed);

        let value = runtime
            .invoke("windowAlert", BlockArgs::new())
            .await
            .unwrap();
        assert_eq!(value, BlockValue::Empty);
        assert_eq!(
            *bed.dialogs.alerts.borrow(),
            vec!["Some important information".to_string()]
        );

        let value = runtime
            .invoke("takePictureAndSaveWithName", BlockArgs::new())
            .await
            .unwrap();
        assert_eq!(value, BlockValue::Empty);
        assert_eq!(bed.downloads.files()[0].0, "image.png");
    }

    /// The file reporter is awaitable through `invoke` like any other block.
    #[test]
    fn test_file_reporter_through_invoke() {
        let bed = TestBed::new();
        let runtime = runtime(&bed);

        let mut fut = Box::pin(runtime.invoke("openFileAsText", BlockArgs::new()));
        assert!(poll_once(fut.as_mut()).is_pending());
        assert!(poll_once(fut.as_mut()).is_pending());
        bed.file_input.pick(FakeFile::text("data.csv", "a,b\n1,2"));
        bed.modal.close.fire();

        let value = expect_ready(fut.as_mut()).unwrap();
        assert_eq!(value, BlockValue::Text("a,b\n1,2".into()));
        assert_eq!(bed.live_listeners(), 0);
    }

    #[tokio::test]
    async fn test_french_runtime_dispatches_the_same_blocks() {
        let bed = TestBed::new();
        let blocks =
            BrowserBlocks::new(bed.platform(), ExtensionConfig::default()).with_locale(Locale::Fr);
        let runtime = ExtensionRuntime::new(blocks).unwrap();

        assert_eq!(runtime.registry().count(), Opcode::ALL.len());
        assert_eq!(
            runtime.invoke("getUrl", BlockArgs::new()).await.unwrap(),
            BlockValue::Text("https://adacraft.org/studio/?search=cats".into())
        );
    }

    #[tokio::test]
    async fn test_runtime_with_tracing_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let bed = TestBed::new();
        let value = runtime(&bed)
            .invoke("checkIfQueryStringFieldExists", BlockArgs::new())
            .await
            .unwrap();
        assert_eq!(value, BlockValue::Bool(true));
    }
}
