//! In-process platform pieces
//!
//! Used by native hosts that have no browser behind them, and by the tests.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{
    HostContext, KeyValueStore, MediaCapture, PlatformError, VideoConstraints, VideoSink,
};

/// Key-value store kept in memory for the lifetime of the value
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.items.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PlatformError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Host context with a fixed project id
#[derive(Debug, Clone, Default)]
pub struct FixedHost {
    project_id: Option<String>,
}

impl FixedHost {
    pub fn new(project_id: Option<&str>) -> Self {
        Self {
            project_id: project_id.map(str::to_string),
        }
    }
}

impl HostContext for FixedHost {
    fn project_id(&self) -> Option<String> {
        self.project_id.clone()
    }
}

/// Media capture on a platform without cameras
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMediaCapture;

#[async_trait(?Send)]
impl MediaCapture for NoMediaCapture {
    fn is_available(&self) -> bool {
        false
    }

    async fn open_video(
        &self,
        _constraints: VideoConstraints,
    ) -> Result<Box<dyn VideoSink>, PlatformError> {
        Err(PlatformError::Unavailable("media capture".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_distinguishes_empty_from_absent() {
        let store = MemoryStore::new();
        assert!(!store.has("k").unwrap());

        store.set("k", "").unwrap();
        assert!(store.has("k").unwrap());
        assert_eq!(store.get("k").unwrap(), Some(String::new()));

        store.remove("k").unwrap();
        assert!(!store.has("k").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_absent_key_is_fine() {
        let store = MemoryStore::new();
        assert!(store.remove("never-set").is_ok());
    }

    #[test]
    fn test_fixed_host() {
        assert_eq!(FixedHost::new(Some("42")).project_id().as_deref(), Some("42"));
        assert_eq!(FixedHost::new(None).project_id(), None);
    }

    #[tokio::test]
    async fn test_no_media_capture() {
        let media = NoMediaCapture;
        assert!(!media.is_available());
        let err = media
            .open_video(VideoConstraints { audio: false, width: 400 })
            .await
            .err()
            .unwrap();
        assert_eq!(err, PlatformError::Unavailable("media capture".into()));
    }
}
