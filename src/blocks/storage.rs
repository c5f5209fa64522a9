//! Project-scoped local storage blocks
//!
//! Every name is stored under `<namespace>:<project id>:<name>` so projects
//! sharing a browser do not read each other's items. Projects without an id
//! share the `default` scope.

use std::rc::Rc;

use tracing::warn;

use crate::platform::{HostContext, KeyValueStore};

/// Project scope used when the host has no project id
pub const DEFAULT_PROJECT: &str = "default";

/// Storage key for `name` in the given project
pub fn storage_key(namespace: &str, project_id: Option<&str>, name: &str) -> String {
    let project = project_id
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_PROJECT);
    format!("{namespace}:{project}:{name}")
}

/// Local storage as seen by one project
#[derive(Clone)]
pub struct ProjectStorage {
    store: Rc<dyn KeyValueStore>,
    host: Rc<dyn HostContext>,
    namespace: String,
}

impl ProjectStorage {
    pub fn new(
        store: Rc<dyn KeyValueStore>,
        host: Rc<dyn HostContext>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            store,
            host,
            namespace: namespace.into(),
        }
    }

    /// Key `name` is stored under for the current project
    pub fn key(&self, name: &str) -> String {
        storage_key(&self.namespace, self.host.project_id().as_deref(), name)
    }

    pub fn set(&self, name: &str, value: &str) {
        let key = self.key(name);
        if let Err(e) = self.store.set(&key, value) {
            warn!(%key, error = %e, "local storage write failed");
        }
    }

    /// Stored value, or `""` when absent
    pub fn get(&self, name: &str) -> String {
        let key = self.key(name);
        match self.store.get(&key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(%key, error = %e, "local storage read failed");
                String::new()
            }
        }
    }

    pub fn remove(&self, name: &str) {
        let key = self.key(name);
        if let Err(e) = self.store.remove(&key) {
            warn!(%key, error = %e, "local storage remove failed");
        }
    }

    /// Whether `name` is stored, even with an empty value
    pub fn exists(&self, name: &str) -> bool {
        let key = self.key(name);
        self.store.has(&key).unwrap_or_else(|e| {
            warn!(%key, error = %e, "local storage read failed");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{FixedHost, MemoryStore};

    fn storage(project: Option<&str>) -> (Rc<MemoryStore>, ProjectStorage) {
        let store = Rc::new(MemoryStore::new());
        let storage = ProjectStorage::new(
            store.clone(),
            Rc::new(FixedHost::new(project)),
            "adacraft:project",
        );
        (store, storage)
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            storage_key("adacraft:project", Some("1234"), "score"),
            "adacraft:project:1234:score"
        );
        assert_eq!(
            storage_key("adacraft:project", None, "score"),
            "adacraft:project:default:score"
        );
        assert_eq!(
            storage_key("adacraft:project", Some(""), "score"),
            "adacraft:project:default:score"
        );
    }

    #[test]
    fn test_set_get_remove() {
        let (store, storage) = storage(Some("p1"));
        storage.set("score", "12");
        assert_eq!(storage.get("score"), "12");
        assert_eq!(store.keys(), vec!["adacraft:project:p1:score".to_string()]);

        storage.remove("score");
        assert_eq!(storage.get("score"), "");
        assert!(!storage.exists("score"));
    }

    #[test]
    fn test_empty_value_exists() {
        let (_, storage) = storage(None);
        assert!(!storage.exists("blank"));
        storage.set("blank", "");
        assert!(storage.exists("blank"));
        assert_eq!(storage.get("blank"), "");
    }

    #[test]
    fn test_projects_do_not_collide() {
        let store = Rc::new(MemoryStore::new());
        let a = ProjectStorage::new(store.clone(), Rc::new(FixedHost::new(Some("a"))), "ns");
        let b = ProjectStorage::new(store.clone(), Rc::new(FixedHost::new(Some("b"))), "ns");

        a.set("name", "alice");
        assert_eq!(b.get("name"), "");
        assert!(!b.exists("name"));
        assert_eq!(store.len(), 1);
    }
}
