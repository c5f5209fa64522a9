//! Block Registry - Central registry for the extension's block descriptors
//!
//! The registry keeps every declared block, in declaration order, and answers
//! the lookups the runtime needs when the host calls a block:
//! - Registration with validation and duplicate detection
//! - Lookup by opcode
//! - Argument defaulting for partial host calls

use crate::core::argument::BlockArgs;
use crate::core::block::{BlockDescriptor, Opcode};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Default)]
struct Entries {
    by_opcode: HashMap<Opcode, BlockDescriptor>,
    order: Vec<Opcode>,
}

/// Block registry for all declared blocks
///
/// Descriptors are read on every block call and written once at startup, so
/// they live behind a parking_lot `RwLock`.
#[derive(Clone, Default)]
pub struct BlockRegistry {
    entries: Arc<RwLock<Entries>>,
}

impl BlockRegistry {
    /// Create a new empty block registry
    ///
    /// # Example
    /// ```
    /// use browser_blocks::core::registry::BlockRegistry;
    ///
    /// let registry = BlockRegistry::new();
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of descriptors
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = BlockDescriptor>,
    ) -> Result<Self, RegistryError> {
        let registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a block descriptor
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError)` if the opcode already exists or validation fails
    pub fn register(&self, descriptor: BlockDescriptor) -> Result<(), RegistryError> {
        Self::validate_descriptor(&descriptor)?;

        let mut entries = self.entries.write();
        if entries.by_opcode.contains_key(&descriptor.opcode) {
            return Err(RegistryError::DuplicateBlock(descriptor.opcode.to_string()));
        }

        entries.order.push(descriptor.opcode);
        entries.by_opcode.insert(descriptor.opcode, descriptor);
        Ok(())
    }

    /// Get a descriptor by opcode
    pub fn get(&self, opcode: Opcode) -> Result<BlockDescriptor, RegistryError> {
        self.entries
            .read()
            .by_opcode
            .get(&opcode)
            .cloned()
            .ok_or_else(|| RegistryError::BlockNotFound(opcode.to_string()))
    }

    /// All descriptors in declaration order
    pub fn descriptors(&self) -> Vec<BlockDescriptor> {
        let entries = self.entries.read();
        entries
            .order
            .iter()
            .filter_map(|op| entries.by_opcode.get(op).cloned())
            .collect()
    }

    /// Get the number of registered blocks
    pub fn count(&self) -> usize {
        self.entries.read().order.len()
    }

    /// Check if a block with the given opcode exists
    pub fn contains(&self, opcode: Opcode) -> bool {
        self.entries.read().by_opcode.contains_key(&opcode)
    }

    /// Fill the arguments the host left out with their declared defaults
    ///
    /// Arguments the block does not declare are passed through untouched.
    pub fn resolve_arguments(
        &self,
        opcode: Opcode,
        mut args: BlockArgs,
    ) -> Result<BlockArgs, RegistryError> {
        let descriptor = self.get(opcode)?;
        for spec in &descriptor.arguments {
            if !args.contains(&spec.name) {
                args.insert(spec.name.clone(), spec.default_value.clone());
            }
        }
        Ok(args)
    }

    /// Validate a descriptor before registration
    ///
    /// The label must be non-empty and its `[NAME]` placeholders must match
    /// the declared arguments one to one.
    fn validate_descriptor(descriptor: &BlockDescriptor) -> Result<(), RegistryError> {
        if descriptor.text.trim().is_empty() {
            return Err(RegistryError::ValidationError(format!(
                "Block {} has an empty label",
                descriptor.opcode
            )));
        }

        let placeholders: HashSet<&str> = descriptor.placeholders().into_iter().collect();
        let declared: HashSet<&str> = descriptor
            .arguments
            .iter()
            .map(|a| a.name.as_str())
            .collect();

        if declared.len() != descriptor.arguments.len() {
            return Err(RegistryError::ValidationError(format!(
                "Block {} declares an argument twice",
                descriptor.opcode
            )));
        }

        if placeholders != declared {
            let mut missing: Vec<_> = declared.difference(&placeholders).copied().collect();
            let mut undeclared: Vec<_> = placeholders.difference(&declared).copied().collect();
            missing.sort_unstable();
            undeclared.sort_unstable();
            return Err(RegistryError::ValidationError(format!(
                "Block {} label/argument mismatch (not in label: {:?}, not declared: {:?})",
                descriptor.opcode, missing, undeclared
            )));
        }

        Ok(())
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Block with given opcode was not found
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Attempted to register the same opcode twice
    #[error("Duplicate block opcode: {0}")]
    DuplicateBlock(String),

    /// Descriptor validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),
}
