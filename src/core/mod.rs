//! Core block abstractions and types
//!
//! This module defines the block vocabulary shared by the facade, the runtime
//! and the wasm surface: opcodes, block descriptors, argument values, the
//! descriptor registry and the localized label table.

pub mod argument;
pub mod block;
pub mod locale;
pub mod registry;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use argument::{ArgumentSpec, ArgumentType, ArgumentValue, BlockArgs};
pub use block::{BlockDescriptor, BlockError, BlockType, BlockValue, ExtensionInfo, Opcode};
pub use locale::Locale;
pub use registry::BlockRegistry;

/// Unique identifier for one in-flight user-interaction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate a new random request ID
    pub fn new() -> Self {
        RequestId(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
