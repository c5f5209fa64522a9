//! Block runtime
//!
//! Resolves host calls by opcode name: looks up the descriptor, fills the
//! arguments the host left out, runs the block and checks that what came
//! back fits the block's shape.

pub mod clock;

use tracing::{debug, warn, Instrument};

use crate::blocks::catalog;
use crate::blocks::BrowserBlocks;
use crate::core::argument::BlockArgs;
use crate::core::block::{BlockError, BlockValue, Opcode};
use crate::core::registry::{BlockRegistry, RegistryError};

use self::clock::Stopwatch;

/// Opcode dispatcher over a [`BrowserBlocks`] facade
pub struct ExtensionRuntime {
    registry: BlockRegistry,
    blocks: BrowserBlocks,
}

impl ExtensionRuntime {
    /// Register the catalog for the facade's locale
    pub fn new(blocks: BrowserBlocks) -> Result<Self, RegistryError> {
        let registry = BlockRegistry::from_descriptors(catalog::descriptors(blocks.locale()))?;
        Ok(Self { registry, blocks })
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn blocks(&self) -> &BrowserBlocks {
        &self.blocks
    }

    /// Run the block named `opcode`
    ///
    /// Only an undeclared opcode, or a block answering with the wrong kind
    /// of value, is an error; block failures themselves were already
    /// degraded by the facade. Detached commands
    /// ([`Opcode::runs_detached`]) are awaited here like any other block;
    /// leaving them unawaited is up to the caller.
    pub async fn invoke(&self, opcode: &str, args: BlockArgs) -> Result<BlockValue, BlockError> {
        let op: Opcode = opcode.parse()?;
        let descriptor = self
            .registry
            .get(op)
            .map_err(|_| BlockError::UnknownOpcode(opcode.to_string()))?;
        let args = self
            .registry
            .resolve_arguments(op, args)
            .map_err(|e| BlockError::InvalidArguments(e.to_string()))?;

        let span = tracing::debug_span!("block", opcode = %op);
        let watch = Stopwatch::start();
        let value = self.blocks.call(op, &args).instrument(span).await;
        let elapsed_ms = watch.elapsed_ms();

        if !value.matches(descriptor.block_type) {
            warn!(opcode = %op, ?value, "block returned a mismatched value");
            return Err(BlockError::UnexpectedValue {
                opcode: op,
                block_type: descriptor.block_type,
            });
        }

        debug!(opcode = %op, elapsed_ms, "block finished");
        Ok(value)
    }
}
