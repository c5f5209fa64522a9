//! Browser Blocks - browser capabilities for visual programming hosts
//!
//! This crate provides the "Browser" block extension: URL and query-string
//! reporters, project-scoped local storage, text downloads, user file
//! import, webcam snapshots, sanitized HTML and dialogs. The browser is
//! reached only through the traits in [`platform`], so everything except the
//! `wasm32` bindings runs and is tested natively.

pub mod blocks;
pub mod bridge;
pub mod config;
pub mod core;
pub mod platform;
pub mod runtime;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use blocks::BrowserBlocks;
pub use bridge::{BridgeError, CaptureError, CaptureOutcome, FileAcquisition, ModalController};
pub use config::ExtensionConfig;
pub use core::{BlockArgs, BlockValue, Locale, Opcode};
pub use platform::{Platform, PlatformError};
pub use runtime::ExtensionRuntime;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
