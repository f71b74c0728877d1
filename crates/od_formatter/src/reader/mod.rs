//! Turning payload bytes into a resource tree.
//!
//! ## Menu
//!
//! - [`PayloadReader`]: the interface the top-level read uses.
//! - [`ResourceItemSeed`]: a serde seed producing [`ResourceItem`]s from any
//!   self-describing format.
//! - [`JsonPayloadReader`]: the `serde_json` reader, behind the `json` feature.

// -----------------------------------------------------------------------------
// Modules

mod seed;

#[cfg(feature = "json")]
mod json;

// -----------------------------------------------------------------------------
// Exports

pub use seed::ResourceItemSeed;

#[cfg(feature = "json")]
pub use json::JsonPayloadReader;

use crate::DeserializeError;
use crate::tree::ResourceItem;

// -----------------------------------------------------------------------------
// PayloadReader

/// Parses one payload into a resource tree.
pub trait PayloadReader: Send + Sync {
    fn read_payload(&self, bytes: &[u8]) -> Result<ResourceItem, DeserializeError>;
}
