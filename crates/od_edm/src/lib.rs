//! Entity data model for the `od_*` crates.
//!
//! ## Menu
//!
//! - [`info`]: schema type definitions.
//! - [`value`]: materialized values and the [`Resource`](value::Resource) trait.
//! - [`registry`]: the [`EdmModel`](registry::EdmModel) and runtime type bindings.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod info;
pub mod registry;
pub mod value;
