//! Small containers shared by the `od_*` crates.
//!
//! ## Menu
//!
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` state.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`OrderedMap`]: a string-keyed map that remembers insertion order.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod ordered_map;
mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use ordered_map::OrderedMap;
pub use typeid_map::TypeIdMap;
