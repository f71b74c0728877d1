//! Materialized values.
//!
//! ## Menu
//!
//! - [`Value`]: the result of deserializing any payload.
//! - [`Resource`]: the trait runtime types implement.
//! - [`Delta`] / [`DeltaResource`]: partial updates with change tracking.
//! - [`EdmObject`] / [`EdmCollection`]: values without a runtime type.
//! - [`PrimitiveValue`], [`EdmEnumValue`].

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod delta;
mod enum_value;
mod error;
mod object;
mod primitive;
mod resource;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use collection::EdmCollection;
pub use delta::{Delta, DeltaResource};
pub use enum_value::EdmEnumValue;
pub use error::ValueError;
pub use object::EdmObject;
pub use primitive::PrimitiveValue;
pub use resource::{DynamicProperties, Resource};
pub use value::Value;
