//! Schema type definitions.
//!
//! ## Menu
//!
//! - [`EdmTypeRef`] / [`EdmType`]: a reference to any schema type.
//! - [`EdmTypeKind`]: the dispatch tag of a type.
//! - [`StructuredType`]: entity and complex types with their [`EdmProperty`] list.
//! - [`EnumType`], [`PrimitiveKind`], [`PathKind`].
//! - [`EdmAction`]: action parameters for action payloads.

// -----------------------------------------------------------------------------
// Modules

mod action;
mod enum_type;
mod kind;
mod primitive;
mod property;
mod structured;
mod type_ref;

// -----------------------------------------------------------------------------
// Exports

pub use action::{EdmAction, EdmParameter};
pub use enum_type::{EnumMember, EnumType};
pub use kind::{EdmTypeKind, EdmTypeKindError};
pub use primitive::PrimitiveKind;
pub use property::{EdmProperty, PropertyKind};
pub use structured::{StructuredKind, StructuredType};
pub use type_ref::{EdmType, EdmTypeRef, PathKind, UNTYPED_TYPE_NAME};
