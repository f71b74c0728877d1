//! Deserializers for every kind of schema type.
//!
//! ## Menu
//!
//! - [`EdmTypeDeserializer`]: reads one [`ResourceItem`](crate::tree::ResourceItem)
//!   as a value of a schema type.
//! - [`DeserializerProvider`]: picks the deserializer for a schema or runtime type.
//! - [`ResourceDeserializer`]: entities and complex values, plus the async
//!   top-level read.
//! - [`ResourceSetDeserializer`], [`CollectionDeserializer`]: sets of resources
//!   and collections of literals.
//! - [`PrimitiveDeserializer`], [`EnumDeserializer`]: literals.
//! - [`UntypedDeserializer`]: `Edm.Untyped` values of any shape.
//! - [`ReferenceLinkDeserializer`], [`ActionPayloadDeserializer`]: `$ref` and
//!   action parameter payloads.
//! - [`create_instance`]: the container a resource is read into.

// -----------------------------------------------------------------------------
// Modules

mod action;
mod collection;
mod deserializer;
mod enumeration;
mod instance;
mod key;
mod primitive;
mod provider;
mod reference_link;
mod resource;
mod resource_set;
mod untyped;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use action::{ActionParameters, ActionPayloadDeserializer, UntypedActionParameters};
pub use collection::CollectionDeserializer;
pub use deserializer::{EdmTypeDeserializer, PayloadKind};
pub use enumeration::EnumDeserializer;
pub use instance::create_instance;
pub use primitive::{PrimitiveDeserializer, convert_primitive};
pub use provider::{DeserializerKind, DeserializerProvider};
pub use reference_link::{ReferenceLinkDeserializer, Uri};
pub use resource::ResourceDeserializer;
pub use resource_set::ResourceSetDeserializer;
pub use untyped::{UntypedDeserializer, build_untyped};
