//! The model and the runtime types bound to it.
//!
//! ## Menu
//!
//! - [`EdmModel`]: schema types, navigation sources and actions.
//! - [`RuntimeType`]: constructor and [`PropertyAccessor`]s of a Rust type.
//! - [`TypeMappingCache`]: `TypeId` to schema type lookup.
//! - [`NavigationSource`]: entity sets and singletons.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod cache;
mod container;
mod model;
mod runtime_type;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::PropertyAccessor;
pub use cache::TypeMappingCache;
pub use container::{NavigationSource, NavigationSourceKind};
pub use model::EdmModel;
pub use runtime_type::{RuntimeType, RuntimeTypeBuilder};
