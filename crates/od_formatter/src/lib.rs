//! Reads OData resource payloads into values of an [`od_edm`] model.
//!
//! ## Menu
//!
//! - [`tree`]: the parsed resource tree a payload is turned into.
//! - [`reader`]: [`PayloadReader`](reader::PayloadReader) and the serde based wire reader.
//! - [`de`]: the deserializers and the [`DeserializerProvider`](de::DeserializerProvider).
//! - [`ReadContext`]: model, path and [`ReadMode`] of one read.
//! - [`path`]: the request path that names the entity set or action.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use od_edm::info::{EdmTypeRef, PrimitiveKind, StructuredType};
//! use od_edm::registry::EdmModel;
//! use od_formatter::de::{DeserializerProvider, EdmTypeDeserializer, ResourceDeserializer};
//! use od_formatter::reader::{JsonPayloadReader, PayloadReader};
//! use od_formatter::{ReadContext, ReadMode};
//!
//! let mut model = EdmModel::new();
//! model.add_structured_type(
//!     StructuredType::entity("NS.Tag")
//!         .with_key("ID", EdmTypeRef::primitive(PrimitiveKind::Int32))
//!         .with_property("Label", EdmTypeRef::primitive(PrimitiveKind::String)),
//! );
//!
//! let ctx = ReadContext::new()
//!     .with_model(Arc::new(model))
//!     .with_mode(ReadMode::Typeless);
//! let provider = DeserializerProvider::new();
//!
//! let item = JsonPayloadReader.read_payload(br#"{"ID": 1, "Label": "red"}"#).unwrap();
//! let value = ResourceDeserializer
//!     .read_inline(item, &EdmTypeRef::entity("NS.Tag"), &provider, &ctx)
//!     .unwrap();
//!
//! let tag = value.as_object().unwrap();
//! assert!(tag.is_entity());
//! assert_eq!(tag.property("Label").unwrap().as_primitive().unwrap().as_str(), Some("red"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod context;
mod error;

pub mod de;
pub mod path;
pub mod reader;
pub mod tree;

// -----------------------------------------------------------------------------
// Top-level exports

pub use context::{ReadContext, ReadMode};
pub use error::DeserializeError;
