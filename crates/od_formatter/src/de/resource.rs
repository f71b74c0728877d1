use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use od_edm::info::{EdmProperty, EdmTypeRef};
use od_edm::registry::RuntimeType;
use od_edm::value::{DeltaResource, EdmCollection, EdmObject, Resource, Value};

use crate::de::instance::{abstract_type_error, runtime_type};
use crate::de::key::parse_entity_keys;
use crate::de::untyped::build_nested;
use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::de::{build_untyped, create_instance};
use crate::tree::{NestedResourceInfo, PropertyNode, ResourceItem, ResourceSetNode};
use crate::{DeserializeError, ReadContext};

// -----------------------------------------------------------------------------
// Target

/// The container a resource is read into.
enum Target<'a> {
    Object(EdmObject),
    Typed {
        instance: Box<dyn Resource>,
        runtime: &'a RuntimeType,
    },
    Delta {
        delta: Box<dyn DeltaResource>,
        runtime: &'a RuntimeType,
    },
}

impl<'a> Target<'a> {
    fn new(value: Value, edm_type: &EdmTypeRef, ctx: &'a ReadContext) -> Result<Self, DeserializeError> {
        let runtime = || {
            let model = ctx.require_model()?;
            let name = edm_type.structured_name().unwrap_or_default();
            runtime_type(model, name)
        };
        match value {
            Value::Object(object) => Ok(Self::Object(object)),
            Value::Resource(instance) => Ok(Self::Typed {
                instance,
                runtime: runtime()?,
            }),
            Value::Delta(delta) => Ok(Self::Delta {
                delta,
                runtime: runtime()?,
            }),
            other => Err(DeserializeError::schema(format!(
                "Cannot read a resource of type '{edm_type}' into a {} value.",
                other.kind_name()
            ))),
        }
    }

    fn set_declared(&mut self, name: &str, value: Value) -> Result<(), DeserializeError> {
        let (instance, runtime): (&mut dyn Resource, &RuntimeType) = match self {
            Self::Object(object) => {
                object.set_property(name, value);
                return Ok(());
            }
            Self::Typed { instance, runtime } => (&mut **instance, *runtime),
            Self::Delta { delta, runtime } => {
                delta.mark_changed(name);
                (delta.instance_mut(), *runtime)
            }
        };

        match runtime.set_property(instance, name, value) {
            Ok(true) => Ok(()),
            Ok(false) => Err(DeserializeError::schema(format!(
                "The runtime type '{}' has no field bound to the property '{name}'.",
                runtime.type_path()
            ))),
            Err(source) => Err(DeserializeError::InvalidValue {
                property: String::from(name),
                source,
            }),
        }
    }

    fn set_dynamic(&mut self, name: String, value: Value, type_name: &str) -> Result<(), DeserializeError> {
        let instance: &mut dyn Resource = match self {
            Self::Object(object) => {
                object.set_property(name, value);
                return Ok(());
            }
            Self::Typed { instance, .. } => &mut **instance,
            Self::Delta { delta, .. } => {
                delta.mark_changed(&name);
                delta.instance_mut()
            }
        };

        let type_path = instance.type_path();
        match instance.dynamic_properties_mut() {
            Some(bag) => {
                bag.insert(name, value);
                Ok(())
            }
            None => Err(DeserializeError::schema(format!(
                "The open type '{type_name}' has no dynamic property container on the runtime type '{type_path}'."
            ))),
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::Object(object) => Value::Object(object),
            Self::Typed { instance, .. } => Value::Resource(instance),
            Self::Delta { delta, .. } => Value::Delta(delta),
        }
    }
}

// -----------------------------------------------------------------------------
// ResourceDeserializer

/// Reads an entity or complex resource.
///
/// - An `@odata.type` naming another type re-dispatches to that type.
/// - Declared properties go through the accessors of the runtime type, or
///   into the [`EdmObject`] for typeless and untyped reads.
/// - Unknown properties are kept as untyped values on open types and
///   rejected on closed ones.
/// - Reference links on navigation properties become key-only instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceDeserializer;

impl EdmTypeDeserializer for ResourceDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Resource
    }

    fn read_inline(
        &self,
        item: ResourceItem,
        edm_type: &EdmTypeRef,
        provider: &DeserializerProvider,
        ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        let node = match item {
            ResourceItem::Resource(node) => node,
            other => {
                return Err(DeserializeError::argument(
                    "item",
                    format!(
                        "The argument must be of type 'ODataResource', found a {}.",
                        other.kind_name()
                    ),
                ));
            }
        };
        if !edm_type.is_structured() && !edm_type.is_untyped() {
            return Err(DeserializeError::argument(
                "edm_type",
                format!("The type '{edm_type}' is not an entity or complex type."),
            ));
        }

        if let Some(expected) = edm_type.structured_name()
            && let Some(actual) = node.type_name.as_deref()
            && actual != expected
        {
            let model = ctx.require_model()?;
            let Some(actual_type) = model.find_type(actual) else {
                return Err(DeserializeError::schema(format!(
                    "Cannot find the resource type '{actual}' in the model."
                )));
            };
            if model.is_abstract(actual) {
                return Err(abstract_type_error(actual));
            }
            log::trace!("reading a '{expected}' resource as the derived type '{actual}'");
            let Some(deserializer) = provider.resolve(&actual_type) else {
                return Err(DeserializeError::unsupported(format!(
                    "'{actual}' cannot be deserialized using the OData input formatter."
                )));
            };
            return deserializer.read_inline(ResourceItem::Resource(node), &actual_type, provider, ctx);
        }

        let mut target = Target::new(create_instance(edm_type, ctx)?, edm_type, ctx)?;
        let type_name = edm_type.full_name();
        let structured = match edm_type.structured_name() {
            Some(name) => Some((ctx.require_model()?, name)),
            None => None,
        };
        let is_open = structured.is_none_or(|(model, name)| model.is_open(name));
        let declared = |name: &str| structured.and_then(|(model, ty)| model.find_property(ty, name));
        let nested_ctx = ctx.nested();

        for PropertyNode { name, value } in node.properties {
            match declared(&name) {
                Some(property) => {
                    let value = read_property_value(value, property.type_ref(), provider, &nested_ctx)?;
                    target.set_declared(&name, value)?;
                }
                None if is_open => {
                    log::trace!("keeping '{name}' as a dynamic property of '{type_name}'");
                    target.set_dynamic(name, build_untyped(value), &type_name)?;
                }
                None => {
                    return Err(DeserializeError::schema(format!(
                        "The property '{name}' does not exist on type '{type_name}'. Make sure to only use \
                         property names that are defined by the type or mark the type as open type."
                    )));
                }
            }
        }

        for nested in node.nested {
            match declared(&nested.name) {
                Some(property) => {
                    let NestedResourceInfo {
                        name,
                        is_collection,
                        items,
                    } = nested;
                    let value = read_nested_value(&name, property.type_ref(), is_collection, items, provider, &nested_ctx)?;
                    target.set_declared(&name, value)?;
                }
                None if is_open => {
                    let (name, value) = build_nested(nested);
                    target.set_dynamic(name, value, &type_name)?;
                }
                None => {
                    return Err(DeserializeError::schema(format!(
                        "Cannot find nested property '{}' on the resource type '{type_name}'.",
                        nested.name
                    )));
                }
            }
        }

        Ok(target.finish())
    }
}

#[cfg(feature = "std")]
impl ResourceDeserializer {
    /// Reads a top-level resource from `stream`.
    ///
    /// The entity type comes from the entity set or singleton the request
    /// path ends in. `type_id` picks the mode: [`EdmObject`] reads typeless,
    /// the `Delta<T>` of a mapped runtime type reads a partial update, any
    /// other mapped type reads a full instance.
    ///
    /// # Errors
    ///
    /// - `ArgumentInvalid` if the model or path is missing, or the path does
    ///   not lead to an entity set or singleton.
    /// - `UnsupportedType` if `type_id` is not mapped.
    /// - Anything the wire reader or [`read_inline`] reports.
    ///
    /// [`read_inline`]: EdmTypeDeserializer::read_inline
    pub async fn read<R>(
        &self,
        mut stream: R,
        type_id: core::any::TypeId,
        reader: &dyn crate::reader::PayloadReader,
        provider: &DeserializerProvider,
        ctx: &ReadContext,
    ) -> Result<Value, DeserializeError>
    where
        R: futures_lite::AsyncRead + Unpin,
    {
        use alloc::borrow::Cow;
        use core::any::TypeId;

        use futures_lite::AsyncReadExt;

        use crate::ReadMode;

        let model = ctx.require_model()?;
        let path = ctx.path().ok_or_else(DeserializeError::missing_path)?;
        let Some(source) = path.navigation_source(model) else {
            return Err(DeserializeError::argument(
                "path",
                "The related entity set or singleton cannot be found from the OData path. \
                 The related entity set or singleton is required to deserialize the payload.",
            ));
        };

        let (edm_type, ctx) = if type_id == TypeId::of::<EdmObject>() {
            let ctx = ctx.clone().with_mode(ReadMode::Typeless);
            (source.entity_type(), Cow::Owned(ctx))
        } else {
            let Some(edm_type) = model.get_schema_type(type_id) else {
                return Err(DeserializeError::unsupported(format!(
                    "The runtime type {type_id:?} is not mapped to a type of the model."
                )));
            };
            let is_delta = edm_type
                .structured_name()
                .and_then(|name| model.runtime_type_mapping(name))
                .is_some_and(|runtime| runtime.delta_type_id() == type_id);
            let ctx = if is_delta {
                Cow::Owned(ctx.clone().with_mode(ReadMode::Delta))
            } else {
                Cow::Borrowed(ctx)
            };
            (edm_type.clone(), ctx)
        };
        log::debug!("reading a '{edm_type}' resource for '{path}' in {:?} mode", ctx.mode());

        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).await?;
        let item = reader.read_payload(&bytes)?;
        self.read_inline(item, &edm_type, provider, &ctx)
    }
}

// -----------------------------------------------------------------------------
// Property values

/// Reads the value of a structural property or parameter.
pub(crate) fn read_property_value(
    item: ResourceItem,
    type_ref: &EdmTypeRef,
    provider: &DeserializerProvider,
    ctx: &ReadContext,
) -> Result<Value, DeserializeError> {
    if item.is_null() {
        return Ok(Value::Null);
    }
    if type_ref.is_untyped_value() {
        return Ok(build_untyped(item));
    }
    match provider.resolve(type_ref) {
        Some(deserializer) => deserializer.read_inline(item, type_ref, provider, ctx),
        None => Err(DeserializeError::unsupported(format!(
            "'{type_ref}' cannot be deserialized using the OData input formatter."
        ))),
    }
}

/// Reads the items of a nested info declared as `type_ref`.
pub(crate) fn read_nested_value(
    name: &str,
    type_ref: &EdmTypeRef,
    is_collection: bool,
    mut items: Vec<ResourceItem>,
    provider: &DeserializerProvider,
    ctx: &ReadContext,
) -> Result<Value, DeserializeError> {
    if type_ref.is_untyped_value() {
        let nested = NestedResourceInfo {
            name: String::from(name),
            is_collection,
            items,
        };
        return Ok(build_nested(nested).1);
    }

    if items.iter().any(ResourceItem::is_reference_link) {
        return read_links(name, type_ref, items, provider, ctx);
    }

    let many = type_ref.is_collection();
    let item = match items.len() {
        0 if many => ResourceItem::ResourceSet(ResourceSetNode::default()),
        0 => return Ok(Value::Null),
        1 if !many || is_set(&items[0]) => items.remove(0),
        _ if many => ResourceItem::ResourceSet(ResourceSetNode::new(items)),
        _ => return Err(multiple_values(name)),
    };
    read_property_value(item, type_ref, provider, ctx)
}

pub(crate) fn is_set(item: &ResourceItem) -> bool {
    matches!(
        item,
        ResourceItem::Null
            | ResourceItem::ResourceSet(_)
            | ResourceItem::DeltaResourceSet(_)
            | ResourceItem::Collection(_)
    )
}

fn multiple_values(name: &str) -> DeserializeError {
    DeserializeError::schema(format!(
        "Multiple values were found for the single-valued navigation property '{name}'."
    ))
}

/// Bound entities. Every link becomes an instance with only its keys set.
fn read_links(
    name: &str,
    type_ref: &EdmTypeRef,
    items: Vec<ResourceItem>,
    provider: &DeserializerProvider,
    ctx: &ReadContext,
) -> Result<Value, DeserializeError> {
    let element = type_ref.as_element();
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        let value = match item {
            ResourceItem::ReferenceLink(link) => create_proxy(&link.url, element, provider, ctx)?,
            other => read_property_value(other, element, provider, ctx)?,
        };
        values.push(value);
    }

    if type_ref.is_collection() {
        return Ok(Value::Collection(EdmCollection::with_items(element.clone(), values)));
    }
    match values.len() {
        1 => Ok(values.remove(0)),
        _ => Err(multiple_values(name)),
    }
}

fn create_proxy(
    url: &str,
    element: &EdmTypeRef,
    provider: &DeserializerProvider,
    ctx: &ReadContext,
) -> Result<Value, DeserializeError> {
    let model = ctx.require_model()?;
    let Some(type_name) = element.structured_name() else {
        return Err(DeserializeError::schema(format!(
            "The entity reference link '{url}' cannot be bound to a value of type '{element}'."
        )));
    };

    let mut target = Target::new(create_instance(element, ctx)?, element, ctx)?;
    let keys: Vec<&EdmProperty> = model
        .declared_properties(type_name)
        .filter(|property| property.is_key())
        .collect();

    for (index, (key_name, literal)) in parse_entity_keys(url)?.into_iter().enumerate() {
        let property = match key_name {
            Some(key_name) => keys.iter().find(|property| property.name() == key_name),
            None => keys.get(index),
        };
        let Some(property) = property else {
            return Err(DeserializeError::schema(format!(
                "The key of the entity reference link '{url}' does not match the keys of '{type_name}'."
            )));
        };
        let value = read_property_value(literal.into(), property.type_ref(), provider, ctx)?;
        target.set_declared(property.name(), value)?;
    }
    Ok(target.finish())
}
