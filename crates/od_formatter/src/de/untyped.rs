use alloc::vec::Vec;

use od_edm::info::EdmTypeRef;
use od_edm::value::{EdmCollection, EdmEnumValue, EdmObject, Value};

use crate::de::resource::is_set;
use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::tree::{NestedResourceInfo, ResourceItem};
use crate::{DeserializeError, ReadContext};

/// Converts any subtree into schema-less values.
///
/// Resources become [`EdmObject`]s and every kind of set or collection
/// becomes an [`EdmCollection`], both tagged `Edm.Untyped`. Order is kept at
/// every level. A single-valued nested info becomes its item. A collection
/// info becomes its only item if that is already a set, otherwise a
/// collection of its items.
///
/// # Examples
///
/// ```
/// use od_edm::value::{PrimitiveValue, Value};
/// use od_formatter::de::build_untyped;
/// use od_formatter::tree::{CollectionNode, ResourceItem, ResourceNode, ResourceSetNode};
///
/// let inner = ResourceNode::new().with_property(
///     "Aws/Name",
///     ResourceItem::Collection(CollectionNode::new(vec![
///         ResourceItem::from(PrimitiveValue::from(true)),
///         ResourceItem::from(PrimitiveValue::from(15)),
///     ])),
/// );
/// let item = ResourceItem::ResourceSet(ResourceSetNode::new(vec![
///     ResourceItem::ResourceSet(ResourceSetNode::new(vec![inner.clone().into()])),
///     inner.into(),
/// ]));
///
/// let value = build_untyped(item);
/// let outer = value.as_collection().unwrap();
/// assert_eq!(outer.len(), 2);
/// assert_eq!(outer.get(0).unwrap().as_collection().unwrap().len(), 1);
///
/// let object = outer.get(1).unwrap().as_object().unwrap();
/// assert!(object.is_untyped());
/// let name = object.property("Aws/Name").unwrap().as_collection().unwrap();
/// assert_eq!(name.get(1), Some(&Value::from(15)));
/// ```
pub fn build_untyped(item: ResourceItem) -> Value {
    match item {
        ResourceItem::Null => Value::Null,
        ResourceItem::Primitive(value) => Value::Primitive(value),
        ResourceItem::Enum(node) => {
            let type_name = node.type_name.unwrap_or_default();
            Value::Enum(EdmEnumValue::new(type_name, node.value))
        }
        ResourceItem::ReferenceLink(link) => Value::from(link.url),
        ResourceItem::Resource(node) => {
            let mut object = EdmObject::untyped();
            for property in node.properties {
                object.set_property(property.name, build_untyped(property.value));
            }
            for nested in node.nested {
                let (name, value) = build_nested(nested);
                object.set_property(name, value);
            }
            Value::Object(object)
        }
        ResourceItem::ResourceSet(set) | ResourceItem::DeltaResourceSet(set) => untyped_list(set.items),
        ResourceItem::Collection(list) => untyped_list(list.items),
        ResourceItem::NestedInfo(nested) => build_nested(nested).1,
    }
}

fn untyped_list(items: Vec<ResourceItem>) -> Value {
    let items = items.into_iter().map(build_untyped).collect();
    Value::Collection(EdmCollection::with_items(EdmTypeRef::untyped(), items))
}

/// The name and untyped value of a nested info.
pub(crate) fn build_nested(nested: NestedResourceInfo) -> (alloc::string::String, Value) {
    let NestedResourceInfo {
        name,
        is_collection,
        mut items,
    } = nested;

    let value = match items.len() {
        0 if is_collection => Value::Collection(EdmCollection::untyped()),
        0 => Value::Null,
        1 if !is_collection || is_set(&items[0]) => build_untyped(items.remove(0)),
        _ => untyped_list(items),
    };
    (name, value)
}

// -----------------------------------------------------------------------------
// UntypedDeserializer

/// Dispatched for `Edm.Untyped`. Runs [`build_untyped`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UntypedDeserializer;

impl EdmTypeDeserializer for UntypedDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Value
    }

    fn read_inline(
        &self,
        item: ResourceItem,
        _edm_type: &EdmTypeRef,
        _provider: &DeserializerProvider,
        _ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        Ok(build_untyped(item))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use od_edm::value::PrimitiveValue;

    use super::*;
    use crate::tree::{ReferenceLink, ResourceNode};

    #[test]
    fn nested_infos_unwrap_single_items() {
        let node = ResourceNode::new()
            .with_nested(NestedResourceInfo::single(
                "Address",
                ResourceNode::new().with_property("City", PrimitiveValue::from("Oslo")).into(),
            ))
            .with_nested(NestedResourceInfo::collection(
                "Links",
                alloc::vec![ResourceItem::ReferenceLink(ReferenceLink::new("Products(1)"))],
            ))
            .with_nested(NestedResourceInfo::collection("None", Vec::new()));

        let value = build_untyped(node.into());
        let object = value.as_object().unwrap();

        let address = object.property("Address").unwrap().as_object().unwrap();
        assert_eq!(address.property("City"), Some(&Value::from("Oslo")));

        let links = object.property("Links").unwrap().as_collection().unwrap();
        assert_eq!(links.get(0), Some(&Value::from("Products(1)")));

        assert!(object.property("None").unwrap().as_collection().unwrap().is_empty());
    }

    #[test]
    fn collection_infos_stay_collections() {
        let resource = ResourceNode::new().with_property("A", PrimitiveValue::from(1));
        let (name, value) = build_nested(NestedResourceInfo::collection("Dyn", alloc::vec![resource.into()]));
        assert_eq!(name, "Dyn");

        let list = value.as_collection().unwrap();
        assert_eq!(list.len(), 1);
        let object = list.get(0).unwrap().as_object().unwrap();
        assert_eq!(object.property("A"), Some(&Value::from(1)));

        let set = ResourceItem::ResourceSet(crate::tree::ResourceSetNode::new(alloc::vec![
            ResourceItem::from(PrimitiveValue::from(true)),
            ResourceItem::from(PrimitiveValue::from(15)),
        ]));
        let (_, value) = build_nested(NestedResourceInfo::collection("Set", alloc::vec![set]));
        let list = value.as_collection().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1), Some(&Value::from(15)));
    }

    #[test]
    fn enums_keep_their_type() {
        let item = ResourceItem::Enum(crate::tree::EnumNode {
            type_name: Some("ODataDemo.Color".into()),
            value: "Red".into(),
        });
        assert_eq!(
            build_untyped(item),
            Value::Enum(EdmEnumValue::new("ODataDemo.Color", "Red"))
        );
    }
}
