use alloc::format;
use alloc::vec::Vec;

use od_edm::info::EdmTypeRef;
use od_edm::value::{EdmCollection, Value};

use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::tree::ResourceItem;
use crate::{DeserializeError, ReadContext};

/// Reads a set of entity or complex instances.
///
/// Every resource is dispatched on the element type, so derived types and
/// per-item errors behave as for a single resource. The result is an
/// [`EdmCollection`] in wire order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceSetDeserializer;

impl EdmTypeDeserializer for ResourceSetDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::ResourceSet
    }

    fn read_inline(
        &self,
        item: ResourceItem,
        edm_type: &EdmTypeRef,
        provider: &DeserializerProvider,
        ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        let element = edm_type
            .as_collection()
            .map_err(|err| DeserializeError::argument("edm_type", format!("{err}")))?;

        let items = match item {
            ResourceItem::Null => return Ok(Value::Null),
            ResourceItem::ResourceSet(set) => set.items,
            ResourceItem::Collection(list) => list.items,
            ResourceItem::DeltaResourceSet(set) => {
                log::warn!(
                    "reading a delta resource set of '{element}' as a plain set, \
                     deleted entries and links are not tracked"
                );
                set.items
            }
            other => {
                return Err(DeserializeError::argument(
                    "item",
                    format!(
                        "The argument must be of type 'ODataResourceSetWrapper', found a {}.",
                        other.kind_name()
                    ),
                ));
            }
        };

        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(self.read_item(item, edm_type, element, provider, ctx)?);
        }
        Ok(Value::Collection(EdmCollection::with_items(element.clone(), values)))
    }
}

impl ResourceSetDeserializer {
    fn read_item(
        &self,
        item: ResourceItem,
        edm_type: &EdmTypeRef,
        element: &EdmTypeRef,
        provider: &DeserializerProvider,
        ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        match item {
            ResourceItem::Null => Ok(Value::Null),
            ResourceItem::Primitive(value) => Ok(Value::Primitive(value)),
            item @ ResourceItem::Resource(_) => match provider.resolve(element) {
                Some(deserializer) => deserializer.read_inline(item, element, provider, ctx),
                None => Err(DeserializeError::unsupported(format!(
                    "'{element}' cannot be deserialized using the OData input formatter."
                ))),
            },
            item @ (ResourceItem::ResourceSet(_)
            | ResourceItem::DeltaResourceSet(_)
            | ResourceItem::Collection(_)) => self.read_inline(item, edm_type, provider, ctx),
            other => Err(DeserializeError::schema(format!(
                "A {} cannot be an item of a resource set of '{element}'.",
                other.kind_name()
            ))),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use od_edm::value::PrimitiveValue;

    use super::*;
    use crate::de::tests::fixtures::{self, Address};
    use crate::tree::{ResourceNode, ResourceSetNode};

    fn address(city: &str) -> ResourceItem {
        ResourceNode::new().with_property("City", PrimitiveValue::from(city)).into()
    }

    #[test]
    fn keeps_wire_order_and_nulls() {
        let set = ResourceItem::ResourceSet(ResourceSetNode::new(vec![
            address("Redmond"),
            ResourceItem::Null,
            address("Oslo"),
        ]));
        let value = ResourceSetDeserializer
            .read_inline(
                set,
                &EdmTypeRef::collection(fixtures::address_type()),
                &DeserializerProvider::new(),
                &fixtures::context(),
            )
            .unwrap();

        let list = value.as_collection().unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.get(1).unwrap().is_null());
        let cities: Vec<&str> = list
            .iter()
            .filter_map(|item| item.as_resource::<Address>())
            .map(|address| address.city.as_str())
            .collect();
        assert_eq!(cities, ["Redmond", "Oslo"]);
    }

    #[test]
    fn rejects_single_resources() {
        let err = ResourceSetDeserializer
            .read_inline(
                address("Oslo"),
                &EdmTypeRef::collection(fixtures::address_type()),
                &DeserializerProvider::new(),
                &fixtures::context(),
            )
            .unwrap_err();
        assert!(matches!(err, DeserializeError::ArgumentInvalid { argument: "item", .. }));
    }

    #[test]
    fn delta_sets_are_read_as_plain_sets() {
        let set = ResourceItem::DeltaResourceSet(ResourceSetNode::new(vec![address("Bergen")]));
        let value = ResourceSetDeserializer
            .read_inline(
                set,
                &EdmTypeRef::collection(fixtures::address_type()),
                &DeserializerProvider::new(),
                &fixtures::context(),
            )
            .unwrap();
        assert_eq!(value.as_collection().unwrap().len(), 1);
    }
}
