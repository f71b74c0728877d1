use alloc::format;
use alloc::vec::Vec;

use od_edm::info::EdmTypeRef;
use od_edm::value::{EdmCollection, Value};

use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind, build_untyped};
use crate::tree::ResourceItem;
use crate::{DeserializeError, ReadContext};

/// Reads a collection of primitive or enum values.
///
/// Items are dispatched on the element type, null items keep their place.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionDeserializer;

impl EdmTypeDeserializer for CollectionDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Collection
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
            ResourceItem::Collection(list) => list.items,
            ResourceItem::ResourceSet(set) => set.items,
            other => {
                return Err(DeserializeError::argument(
                    "item",
                    format!(
                        "The argument must be of type 'ODataCollectionValue', found a {}.",
                        other.kind_name()
                    ),
                ));
            }
        };

        if element.is_untyped() {
            let items = items.into_iter().map(build_untyped).collect();
            return Ok(Value::Collection(EdmCollection::with_items(element.clone(), items)));
        }

        let Some(deserializer) = provider.resolve(element) else {
            return Err(DeserializeError::unsupported(format!(
                "'{element}' cannot be deserialized using the OData input formatter."
            )));
        };
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            let value = match item {
                ResourceItem::Null => Value::Null,
                item => deserializer.read_inline(item, element, provider, ctx)?,
            };
            values.push(value);
        }
        Ok(Value::Collection(EdmCollection::with_items(element.clone(), values)))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use od_edm::info::PrimitiveKind;
    use od_edm::value::{EdmEnumValue, PrimitiveValue};

    use super::*;
    use crate::de::tests::fixtures;
    use crate::tree::CollectionNode;

    fn read(items: Vec<ResourceItem>, element: EdmTypeRef) -> Result<Value, DeserializeError> {
        CollectionDeserializer.read_inline(
            ResourceItem::Collection(CollectionNode::new(items)),
            &EdmTypeRef::collection(element),
            &DeserializerProvider::new(),
            &fixtures::context(),
        )
    }

    #[test]
    fn converts_items_and_keeps_nulls() {
        let value = read(
            vec![
                PrimitiveValue::Int(1).into(),
                ResourceItem::Null,
                PrimitiveValue::Float(3.0).into(),
            ],
            EdmTypeRef::primitive(PrimitiveKind::Int16),
        )
        .unwrap();

        let list = value.as_collection().unwrap();
        assert_eq!(list.element_type().primitive_kind(), Some(PrimitiveKind::Int16));
        let items: Vec<&Value> = list.iter().collect();
        assert_eq!(items, [&Value::from(1), &Value::Null, &Value::from(3)]);
    }

    #[test]
    fn enum_elements() {
        let value = read(
            vec![PrimitiveValue::from("Red").into(), PrimitiveValue::from("Blue").into()],
            EdmTypeRef::enumeration("ODataDemo.Color"),
        )
        .unwrap();
        let list = value.as_collection().unwrap();
        assert_eq!(
            list.get(1),
            Some(&Value::Enum(EdmEnumValue::new("ODataDemo.Color", "Blue")))
        );
    }

    #[test]
    fn out_of_range_item_fails_the_read() {
        let err = read(
            vec![PrimitiveValue::Int(1).into(), PrimitiveValue::Int(70_000).into()],
            EdmTypeRef::primitive(PrimitiveKind::Int16),
        );
        assert!(matches!(err, Err(DeserializeError::SchemaError(_))));
    }

    #[test]
    fn untyped_elements() {
        let value = read(
            vec![PrimitiveValue::from(true).into(), ResourceItem::Null],
            EdmTypeRef::untyped(),
        )
        .unwrap();
        let list = value.as_collection().unwrap();
        assert!(list.element_type().is_untyped());
        assert_eq!(list.len(), 2);
    }
}
