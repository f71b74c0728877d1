use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use od_edm::value::PrimitiveValue;
use serde_core::Deserializer;
use serde_core::de::{DeserializeSeed, Error, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::tree::{CollectionNode, EnumNode, NestedResourceInfo, PropertyNode};
use crate::tree::{ReferenceLink, ResourceItem, ResourceNode, ResourceSetNode};

const TYPE_ANNOTATION: &str = "odata.type";
const BIND_ANNOTATION: &str = "odata.bind";

// -----------------------------------------------------------------------------
// ResourceItemSeed

/// Deserializes a [`ResourceItem`] from any self-describing format.
///
/// Objects become [`ResourceNode`]s:
///
/// - `@odata.type` names the resource type, other instance annotations are
///   skipped.
/// - `Name@odata.bind` becomes a nested info of reference links.
/// - `Name@odata.type` naming a non-`Edm` type turns the string value of
///   `Name` into an enum node.
/// - Object values become single nested infos. Arrays holding objects or
///   arrays become resource-set nested infos.
/// - Everything else is a structural property.
///
/// # Examples
///
/// ```
/// use serde_core::de::DeserializeSeed;
/// use od_formatter::reader::ResourceItemSeed;
/// use od_formatter::tree::ResourceItem;
///
/// let input = r##"{
///     "ID": 1,
///     "Color@odata.type": "#NS.Color",
///     "Color": "Red",
///     "Supplier@odata.bind": "Suppliers(42)",
///     "Address": { "City": "Redmond" }
/// }"##;
///
/// let mut de = serde_json::Deserializer::from_str(input);
/// let ResourceItem::Resource(node) = ResourceItemSeed.deserialize(&mut de).unwrap() else {
///     panic!("expected a resource");
/// };
///
/// assert_eq!(node.properties.len(), 2);
/// assert!(matches!(node.properties[1].value, ResourceItem::Enum(_)));
/// assert_eq!(node.nested[0].name, "Supplier");
/// assert_eq!(node.nested[1].name, "Address");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceItemSeed;

impl<'de> DeserializeSeed<'de> for ResourceItemSeed {
    type Value = ResourceItem;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ItemVisitor)
    }
}

// -----------------------------------------------------------------------------
// ItemVisitor

struct ItemVisitor;

impl<'de> Visitor<'de> for ItemVisitor {
    type Value = ResourceItem;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an OData resource, collection or primitive value")
    }

    fn visit_bool<E: Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(PrimitiveValue::Boolean(v).into())
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PrimitiveValue::Int(v).into())
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(match i64::try_from(v) {
            Ok(v) => PrimitiveValue::Int(v),
            Err(_) => PrimitiveValue::Float(v as f64),
        }
        .into())
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(PrimitiveValue::Float(v).into())
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PrimitiveValue::from(v).into())
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PrimitiveValue::String(v).into())
    }

    fn visit_bytes<E: Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(PrimitiveValue::Binary(v.to_vec()).into())
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(ResourceItem::Null)
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(ResourceItem::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        ResourceItemSeed.deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default().min(256));
        while let Some(item) = seq.next_element_seed(ResourceItemSeed)? {
            items.push(item);
        }
        Ok(array_item(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut node = ResourceNode::new();
        let mut property_types: Vec<(String, String)> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if let Some(annotation) = key.strip_prefix('@') {
                if annotation == TYPE_ANNOTATION {
                    let type_name: String = map.next_value()?;
                    node.type_name = Some(strip_hash(type_name));
                } else {
                    map.next_value::<IgnoredAny>()?;
                }
                continue;
            }

            if let Some((name, annotation)) = key.split_once('@') {
                match annotation {
                    BIND_ANNOTATION => {
                        let value = map.next_value_seed(ResourceItemSeed)?;
                        node.nested.push(bind_info(name, value).map_err(A::Error::custom)?);
                    }
                    TYPE_ANNOTATION => {
                        let type_name: String = map.next_value()?;
                        property_types.push((String::from(name), strip_hash(type_name)));
                    }
                    _ => {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                continue;
            }

            let value = map.next_value_seed(ResourceItemSeed)?;
            match value {
                ResourceItem::Resource(_) => node.nested.push(NestedResourceInfo::single(key, value)),
                ResourceItem::ResourceSet(_) => {
                    node.nested
                        .push(NestedResourceInfo::collection(key, alloc::vec![value]));
                }
                _ => node.properties.push(PropertyNode { name: key, value }),
            }
        }

        for (name, type_name) in property_types {
            apply_property_type(&mut node, &name, type_name);
        }
        Ok(ResourceItem::Resource(node))
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn strip_hash(mut type_name: String) -> String {
    if type_name.starts_with('#') {
        type_name.remove(0);
    }
    type_name
}

/// Arrays holding structured items are resource sets, their inner literal
/// arrays become nested sets. Arrays of literals stay collections.
fn array_item(items: Vec<ResourceItem>) -> ResourceItem {
    let structured = items.iter().any(|item| {
        matches!(
            item,
            ResourceItem::Resource(_) | ResourceItem::ResourceSet(_) | ResourceItem::Collection(_)
        )
    });

    if !structured {
        return ResourceItem::Collection(CollectionNode::new(items));
    }

    let items = items
        .into_iter()
        .map(|item| match item {
            ResourceItem::Collection(list) => ResourceItem::ResourceSet(ResourceSetNode {
                type_name: list.type_name,
                items: list.items,
            }),
            other => other,
        })
        .collect();
    ResourceItem::ResourceSet(ResourceSetNode::new(items))
}

fn bind_info(name: &str, value: ResourceItem) -> Result<NestedResourceInfo, &'static str> {
    fn link(item: ResourceItem) -> Result<ResourceItem, &'static str> {
        match item {
            ResourceItem::Primitive(PrimitiveValue::String(url)) => {
                Ok(ResourceItem::ReferenceLink(ReferenceLink { url }))
            }
            _ => Err("`@odata.bind` expects an entity URL or a list of URLs"),
        }
    }

    match value {
        ResourceItem::Collection(list) => {
            let links = list.items.into_iter().map(link).collect::<Result<_, _>>()?;
            Ok(NestedResourceInfo::collection(name, links))
        }
        single => Ok(NestedResourceInfo::single(name, link(single)?)),
    }
}

/// Turns string values annotated with an enum type into enum nodes.
fn apply_property_type(node: &mut ResourceNode, name: &str, type_name: String) {
    let element = type_name
        .strip_prefix("Collection(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(&type_name);
    if element.starts_with("Edm.") {
        return;
    }
    let element = String::from(element);

    let Some(property) = node.properties.iter_mut().find(|p| p.name == name) else {
        return;
    };
    let value = core::mem::replace(&mut property.value, ResourceItem::Null);
    property.value = match value {
        ResourceItem::Primitive(PrimitiveValue::String(value)) => ResourceItem::Enum(EnumNode {
            type_name: Some(element),
            value,
        }),
        ResourceItem::Collection(list) => {
            let items = list
                .items
                .into_iter()
                .map(|item| match item {
                    ResourceItem::Primitive(PrimitiveValue::String(value)) => {
                        ResourceItem::Enum(EnumNode {
                            type_name: Some(element.clone()),
                            value,
                        })
                    }
                    other => other,
                })
                .collect();
            ResourceItem::Collection(CollectionNode {
                type_name: Some(type_name),
                items,
            })
        }
        other => other,
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ResourceItem {
        let mut de = serde_json::Deserializer::from_str(input);
        ResourceItemSeed.deserialize(&mut de).unwrap()
    }

    fn resource(input: &str) -> ResourceNode {
        match parse(input) {
            ResourceItem::Resource(node) => node,
            other => panic!("expected a resource, found {}", other.kind_name()),
        }
    }

    #[test]
    fn scalars_and_annotations() {
        let node = resource(
            r##"{
                "@odata.context": "$metadata#Products/$entity",
                "@odata.type": "#ODataDemo.Product",
                "ID": 7,
                "Name": "Bread",
                "Price": 2.5,
                "Discontinued": null,
                "Name@odata.etag": "W/\"1\""
            }"##,
        );

        assert_eq!(node.type_name.as_deref(), Some("ODataDemo.Product"));
        let names: Vec<&str> = node.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["ID", "Name", "Price", "Discontinued"]);
        assert_eq!(node.properties[0].value, ResourceItem::from(PrimitiveValue::Int(7)));
        assert!(node.properties[3].value.is_null());
        assert!(node.nested.is_empty());
    }

    #[test]
    fn binds_become_reference_links() {
        let node = resource(
            r#"{
                "Supplier@odata.bind": "Suppliers(42)",
                "Products@odata.bind": ["Products(1)", "Products(2)"]
            }"#,
        );

        assert_eq!(node.nested.len(), 2);
        assert!(!node.nested[0].is_collection);
        assert_eq!(
            node.nested[0].items,
            [ResourceItem::ReferenceLink(ReferenceLink::new("Suppliers(42)"))]
        );
        assert!(node.nested[1].is_collection);
        assert_eq!(node.nested[1].items.len(), 2);
    }

    #[test]
    fn bind_rejects_non_urls() {
        let mut de = serde_json::Deserializer::from_str(r#"{"Supplier@odata.bind": 42}"#);
        assert!(ResourceItemSeed.deserialize(&mut de).is_err());
    }

    #[test]
    fn enum_annotations_apply_in_any_order() {
        let node = resource(
            r##"{
                "Color": "Red",
                "Color@odata.type": "#ODataDemo.Color",
                "Patterns@odata.type": "#Collection(ODataDemo.Pattern)",
                "Patterns": ["Solid", "Striped"],
                "Count@odata.type": "#Edm.Int64",
                "Count": "12"
            }"##,
        );

        assert_eq!(
            node.properties[0].value,
            ResourceItem::Enum(EnumNode {
                type_name: Some(String::from("ODataDemo.Color")),
                value: String::from("Red"),
            })
        );
        let ResourceItem::Collection(patterns) = &node.properties[1].value else {
            panic!("expected a collection");
        };
        assert_eq!(patterns.type_name.as_deref(), Some("Collection(ODataDemo.Pattern)"));
        assert!(matches!(patterns.items[1], ResourceItem::Enum(_)));
        assert_eq!(
            node.properties[2].value,
            ResourceItem::from(PrimitiveValue::from("12"))
        );
    }

    #[test]
    fn nested_arrays_become_resource_sets() {
        let node = resource(r#"{"Aws": [[{"Aws/Name": [[true, 15]]}], {"Aws/Name": [[true, 15]]}]}"#);

        let info = &node.nested[0];
        assert!(info.is_collection);
        let [ResourceItem::ResourceSet(outer)] = info.items.as_slice() else {
            panic!("expected one resource set");
        };
        assert_eq!(outer.items.len(), 2);
        let ResourceItem::ResourceSet(first) = &outer.items[0] else {
            panic!("expected a nested set");
        };
        assert!(matches!(first.items[0], ResourceItem::Resource(_)));
        assert!(matches!(outer.items[1], ResourceItem::Resource(_)));
    }

    #[test]
    fn literal_arrays_stay_collections() {
        let node = resource(r#"{"Tags": ["a", null, "b"], "Empty": []}"#);
        let ResourceItem::Collection(tags) = &node.properties[0].value else {
            panic!("expected a collection");
        };
        assert_eq!(tags.items.len(), 3);
        assert!(tags.items[1].is_null());
        assert_eq!(node.properties[1].value, ResourceItem::Collection(CollectionNode::default()));
    }

    #[test]
    fn reads_other_formats() {
        let input = r#"{"ID": 3, "Name": "Milk", "Address": {"City": "Oslo"}}"#;
        let mut de = ron::Deserializer::from_str(input).unwrap();
        let ResourceItem::Resource(node) = ResourceItemSeed.deserialize(&mut de).unwrap() else {
            panic!("expected a resource");
        };

        assert_eq!(node.properties.len(), 2);
        assert_eq!(node.nested[0].name, "Address");
    }
}
