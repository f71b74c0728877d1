
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use od_edm::info::EdmTypeRef;
use od_edm::value::{EdmEnumValue, EdmObject, PrimitiveValue, Value};
use serde_core::de::DeserializeSeed;

use self::fixtures::{Customer, FeaturedProduct, Person, Product, SpecialCustomer, Supplier};
use crate::de::{DeserializerKind, DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::de::ResourceDeserializer;
use crate::reader::ResourceItemSeed;
use crate::tree::ResourceItem;
use crate::{DeserializeError, ReadContext, ReadMode};

fn parse(json: &str) -> ResourceItem {
    let mut de = serde_json::Deserializer::from_str(json);
    ResourceItemSeed.deserialize(&mut de).unwrap()
}

fn read(json: &str, type_name: &str, ctx: &ReadContext) -> Result<Value, DeserializeError> {
    ResourceDeserializer.read_inline(
        parse(json),
        &EdmTypeRef::entity(type_name),
        &DeserializerProvider::new(),
        ctx,
    )
}

// -----------------------------------------------------------------------------
// Typed reads

#[test]
fn typed_product_with_nested_resources() {
    let value = read(
        r#"{
            "ID": 1,
            "Name": "Bread",
            "Price": 2.5,
            "Rating": 4,
            "Category": { "ID": 7, "Name": "Food" },
            "Supplier": {
                "ID": 3,
                "Address": { "City": "Redmond", "Country": "USA" }
            }
        }"#,
        "ODataDemo.Product",
        &fixtures::context(),
    )
    .unwrap();

    let product = value.into_resource::<Product>().unwrap();
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Bread");
    assert_eq!(product.price, 2.5);
    assert_eq!(product.category.as_ref().map(|c| c.name.as_str()), Some("Food"));

    let supplier = product.supplier.unwrap();
    assert_eq!(supplier.id, 3);
    let address = supplier.address.unwrap();
    assert_eq!(address.city, "Redmond");
    assert_eq!(address.country, "USA");
}

#[test]
fn derived_type_is_read_from_the_type_annotation() {
    let value = read(
        r##"{"@odata.type": "#ODataDemo.FeaturedProduct", "ID": 2, "Headline": "New!"}"##,
        "ODataDemo.Product",
        &fixtures::context(),
    )
    .unwrap();

    let featured = value.into_resource::<FeaturedProduct>().unwrap();
    assert_eq!(featured.product.id, 2);
    assert_eq!(featured.headline, "New!");
}

#[test]
fn unknown_derived_type() {
    let err = read(
        r##"{"@odata.type": "#ODataDemo.Gadget", "ID": 2}"##,
        "ODataDemo.Product",
        &fixtures::context(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Cannot find the resource type 'ODataDemo.Gadget' in the model.");
}

#[test]
fn abstract_types_are_rejected() {
    let err = read(r#"{"ID": 1}"#, "ODataDemo.Shape", &fixtures::context()).unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaError(_)));
    assert!(err.to_string().contains("abstract resource type 'ODataDemo.Shape'"));
}

#[test]
fn resources_require_a_resource_item() {
    let err = ResourceDeserializer
        .read_inline(
            PrimitiveValue::from(7).into(),
            &fixtures::product_type(),
            &DeserializerProvider::new(),
            &fixtures::context(),
        )
        .unwrap_err();
    assert!(matches!(err, DeserializeError::ArgumentInvalid { argument: "item", .. }));

    let err = ResourceDeserializer
        .read_inline(
            parse(r#"{"ID": 1}"#),
            &EdmTypeRef::primitive(od_edm::info::PrimitiveKind::Int32),
            &DeserializerProvider::new(),
            &fixtures::context(),
        )
        .unwrap_err();
    assert!(matches!(err, DeserializeError::ArgumentInvalid { argument: "edm_type", .. }));
}

#[test]
fn closed_types_reject_unknown_properties() {
    let err = read(r#"{"ID": 1, "Weight": 3}"#, "ODataDemo.Product", &fixtures::context()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The property 'Weight' does not exist on type 'ODataDemo.Product'. Make sure to only use \
         property names that are defined by the type or mark the type as open type."
    );

    let err = read(r#"{"ID": 1, "Maker": {"Name": "x"}}"#, "ODataDemo.Product", &fixtures::context())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot find nested property 'Maker' on the resource type 'ODataDemo.Product'."
    );
}

#[test]
fn invalid_values_name_the_property() {
    let err = read(r#"{"ID": 1, "Rating": 3000000000}"#, "ODataDemo.Product", &fixtures::context())
        .unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaError(_)));

    let err = read(r#"{"ID": 1, "Name": 12}"#, "ODataDemo.Product", &fixtures::context()).unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaError(_)));
}

// -----------------------------------------------------------------------------
// Open types

#[test]
fn open_type_collects_dynamic_properties() {
    let value = read(
        r##"{
            "ID": 1,
            "Name": "Ann",
            "Color": "Blue",
            "Rank": 3,
            "Tag": "vip",
            "Favorite@odata.type": "#ODataDemo.Color",
            "Favorite": "Red"
        }"##,
        "ODataDemo.Customer",
        &fixtures::context(),
    )
    .unwrap();

    let customer = value.into_resource::<Customer>().unwrap();
    assert_eq!(customer.color.as_deref(), Some("Blue"));
    assert_eq!(customer.bag.len(), 3);

    let names: Vec<&str> = customer.bag.keys().collect();
    assert_eq!(names, ["Rank", "Tag", "Favorite"]);
    assert_eq!(customer.bag.get("Rank"), Some(&Value::from(3)));
    assert_eq!(
        customer.bag.get("Favorite"),
        Some(&Value::Enum(EdmEnumValue::new("ODataDemo.Color", "Red")))
    );
}

#[test]
fn derived_types_inherit_openness() {
    let value = read(
        r##"{"@odata.type": "#ODataDemo.SpecialCustomer", "ID": 5, "Level": 2, "Since": 2019}"##,
        "ODataDemo.Customer",
        &fixtures::context(),
    )
    .unwrap();

    let special = value.into_resource::<SpecialCustomer>().unwrap();
    assert_eq!(special.level, 2);
    assert_eq!(special.customer.id, 5);
    assert_eq!(special.customer.bag.get("Since"), Some(&Value::from(2019)));
}

#[test]
fn open_type_without_a_container() {
    let err = read(r#"{"ID": 1, "Nick": "p"}"#, "ODataDemo.Person", &fixtures::context()).unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaError(_)));
}

#[test]
fn aliased_properties() {
    let value = read(
        r#"{"ID": 1, "Orders": [{"ID": 10, "Amount": 5}, {"ID": 11, "Amount": 7.5}]}"#,
        "ODataDemo.Customer",
        &fixtures::context(),
    )
    .unwrap();

    let customer = value.into_resource::<Customer>().unwrap();
    let ids: Vec<i32> = customer.orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, [10, 11]);
    assert_eq!(customer.orders[1].amount, 7.5);
}

// -----------------------------------------------------------------------------
// Delta and typeless reads

#[test]
fn delta_tracks_changed_properties() {
    let ctx = fixtures::context().with_mode(ReadMode::Delta);
    let value = ResourceDeserializer
        .read_inline(
            parse(r#"{"ID": 3, "Name": "Acme", "Address": {"City": "Oslo"}}"#),
            &EdmTypeRef::entity("ODataDemo.Supplier"),
            &DeserializerProvider::new(),
            &ctx,
        )
        .unwrap();

    let delta = value.into_delta::<Supplier>().unwrap();
    assert_eq!(delta.changed_property_names(), ["ID", "Name", "Address"]);
    assert_eq!(delta.unchanged_property_names(), ["Products"]);
    assert_eq!(delta.instance().name, "Acme");
    assert_eq!(delta.instance().address.as_ref().map(|a| a.city.as_str()), Some("Oslo"));
}

#[test]
fn typeless_reads_build_objects() {
    let ctx = fixtures::context().with_mode(ReadMode::Typeless);
    let value = read(
        r#"{"ID": 3, "Name": "Acme", "Address": {"City": "Oslo"}}"#,
        "ODataDemo.Supplier",
        &ctx,
    )
    .unwrap();

    let supplier = value.as_object().unwrap();
    assert!(supplier.is_entity());
    assert_eq!(supplier.type_ref().full_name(), "ODataDemo.Supplier");
    assert_eq!(supplier.property("ID"), Some(&Value::from(3)));

    let address = supplier.property("Address").unwrap().as_object().unwrap();
    assert!(address.is_complex());
    assert_eq!(address.property("City"), Some(&Value::from("Oslo")));
}

// -----------------------------------------------------------------------------
// Reference links

#[test]
fn reference_links_become_key_only_instances() {
    let value = read(
        r#"{
            "ID": 1,
            "Supplier@odata.bind": "http://localhost/odata/Suppliers(42)"
        }"#,
        "ODataDemo.Product",
        &fixtures::context(),
    )
    .unwrap();

    let product = value.into_resource::<Product>().unwrap();
    let supplier = product.supplier.unwrap();
    assert_eq!(supplier.id, 42);
    assert!(supplier.name.is_empty());
}

#[test]
fn collection_reference_links() {
    let value = read(
        r#"{"ID": 7, "Products@odata.bind": ["Products(1)", "Products(2)"]}"#,
        "ODataDemo.Category",
        &fixtures::context(),
    )
    .unwrap();

    let category = value.into_resource::<fixtures::Category>().unwrap();
    let ids: Vec<i32> = category.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn many_links_on_a_single_navigation_property() {
    let err = read(
        r#"{"ID": 1, "Supplier@odata.bind": ["Suppliers(1)", "Suppliers(2)"]}"#,
        "ODataDemo.Product",
        &fixtures::context(),
    )
    .unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaError(_)));
}

// -----------------------------------------------------------------------------
// Untyped values

#[test]
fn untyped_values_keep_their_shape() {
    let value = read(
        r#"{
            "ID": 1,
            "Data": {"Data_ID": 42, "Aws": [true, 15]},
            "Sources": [[{"Aws/Name": [[true, 15]]}], {"Aws/Name": [[true, 15]]}]
        }"#,
        "ODataDemo.Person",
        &fixtures::context(),
    )
    .unwrap();

    let person = value.into_resource::<Person>().unwrap();

    let data = person.data.as_ref().unwrap().as_object().unwrap();
    assert!(data.is_untyped());
    assert_eq!(data.property("Data_ID"), Some(&Value::from(42)));
    assert_eq!(data.property("Aws").unwrap().as_collection().unwrap().len(), 2);

    let sources = person.sources.as_ref().unwrap().as_collection().unwrap();
    assert!(sources.element_type().is_untyped());
    assert_eq!(sources.len(), 2);

    let first = sources.get(0).unwrap().as_collection().unwrap();
    let inner = first.get(0).unwrap().as_object().unwrap();
    let name = inner.property("Aws/Name").unwrap().as_collection().unwrap();
    let pair = name.get(0).unwrap().as_collection().unwrap();
    assert_eq!(pair.get(0), Some(&Value::from(true)));
    assert_eq!(pair.get(1), Some(&Value::from(15)));

    let second = sources.get(1).unwrap().as_object().unwrap();
    assert!(second.is_untyped());
}

#[test]
fn dynamic_nested_values_are_untyped() {
    let ctx = fixtures::context().with_mode(ReadMode::Typeless);
    let value = read(
        r#"{"ID": 1, "Profile": {"Age": 30}, "Aliases": [{"Name": "a"}, {"Name": "b"}]}"#,
        "ODataDemo.Customer",
        &ctx,
    )
    .unwrap();

    let customer = value.as_object().unwrap();
    let profile = customer.property("Profile").unwrap().as_object().unwrap();
    assert!(profile.is_untyped());
    assert_eq!(profile.property("Age"), Some(&Value::from(30)));

    let aliases = customer.property("Aliases").unwrap().as_collection().unwrap();
    assert_eq!(aliases.len(), 2);
    let second = aliases.get(1).unwrap().as_object().unwrap();
    assert_eq!(second.property("Name"), Some(&Value::from("b")));
}

#[test]
fn declared_and_dynamic_untyped_values_match() {
    const SOURCES: &str = r#"[[{"Aws/Name": [[true, 15]]}], {"Aws/Name": [[true, 15]]}]"#;

    let person = read(
        &alloc::format!(r#"{{"ID": 1, "Sources": {SOURCES}}}"#),
        "ODataDemo.Person",
        &fixtures::context(),
    )
    .unwrap()
    .into_resource::<Person>()
    .unwrap();
    let declared = person.sources.unwrap();

    let customer = read(
        &alloc::format!(r#"{{"ID": 2, "Sources": {SOURCES}}}"#),
        "ODataDemo.Customer",
        &fixtures::context(),
    )
    .unwrap()
    .into_resource::<Customer>()
    .unwrap();
    let dynamic = customer.bag.get("Sources").unwrap();

    assert_eq!(&declared, dynamic);

    let outer = dynamic.as_collection().unwrap();
    assert_eq!(outer.len(), 2);
    let first = outer.get(0).unwrap().as_collection().unwrap();
    assert_eq!(first.len(), 1);
    let inner = first.get(0).unwrap().as_object().unwrap();
    let second = outer.get(1).unwrap().as_object().unwrap();
    assert_eq!(inner, second);

    let name = second.property("Aws/Name").unwrap().as_collection().unwrap();
    assert_eq!(name.len(), 1);
    let pair = name.get(0).unwrap().as_collection().unwrap();
    assert_eq!(pair.get(0), Some(&Value::from(true)));
    assert_eq!(pair.get(1), Some(&Value::from(15)));
}

#[test]
fn single_resource_collection_infos_match() {
    use crate::tree::{NestedResourceInfo, ResourceNode};

    let item = || -> ResourceItem {
        ResourceNode::new().with_property("A", PrimitiveValue::from(1)).into()
    };
    let ctx = fixtures::context().with_mode(ReadMode::Typeless);
    let payload = ResourceNode::new()
        .with_property("ID", PrimitiveValue::from(1))
        .with_nested(NestedResourceInfo::collection("Sources", alloc::vec![item()]));
    let person = ResourceDeserializer
        .read_inline(payload.into(), &EdmTypeRef::entity("ODataDemo.Person"), &DeserializerProvider::new(), &ctx)
        .unwrap();

    let payload = ResourceNode::new()
        .with_property("ID", PrimitiveValue::from(2))
        .with_nested(NestedResourceInfo::collection("Dyn", alloc::vec![item()]));
    let customer = ResourceDeserializer
        .read_inline(payload.into(), &EdmTypeRef::entity("ODataDemo.Customer"), &DeserializerProvider::new(), &ctx)
        .unwrap();

    let declared = person.as_object().unwrap().property("Sources").unwrap();
    let dynamic = customer.as_object().unwrap().property("Dyn").unwrap();
    assert_eq!(declared, dynamic);
    assert_eq!(dynamic.as_collection().unwrap().len(), 1);
}

// -----------------------------------------------------------------------------
// Dispatch

/// Stands in for the resource deserializer and records what it was asked for.
struct Marker;

impl EdmTypeDeserializer for Marker {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Resource
    }

    fn read_inline(
        &self,
        _item: ResourceItem,
        edm_type: &EdmTypeRef,
        _provider: &DeserializerProvider,
        _ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        let mut object = EdmObject::untyped();
        object.set_property("dispatched", Value::from(String::from(edm_type.full_name())));
        Ok(Value::Object(object))
    }
}

#[test]
fn derived_types_are_dispatched_through_the_provider() {
    let mut provider = DeserializerProvider::new();
    provider.register(DeserializerKind::Resource, Marker);

    let item = parse(r##"{"@odata.type": "#ODataDemo.FeaturedProduct", "ID": 2}"##);
    let value = ResourceDeserializer
        .read_inline(item, &fixtures::product_type(), &provider, &fixtures::context())
        .unwrap();

    let object = value.as_object().unwrap();
    assert_eq!(
        object.property("dispatched"),
        Some(&Value::from("ODataDemo.FeaturedProduct"))
    );
}

#[test]
fn resource_sets_keep_order_and_nulls() {
    let provider = DeserializerProvider::new();
    let products = EdmTypeRef::collection(fixtures::product_type());
    let deserializer = provider.resolve(&products).unwrap();
    assert_eq!(deserializer.payload_kind(), PayloadKind::ResourceSet);

    let value = deserializer
        .read_inline(
            parse(r##"[{"ID": 3}, null, {"@odata.type": "#ODataDemo.FeaturedProduct", "ID": 1}]"##),
            &products,
            &provider,
            &fixtures::context(),
        )
        .unwrap();

    let list = value.as_collection().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(0).unwrap().as_resource::<Product>().map(|p| p.id), Some(3));
    assert!(list.get(1).unwrap().is_null());
    assert!(list.get(2).unwrap().as_resource::<FeaturedProduct>().is_some());
}

#[test]
fn enum_flags_are_normalized() {
    let provider = DeserializerProvider::new();
    let pattern = EdmTypeRef::enumeration("ODataDemo.Pattern");
    let value = provider
        .resolve(&pattern)
        .unwrap()
        .read_inline(
            PrimitiveValue::from("Solid, Dashed").into(),
            &pattern,
            &provider,
            &fixtures::context(),
        )
        .unwrap();
    assert_eq!(value, Value::Enum(EdmEnumValue::new("ODataDemo.Pattern", "Solid,Dashed")));

    let value = provider
        .resolve(&pattern)
        .unwrap()
        .read_inline(PrimitiveValue::Int(6).into(), &pattern, &provider, &fixtures::context())
        .unwrap();
    assert_eq!(value.as_enum().unwrap().value(), "Dotted,Dashed");
}

#[test]
fn missing_model() {
    let err = read(r#"{"ID": 1}"#, "ODataDemo.Product", &ReadContext::new()).unwrap_err();
    assert!(matches!(err, DeserializeError::ArgumentInvalid { argument: "model", .. }));
}

// -----------------------------------------------------------------------------
// Top-level reads

#[cfg(all(feature = "std", feature = "json"))]
mod stream {
    use core::any::TypeId;

    use futures_lite::future::block_on;
    use futures_lite::io::Cursor;
    use od_edm::value::Delta;

    use super::*;
    use crate::path::ODataPath;
    use crate::reader::JsonPayloadReader;

    fn read_stream(json: &str, type_id: TypeId, ctx: &ReadContext) -> Result<Value, DeserializeError> {
        let stream = Cursor::new(json.as_bytes().to_vec());
        block_on(ResourceDeserializer.read(
            stream,
            type_id,
            &JsonPayloadReader,
            &DeserializerProvider::new(),
            ctx,
        ))
    }

    #[test]
    fn reads_a_typed_entity() {
        let ctx = fixtures::context().with_path(ODataPath::entity_set("Products"));
        let value = read_stream(r#"{"ID": 8, "Name": "Milk"}"#, TypeId::of::<Product>(), &ctx).unwrap();
        assert_eq!(value.into_resource::<Product>().unwrap().name, "Milk");
    }

    #[test]
    fn delta_type_selects_delta_mode() {
        let ctx = fixtures::context().with_path(ODataPath::singleton("Me"));
        let value = read_stream(r#"{"Name": "Ann"}"#, TypeId::of::<Delta<Customer>>(), &ctx).unwrap();
        let delta = value.into_delta::<Customer>().unwrap();
        assert_eq!(delta.changed_property_names(), ["Name"]);
    }

    #[test]
    fn object_type_selects_typeless_mode() {
        let ctx = fixtures::context().with_path(
            ODataPath::entity_set("Categories").with_key("1").with_navigation("Products"),
        );
        let value = read_stream(r#"{"ID": 4}"#, TypeId::of::<EdmObject>(), &ctx).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.type_ref().full_name(), "ODataDemo.Product");
    }

    #[test]
    fn path_errors() {
        let err = read_stream("{}", TypeId::of::<Product>(), &fixtures::context()).unwrap_err();
        assert!(err.to_string().contains("no ODataPath is available"));

        let ctx = fixtures::context().with_path(ODataPath::entity_set("Widgets"));
        let err = read_stream("{}", TypeId::of::<Product>(), &ctx).unwrap_err();
        assert!(err.to_string().contains("The related entity set or singleton cannot be found"));

        let ctx = fixtures::context().with_path(ODataPath::entity_set("Products"));
        let err = read_stream("{}", TypeId::of::<u128>(), &ctx).unwrap_err();
        assert!(matches!(err, DeserializeError::UnsupportedType(_)));
    }

    #[test]
    fn malformed_payload() {
        let ctx = fixtures::context().with_path(ODataPath::entity_set("Products"));
        let err = read_stream(r#"{"ID": "#, TypeId::of::<Product>(), &ctx).unwrap_err();
        assert!(matches!(err, DeserializeError::Payload(_)));
    }
}
