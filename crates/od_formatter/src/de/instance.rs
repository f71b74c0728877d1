use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use od_edm::info::EdmTypeRef;
use od_edm::registry::{EdmModel, RuntimeType};
use od_edm::value::{EdmObject, Value};

use crate::{DeserializeError, ReadContext, ReadMode};

/// Creates the empty container a resource of `edm_type` is read into.
///
/// The first match wins:
///
/// 1. `Edm.Untyped` gives an untyped [`EdmObject`].
/// 2. [`ReadMode::Delta`] gives a `Delta<T>` of the mapped runtime type that
///    allows updates to every declared property, inherited ones included.
/// 3. [`ReadMode::Typeless`] gives an [`EdmObject`] tagged with `edm_type`.
/// 4. Otherwise the mapped runtime type is constructed.
///
/// # Errors
///
/// - `ArgumentInvalid` if the model is missing or `edm_type` is not structured.
/// - `SchemaError` if the type is abstract or has no runtime mapping.
pub fn create_instance(edm_type: &EdmTypeRef, ctx: &ReadContext) -> Result<Value, DeserializeError> {
    if edm_type.is_untyped() {
        return Ok(Value::Object(EdmObject::untyped()));
    }

    let model = ctx.require_model()?;
    let Some(name) = edm_type.structured_name() else {
        return Err(DeserializeError::argument(
            "edm_type",
            format!("The type '{edm_type}' is not an entity or complex type."),
        ));
    };
    if model.is_abstract(name) {
        return Err(abstract_type_error(name));
    }

    match ctx.mode() {
        ReadMode::Delta => {
            let runtime = runtime_type(model, name)?;
            let updatable: Vec<Arc<str>> = model
                .declared_properties(name)
                .map(|property| property.name_arc().clone())
                .collect();
            Ok(Value::Delta(runtime.construct_delta(updatable)))
        }
        ReadMode::Typeless => Ok(Value::Object(EdmObject::new(edm_type.clone()))),
        ReadMode::Typed => Ok(Value::Resource(runtime_type(model, name)?.construct())),
    }
}

pub(crate) fn runtime_type<'a>(model: &'a EdmModel, name: &str) -> Result<&'a RuntimeType, DeserializeError> {
    model.runtime_type_mapping(name).ok_or_else(|| {
        DeserializeError::schema(format!(
            "The provided mapping does not contain a resource for the resource type '{name}'."
        ))
    })
}

pub(crate) fn abstract_type_error(name: &str) -> DeserializeError {
    DeserializeError::schema(format!(
        "An instance of the abstract resource type '{name}' was found. \
         Abstract resource types cannot be instantiated."
    ))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::de::tests::fixtures::{self, Product};

    #[test]
    fn untyped_needs_no_model() {
        let value = create_instance(&EdmTypeRef::untyped(), &ReadContext::new()).unwrap();
        assert_eq!(value.as_object().unwrap().type_ref().full_name(), "Edm.Untyped");
    }

    #[test]
    fn typed_mode_constructs_the_runtime_type() {
        let value = create_instance(&fixtures::product_type(), &fixtures::context()).unwrap();
        assert!(value.as_resource::<Product>().is_some());
    }

    #[test]
    fn delta_mode_allows_every_declared_property() {
        let ctx = fixtures::context().with_mode(ReadMode::Delta);
        let value = create_instance(&fixtures::featured_product_type(), &ctx).unwrap();

        let delta = value.as_delta().unwrap();
        assert!(delta.changed_property_names().is_empty());
        let unchanged = delta.unchanged_property_names();
        assert_eq!(unchanged.first(), Some(&"ID"));
        assert!(unchanged.contains(&"Headline"));
    }

    #[test]
    fn typeless_mode_tags_the_object() {
        let ctx = fixtures::context().with_mode(ReadMode::Typeless);
        let value = create_instance(&fixtures::address_type(), &ctx).unwrap();
        assert!(value.as_object().unwrap().is_complex());
    }

    #[test]
    fn failures() {
        let ctx = fixtures::context();

        let err = create_instance(&fixtures::product_type(), &ReadContext::new()).unwrap_err();
        assert!(matches!(err, DeserializeError::ArgumentInvalid { argument: "model", .. }));

        let err = create_instance(&EdmTypeRef::entity("ODataDemo.Shape"), &ctx).unwrap_err();
        assert!(err.to_string().contains("abstract resource type 'ODataDemo.Shape'"));

        let err = create_instance(&EdmTypeRef::entity("ODataDemo.Unmapped"), &ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The provided mapping does not contain a resource for the resource type 'ODataDemo.Unmapped'."
        );
    }
}
