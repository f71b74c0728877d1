use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use od_edm::info::{EdmTypeRef, EnumType};
use od_edm::value::{EdmEnumValue, PrimitiveValue, Value};

use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::tree::ResourceItem;
use crate::{DeserializeError, ReadContext};

/// Reads enum members by name, by underlying value, or as a flags list.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use od_edm::info::{EdmTypeRef, EnumType};
/// use od_edm::registry::EdmModel;
/// use od_edm::value::PrimitiveValue;
/// use od_formatter::ReadContext;
/// use od_formatter::de::{DeserializerProvider, EdmTypeDeserializer, EnumDeserializer};
///
/// let mut model = EdmModel::new();
/// model.add_enum_type(
///     EnumType::new("NS.Access")
///         .with_member("Read", 1)
///         .with_member("Write", 2)
///         .with_flags(true),
/// );
/// let ctx = ReadContext::new().with_model(Arc::new(model));
/// let provider = DeserializerProvider::new();
/// let access = EdmTypeRef::enumeration("NS.Access");
///
/// let value = EnumDeserializer
///     .read_inline(PrimitiveValue::Int(3).into(), &access, &provider, &ctx)
///     .unwrap();
/// assert_eq!(value.as_enum().unwrap().value(), "Read,Write");
///
/// let value = EnumDeserializer
///     .read_inline(PrimitiveValue::from("Write, Read").into(), &access, &provider, &ctx)
///     .unwrap();
/// assert_eq!(value.as_enum().unwrap().value(), "Write,Read");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumDeserializer;

impl EdmTypeDeserializer for EnumDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Property
    }

    fn read_inline(
        &self,
        item: ResourceItem,
        edm_type: &EdmTypeRef,
        _provider: &DeserializerProvider,
        ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        let Some(name) = edm_type.enum_name() else {
            return Err(DeserializeError::argument(
                "edm_type",
                format!("The type '{edm_type}' is not an enum type."),
            ));
        };
        let model = ctx.require_model()?;
        let Some(enum_type) = model.find_enum(name) else {
            return Err(DeserializeError::schema(format!(
                "Cannot find the enum type '{name}' in the model."
            )));
        };

        let members = match item {
            ResourceItem::Null => return Ok(Value::Null),
            ResourceItem::Enum(node) => members_by_name(enum_type, &node.value),
            ResourceItem::Primitive(PrimitiveValue::String(text)) => members_by_name(enum_type, &text),
            ResourceItem::Primitive(PrimitiveValue::Int(value)) => members_by_value(enum_type, value),
            ResourceItem::Primitive(other) => Err(format!("{other}")),
            other => {
                return Err(DeserializeError::schema(format!(
                    "Cannot convert a {} to the enum type '{name}'.",
                    other.kind_name()
                )));
            }
        };

        match members {
            Ok(members) => Ok(Value::Enum(EdmEnumValue::new(name, members))),
            Err(literal) => Err(DeserializeError::schema(format!(
                "Cannot convert the literal '{literal}' to the enum type '{name}'."
            ))),
        }
    }
}

/// Validates a member name or a comma-separated flags list.
fn members_by_name(enum_type: &EnumType, text: &str) -> Result<String, String> {
    let mut names = Vec::new();
    for part in text.split(',').map(str::trim) {
        let member = match part.parse::<i64>() {
            Ok(value) => enum_type.member_by_value(value),
            Err(_) => enum_type.member(part),
        };
        match member {
            Some(member) => names.push(member.name()),
            None => return Err(String::from(text)),
        }
    }
    if names.len() > 1 && !enum_type.is_flags() {
        return Err(String::from(text));
    }
    Ok(names.join(","))
}

/// Maps an underlying value to a member, or to a flags combination.
fn members_by_value(enum_type: &EnumType, value: i64) -> Result<String, String> {
    if let Some(member) = enum_type.member_by_value(value) {
        return Ok(String::from(member.name()));
    }
    if enum_type.is_flags() {
        let mut rest = value;
        let mut names = Vec::new();
        for member in enum_type.members() {
            let bits = member.value();
            if bits != 0 && value & bits == bits {
                names.push(member.name());
                rest &= !bits;
            }
        }
        if rest == 0 && !names.is_empty() {
            return Ok(names.join(","));
        }
    }
    Err(format!("{value}"))
}

// -----------------------------------------------------------------------------
// Tests
