use alloc::format;

use od_edm::info::{EdmTypeRef, PrimitiveKind};
use od_edm::value::{PrimitiveValue, Value};

use crate::de::{DeserializerProvider, EdmTypeDeserializer, PayloadKind};
use crate::tree::ResourceItem;
use crate::{DeserializeError, ReadContext};

/// Reads primitive literals, checked against the declared kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveDeserializer;

impl EdmTypeDeserializer for PrimitiveDeserializer {
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Property
    }

    fn read_inline(
        &self,
        item: ResourceItem,
        edm_type: &EdmTypeRef,
        _provider: &DeserializerProvider,
        _ctx: &ReadContext,
    ) -> Result<Value, DeserializeError> {
        let Some(kind) = edm_type.primitive_kind() else {
            return Err(DeserializeError::argument(
                "edm_type",
                format!("The type '{edm_type}' is not a primitive type."),
            ));
        };

        match item {
            ResourceItem::Null => Ok(Value::Null),
            ResourceItem::Primitive(value) => convert_primitive(value, kind).map(Value::Primitive),
            other => Err(DeserializeError::schema(format!(
                "Cannot convert a {} to the expected type '{kind}'.",
                other.kind_name()
            ))),
        }
    }
}

/// Coerces a wire literal to `kind`.
///
/// - Integral kinds are range checked. Floats without a fraction are accepted.
/// - Floating kinds accept integers, numeric strings and `INF`, `-INF`, `NaN`.
/// - `Int64` also accepts numeric strings.
/// - `Guid` strings must have the `8-4-4-4-12` hex shape.
/// - Other textual kinds and `Binary` keep their string form.
///
/// ```
/// use od_edm::info::PrimitiveKind;
/// use od_edm::value::PrimitiveValue;
/// use od_formatter::de::convert_primitive;
///
/// let byte = convert_primitive(PrimitiveValue::Int(255), PrimitiveKind::Byte).unwrap();
/// assert_eq!(byte, PrimitiveValue::Int(255));
/// assert!(convert_primitive(PrimitiveValue::Int(256), PrimitiveKind::Byte).is_err());
///
/// let big = convert_primitive(PrimitiveValue::from("9007199254740993"), PrimitiveKind::Int64).unwrap();
/// assert_eq!(big, PrimitiveValue::Int(9_007_199_254_740_993));
///
/// let inf = convert_primitive(PrimitiveValue::from("-INF"), PrimitiveKind::Double).unwrap();
/// assert_eq!(inf, PrimitiveValue::Float(f64::NEG_INFINITY));
/// ```
pub fn convert_primitive(value: PrimitiveValue, kind: PrimitiveKind) -> Result<PrimitiveValue, DeserializeError> {
    let converted = match (kind, &value) {
        (PrimitiveKind::Boolean, PrimitiveValue::Boolean(_)) => Some(value.clone()),
        (_, PrimitiveValue::Int(v)) if kind.integral_range().is_some() => {
            integral(*v, kind).map(PrimitiveValue::Int)
        }
        (_, PrimitiveValue::Float(v)) if kind.integral_range().is_some() => {
            integral_float(*v).and_then(|v| integral(v, kind)).map(PrimitiveValue::Int)
        }
        (PrimitiveKind::Int64, PrimitiveValue::String(s)) => s.trim().parse().ok().map(PrimitiveValue::Int),
        (_, PrimitiveValue::Int(v)) if kind.is_floating() => Some(PrimitiveValue::Float(*v as f64)),
        (_, PrimitiveValue::Float(v)) if kind.is_floating() => Some(PrimitiveValue::Float(*v)),
        (_, PrimitiveValue::String(s)) if kind.is_floating() => floating(s).map(PrimitiveValue::Float),
        (PrimitiveKind::Guid, PrimitiveValue::String(s)) => is_guid(s).then(|| value.clone()),
        (PrimitiveKind::Binary, PrimitiveValue::Binary(_) | PrimitiveValue::String(_)) => {
            Some(value.clone())
        }
        (_, PrimitiveValue::String(_)) if kind.is_textual() => Some(value.clone()),
        _ => None,
    };

    converted.ok_or_else(|| {
        DeserializeError::schema(format!(
            "Cannot convert the literal '{value}' to the expected type '{kind}'."
        ))
    })
}

fn integral(v: i64, kind: PrimitiveKind) -> Option<i64> {
    let (min, max) = kind.integral_range()?;
    (min..=max).contains(&v).then_some(v)
}

fn integral_float(v: f64) -> Option<i64> {
    if v.is_finite() && v == (v as i64) as f64 {
        Some(v as i64)
    } else {
        None
    }
}

fn floating(s: &str) -> Option<f64> {
    match s.trim() {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

pub(crate) fn is_guid(s: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];
    let mut parts = s.split('-');
    for len in GROUPS {
        match parts.next() {
            Some(part) if part.len() == len && part.bytes().all(|b| b.is_ascii_hexdigit()) => {}
            _ => return false,
        }
    }
    parts.next().is_none()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn integral_ranges() {
        assert_eq!(convert_primitive(PrimitiveValue::Int(-128), PrimitiveKind::SByte).ok(), Some(PrimitiveValue::Int(-128)));
        assert!(convert_primitive(PrimitiveValue::Int(-129), PrimitiveKind::SByte).is_err());
        assert!(convert_primitive(PrimitiveValue::Int(40_000), PrimitiveKind::Int16).is_err());
        assert_eq!(
            convert_primitive(PrimitiveValue::Float(3.0), PrimitiveKind::Int32).ok(),
            Some(PrimitiveValue::Int(3))
        );
        assert!(convert_primitive(PrimitiveValue::Float(3.5), PrimitiveKind::Int32).is_err());
    }

    #[test]
    fn floating_kinds_widen() {
        assert_eq!(
            convert_primitive(PrimitiveValue::Int(2), PrimitiveKind::Decimal).ok(),
            Some(PrimitiveValue::Float(2.0))
        );
        assert_eq!(
            convert_primitive(PrimitiveValue::from("2.25"), PrimitiveKind::Decimal).ok(),
            Some(PrimitiveValue::Float(2.25))
        );
        let nan = convert_primitive(PrimitiveValue::from("NaN"), PrimitiveKind::Single).unwrap();
        assert!(nan.as_f64().unwrap().is_nan());
    }

    #[test]
    fn textual_kinds() {
        let guid = PrimitiveValue::from("21EC2020-3AEA-1069-A2DD-08002B30309D");
        assert_eq!(convert_primitive(guid.clone(), PrimitiveKind::Guid).ok(), Some(guid));
        assert!(convert_primitive(PrimitiveValue::from("21EC2020"), PrimitiveKind::Guid).is_err());

        let date = PrimitiveValue::from("2008-01-01T00:00:00Z");
        assert!(convert_primitive(date, PrimitiveKind::DateTimeOffset).is_ok());
        assert!(convert_primitive(PrimitiveValue::Int(1), PrimitiveKind::String).is_err());
    }

    #[test]
    fn mismatch_message() {
        let err = convert_primitive(PrimitiveValue::from("x"), PrimitiveKind::Boolean).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot convert the literal 'x' to the expected type 'Edm.Boolean'."
        );
    }
}
