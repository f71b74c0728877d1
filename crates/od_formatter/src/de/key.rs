//! Key segments of entity URLs, as found in reference links.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use od_edm::value::PrimitiveValue;

use crate::DeserializeError;

/// One key value, named for composite keys (`OrderID=1,ItemID=2`).
pub(crate) type KeyValue = (Option<String>, PrimitiveValue);

/// Parses the key of the last segment of `url`.
///
/// Query and fragment are ignored. Values are typed by their literal form:
/// quoted strings (with `''` escaping a quote), `true`/`false`, integers and
/// decimals. GUIDs and other bare literals are kept as strings.
pub(crate) fn parse_entity_keys(url: &str) -> Result<Vec<KeyValue>, DeserializeError> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or_default();

    let (Some(open), true) = (segment.find('('), segment.ends_with(')')) else {
        return Err(invalid_key(url));
    };
    let inner = &segment[open + 1..segment.len() - 1];
    if inner.trim().is_empty() {
        return Err(invalid_key(url));
    }

    let mut keys = Vec::new();
    for part in split_outside_quotes(inner) {
        let (name, literal) = match split_name(part) {
            Some((name, literal)) => (Some(String::from(name.trim())), literal),
            None => (None, part),
        };
        let value = parse_literal(literal.trim()).ok_or_else(|| invalid_key(url))?;
        keys.push((name, value));
    }
    Ok(keys)
}

fn invalid_key(url: &str) -> DeserializeError {
    DeserializeError::schema(format!("The entity reference link '{url}' has no valid key segment."))
}

fn split_outside_quotes(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// `name=value`, unless the `=` is inside a quoted literal.
fn split_name(part: &str) -> Option<(&str, &str)> {
    let eq = part.find('=')?;
    match part.find('\'') {
        Some(quote) if quote < eq => None,
        _ => Some((&part[..eq], &part[eq + 1..])),
    }
}

fn parse_literal(literal: &str) -> Option<PrimitiveValue> {
    if let Some(quoted) = literal.strip_prefix('\'') {
        let text = quoted.strip_suffix('\'')?;
        return Some(PrimitiveValue::String(text.replace("''", "'")));
    }
    match literal {
        "" => None,
        "true" => Some(PrimitiveValue::Boolean(true)),
        "false" => Some(PrimitiveValue::Boolean(false)),
        "INF" => Some(PrimitiveValue::Float(f64::INFINITY)),
        "-INF" => Some(PrimitiveValue::Float(f64::NEG_INFINITY)),
        "NaN" => Some(PrimitiveValue::Float(f64::NAN)),
        _ => {
            let numeric = literal.trim_end_matches(['L', 'l', 'M', 'm', 'D', 'd']);
            if let Ok(value) = numeric.parse::<i64>() {
                Some(PrimitiveValue::Int(value))
            } else if is_decimal(numeric)
                && let Ok(value) = numeric.parse::<f64>()
            {
                Some(PrimitiveValue::Float(value))
            } else {
                Some(PrimitiveValue::String(String::from(literal)))
            }
        }
    }
}

/// Digits, signs, a point and an exponent only.
fn is_decimal(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_keys() {
        assert_eq!(
            parse_entity_keys("http://localhost/odata/Suppliers(42)").unwrap(),
            [(None, PrimitiveValue::Int(42))]
        );
        assert_eq!(
            parse_entity_keys("Customers('O''Neil')?$select=Name").unwrap(),
            [(None, PrimitiveValue::from("O'Neil"))]
        );
        assert_eq!(
            parse_entity_keys("Tags(21EC2020-3AEA-1069-A2DD-08002B30309D)").unwrap(),
            [(None, PrimitiveValue::from("21EC2020-3AEA-1069-A2DD-08002B30309D"))]
        );
    }

    #[test]
    fn composite_keys() {
        let keys = parse_entity_keys("OrderLines(OrderID=7,Code='a,b')").unwrap();
        assert_eq!(
            keys,
            [
                (Some(String::from("OrderID")), PrimitiveValue::Int(7)),
                (Some(String::from("Code")), PrimitiveValue::from("a,b")),
            ]
        );
    }

    #[test]
    fn special_floats_need_exact_spelling() {
        let key = |url: &str| parse_entity_keys(url).unwrap().remove(0).1;

        assert_eq!(key("Readings(INF)"), PrimitiveValue::Float(f64::INFINITY));
        assert_eq!(key("Readings(-INF)"), PrimitiveValue::Float(f64::NEG_INFINITY));
        assert!(matches!(key("Readings(NaN)"), PrimitiveValue::Float(v) if v.is_nan()));
        assert_eq!(key("Readings(2.5)"), PrimitiveValue::Float(2.5));

        assert_eq!(key("Readings(nan)"), PrimitiveValue::from("nan"));
        assert_eq!(key("Readings(inf)"), PrimitiveValue::from("inf"));
        assert_eq!(key("Readings(infinity)"), PrimitiveValue::from("infinity"));
    }

    #[test]
    fn missing_key() {
        assert!(parse_entity_keys("Suppliers").is_err());
        assert!(parse_entity_keys("Suppliers()").is_err());
    }
}
