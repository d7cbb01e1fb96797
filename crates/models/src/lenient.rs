//! Casting deserializers for client payloads.
//!
//! Clients are loose about scalar types: phone numbers and ids arrive as JSON
//! numbers, money as numeric strings. These helpers accept either form and
//! keep the stored type fixed.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String, number or bool → `String`; `null` → `None`.
pub fn deserialize_opt_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected a string, got `{other}`"))),
    }
}

/// Number or numeric string → `f64`; `null` and `""` → `None`.
pub fn deserialize_opt_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(other) => return Err(D::Error::custom(format!("expected a number, got `{other}`"))),
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(D::Error::custom("expected a finite number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "deserialize_opt_string")]
        phone: Option<String>,
        #[serde(default, deserialize_with = "deserialize_opt_f64")]
        fee: Option<f64>,
    }

    fn sample(v: Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn numbers_become_strings() {
        assert_eq!(sample(json!({"phone": 9000000001u64})).unwrap().phone.as_deref(), Some("9000000001"));
        assert_eq!(sample(json!({"phone": "9000000001"})).unwrap().phone.as_deref(), Some("9000000001"));
        assert!(sample(json!({"phone": null})).unwrap().phone.is_none());
        assert!(sample(json!({"phone": ["x"]})).is_err());
    }

    #[test]
    fn numeric_strings_become_numbers() {
        assert_eq!(sample(json!({"fee": "500"})).unwrap().fee, Some(500.0));
        assert_eq!(sample(json!({"fee": " 12.5 "})).unwrap().fee, Some(12.5));
        assert_eq!(sample(json!({"fee": 600})).unwrap().fee, Some(600.0));
        assert!(sample(json!({"fee": ""})).unwrap().fee.is_none());
        assert!(sample(json!({})).unwrap().fee.is_none());
        assert!(sample(json!({"fee": "cheap"})).is_err());
        assert!(sample(json!({"fee": "NaN"})).is_err());
    }
}
