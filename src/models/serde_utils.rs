use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde::{self, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Nodes send large counters either as JSON numbers or as decimal strings.
pub fn parse_big_integer(value: &Value) -> Option<BigInt> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(BigInt::from)
            .or_else(|| n.as_u64().map(BigInt::from)),
        Value::String(s) => BigInt::from_str(s.trim()).ok(),
        _ => None,
    }
}

pub fn deserialize_big_integer<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(BigInt::zero()),
        other => parse_big_integer(&other)
            .ok_or_else(|| serde::de::Error::custom(format!("expecting integer, got {}", other))),
    }
}

pub fn deserialize_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_big_integer(deserializer)?
        .to_i64()
        .ok_or_else(|| serde::de::Error::custom("integer out of range"))
}

/// Strings are shown as-is, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_strings() {
        assert_eq!(parse_big_integer(&json!(42)), Some(BigInt::from(42)));
        assert_eq!(
            parse_big_integer(&json!("-123456789012345678901")),
            Some(BigInt::from_str("-123456789012345678901").unwrap())
        );
        assert_eq!(parse_big_integer(&json!(u64::MAX)), Some(BigInt::from(u64::MAX)));
        assert_eq!(parse_big_integer(&json!("abc")), None);
        assert_eq!(parse_big_integer(&json!([1])), None);
    }

    #[test]
    fn displays_strings_unquoted() {
        assert_eq!(display_value(&json!("1.000 GOLOS")), "1.000 GOLOS");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(10000)), "10000");
    }
}
