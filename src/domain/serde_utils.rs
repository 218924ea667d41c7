//! Serde helpers for Discord snowflakes.

use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer snowflake")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value).map_err(|_| E::custom(format!("negative snowflake: {value}")))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.trim().parse::<u64>().map_err(de::Error::custom)
    }
}

struct OptionalSnowflakeVisitor;

impl<'de> Visitor<'de> for OptionalSnowflakeVisitor {
    type Value = Option<u64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an optional snowflake")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SnowflakeVisitor).map(Some)
    }
}

/// Deserializes a snowflake sent as a string or a number.
///
/// # Errors
///
/// Returns an error if the value is neither, or does not parse.
pub fn snowflake<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(SnowflakeVisitor)
}

/// Deserializes a nullable snowflake. Zero is treated as absent.
///
/// # Errors
///
/// Returns an error if a present value does not parse.
pub fn optional_snowflake<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer
        .deserialize_option(OptionalSnowflakeVisitor)
        .map(|id| id.filter(|id| *id != 0))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "super::snowflake")]
        id: u64,
        #[serde(default, deserialize_with = "super::optional_snowflake")]
        parent: Option<u64>,
    }

    #[test]
    fn test_string_and_number_ids() {
        let from_str: Ids = serde_json::from_str(r#"{"id":"123","parent":"456"}"#).unwrap();
        let from_num: Ids = serde_json::from_str(r#"{"id":123,"parent":456}"#).unwrap();

        assert_eq!(from_str.id, 123);
        assert_eq!(from_str.parent, Some(456));
        assert_eq!(from_num.parent, Some(456));
    }

    #[test]
    fn test_null_missing_and_zero_parent() {
        let null: Ids = serde_json::from_str(r#"{"id":"1","parent":null}"#).unwrap();
        let missing: Ids = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        let zero: Ids = serde_json::from_str(r#"{"id":"1","parent":0}"#).unwrap();

        assert_eq!(null.parent, None);
        assert_eq!(missing.parent, None);
        assert_eq!(zero.parent, None);
    }

    #[test]
    fn test_malformed_id_is_error() {
        assert!(serde_json::from_str::<Ids>(r#"{"id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Ids>(r#"{"id":-5}"#).is_err());
    }
}
