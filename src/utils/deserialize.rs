//! Lenient field deserializers for payloads sent by the admin frontend,
//! which mixes numbers, numeric strings and empty strings for the same field.

use std::fmt;

use serde::Deserializer;
use serde::de::{self, Visitor};

struct LenientIdVisitor;

impl<'de> Visitor<'de> for LenientIdVisitor {
    type Value = Option<i32>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer id, a numeric string or null")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i32::try_from(value)
            .map(Some)
            .map_err(|_| E::custom(format!("id out of range: {}", value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i32::try_from(value)
            .map(Some)
            .map_err(|_| E::custom(format!("id out of range: {}", value)))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| E::custom(format!("invalid id: {}", value)))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

/// `12`, `"12"`, `""` and `null` all deserialize; blanks become `None`.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientIdVisitor)
}

/// Distinguishes an absent field (`None`) from an explicit null (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub fn present_nullable_id<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_id(deserializer).map(Some)
}

/// Same presence tracking for text columns; a blank string clears the column.
pub fn present_nullable_string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(Some(value.filter(|v| !v.trim().is_empty())))
}

struct LenientBoolVisitor;

impl<'de> Visitor<'de> for LenientBoolVisitor {
    type Value = Option<bool>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean, 0/1 or \"0\"/\"1\"")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(value == 1))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(value == 1))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match value.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "mandatory" => Ok(Some(true)),
            "0" | "false" | "no" | "optional" => Ok(Some(false)),
            other => Err(E::custom(format!("invalid boolean: {}", other))),
        }
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientBoolVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "lenient_id")]
        id: Option<i32>,
        #[serde(default, deserialize_with = "present_nullable_id")]
        company_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "lenient_bool")]
        is_required: Option<bool>,
        #[serde(default, deserialize_with = "present_nullable_string")]
        position: Option<Option<String>>,
    }

    fn parse(json: &str) -> Payload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"id": 7}"#).id, Some(7));
        assert_eq!(parse(r#"{"id": "7"}"#).id, Some(7));
        assert_eq!(parse(r#"{"id": ""}"#).id, None);
        assert_eq!(parse(r#"{"id": null}"#).id, None);
        assert_eq!(parse(r#"{}"#).id, None);
        assert!(serde_json::from_str::<Payload>(r#"{"id": "seven"}"#).is_err());
    }

    #[test]
    fn nullable_id_tracks_presence() {
        assert_eq!(parse(r#"{}"#).company_id, None);
        assert_eq!(parse(r#"{"company_id": null}"#).company_id, Some(None));
        assert_eq!(parse(r#"{"company_id": ""}"#).company_id, Some(None));
        assert_eq!(parse(r#"{"company_id": 3}"#).company_id, Some(Some(3)));
    }

    #[test]
    fn nullable_string_clears_on_blank() {
        assert_eq!(parse(r#"{}"#).position, None);
        assert_eq!(parse(r#"{"position": null}"#).position, Some(None));
        assert_eq!(parse(r#"{"position": "  "}"#).position, Some(None));
        assert_eq!(
            parse(r#"{"position": "HR Lead"}"#).position,
            Some(Some("HR Lead".to_string()))
        );
    }

    #[test]
    fn bools_accept_frontend_variants() {
        assert_eq!(parse(r#"{"is_required": true}"#).is_required, Some(true));
        assert_eq!(parse(r#"{"is_required": 1}"#).is_required, Some(true));
        assert_eq!(parse(r#"{"is_required": "1"}"#).is_required, Some(true));
        assert_eq!(parse(r#"{"is_required": 0}"#).is_required, Some(false));
        assert_eq!(parse(r#"{"is_required": "0"}"#).is_required, Some(false));
        assert_eq!(parse(r#"{}"#).is_required, None);
    }
}
