use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumString};

/// Identifier assigned by the backend to users and products.
///
/// The client never interprets it; the value is only rendered back into
/// request paths and query strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        value.parse::<i64>().map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Account variant; decides which profile page a user lands on.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserKind {
    Buyer,
    Seller,
}

/// Body shared by the register and login calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
}

impl Credentials {
    pub fn new(name: impl Into<String>, kind: UserKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Partial profile update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn record_id_renders_without_quotes() {
        assert_eq!(RecordId::from(7).to_string(), "7");
        assert_eq!(RecordId::Text("abc-1".into()).to_string(), "abc-1");
    }

    #[test]
    fn record_id_parses_numeric_text_as_number() {
        assert_eq!(RecordId::from("42"), RecordId::Number(42));
        assert_eq!(RecordId::from("u-42"), RecordId::Text("u-42".into()));
    }

    #[test]
    fn record_id_deserializes_either_shape() {
        let number: RecordId = serde_json::from_str("3").unwrap();
        let text: RecordId = serde_json::from_str("\"x9\"").unwrap();
        assert_eq!(number, RecordId::Number(3));
        assert_eq!(text, RecordId::Text("x9".into()));
    }

    #[test]
    fn user_kind_roundtrip() {
        for (text, kind) in [("buyer", UserKind::Buyer), ("seller", UserKind::Seller)] {
            assert_eq!(kind.to_string(), text);
            assert_eq!(kind.as_ref(), text);
            assert_eq!(UserKind::from_str(text).unwrap(), kind);
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{text}\""));
        }
        assert_eq!(UserKind::from_str("Seller").unwrap(), UserKind::Seller);
    }

    #[test]
    fn user_kind_invalid() {
        assert!(UserKind::from_str("vet").is_err());
        assert!(serde_json::from_str::<UserKind>("\"vet\"").is_err());
    }

    #[test]
    fn credentials_use_type_on_the_wire() {
        let body = serde_json::to_value(Credentials::new("Bina", UserKind::Seller)).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Bina", "type": "seller"}));
    }

    #[test]
    fn user_update_skips_absent_fields() {
        let update = UserUpdate {
            credits: Some(10),
            friends: None,
        };
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            serde_json::json!({"credits": 10})
        );
    }
}
