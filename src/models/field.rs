use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

/// One typed attribute of a [`Model`](super::Model).
///
/// The `id` is generated once and stays stable across edits as long as the
/// client echoes it back on update. `created_at` is set when the field first
/// appears and never changes; `updated_at` is refreshed on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default)]
    pub status: Status,
    /// Absent in hand-written files that never went through the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The registry of field types a model may declare.
///
/// Unregistered names decode into [`FieldType::Unknown`] and are rejected by
/// [`validate_field`](super::validate_field).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Text,
    Number,
    Boolean,
    Date,
    DateTime,
    Relation,
    Unknown(String),
}

impl FieldType {
    /// Every registered type, in display order.
    pub const ALL: [FieldType; 7] = [
        Self::String,
        Self::Text,
        Self::Number,
        Self::Boolean,
        Self::Date,
        Self::DateTime,
        Self::Relation,
    ];

    /// Canonical name of a registered type; `None` for [`FieldType::Unknown`].
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Text => Some("text"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::Date => Some("date"),
            Self::DateTime => Some("datetime"),
            Self::Relation => Some("relation"),
            Self::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown(s) => s,
            known => known.name().unwrap_or_default(),
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == Some(s))
            .unwrap_or_else(|| Self::Unknown(s.to_string()))
    }

    pub fn is_registered(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Names of all registered types.
    pub fn registered() -> Vec<&'static str> {
        Self::ALL.iter().filter_map(FieldType::name).collect()
    }
}

/// A missing `type` key decodes as an empty, unregistered type.
impl Default for FieldType {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_known_variant() {
        let names: Vec<&str> = FieldType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, FieldType::registered());
        assert!(FieldType::ALL.iter().all(FieldType::is_registered));
    }

    #[test]
    fn names_resolve_back_to_their_variant() {
        for t in FieldType::ALL {
            assert_eq!(FieldType::from_str(t.as_str()), t);
        }
        assert_eq!(FieldType::default().name(), None);
    }

    #[test]
    fn decodes_a_field_with_missing_keys() {
        let field: Field = serde_yaml_ng::from_str("name: Title\n").unwrap();
        assert_eq!(field.id, "");
        assert_eq!(field.field_type, FieldType::Unknown(String::new()));
        assert_eq!(field.status, Status::Unknown(String::new()));
    }

    #[test]
    fn unregistered_type_is_preserved() {
        let t = FieldType::from_str("geo");
        assert!(!t.is_registered());
        assert_eq!(t.as_str(), "geo");
    }

    #[test]
    fn omits_empty_description_and_false_flags() {
        let field = Field {
            id: "f1".to_string(),
            name: "Title".to_string(),
            field_type: FieldType::String,
            description: String::new(),
            unique: false,
            required: false,
            status: Status::Draft,
            created_at: None,
            updated_at: None,
        };

        let value = serde_json::to_value(&field).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["type"], "string");
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("unique"));
        assert!(!obj.contains_key("required"));
        assert!(!obj.contains_key("createdAt"));
    }
}
