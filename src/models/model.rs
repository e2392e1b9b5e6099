use serde::{Deserialize, Serialize};

use super::{Field, Status};

/// A named content schema composed of typed fields.
///
/// Missing keys in a stored document decode to empty values, so hand-written
/// files always load and are only rejected by the validator when edited.
///
/// Identified internally by an opaque `id` and externally by `slug`, which is
/// derived from the name at creation time and doubles as the storage key.
/// Neither changes once the model exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub schema_version: i64,
}

impl Model {
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Input for creating a new model. The slug and every id are generated server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateModelInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub fields: Vec<CreateFieldInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFieldInput {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub status: String,
}

/// Input for replacing a model's definition.
///
/// The whole field list is replaced; fields are matched to their previous
/// version by `id`, so clients must echo ids back to keep field history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateModelInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub fields: Vec<UpdateFieldInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFieldInput {
    /// Omit (or leave empty) to add a new field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub status: String,
}

impl From<&Field> for UpdateFieldInput {
    fn from(field: &Field) -> Self {
        Self {
            id: Some(field.id.clone()),
            name: field.name.clone(),
            field_type: field.field_type.as_str().to_string(),
            description: field.description.clone(),
            unique: field.unique,
            required: field.required,
            status: field.status.as_str().to_string(),
        }
    }
}

/// Response body for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteModelResponse {
    pub deleted: bool,
}
