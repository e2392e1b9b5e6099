use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Field, Model};

static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid id pattern"));

/// Storage keys: lowercase letters, digits and hyphens.
pub static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid slug pattern"));

/// Every rule a model or field broke, collected in one pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation error on {entity} '{name}': {}", .violations.join("; "))]
pub struct ValidationError {
    /// `"model"` or `"field"`.
    pub entity: &'static str,
    /// Name of the offending model or field as submitted.
    pub name: String,
    pub violations: Vec<String>,
}

/// Check a single field in isolation.
pub fn validate_field(field: &Field) -> Result<(), ValidationError> {
    let violations = field_violations(field);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            entity: "field",
            name: field.name.clone(),
            violations,
        })
    }
}

/// Check a model, its fields, and the uniqueness of field ids and names.
pub fn validate_model(model: &Model) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if let Err(msg) = check_id(&model.id) {
        violations.push(format!("ID: {msg}"));
    }
    if model.name.trim().is_empty() {
        violations.push("Name: cannot be empty".to_string());
    }
    if let Err(msg) = check_slug(&model.slug) {
        violations.push(format!("Slug: {msg}"));
    }
    if !model.status.is_valid() {
        violations.push(format!("Status: {}", status_message(model.status.as_str())));
    }
    if model.schema_version < 0 {
        violations.push("SchemaVersion: cannot be negative".to_string());
    }
    if model.fields.is_empty() {
        violations.push("Fields: model must have at least one field".to_string());
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for (i, field) in model.fields.iter().enumerate() {
        for msg in field_violations(field) {
            violations.push(format!("Fields[{i}]: {msg}"));
        }
        if !ids.insert(field.id.as_str()) {
            violations.push(format!("Fields[{i}]: duplicate field ID '{}'", field.id));
        }
        if !names.insert(field.name.as_str()) {
            violations.push(format!("Fields[{i}]: duplicate field name '{}'", field.name));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            entity: "model",
            name: model.name.clone(),
            violations,
        })
    }
}

fn field_violations(field: &Field) -> Vec<String> {
    let mut violations = Vec::new();

    if let Err(msg) = check_id(&field.id) {
        violations.push(format!("ID: {msg}"));
    }
    if field.name.trim().is_empty() {
        violations.push("Name: cannot be empty".to_string());
    }
    if !field.field_type.is_registered() {
        violations.push(format!(
            "Type: unsupported field type '{}'",
            field.field_type.as_str()
        ));
    }
    if !field.status.is_valid() {
        violations.push(format!("Status: {}", status_message(field.status.as_str())));
    }

    violations
}

fn status_message(got: &str) -> String {
    format!("must be either 'draft' or 'publish', got '{got}'")
}

fn check_id(id: &str) -> Result<(), &'static str> {
    if id.trim().is_empty() {
        return Err("cannot be empty");
    }
    if !ID_PATTERN.is_match(id) {
        return Err("must contain only alphanumeric characters, hyphens, and underscores");
    }
    Ok(())
}

fn check_slug(slug: &str) -> Result<(), &'static str> {
    if slug.trim().is_empty() {
        return Err("cannot be empty");
    }
    if !SLUG_PATTERN.is_match(slug) {
        return Err("must contain only lowercase letters, numbers, and hyphens");
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err("cannot start or end with a hyphen");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldType, Status};

    fn field(id: &str, name: &str) -> Field {
        Field {
            id: id.to_string(),
            name: name.to_string(),
            field_type: FieldType::String,
            description: String::new(),
            unique: false,
            required: false,
            status: Status::Draft,
            created_at: None,
            updated_at: None,
        }
    }

    fn model() -> Model {
        Model {
            id: "3f1c9a2e-0000-4000-8000-000000000001".to_string(),
            name: "Blog Post".to_string(),
            slug: "blog-post".to_string(),
            description: String::new(),
            fields: vec![field("f1", "Title"), field("f2", "Body")],
            status: Status::Draft,
            schema_version: 1,
        }
    }

    #[test]
    fn accepts_a_valid_model() {
        assert!(validate_model(&model()).is_ok());
    }

    #[test]
    fn revalidating_a_valid_model_is_still_valid() {
        let m = model();
        assert!(validate_model(&m).is_ok());
        assert!(validate_model(&m).is_ok());
    }

    #[test]
    fn rejects_model_without_fields() {
        let mut m = model();
        m.fields.clear();

        let err = validate_model(&m).unwrap_err();
        assert_eq!(
            err.violations,
            vec!["Fields: model must have at least one field".to_string()]
        );
    }

    #[test]
    fn collects_every_violation_instead_of_stopping_at_the_first() {
        let mut m = model();
        m.id = "bad id!".to_string();
        m.name = "  ".to_string();
        m.slug = "-blog".to_string();
        m.status = Status::from_str("archived");
        m.schema_version = -1;

        let err = validate_model(&m).unwrap_err();
        assert_eq!(err.entity, "model");
        assert_eq!(err.violations.len(), 5);
        assert!(err.violations[0].starts_with("ID:"));
        assert_eq!(err.violations[1], "Name: cannot be empty");
        assert_eq!(err.violations[2], "Slug: cannot start or end with a hyphen");
        assert!(err.violations[3].starts_with("Status:"));
        assert_eq!(err.violations[4], "SchemaVersion: cannot be negative");
    }

    #[test]
    fn rejects_uppercase_slug() {
        let mut m = model();
        m.slug = "Blog-Post".to_string();

        let err = validate_model(&m).unwrap_err();
        assert_eq!(
            err.violations,
            vec!["Slug: must contain only lowercase letters, numbers, and hyphens".to_string()]
        );
    }

    #[test]
    fn rejects_duplicate_field_ids_and_names() {
        let mut m = model();
        m.fields = vec![field("f1", "Title"), field("f1", "Title")];

        let err = validate_model(&m).unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                "Fields[1]: duplicate field ID 'f1'".to_string(),
                "Fields[1]: duplicate field name 'Title'".to_string(),
            ]
        );
    }

    #[test]
    fn prefixes_nested_field_violations_with_their_index() {
        let mut m = model();
        m.fields[1].field_type = FieldType::from_str("geo");

        let err = validate_model(&m).unwrap_err();
        assert_eq!(
            err.violations,
            vec!["Fields[1]: Type: unsupported field type 'geo'".to_string()]
        );
    }

    #[test]
    fn field_with_every_problem_reports_all_of_them() {
        let mut f = field("", " ");
        f.field_type = FieldType::from_str("");
        f.status = Status::from_str("");

        let err = validate_field(&f).unwrap_err();
        assert_eq!(err.entity, "field");
        assert_eq!(err.violations.len(), 4);
        assert_eq!(err.violations[0], "ID: cannot be empty");
    }

    #[test]
    fn field_ids_allow_underscores_and_hyphens() {
        assert!(validate_field(&field("a_b-C9", "X")).is_ok());
        assert!(validate_field(&field("a.b", "X")).is_err());
    }

    #[test]
    fn displays_joined_messages() {
        let mut m = model();
        m.name = String::new();
        m.fields.clear();

        let err = validate_model(&m).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error on model '': Name: cannot be empty; Fields: model must have at least one field"
        );
    }
}
