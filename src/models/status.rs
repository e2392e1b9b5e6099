use serde::{Deserialize, Serialize};

/// Lifecycle marker shared by models and fields.
///
/// Statuses are validated but not otherwise interpreted. Values outside the
/// known set decode into [`Status::Unknown`] so the validator can report them
/// alongside every other violation instead of failing the whole request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Draft,
    Publish,
    Unknown(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Publish => "publish",
            Self::Unknown(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "draft" => Self::Draft,
            "publish" => Self::Publish,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// A missing `status` key decodes as an empty, invalid status.
impl Default for Status {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip_through_strings() {
        assert_eq!(Status::from_str("draft"), Status::Draft);
        assert_eq!(Status::from_str("publish"), Status::Publish);
        assert_eq!(Status::Publish.as_str(), "publish");
    }

    #[test]
    fn unknown_status_keeps_its_value() {
        let status = Status::from_str("archived");
        assert!(!status.is_valid());
        assert_eq!(status.as_str(), "archived");
    }

    #[test]
    fn deserializes_unknown_values_without_error() {
        let status: Status = serde_json::from_str("\"\"").unwrap();
        assert_eq!(status, Status::Unknown(String::new()));
    }
}
