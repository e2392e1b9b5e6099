//! Durable storage for models.
//!
//! [`ModelRepository`] is the capability set every backend implements. The
//! only backend today is [`YamlModelRepository`], which keeps one YAML
//! document per model in a directory, named after the model's slug.

mod yaml;

use std::path::PathBuf;

use crate::models::Model;

pub use yaml::{ModelFileExtension, YamlModelRepository};

/// Create/read/update/delete/list over models, keyed by slug.
pub trait ModelRepository: Send + Sync {
    /// Persist a new model. Fails with [`StoreError::AlreadyExists`] if its slug is taken.
    fn create_model(&self, model: &Model) -> Result<(), StoreError>;
    /// Overwrite an existing model. Fails with [`StoreError::NotFound`] if its slug is unknown.
    fn update_model(&self, model: &Model) -> Result<(), StoreError>;
    fn delete_model(&self, slug: &str) -> Result<(), StoreError>;
    fn get_model(&self, slug: &str) -> Result<Model, StoreError>;
    /// All readable models, in no particular order. Unreadable records are skipped.
    fn get_models(&self) -> Result<Vec<Model>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("model with slug {slug} not found")]
    NotFound { slug: String },

    #[error("model with slug {slug} already exists")]
    AlreadyExists { slug: String },

    #[error("failed to decode model file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("failed to encode model {slug}: {source}")]
    Encode {
        slug: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
