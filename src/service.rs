//! Orchestration over a [`ModelRepository`].
//!
//! The HTTP layer talks to [`ModelService`] only, so swapping the YAML store
//! for another backend means implementing [`ModelRepository`] and nothing else.

use std::sync::Arc;

use crate::models::Model;
use crate::store::{ModelRepository, StoreError};

#[derive(Clone)]
pub struct ModelService {
    repo: Arc<dyn ModelRepository>,
}

impl ModelService {
    pub fn new(repo: Arc<dyn ModelRepository>) -> Self {
        Self { repo }
    }

    pub fn create(&self, model: &Model) -> Result<(), StoreError> {
        self.repo.create_model(model)
    }

    pub fn update(&self, model: &Model) -> Result<(), StoreError> {
        self.repo.update_model(model)
    }

    pub fn delete(&self, slug: &str) -> Result<(), StoreError> {
        self.repo.delete_model(slug)
    }

    pub fn get(&self, slug: &str) -> Result<Model, StoreError> {
        self.repo.get_model(slug)
    }

    pub fn list(&self) -> Result<Vec<Model>, StoreError> {
        self.repo.get_models()
    }

    /// Whether a record is stored under `slug`, readable or not.
    pub fn exists(&self, slug: &str) -> Result<bool, StoreError> {
        match self.repo.get_model(slug) {
            Ok(_) | Err(StoreError::Decode { .. }) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
