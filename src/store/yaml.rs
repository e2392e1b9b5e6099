use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ModelRepository, StoreError};
use crate::models::{Model, SLUG_PATTERN};

/// File extensions recognized for model documents, in lookup preference order.
///
/// New files are always written with [`ModelFileExtension::Yaml`]; `.yml`
/// is accepted on read so hand-written files load too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModelFileExtension {
    Yaml,
    Yml,
}

impl ModelFileExtension {
    pub const ALL: [ModelFileExtension; 2] = [Self::Yaml, Self::Yml];

    /// The extension used for every write.
    pub const PRIMARY: ModelFileExtension = Self::Yaml;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Yml => "yml",
        }
    }

    /// Case-insensitive match on a bare extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(ext))
    }
}

/// Stores each model as `<slug>.yaml` inside a single directory.
pub struct YamlModelRepository {
    base_path: PathBuf,
}

impl YamlModelRepository {
    /// Open a repository rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)
            .map_err(|e| StoreError::io("create directory", &base_path, e))?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_path(&self, slug: &str, ext: ModelFileExtension) -> PathBuf {
        self.base_path.join(format!("{}.{}", slug, ext.as_str()))
    }

    /// First existing file for `slug`, checked in extension preference order.
    fn locate(&self, slug: &str) -> Result<Option<PathBuf>, StoreError> {
        // Anything outside the slug alphabet could escape the base directory.
        if !SLUG_PATTERN.is_match(slug) {
            return Ok(None);
        }

        for ext in ModelFileExtension::ALL {
            let path = self.file_path(slug, ext);
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => return Ok(Some(path)),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::io("stat", path, e)),
            }
        }
        Ok(None)
    }

    fn read(&self, path: &Path) -> Result<Model, StoreError> {
        let data = fs::read_to_string(path).map_err(|e| StoreError::io("read", path, e))?;
        serde_yaml_ng::from_str(&data).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write via a sibling temp file and rename so readers never see a partial document.
    fn save(&self, model: &Model) -> Result<(), StoreError> {
        let data = serde_yaml_ng::to_string(model).map_err(|source| StoreError::Encode {
            slug: model.slug.clone(),
            source,
        })?;

        let path = self.file_path(&model.slug, ModelFileExtension::PRIMARY);
        let tmp = path.with_extension(format!("{}.tmp", ModelFileExtension::PRIMARY.as_str()));
        fs::write(&tmp, data).map_err(|e| StoreError::io("write", &tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io("rename", &path, e));
        }
        Ok(())
    }
}

impl ModelRepository for YamlModelRepository {
    fn create_model(&self, model: &Model) -> Result<(), StoreError> {
        if self.locate(&model.slug)?.is_some() {
            return Err(StoreError::AlreadyExists {
                slug: model.slug.clone(),
            });
        }
        self.save(model)
    }

    fn update_model(&self, model: &Model) -> Result<(), StoreError> {
        let Some(existing) = self.locate(&model.slug)? else {
            return Err(StoreError::NotFound {
                slug: model.slug.clone(),
            });
        };
        self.save(model)?;

        // A `.yml` record is superseded by the `.yaml` just written.
        if existing != self.file_path(&model.slug, ModelFileExtension::PRIMARY) {
            fs::remove_file(&existing).map_err(|e| StoreError::io("remove", existing, e))?;
        }
        Ok(())
    }

    fn delete_model(&self, slug: &str) -> Result<(), StoreError> {
        let path = self.locate(slug)?.ok_or_else(|| StoreError::NotFound {
            slug: slug.to_string(),
        })?;
        fs::remove_file(&path).map_err(|e| StoreError::io("remove", path, e))
    }

    fn get_model(&self, slug: &str) -> Result<Model, StoreError> {
        let path = self.locate(slug)?.ok_or_else(|| StoreError::NotFound {
            slug: slug.to_string(),
        })?;
        self.read(&path)
    }

    fn get_models(&self) -> Result<Vec<Model>, StoreError> {
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StoreError::io("read directory", &self.base_path, e))?;

        // slug -> best file seen so far
        let mut files: HashMap<String, (ModelFileExtension, PathBuf)> = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io("read directory", &self.base_path, e))?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Some(ext) = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(ModelFileExtension::from_extension)
            else {
                continue;
            };
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match files.get(slug) {
                Some((seen, _)) if *seen <= ext => {}
                _ => {
                    files.insert(slug.to_string(), (ext, path.clone()));
                }
            }
        }

        let mut models = Vec::with_capacity(files.len());
        for (slug, (_, path)) in files {
            match self.read(&path) {
                Ok(model) => models.push(model),
                Err(e) => tracing::debug!("Skipping unreadable model {}: {}", slug, e),
            }
        }
        Ok(models)
    }
}
