use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Category, Product, User};

/// The three raw record collections the catalog is joined from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Toml,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read dataset file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse JSON dataset `{path}`: {source}")]
    ParseJson { path: PathBuf, source: serde_json::Error },
    #[error("could not parse TOML dataset `{path}`: {source}")]
    ParseToml { path: PathBuf, source: toml::de::Error },
    #[error("unsupported dataset format for `{path}` (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let format = DatasetFormat::from_path(path)
            .ok_or_else(|| DatasetError::UnsupportedFormat { path: path.to_path_buf() })?;
        let raw = fs::read_to_string(path)
            .map_err(|source| DatasetError::ReadFile { path: path.to_path_buf(), source })?;

        let dataset = Self::parse(&raw, format, path)?;
        debug!(
            event_name = "catalog.dataset.loaded",
            path = %path.display(),
            users = dataset.users.len(),
            categories = dataset.categories.len(),
            products = dataset.products.len(),
            "dataset file parsed"
        );
        Ok(dataset)
    }

    pub fn parse(raw: &str, format: DatasetFormat, path: &Path) -> Result<Self, DatasetError> {
        match format {
            DatasetFormat::Json => serde_json::from_str(raw)
                .map_err(|source| DatasetError::ParseJson { path: path.to_path_buf(), source }),
            DatasetFormat::Toml => toml::from_str(raw)
                .map_err(|source| DatasetError::ParseToml { path: path.to_path_buf(), source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::{Dataset, DatasetError, DatasetFormat};
    use crate::domain::{CategoryId, Sex, UserId};

    #[test]
    fn json_dataset_uses_camel_case_foreign_keys() {
        let raw = r#"{
            "users": [{ "id": 1, "name": "Max", "sex": "m" }],
            "categories": [{ "id": 1, "title": "Drinks", "icon": "🍺", "ownerId": 1 }],
            "products": [{ "id": 1, "name": "Milk", "categoryId": 1 }]
        }"#;

        let dataset = Dataset::parse(raw, DatasetFormat::Json, Path::new("inline.json"))
            .expect("json dataset should parse");

        assert_eq!(dataset.users[0].sex, Sex::Male);
        assert_eq!(dataset.categories[0].owner_id, UserId(1));
        assert_eq!(dataset.products[0].category_id, CategoryId(1));
    }

    #[test]
    fn toml_dataset_loads_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
[[users]]
id = 2
name = "Anna"
sex = "f"

[[categories]]
id = 2
title = "Grocery"
icon = "🍞"
ownerId = 2

[[products]]
id = 2
name = "Bread"
categoryId = 2
"#,
        )
        .expect("write dataset");

        let dataset = Dataset::load(&path).expect("toml dataset should load");

        assert_eq!(dataset.users.len(), 1);
        assert_eq!(dataset.users[0].sex, Sex::Female);
        assert_eq!(dataset.products[0].name, "Bread");
    }

    #[test]
    fn unknown_extension_is_rejected_before_reading() {
        let error = Dataset::load(Path::new("does-not-exist.csv")).expect_err("csv is unsupported");
        assert!(matches!(error, DatasetError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let error =
            Dataset::load(&dir.path().join("missing.json")).expect_err("missing file should fail");
        assert!(matches!(error, DatasetError::ReadFile { .. }));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let error = Dataset::parse("{ not json", DatasetFormat::Json, Path::new("bad.json"))
            .expect_err("malformed json should fail");
        assert!(matches!(error, DatasetError::ParseJson { .. }));
    }
}
