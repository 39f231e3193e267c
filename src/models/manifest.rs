use crate::error::{DataManagerError, Result};
use crate::models::registry::ModelInfo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One row of the `corenlp_models` data table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataTableEntry {
    pub value: String,
    pub name: String,
    pub lang_code: String,
    pub models_path: String,
}

impl DataTableEntry {
    /// Build the entry for a catalog model stored at `jar_path`
    ///
    /// `jar_path` is made absolute against the current directory; symlinks
    /// are not resolved.
    pub fn for_model(model: &ModelInfo, jar_path: &Path) -> Result<Self> {
        let absolute = std::path::absolute(jar_path)?;

        Ok(Self {
            value: model.code.to_string(),
            name: model.name.to_string(),
            lang_code: model.code.to_string(),
            models_path: absolute.to_string_lossy().into_owned(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataTables {
    pub corenlp_models: Vec<DataTableEntry>,
}

/// Data manager JSON consumed by Galaxy
///
/// ```json
/// { "data_tables": { "corenlp_models": [ ... ] } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataManagerOutput {
    pub data_tables: DataTables,
}

impl DataManagerOutput {
    #[must_use]
    pub fn new(entries: Vec<DataTableEntry>) -> Self {
        Self {
            data_tables: DataTables {
                corenlp_models: entries,
            },
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[DataTableEntry] {
        &self.data_tables.corenlp_models
    }

    /// Find an entry by its `lang_code`
    #[must_use]
    pub fn find_entry(&self, lang_code: &str) -> Option<&DataTableEntry> {
        self.entries().iter().find(|e| e.lang_code == lang_code)
    }

    /// Save to file atomically (tmp + rename), even when there are no entries
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;

        let write_err = |source| DataManagerError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp_path = tmp_path_for(path);
        fs::write(&tmp_path, content).map_err(write_err)?;

        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_err(e));
        }

        tracing::debug!(
            "Wrote {} data table entries to {}",
            self.entries().len(),
            path.display()
        );

        Ok(())
    }
}

/// Sibling temp file, so the rename stays on one filesystem
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(path: &Path) -> DataManagerOutput {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn entry(code: &str, name: &str) -> DataTableEntry {
        DataTableEntry {
            value: code.to_string(),
            name: name.to_string(),
            lang_code: code.to_string(),
            models_path: format!("/data/{code}.jar"),
        }
    }

    #[test]
    fn test_empty_output_shape() {
        let json = serde_json::to_value(DataManagerOutput::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "data_tables": { "corenlp_models": [] } })
        );
    }

    #[test]
    fn test_entry_field_names() {
        let output = DataManagerOutput::new(vec![entry("en", "English")]);
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(
            json["data_tables"]["corenlp_models"][0],
            serde_json::json!({
                "value": "en",
                "name": "English",
                "lang_code": "en",
                "models_path": "/data/en.jar",
            })
        );
    }

    #[test]
    fn test_for_model_is_absolute() {
        let model = ModelInfo::find("de").unwrap();
        let entry = DataTableEntry::for_model(model, Path::new("models/german.jar")).unwrap();

        assert_eq!(entry.value, "de");
        assert_eq!(entry.lang_code, "de");
        assert_eq!(entry.name, "German");
        assert!(Path::new(&entry.models_path).is_absolute());
        assert!(entry.models_path.ends_with("german.jar"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("output.json");

        let output =
            DataManagerOutput::new(vec![entry("common", "Common Models"), entry("fr", "French")]);
        output.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"data_tables\""));

        let loaded = load(&path);
        assert_eq!(loaded, output);
        assert_eq!(loaded.find_entry("fr").unwrap().name, "French");
        assert!(loaded.find_entry("en").is_none());
        assert!(!temp_dir.path().join("out").join("output.json.tmp").exists());
    }

    #[test]
    fn test_save_empty_still_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("output.json");

        DataManagerOutput::default().save(&path).unwrap();

        let loaded = load(&path);
        assert!(loaded.entries().is_empty());
    }

    #[test]
    fn test_save_into_file_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = DataManagerOutput::default()
            .save(&blocker.join("output.json"))
            .unwrap_err();
        assert!(matches!(err, DataManagerError::ManifestWrite { .. }));
    }
}
