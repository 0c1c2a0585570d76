use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use shorecheck::classify::ClassifierConfig;
use shorecheck::table::{ColumnSchema, TableOptions};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub columns: ColumnSchema,
    pub table: TableOptions,
    pub land: LandConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LandConfig {
    /// Directory searched for the land layer
    pub dir: PathBuf,
    /// Layer file names to try in order; built-in list when absent
    pub candidates: Option<Vec<String>>,
    /// Feature classes treated as land
    pub land_classes: Vec<String>,
    /// Frame to assume when the layer has no .prj, e.g. "EPSG:4326"
    pub assume_crs: Option<String>,
}

impl Default for LandConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            candidates: None,
            land_classes: vec!["Land".to_string()],
            assume_crs: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [classifier]
            onshore_buffer_km = 5.0

            [land]
            candidates = ["coast.shp"]
            "#,
        )
        .unwrap();

        assert_eq!(config.classifier.onshore_buffer_km, 5.0);
        assert!(config.classifier.parallel);
        assert_eq!(config.columns, ColumnSchema::default());
        assert_eq!(config.table.status_column, "Shore_Status");
        assert_eq!(config.land.candidates, Some(vec!["coast.shp".to_string()]));
        assert_eq!(config.land.land_classes, vec!["Land".to_string()]);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.classifier.onshore_buffer_km, 3.0);
        assert_eq!(config.land.dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[columns]\nlatitude_index = 3\nlongitude_index = 4\n[table]\ndelimiter = \";\"\n",
        )
        .unwrap();
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.columns.required_columns(), 5);
        assert_eq!(config.table.delimiter, ';');
        assert_eq!(config.table.sheet_name, None);
    }

    #[test]
    fn test_sheet_name() {
        let config: Config = toml::from_str("[table]\nsheet_name = \"Stations\"\n").unwrap();
        assert_eq!(config.table.sheet_name.as_deref(), Some("Stations"));
        assert!(config.table.has_headers);
    }
}
