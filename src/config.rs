use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::document::DEFAULT_DOCUMENT_NAME;
use crate::html::{DownloadLink, FileType};

/// User configuration for xfilios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Download anchor text and MIME type
    pub link: DownloadLink,

    /// File stem for decoded payloads written without an output path
    pub default_document_name: String,

    /// Worksheet label for tables built without one
    pub default_sheet_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            link: DownloadLink::default(),
            default_document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            default_sheet_label: "Sheet1".to_string(),
        }
    }
}

impl Config {
    /// File name for a decoded payload of `kind`, e.g. `document.docx`
    pub fn output_file_name(&self, kind: FileType) -> String {
        format!("{}.{}", self.default_document_name, kind.extension())
    }

    /// `label` unless it is missing or blank, else the configured sheet label
    pub fn sheet_label<'a>(&'a self, label: Option<&'a str>) -> &'a str {
        label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(&self.default_sheet_label)
    }

    /// Load `config.toml`, or the defaults when there is none
    pub fn load() -> Result<Self> {
        let Some(config_path) = Self::get_config_path().filter(|path| path.exists()) else {
            return Ok(Config::default());
        };

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Write this configuration to `config.toml`, returning the path written
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_config_path() else {
            tracing::warn!("no config directory on this platform; config not saved");
            return Ok(None);
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %config_path.display(), "saved config");
        Ok(Some(config_path))
    }

    /// `<config dir>/xfilios/config.toml`
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("xfilios").join("config.toml"))
    }

    /// Write the default configuration
    pub fn init_default() -> Result<Option<PathBuf>> {
        Config::default().save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.link.text, "Click To Download");
        assert_eq!(config.link.mime, "application/octet-stream");
        assert_eq!(config.default_document_name, "document");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[link]\ntext = \"Download\"\n").unwrap();
        assert_eq!(config.link.text, "Download");
        assert_eq!(config.link.mime, "application/octet-stream");
        assert_eq!(config.default_sheet_label, "Sheet1");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_custom_document_name_sets_output_file() {
        let config: Config = toml::from_str("default_document_name = \"upload\"\n").unwrap();
        assert_eq!(config.output_file_name(FileType::Docx), "upload.docx");
        assert_eq!(config.output_file_name(FileType::Xlsx), "upload.xlsx");
        assert_eq!(
            Config::default().output_file_name(FileType::Docx),
            "document.docx"
        );
    }

    #[test]
    fn test_custom_sheet_label_fills_missing_label() {
        let config: Config = toml::from_str("default_sheet_label = \"Data\"\n").unwrap();
        assert_eq!(config.sheet_label(None), "Data");
        assert_eq!(config.sheet_label(Some("  ")), "Data");
        assert_eq!(config.sheet_label(Some("Orders")), "Orders");
        assert_eq!(Config::default().sheet_label(None), "Sheet1");
    }
}
