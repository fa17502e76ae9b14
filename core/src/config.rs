use crate::{
    error::{ConvertError, ConvertResult},
    store::DEFAULT_BATCH_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one conversion run. Every field has a default, so a
/// config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Semicolon-delimited interactions file.
    pub input: PathBuf,
    /// Directory that receives `drug_interactions_idx_<language>.db`.
    pub output_dir: PathBuf,
    /// Locale tag naming the output store.
    pub language: String,
    /// Value written to `inter_metadata.locale`.
    pub metadata_locale: String,
    pub batch_size: usize,
    /// Log one line per ATC1 group at info level.
    pub show_progress: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input/drug_interactions_csv_de.csv"),
            output_dir: PathBuf::from("output"),
            language: "de".into(),
            metadata_locale: "en_US".into(),
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: false,
        }
    }
}

impl ConverterConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: ConverterConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> ConvertResult<()> {
        if self.batch_size == 0 {
            return Err(ConvertError::InvalidConfig(
                "batch_size must be at least 1".into(),
            ));
        }
        if self.language.is_empty() {
            return Err(ConvertError::InvalidConfig("language must not be empty".into()));
        }
        // The tag becomes part of a file name.
        if !self
            .language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConvertError::InvalidConfig(format!(
                "language {:?} may only contain ASCII letters, digits, '_' and '-'",
                self.language
            )));
        }
        Ok(())
    }
}
