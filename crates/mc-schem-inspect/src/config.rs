use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct InspectConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegistrySection {
    /// Replacement legacy id table. The bundled table is used when unset.
    #[serde(default)]
    pub legacy_table: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ReportSection {
    /// How many block types the summary lists. 0 = all.
    #[serde(default = "default_top_blocks")]
    pub top_blocks: usize,
    #[serde(default = "default_list_entities")]
    pub list_entities: bool,
}

fn default_top_blocks() -> usize {
    10
}

fn default_list_entities() -> bool {
    true
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_blocks: default_top_blocks(),
            list_entities: default_list_entities(),
        }
    }
}

impl InspectConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
