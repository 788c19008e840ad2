//! Configuration schema (relgraph.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::flow::FlowStyle;
use crate::graph::PlaceholderLayout;

/// Where the schema tables are read from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV file holding the Entities table
    #[serde(default)]
    pub entities: Option<PathBuf>,

    /// CSV file holding the Attributes table
    #[serde(default)]
    pub attributes: Option<PathBuf>,

    /// JSON document holding both tables
    #[serde(default)]
    pub json: Option<PathBuf>,
}

/// Alternative header names accepted for each expected column
///
/// Spreadsheet exports sometimes lose a header (e.g. `Unnamed: 7`); listing
/// it here maps it back onto the expected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAliases {
    /// Aliases for `Object`
    #[serde(default)]
    pub object: Vec<String>,

    /// Aliases for `Description`
    #[serde(default = "default_description_aliases")]
    pub description: Vec<String>,

    /// Aliases for `Field Name`
    #[serde(default)]
    pub field_name: Vec<String>,

    /// Aliases for `Data Type`
    #[serde(default)]
    pub data_type: Vec<String>,

    /// Aliases for `Relationship/RefersTo`
    #[serde(default)]
    pub relationship: Vec<String>,
}

fn default_description_aliases() -> Vec<String> {
    vec!["Unnamed: 7".to_string()]
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            object: Vec::new(),
            description: default_description_aliases(),
            field_name: Vec::new(),
            data_type: Vec::new(),
            relationship: Vec::new(),
        }
    }
}

fn default_focal_entity() -> String {
    "Account".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("account_lineage_reactflow.json")
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Entity the graph is rooted at
    #[serde(default = "default_focal_entity")]
    pub focal_entity: String,

    /// Output JSON path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Input tables
    #[serde(default)]
    pub input: InputConfig,

    /// Header aliases
    #[serde(default)]
    pub columns: ColumnAliases,

    /// Placeholder node positions
    #[serde(default)]
    pub layout: PlaceholderLayout,

    /// Node and edge presentation
    #[serde(default)]
    pub style: FlowStyle,

    /// Project root path (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focal_entity: default_focal_entity(),
            output: default_output(),
            input: InputConfig::default(),
            columns: ColumnAliases::default(),
            layout: PlaceholderLayout::default(),
            style: FlowStyle::default(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.project_root = std::env::current_dir().unwrap_or_default();

        config.focal_entity = config.focal_entity.trim().to_string();
        if config.focal_entity.is_empty() {
            return Err(ConfigError::InvalidValue(
                "focal_entity must not be empty".to_string(),
            ));
        }

        if config.layout.focal == config.layout.other {
            return Err(ConfigError::InvalidValue(format!(
                "layout.focal ({}, {}) must differ from layout.other",
                config.layout.focal.x, config.layout.focal.y
            )));
        }

        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Resolve a path relative to the project root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
