//! TOML configuration.
//!
//! ```toml
//! [columns]
//! child_name = "childTableName"
//! delimiter = ","
//!
//! [view]
//! hidden_node_types = ["View"]
//! hidden_relationships = ["copies"]
//!
//! [view.filters]
//! parentTableType = ["Table"]
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::ColumnMapping;
use crate::session::LineageSession;
use crate::visibility::ViewState;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lineagescope.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Initial filters and hide-sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub hidden_nodes: BTreeSet<String>,
    pub hidden_node_types: BTreeSet<String>,
    pub hidden_relationships: BTreeSet<String>,
    /// Column name to selected values
    pub filters: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnMapping,
    pub view: ViewConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads the explicit path if given, else [`DEFAULT_CONFIG_FILE`] from
    /// `dir` if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// The hide-sets to start a session with.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            hidden_node_ids: self.view.hidden_nodes.clone(),
            hidden_node_types: self.view.hidden_node_types.clone(),
            hidden_relationships: self.view.hidden_relationships.clone(),
        }
    }

    /// Applies the configured column filters to a session.
    pub fn apply_filters(&self, session: &mut LineageSession) {
        for (column, values) in &self.view.filters {
            session.set_column_filter(column, values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LineageStore;
    use crate::parser::LineageRow;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.columns, ColumnMapping::default());
        assert_eq!(config.logging.level, "warn");
        assert!(config.view_state().is_clear());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [columns]
            child_name = "dst"
            delimiter = ";"

            [view]
            hidden_nodes = ["staging"]
            hidden_node_types = ["View"]
            hidden_relationships = ["copies"]

            [view.filters]
            parentTableType = ["Table"]

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.columns.child_name, "dst");
        assert_eq!(config.columns.delimiter, ';');
        assert_eq!(config.columns.parent_name, "parentTableName");
        assert!(config.view.hidden_nodes.contains("staging"));
        assert_eq!(config.view.filters["parentTableType"], vec!["Table"]);
        assert_eq!(config.logging.level, "debug");

        let view = config.view_state();
        assert!(view.hidden_node_types.contains("View"));
        assert!(view.hidden_relationships.contains("copies"));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml("[columns\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[logging]\nlevel = \"info\"\n").unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.logging.level, "info");

        let missing = dir.path().join("nope.toml");
        let err = Config::discover(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_apply_filters() {
        let mut session = LineageSession::new(LineageStore::build(vec![
            LineageRow::new("v1", "View", "reads", "t1", "Table"),
            LineageRow::new("v2", "View", "writes", "t1", "Table"),
        ]));
        let config = Config::from_toml("[view.filters]\nrelationship = [\"writes\"]\n").unwrap();

        config.apply_filters(&mut session);
        assert_eq!(session.visible().edge_count(), 1);
    }
}
