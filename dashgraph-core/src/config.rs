//! Dashboard configuration, read from TOML.
//!
//! ```toml
//! dashboard = "launches"
//! source = { path = "data/spacex_launch_dash.csv" }
//! format = "json"
//!
//! [initial]
//! "site-dropdown" = { choice = "KSC LC-39A" }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dashboards::DashboardKind;
use crate::dataset::DataSource;
use crate::error::ConfigError;
use crate::reactive::InputValue;

/// Frame encoding used by the binary's render sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    #[value(name = "msgpack")]
    MsgPack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub dashboard: DashboardKind,
    pub source: DataSource,
    #[serde(default)]
    pub format: OutputFormat,
    /// Input values applied after setup, before the first render.
    #[serde(default)]
    pub initial: IndexMap<String, InputValue>,
}

impl DashboardConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_full_config() {
        let config = DashboardConfig::from_toml_str(
            r#"
            dashboard = "auto_sales"
            source = { url = "https://example.com/sales.csv" }
            format = "msgpack"

            [initial]
            "dropdown-statistics" = { choice = "Yearly Statistics" }
            "select-year" = { choice = 1990 }
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard, DashboardKind::AutoSales);
        assert_eq!(config.source, DataSource::Url("https://example.com/sales.csv".into()));
        assert_eq!(config.format, OutputFormat::MsgPack);
        assert_eq!(config.initial["select-year"], InputValue::choice(1990));
    }

    #[test]
    fn format_and_initial_default() {
        let config = DashboardConfig::from_toml_str(
            r#"
            dashboard = "launches"
            source = { path = "launches.csv" }
            "#,
        )
        .unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.initial.is_empty());
        assert_eq!(config.source, DataSource::Path(PathBuf::from("launches.csv")));
    }

    #[test]
    fn sentinels_and_ranges_parse() {
        let config = DashboardConfig::from_toml_str(
            r#"
            dashboard = "launches"
            source = { path = "launches.csv" }

            [initial]
            "site-dropdown" = "all"
            "payload-slider" = { range = [0, 5000] }
            "#,
        )
        .unwrap();
        assert_eq!(config.initial["site-dropdown"], InputValue::All);
        assert_eq!(config.initial["payload-slider"], InputValue::Range(0.0, 5000.0));
    }

    #[test]
    fn unknown_dashboard_is_rejected() {
        let err = DashboardConfig::from_toml_str(
            r#"
            dashboard = "weather"
            source = { path = "x.csv" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
