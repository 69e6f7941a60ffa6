pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::nominatim::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
#[cfg(feature = "cli")]
use crate::core::render::DEFAULT_OUTPUT_FILE;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_INPUT_FILE: &str = "locations.txt";
pub const MAX_TIMEOUT_SECS: u64 = 300;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "place-map")]
#[command(about = "Geocode a list of places and render them on an HTML map")]
pub struct CliConfig {
    /// Text file with one `<name> [description]` per line
    #[arg(long, default_value = DEFAULT_INPUT_FILE)]
    pub input: String,

    /// Directory that receives the map (and the report, if any)
    #[arg(long, default_value = ".")]
    pub output_dir: String,

    /// Also write a per-record resolution report (CSV) with this file name
    #[arg(long)]
    pub report: Option<String>,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-lookup timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Page title of the generated map
    #[arg(long)]
    pub title: Option<String>,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    /// Parse the input and show what would be looked up, without network access
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        DEFAULT_OUTPUT_FILE
    }

    fn report_file(&self) -> Option<&str> {
        self.report.as_deref()
    }

    fn geocoder_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("--input", &self.input)?;
        validation::validate_path("--output-dir", &self.output_dir)?;
        validation::validate_url("--endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("--user-agent", &self.user_agent)?;
        validation::validate_range("--timeout-secs", self.timeout_secs, 1, MAX_TIMEOUT_SECS)?;

        if let Some(report) = &self.report {
            validation::validate_file_extension("--report", report, &["csv"])?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_uses_defaults() {
        let config = CliConfig::try_parse_from(["place-map"]).unwrap();

        assert_eq!(config.input_path(), "locations.txt");
        assert_eq!(config.output_path(), ".");
        assert_eq!(config.output_file(), "locations_map.html");
        assert_eq!(config.geocoder_endpoint(), "https://nominatim.openstreetmap.org/search");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.report_file().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = CliConfig::try_parse_from([
            "place-map",
            "--input",
            "trip.txt",
            "--report",
            "trip.csv",
            "--timeout-secs",
            "3",
            "--output-dir",
            "maps",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(config.input_path(), "trip.txt");
        assert_eq!(config.output_path(), "maps");
        assert_eq!(config.report_file(), Some("trip.csv"));
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.dry_run);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = CliConfig::try_parse_from(["place-map", "--endpoint", "not a url"]).unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::try_parse_from(["place-map", "--timeout-secs", "0"]).unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::try_parse_from(["place-map", "--report", "report.txt"]).unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::try_parse_from(["place-map", "--output-dir", ""]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_path_flag_is_not_accepted() {
        assert!(CliConfig::try_parse_from(["place-map", "--output-path", "maps"]).is_err());
    }
}
