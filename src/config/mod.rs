pub mod cli;
pub mod toml_config;

use crate::core::query;
use crate::domain::model::{ConsultationMode, FilterState, SortKey};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{
    validate_one_of, validate_path, validate_positive_number, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "docscope"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Browse, search and filter a remote doctor directory")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_API_ENDPOINT))]
    pub api_endpoint: String,

    // 以原始查詢字串作為初始狀態,與旗標互斥 (query 優先)
    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Initial state as a URL query string, e.g. \"search=cardio&sort=fees\"")
    )]
    pub query: Option<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub search: Option<String>,

    #[cfg_attr(
        feature = "cli",
        arg(long = "type", value_name = "MODE", help = "Consultation mode: video or clinic")
    )]
    pub consultation_type: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub specialties: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Sort order: fees or experience"))]
    pub sort: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "table"))]
    pub format: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Write the rendered output to a file"))]
    pub output: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Path to a TOML configuration file"))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub timeout_seconds: Option<u64>,

    #[cfg_attr(feature = "cli", arg(long, help = "Start an interactive session"))]
    pub interactive: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub log_json: bool,

    #[cfg_attr(feature = "cli", arg(long))]
    pub monitor: bool,
}

impl CliConfig {
    /// 組出引擎掛載時的初始查詢字串。
    /// --query 給了就原樣採用 (貼上的網址查詢能完整重現畫面),
    /// 否則由個別旗標組裝。
    pub fn seed_query(&self) -> Result<String> {
        if let Some(query) = &self.query {
            return Ok(query.clone());
        }

        let mut filters = FilterState::default();

        if let Some(search) = &self.search {
            filters.search_term = search.clone();
        }
        if let Some(mode) = &self.consultation_type {
            filters.consultation_type = Some(parse_mode_flag(mode)?);
        }
        filters.specialties = self.specialties.clone();
        if let Some(sort) = &self.sort {
            filters.sort_by =
                Some(
                    SortKey::parse(sort).ok_or_else(|| DirectoryError::InvalidConfigValueError {
                        field: "sort".to_string(),
                        value: sort.clone(),
                        reason: "Valid values: fees, experience".to_string(),
                    })?,
                );
        }

        Ok(query::serialize(&filters))
    }
}

/// CLI 旗標接受簡寫,查詢字串仍使用正式字面值
fn parse_mode_flag(value: &str) -> Result<ConsultationMode> {
    match value.to_lowercase().as_str() {
        "video" | "video consult" => Ok(ConsultationMode::VideoConsult),
        "clinic" | "in clinic" => Ok(ConsultationMode::InClinic),
        _ => Err(DirectoryError::InvalidConfigValueError {
            field: "type".to_string(),
            value: value.to_string(),
            reason: "Valid values: video, clinic".to_string(),
        }),
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_one_of("format", &self.format, &["table", "csv", "json"])?;

        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            query: None,
            search: None,
            consultation_type: None,
            specialties: vec![],
            sort: None,
            format: "table".to_string(),
            output: None,
            config: None,
            timeout_seconds: None,
            interactive: false,
            verbose: false,
            log_json: false,
            monitor: false,
        }
    }

    #[test]
    fn test_seed_query_prefers_raw_query() {
        let config = CliConfig {
            query: Some("search=cardio&sort=fees".to_string()),
            search: Some("ignored".to_string()),
            ..base_config()
        };

        assert_eq!(config.seed_query().unwrap(), "search=cardio&sort=fees");
    }

    #[test]
    fn test_seed_query_assembles_flags() {
        let config = CliConfig {
            search: Some("jon".to_string()),
            consultation_type: Some("video".to_string()),
            specialties: vec!["Dentist".to_string()],
            sort: Some("experience".to_string()),
            ..base_config()
        };

        assert_eq!(
            config.seed_query().unwrap(),
            "search=jon&type=Video+Consult&specialties=Dentist&sort=experience"
        );
    }

    #[test]
    fn test_seed_query_rejects_unknown_sort_and_mode() {
        let config = CliConfig {
            sort: Some("name".to_string()),
            ..base_config()
        };
        assert!(config.seed_query().is_err());

        let config = CliConfig {
            consultation_type: Some("house-call".to_string()),
            ..base_config()
        };
        assert!(config.seed_query().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_format_and_endpoint() {
        let config = CliConfig {
            format: "xml".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            api_endpoint: "not-a-url".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());

        assert!(base_config().validate().is_ok());
    }
}
