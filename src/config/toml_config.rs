use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub directory: DirectoryMeta,
    pub source: SourceConfig,
    pub display: Option<DisplayConfig>,
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryMeta {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// 啟動時的預設查詢字串 (與網址查詢同格式)
    pub query: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("directory.name", &self.directory.name)?;
        validate_url("source.endpoint", &self.source.endpoint)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        if let Some(display) = &self.display {
            if let Some(format) = &display.format {
                validate_one_of("display.format", format, &["table", "csv", "json"])?;
            }
        }

        Ok(())
    }

    pub fn headers(&self) -> HashMap<String, String> {
        self.source.headers.clone().unwrap_or_default()
    }

    pub fn display_format(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.format.as_deref())
    }

    pub fn default_query(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.query.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[directory]
name = "docscope"
description = "Doctor directory browser"

[source]
endpoint = "https://api.example.com/doctors.json"
timeout_seconds = 10

[display]
format = "json"

[defaults]
query = "sort=fees"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.directory.name, "docscope");
        assert_eq!(config.source.endpoint, "https://api.example.com/doctors.json");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.display_format(), Some("json"));
        assert_eq!(config.default_query(), Some("sort=fees"));
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn test_optional_sections_can_be_omitted() {
        let toml_content = r#"
[directory]
name = "docscope"

[source]
endpoint = "https://api.example.com/doctors.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.display_format(), None);
        assert_eq!(config.default_query(), None);
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOCSCOPE_TEST_HOST", "mock.example.com");

        let toml_content = r#"
[directory]
name = "docscope"

[source]
endpoint = "https://${DOCSCOPE_TEST_HOST}/doctors.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source.endpoint, "https://mock.example.com/doctors.json");

        std::env::remove_var("DOCSCOPE_TEST_HOST");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[directory]
name = "docscope"

[source]
endpoint = "https://${DOCSCOPE_UNSET_VAR}/doctors.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.source.endpoint.contains("${DOCSCOPE_UNSET_VAR}"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let toml_content = r#"
[directory]
name = "docscope"

[source]
endpoint = "ftp://files.example.com/doctors.json"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate_config().is_err());

        let toml_content = r#"
[directory]
name = "docscope"

[source]
endpoint = "https://api.example.com/doctors.json"

[display]
format = "xml"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate_config().is_err());
    }

    #[test]
    fn test_from_file_reads_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[directory]
name = "docscope"

[source]
endpoint = "https://api.example.com/doctors.json"
"#
        )
        .unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.directory.name, "docscope");
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let result = TomlConfig::from_toml_str("not valid toml [");
        assert!(matches!(result, Err(DirectoryError::ConfigError { .. })));
    }
}
