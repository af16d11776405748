use crate::core::fetcher::DEFAULT_TIMEOUT_SECS;
use crate::core::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub input: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
    /// When set, the result is saved here without prompting.
    pub filename: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUB_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.source.url, &self.source.input) {
            (Some(url), None) => validation::validate_url("source.url", url)?,
            (None, Some(input)) => validation::validate_path("source.input", input)?,
            (Some(_), Some(_)) => {
                return Err(ConvertError::ConfigValidationError {
                    field: "source".to_string(),
                    message: "set either source.url or source.input, not both".to_string(),
                })
            }
            (None, None) => {
                validation::validate_required_field("source.url", &self.source.url)?;
            }
        }

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        if let Some(output) = &self.output {
            if let Some(dir) = &output.directory {
                validation::validate_path("output.directory", dir)?;
            }
            if let Some(name) = &output.filename {
                validation::validate_non_empty_string("output.filename", name)?;
            }
        }

        Ok(())
    }

    pub fn output_filename(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.filename.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> Option<&str> {
        self.source.url.as_deref()
    }

    fn input_path(&self) -> Option<&str> {
        self.source.input.as_deref()
    }

    fn output_dir(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.directory.as_deref())
            .unwrap_or(".")
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn user_agent(&self) -> Option<&str> {
        self.source.user_agent.as_deref()
    }

    fn headers(&self) -> HashMap<String, String> {
        self.source.headers.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
