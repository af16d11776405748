pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::core::fetcher::DEFAULT_TIMEOUT_SECS;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "trojan-forward")]
    #[command(about = "Convert trojan:// subscription links into forward= entries")]
    pub struct CliConfig {
        /// Subscription URL; prompted for when neither --url nor --input is given
        #[arg(long, conflicts_with = "input")]
        pub url: Option<String>,

        /// Read already decoded subscription text from a local file
        #[arg(long)]
        pub input: Option<String>,

        #[arg(long, default_value = ".")]
        pub output_dir: String,

        /// Save to this file name without asking
        #[arg(long, conflicts_with = "no_save")]
        pub save: Option<String>,

        /// Print the result only, never ask to save
        #[arg(long)]
        pub no_save: bool,

        /// Request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        pub timeout: u64,

        #[arg(long)]
        pub user_agent: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn source_url(&self) -> Option<&str> {
            self.url.as_deref()
        }

        fn input_path(&self) -> Option<&str> {
            self.input.as_deref()
        }

        fn output_dir(&self) -> &str {
            &self.output_dir
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout
        }

        fn user_agent(&self) -> Option<&str> {
            self.user_agent.as_deref()
        }

        fn headers(&self) -> HashMap<String, String> {
            HashMap::new()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(url) = &self.url {
                validate_url("url", url)?;
            }
            if let Some(input) = &self.input {
                validate_path("input", input)?;
            }
            if let Some(name) = &self.save {
                validate_non_empty_string("save", name)?;
            }
            validate_path("output_dir", &self.output_dir)?;
            validate_positive_number("timeout", self.timeout, 1)?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_defaults() {
            let config = CliConfig::parse_from(["trojan-forward"]);
            assert!(config.url.is_none());
            assert_eq!(config.output_dir, ".");
            assert_eq!(config.timeout, 30);
            assert!(!config.no_save);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_parse_full_arguments() {
            let config = CliConfig::parse_from([
                "trojan-forward",
                "--url",
                "https://sub.example.com/api?token=t",
                "--save",
                "forward.conf",
                "--timeout",
                "10",
                "--verbose",
            ]);
            assert_eq!(config.source_url(), Some("https://sub.example.com/api?token=t"));
            assert_eq!(config.save.as_deref(), Some("forward.conf"));
            assert_eq!(config.timeout_seconds(), 10);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_conflicting_sources_are_rejected() {
            let result = CliConfig::try_parse_from([
                "trojan-forward",
                "--url",
                "https://a.example",
                "--input",
                "sub.txt",
            ]);
            assert!(result.is_err());

            let result =
                CliConfig::try_parse_from(["trojan-forward", "--save", "x", "--no-save"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_validation_failures() {
            let mut config = CliConfig::parse_from(["trojan-forward"]);
            config.url = Some("ftp://example.com".to_string());
            assert!(config.validate().is_err());

            let mut config = CliConfig::parse_from(["trojan-forward"]);
            config.timeout = 0;
            assert!(config.validate().is_err());
        }
    }
}
