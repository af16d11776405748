use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("请求失败，状态码: {status}")]
    HttpStatus { status: u16 },

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("内容解码失败，可能不是有效的base64编码")]
    InvalidEncoding { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Decode,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::HttpStatus { .. } | ConvertError::RequestError(_) => {
                ErrorCategory::Network
            }
            ConvertError::InvalidEncoding { .. } => ErrorCategory::Decode,
            ConvertError::IoError(_) => ErrorCategory::Io,
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端暫時性錯誤，重試可能成功
            ConvertError::RequestError(_) => ErrorSeverity::Medium,
            ConvertError::HttpStatus { status } if *status >= 500 => ErrorSeverity::Medium,
            ConvertError::HttpStatus { .. } | ConvertError::InvalidEncoding { .. } => {
                ErrorSeverity::High
            }
            ConvertError::IoError(_) => ErrorSeverity::Critical,
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => ErrorSeverity::High,
        }
    }

    /// True for failures produced while fetching or decoding the payload.
    /// Callers use this instead of matching on message prefixes.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Decode
        )
    }

    /// Process exit status for this failure. Fetch and decode failures exit
    /// non-zero so scripts can tell an empty conversion from a failed one.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::HttpStatus { .. } | ConvertError::InvalidEncoding { .. } => {
                self.to_string()
            }
            ConvertError::RequestError(e) if e.is_timeout() => {
                "请求超时，无法获取订阅内容".to_string()
            }
            ConvertError::RequestError(_) => "无法连接到订阅地址".to_string(),
            ConvertError::IoError(e) => format!("文件读写失败: {}", e),
            _ => format!("配置错误: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::HttpStatus { status } if *status == 404 => {
                "Check that the subscription URL is correct"
            }
            ConvertError::HttpStatus { status } if *status == 401 || *status == 403 => {
                "The subscription token may have expired; request a new link"
            }
            ConvertError::HttpStatus { .. } => "Retry later or contact the subscription provider",
            ConvertError::RequestError(_) => {
                "Check network connectivity or raise the request timeout"
            }
            ConvertError::InvalidEncoding { .. } => {
                "Make sure the URL returns a base64 subscription, or pass the decoded text with --input"
            }
            ConvertError::IoError(_) => "Check file permissions and available disk space",
            _ => "Review the command line arguments and configuration file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
