use std::fmt;

use crate::command::ValidationError;
use crate::store::StoreError;
use crate::utils::url_validator::UrlValidationError;

#[derive(Debug, Clone)]
pub enum LinkbotError {
    Config(String),
    Validation(String),
    Store(String),
    Transport(String),
    Serialization(String),
    FileOperation(String),
    Telegram(String),
    Logging(String),
}

impl LinkbotError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkbotError::Config(_) => "E001",
            LinkbotError::Validation(_) => "E002",
            LinkbotError::Store(_) => "E003",
            LinkbotError::Transport(_) => "E004",
            LinkbotError::Serialization(_) => "E005",
            LinkbotError::FileOperation(_) => "E006",
            LinkbotError::Telegram(_) => "E007",
            LinkbotError::Logging(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkbotError::Config(_) => "Configuration Error",
            LinkbotError::Validation(_) => "Validation Error",
            LinkbotError::Store(_) => "Link Store Error",
            LinkbotError::Transport(_) => "Transport Error",
            LinkbotError::Serialization(_) => "Serialization Error",
            LinkbotError::FileOperation(_) => "File Operation Error",
            LinkbotError::Telegram(_) => "Telegram API Error",
            LinkbotError::Logging(_) => "Logging Setup Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkbotError::Config(msg) => msg,
            LinkbotError::Validation(msg) => msg,
            LinkbotError::Store(msg) => msg,
            LinkbotError::Transport(msg) => msg,
            LinkbotError::Serialization(msg) => msg,
            LinkbotError::FileOperation(msg) => msg,
            LinkbotError::Telegram(msg) => msg,
            LinkbotError::Logging(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkbotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkbotError {}

// 便捷的构造函数
impl LinkbotError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkbotError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkbotError::Validation(msg.into())
    }

    pub fn store<T: Into<String>>(msg: T) -> Self {
        LinkbotError::Store(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        LinkbotError::Transport(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkbotError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkbotError::FileOperation(msg.into())
    }

    pub fn telegram<T: Into<String>>(msg: T) -> Self {
        LinkbotError::Telegram(msg.into())
    }

    pub fn logging<T: Into<String>>(msg: T) -> Self {
        LinkbotError::Logging(msg.into())
    }
}

impl From<StoreError> for LinkbotError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(_) => LinkbotError::Transport(err.to_string()),
            StoreError::Decode(_) => LinkbotError::Serialization(err.to_string()),
            StoreError::Status(_) => LinkbotError::Store(err.to_string()),
        }
    }
}

impl From<ValidationError> for LinkbotError {
    fn from(err: ValidationError) -> Self {
        LinkbotError::Validation(err.to_string())
    }
}

impl From<UrlValidationError> for LinkbotError {
    fn from(err: UrlValidationError) -> Self {
        LinkbotError::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for LinkbotError {
    fn from(err: config::ConfigError) -> Self {
        LinkbotError::Config(err.to_string())
    }
}

impl From<std::io::Error> for LinkbotError {
    fn from(err: std::io::Error) -> Self {
        LinkbotError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkbotError {
    fn from(err: serde_json::Error) -> Self {
        LinkbotError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for LinkbotError {
    fn from(err: toml::ser::Error) -> Self {
        LinkbotError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkbotError>;
