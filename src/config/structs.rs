use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LinkbotError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，分隔符为 `__`
///
/// 示例：`LINKBOT__BACKEND__BASE_URL=https://store.example.com`
pub const ENV_PREFIX: &str = "LINKBOT";

/// 应用配置（启动时加载一次，之后只读）
///
/// - server: 监听地址、端口、worker 数量
/// - backend: 远程短链存储 API
/// - telegram: Bot token、Webhook 密钥与路径
/// - auth: 允许发送指令的用户 ID 白名单
/// - links: 短链展示与保留路径
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from TOML + environment and validate.
    ///
    /// 优先级：ENV > config file > 默认值。Any missing required value is an
    /// error; there is no partially configured mode.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = Self::load_unvalidated(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load without running [`AppConfig::validate`].
    pub fn load_unvalidated(path: Option<&str>) -> Result<Self> {
        use config::{Config, File};

        let explicit = path.is_some();
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            // 显式指定的配置文件必须存在
            .add_source(File::with_name(path).required(explicit))
            .add_source(Self::environment())
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        if std::path::Path::new(path).exists() {
            tracing::debug!("Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// `LINKBOT__SECTION__KEY` overrides.
    ///
    /// Values stay strings until deserialization, so a token such as `00123`
    /// is not turned into a number first. Typed fields still parse from text.
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    pub fn validate(&self) -> Result<()> {
        super::validators::validate_app_config(self)
    }

    /// Slugs the redirect router owns: configured ones plus the webhook path
    /// when it is a single segment.
    pub fn reserved_slugs(&self) -> Vec<String> {
        let mut reserved = self.links.reserved_slugs.clone();
        let webhook = self.telegram.webhook_path.trim_start_matches('/');
        if !webhook.is_empty() && !webhook.contains('/') {
            reserved.push(webhook.to_string());
        }
        reserved
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        let mut sample = Self::default();
        sample.backend.base_url = "https://store.example.com".to_string();
        sample.backend.admin_token = "change-me".to_string();
        sample.telegram.bot_token = "123456:ABC-DEF".to_string();
        sample.telegram.webhook_secret = "change-me-too".to_string();
        sample.auth.allowed_users = "11111111,22222222".to_string();
        sample.links.public_base_url = Some("https://s.example.com".to_string());
        Ok(toml::to_string_pretty(&sample)?)
    }

    /// 保存示例配置到文件
    pub fn save_sample_config<P: AsRef<std::path::Path>>(path: P) -> Result<()> {
        let content = Self::generate_sample_config()?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| LinkbotError::file_operation(format!("Failed to write config: {}", e)))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 远程短链存储配置
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub admin_token: String,
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

/// Telegram Bot 配置
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Compared against the `X-Telegram-Bot-Api-Secret-Token` header.
    #[serde(default)]
    pub webhook_secret: String,
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,
    #[serde(default = "default_telegram_api_base_url")]
    pub api_base_url: String,
}

/// 授权配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Comma-separated sender ids, e.g. `"11111111, 22222222"`.
    #[serde(default)]
    pub allowed_users: String,
}

/// 短链展示配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinksConfig {
    /// Base used to render `{public_base_url}/{slug}` in replies.
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default)]
    pub reserved_slugs: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// 凭据不进日志
fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("admin_token", &redact(&self.admin_token))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &redact(&self.bot_token))
            .field("webhook_secret", &redact(&self.webhook_secret))
            .field("webhook_path", &self.webhook_path)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_backend_timeout() -> u64 {
    10
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

fn default_telegram_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            admin_token: String::new(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            webhook_secret: String::new(),
            webhook_path: default_webhook_path(),
            api_base_url: default_telegram_api_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
