use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::scoring::ScoringConfig;

/// 存储后端类型
///
/// 两种后端不会同时作为同一实体的权威来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// 关系型数据库（SQLite / MySQL / PostgreSQL，经 SeaORM）
    #[default]
    Relational,
    /// 文档存储
    Document,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relational" | "sql" => Ok(Self::Relational),
            "document" | "doc" => Ok(Self::Document),
            _ => Err(format!(
                "Invalid storage backend: '{}'. Valid: relational, document",
                s
            )),
        }
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: HTTP 服务地址、端口、API 前缀、CORS
/// - database: 数据库连接配置
/// - storage: 推荐链接使用的存储后端
/// - resolver: 代理信息远程解析配置
/// - session: 浏览会话配置
/// - scoring: 评分权重与阈值
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：AGL，分隔符：__
    /// 示例：AGL__SERVER__PORT=9999
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 AGL，分隔符 __
            .add_source(
                Environment::with_prefix("AGL")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        };

        // 日志系统此时尚未初始化，只能输出到 stderr
        if let Err(e) = config.scoring.validate() {
            eprintln!("[WARN] Invalid scoring config ({}), using defaults", e);
            config.scoring = ScoringConfig::default();
        }

        config
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// 允许跨域访问的落地页来源，空表示不启用 CORS
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 推荐链接存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// 代理信息解析配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// 解析端点，请求形如 `<endpoint>?ref=<code>&cid=<campaign>`
    #[serde(default = "default_resolver_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_resolver_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_resolver_max_capacity")]
    pub max_capacity: u64,
    #[serde(default = "default_resolver_timeout")]
    pub timeout_secs: u64,
    /// 瞬时失败后的最大自动重试次数
    #[serde(default = "default_resolver_max_retries")]
    pub max_retries: u32,
}

/// 浏览会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_cookie")]
    pub cookie_name: String,
    /// 会话空闲超时，超时后归因数据随会话一起丢弃
    #[serde(default = "default_session_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_session_max")]
    pub max_sessions: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "agentlink.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_resolver_endpoint() -> String {
    "http://127.0.0.1:54321/functions/v1/resolve-agent".to_string()
}

fn default_resolver_cache_ttl() -> u64 {
    5 * 60
}

fn default_resolver_max_capacity() -> u64 {
    10_000
}

fn default_resolver_timeout() -> u64 {
    5
}

fn default_resolver_max_retries() -> u32 {
    1
}

fn default_session_cookie() -> String {
    "agl_sid".to_string()
}

fn default_session_idle_timeout() -> u64 {
    30 * 60
}

fn default_session_max() -> u64 {
    100_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
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
            api_prefix: default_api_prefix(),
            cors_origins: Vec::new(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: default_resolver_endpoint(),
            cache_ttl_secs: default_resolver_cache_ttl(),
            max_capacity: default_resolver_max_capacity(),
            timeout_secs: default_resolver_timeout(),
            max_retries: default_resolver_max_retries(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_session_cookie(),
            idle_timeout_secs: default_session_idle_timeout(),
            max_sessions: default_session_max(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
