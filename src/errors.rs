use std::fmt;

#[derive(Debug, Clone)]
pub enum AgentlinkError {
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    Lookup(String),
}

impl AgentlinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AgentlinkError::Config(_) => "E001",
            AgentlinkError::DatabaseConfig(_) => "E002",
            AgentlinkError::DatabaseConnection(_) => "E003",
            AgentlinkError::DatabaseOperation(_) => "E004",
            AgentlinkError::FileOperation(_) => "E005",
            AgentlinkError::Validation(_) => "E006",
            AgentlinkError::NotFound(_) => "E007",
            AgentlinkError::Serialization(_) => "E008",
            AgentlinkError::Lookup(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AgentlinkError::Config(_) => "Configuration Error",
            AgentlinkError::DatabaseConfig(_) => "Database Configuration Error",
            AgentlinkError::DatabaseConnection(_) => "Database Connection Error",
            AgentlinkError::DatabaseOperation(_) => "Database Operation Error",
            AgentlinkError::FileOperation(_) => "File Operation Error",
            AgentlinkError::Validation(_) => "Validation Error",
            AgentlinkError::NotFound(_) => "Resource Not Found",
            AgentlinkError::Serialization(_) => "Serialization Error",
            AgentlinkError::Lookup(_) => "Agent Lookup Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            AgentlinkError::Config(msg)
            | AgentlinkError::DatabaseConfig(msg)
            | AgentlinkError::DatabaseConnection(msg)
            | AgentlinkError::DatabaseOperation(msg)
            | AgentlinkError::FileOperation(msg)
            | AgentlinkError::Validation(msg)
            | AgentlinkError::NotFound(msg)
            | AgentlinkError::Serialization(msg)
            | AgentlinkError::Lookup(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
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

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AgentlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AgentlinkError {}

// 便捷的构造函数
impl AgentlinkError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::Serialization(msg.into())
    }

    pub fn lookup<T: Into<String>>(msg: T) -> Self {
        AgentlinkError::Lookup(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AgentlinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        AgentlinkError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AgentlinkError {
    fn from(err: std::io::Error) -> Self {
        AgentlinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AgentlinkError {
    fn from(err: serde_json::Error) -> Self {
        AgentlinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AgentlinkError>;
