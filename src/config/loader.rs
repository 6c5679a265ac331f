//! Configuration Loader
//!
//! 配置加载优先级: 默认值 < 配置文件 < 环境变量

use std::path::Path;

use config::{Config, Environment, File};
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 按顺序尝试加载的配置文件名 (不含扩展名)
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 依次叠加默认值、工作目录下的配置文件、FABLIER_ 前缀的环境变量
/// 环境变量用双下划线分隔层级，如 FABLIER_SERVER__PORT=8080
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定目录加载配置
pub fn load_config_from_path(config_dir: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("database.path", "data/fablier.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    for name in CONFIG_FILE_NAMES {
        let file = match config_dir {
            Some(dir) => File::from(dir.join(name)),
            None => File::with_name(name),
        };
        builder = builder.add_source(file.required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("FABLIER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 校验配置合法性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port must be greater than 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印当前配置概要
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Max Connections: {}", config.database.max_connections);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DatabaseConfig, LogConfig, ServerConfig};

    #[test]
    fn test_load_default_config() {
        let config = load_config_from_path(Some(Path::new("/nonexistent"))).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_validate_config_passes() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = AppConfig {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 0,
            },
            database: DatabaseConfig::default(),
            log: LogConfig::default(),
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_db_path() {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                path: String::new(),
                max_connections: 5,
            },
            log: LogConfig::default(),
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
