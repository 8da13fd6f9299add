/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量和运行时覆盖
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::impl_default;

pub mod classifier;
pub mod constraints;

pub use classifier::{ClassifierConfig, SideMarker};
pub use constraints::ConstraintConfig;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// 根据扩展名推断格式，未知扩展名按TOML处理
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// 主配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoserConfig {
    /// 骨骼分类词表
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// 旋转约束默认值
    #[serde(default)]
    pub constraints: ConstraintConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PoserConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("POSER_LOG_LEVEL") {
            if let Ok(level) = val.parse() {
                self.logging.level = level;
            }
        }
        if let Ok(val) = env::var("POSER_CONSTRAINT_MIN") {
            if let Ok(min) = val.parse() {
                self.constraints.default_min = min;
            }
        }
        if let Ok(val) = env::var("POSER_CONSTRAINT_MAX") {
            if let Ok(max) = val.parse() {
                self.constraints.default_max = max;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.classifier.validate()?;
        self.constraints.validate()?;
        Ok(())
    }

    /// 按指定格式加载配置文件
    pub fn from_file<P: AsRef<Path>>(path: P, format: ConfigFormat) -> ConfigResult<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml_file(path),
            ConfigFormat::Json => Self::from_json_file(path),
        }
    }

    /// 用户配置目录中的配置文件路径
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bone_poser").join("config.toml"))
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./poser.toml
    /// 2. ./poser.json
    /// 3. <config_dir>/bone_poser/config.toml
    /// 4. 使用默认配置
    ///
    /// 找到但验证失败的文件会被跳过。
    pub fn load_or_default() -> Self {
        let mut candidates = vec![
            (PathBuf::from("poser.toml"), ConfigFormat::Toml),
            (PathBuf::from("poser.json"), ConfigFormat::Json),
        ];
        if let Some(path) = Self::user_config_path() {
            candidates.push((path, ConfigFormat::Toml));
        }

        for (path, format) in candidates {
            if !path.exists() {
                continue;
            }
            let loaded = Self::from_file(&path, format).and_then(|config| {
                config.validate()?;
                Ok(config)
            });
            match loaded {
                Ok(config) => {
                    tracing::info!(target: "config", "Loaded config from {:?}", path);
                    return config;
                }
                Err(e) => {
                    tracing::warn!(target: "config", "Ignoring config {:?}: {}", path, e);
                }
            }
        }

        tracing::info!(target: "config", "Using default configuration");
        Self::default()
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 未设置时生效）
    pub level: LogLevel,

    /// 是否输出日志目标
    pub with_target: bool,

    /// 是否使用ANSI颜色
    pub ansi: bool,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    with_target: true,
    ansi: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::ParseError(format!("unknown log level '{}'", other))),
        }
    }
}
