//! 日志初始化
//!
//! 基于 `tracing` + `tracing-subscriber`。`RUST_LOG` 环境变量优先，
//! 未设置时使用配置中的日志级别。

use crate::config::{LogLevel, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// 构建日志过滤器
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter_directive()))
}

/// 初始化日志系统
///
/// 可重复调用：全局订阅者已存在时静默跳过。
pub fn init_logging(config: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .try_init();
    tracing::debug!(target: "poser", "Logging initialized at {:?}", config.level);
}

impl LogLevel {
    /// 转换为 EnvFilter 指令
    pub fn as_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(LogLevel::Warn.as_filter_directive(), "warn");
        assert_eq!(LogLevel::Trace.as_filter_directive(), "trace");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        let config = LoggingConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
