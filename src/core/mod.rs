//! 核心模块
//!
//! - `error` - 错误类型定义
//! - `logging` - 日志初始化
//! - `runner` - 命令行运行器
//! - `macros` - 通用宏

pub mod error;
pub mod logging;
pub mod runner;
#[macro_use]
pub mod macros;

pub use error::{PoseError, PoseResult, PoserError, PoserResult};
pub use logging::init_logging;
pub use runner::{Runner, SkeletonDocument};
