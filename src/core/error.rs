//! 统一错误处理模块
//!
//! ## 错误类型分层
//!
//! - **姿态操作错误** (`PoseError`): 查找、重置、约束等操作返回的可恢复信号
//! - **运行器错误** (`PoserError`): 命令行运行器的配置、IO、骨骼文档解析错误
//!
//! 核心层没有致命错误：空骨骼、空候选列表都是合法的退化状态，而不是错误。

use crate::config::ConfigError;
use crate::skeleton::NodeId;
use thiserror::Error;

/// 姿态操作错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    /// 未知骨骼ID（或该骨骼没有快照）
    #[error("Bone not found: {0}")]
    NotFound(NodeId),

    /// 按名称查找失败
    #[error("Bone named '{0}' not found")]
    NameNotFound(String),

    /// 约束范围无效（要求 min < max）
    #[error("Invalid rotation range: min {min} must be less than max {max}")]
    InvalidRange { min: f32, max: f32 },
}

impl PoseError {
    /// 是否为查找失败类错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, PoseError::NotFound(_) | PoseError::NameNotFound(_))
    }
}

pub type PoseResult<T> = Result<T, PoseError>;

/// 运行器错误类型
#[derive(Error, Debug)]
pub enum PoserError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pose error: {0}")]
    Pose(#[from] PoseError),

    #[error("Skeleton document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage: {0}")]
    Usage(String),
}

pub type PoserResult<T> = Result<T, PoserError>;
