//! 命令行运行器
//!
//! `bone_poser <skeleton.json> [config.toml|config.json]`：加载骨骼文档，打印分组报告。

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::Path;

use super::error::{PoserError, PoserResult};
use super::logging::init_logging;
use crate::config::{ConfigFormat, PoserConfig};
use crate::session::PoseSession;
use crate::skeleton::BoneNode;

/// 骨骼文档：序列化后的骨骼列表，仅用于调试
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonDocument {
    pub bones: Vec<BoneNode>,
}

impl SkeletonDocument {
    pub fn from_json_str(content: &str) -> PoserResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PoserResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// 运行器
pub struct Runner;

impl Runner {
    /// 从进程参数运行
    pub fn run() -> PoserResult<()> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let report = Self::run_with_args(&args)?;
        print!("{}", report);
        Ok(())
    }

    /// 解析参数、加载配置和骨骼，返回分组报告
    pub fn run_with_args(args: &[String]) -> PoserResult<String> {
        let skeleton_path = args.first().ok_or_else(|| {
            PoserError::Usage("bone_poser <skeleton.json> [config.toml|config.json]".to_string())
        })?;

        let config = Self::load_config(args.get(1).map(Path::new))?;
        init_logging(&config.logging);
        tracing::info!(target: "poser", "Loading skeleton from {}", skeleton_path);

        let document = SkeletonDocument::from_json_file(skeleton_path)?;
        let mut session = PoseSession::new(&config);
        let load = session.load(document.bones);
        if !load.duplicate_ids.is_empty() {
            tracing::warn!(
                target: "poser",
                "{} duplicate bones ignored",
                load.duplicate_ids.len()
            );
        }

        Ok(Self::render_report(&session))
    }

    /// 显式给出路径时只加载该文件，否则自动查找
    fn load_config(path: Option<&Path>) -> PoserResult<PoserConfig> {
        let mut config = match path {
            Some(path) => PoserConfig::from_file(path, ConfigFormat::from_path(path))?,
            None => PoserConfig::load_or_default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 非空分组及其骨骼名称
    pub fn render_report(session: &PoseSession) -> String {
        let registry = session.registry();
        let mut out = String::new();
        let _ = writeln!(out, "{} bones", registry.len());
        for (group, ids) in session.groups().non_empty() {
            let _ = writeln!(out, "{} ({})", group, ids.len());
            for id in ids {
                if let Some(bone) = registry.find_by_id(*id) {
                    let _ = writeln!(out, "  - {}", bone.name);
                }
            }
        }
        out
    }
}
