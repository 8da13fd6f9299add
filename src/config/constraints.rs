use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// 旋转约束配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    /// 未覆盖时每个轴的默认下限（弧度）
    pub default_min: f32,
    /// 未覆盖时每个轴的默认上限（弧度）
    pub default_max: f32,
}

impl_default!(ConstraintConfig {
    default_min: -PI,
    default_max: PI,
});

impl ConstraintConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let (min, max) = (self.default_min, self.default_max);
        if min.is_nan() || max.is_nan() || min >= max {
            return Err(ConfigError::ValidationError(format!(
                "default rotation range [{}, {}] must satisfy min < max",
                min, max
            )));
        }
        Ok(())
    }
}
