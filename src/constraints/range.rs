//! 旋转范围

use serde::Serialize;

use crate::config::ConstraintConfig;
use crate::core::error::{PoseError, PoseResult};
use crate::skeleton::Axis;

/// 单轴旋转范围（弧度），保证 `min < max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationRange {
    min: f32,
    max: f32,
}

impl RotationRange {
    /// 创建范围；`min >= max` 或任一端为 NaN 时返回 `InvalidRange`
    pub fn new(min: f32, max: f32) -> PoseResult<Self> {
        if min.is_nan() || max.is_nan() || min >= max {
            return Err(PoseError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// 配置中的默认范围
    ///
    /// 配置已通过验证时不会失败；未验证的配置退回 `[-π, π]`。
    pub fn from_config(config: &ConstraintConfig) -> Self {
        Self::new(config.default_min, config.default_max).unwrap_or_default()
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// 把值限制在范围内；NaN 原样返回
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for RotationRange {
    fn default() -> Self {
        let config = ConstraintConfig::default();
        Self {
            min: config.default_min,
            max: config.default_max,
        }
    }
}

/// 三个轴的范围，用于构建滑块
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AxisRanges {
    pub x: RotationRange,
    pub y: RotationRange,
    pub z: RotationRange,
}

impl AxisRanges {
    pub fn uniform(range: RotationRange) -> Self {
        Self {
            x: range,
            y: range,
            z: range,
        }
    }

    pub fn get(&self, axis: Axis) -> RotationRange {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, range: RotationRange) {
        match axis {
            Axis::X => self.x = range,
            Axis::Y => self.y = range,
            Axis::Z => self.z = range,
        }
    }
}
