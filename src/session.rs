//! 姿态编辑会话
//!
//! 把一副已加载骨骼的注册表、约束管理器和选中状态打包成一个由调用方持有的值。
//! 不存在全局单例：多个模型各自持有一个会话即可。

use glam::Mat4;

use crate::classify::BoneGroups;
use crate::config::PoserConfig;
use crate::constraints::{AxisRanges, RotationConstraintManager};
use crate::core::error::{PoseError, PoseResult};
use crate::picking::{BonePicker, PickQuery, PickResolution};
use crate::selection::{Selection, SelectionChange};
use crate::skeleton::{
    Axis, BoneNode, BoneRegistry, EulerRotation, LoadReport, NodeId, PartialRotation,
};

/// 一次拾取的结果及其引起的选择变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOutcome {
    pub resolution: PickResolution,
    pub change: SelectionChange,
}

/// 姿态编辑会话
#[derive(Debug, Clone, Default)]
pub struct PoseSession {
    registry: BoneRegistry,
    constraints: RotationConstraintManager,
    selection: Selection,
}

impl PoseSession {
    pub fn new(config: &PoserConfig) -> Self {
        Self {
            registry: BoneRegistry::with_config(&config.classifier),
            constraints: RotationConstraintManager::new(&config.constraints),
            selection: Selection::new(),
        }
    }

    /// 加载新骨骼：注册表、分组、约束和选中状态全部重置
    pub fn load(&mut self, nodes: Vec<BoneNode>) -> LoadReport {
        let report = self.registry.load(nodes);
        self.selection.clear();
        tracing::info!(
            target: "session",
            "Session loaded {} bones into {} groups",
            report.bone_count,
            self.registry.groups().non_empty().count()
        );
        report
    }

    pub fn registry(&self) -> &BoneRegistry {
        &self.registry
    }

    pub fn constraints(&self) -> &RotationConstraintManager {
        &self.constraints
    }

    pub fn groups(&self) -> &BoneGroups {
        self.registry.groups()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_bone(&self) -> Option<&BoneNode> {
        self.selection
            .current()
            .and_then(|id| self.registry.find_by_id(id))
    }

    pub fn set_model_transform(&mut self, transform: Mat4) {
        self.registry.set_model_transform(transform);
    }

    /// 解析拾取并选中结果骨骼
    ///
    /// 候选骨骼的世界坐标在每次拾取时按当前姿态重新计算。
    pub fn pick(&mut self, query: &PickQuery) -> Option<PickOutcome> {
        let candidates = self.registry.pick_candidates();
        let resolution = BonePicker::resolve(query, &candidates)?;
        let change = self.selection.select(resolution.bone);
        if change.is_changed() {
            tracing::debug!(
                target: "session",
                "Selected {} via {:?}",
                resolution.bone,
                resolution.tier
            );
        }
        Some(PickOutcome { resolution, change })
    }

    /// 直接选中骨骼（例如从骨骼列表点击）
    pub fn select(&mut self, id: NodeId) -> PoseResult<SelectionChange> {
        if !self.registry.contains(id) {
            return Err(PoseError::NotFound(id));
        }
        Ok(self.selection.select(id))
    }

    /// 按名称选中
    pub fn select_by_name(&mut self, name: &str) -> PoseResult<SelectionChange> {
        let id = self.registry.id_by_name(name)?;
        self.select(id)
    }

    pub fn clear_selection(&mut self) -> SelectionChange {
        self.selection.clear()
    }

    pub fn set_rotation(&mut self, id: NodeId, axis: Axis, value: f32) -> PoseResult<f32> {
        self.constraints.set_rotation(&mut self.registry, id, axis, value)
    }

    pub fn rotate(&mut self, id: NodeId, rotation: PartialRotation) -> PoseResult<EulerRotation> {
        self.constraints.rotate(&mut self.registry, id, rotation)
    }

    pub fn set_constraint(
        &mut self,
        id: NodeId,
        axis: Axis,
        min: f32,
        max: f32,
    ) -> PoseResult<f32> {
        self.constraints
            .set_constraint(&mut self.registry, id, axis, min, max)
    }

    pub fn clear_constraint(&mut self, id: NodeId, axis: Axis) -> bool {
        self.constraints.clear_constraint(&self.registry, id, axis)
    }

    pub fn constraints_for(&self, id: NodeId) -> AxisRanges {
        self.constraints.constraints_for(&self.registry, id)
    }

    pub fn reset_bone(&mut self, id: NodeId) -> PoseResult<EulerRotation> {
        self.constraints.reset_to_original(&mut self.registry, id)
    }

    pub fn reset_all(&mut self) -> usize {
        self.registry.reset_all()
    }
}
