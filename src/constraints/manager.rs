//! 旋转约束管理
//!
//! 每根骨骼每个轴一个 `[min, max]` 范围，首次覆盖时才创建，未覆盖时使用默认范围。
//! 覆盖与注册表的加载代数绑定：注册表重新加载后，旧覆盖在下一次读写前被丢弃。

use std::collections::HashMap;

use super::range::{AxisRanges, RotationRange};
use crate::config::ConstraintConfig;
use crate::core::error::{PoseError, PoseResult};
use crate::skeleton::{Axis, BoneRegistry, EulerRotation, NodeId, PartialRotation};

/// 旋转约束管理器
#[derive(Debug, Clone, Default)]
pub struct RotationConstraintManager {
    default_range: RotationRange,
    overrides: HashMap<(NodeId, Axis), RotationRange>,
    /// 覆盖所属的注册表代数
    generation: u64,
}

impl RotationConstraintManager {
    pub fn new(config: &ConstraintConfig) -> Self {
        Self {
            default_range: RotationRange::from_config(config),
            overrides: HashMap::new(),
            generation: 0,
        }
    }

    pub fn default_range(&self) -> RotationRange {
        self.default_range
    }

    fn is_current(&self, registry: &BoneRegistry) -> bool {
        self.generation == registry.generation()
    }

    /// 注册表重新加载过时丢弃旧覆盖
    fn sync(&mut self, registry: &BoneRegistry) {
        if self.is_current(registry) {
            return;
        }
        if !self.overrides.is_empty() {
            tracing::debug!(
                target: "constraints",
                "Discarding {} overrides from generation {}",
                self.overrides.len(),
                self.generation
            );
        }
        self.overrides.clear();
        self.generation = registry.generation();
    }

    /// 当前生效的范围（覆盖或默认范围）
    ///
    /// 未知骨骼同样返回默认范围。
    pub fn get_constraint(
        &self,
        registry: &BoneRegistry,
        id: NodeId,
        axis: Axis,
    ) -> RotationRange {
        if !self.is_current(registry) {
            return self.default_range;
        }
        self.overrides
            .get(&(id, axis))
            .copied()
            .unwrap_or(self.default_range)
    }

    /// 三个轴当前生效的范围
    pub fn constraints_for(&self, registry: &BoneRegistry, id: NodeId) -> AxisRanges {
        let mut ranges = AxisRanges::uniform(self.default_range);
        for axis in Axis::ALL {
            ranges.set(axis, self.get_constraint(registry, id, axis));
        }
        ranges
    }

    /// 覆盖数（仅计当前代数）
    pub fn override_count(&self, registry: &BoneRegistry) -> usize {
        if self.is_current(registry) {
            self.overrides.len()
        } else {
            0
        }
    }

    /// 设置单轴范围，并把该轴当前值限制到新范围内
    ///
    /// 范围无效时返回 `InvalidRange`，原有范围保持不变。返回限制后的轴值。
    pub fn set_constraint(
        &mut self,
        registry: &mut BoneRegistry,
        id: NodeId,
        axis: Axis,
        min: f32,
        max: f32,
    ) -> PoseResult<f32> {
        self.sync(registry);
        if !registry.contains(id) {
            return Err(PoseError::NotFound(id));
        }

        let range = RotationRange::new(min, max).map_err(|e| {
            tracing::warn!(target: "constraints", "Rejected range for {} {}: {}", id, axis, e);
            e
        })?;
        self.overrides.insert((id, axis), range);

        let rotation = registry.rotation_mut(id).ok_or(PoseError::NotFound(id))?;
        let current = rotation.get(axis);
        if !current.is_nan() {
            rotation.set(axis, range.clamp(current));
        }
        let value = rotation.get(axis);

        tracing::debug!(
            target: "constraints",
            "Constraint {} {} = [{}, {}], value {}",
            id,
            axis,
            min,
            max,
            value
        );
        Ok(value)
    }

    /// 移除单轴覆盖，恢复默认范围；返回是否存在覆盖
    pub fn clear_constraint(&mut self, registry: &BoneRegistry, id: NodeId, axis: Axis) -> bool {
        self.sync(registry);
        self.overrides.remove(&(id, axis)).is_some()
    }

    /// 写入单轴旋转，先限制到当前范围
    ///
    /// 从不拒绝数值；NaN 保持原值不变。返回实际写入后的轴值。
    pub fn set_rotation(
        &mut self,
        registry: &mut BoneRegistry,
        id: NodeId,
        axis: Axis,
        value: f32,
    ) -> PoseResult<f32> {
        self.sync(registry);
        let range = self.get_constraint(registry, id, axis);
        let rotation = registry.rotation_mut(id).ok_or(PoseError::NotFound(id))?;

        if value.is_nan() {
            tracing::warn!(target: "constraints", "Ignoring NaN rotation for {} {}", id, axis);
            return Ok(rotation.get(axis));
        }

        let clamped = range.clamp(value);
        rotation.set(axis, clamped);
        Ok(clamped)
    }

    /// 同时写入任意几个轴，每个轴各自限制
    pub fn rotate(
        &mut self,
        registry: &mut BoneRegistry,
        id: NodeId,
        rotation: PartialRotation,
    ) -> PoseResult<EulerRotation> {
        if !registry.contains(id) {
            return Err(PoseError::NotFound(id));
        }
        for (axis, value) in rotation.entries() {
            self.set_rotation(registry, id, axis, value)?;
        }
        registry
            .find_by_id(id)
            .map(|bone| bone.local_rotation)
            .ok_or(PoseError::NotFound(id))
    }

    /// 恢复加载时的旋转，不经过范围限制
    pub fn reset_to_original(
        &mut self,
        registry: &mut BoneRegistry,
        id: NodeId,
    ) -> PoseResult<EulerRotation> {
        self.sync(registry);
        registry.reset_one(id)?;
        registry
            .original_rotation(id)
            .ok_or(PoseError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::BoneNode;
    use std::f32::consts::PI;

    fn id(n: u64) -> NodeId {
        NodeId::new(n)
    }

    fn setup() -> (BoneRegistry, RotationConstraintManager) {
        let mut registry = BoneRegistry::default();
        registry.load(vec![
            BoneNode::new(id(1), "Hips"),
            BoneNode::new(id(2), "LeftArm")
                .with_parent(id(1))
                .with_rotation(EulerRotation::new(0.4, 0.0, -0.2)),
        ]);
        (registry, RotationConstraintManager::default())
    }

    #[test]
    fn test_default_constraint() {
        let (registry, manager) = setup();
        let range = manager.get_constraint(&registry, id(2), Axis::X);
        assert_eq!(range.min(), -PI);
        assert_eq!(range.max(), PI);
        assert_eq!(manager.get_constraint(&registry, id(99), Axis::X), range);
    }

    #[test]
    fn test_set_rotation_clamps_to_exact_bound() {
        let (mut registry, mut manager) = setup();
        let value = manager.set_rotation(&mut registry, id(2), Axis::Y, 10.0).unwrap();
        assert_eq!(value, PI);
        assert_eq!(registry.find_by_id(id(2)).unwrap().local_rotation.y, PI);
    }

    #[test]
    fn test_set_rotation_nan_is_ignored() {
        let (mut registry, mut manager) = setup();
        let value = manager
            .set_rotation(&mut registry, id(2), Axis::X, f32::NAN)
            .unwrap();
        assert_eq!(value, 0.4);
    }

    #[test]
    fn test_set_rotation_unknown_bone() {
        let (mut registry, mut manager) = setup();
        assert_eq!(
            manager.set_rotation(&mut registry, id(7), Axis::X, 0.0),
            Err(PoseError::NotFound(id(7)))
        );
    }

    #[test]
    fn test_set_constraint_clamps_current_value() {
        let (mut registry, mut manager) = setup();
        let value = manager
            .set_constraint(&mut registry, id(2), Axis::X, -0.1, 0.1)
            .unwrap();
        assert_eq!(value, 0.1);
        assert_eq!(registry.find_by_id(id(2)).unwrap().local_rotation.x, 0.1);

        let value = manager.set_rotation(&mut registry, id(2), Axis::X, -3.0).unwrap();
        assert_eq!(value, -0.1);
    }

    #[test]
    fn test_invalid_range_keeps_prior_bounds() {
        let (mut registry, mut manager) = setup();
        manager
            .set_constraint(&mut registry, id(2), Axis::Z, -1.0, 1.0)
            .unwrap();

        let result = manager.set_constraint(&mut registry, id(2), Axis::Z, 2.0, 1.0);
        assert_eq!(result, Err(PoseError::InvalidRange { min: 2.0, max: 1.0 }));

        let range = manager.get_constraint(&registry, id(2), Axis::Z);
        assert_eq!((range.min(), range.max()), (-1.0, 1.0));
        assert!(manager
            .set_constraint(&mut registry, id(2), Axis::Z, f32::NAN, 1.0)
            .is_err());
    }

    #[test]
    fn test_set_constraint_unknown_bone() {
        let (mut registry, mut manager) = setup();
        assert_eq!(
            manager.set_constraint(&mut registry, id(9), Axis::X, -1.0, 1.0),
            Err(PoseError::NotFound(id(9)))
        );
        assert_eq!(manager.override_count(&registry), 0);
    }

    #[test]
    fn test_overrides_discarded_on_reload() {
        let (mut registry, mut manager) = setup();
        manager
            .set_constraint(&mut registry, id(2), Axis::X, -0.1, 0.1)
            .unwrap();
        assert_eq!(manager.override_count(&registry), 1);

        registry.load(vec![
            BoneNode::new(id(1), "Hips"),
            BoneNode::new(id(2), "LeftArm").with_parent(id(1)),
        ]);
        assert_eq!(manager.override_count(&registry), 0);
        assert_eq!(
            manager.get_constraint(&registry, id(2), Axis::X),
            RotationRange::default()
        );
        let value = manager.set_rotation(&mut registry, id(2), Axis::X, 2.0).unwrap();
        assert_eq!(value, 2.0);
    }

    #[test]
    fn test_overrides_do_not_leak_into_new_registry() {
        let (mut first, mut manager) = setup();
        manager
            .set_constraint(&mut first, id(2), Axis::X, -0.1, 0.1)
            .unwrap();

        let mut second = BoneRegistry::default();
        second.load(vec![
            BoneNode::new(id(1), "Root"),
            BoneNode::new(id(2), "RightUpLeg").with_parent(id(1)),
        ]);
        assert_eq!(
            manager.get_constraint(&second, id(2), Axis::X),
            RotationRange::default()
        );
        let value = manager.set_rotation(&mut second, id(2), Axis::X, 2.0).unwrap();
        assert_eq!(value, 2.0);
        assert_eq!(second.find_by_id(id(2)).unwrap().local_rotation.x, 2.0);
        assert_eq!(manager.override_count(&second), 0);
    }

    #[test]
    fn test_reset_writes_out_of_range_original_unclamped() {
        let mut registry = BoneRegistry::default();
        registry.load(vec![BoneNode::new(id(1), "Hips")
            .with_rotation(EulerRotation::new(4.0, 0.0, 0.0))]);
        let mut manager = RotationConstraintManager::default();

        let value = manager.set_rotation(&mut registry, id(1), Axis::X, 1.0).unwrap();
        assert_eq!(value, 1.0);

        let rotation = manager.reset_to_original(&mut registry, id(1)).unwrap();
        assert_eq!(rotation.x, 4.0);
        assert_eq!(registry.find_by_id(id(1)).unwrap().local_rotation.x, 4.0);

        let value = manager.set_rotation(&mut registry, id(1), Axis::X, 5.0).unwrap();
        assert_eq!(value, PI);
    }

    #[test]
    fn test_rotate_partial() {
        let (mut registry, mut manager) = setup();
        manager
            .set_constraint(&mut registry, id(2), Axis::Z, -0.5, 0.5)
            .unwrap();
        let rotation = manager
            .rotate(
                &mut registry,
                id(2),
                PartialRotation {
                    x: None,
                    y: Some(1.0),
                    z: Some(3.0),
                },
            )
            .unwrap();
        assert_eq!(rotation, EulerRotation::new(0.4, 1.0, 0.5));
    }

    #[test]
    fn test_reset_bypasses_constraints_and_is_idempotent() {
        let (mut registry, mut manager) = setup();
        manager
            .set_constraint(&mut registry, id(2), Axis::X, -0.1, 0.1)
            .unwrap();

        let first = manager.reset_to_original(&mut registry, id(2)).unwrap();
        let second = manager.reset_to_original(&mut registry, id(2)).unwrap();
        assert_eq!(first, EulerRotation::new(0.4, 0.0, -0.2));
        assert_eq!(first, second);
        assert_eq!(registry.find_by_id(id(2)).unwrap().local_rotation.x, 0.4);
    }

    #[test]
    fn test_constraints_for_and_clear() {
        let (mut registry, mut manager) = setup();
        manager
            .set_constraint(&mut registry, id(2), Axis::Y, 0.0, 1.0)
            .unwrap();
        let ranges = manager.constraints_for(&registry, id(2));
        assert_eq!(ranges.y.max(), 1.0);
        assert_eq!(ranges.x, RotationRange::default());

        assert!(manager.clear_constraint(&registry, id(2), Axis::Y));
        assert!(!manager.clear_constraint(&registry, id(2), Axis::Y));
        assert_eq!(manager.constraints_for(&registry, id(2)).y, RotationRange::default());
    }

    #[test]
    fn test_configured_default_range() {
        let (mut registry, _) = setup();
        let mut manager = RotationConstraintManager::new(&ConstraintConfig {
            default_min: -1.0,
            default_max: 1.0,
        });
        let value = manager.set_rotation(&mut registry, id(2), Axis::X, 5.0).unwrap();
        assert_eq!(value, 1.0);
    }
}
