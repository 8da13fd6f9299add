//! 拾取解析：把一次三维拾取落到唯一的骨骼上

use glam::Vec3;
use std::collections::HashSet;

use crate::skeleton::NodeId;

/// 拾取层提供的一次拾取
#[derive(Debug, Clone, PartialEq)]
pub struct PickQuery {
    /// 射线命中的对象（可能是网格而非骨骼）
    pub picked: Option<NodeId>,
    /// 命中对象的祖先链，由近及远
    pub ancestors: Vec<NodeId>,
    /// 命中点（世界坐标）
    pub hit_point: Vec3,
    pub camera_position: Vec3,
    pub camera_forward: Vec3,
}

impl PickQuery {
    /// 只有命中点、没有命中对象的拾取
    pub fn at(hit_point: Vec3) -> Self {
        Self {
            picked: None,
            ancestors: Vec::new(),
            hit_point,
            camera_position: Vec3::ZERO,
            camera_forward: Vec3::NEG_Z,
        }
    }

    pub fn with_picked(mut self, picked: NodeId) -> Self {
        self.picked = Some(picked);
        self
    }

    pub fn with_ancestors(mut self, ancestors: Vec<NodeId>) -> Self {
        self.ancestors = ancestors;
        self
    }

    pub fn with_camera(mut self, position: Vec3, forward: Vec3) -> Self {
        self.camera_position = position;
        self.camera_forward = forward;
        self
    }
}

/// 回退阶段的候选骨骼
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickCandidate {
    pub id: NodeId,
    pub world_position: Vec3,
}

impl PickCandidate {
    pub fn new(id: NodeId, world_position: Vec3) -> Self {
        Self { id, world_position }
    }
}

/// 给出结果的解析阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickTier {
    /// 命中对象本身是骨骼
    DirectHit,
    /// 命中对象的某个祖先是骨骼
    Ancestor,
    /// 按距离和视角加权选出的最近骨骼
    Nearest,
}

/// 拾取结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickResolution {
    pub bone: NodeId,
    pub tier: PickTier,
}

/// 拾取服务
///
/// 纯函数：不持有状态，也不修改输入。
pub struct BonePicker;

impl BonePicker {
    /// 解析拾取
    ///
    /// 依次尝试：命中对象本身、祖先链（由近及远）、加权最近骨骼。
    /// 只有候选列表为空时返回 None。
    pub fn resolve(query: &PickQuery, bones: &[PickCandidate]) -> Option<PickResolution> {
        let bone_ids: HashSet<NodeId> = bones.iter().map(|b| b.id).collect();

        if let Some(picked) = query.picked.filter(|id| bone_ids.contains(id)) {
            tracing::debug!(target: "picking", "Direct hit on {}", picked);
            return Some(PickResolution {
                bone: picked,
                tier: PickTier::DirectHit,
            });
        }

        if let Some(&ancestor) = query.ancestors.iter().find(|id| bone_ids.contains(id)) {
            tracing::debug!(target: "picking", "Resolved via ancestor {}", ancestor);
            return Some(PickResolution {
                bone: ancestor,
                tier: PickTier::Ancestor,
            });
        }

        let nearest = Self::nearest(query, bones)?;
        tracing::debug!(target: "picking", "Resolved via nearest bone {}", nearest);
        Some(PickResolution {
            bone: nearest,
            tier: PickTier::Nearest,
        })
    }

    /// 加权最近骨骼；权重相同时保留靠前的候选
    pub fn nearest(query: &PickQuery, bones: &[PickCandidate]) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for bone in bones {
            let weight = Self::weight(query, bone.world_position);
            match best {
                Some((_, best_weight)) if weight <= best_weight => {}
                _ => best = Some((bone.id, weight)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// `1 / (distance * (1 + angle))`
    ///
    /// `angle` 是相机前向与"相机到骨骼"方向的夹角。距离为0时权重为正无穷，
    /// NaN 权重按负无穷处理。
    pub fn weight(query: &PickQuery, bone_position: Vec3) -> f32 {
        let distance = query.hit_point.distance(bone_position);
        let direction = (bone_position - query.camera_position).normalize_or_zero();
        let forward = query.camera_forward.normalize_or_zero();
        let angle = direction.dot(forward).clamp(-1.0, 1.0).acos();

        let weight = 1.0 / (distance * (1.0 + angle));
        if weight.is_nan() {
            f32::NEG_INFINITY
        } else {
            weight
        }
    }
}
