//! 骨骼注册表
//!
//! 持有当前模型的骨骼列表、身份索引、加载时的原始旋转快照以及派生出的分组和层级。
//! 每次 `load` 整体替换上一副骨骼。

use glam::{Mat4, Vec3};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Axis, BoneNode, EulerRotation, NodeHierarchy, NodeId};
use crate::classify::{BoneClassifier, BoneGroups};
use crate::config::ClassifierConfig;
use crate::constraints::RotationRange;
use crate::core::error::{PoseError, PoseResult};
use crate::picking::PickCandidate;

/// 原始旋转快照：加载时捕获一次，直到下一次加载前不可变
pub type RotationSnapshot = HashMap<NodeId, EulerRotation>;

/// 进程内全局的加载代数，不同注册表实例之间也不会重复
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// 加载结果摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 实际注册的骨骼数
    pub bone_count: usize,
    /// 根骨骼数（通常为1）
    pub root_count: usize,
    /// 因ID重复被丢弃的节点
    pub duplicate_ids: Vec<NodeId>,
}

/// 骨骼注册表
#[derive(Debug, Clone)]
pub struct BoneRegistry {
    bones: Vec<BoneNode>,
    index: HashMap<NodeId, usize>,
    hierarchy: NodeHierarchy,
    snapshot: RotationSnapshot,
    groups: BoneGroups,
    classifier: BoneClassifier,
    /// 每次加载取一个全局唯一的值，约束管理器据此丢弃过期的覆盖；未加载时为0
    generation: u64,
    /// 加载器对整个模型施加的变换（居中等）
    model_transform: Mat4,
}

impl Default for BoneRegistry {
    fn default() -> Self {
        Self::new(BoneClassifier::default())
    }
}

impl BoneRegistry {
    pub fn new(classifier: BoneClassifier) -> Self {
        Self {
            bones: Vec::new(),
            index: HashMap::new(),
            hierarchy: NodeHierarchy::new(),
            snapshot: RotationSnapshot::new(),
            groups: BoneGroups::new(),
            classifier,
            generation: 0,
            model_transform: Mat4::IDENTITY,
        }
    }

    pub fn with_config(config: &ClassifierConfig) -> Self {
        Self::new(BoneClassifier::new(config))
    }

    /// 加载新骨骼，整体替换旧状态
    ///
    /// 重复ID的节点被丢弃（保留第一次出现）。空列表得到合法的空注册表。
    pub fn load(&mut self, nodes: Vec<BoneNode>) -> LoadReport {
        let mut seen = HashSet::with_capacity(nodes.len());
        let mut duplicate_ids = Vec::new();
        let mut bones = Vec::with_capacity(nodes.len());

        for node in nodes {
            if seen.insert(node.id) {
                bones.push(node);
            } else {
                duplicate_ids.push(node.id);
            }
        }

        let index = bones
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i))
            .collect();
        let hierarchy = NodeHierarchy::from_pairs(bones.iter().map(|b| (b.id, b.parent)));
        let snapshot = bones.iter().map(|b| (b.id, b.local_rotation)).collect();
        let groups = self.classifier.classify(&bones);

        self.bones = bones;
        self.index = index;
        self.hierarchy = hierarchy;
        self.snapshot = snapshot;
        self.groups = groups;
        self.model_transform = Mat4::IDENTITY;
        self.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);

        let report = LoadReport {
            bone_count: self.bones.len(),
            root_count: self.hierarchy.roots().len(),
            duplicate_ids,
        };

        let out_of_range = self.out_of_range_originals();
        if !out_of_range.is_empty() {
            tracing::warn!(
                target: "skeleton",
                "{} bones have original rotations outside [-pi, pi]: {:?}",
                out_of_range.len(),
                out_of_range
            );
        }
        if !report.duplicate_ids.is_empty() {
            tracing::warn!(
                target: "skeleton",
                "Dropped {} bones with duplicate ids: {:?}",
                report.duplicate_ids.len(),
                report.duplicate_ids
            );
        }
        tracing::info!(
            target: "skeleton",
            "Loaded skeleton: {} bones, {} roots (generation {})",
            report.bone_count,
            report.root_count,
            self.generation
        );
        tracing::debug!(target: "skeleton", "Bone hierarchy:\n{}", self.describe_hierarchy());

        report
    }

    pub fn find_by_id(&self, id: NodeId) -> Option<&BoneNode> {
        self.index.get(&id).map(|&i| &self.bones[i])
    }

    /// 按名称查找（名称不唯一，返回发现顺序中的第一个）
    pub fn find_by_name(&self, name: &str) -> Option<&BoneNode> {
        self.bones.iter().find(|b| b.name == name)
    }

    /// 按名称查找ID，找不到时返回 `NameNotFound`
    pub fn id_by_name(&self, name: &str) -> PoseResult<NodeId> {
        self.find_by_name(name)
            .map(|b| b.id)
            .ok_or_else(|| PoseError::NameNotFound(name.to_string()))
    }

    /// 骨骼局部旋转的可变引用
    ///
    /// 骨骼的ID和父子关系在两次加载之间保持固定，只开放旋转的原地修改。
    pub fn rotation_mut(&mut self, id: NodeId) -> Option<&mut EulerRotation> {
        let i = *self.index.get(&id)?;
        Some(&mut self.bones[i].local_rotation)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// 所有骨骼，按发现顺序
    pub fn bones(&self) -> &[BoneNode] {
        &self.bones
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn groups(&self) -> &BoneGroups {
        &self.groups
    }

    pub fn hierarchy(&self) -> &NodeHierarchy {
        &self.hierarchy
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 原始旋转有任一轴落在默认范围 `[-π, π]` 之外的骨骼
    ///
    /// 重置会原样写回这些值，之后的写入才会被限制。
    pub fn out_of_range_originals(&self) -> Vec<NodeId> {
        let bounds = RotationRange::default();
        self.bones
            .iter()
            .filter_map(|bone| {
                let original = self.snapshot.get(&bone.id)?;
                let outside = Axis::ALL
                    .iter()
                    .any(|&axis| !bounds.contains(original.get(axis)));
                outside.then_some(bone.id)
            })
            .collect()
    }

    /// 加载时记录的原始旋转
    pub fn original_rotation(&self, id: NodeId) -> Option<EulerRotation> {
        self.snapshot.get(&id).copied()
    }

    /// 把单根骨骼的旋转恢复为加载时的值
    pub fn reset_one(&mut self, id: NodeId) -> PoseResult<()> {
        let original = self
            .snapshot
            .get(&id)
            .copied()
            .ok_or(PoseError::NotFound(id))?;
        let rotation = self.rotation_mut(id).ok_or(PoseError::NotFound(id))?;
        *rotation = original;
        Ok(())
    }

    /// 重置所有骨骼，返回被重置的骨骼数
    pub fn reset_all(&mut self) -> usize {
        let mut count = 0;
        for bone in &mut self.bones {
            if let Some(original) = self.snapshot.get(&bone.id) {
                bone.local_rotation = *original;
                count += 1;
            }
        }
        tracing::debug!(target: "skeleton", "Reset {} bones to original pose", count);
        count
    }

    pub fn model_transform(&self) -> Mat4 {
        self.model_transform
    }

    /// 设置模型整体变换（加载器对模型的居中和缩放）
    pub fn set_model_transform(&mut self, transform: Mat4) {
        self.model_transform = transform;
    }

    fn local_matrix(bone: &BoneNode) -> Mat4 {
        Mat4::from_rotation_translation(bone.local_rotation.to_quat(), bone.local_translation)
    }

    /// 骨骼当前的世界矩阵，每次调用都沿父链重新计算
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.find_by_id(id)?;
        let chain = self.hierarchy.ancestor_chain(id);
        let matrix = chain
            .iter()
            .rev()
            .filter_map(|&node| self.find_by_id(node))
            .fold(self.model_transform, |acc, bone| acc * Self::local_matrix(bone));
        Some(matrix)
    }

    /// 骨骼当前的世界坐标
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// 一次性计算所有骨骼的世界矩阵（父节点先于子节点）
    fn world_matrices(&self) -> HashMap<NodeId, Mat4> {
        let mut matrices = HashMap::with_capacity(self.bones.len());
        for (id, _) in self.hierarchy.walk_depth_first() {
            let Some(bone) = self.find_by_id(id) else {
                continue;
            };
            let parent = self
                .hierarchy
                .parent(id)
                .and_then(|p| matrices.get(&p).copied())
                .unwrap_or(self.model_transform);
            matrices.insert(id, parent * Self::local_matrix(bone));
        }
        matrices
    }

    /// 拾取回退阶段使用的候选列表，按发现顺序
    pub fn pick_candidates(&self) -> Vec<PickCandidate> {
        let matrices = self.world_matrices();
        self.bones
            .iter()
            .filter_map(|bone| {
                // 父链成环的骨骼不会出现在前序遍历里，单独计算
                let matrix = matrices
                    .get(&bone.id)
                    .copied()
                    .or_else(|| self.world_matrix(bone.id))?;
                Some(PickCandidate::new(bone.id, matrix.transform_point3(Vec3::ZERO)))
            })
            .collect()
    }

    /// 缩进形式的层级结构文本
    pub fn describe_hierarchy(&self) -> String {
        let mut out = String::new();
        for (id, depth) in self.hierarchy.walk_depth_first() {
            let name = self.find_by_id(id).map(|b| b.name.as_str()).unwrap_or("?");
            let _ = writeln!(out, "{}- {} ({})", "  ".repeat(depth), name, id);
        }
        out
    }
}
