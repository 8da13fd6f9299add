//! 骨骼节点与基础值类型

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// 场景节点唯一标识符
///
/// 骨骼与非骨骼场景对象（网格等）共用同一ID空间，
/// 因此拾取得到的对象ID可以直接与骨骼ID比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// 生成进程内唯一的新ID
    ///
    /// 与加载器自带的ID混用时，由调用方保证两者不冲突。
    pub fn fresh() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// 旋转轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(format!("unknown axis '{}'", other)),
        }
    }
}

/// 欧拉角旋转（弧度，XYZ顺序）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerRotation {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }
}

impl From<Vec3> for EulerRotation {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<EulerRotation> for Vec3 {
    fn from(r: EulerRotation) -> Self {
        Vec3::new(r.x, r.y, r.z)
    }
}

/// 部分旋转更新：只写入为 `Some` 的轴
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialRotation {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl PartialRotation {
    pub fn axis(axis: Axis, value: f32) -> Self {
        let mut partial = Self::default();
        match axis {
            Axis::X => partial.x = Some(value),
            Axis::Y => partial.y = Some(value),
            Axis::Z => partial.z = Some(value),
        }
        partial
    }

    /// 按 X、Y、Z 顺序列出需要写入的轴
    pub fn entries(&self) -> impl Iterator<Item = (Axis, f32)> {
        [(Axis::X, self.x), (Axis::Y, self.y), (Axis::Z, self.z)]
            .into_iter()
            .filter_map(|(axis, value)| value.map(|v| (axis, v)))
    }
}

impl From<EulerRotation> for PartialRotation {
    fn from(r: EulerRotation) -> Self {
        Self {
            x: Some(r.x),
            y: Some(r.y),
            z: Some(r.z),
        }
    }
}

/// 骨骼节点
///
/// 父子关系以ID表示，整棵树由 `BoneRegistry` 的索引表持有。
/// 世界坐标不缓存在节点上，需要时由注册表沿父链实时计算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneNode {
    pub id: NodeId,
    pub name: String,
    /// 父骨骼（None 表示根骨骼）
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// 局部旋转（可原地修改）
    #[serde(default)]
    pub local_rotation: EulerRotation,
    /// 相对父骨骼的偏移
    #[serde(default)]
    pub local_translation: Vec3,
}

impl BoneNode {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            local_rotation: EulerRotation::ZERO,
            local_translation: Vec3::ZERO,
        }
    }

    /// 使用新生成的ID创建骨骼
    pub fn fresh(name: impl Into<String>) -> Self {
        Self::new(NodeId::fresh(), name)
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_rotation(mut self, rotation: EulerRotation) -> Self {
        self.local_rotation = rotation;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.local_translation = translation;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
