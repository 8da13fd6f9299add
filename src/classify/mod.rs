//! 骨骼分类
//!
//! 按名称关键词和层级位置把骨骼划入固定的身体部位分组，供骨骼列表按组展示。

pub mod classifier;
pub mod group;

pub use classifier::BoneClassifier;
pub use group::{BoneGroups, GroupName, LimbPart, Side};
