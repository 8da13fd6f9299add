//! 骨骼数据与注册表
//!
//! - [`node`]: 节点ID、轴、欧拉角和骨骼节点
//! - [`hierarchy`]: 扁平层级索引，迭代式祖先/后代遍历
//! - [`registry`]: 当前骨骼、原始旋转快照与派生分组

pub mod hierarchy;
pub mod node;
pub mod registry;

#[cfg(test)]
mod property_tests;

pub use hierarchy::{Ancestors, NodeHierarchy};
pub use node::{Axis, BoneNode, EulerRotation, NodeId, PartialRotation};
pub use registry::{BoneRegistry, LoadReport, RotationSnapshot};
