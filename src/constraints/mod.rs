//! 旋转约束

pub mod manager;
pub mod range;

pub use manager::RotationConstraintManager;
pub use range::{AxisRanges, RotationRange};
