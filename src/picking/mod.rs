//! 骨骼拾取
//!
//! 拾取层（射线检测）只给出命中对象、祖先链和命中点；本模块把它们解析为唯一的骨骼。

pub mod picker;

pub use picker::{BonePicker, PickCandidate, PickQuery, PickResolution, PickTier};
