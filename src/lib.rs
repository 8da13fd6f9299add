//! # Bone Poser
//!
//! The skeletal core of an interactive character posing tool.
//!
//! ## Features
//!
//! - **Classification**: Sort a flat, loosely-named bone list into anatomical groups
//! - **Picking**: Resolve a 3D pick (hit object, ancestor chain, hit point) to one bone
//! - **Constraints**: Per-bone, per-axis rotation ranges with clamped updates
//! - **Reset**: Restore the pose captured when the skeleton was loaded
//!
//! ## Architecture Design
//!
//! State and logic are kept apart the same way throughout:
//! - **State**: `BoneRegistry`, `Selection` and the constraint table hold plain data
//! - **Service**: `BoneClassifier` and `BonePicker` are pure functions over that data
//! - **Session**: `PoseSession` bundles the state of one loaded model
//!
//! ### Example
//!
//! ```
//! use bone_poser::config::PoserConfig;
//! use bone_poser::session::PoseSession;
//! use bone_poser::skeleton::{Axis, BoneNode, NodeId};
//! use bone_poser::classify::GroupName;
//!
//! let mut session = PoseSession::new(&PoserConfig::default());
//! session.load(vec![
//!     BoneNode::new(NodeId::new(1), "Hips"),
//!     BoneNode::new(NodeId::new(2), "LeftForeArm").with_parent(NodeId::new(1)),
//! ]);
//!
//! assert_eq!(session.groups().get(GroupName::LeftArm), &[NodeId::new(2)]);
//! let value = session.set_rotation(NodeId::new(2), Axis::X, 10.0).unwrap();
//! assert_eq!(value, std::f32::consts::PI);
//! ```
//!
//! ## Modules
//!
//! - [`skeleton`]: Bone nodes, hierarchy index and registry
//! - [`classify`]: Name-based anatomical grouping
//! - [`picking`]: Pick resolution
//! - [`constraints`]: Rotation ranges and clamped updates
//! - [`session`]: Per-model editing session
//! - [`config`]: TOML/JSON configuration

/// Core functionality: errors, logging and the command-line runner
pub mod core;
/// Configuration system
pub mod config;
/// Bone nodes, hierarchy and registry
pub mod skeleton;
/// Anatomical bone classification
pub mod classify;
/// Bone picking
pub mod picking;
/// Rotation constraints
pub mod constraints;
/// Current selection tracking
pub mod selection;
/// Per-model posing session
pub mod session;

pub use classify::{BoneClassifier, BoneGroups, GroupName};
pub use config::PoserConfig;
pub use constraints::{RotationConstraintManager, RotationRange};
pub use self::core::error::{PoseError, PoseResult};
pub use picking::{BonePicker, PickQuery, PickResolution};
pub use session::PoseSession;
pub use skeleton::{Axis, BoneNode, BoneRegistry, NodeId};
