//! 骨骼分组类型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::skeleton::NodeId;

/// 身体侧别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// 四肢部位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimbPart {
    Arm,
    Hand,
    Leg,
    Foot,
}

/// 分组名称（固定枚举集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupName {
    Root,
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftHand,
    RightHand,
    LeftLeg,
    RightLeg,
    LeftFoot,
    RightFoot,
    LeftGeneric,
    RightGeneric,
    Other,
}

impl GroupName {
    /// 全部分组，按声明顺序
    pub const ALL: [GroupName; 14] = [
        GroupName::Root,
        GroupName::Head,
        GroupName::Torso,
        GroupName::LeftArm,
        GroupName::RightArm,
        GroupName::LeftHand,
        GroupName::RightHand,
        GroupName::LeftLeg,
        GroupName::RightLeg,
        GroupName::LeftFoot,
        GroupName::RightFoot,
        GroupName::LeftGeneric,
        GroupName::RightGeneric,
        GroupName::Other,
    ];

    /// 组合侧别和部位；没有部位时落入对应侧的通用分组
    pub fn for_side(side: Side, part: Option<LimbPart>) -> Self {
        match (side, part) {
            (Side::Left, Some(LimbPart::Arm)) => GroupName::LeftArm,
            (Side::Left, Some(LimbPart::Hand)) => GroupName::LeftHand,
            (Side::Left, Some(LimbPart::Leg)) => GroupName::LeftLeg,
            (Side::Left, Some(LimbPart::Foot)) => GroupName::LeftFoot,
            (Side::Left, None) => GroupName::LeftGeneric,
            (Side::Right, Some(LimbPart::Arm)) => GroupName::RightArm,
            (Side::Right, Some(LimbPart::Hand)) => GroupName::RightHand,
            (Side::Right, Some(LimbPart::Leg)) => GroupName::RightLeg,
            (Side::Right, Some(LimbPart::Foot)) => GroupName::RightFoot,
            (Side::Right, None) => GroupName::RightGeneric,
        }
    }

    /// 侧别（中轴分组返回 None）
    pub fn side(&self) -> Option<Side> {
        match self {
            GroupName::LeftArm
            | GroupName::LeftHand
            | GroupName::LeftLeg
            | GroupName::LeftFoot
            | GroupName::LeftGeneric => Some(Side::Left),
            GroupName::RightArm
            | GroupName::RightHand
            | GroupName::RightLeg
            | GroupName::RightFoot
            | GroupName::RightGeneric => Some(Side::Right),
            GroupName::Root | GroupName::Head | GroupName::Torso | GroupName::Other => None,
        }
    }

    /// 面向展示层的标签
    pub fn label(&self) -> &'static str {
        match self {
            GroupName::Root => "Root / Hips",
            GroupName::Head => "Head",
            GroupName::Torso => "Torso",
            GroupName::LeftArm => "Left Arm",
            GroupName::RightArm => "Right Arm",
            GroupName::LeftHand => "Left Hand / Fingers",
            GroupName::RightHand => "Right Hand / Fingers",
            GroupName::LeftLeg => "Left Leg",
            GroupName::RightLeg => "Right Leg",
            GroupName::LeftFoot => "Left Foot / Toes",
            GroupName::RightFoot => "Right Foot / Toes",
            GroupName::LeftGeneric => "Left",
            GroupName::RightGeneric => "Right",
            GroupName::Other => "Other",
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 分组结果：每个 `GroupName` 都有条目，组内按输入顺序排列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoneGroups {
    groups: BTreeMap<GroupName, Vec<NodeId>>,
}

impl Default for BoneGroups {
    fn default() -> Self {
        Self {
            groups: GroupName::ALL.iter().map(|&g| (g, Vec::new())).collect(),
        }
    }
}

impl BoneGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, group: GroupName, id: NodeId) {
        self.groups.entry(group).or_default().push(id);
    }

    pub fn get(&self, group: GroupName) -> &[NodeId] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 所有分组（包括空分组），按 `GroupName` 顺序
    pub fn iter(&self) -> impl Iterator<Item = (GroupName, &[NodeId])> {
        self.groups.iter().map(|(g, ids)| (*g, ids.as_slice()))
    }

    /// 非空分组
    pub fn non_empty(&self) -> impl Iterator<Item = (GroupName, &[NodeId])> {
        self.iter().filter(|(_, ids)| !ids.is_empty())
    }

    /// 骨骼所在分组
    pub fn group_of(&self, id: NodeId) -> Option<GroupName> {
        self.groups
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(g, _)| *g)
    }

    /// 已分组骨骼总数
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_groups_present_when_empty() {
        let groups = BoneGroups::new();
        assert_eq!(groups.iter().count(), GroupName::ALL.len());
        assert!(groups.is_empty());
        assert_eq!(groups.non_empty().count(), 0);
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let order: Vec<GroupName> = BoneGroups::new().iter().map(|(g, _)| g).collect();
        assert_eq!(order, GroupName::ALL.to_vec());
    }

    #[test]
    fn test_for_side() {
        assert_eq!(
            GroupName::for_side(Side::Left, Some(LimbPart::Hand)),
            GroupName::LeftHand
        );
        assert_eq!(GroupName::for_side(Side::Right, None), GroupName::RightGeneric);
        assert_eq!(GroupName::RightFoot.side(), Some(Side::Right));
        assert_eq!(GroupName::Torso.side(), None);
    }

    #[test]
    fn test_group_of() {
        let mut groups = BoneGroups::new();
        groups.push(GroupName::Head, NodeId::new(5));
        assert_eq!(groups.group_of(NodeId::new(5)), Some(GroupName::Head));
        assert_eq!(groups.group_of(NodeId::new(6)), None);
        assert_eq!(groups.get(GroupName::Head), &[NodeId::new(5)]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(GroupName::Root.to_string(), "Root / Hips");
        assert_eq!(GroupName::LeftGeneric.label(), "Left");
    }
}
