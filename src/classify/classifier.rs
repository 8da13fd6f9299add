//! 基于名称和层级位置的骨骼分类器

use std::collections::HashSet;

use super::group::{BoneGroups, GroupName, LimbPart, Side};
use crate::config::ClassifierConfig;
use crate::skeleton::{BoneNode, NodeId};

/// 小写词表
#[derive(Debug, Clone, Default)]
struct WordSet(Vec<String>);

impl WordSet {
    /// 空白词会匹配任何名称，直接丢弃
    fn new(words: &[String]) -> Self {
        Self(
            words
                .iter()
                .filter(|w| !w.trim().is_empty())
                .map(|w| w.to_lowercase())
                .collect(),
        )
    }

    /// 子串包含匹配，不做词边界判断
    fn matches(&self, name: &str) -> bool {
        self.0.iter().any(|w| name.contains(w.as_str()))
    }
}

/// 骨骼分类器
///
/// 按以下固定优先级为每根骨骼选择第一个命中的分组：
///
/// 1. 根：无父节点，或名称含根骨骼词（优先级绝对，`hip`/`pelvis` 因此永远不会落入躯干）
/// 2. 头部
/// 3. 躯干
/// 4. 侧别 + 部位（手臂、手、腿、脚），只有侧别时落入 `{Side}Generic`
/// 5. 其他
#[derive(Debug, Clone)]
pub struct BoneClassifier {
    root: WordSet,
    head: WordSet,
    torso: WordSet,
    parts: Vec<(LimbPart, WordSet)>,
    side_markers: Vec<(String, Side)>,
}

impl Default for BoneClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl BoneClassifier {
    /// 从配置构建分类器
    ///
    /// 不要求配置先通过 `ClassifierConfig::validate`：空白的词和侧别标记在这里被忽略。
    pub fn new(config: &ClassifierConfig) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!(target: "classify", "Ignoring blank classifier entries: {}", e);
        }

        Self {
            root: WordSet::new(&config.root_words),
            head: WordSet::new(&config.head_words),
            torso: WordSet::new(&config.torso_words),
            parts: vec![
                (LimbPart::Arm, WordSet::new(&config.arm_words)),
                (LimbPart::Hand, WordSet::new(&config.hand_words)),
                (LimbPart::Leg, WordSet::new(&config.leg_words)),
                (LimbPart::Foot, WordSet::new(&config.foot_words)),
            ],
            side_markers: config
                .side_markers
                .iter()
                .filter(|m| !m.marker.trim().is_empty())
                .map(|m| (m.marker.to_lowercase(), m.side))
                .collect(),
        }
    }

    /// 对整个节点列表分组
    ///
    /// 纯函数：相同输入总是得到相同的分组内容和顺序。
    /// 父节点不在列表中的骨骼视为根骨骼。
    pub fn classify(&self, nodes: &[BoneNode]) -> BoneGroups {
        let known: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
        let mut groups = BoneGroups::new();

        for node in nodes {
            let has_parent = node.parent.is_some_and(|p| known.contains(&p));
            groups.push(self.classify_name(&node.name, has_parent), node.id);
        }

        for (group, ids) in groups.non_empty() {
            tracing::debug!(target: "classify", "Group {}: {} bones", group, ids.len());
        }

        groups
    }

    /// 对单个名称分类
    pub fn classify_name(&self, name: &str, has_parent: bool) -> GroupName {
        let name = name.to_lowercase();

        if !has_parent || self.root.matches(&name) {
            return GroupName::Root;
        }
        if self.head.matches(&name) {
            return GroupName::Head;
        }
        if self.torso.matches(&name) {
            return GroupName::Torso;
        }

        match self.side_of(&name) {
            Some(side) => GroupName::for_side(side, self.part_of(&name)),
            None => GroupName::Other,
        }
    }

    /// 按配置顺序扫描侧别标记
    fn side_of(&self, lower_name: &str) -> Option<Side> {
        self.side_markers
            .iter()
            .find(|(marker, _)| lower_name.contains(marker.as_str()))
            .map(|(_, side)| *side)
    }

    /// 按 手臂、手、腿、脚 的顺序扫描部位词
    fn part_of(&self, lower_name: &str) -> Option<LimbPart> {
        self.parts
            .iter()
            .find(|(_, words)| words.matches(lower_name))
            .map(|(part, _)| *part)
    }
}
