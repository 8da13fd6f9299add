use super::{ConfigError, ConfigResult};
use crate::classify::Side;
use serde::{Deserialize, Serialize};

/// 侧别标记：名称中出现 `marker` 子串即判定为 `side`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideMarker {
    pub marker: String,
    pub side: Side,
}

impl SideMarker {
    pub fn new(marker: impl Into<String>, side: Side) -> Self {
        Self {
            marker: marker.into(),
            side,
        }
    }
}

/// 骨骼分类词表配置
///
/// 所有匹配均为小写子串包含（不做词边界匹配），默认值包含英语和德语变体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// 根骨骼词（优先级最高）
    pub root_words: Vec<String>,
    /// 头部词
    pub head_words: Vec<String>,
    /// 躯干词
    pub torso_words: Vec<String>,
    /// 手臂词
    pub arm_words: Vec<String>,
    /// 手/手指词
    pub hand_words: Vec<String>,
    /// 腿部词
    pub leg_words: Vec<String>,
    /// 脚/脚趾词
    pub foot_words: Vec<String>,
    /// 侧别标记，按顺序扫描，第一个命中的决定左右
    pub side_markers: Vec<SideMarker>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            root_words: words(&["root", "hip", "pelvis", "becken"]),
            head_words: words(&["head", "skull", "neck", "kopf"]),
            torso_words: words(&[
                "spine", "chest", "rib", "hip", "torso", "pelvis", "brust", "bauch",
            ]),
            arm_words: words(&["arm", "shoulder", "elbow", "wrist", "schulter"]),
            hand_words: words(&["hand", "finger", "thumb", "pinky", "index", "middle", "ring"]),
            leg_words: words(&["leg", "thigh", "knee", "shin", "bein", "schenkel"]),
            foot_words: words(&["foot", "toe", "ankle", "fuss"]),
            // 完整单词先于缩写扫描，避免 "right_leg" 中的 "_l" 被判为左侧
            side_markers: vec![
                SideMarker::new("left", Side::Left),
                SideMarker::new("right", Side::Right),
                SideMarker::new("l_", Side::Left),
                SideMarker::new("r_", Side::Right),
                SideMarker::new("_l", Side::Left),
                SideMarker::new("_r", Side::Right),
            ],
        }
    }
}

impl ClassifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 验证词表
    pub fn validate(&self) -> ConfigResult<()> {
        let lists = [
            ("root_words", &self.root_words),
            ("head_words", &self.head_words),
            ("torso_words", &self.torso_words),
            ("arm_words", &self.arm_words),
            ("hand_words", &self.hand_words),
            ("leg_words", &self.leg_words),
            ("foot_words", &self.foot_words),
        ];
        for (name, list) in lists {
            if list.iter().any(|w| w.trim().is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "{} contains an empty word",
                    name
                )));
            }
        }

        if self.side_markers.is_empty() {
            return Err(ConfigError::ValidationError(
                "side_markers must not be empty".to_string(),
            ));
        }
        if self.side_markers.iter().any(|m| m.marker.is_empty()) {
            return Err(ConfigError::ValidationError(
                "side_markers contains an empty marker".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_hip_and_pelvis_in_root_and_torso() {
        let config = ClassifierConfig::default();
        for word in ["hip", "pelvis"] {
            assert!(config.root_words.iter().any(|w| w == word));
            assert!(config.torso_words.iter().any(|w| w == word));
        }
    }

    #[test]
    fn test_empty_word_rejected() {
        let mut config = ClassifierConfig::default();
        config.hand_words.push("  ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_side_markers_rejected() {
        let config = ClassifierConfig {
            side_markers: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
