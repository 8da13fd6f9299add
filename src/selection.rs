//! 当前选中骨骼

use crate::skeleton::NodeId;

/// 选择变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// 与当前选中相同，调用方无需刷新界面
    Unchanged,
    Changed {
        previous: Option<NodeId>,
        current: Option<NodeId>,
    },
}

impl SelectionChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, SelectionChange::Changed { .. })
    }
}

/// 选中状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.current == Some(id)
    }

    /// 选中骨骼；重复选中同一骨骼返回 `Unchanged`
    pub fn select(&mut self, id: NodeId) -> SelectionChange {
        self.replace(Some(id))
    }

    pub fn clear(&mut self) -> SelectionChange {
        self.replace(None)
    }

    fn replace(&mut self, next: Option<NodeId>) -> SelectionChange {
        if self.current == next {
            return SelectionChange::Unchanged;
        }
        let previous = std::mem::replace(&mut self.current, next);
        SelectionChange::Changed {
            previous,
            current: next,
        }
    }
}
