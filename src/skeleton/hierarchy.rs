//! 节点层级索引
//!
//! 加载时一次性构建 `{id, parent}` 扁平表，祖先/后代遍历都是迭代式的下标跳转，
//! 不依赖递归调用栈。父链中出现环时遍历最多走 `len()` 步后停止。

use std::collections::HashMap;

use super::NodeId;

/// 扁平层级表（arena + 下标）
#[derive(Debug, Clone, Default)]
pub struct NodeHierarchy {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    /// 每个节点父节点的下标（父节点不在表中时为 None）
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl NodeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `(id, parent)` 对构建层级表
    ///
    /// 重复ID只保留第一次出现；指向表外节点的父引用视为无父节点。
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, Option<NodeId>)>,
    {
        let mut ids = Vec::new();
        let mut index = HashMap::new();
        let mut raw_parents = Vec::new();

        for (id, parent) in pairs {
            if index.contains_key(&id) {
                continue;
            }
            index.insert(id, ids.len());
            ids.push(id);
            raw_parents.push(parent);
        }

        let parents: Vec<Option<usize>> = raw_parents
            .iter()
            .map(|parent| parent.and_then(|p| index.get(&p).copied()))
            .collect();

        let mut children = vec![Vec::new(); ids.len()];
        for (child, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                children[*p].push(child);
            }
        }

        Self {
            ids,
            index,
            parents,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// 节点在表中的下标（即发现顺序）
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// 父节点（仅当父节点也在表中时返回）
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let i = self.index_of(id)?;
        self.parents[i].map(|p| self.ids[p])
    }

    /// 直接子节点，按发现顺序
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.index_of(id)
            .map(|i| self.children[i].iter().map(|&c| self.ids[c]).collect())
            .unwrap_or_default()
    }

    /// 根节点（无父节点或父节点不在表中），按发现顺序
    pub fn roots(&self) -> Vec<NodeId> {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(i, _)| self.ids[i])
            .collect()
    }

    /// 由近及远遍历祖先（不含自身）
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            hierarchy: self,
            current: self.index_of(id),
            remaining: self.len(),
        }
    }

    /// 拾取层使用的祖先链：自身在前，随后由近及远的祖先
    ///
    /// 未知节点返回空链。
    pub fn ancestor_chain(&self, id: NodeId) -> Vec<NodeId> {
        if !self.contains(id) {
            return Vec::new();
        }
        std::iter::once(id).chain(self.ancestors(id)).collect()
    }

    /// 节点深度（根为0）
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.index_of(id)?;
        Some(self.ancestors(id).count())
    }

    /// 深度优先前序遍历后代（不含自身），兄弟节点按发现顺序
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let Some(start) = self.index_of(id) else {
            return result;
        };

        let mut visited = vec![false; self.len()];
        visited[start] = true;
        let mut stack: Vec<usize> = self.children[start].iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            result.push(self.ids[i]);
            stack.extend(self.children[i].iter().rev().copied());
        }
        result
    }

    /// 以深度优先前序列出所有节点及其深度，用于打印层级结构
    ///
    /// 仅从根节点出发可达的节点会出现；环上的节点被跳过。
    pub fn walk_depth_first(&self) -> Vec<(NodeId, usize)> {
        let mut result = Vec::with_capacity(self.len());
        let mut visited = vec![false; self.len()];
        let mut stack: Vec<(usize, usize)> = self
            .parents
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(i, _)| (i, 0))
            .rev()
            .collect();

        while let Some((i, depth)) = stack.pop() {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            result.push((self.ids[i], depth));
            stack.extend(self.children[i].iter().rev().map(|&c| (c, depth + 1)));
        }
        result
    }
}

/// 祖先迭代器
pub struct Ancestors<'a> {
    hierarchy: &'a NodeHierarchy,
    current: Option<usize>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let parent = self.hierarchy.parents[self.current?]?;
        self.current = Some(parent);
        Some(self.hierarchy.ids[parent])
    }
}
