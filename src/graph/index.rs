//! 顶点键索引
//!
//! 维护 编号 -> 键 的有序表以及 键 -> 编号 的哈希映射，两者始终一一对应。

use crate::graph::vertex::VertexId;
use crate::types::VertexKey;
use std::collections::HashMap;

/// 顶点键索引
#[derive(Debug, Clone)]
pub(crate) struct KeyIndex<K> {
    /// 编号到键的映射（按编号排列）
    keys: Vec<K>,
    /// 键到编号的映射
    positions: HashMap<K, VertexId>,
}

impl<K: VertexKey> KeyIndex<K> {
    /// 创建空索引
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// 追加一个键并分配下一个编号；键已存在时原样退回该键
    pub(crate) fn insert(&mut self, key: K) -> Result<VertexId, K> {
        if self.positions.contains_key(&key) {
            return Err(key);
        }
        let id = VertexId::new(self.keys.len());
        self.positions.insert(key.clone(), id);
        self.keys.push(key);
        Ok(id)
    }

    /// 通过键查找编号
    pub(crate) fn get(&self, key: &K) -> Option<VertexId> {
        self.positions.get(key).copied()
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// 通过编号查找键
    pub(crate) fn key(&self, id: VertexId) -> Option<&K> {
        self.keys.get(id.index())
    }

    /// 替换编号 `id` 处的键，编号不变
    ///
    /// 调用方须保证 `id` 有效且 `new_key` 尚未出现。
    pub(crate) fn rename(&mut self, id: VertexId, new_key: K) {
        if let Some(slot) = self.keys.get_mut(id.index()) {
            let old_key = std::mem::replace(slot, new_key.clone());
            self.positions.remove(&old_key);
            self.positions.insert(new_key, id);
        }
    }

    /// 删除编号 `id` 处的键，更大的编号依次减一
    pub(crate) fn remove(&mut self, id: VertexId) -> Option<K> {
        if id.index() >= self.keys.len() {
            return None;
        }
        let key = self.keys.remove(id.index());
        self.positions.remove(&key);
        for (index, k) in self.keys.iter().enumerate().skip(id.index()) {
            self.positions.insert(k.clone(), VertexId::new(index));
        }
        Some(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// 按编号顺序遍历所有键
    pub(crate) fn iter(&self) -> impl Iterator<Item = (VertexId, &K)> {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, key)| (VertexId::new(index), key))
    }

    /// 键表与映射是否一致（用于不变量检查）
    pub(crate) fn is_consistent(&self) -> bool {
        self.keys.len() == self.positions.len()
            && self
                .iter()
                .all(|(id, key)| self.positions.get(key) == Some(&id))
    }
}

impl<K: VertexKey> Default for KeyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
