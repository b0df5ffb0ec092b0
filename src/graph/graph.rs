//! 图数据结构
//!
//! 带权有向图：顶点由调用方提供的键标识，边按目标顶点的内部编号存储。
//!
//! 不变量（每次公开的修改操作之后都成立）：
//! 1. 顶点键两两不同
//! 2. 键表长度等于邻接表数量
//! 3. 邻接表中的目标编号均有效
//! 4. 同一邻接表中目标编号两两不同（无重边）

use super::edge::{Adjacent, AdjacencyList, Edge};
use super::index::KeyIndex;
use super::vertex::VertexId;
use crate::error::{Error, Result};
use crate::types::{VertexKey, Weight};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use tracing::debug;

/// 带权有向图
#[derive(Debug, Clone)]
pub struct Graph<K, W> {
    /// 顶点键索引
    index: KeyIndex<K>,
    /// 每个顶点的出边列表，与键索引按编号对齐
    adjacency: Vec<AdjacencyList<W>>,
}

impl<K: VertexKey, W: Weight> Graph<K, W> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            index: KeyIndex::new(),
            adjacency: Vec::new(),
        }
    }

    /// 由顶点列表构造一个无边的图
    pub fn from_vertices<I>(vertices: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let mut graph = Self::new();
        for key in vertices {
            graph.add_vertex(key)?;
        }
        Ok(graph)
    }

    /// 由顶点列表和边列表构造图
    pub fn from_parts<I, E, T>(vertices: I, edges: E) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        E: IntoIterator<Item = T>,
        T: Into<Edge<K, W>>,
    {
        let mut graph = Self::from_vertices(vertices)?;
        for edge in edges {
            let Edge { src, dst, weight } = edge.into();
            graph.add_edge(&src, &dst, weight)?;
        }
        Ok(graph)
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，分配下一个编号，邻接表为空
    pub fn add_vertex(&mut self, key: K) -> Result<()> {
        let id = self
            .index
            .insert(key)
            .map_err(|key| Error::duplicate_key(&key))?;
        self.adjacency.push(AdjacencyList::new());
        debug!(key = ?self.index.key(id), id = %id, "add vertex");

        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// 删除顶点及其所有关联边，更大的编号依次减一
    pub fn remove_vertex(&mut self, key: &K) -> Result<()> {
        let removed = self.require(key)?;

        self.adjacency.remove(removed.index());
        for list in &mut self.adjacency {
            list.retain(|adj| adj.dst != removed);
            for adj in list.iter_mut() {
                adj.dst = adj.dst.shifted_after_removal(removed);
            }
        }
        self.index.remove(removed);
        debug!(key = ?key, id = %removed, "remove vertex");

        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// 修改顶点的键，编号与边保持不变
    pub fn rename_vertex(&mut self, old_key: &K, new_key: K) -> Result<()> {
        let id = self.require(old_key)?;
        if self.index.contains(&new_key) {
            return Err(Error::duplicate_key(&new_key));
        }
        debug!(old = ?old_key, new = ?new_key, "rename vertex");
        self.index.rename(id, new_key);

        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// 顶点是否存在
    pub fn vertex_exists(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    /// 所有顶点的键（按编号顺序）
    pub fn all_vertices(&self) -> IndexSet<K> {
        self.index.iter().map(|(_, key)| key.clone()).collect()
    }

    // ==================== 边操作 ====================

    /// 添加边 src -> dst
    pub fn add_edge(&mut self, src: &K, dst: &K, weight: W) -> Result<()> {
        let s = self.require(src)?;
        let d = self.require(dst)?;
        if self.find_adjacent(s, d).is_some() {
            return Err(Error::duplicate_edge(src, dst));
        }
        debug!(src = ?src, dst = ?dst, weight = ?weight, "add edge");
        self.adjacency[s.index()].push(Adjacent::new(d, weight));

        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// 删除边 src -> dst；任一顶点不存在时同样视为边不存在
    pub fn remove_edge(&mut self, src: &K, dst: &K) -> Result<()> {
        let (s, d) = self
            .edge_ids(src, dst)
            .ok_or_else(|| Error::unknown_edge(src, dst))?;
        let list = &mut self.adjacency[s.index()];
        let position = list
            .iter()
            .position(|adj| adj.dst == d)
            .ok_or_else(|| Error::unknown_edge(src, dst))?;
        list.remove(position);
        debug!(src = ?src, dst = ?dst, "remove edge");

        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// 边是否存在；任一顶点不存在时报错
    pub fn edge_exists(&self, src: &K, dst: &K) -> Result<bool> {
        let s = self.require(src)?;
        let d = self.require(dst)?;
        Ok(self.find_adjacent(s, d).is_some())
    }

    /// 读取边权重
    pub fn edge_weight(&self, src: &K, dst: &K) -> Result<W> {
        let (s, d) = self
            .edge_ids(src, dst)
            .ok_or_else(|| Error::unknown_edge(src, dst))?;
        let list = self.adjacency.get(s.index()).ok_or_else(|| {
            Error::InvariantViolation(format!("顶点 {:?} 缺少邻接表", src))
        })?;
        list.iter()
            .find(|adj| adj.dst == d)
            .map(|adj| adj.weight.clone())
            .ok_or_else(|| Error::unknown_edge(src, dst))
    }

    /// 边数量
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|list| list.len()).sum()
    }

    /// 所有边（按源顶点编号，再按插入顺序）
    pub fn edges(&self) -> Vec<Edge<K, W>> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (id, src) in self.index.iter() {
            for adj in &self.adjacency[id.index()] {
                if let Some(dst) = self.index.key(adj.dst) {
                    edges.push(Edge::new(src.clone(), dst.clone(), adj.weight.clone()));
                }
            }
        }
        edges
    }

    /// 顶点是否带自环
    pub fn contains_self_loop(&self, key: &K) -> Result<bool> {
        self.edge_exists(key, key)
    }

    // ==================== 邻居查询 ====================

    /// 出度
    pub fn out_degree(&self, key: &K) -> Result<usize> {
        let id = self.require(key)?;
        Ok(self.adjacency[id.index()].len())
    }

    /// 入度（扫描全部邻接表）
    pub fn in_degree(&self, key: &K) -> Result<usize> {
        Ok(self.neighbors_in(key)?.len())
    }

    /// 从 key 出发的边所指向的顶点
    pub fn neighbors_out(&self, key: &K) -> Result<IndexSet<K>> {
        let id = self.require(key)?;
        Ok(self.adjacency[id.index()]
            .iter()
            .filter_map(|adj| self.index.key(adj.dst).cloned())
            .collect())
    }

    /// 有边指向 key 的顶点
    pub fn neighbors_in(&self, key: &K) -> Result<IndexSet<K>> {
        let target = self.require(key)?;
        Ok(self
            .index
            .iter()
            .filter(|(id, _)| {
                self.adjacency[id.index()]
                    .iter()
                    .any(|adj| adj.dst == target)
            })
            .map(|(_, k)| k.clone())
            .collect())
    }

    /// 从 key 出发的边：目标顶点 -> 权重
    pub fn neighbors_out_weighted(&self, key: &K) -> Result<IndexMap<K, W>> {
        let id = self.require(key)?;
        Ok(self.adjacency[id.index()]
            .iter()
            .filter_map(|adj| {
                self.index
                    .key(adj.dst)
                    .map(|dst| (dst.clone(), adj.weight.clone()))
            })
            .collect())
    }

    // ==================== 不变量 ====================

    /// 检查结构不变量
    pub fn check_invariants(&self) -> Result<()> {
        if !self.index.is_consistent() {
            return Err(Error::InvariantViolation("顶点键重复或键索引不一致".into()));
        }
        if self.index.len() != self.adjacency.len() {
            return Err(Error::InvariantViolation(format!(
                "顶点数 {} 与邻接表数 {} 不一致",
                self.index.len(),
                self.adjacency.len()
            )));
        }
        for (source, list) in self.adjacency.iter().enumerate() {
            let mut seen = HashSet::with_capacity(list.len());
            for adj in list {
                if adj.dst.index() >= self.index.len() {
                    return Err(Error::InvariantViolation(format!(
                        "顶点 #{} 的邻接表含无效编号 {}",
                        source, adj.dst
                    )));
                }
                if !seen.insert(adj.dst) {
                    return Err(Error::InvariantViolation(format!(
                        "顶点 #{} 的邻接表含重复目标 {}",
                        source, adj.dst
                    )));
                }
            }
        }
        Ok(())
    }

    // ==================== 内部辅助 ====================

    fn require(&self, key: &K) -> Result<VertexId> {
        self.index.get(key).ok_or_else(|| Error::unknown_key(key))
    }

    fn edge_ids(&self, src: &K, dst: &K) -> Option<(VertexId, VertexId)> {
        Some((self.index.get(src)?, self.index.get(dst)?))
    }

    fn find_adjacent(&self, src: VertexId, dst: VertexId) -> Option<&Adjacent<W>> {
        self.adjacency
            .get(src.index())?
            .iter()
            .find(|adj| adj.dst == dst)
    }
}

impl<K: VertexKey, W: Weight> Default for Graph<K, W> {
    fn default() -> Self {
        Self::new()
    }
}
