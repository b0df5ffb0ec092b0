//! 边定义
//!
//! `Edge` 是调用方使用的 (源, 目标, 权重) 三元组；
//! `Adjacent` 是邻接表内部存储的 (目标编号, 权重) 项。

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// 边：源顶点键、目标顶点键与权重
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<K, W> {
    pub src: K,
    pub dst: K,
    pub weight: W,
}

impl<K, W> Edge<K, W> {
    pub fn new(src: K, dst: K, weight: W) -> Self {
        Self { src, dst, weight }
    }


    /// 同权重的反向边
    pub fn reversed(self) -> Self {
        Self {
            src: self.dst,
            dst: self.src,
            weight: self.weight,
        }
    }
}

impl<K, W> From<(K, K, W)> for Edge<K, W> {
    fn from((src, dst, weight): (K, K, W)) -> Self {
        Self::new(src, dst, weight)
    }
}

/// 邻接表项：目标顶点编号及边权重
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Adjacent<W> {
    pub(crate) dst: VertexId,
    pub(crate) weight: W,
}

impl<W> Adjacent<W> {
    pub(crate) fn new(dst: VertexId, weight: W) -> Self {
        Self { dst, weight }
    }
}

/// 单个顶点的出边列表
///
/// 大多数顶点出度很小，内联存储避免堆分配。
pub(crate) type AdjacencyList<W> = SmallVec<[Adjacent<W>; 4]>;
