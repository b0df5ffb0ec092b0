//! 拓扑排序（Kahn 算法）

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{VertexKey, Weight};
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// 对图做拓扑排序
///
/// 入度为 0 的顶点按编号顺序入队，之后先进先出。
/// 拓扑序不唯一；若排出的顶点数少于顶点总数，说明图中有环，返回 `CycleDetected`。
pub fn topo_sort<K: VertexKey, W: Weight>(graph: &Graph<K, W>) -> Result<Vec<K>> {
    let vertices = graph.all_vertices();

    let mut in_degrees: IndexMap<K, usize> =
        vertices.iter().map(|v| (v.clone(), 0)).collect();
    for v in &vertices {
        for neighbor in graph.neighbors_out(v)? {
            if let Some(degree) = in_degrees.get_mut(&neighbor) {
                *degree += 1;
            }
        }
    }

    let mut sources: VecDeque<K> = in_degrees
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(v, _)| v.clone())
        .collect();

    let mut sorted = Vec::with_capacity(vertices.len());
    while let Some(current) = sources.pop_front() {
        for neighbor in graph.neighbors_out(&current)? {
            if let Some(degree) = in_degrees.get_mut(&neighbor) {
                *degree -= 1;
                if *degree == 0 {
                    sources.push_back(neighbor);
                }
            }
        }
        sorted.push(current);
    }

    if sorted.len() != graph.vertex_count() {
        warn!(
            sorted = sorted.len(),
            total = graph.vertex_count(),
            "topological sort found a cycle"
        );
        return Err(Error::CycleDetected {
            sorted: sorted.len(),
            total: graph.vertex_count(),
        });
    }

    debug!(len = sorted.len(), "topological sort complete");
    Ok(sorted)
}

/// 图是否为有向无环图
pub fn is_acyclic<K: VertexKey, W: Weight>(graph: &Graph<K, W>) -> Result<bool> {
    match topo_sort(graph) {
        Ok(_) => Ok(true),
        Err(Error::CycleDetected { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}
