//! 单源最短路径（Dijkstra 算法）
//!
//! 求解器持有一份图的拷贝，求解结果缓存到下一次 `solve` 为止。
//! 要求边权非负；负权下结果无定义。

use super::traversal::reconstruct_path;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{Distance, PathWeight, VertexKey};
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;
use tracing::{debug, trace};

/// 求解器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverState {
    /// 尚未求解
    Unsolved,
    /// 正在求解（仅在 `solve` 调用期间）
    Solving,
    /// 已求解
    Solved,
}

/// 最短路径结果
///
/// `distances` 覆盖图中所有顶点，不可达的顶点距离为 `f64::INFINITY`；
/// `predecessors` 覆盖除起点外所有可达顶点。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash"
))]
pub struct ShortestPaths<K> {
    pub distances: HashMap<K, f64>,
    pub predecessors: HashMap<K, K>,
}

impl<K> ShortestPaths<K> {
    fn new() -> Self {
        Self {
            distances: HashMap::new(),
            predecessors: HashMap::new(),
        }
    }
}

impl<K> Default for ShortestPaths<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dijkstra 求解器
pub struct DijkstraResolver<K, W> {
    graph: Graph<K, W>,
    state: SolverState,
    start: Option<K>,
    results: ShortestPaths<K>,
}

impl<K: VertexKey, W: PathWeight> DijkstraResolver<K, W> {
    /// 创建求解器，此时尚未求解
    pub fn new(graph: Graph<K, W>) -> Self {
        Self {
            graph,
            state: SolverState::Unsolved,
            start: None,
            results: ShortestPaths::new(),
        }
    }

    /// 以 start 为起点求解，覆盖上一次的结果
    ///
    /// 失败时求解器保持调用前的状态与结果。
    pub fn solve(&mut self, start: &K) -> Result<()> {
        if !self.graph.vertex_exists(start) {
            return Err(Error::unknown_key(start));
        }

        let started = Instant::now();
        let previous = std::mem::replace(&mut self.state, SolverState::Solving);
        let results = match self.shortest_paths(start) {
            Ok(results) => results,
            Err(e) => {
                self.state = previous;
                return Err(e);
            }
        };

        self.start = Some(start.clone());
        self.results = results;
        self.state = SolverState::Solved;
        debug!(
            start = ?start,
            vertices = self.results.distances.len(),
            reached = self.results.predecessors.len() + 1,
            elapsed_us = started.elapsed().as_micros() as u64,
            "dijkstra solved"
        );
        Ok(())
    }

    /// 计算从 start 出发的最短路径，不修改求解器
    fn shortest_paths(&self, start: &K) -> Result<ShortestPaths<K>> {
        let mut results = ShortestPaths::new();

        // 未解决的顶点及其暂定距离；距离越小优先级越高
        let mut unresolved: PriorityQueue<K, Reverse<Distance>> = PriorityQueue::new();
        for vertex in self.graph.all_vertices() {
            unresolved.push(vertex, Reverse(Distance::INFINITY));
        }
        unresolved.change_priority(start, Reverse(Distance::ZERO));

        while let Some((current, Reverse(tentative))) = unresolved.pop() {
            for (neighbor, weight) in self.graph.neighbors_out_weighted(&current)? {
                let Some(&Reverse(known)) = unresolved.get_priority(&neighbor) else {
                    continue;
                };
                let weight: f64 = weight.into();
                let candidate = Distance(tentative.value() + weight);
                if candidate < known {
                    trace!(from = ?current, to = ?neighbor, distance = candidate.value(), "relax");
                    unresolved.change_priority(&neighbor, Reverse(candidate));
                    results.predecessors.insert(neighbor, current.clone());
                }
            }
            results.distances.insert(current, tentative.value());
        }

        Ok(results)
    }

    /// 最近一次求解的结果；未求解时返回 `NotSolved`
    pub fn results(&self) -> Result<&ShortestPaths<K>> {
        match self.state {
            SolverState::Solved => Ok(&self.results),
            _ => Err(Error::NotSolved),
        }
    }

    /// 起点到 target 的最短距离
    pub fn distance_to(&self, target: &K) -> Result<f64> {
        self.results()?
            .distances
            .get(target)
            .copied()
            .ok_or_else(|| Error::unknown_key(target))
    }

    /// 起点到 target 的最短路径；不可达时返回 None
    pub fn path_to(&self, target: &K) -> Result<Option<Vec<K>>> {
        let results = self.results()?;
        if !results.distances.contains_key(target) {
            return Err(Error::unknown_key(target));
        }
        let start = self.start.as_ref().ok_or(Error::NotSolved)?;
        Ok(reconstruct_path(start, target, |key| {
            results.predecessors.get(key)
        }))
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// 最近一次求解的起点
    pub fn start(&self) -> Option<&K> {
        self.start.as_ref()
    }

    pub fn graph(&self) -> &Graph<K, W> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted() -> Graph<&'static str, f64> {
        Graph::from_parts(
            ["A", "B", "C", "D", "E", "F"],
            [
                ("A", "B", 1.0),
                ("A", "C", 4.0),
                ("B", "C", 2.0),
                ("B", "D", 3.0),
                ("C", "D", 5.0),
                ("C", "E", 6.0),
                ("D", "F", 10.0),
                ("E", "F", 1.0),
            ],
        )
        .unwrap()
    }

    fn chain() -> Graph<i32, f64> {
        Graph::from_parts([1, 2, 3, 4], [(1, 2, 1.0), (2, 3, 1.0), (2, 4, 1.0)]).unwrap()
    }

    #[test]
    fn test_not_solved() {
        let resolver = DijkstraResolver::new(weighted());
        assert_eq!(resolver.state(), SolverState::Unsolved);
        assert!(matches!(resolver.results(), Err(Error::NotSolved)));
        assert!(resolver.results().unwrap_err().is_logic());
        assert!(resolver.path_to(&"A").is_err());
    }

    #[test]
    fn test_six_vertices() {
        let mut resolver = DijkstraResolver::new(weighted());
        resolver.solve(&"A").unwrap();
        assert_eq!(resolver.state(), SolverState::Solved);

        let results = resolver.results().unwrap();
        let expected = [("A", 0.0), ("B", 1.0), ("C", 3.0), ("D", 4.0), ("E", 9.0), ("F", 10.0)];
        assert_eq!(results.distances.len(), expected.len());
        for (key, distance) in expected {
            assert_eq!(results.distances[key], distance, "distance to {}", key);
        }

        let expected = [("B", "A"), ("C", "B"), ("D", "B"), ("E", "C"), ("F", "E")];
        assert_eq!(results.predecessors.len(), expected.len());
        for (key, pred) in expected {
            assert_eq!(results.predecessors[key], pred, "predecessor of {}", key);
        }
    }

    #[test]
    fn test_chain() {
        let mut resolver = DijkstraResolver::new(chain());
        resolver.solve(&1).unwrap();
        let results = resolver.results().unwrap();

        assert_eq!(results.distances[&1], 0.0);
        assert_eq!(results.distances[&2], 1.0);
        assert_eq!(results.distances[&3], 2.0);
        assert_eq!(results.distances[&4], 2.0);

        assert_eq!(results.predecessors.len(), 3);
        assert_eq!(results.predecessors[&2], 1);
        assert_eq!(results.predecessors[&3], 2);
        assert_eq!(results.predecessors[&4], 2);
    }

    #[test]
    fn test_unreachable_vertices_are_infinite() {
        let mut resolver = DijkstraResolver::new(chain());
        resolver.solve(&2).unwrap();
        let results = resolver.results().unwrap();
        assert_eq!(results.distances.len(), 4);
        assert!(results.distances[&1].is_infinite());
        assert!(!results.predecessors.contains_key(&1));
        assert!(!results.predecessors.contains_key(&2));
        assert_eq!(resolver.path_to(&1).unwrap(), None);
    }

    #[test]
    fn test_resolve_resets_results() {
        let mut resolver = DijkstraResolver::new(weighted());
        resolver.solve(&"A").unwrap();
        resolver.solve(&"C").unwrap();
        assert_eq!(resolver.start(), Some(&"C"));
        assert_eq!(resolver.distance_to(&"C").unwrap(), 0.0);
        assert_eq!(resolver.distance_to(&"F").unwrap(), 7.0);
        assert!(resolver.distance_to(&"A").unwrap().is_infinite());
        assert!(!resolver.results().unwrap().predecessors.contains_key(&"B"));
    }

    #[test]
    fn test_unknown_start_keeps_state() {
        let mut resolver = DijkstraResolver::new(weighted());
        assert!(matches!(resolver.solve(&"Z"), Err(Error::UnknownKey(_))));
        assert_eq!(resolver.state(), SolverState::Unsolved);

        resolver.solve(&"A").unwrap();
        assert!(resolver.solve(&"Z").is_err());
        assert_eq!(resolver.state(), SolverState::Solved);
        assert_eq!(resolver.start(), Some(&"A"));
    }

    #[test]
    fn test_shortest_paths_leaves_resolver_untouched() {
        let mut resolver = DijkstraResolver::new(weighted());
        resolver.solve(&"A").unwrap();

        let from_c = resolver.shortest_paths(&"C").unwrap();
        assert_eq!(from_c.distances[&"F"], 7.0);
        assert_eq!(resolver.state(), SolverState::Solved);
        assert_eq!(resolver.start(), Some(&"A"));
        assert_eq!(resolver.distance_to(&"F").unwrap(), 10.0);
    }

    #[test]
    fn test_path_to() {
        let mut resolver = DijkstraResolver::new(weighted());
        resolver.solve(&"A").unwrap();
        assert_eq!(
            resolver.path_to(&"F").unwrap(),
            Some(vec!["A", "B", "C", "E", "F"])
        );
        assert_eq!(resolver.path_to(&"A").unwrap(), Some(vec!["A"]));
        assert!(matches!(resolver.path_to(&"Q"), Err(Error::UnknownKey(_))));
    }

    #[test]
    fn test_integer_weights_and_self_loop() {
        let g: Graph<char, u32> =
            Graph::from_parts(['x', 'y', 'z'], [('x', 'x', 3), ('x', 'y', 2), ('y', 'z', 2), ('x', 'z', 5)])
                .unwrap();
        let mut resolver = DijkstraResolver::new(g);
        resolver.solve(&'x').unwrap();
        assert_eq!(resolver.distance_to(&'z').unwrap(), 4.0);
        assert!(!resolver.results().unwrap().predecessors.contains_key(&'x'));
    }

    #[test]
    fn test_results_serialize() {
        let mut resolver = DijkstraResolver::new(chain());
        resolver.solve(&1).unwrap();
        let json = serde_json::to_value(resolver.results().unwrap()).unwrap();
        assert_eq!(json["distances"]["4"], 2.0);
        assert_eq!(json["predecessors"]["3"], 2);
    }
}
