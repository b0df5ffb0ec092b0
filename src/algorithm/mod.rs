//! 图算法模块
//!
//! 包含深度/广度优先遍历、图反转、拓扑排序和 Dijkstra 最短路径

mod dijkstra;
mod topo;
mod traversal;

pub use dijkstra::{DijkstraResolver, ShortestPaths, SolverState};
pub use topo::{is_acyclic, topo_sort};
pub use traversal::{bfs_path, build_reverse, explore_bfs, explore_dfs};
