//! WeightGraph - 通用键值带权有向图
//!
//! 以任意可哈希的键标识顶点、以数值类型为边权的有向图，支持：
//! - 顶点/边的增删、顶点改名，并在每次修改后保持结构不变量
//! - 深度优先后序、广度优先前驱树、图反转
//! - Kahn 拓扑排序（带环检测）
//! - 单源 Dijkstra 最短路径求解器

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    bfs_path, build_reverse, explore_bfs, explore_dfs, is_acyclic, topo_sort, DijkstraResolver,
    ShortestPaths, SolverState,
};
pub use error::{Error, Result};
pub use graph::{Edge, Graph};
pub use types::{Distance, PathWeight, VertexKey, Weight};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
