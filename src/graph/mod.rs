//! 图核心模块
//!
//! 定义顶点编号、边和带权有向图的核心数据结构

mod edge;
mod graph;
mod index;
mod vertex;

pub use edge::Edge;
pub use graph::Graph;
