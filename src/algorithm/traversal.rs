//! 遍历算法
//!
//! 深度优先后序、图反转、广度优先前驱树。
//! 所有算法只通过 `Graph` 的公开查询接口访问图。

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph};
use crate::types::{VertexKey, Weight};
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// 深度优先遍历中的一个栈帧：顶点、其出邻居以及下一个待检查邻居的位置
struct Frame<K> {
    vertex: K,
    neighbors: IndexSet<K>,
    next: usize,
}

impl<K: VertexKey> Frame<K> {
    fn enter<W: Weight>(graph: &Graph<K, W>, vertex: K) -> Result<Self> {
        let neighbors = graph.neighbors_out(&vertex)?;
        Ok(Self {
            vertex,
            neighbors,
            next: 0,
        })
    }

    /// 下一个尚未访问的出邻居
    fn next_unvisited(&mut self, visited: &HashSet<K>) -> Option<K> {
        while let Some(neighbor) = self.neighbors.get_index(self.next) {
            self.next += 1;
            if !visited.contains(neighbor) {
                return Some(neighbor.clone());
            }
        }
        None
    }
}

/// 完整的深度优先遍历
///
/// 按顶点编号顺序选取未访问的根，先访问其所有未访问的出邻居，再把顶点本身压入累加栈。
/// 返回的 `Vec` 按压栈顺序排列（后序），从尾部弹出即得到逆后序。
/// 使用显式栈迭代，图的深度不受调用栈限制。允许存在环。
pub fn explore_dfs<K: VertexKey, W: Weight>(graph: &Graph<K, W>) -> Result<Vec<K>> {
    let mut visited = HashSet::with_capacity(graph.vertex_count());
    let mut postorder = Vec::with_capacity(graph.vertex_count());

    for root in graph.all_vertices() {
        if visited.contains(&root) {
            continue;
        }
        visited.insert(root.clone());
        let mut stack = vec![Frame::enter(graph, root)?];

        while let Some(frame) = stack.last_mut() {
            match frame.next_unvisited(&visited) {
                Some(child) => {
                    visited.insert(child.clone());
                    stack.push(Frame::enter(graph, child)?);
                }
                None => {
                    if let Some(done) = stack.pop() {
                        postorder.push(done.vertex);
                    }
                }
            }
        }
    }

    debug!(visited = postorder.len(), "dfs complete");
    Ok(postorder)
}

/// 构造反向图：顶点相同，每条边 u -> v (w) 变为 v -> u (w)
pub fn build_reverse<K: VertexKey, W: Weight>(graph: &Graph<K, W>) -> Result<Graph<K, W>> {
    let reverse = Graph::from_parts(
        graph.all_vertices(),
        graph.edges().into_iter().map(Edge::reversed),
    )?;
    debug!(edges = reverse.edge_count(), "reverse graph built");
    Ok(reverse)
}

/// 从 start 出发的广度优先遍历
///
/// 返回每个可达顶点（start 除外）到首次发现它的前驱的映射，按发现顺序排列。
/// 不可达的顶点不出现在结果中。
pub fn explore_bfs<K: VertexKey, W: Weight>(
    graph: &Graph<K, W>,
    start: &K,
) -> Result<IndexMap<K, K>> {
    if !graph.vertex_exists(start) {
        return Err(Error::unknown_key(start));
    }

    let mut predecessors = IndexMap::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.neighbors_out(&current)? {
            if visited.insert(neighbor.clone()) {
                predecessors.insert(neighbor.clone(), current.clone());
                queue.push_back(neighbor);
            }
        }
    }

    debug!(start = ?start, reached = predecessors.len(), "bfs complete");
    Ok(predecessors)
}

/// 跳数最少的路径 start -> ... -> goal；不可达时返回 None
pub fn bfs_path<K: VertexKey, W: Weight>(
    graph: &Graph<K, W>,
    start: &K,
    goal: &K,
) -> Result<Option<Vec<K>>> {
    let tree = explore_bfs(graph, start)?;
    if !graph.vertex_exists(goal) {
        return Err(Error::unknown_key(goal));
    }
    Ok(reconstruct_path(start, goal, |key| tree.get(key)))
}

/// 沿前驱映射从 goal 回溯到 start；链条中断时返回 None
pub(crate) fn reconstruct_path<'a, K, F>(start: &K, goal: &'a K, predecessor: F) -> Option<Vec<K>>
where
    K: VertexKey + 'a,
    F: Fn(&K) -> Option<&'a K>,
{
    let mut path = vec![goal.clone()];
    let mut current = goal;
    while current != start {
        current = predecessor(current)?;
        path.push(current.clone());
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Graph<i32, i32> {
        Graph::new()
    }

    fn one() -> Graph<i32, i32> {
        Graph::from_vertices([1]).unwrap()
    }

    /// 1 -> 2
    fn two() -> Graph<i32, i32> {
        Graph::from_parts([1, 2], [(1, 2, 1)]).unwrap()
    }

    /// 1 -> 2 -> 3
    fn three() -> Graph<i32, i32> {
        Graph::from_parts([1, 2, 3], [(1, 2, 1), (2, 3, 1)]).unwrap()
    }

    /// 1 -> 2 -> 3, 2 -> 4
    fn four() -> Graph<i32, i32> {
        Graph::from_parts([1, 2, 3, 4], [(1, 2, 1), (2, 3, 1), (2, 4, 1)]).unwrap()
    }

    #[test]
    fn test_reverse_empty() {
        assert_eq!(build_reverse(&empty()).unwrap().vertex_count(), 0);
    }

    #[test]
    fn test_reverse_single_vertex() {
        let reverse = build_reverse(&one()).unwrap();
        assert_eq!(reverse.vertex_count(), 1);
        assert!(reverse.vertex_exists(&1));
    }

    #[test]
    fn test_reverse_two() {
        let reverse = build_reverse(&two()).unwrap();
        assert_eq!(reverse.vertex_count(), 2);
        assert!(reverse.edge_exists(&2, &1).unwrap());
        assert!(!reverse.edge_exists(&1, &2).unwrap());
    }

    #[test]
    fn test_reverse_three() {
        let reverse = build_reverse(&three()).unwrap();
        assert_eq!(reverse.vertex_count(), 3);
        assert!(reverse.edge_exists(&3, &2).unwrap());
        assert!(reverse.edge_exists(&2, &1).unwrap());
        assert!(!reverse.edge_exists(&1, &2).unwrap());
        assert!(!reverse.edge_exists(&2, &3).unwrap());
        assert!(!reverse.edge_exists(&1, &3).unwrap());
        assert!(!reverse.edge_exists(&3, &1).unwrap());
    }

    #[test]
    fn test_reverse_keeps_weights() {
        let g: Graph<&str, f64> =
            Graph::from_parts(["A", "B", "C"], [("A", "B", 2.5), ("C", "B", 4.0), ("B", "B", 1.0)])
                .unwrap();
        let reverse = build_reverse(&g).unwrap();
        assert_eq!(reverse.edge_weight(&"B", &"A").unwrap(), 2.5);
        assert_eq!(reverse.edge_weight(&"B", &"C").unwrap(), 4.0);
        assert_eq!(reverse.edge_weight(&"B", &"B").unwrap(), 1.0);
        assert_eq!(reverse.edge_count(), 3);
    }

    #[test]
    fn test_bfs_single_vertex() {
        assert!(explore_bfs(&one(), &1).unwrap().is_empty());
    }

    #[test]
    fn test_bfs_two() {
        let tree = explore_bfs(&two(), &1).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[&2], 1);
    }

    #[test]
    fn test_bfs_three() {
        let tree = explore_bfs(&three(), &1).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[&2], 1);
        assert_eq!(tree[&3], 2);
    }

    #[test]
    fn test_bfs_four() {
        let mut g = four();
        g.add_edge(&3, &4, 1).unwrap();
        let tree = explore_bfs(&g, &1).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[&2], 1);
        assert_eq!(tree[&3], 2);
        assert_eq!(tree[&4], 2);
    }

    #[test]
    fn test_bfs_skips_unreachable_and_start() {
        let mut g = four();
        g.add_edge(&3, &1, 1).unwrap();
        let tree = explore_bfs(&g, &2).unwrap();
        assert!(!tree.contains_key(&2));
        assert_eq!(tree[&1], 3);
        assert_eq!(tree.len(), 3);

        let tree = explore_bfs(&four(), &3).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_bfs_unknown_start() {
        assert!(matches!(explore_bfs(&two(), &9), Err(Error::UnknownKey(_))));
    }

    #[test]
    fn test_bfs_path() {
        let g = four();
        assert_eq!(bfs_path(&g, &1, &4).unwrap(), Some(vec![1, 2, 4]));
        assert_eq!(bfs_path(&g, &1, &1).unwrap(), Some(vec![1]));
        assert_eq!(bfs_path(&g, &3, &1).unwrap(), None);
        assert!(matches!(bfs_path(&g, &1, &9), Err(Error::UnknownKey(_))));
    }

    #[test]
    fn test_dfs_postorder() {
        // A -> B, A -> C, C -> D, D -> E, C -> E
        let g: Graph<&str, i32> = Graph::from_parts(
            ["A", "B", "C", "D", "E"],
            [("A", "B", 0), ("A", "C", 0), ("C", "D", 0), ("D", "E", 0), ("C", "E", 0)],
        )
        .unwrap();
        let postorder = explore_dfs(&g).unwrap();
        assert_eq!(postorder, vec!["B", "E", "D", "C", "A"]);

        // 弹栈顺序即逆后序
        let mut stack = postorder;
        assert_eq!(stack.pop(), Some("A"));
        assert_eq!(stack.pop(), Some("C"));
    }

    #[test]
    fn test_dfs_visits_every_vertex_once() {
        let mut g = four();
        g.add_vertex(5).unwrap();
        g.add_edge(&4, &1, 1).unwrap();
        let postorder = explore_dfs(&g).unwrap();
        assert_eq!(postorder, vec![3, 4, 2, 1, 5]);
        assert!(explore_dfs(&empty()).unwrap().is_empty());
    }

    #[test]
    fn test_dfs_deep_chain() {
        let n = 3_000;
        let mut g: Graph<u32, u32> = Graph::from_vertices(0..n).unwrap();
        for v in 1..n {
            g.add_edge(&(v - 1), &v, 1).unwrap();
        }
        let postorder = explore_dfs(&g).unwrap();
        assert_eq!(postorder.len(), n as usize);
        assert_eq!(postorder.first(), Some(&(n - 1)));
        assert_eq!(postorder.last(), Some(&0));
    }
}
