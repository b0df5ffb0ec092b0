//! 顶点编号
//!
//! 顶点在创建时被分配一个连续的、从 0 开始的内部编号，用于寻址邻接表。
//! 删除顶点时，所有更大的编号减一，以保持连续。

use std::fmt;

/// 顶点内部编号（0..N-1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

impl VertexId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// 删除编号为 `removed` 的顶点后，本编号应有的新值
    ///
    /// 调用方须保证 `self != removed`。
    pub fn shifted_after_removal(self, removed: VertexId) -> Self {
        if self.0 > removed.0 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
