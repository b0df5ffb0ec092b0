//! 通用类型定义

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::Hash;

/// 顶点键：由调用方提供，可比较、可哈希
pub trait VertexKey: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> VertexKey for T {}

/// 边权重
pub trait Weight: Clone + Debug {}

impl<T: Clone + Debug> Weight for T {}

/// 可用于最短路径计算的权重（可转换为 f64）
pub trait PathWeight: Weight + Copy + Into<f64> {}

impl<T: Weight + Copy + Into<f64>> PathWeight for T {}

/// 路径距离，按 `f64::total_cmp` 全序比较，可作为优先队列的优先级
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Distance(pub f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);
    pub const INFINITY: Distance = Distance(f64::INFINITY);

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            write!(f, "∞")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
