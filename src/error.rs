//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    UnknownKey(String),

    #[error("顶点已存在: {0}")]
    DuplicateKey(String),

    #[error("边不存在: {src} -> {dst}")]
    UnknownEdge { src: String, dst: String },

    #[error("边已存在: {src} -> {dst}")]
    DuplicateEdge { src: String, dst: String },

    #[error("图中存在环: 仅排序了 {sorted}/{total} 个顶点")]
    CycleDetected { sorted: usize, total: usize },

    #[error("最短路径尚未求解")]
    NotSolved,

    #[error("内部不变量被破坏: {0}")]
    InvariantViolation(String),
}

impl Error {
    pub(crate) fn unknown_key<K: std::fmt::Debug>(key: &K) -> Self {
        Error::UnknownKey(format!("{:?}", key))
    }

    pub(crate) fn duplicate_key<K: std::fmt::Debug>(key: &K) -> Self {
        Error::DuplicateKey(format!("{:?}", key))
    }

    pub(crate) fn unknown_edge<K: std::fmt::Debug>(src: &K, dst: &K) -> Self {
        Error::UnknownEdge {
            src: format!("{:?}", src),
            dst: format!("{:?}", dst),
        }
    }

    pub(crate) fn duplicate_edge<K: std::fmt::Debug>(src: &K, dst: &K) -> Self {
        Error::DuplicateEdge {
            src: format!("{:?}", src),
            dst: format!("{:?}", dst),
        }
    }

    /// 是否为内部错误（程序缺陷，而非调用方错误）
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::InvariantViolation(_))
    }

    /// 是否为调用顺序错误（如未求解即读取结果）
    pub fn is_logic(&self) -> bool {
        matches!(self, Error::NotSolved)
    }
}
