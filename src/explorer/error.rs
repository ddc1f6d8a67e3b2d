// 文件浏览器错误类型

use std::convert::Infallible;
use thiserror::Error;

use crate::rest::FetchError;

/// 远程浏览错误
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// 请求层错误（网络、状态码、解析），原样透传
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// 目录不存在（后端返回 404）
    #[error("目录不存在: {directory}")]
    NotFound { directory: String },

    /// 后端返回的条目不满足约束
    #[error("后端返回了无效条目: {reason}")]
    InvalidEntity { reason: String },
}

impl ExplorerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExplorerError::NotFound { .. })
    }
}

// 静态实现永不失败，统一到 ExplorerError 时无需任何分支
impl From<Infallible> for ExplorerError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
