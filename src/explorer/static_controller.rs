// 静态文件浏览器
//
// 无后端时的占位实现：固定返回示例数据，不做任何 I/O，永不失败。

use async_trait::async_trait;
use std::convert::Infallible;

use super::controller::FileExplorerController;
use super::types::{FileSystemEntity, FileSystemRoot};

/// 静态示例数据控制器
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticController;

impl StaticController {
    pub fn new() -> Self {
        Self
    }

    /// 示例根目录
    pub fn sample_roots() -> Vec<FileSystemRoot> {
        vec![FileSystemRoot::new("C:"), FileSystemRoot::new("D:")]
    }

    /// 示例目录内容
    pub fn sample_entities() -> Vec<FileSystemEntity> {
        vec![
            FileSystemEntity::directory("example-directory"),
            FileSystemEntity::file("rpcs3.exe"),
        ]
    }
}

#[async_trait]
impl FileExplorerController for StaticController {
    type Error = Infallible;

    async fn list_roots(&self) -> Result<Vec<FileSystemRoot>, Infallible> {
        Ok(Self::sample_roots())
    }

    async fn list_files_in_directory(
        &self,
        _directory: &str,
    ) -> Result<Vec<FileSystemEntity>, Infallible> {
        Ok(Self::sample_entities())
    }
}
