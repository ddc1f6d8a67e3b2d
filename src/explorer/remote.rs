// 远程文件浏览器
//
// 通过 setup server 的 REST 接口浏览宿主机文件系统：
//   GET {base}/roots
//   GET {base}/list?directory=<目录>

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use super::controller::{filter_entities, FileExplorerController};
use super::error::ExplorerError;
use super::types::{FileFilter, FileSystemEntity, FileSystemRoot};
use crate::rest::{FetchError, JsonFetcher};

/// 远程控制器配置，构造后不可修改
#[derive(Debug, Clone)]
pub struct RemoteControllerConfig {
    /// 基础地址，所有端点追加在其后
    pub base_url: String,
    /// 可选的条目过滤谓词
    pub file_filter: Option<FileFilter>,
    /// 请求超时，None 表示不设置
    pub timeout: Option<Duration>,
}

impl RemoteControllerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            file_filter: None,
            timeout: None,
        }
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.file_filter = Some(filter);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// 目录列表接口的相对路径，目录值做百分号编码
pub fn list_endpoint(directory: &str) -> String {
    format!("/list?directory={}", urlencoding::encode(directory))
}

/// 远程控制器
#[derive(Debug, Clone)]
pub struct RemoteController {
    fetcher: JsonFetcher,
    file_filter: Option<FileFilter>,
}

impl RemoteController {
    /// 创建远程控制器，基础地址无效时返回错误
    pub fn new(config: RemoteControllerConfig) -> Result<Self, FetchError> {
        let fetcher = JsonFetcher::new(&config.base_url, config.timeout)?;
        Ok(Self {
            fetcher,
            file_filter: config.file_filter,
        })
    }

    /// 复用已有的请求器
    pub fn from_fetcher(fetcher: JsonFetcher, file_filter: Option<FileFilter>) -> Self {
        Self {
            fetcher,
            file_filter,
        }
    }

    pub fn base_url(&self) -> &str {
        self.fetcher.base_url()
    }

    /// 目录列表请求的完整地址
    pub fn list_url(&self, directory: &str) -> String {
        self.fetcher.endpoint_url(&list_endpoint(directory))
    }

    /// 根目录请求的完整地址
    pub fn roots_url(&self) -> String {
        self.fetcher.endpoint_url("/roots")
    }
}

#[async_trait]
impl FileExplorerController for RemoteController {
    type Error = ExplorerError;

    async fn list_roots(&self) -> Result<Vec<FileSystemRoot>, ExplorerError> {
        let roots: Vec<FileSystemRoot> = self.fetcher.get_json("/roots").await?;
        debug!("获取到 {} 个根目录", roots.len());
        Ok(roots)
    }

    async fn list_files_in_directory(
        &self,
        directory: &str,
    ) -> Result<Vec<FileSystemEntity>, ExplorerError> {
        let entities: Vec<FileSystemEntity> = self
            .fetcher
            .get_json(&list_endpoint(directory))
            .await
            .map_err(|e| {
                if e.status() == Some(StatusCode::NOT_FOUND) {
                    ExplorerError::NotFound {
                        directory: directory.to_string(),
                    }
                } else {
                    ExplorerError::Fetch(e)
                }
            })?;

        if entities.iter().any(|e| e.basename.is_empty()) {
            return Err(ExplorerError::InvalidEntity {
                reason: format!("目录 {} 中存在空的条目名称", directory),
            });
        }

        let total = entities.len();
        let entities = filter_entities(self, entities);
        debug!(
            "目录 {} 共 {} 个条目，过滤后 {} 个",
            directory,
            total,
            entities.len()
        );

        Ok(entities)
    }

    fn filter_file_system_entity(&self, entity: &FileSystemEntity) -> bool {
        self.file_filter
            .as_ref()
            .map_or(true, |filter| filter.matches(entity))
    }
}
