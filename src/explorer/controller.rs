// 文件浏览器控制器抽象
//
// UI 只面向 FileExplorerController 编程，具体后端（静态 / 远程）在配置阶段选定。

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::error::ExplorerError;
use super::remote::{RemoteController, RemoteControllerConfig};
use super::static_controller::StaticController;
use super::types::{FileSystemEntity, FileSystemRoot};
use crate::config::{ExplorerConfig, ExplorerMode};
use crate::rest::FetchError;

/// 文件浏览器控制器
///
/// 每个实现声明自己的错误类型：不做 I/O 的实现使用 `Infallible`，
/// 调用方可以在类型层面区分"可能失败"和"永不失败"的后端。
#[async_trait]
pub trait FileExplorerController: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 列出所有顶层可浏览位置
    async fn list_roots(&self) -> Result<Vec<FileSystemRoot>, Self::Error>;

    /// 列出目录的直接子条目
    ///
    /// `directory` 由调用方持有，控制器不校验其格式
    async fn list_files_in_directory(
        &self,
        directory: &str,
    ) -> Result<Vec<FileSystemEntity>, Self::Error>;

    /// 条目是否保留在列表结果中，默认全部保留
    fn filter_file_system_entity(&self, _entity: &FileSystemEntity) -> bool {
        true
    }
}

/// 按控制器的过滤规则筛选条目，保持原有顺序
pub fn filter_entities<C>(controller: &C, mut entities: Vec<FileSystemEntity>) -> Vec<FileSystemEntity>
where
    C: FileExplorerController + ?Sized,
{
    entities.retain(|entity| controller.filter_file_system_entity(entity));
    entities
}

/// 配置阶段选定的控制器
#[derive(Debug, Clone)]
pub enum AnyController {
    Static(StaticController),
    Remote(RemoteController),
}

impl AnyController {
    /// 按配置创建控制器
    pub fn from_config(config: &ExplorerConfig) -> Result<Self, FetchError> {
        match config.mode {
            ExplorerMode::Static => {
                info!("文件浏览器使用静态示例数据");
                Ok(Self::Static(StaticController::new()))
            }
            ExplorerMode::Remote => {
                let mut remote = RemoteControllerConfig::new(config.base_url.clone());
                if let Some(filter) = config.filter.to_file_filter() {
                    remote = remote.with_filter(filter);
                }
                if let Some(secs) = config.timeout_secs {
                    remote = remote.with_timeout(Duration::from_secs(secs));
                }

                info!(
                    "文件浏览器使用远程后端: {}, 过滤: {:?}",
                    config.base_url, config.filter
                );
                Ok(Self::Remote(RemoteController::new(remote)?))
            }
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }
}

#[async_trait]
impl FileExplorerController for AnyController {
    type Error = ExplorerError;

    async fn list_roots(&self) -> Result<Vec<FileSystemRoot>, ExplorerError> {
        match self {
            Self::Static(c) => Ok(c.list_roots().await?),
            Self::Remote(c) => c.list_roots().await,
        }
    }

    async fn list_files_in_directory(
        &self,
        directory: &str,
    ) -> Result<Vec<FileSystemEntity>, ExplorerError> {
        match self {
            Self::Static(c) => Ok(c.list_files_in_directory(directory).await?),
            Self::Remote(c) => c.list_files_in_directory(directory).await,
        }
    }

    fn filter_file_system_entity(&self, entity: &FileSystemEntity) -> bool {
        match self {
            Self::Static(c) => c.filter_file_system_entity(entity),
            Self::Remote(c) => c.filter_file_system_entity(entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityFilter;
    use crate::test_support::spawn_backend;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    // 只依赖抽象的调用方
    async fn count_entries<C: FileExplorerController>(
        controller: &C,
        directory: &str,
    ) -> Result<usize, C::Error> {
        Ok(controller.list_files_in_directory(directory).await?.len())
    }

    #[tokio::test]
    async fn test_callers_are_backend_agnostic() {
        let base = spawn_backend(Router::new().route(
            "/list",
            get(|| async { Json(json!([{"basename": "only", "type": "file"}])) }),
        ))
        .await;

        let remote = RemoteController::new(RemoteControllerConfig::new(base)).unwrap();

        assert_eq!(count_entries(&StaticController::new(), "C:").await.unwrap(), 2);
        assert_eq!(count_entries(&remote, "C:").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_from_config_static() {
        let config = ExplorerConfig {
            mode: ExplorerMode::Static,
            ..ExplorerConfig::default()
        };

        let controller = AnyController::from_config(&config).unwrap();
        assert!(controller.is_static());

        let roots = controller.list_roots().await.unwrap();
        assert_eq!(roots, StaticController::sample_roots());
    }

    #[tokio::test]
    async fn test_from_config_remote_with_filter() {
        let base = spawn_backend(Router::new().route(
            "/list",
            get(|| async {
                Json(json!([
                    {"basename": "a", "type": "directory"},
                    {"basename": "b.txt", "type": "file"}
                ]))
            }),
        ))
        .await;

        let config = ExplorerConfig {
            mode: ExplorerMode::Remote,
            base_url: base,
            filter: EntityFilter::Directories,
            timeout_secs: Some(5),
        };

        let controller = AnyController::from_config(&config).unwrap();
        assert!(!controller.is_static());

        let entities = controller.list_files_in_directory("/tmp").await.unwrap();
        assert_eq!(entities, vec![FileSystemEntity::directory("a")]);
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let config = ExplorerConfig {
            mode: ExplorerMode::Remote,
            base_url: "localhost without scheme".to_string(),
            ..ExplorerConfig::default()
        };

        assert!(AnyController::from_config(&config).is_err());
    }

    #[test]
    fn test_filter_entities_preserves_order() {
        let controller = StaticController::new();
        let entities = vec![
            FileSystemEntity::file("z"),
            FileSystemEntity::directory("a"),
            FileSystemEntity::file("m"),
        ];

        assert_eq!(filter_entities(&controller, entities.clone()), entities);
    }
}
