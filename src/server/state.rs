// 应用状态

use crate::config::AppConfig;
use crate::filesystem::{ApplicationLocator, FilesystemService};
use std::sync::Arc;

/// setup server 共享状态，构造后只读
#[derive(Clone)]
pub struct AppState {
    /// 宿主文件系统服务
    pub filesystem: Arc<FilesystemService>,
    /// 应用定位器
    pub locator: Arc<ApplicationLocator>,
    /// 应用配置
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            filesystem: Arc::new(FilesystemService::new(config.filesystem.clone())),
            locator: Arc::new(ApplicationLocator::new(&config.locator)),
            config: Arc::new(config),
        }
    }

    /// 替换定位器（测试或自定义搜索目录时使用）
    pub fn with_locator(mut self, locator: ApplicationLocator) -> Self {
        self.locator = Arc::new(locator);
        self
    }
}
