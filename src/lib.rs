// Setup Explorer Library
// 安装向导的文件浏览核心库

// 配置管理模块
pub mod config;

// 日志模块
pub mod logging;

// REST 客户端模块（JSON 请求器、应用定位客户端）
pub mod rest;

// 文件浏览器控制器模块
pub mod explorer;

// 宿主文件系统模块
pub mod filesystem;

// Web服务器模块
pub mod server;

#[cfg(test)]
mod test_support;

// 导出常用类型
pub use config::AppConfig;
pub use explorer::{
    AnyController, EntityType, ExplorerError, FileExplorerController, FileFilter,
    FileSystemEntity, FileSystemRoot, RemoteController, RemoteControllerConfig, StaticController,
};
pub use rest::{FetchError, HostLocatorClient, JsonFetcher, LocateApplicationResponse};
pub use server::AppState;
