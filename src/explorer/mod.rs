// 文件浏览器模块
//
// 为安装向导 UI 提供可替换后端的根目录 / 目录内容浏览能力

mod controller;
mod error;
mod remote;
mod static_controller;
mod types;

pub use controller::{filter_entities, AnyController, FileExplorerController};
pub use error::ExplorerError;
pub use remote::{list_endpoint, RemoteController, RemoteControllerConfig};
pub use static_controller::StaticController;
pub use types::*;
