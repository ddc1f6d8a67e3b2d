// 宿主文件系统模块
//
// setup server 一侧的根目录枚举、目录列表和应用定位

mod locator;
mod service;
mod types;

pub use locator::ApplicationLocator;
pub use service::FilesystemService;
pub use types::*;
