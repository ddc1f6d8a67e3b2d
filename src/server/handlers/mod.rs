// API处理器模块

pub mod filesystem;
pub mod locate;

pub use filesystem::{get_roots, list_directory};
pub use locate::locate_application;
