// 运行环境检测模块

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 操作系统类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsType {
    Windows,
    Linux,
    MacOS,
    Unknown,
}

impl OsType {
    pub fn as_str(&self) -> &str {
        match self {
            OsType::Windows => "Windows",
            OsType::Linux => "Linux",
            OsType::MacOS => "macOS",
            OsType::Unknown => "Unknown",
        }
    }

    /// 该平台上应用可执行文件的名称（Windows 追加 .exe）
    pub fn executable_name(&self, application: &str) -> String {
        match self {
            OsType::Windows => format!("{}.exe", application),
            _ => application.to_string(),
        }
    }

    /// 根目录是否按驱动器盘符划分
    pub fn uses_drive_letters(&self) -> bool {
        matches!(self, OsType::Windows)
    }
}

/// 环境检测器
pub struct EnvDetector;

impl EnvDetector {
    /// 检测是否在 Docker 环境中
    ///
    /// 依次检查 /.dockerenv、/proc/1/cgroup 和 container 环境变量
    pub fn is_docker() -> bool {
        if Path::new("/.dockerenv").exists() {
            return true;
        }

        if let Ok(content) = fs::read_to_string("/proc/1/cgroup") {
            if content.contains("docker") || content.contains("containerd") {
                return true;
            }
        }

        std::env::var("container").is_ok()
    }

    /// 编译目标平台对应的操作系统类型
    pub fn get_os_type() -> OsType {
        #[cfg(target_os = "windows")]
        return OsType::Windows;

        #[cfg(target_os = "macos")]
        return OsType::MacOS;

        #[cfg(target_os = "linux")]
        return OsType::Linux;

        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        return OsType::Unknown;
    }
}
