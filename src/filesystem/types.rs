// 宿主文件系统模块数据类型定义

// 重新导出配置模块中的 FilesystemConfig
pub use crate::config::FilesystemConfig;

/// 文件系统错误码
/// 错误码范围：50001 - 50099
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorCode {
    /// 目录不存在
    DirectoryNotFound = 50002,
    /// 权限不足
    PermissionDenied = 50003,
    /// 目录读取失败
    DirectoryReadFailed = 50005,
    /// 路径格式无效
    InvalidPathFormat = 50006,
    /// 不是目录
    NotADirectory = 50009,
}

impl FsErrorCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::DirectoryNotFound => "目录不存在",
            Self::PermissionDenied => "没有权限访问该路径",
            Self::DirectoryReadFailed => "读取目录失败",
            Self::InvalidPathFormat => "路径格式无效",
            Self::NotADirectory => "指定路径不是目录",
        }
    }
}

/// 文件系统错误
#[derive(Debug)]
pub struct FsError {
    pub code: FsErrorCode,
    pub message: String,
    pub path: Option<String>,
}

impl FsError {
    pub fn new(code: FsErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {}", self.message, path)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for FsError {}
