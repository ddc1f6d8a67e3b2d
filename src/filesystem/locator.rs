// 宿主机应用定位
//
// 按顺序搜索配置目录、平台默认安装目录和 PATH，返回第一个存在的可执行文件

use std::path::PathBuf;

use crate::config::{EnvDetector, LocatorConfig, OsType};

/// 应用定位器
#[derive(Debug, Clone)]
pub struct ApplicationLocator {
    executable_name: String,
    search_dirs: Vec<PathBuf>,
}

impl ApplicationLocator {
    /// 按配置创建定位器：配置目录优先，其次是平台默认目录
    pub fn new(config: &LocatorConfig) -> Self {
        let mut search_dirs = config.search_dirs.clone();
        search_dirs.extend(Self::default_install_dirs(
            EnvDetector::get_os_type(),
            &config.application,
        ));

        Self {
            executable_name: config.executable_name(),
            search_dirs,
        }
    }

    /// 只搜索给定目录
    pub fn with_search_dirs(executable_name: impl Into<String>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            executable_name: executable_name.into(),
            search_dirs,
        }
    }

    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// 平台默认安装目录，最后追加 PATH 中的目录
    pub fn default_install_dirs(os_type: OsType, application: &str) -> Vec<PathBuf> {
        let env_dir = |key: &str| std::env::var_os(key).map(PathBuf::from);
        let mut dirs = Vec::new();

        match os_type {
            OsType::Windows => {
                for key in ["ProgramFiles", "ProgramFiles(x86)", "LOCALAPPDATA"] {
                    if let Some(base) = env_dir(key) {
                        dirs.push(base.join(application));
                        dirs.push(base.join(application.to_uppercase()));
                    }
                }
            }
            OsType::MacOS => {
                dirs.push(
                    PathBuf::from("/Applications")
                        .join(format!("{}.app", application))
                        .join("Contents/MacOS"),
                );
            }
            OsType::Linux | OsType::Unknown => {
                if let Some(home) = env_dir("HOME") {
                    dirs.push(home.join(".local/bin"));
                }
                dirs.push(PathBuf::from("/opt").join(application));
                dirs.push(PathBuf::from("/usr/local/bin"));
                dirs.push(PathBuf::from("/usr/bin"));
            }
        }

        if let Some(path) = std::env::var_os("PATH") {
            dirs.extend(std::env::split_paths(&path));
        }

        dirs
    }

    /// 查找可执行文件，找不到时返回 None
    pub fn locate(&self) -> Option<PathBuf> {
        let found = self
            .search_dirs
            .iter()
            .map(|dir| dir.join(&self.executable_name))
            .find(|candidate| candidate.is_file())?;

        tracing::info!("找到应用: {:?}", found);
        Some(dunce::canonicalize(&found).unwrap_or(found))
    }
}
