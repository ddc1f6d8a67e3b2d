// 配置管理模块

pub mod env_detector;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use crate::explorer::FileFilter;
use crate::rest::DEFAULT_APPLICATION;

pub use env_detector::{EnvDetector, OsType};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

/// 默认监听端口（P -> 16, S -> 19）
pub const DEFAULT_SERVER_PORT: u16 = 1619;

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 文件浏览器（客户端）配置
    #[serde(default)]
    pub explorer: ExplorerConfig,
    /// 应用定位配置
    #[serde(default)]
    pub locator: LocatorConfig,
    /// 宿主文件系统配置
    #[serde(default)]
    pub filesystem: FilesystemConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 是否启用日志文件持久化
    #[serde(default = "default_log_enabled")]
    pub enabled: bool,
    /// 日志文件保存目录
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// 日志保留天数（按天滚动，超出的文件自动删除）
    #[serde(default = "default_log_retention_days")]
    pub retention_days: u32,
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_enabled() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_retention_days() -> u32 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: default_log_enabled(),
            log_dir: default_log_dir(),
            retention_days: default_log_retention_days(),
            level: default_log_level(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_server_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// CORS允许的源，包含 "*" 时允许任意源
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// 前端构建产物目录（为空时不提供静态文件）
    #[serde(default)]
    pub frontend_dir: Option<PathBuf>,
}

fn default_server_host() -> String {
    // Docker 环境使用 0.0.0.0 以便从宿主机访问
    if EnvDetector::is_docker() {
        "0.0.0.0".to_string()
    } else {
        "127.0.0.1".to_string()
    }
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

fn default_cors_origins() -> Vec<String> {
    // 前端开发服务器
    vec!["http://localhost:5173".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cors_origins: default_cors_origins(),
            frontend_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 文件浏览器后端类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplorerMode {
    /// 固定示例数据
    Static,
    /// 通过 REST 接口访问宿主机
    #[default]
    Remote,
}

/// 可在配置中选择的条目过滤规则
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityFilter {
    #[default]
    All,
    Files,
    Directories,
}

impl EntityFilter {
    /// All 不需要过滤器
    pub fn to_file_filter(&self) -> Option<FileFilter> {
        match self {
            EntityFilter::All => None,
            EntityFilter::Files => Some(FileFilter::files_only()),
            EntityFilter::Directories => Some(FileFilter::directories_only()),
        }
    }
}

/// 文件浏览器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub mode: ExplorerMode,
    /// 远程后端基础地址（包含 /api 前缀）
    #[serde(default = "default_explorer_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub filter: EntityFilter,
    /// 请求超时（秒），不设置表示不超时
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_explorer_base_url() -> String {
    format!("http://127.0.0.1:{}/api", DEFAULT_SERVER_PORT)
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            mode: ExplorerMode::default(),
            base_url: default_explorer_base_url(),
            filter: EntityFilter::default(),
            timeout_secs: None,
        }
    }
}

/// 应用定位配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// 目标应用标识，决定接口路径 /locate-<标识> 和字段名 <标识>Path
    #[serde(default = "default_application")]
    pub application: String,
    /// 可执行文件名，不设置时按平台推断
    #[serde(default)]
    pub executable_name: Option<String>,
    /// 优先搜索的安装目录
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,
}

fn default_application() -> String {
    DEFAULT_APPLICATION.to_string()
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            application: default_application(),
            executable_name: None,
            search_dirs: vec![],
        }
    }
}

impl LocatorConfig {
    pub fn executable_name(&self) -> String {
        self.executable_name
            .clone()
            .unwrap_or_else(|| EnvDetector::get_os_type().executable_name(&self.application))
    }
}

/// 宿主文件系统配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilesystemConfig {
    /// 是否显示隐藏文件
    #[serde(default)]
    pub show_hidden: bool,
    /// 额外的根目录（存在时追加到根目录列表）
    #[serde(default)]
    pub extra_roots: Vec<String>,
}

impl AppConfig {
    /// 校验配置
    ///
    /// 只校验服务端自身使用的配置项；`[explorer]` 的基础地址由
    /// `AnyController::from_config` 在构造时校验
    pub fn validate(&self) -> Result<()> {
        let application = self.locator.application.as_str();
        if application.is_empty() {
            anyhow::bail!("应用标识不能为空");
        }
        if !application
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            anyhow::bail!("应用标识只能包含字母、数字、- 和 _: {}", application);
        }

        Ok(())
    }

    /// 从文件加载配置
    pub async fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .context("读取配置文件失败")?;

        let config: AppConfig = toml::from_str(&content).context("解析配置文件失败")?;
        config.validate().context("配置文件校验失败")?;

        Ok(config)
    }

    /// 保存配置到文件
    pub async fn save_to_file(&self, path: &str) -> Result<()> {
        self.validate().context("保存配置失败")?;

        let content = toml::to_string_pretty(self).context("序列化配置失败")?;

        if let Some(parent) = std::path::Path::new(path).parent() {
            fs::create_dir_all(parent)
                .await
                .context("创建配置目录失败")?;
        }

        fs::write(path, content)
            .await
            .context("写入配置文件失败")?;

        tracing::info!("配置已保存: {}", path);
        Ok(())
    }

    /// 加载配置，失败时使用默认配置并尝试写回文件
    pub async fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path).await {
            Ok(config) => {
                tracing::info!("配置文件加载成功: {}", path);
                config
            }
            Err(e) => {
                tracing::warn!("配置文件加载失败，使用默认配置: {:#}", e);
                let default_config = Self::default();

                if !std::path::Path::new(path).exists() {
                    if let Err(e) = default_config.save_to_file(path).await {
                        tracing::error!("保存默认配置失败: {:#}", e);
                    }
                }

                default_config
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 1619);
        assert_eq!(config.explorer.mode, ExplorerMode::Remote);
        assert_eq!(config.explorer.base_url, "http://127.0.0.1:1619/api");
        assert_eq!(config.locator.application, "rpcs3");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_log_config() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.retention_days, 7);
        assert_eq!(config.level, "info");
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        let mut config = AppConfig::default();
        config.server.port = 4000;
        config.explorer.filter = EntityFilter::Files;
        config.locator.search_dirs = vec![PathBuf::from("/opt/rpcs3")];
        config.save_to_file(path).await.unwrap();

        let loaded = AppConfig::load_from_file(path).await.unwrap();
        assert_eq!(loaded.server.port, 4000);
        assert_eq!(loaded.explorer.filter, EntityFilter::Files);
        assert_eq!(loaded.locator.search_dirs, vec![PathBuf::from("/opt/rpcs3")]);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [explorer]
            mode = "static"

            [locator]
            application = "pcsx2"
            "#,
        )
        .unwrap();

        assert_eq!(config.explorer.mode, ExplorerMode::Static);
        assert_eq!(config.explorer.base_url, "http://127.0.0.1:1619/api");
        assert_eq!(config.locator.application, "pcsx2");
        assert_eq!(config.server.port, 1619);
        assert!(config.log.enabled);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.locator.application = "rpcs3/../x".to_string();
        assert!(config.validate().is_err());

        config.locator.application = String::new();
        assert!(config.validate().is_err());

        config.locator.application = "pcsx2_nightly-1".to_string();
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_errors_carry_context() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = AppConfig::load_from_file(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).starts_with("读取配置文件失败"));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[server\nport = ").unwrap();
        let err = AppConfig::load_from_file(broken.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).starts_with("解析配置文件失败"));
    }

    #[tokio::test]
    async fn test_invalid_explorer_url_keeps_server_settings() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        std::fs::write(
            path,
            r#"
            [server]
            port = 4242

            [explorer]
            base_url = "127.0.0.1:1619/api"

            [locator]
            search_dirs = ["/opt/rpcs3"]
            "#,
        )
        .unwrap();

        assert!(AppConfig::load_from_file(path).await.is_ok());

        let config = AppConfig::load_or_default(path).await;
        assert_eq!(config.server.port, 4242);
        assert_eq!(config.locator.search_dirs, vec![PathBuf::from("/opt/rpcs3")]);

        // 地址错误在构造控制器时才报告
        assert!(crate::explorer::AnyController::from_config(&config.explorer).is_err());
    }

    #[test]
    fn test_entity_filter_mapping() {
        assert!(EntityFilter::All.to_file_filter().is_none());
        assert!(EntityFilter::Files.to_file_filter().is_some());
        assert!(EntityFilter::Directories.to_file_filter().is_some());
    }

    #[tokio::test]
    async fn test_load_or_default_writes_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("app.toml");
        let path = path.to_str().unwrap();

        let config = AppConfig::load_or_default(path).await;
        assert_eq!(config.server.port, 1619);
        assert!(std::path::Path::new(path).exists());
    }

    #[test]
    fn test_locator_executable_name() {
        let mut locator = LocatorConfig::default();
        assert_eq!(
            locator.executable_name(),
            EnvDetector::get_os_type().executable_name("rpcs3")
        );

        locator.executable_name = Some("rpcs3.AppImage".to_string());
        assert_eq!(locator.executable_name(), "rpcs3.AppImage");
    }
}
