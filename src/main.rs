use anyhow::Context;
use setup_explorer::{
    config::{AppConfig, LogConfig, DEFAULT_CONFIG_PATH},
    logging,
    server::{build_router, AppState, API_PREFIX},
};
use tracing::info;

/// 加载日志配置
///
/// 日志系统要在完整配置之前初始化，失败时返回默认配置
async fn load_log_config(config_path: &str) -> LogConfig {
    if let Ok(content) = tokio::fs::read_to_string(config_path).await {
        if let Ok(config) = toml::from_str::<toml::Value>(&content) {
            if let Some(log_table) = config.get("log") {
                if let Ok(log_config) = log_table.clone().try_into::<LogConfig>() {
                    return log_config;
                }
            }
        }
    }

    LogConfig::default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 必须保持 _log_guard 存活
    let _log_guard = logging::init_logging(&load_log_config(DEFAULT_CONFIG_PATH).await);

    info!("setup-explorer v{} 启动中...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(DEFAULT_CONFIG_PATH).await;
    let addr = config.server.bind_addr();
    info!(
        "定位应用: {}, 可执行文件: {}",
        config.locator.application,
        config.locator.executable_name()
    );

    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听地址 {}", addr))?;

    info!("服务器启动在: http://{}", addr);
    info!("API 基础路径: http://{}{}", addr, API_PREFIX);

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("服务器错误: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("收到 Ctrl+C，正在退出...");
        }
    }

    Ok(())
}
