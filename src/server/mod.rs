// Web服务器模块
//
// setup server：在宿主机上实现文件浏览和应用定位的 REST 接口

pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::rest::locate_endpoint;

/// API 路由前缀
pub const API_PREFIX: &str = "/api";

/// 健康检查响应
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    time: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        time: chrono::Local::now().to_rfc3339(),
    })
}

/// 按配置构造 CORS 层，包含 "*" 时允许任意源
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("忽略无效的 CORS 源: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// 构建完整应用路由
pub fn build_router(state: AppState) -> Router {
    let server_config = state.config.server.clone();
    let locate_route = locate_endpoint(&state.config.locator.application);

    let api_routes = Router::new()
        .route("/roots", get(handlers::get_roots))
        .route("/list", get(handlers::list_directory))
        .route(&locate_route, get(handlers::locate_application))
        .with_state(state);

    let mut app = Router::new()
        .nest(API_PREFIX, api_routes)
        .route("/health", get(health_check));

    // 静态文件服务（前端资源）
    if let Some(frontend_dir) = &server_config.frontend_dir {
        let index_html = frontend_dir.join("index.html");
        if !index_html.exists() {
            tracing::warn!("前端目录中没有 index.html: {:?}", frontend_dir);
        }
        app = app.fallback_service(
            ServeDir::new(frontend_dir).not_found_service(ServeFile::new(index_html)),
        );
    }

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server_config.cors_origins));

    app.layer(middleware)
}
