// 应用定位 API 处理器

use axum::{extract::State, Json};
use serde_json::{Map, Value};

use crate::rest::locate_path_field;
use crate::server::state::AppState;

/// GET /api/locate-<应用标识>
/// 返回 {"<应用标识>Path": 路径或 null}
pub async fn locate_application(State(state): State<AppState>) -> Json<Value> {
    let application = &state.config.locator.application;
    let path = state
        .locator
        .locate()
        .map(|p| Value::String(p.to_string_lossy().to_string()))
        .unwrap_or(Value::Null);

    if path.is_null() {
        tracing::info!("未找到应用 {}", application);
    }

    let mut body = Map::new();
    body.insert(locate_path_field(application), path);
    Json(Value::Object(body))
}
