// 宿主文件系统 API 处理器

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::explorer::{FileSystemEntity, FileSystemRoot};
use crate::filesystem::{FsError, FsErrorCode};
use crate::server::state::AppState;

/// 错误响应
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl IntoResponse for FsError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            FsErrorCode::DirectoryNotFound => StatusCode::NOT_FOUND,
            FsErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
            FsErrorCode::DirectoryReadFailed => StatusCode::INTERNAL_SERVER_ERROR,
            FsErrorCode::InvalidPathFormat => StatusCode::BAD_REQUEST,
            FsErrorCode::NotADirectory => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse {
            code: self.code.code(),
            message: self.message,
            path: self.path,
        });

        (status, body).into_response()
    }
}

/// 列目录请求参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub directory: String,
}

/// GET /api/roots
/// 获取根目录列表
pub async fn get_roots(State(state): State<AppState>) -> Json<Vec<FileSystemRoot>> {
    Json(state.filesystem.list_roots())
}

/// GET /api/list?directory=C:
/// 列出目录内容
pub async fn list_directory(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<FileSystemEntity>>, FsError> {
    let entities = state.filesystem.list_directory(&query.directory)?;
    Ok(Json(entities))
}
