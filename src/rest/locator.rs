// 宿主机应用定位客户端
//
// 查询远端主机上已安装应用（默认 RPCS3）的可执行文件路径。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info};

use super::fetcher::{FetchError, JsonFetcher};

/// 默认定位的应用标识
pub const DEFAULT_APPLICATION: &str = "rpcs3";

/// 定位接口的相对路径，如 `/locate-rpcs3`
pub fn locate_endpoint(application: &str) -> String {
    format!("/locate-{}", urlencoding::encode(application))
}

/// 响应体中携带路径的字段名，如 `rpcs3Path`
pub fn locate_path_field(application: &str) -> String {
    format!("{}Path", application)
}

/// 定位结果
///
/// `path` 为 None 表示主机上没有找到该应用，这是正常结果而不是错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateApplicationResponse {
    pub path: Option<String>,
}

impl LocateApplicationResponse {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// 应用定位客户端
#[derive(Debug, Clone)]
pub struct HostLocatorClient {
    fetcher: JsonFetcher,
    application: String,
}

impl HostLocatorClient {
    /// 创建客户端
    pub fn new(
        base_url: &str,
        application: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        Ok(Self::from_fetcher(
            JsonFetcher::new(base_url, timeout)?,
            application,
        ))
    }

    /// 复用已有的请求器
    pub fn from_fetcher(fetcher: JsonFetcher, application: impl Into<String>) -> Self {
        Self {
            fetcher,
            application: application.into(),
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    /// 查询应用路径
    pub async fn locate_application(&self) -> Result<LocateApplicationResponse, FetchError> {
        let endpoint = locate_endpoint(&self.application);
        let field = locate_path_field(&self.application);

        let mut body: Map<String, Value> = self.fetcher.get_json(&endpoint).await?;

        let raw = body.remove(&field).ok_or_else(|| FetchError::Parse {
            url: self.fetcher.endpoint_url(&endpoint),
            source: <serde_json::Error as serde::de::Error>::custom(format!(
                "missing field `{}`",
                field
            )),
        })?;

        let path: Option<String> =
            serde_json::from_value(raw).map_err(|e| FetchError::Parse {
                url: self.fetcher.endpoint_url(&endpoint),
                source: e,
            })?;

        match &path {
            Some(p) => info!("已定位应用 {}: {}", self.application, p),
            None => debug!("主机上未找到应用 {}", self.application),
        }

        Ok(LocateApplicationResponse { path })
    }
}
