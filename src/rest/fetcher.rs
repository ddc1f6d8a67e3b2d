// JSON 请求器
//
// 对 基础地址 + 相对端点 发起 GET 请求并解析 JSON 响应体。
// 不做重试，不做错误转换：网络错误、状态码错误、解析错误原样返回给调用方。

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// 请求错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 基础地址无效
    #[error("无效的基础地址 {base_url}: {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// 网络层失败（连接拒绝、DNS 失败、超时等）
    #[error("请求失败 {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务器返回非成功状态码
    #[error("服务器返回错误状态 {status}: {url}")]
    Status { url: String, status: StatusCode },

    /// 响应体不是期望结构的 JSON
    #[error("响应解析失败 {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// 非成功状态码时返回该状态码
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Parse { .. })
    }
}

/// 规范化基础地址
///
/// 只接受 http/https，不允许携带查询串或片段，去掉结尾的 `/`，
/// 保证与端点拼接时只出现一个分隔符。
pub fn normalize_base_url(base_url: &str) -> Result<String, FetchError> {
    let trimmed = base_url.trim();
    let invalid = |reason: &str| FetchError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("只支持 http/https"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("不能包含查询串或片段"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// JSON 请求器
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
    base_url: String,
}

impl JsonFetcher {
    /// 创建请求器
    ///
    /// `timeout` 为 None 时不设置超时
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FetchError::Transport {
            url: base_url.clone(),
            source: e,
        })?;

        Ok(Self { client, base_url })
    }

    /// 复用已有的 HTTP 客户端
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接完整请求地址
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// GET 请求并解析 JSON
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let url = self.endpoint_url(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("请求返回错误状态: {} -> {}", url, status);
            return Err(FetchError::Status { url, status });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            source: e,
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("响应解析失败: {}, 错误: {}", url, e);
            FetchError::Parse { url, source: e }
        })
    }
}
