// poc-core/src/engine.rs
//! 搜索引擎接口 - 远程文档存储的最小操作集合与 Meilisearch 实现

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::schema::{IndexDocument, SettingKind};

/// 引擎返回的异步任务信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    #[serde(default)]
    pub task_uid: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TaskInfo {
    pub fn uid_display(&self) -> String {
        self.task_uid
            .map(|uid| uid.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn status_display(&self) -> &str {
        self.status.as_deref().unwrap_or("N/A")
    }
}

/// 搜索引擎边界
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// 批量写入（按主键 upsert）
    async fn add_documents(
        &self,
        index: &str,
        documents: &[IndexDocument],
        primary_key: &str,
    ) -> Result<TaskInfo>;

    /// 更新单项索引配置
    async fn update_setting(&self, index: &str, kind: SettingKind, values: &[String]) -> Result<TaskInfo>;

    async fn delete_index(&self, index: &str) -> Result<TaskInfo>;
}

/// Meilisearch HTTP 客户端
pub struct MeiliClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

/// 引擎错误响应体
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: String,
}

pub const INDEX_NOT_FOUND_CODE: &str = "index_not_found";

impl MeiliClient {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Self::with_client(client, config)
    }

    /// 使用外部构建的 `reqwest::Client`
    pub fn with_client(client: reqwest::Client, config: &EngineConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(config.url.clone()));
        }

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key().map(str::to_string),
        })
    }

    /// 在基础地址后追加路径段，每段单独做百分号编码
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        index: &str,
    ) -> Result<TaskInfo> {
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!("搜索引擎返回错误: {} - {}", status, text);
            return Err(classify_error(status, &text, index));
        }

        Ok(parse_task(&text))
    }
}

#[async_trait]
impl SearchBackend for MeiliClient {
    async fn add_documents(
        &self,
        index: &str,
        documents: &[IndexDocument],
        primary_key: &str,
    ) -> Result<TaskInfo> {
        let mut url = self.endpoint(&["indexes", index, "documents"]);
        url.query_pairs_mut().append_pair("primaryKey", primary_key);
        self.send(Method::POST, url, Some(documents), index).await
    }

    async fn update_setting(&self, index: &str, kind: SettingKind, values: &[String]) -> Result<TaskInfo> {
        let url = self.endpoint(&["indexes", index, "settings", kind.route()]);
        self.send(Method::PUT, url, Some(values), index).await
    }

    async fn delete_index(&self, index: &str) -> Result<TaskInfo> {
        let url = self.endpoint(&["indexes", index]);
        self.send::<()>(Method::DELETE, url, None, index).await
    }
}

/// 成功响应中的任务信息，无法解析时字段留空
fn parse_task(body: &str) -> TaskInfo {
    serde_json::from_str(body).unwrap_or_default()
}

/// 将错误响应映射为 `Error`
fn classify_error(status: StatusCode, body: &str, index: &str) -> Error {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

    if parsed.code == INDEX_NOT_FOUND_CODE {
        return Error::IndexNotFound(index.to_string());
    }

    Error::Api {
        status: status.as_u16(),
        code: parsed.code,
        message: if parsed.message.is_empty() {
            body.to_string()
        } else {
            parsed.message
        },
    }
}
