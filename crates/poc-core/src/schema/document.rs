// poc-core/src/schema/document.rs
//! 文档结构定义
//!
//! 定义写入搜索引擎的文档结构，一个非重复模板对应一个文档

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::fields::UNNAMED_PREFIX;
use crate::extract::Facets;
use crate::template::TemplateRecord;

/// 索引文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// 主键：模板 id，缺失时为 `unnamed_<文件名>`
    pub id: String,

    /// 模板原始 id（可能为空）
    pub poc_id: String,

    pub name: String,
    pub author: String,
    pub severity: String,
    pub description: String,
    pub tags: String,

    /// 提取的 URL 路径
    pub urls: BTreeSet<String>,

    /// URL 派生关键词
    pub url_keywords: BTreeSet<String>,

    /// 模板原文
    pub yaml_content: String,

    /// 透传的 `info.metadata`
    pub metadata: serde_json::Value,

    /// 处理时间（RFC 3339，UTC）
    pub indexed_at: String,
}

impl IndexDocument {
    /// 由模板和提取结果构建文档
    pub fn build(
        record: &TemplateRecord,
        facets: Facets,
        yaml_content: String,
        file_stem: &str,
        indexed_at: DateTime<Utc>,
    ) -> Self {
        let poc_id = record.poc_id();
        let info = record.info();

        let metadata = match &info.metadata {
            None | Some(serde_yaml_ng::Value::Null) => empty_object(),
            Some(value) => serde_json::to_value(value).unwrap_or_else(|e| {
                tracing::warn!("metadata 无法转换为 JSON ({}): {}", file_stem, e);
                empty_object()
            }),
        };

        Self {
            id: document_id(&poc_id, file_stem),
            name: info.name.joined(),
            author: info.author.joined(),
            severity: info.severity.joined(),
            description: info.description.joined(),
            tags: info.tags.joined(),
            urls: facets.urls,
            url_keywords: facets.url_keywords,
            yaml_content,
            metadata,
            indexed_at: indexed_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            poc_id,
        }
    }
}

/// 文档 id：优先使用模板 id，否则 `unnamed_` + 文件名（不含扩展名）
pub fn document_id(poc_id: &str, file_stem: &str) -> String {
    if poc_id.is_empty() {
        format!("{}{}", UNNAMED_PREFIX, file_stem)
    } else {
        poc_id.to_string()
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
