// poc-core/src/schema/fields.rs
//! 字段名常量定义
//!
//! 统一管理所有索引字段名，避免魔法字符串

/// 文档主键
pub const FIELD_ID: &str = "id";

/// 模板原始 id（可能为空）
pub const FIELD_POC_ID: &str = "poc_id";

pub const FIELD_NAME: &str = "name";

pub const FIELD_AUTHOR: &str = "author";

pub const FIELD_SEVERITY: &str = "severity";

pub const FIELD_DESCRIPTION: &str = "description";

pub const FIELD_TAGS: &str = "tags";

/// 提取出的 URL 路径集合
pub const FIELD_URLS: &str = "urls";

/// 由 URL 派生的关键词集合
pub const FIELD_URL_KEYWORDS: &str = "url_keywords";

/// 模板原文
pub const FIELD_YAML_CONTENT: &str = "yaml_content";

pub const FIELD_METADATA: &str = "metadata";

/// 索引时间（ISO-8601）
pub const FIELD_INDEXED_AT: &str = "indexed_at";

/// 主键字段
pub const PRIMARY_KEY: &str = FIELD_ID;

/// 无 id 模板的文档 id 前缀
pub const UNNAMED_PREFIX: &str = "unnamed_";
