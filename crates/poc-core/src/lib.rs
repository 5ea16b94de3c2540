// poc-core/src/lib.rs
//! PoC 模板索引核心库
//!
//! 将漏洞检测模板目录转换为搜索引擎文档：
//! - 模板解析与字段规范化
//! - URL 路径与关键词提取
//! - 按模板 id 去重
//! - 批量上传与索引配置下发

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod indexer;
pub mod publish;
pub mod scanner;
pub mod schema;
pub mod template;

// 重导出核心类型
pub use config::EngineConfig;
pub use engine::{MeiliClient, SearchBackend, TaskInfo};
pub use error::{Error, Result};
pub use extract::{Facets, extract_facets};
pub use indexer::{
    FileOutcome, FileProgress, RunReport, RunState, index_files_with_progress, index_folder,
    index_folder_with_progress,
};
pub use scanner::discover_templates;
pub use publish::{EraseOutcome, PublishOutcome, erase_index, is_confirmation, publish};
pub use schema::{IndexDocument, IndexSettings, SettingKind, document_id};
pub use template::{TemplateRecord, parse_template};
