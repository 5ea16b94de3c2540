// poc-core/src/schema/mod.rs
//! Schema 模块 - 索引文档结构与索引配置
//!
//! 统一管理索引字段定义，避免魔法字符串分散在代码各处

pub mod fields;
pub mod document;
pub mod settings;

pub use fields::*;
pub use document::{IndexDocument, document_id};
pub use settings::{IndexSettings, SettingKind};
