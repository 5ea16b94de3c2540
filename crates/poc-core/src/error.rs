// poc-core/src/error.rs
//! 错误类型

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 模板无法解码或解析（单个文件级别，可恢复）
    #[error("解析错误: {0}")]
    Parse(String),

    #[error("文件夹不存在: {0}")]
    FolderNotFound(PathBuf),

    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("无效的引擎地址: {0}")]
    InvalidUrl(String),

    /// 搜索引擎返回的非成功响应
    #[error("搜索引擎错误 ({status}) [{code}]: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("索引不存在: {0}")]
    IndexNotFound(String),
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
