// poc-core/src/scanner.rs
//! 模板扫描 - 遍历目录并读取模板文件

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// 可识别的模板扩展名
pub const TEMPLATE_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// 递归列出目录下所有模板文件
///
/// 同一目录内按文件名排序，保证多次运行的处理顺序一致。
pub fn discover_templates(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::FolderNotFound(root.to_path_buf()));
    }

    tracing::debug!("开始遍历目录: {:?}", root);

    let mut files = Vec::new();
    for result in WalkDir::new(root).sort_by_file_name() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_file() && is_template_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                tracing::warn!("遍历错误: {}", e);
            }
        }
    }

    Ok(files)
}

pub fn is_template_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(&ext))
        })
}

/// 以 UTF-8 读取模板原文
pub fn read_template(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| Error::Parse(format!("不是有效的 UTF-8 文本: {}", e)))
}

/// 文件名（含扩展名）
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// 文件名（不含扩展名）
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
