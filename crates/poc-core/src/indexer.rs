// poc-core/src/indexer.rs
//! 索引模块 - 扫描模板目录，构建文档批次并去重

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{Error, Result};
use crate::extract::extract_facets;
use crate::scanner::{discover_templates, file_name, file_stem, read_template};
use crate::schema::{IndexDocument, document_id};
use crate::template::parse_template;

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// 已生成文档，附带提取的 URL 数量
    Indexed { urls: usize },
    /// 文档 id 在本次运行中已出现
    Duplicate { id: String },
    /// 空文档，静默跳过
    Empty,
    /// 读取或解析失败
    Failed { reason: String },
}

/// 进度回调参数
#[derive(Debug, Clone)]
pub struct FileProgress<'a> {
    /// 从 1 开始
    pub index: usize,
    pub total: usize,
    pub file_name: &'a str,
    pub outcome: &'a FileOutcome,
}

/// 单次运行的状态，随运行创建、随运行结束丢弃
#[derive(Debug, Default)]
pub struct RunState {
    seen_ids: HashSet<String>,
    duplicates: Vec<String>,
    failures: Vec<(String, String)>,
    empty: usize,
    documents: Vec<IndexDocument>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 处理一个模板文件
    pub fn process_file(&mut self, path: &Path) -> FileOutcome {
        let name = file_name(path);
        let outcome = match read_template(path).and_then(|text| self.process_text(text, path)) {
            Ok(outcome) => outcome,
            Err(e) => e.into(),
        };

        match &outcome {
            FileOutcome::Duplicate { .. } => self.duplicates.push(name),
            FileOutcome::Failed { reason } => {
                tracing::debug!("处理文件失败 {:?}: {}", path, reason);
                self.failures.push((name, reason.clone()));
            }
            FileOutcome::Empty => self.empty += 1,
            FileOutcome::Indexed { .. } => {}
        }

        outcome
    }

    fn process_text(&mut self, text: String, path: &Path) -> Result<FileOutcome> {
        let Some(record) = parse_template(&text)? else {
            return Ok(FileOutcome::Empty);
        };

        // 去重以最终文档 id 为准，回退 id 与显式 id 共用一个集合
        let stem = file_stem(path);
        let id = document_id(&record.poc_id(), &stem);
        if self.seen_ids.contains(&id) {
            return Ok(FileOutcome::Duplicate { id });
        }

        let facets = extract_facets(&record);
        let doc = IndexDocument::build(&record, facets, text, &stem, Utc::now());
        self.seen_ids.insert(id);

        let urls = doc.urls.len();
        self.documents.push(doc);
        Ok(FileOutcome::Indexed { urls })
    }

    pub fn documents(&self) -> &[IndexDocument] {
        &self.documents
    }

    pub fn into_report(self) -> RunReport {
        let total_urls = self.documents.iter().map(|d| d.urls.len()).sum();
        RunReport {
            documents: self.documents,
            duplicates: self.duplicates,
            failures: self.failures,
            empty: self.empty,
            total_urls,
        }
    }
}

/// 运行报告
#[derive(Debug, Default)]
pub struct RunReport {
    pub documents: Vec<IndexDocument>,
    /// 重复模板的文件名，按处理顺序
    pub duplicates: Vec<String>,
    /// (文件名, 原因)
    pub failures: Vec<(String, String)>,
    pub empty: usize,
    pub total_urls: usize,
}

/// 扫描目录并构建文档批次
pub fn index_folder(root: &Path) -> Result<RunReport> {
    index_folder_with_progress(root, |_| {})
}

/// 扫描目录并构建文档批次（带进度回调）
///
/// 单个文件的失败不会中断运行；目录不存在时返回 `Error::FolderNotFound`。
pub fn index_folder_with_progress<F>(root: &Path, progress_callback: F) -> Result<RunReport>
where
    F: FnMut(FileProgress<'_>),
{
    let files = discover_templates(root)?;
    tracing::info!("找到 {} 个模板文件", files.len());
    Ok(index_files_with_progress(&files, progress_callback))
}

/// 按给定顺序处理已发现的模板文件
pub fn index_files_with_progress<F>(files: &[PathBuf], mut progress_callback: F) -> RunReport
where
    F: FnMut(FileProgress<'_>),
{
    let total = files.len();
    let mut state = RunState::new();

    for (i, path) in files.iter().enumerate() {
        let outcome = state.process_file(path);
        let name = file_name(path);
        progress_callback(FileProgress {
            index: i + 1,
            total,
            file_name: &name,
            outcome: &outcome,
        });
    }

    let report = state.into_report();
    tracing::info!(
        "扫描完成: {} 个文档, {} 个重复, {} 个失败",
        report.documents.len(),
        report.duplicates.len(),
        report.failures.len()
    );
    report
}

impl RunReport {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl From<Error> for FileOutcome {
    fn from(e: Error) -> Self {
        FileOutcome::Failed {
            reason: e.to_string(),
        }
    }
}
