// poc-core/src/publish.rs
//! 发布模块 - 上传文档批次、下发索引配置、删除索引

use tracing::{info, warn};

use crate::engine::{SearchBackend, TaskInfo};
use crate::error::{Error, Result};
use crate::schema::{IndexDocument, IndexSettings, PRIMARY_KEY, SettingKind};

/// 上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// 批次为空，未发起任何请求
    Skipped,
    /// 已提交，引擎可能仍在后台处理
    Submitted { documents: usize, task: TaskInfo },
    /// 文档已提交，但某项索引配置下发失败，后续配置未下发
    SettingsFailed {
        documents: usize,
        task: TaskInfo,
        kind: SettingKind,
        reason: String,
    },
}

/// 上传文档并重新下发索引配置
///
/// 先批量 upsert，再依次更新可搜索、可过滤、可排序字段和排序规则。
/// 上传失败返回错误；上传成功后的配置失败返回 `SettingsFailed`，保留上传任务。不重试。
pub async fn publish(
    backend: &dyn SearchBackend,
    index: &str,
    documents: &[IndexDocument],
    settings: &IndexSettings,
) -> Result<PublishOutcome> {
    if documents.is_empty() {
        warn!("没有文档可上传");
        return Ok(PublishOutcome::Skipped);
    }

    info!("上传 {} 个文档到索引 '{}'", documents.len(), index);
    let task = backend.add_documents(index, documents, PRIMARY_KEY).await?;

    for (kind, values) in settings.updates() {
        if let Err(e) = backend.update_setting(index, kind, values).await {
            warn!("索引配置 {} 下发失败: {}", kind.route(), e);
            return Ok(PublishOutcome::SettingsFailed {
                documents: documents.len(),
                task,
                kind,
                reason: e.to_string(),
            });
        }
    }

    info!("上传任务已提交: {}", task.uid_display());
    Ok(PublishOutcome::Submitted {
        documents: documents.len(),
        task,
    })
}

/// 删除结果
#[derive(Debug)]
pub enum EraseOutcome {
    Deleted(TaskInfo),
    /// 索引不存在，仅作提示
    NotFound,
    Failed(Error),
}

pub async fn erase_index(backend: &dyn SearchBackend, index: &str) -> EraseOutcome {
    match backend.delete_index(index).await {
        Ok(task) => {
            info!("删除任务已提交: {}", task.uid_display());
            EraseOutcome::Deleted(task)
        }
        Err(Error::IndexNotFound(_)) => EraseOutcome::NotFound,
        Err(e) => EraseOutcome::Failed(e),
    }
}

/// 交互确认：接受 `yes` / `y`（不区分大小写）
pub fn is_confirmation(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y")
}
