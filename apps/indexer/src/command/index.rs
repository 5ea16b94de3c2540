// apps/indexer/src/command/index.rs
//! 索引命令 - 扫描模板目录并上传到搜索引擎

use super::{Command, RULE};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use poc_core::{
    Error, FileOutcome, FileProgress, IndexSettings, MeiliClient, PublishOutcome, RunReport,
    SearchBackend, discover_templates, index_files_with_progress, publish,
};
use std::path::PathBuf;

pub struct IndexCommand {
    config: Config,
    folder: PathBuf,
    index_name: String,
    dry_run: bool,
}

impl IndexCommand {
    pub fn new(cfg: Config, folder: Option<PathBuf>, index: Option<String>, dry_run: bool) -> Self {
        let folder = folder.unwrap_or_else(|| cfg.poc_folder.clone());
        let index_name = index.unwrap_or_else(|| cfg.index_name.clone());
        Self {
            config: cfg,
            folder,
            index_name,
            dry_run,
        }
    }

    /// 扫描目录，目录不存在时打印错误并返回空报告
    fn scan(&self) -> Result<RunReport> {
        let files = match discover_templates(&self.folder) {
            Ok(files) => files,
            Err(Error::FolderNotFound(path)) => {
                println!("❌ 错误: 文件夹不存在 - {}", path.display());
                return Ok(RunReport::default());
            }
            Err(e) => return Err(e).wrap_err("扫描模板目录失败"),
        };

        println!("📁 找到 {} 个YAML文件\n", files.len());
        Ok(index_files_with_progress(&files, |p| {
            if let Some(line) = progress_line(&p) {
                println!("{}", line);
            }
        }))
    }

    pub async fn run(&self, backend: &dyn SearchBackend) -> Result<Option<PublishOutcome>> {
        println!("{}", RULE);
        println!("📚 Nuclei POC 索引工具");
        println!("{}", RULE);
        println!("索引名称: {}", self.index_name);
        println!("POC文件夹: {}\n", self.folder.display());

        let report = self.scan()?;

        if !report.duplicates.is_empty() {
            println!("\n⚠️  跳过 {} 个重复POC", report.duplicates.len());
        }
        if !report.failures.is_empty() {
            println!("⚠️  {} 个文件解析失败", report.failures.len());
        }

        if report.is_empty() {
            println!("\n⚠️  没有找到有效的POC文件");
            return Ok(None);
        }

        println!(
            "\n📊 统计: {} 个POC, {} 个URL",
            report.documents.len(),
            report.total_urls
        );

        if self.dry_run {
            println!("\n🔍 试运行模式，跳过上传");
            return Ok(None);
        }

        println!(
            "\n📤 上传 {} 个文档到索引 '{}'...",
            report.documents.len(),
            self.index_name
        );
        let outcome = match publish(
            backend,
            &self.index_name,
            &report.documents,
            &IndexSettings::poc_default(),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("❌ 上传失败: {}", e);
                return Ok(None);
            }
        };

        match &outcome {
            PublishOutcome::Submitted { task, .. } => {
                println!("✅ 上传完成！任务ID: {}", task.uid_display());
                println!("状态: {}", task.status_display());
            }
            PublishOutcome::SettingsFailed {
                task, kind, reason, ..
            } => {
                println!("✅ 上传完成！任务ID: {}", task.uid_display());
                println!("状态: {}", task.status_display());
                println!("❌ 索引配置失败 ({}): {}", kind.route(), reason);
            }
            PublishOutcome::Skipped => println!("\n⚠️  没有文档可上传"),
        }

        println!("\n{}", RULE);
        println!("🎉 索引完成！");
        println!("{}", RULE);

        Ok(Some(outcome))
    }
}

/// 单个文件的进度行，空文件不输出
pub fn progress_line(p: &FileProgress<'_>) -> Option<String> {
    let prefix = format!("[{}/{}]", p.index, p.total);
    let line = match p.outcome {
        FileOutcome::Indexed { urls } => format!("{} ✅ {} - {} URLs", prefix, p.file_name, urls),
        FileOutcome::Duplicate { .. } => format!("{} ⏭️  {} - 跳过（重复）", prefix, p.file_name),
        FileOutcome::Empty => return None,
        FileOutcome::Failed { reason } => {
            format!("{} ❌ 错误: {} - {}", prefix, p.file_name, reason)
        }
    };
    Some(line)
}

#[async_trait::async_trait]
impl Command for IndexCommand {
    async fn execute(&self) -> Result<()> {
        let engine = self.config.engine(Some(&self.index_name));
        let client = MeiliClient::new(&engine).wrap_err("创建搜索引擎客户端失败")?;
        self.run(&client).await?;
        Ok(())
    }
}
