// apps/indexer/src/command/delete.rs
//! 删除索引命令

use super::{Command, RULE};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use poc_core::{EraseOutcome, MeiliClient, SearchBackend, erase_index, is_confirmation};
use std::io::{BufRead, BufReader, Stdin, Write};

pub struct DeleteIndexCommand {
    config: Config,
    index_name: String,
    assume_yes: bool,
}

impl DeleteIndexCommand {
    pub fn new(cfg: Config, index: Option<String>, assume_yes: bool) -> Self {
        let index_name = index.unwrap_or_else(|| cfg.index_name.clone());
        Self {
            config: cfg,
            index_name,
            assume_yes,
        }
    }

    /// 询问确认，只有 `yes` / `y` 才继续
    fn confirm<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        write!(output, "⚠️  确定要删除索引 '{}' 吗？(yes/no): ", self.index_name)?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(is_confirmation(&answer))
    }

    pub async fn run<R: BufRead, W: Write>(
        &self,
        backend: &dyn SearchBackend,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<EraseOutcome>> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "🗑️  删除Meilisearch索引")?;
        writeln!(output, "{}", RULE)?;
        writeln!(output, "索引名称: {}", self.index_name)?;
        writeln!(output, "Meilisearch: {}\n", self.config.meilisearch_url)?;

        if !self.confirm(input, output)? {
            writeln!(output, "\n❌ 已取消删除操作")?;
            return Ok(None);
        }

        let outcome = erase_index(backend, &self.index_name).await;
        match &outcome {
            EraseOutcome::Deleted(task) => {
                writeln!(output, "\n✅ 索引删除任务已提交")?;
                writeln!(output, "任务ID: {}", task.uid_display())?;
                writeln!(output, "状态: {}", task.status_display())?;
                writeln!(output, "\n索引将在后台删除完成")?;
            }
            EraseOutcome::NotFound => {
                writeln!(output, "\n⚠️  索引 '{}' 不存在", self.index_name)?;
            }
            EraseOutcome::Failed(e) => {
                tracing::error!("删除索引失败: {}", e);
                writeln!(output, "\n❌ 删除失败: {}", e)?;
            }
        }

        Ok(Some(outcome))
    }
}

/// `StdinLock` 不是 `Send`，不能跨 await 持有
fn stdin_reader() -> BufReader<Stdin> {
    BufReader::new(std::io::stdin())
}

#[async_trait::async_trait]
impl Command for DeleteIndexCommand {
    async fn execute(&self) -> Result<()> {
        let engine = self.config.engine(Some(&self.index_name));
        let client = MeiliClient::new(&engine).wrap_err("创建搜索引擎客户端失败")?;

        let mut input = stdin_reader();
        let mut output = std::io::stdout();
        self.run(&client, &mut input, &mut output).await?;
        Ok(())
    }
}
