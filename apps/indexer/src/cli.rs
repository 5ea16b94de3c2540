use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index every PoC template under a folder and upload the batch
    Index {
        /// 模板目录（可选，不提供则使用配置文件中的 poc-folder）
        #[arg(short, long)]
        folder: Option<PathBuf>,
        /// 索引名称（可选，覆盖配置）
        #[arg(short, long)]
        index: Option<String>,
        /// Build the batch and print statistics without uploading
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete the whole index after an interactive confirmation
    DeleteIndex {
        /// 索引名称（可选，覆盖配置）
        #[arg(short, long)]
        index: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// `-v` 次数对应的日志级别
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_flags() {
        let cli = Cli::try_parse_from(["poc-indexer", "-vv", "index", "--folder", "/tmp/pocs", "--dry-run"]).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
        match cli.command {
            Some(Commands::Index { folder, index, dry_run }) => {
                assert_eq!(folder, Some(PathBuf::from("/tmp/pocs")));
                assert_eq!(index, None);
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_index() {
        let cli = Cli::try_parse_from(["poc-indexer", "delete-index", "--index", "old", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::DeleteIndex { index: Some(ref i), yes: true }) if i == "old"
        ));
        assert_eq!(cli.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["poc-indexer"]).unwrap();
        assert!(cli.command.is_none());
    }
}
