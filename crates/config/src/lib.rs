pub mod constants;

pub use etcetera::AppStrategy;
use etcetera::{AppStrategyArgs, choose_app_strategy};

use std::path::PathBuf;
use std::env;


pub fn create_strategy() -> std::result::Result<impl AppStrategy, etcetera::HomeDirError> {
    choose_app_strategy(AppStrategyArgs {
        top_level_domain: constants::TOP_LEVEL_DOMAIN.to_string(),
        author: constants::AUTHOR.to_string(),
        app_name: constants::APP_NAME.to_string(),
    })
}

/// 配置文件路径：`POC_INDEXER_CONFIG` 优先，否则为平台配置目录下的 `indexer.toml`
pub fn resolve_config_file<S: AppStrategy>(strategy: &S) -> PathBuf {
    env::var_os(env_key("CONFIG"))
        .map(PathBuf::from)
        .unwrap_or_else(|| strategy.config_dir().join(constants::INDEXER_CONFIG_FILE_NAME))
}

pub fn env_key(name: &str) -> String {
    format!("{}_{}", constants::ENV_PREFIX, name)
}

/// 读取带前缀的环境变量，空值视为未设置
pub fn env_override(name: &str) -> Option<String> {
    env::var(env_key(name)).ok().filter(|v| !v.is_empty())
}
