pub const TOP_LEVEL_DOMAIN: &str = "org";
pub const AUTHOR: &str = "pocsearch";
pub const APP_NAME: &str = "poc-indexer";

pub const INDEXER_CONFIG_FILE_NAME: &str = "indexer.toml";

/// 环境变量前缀，如 `POC_INDEXER_INDEX_NAME`
pub const ENV_PREFIX: &str = "POC_INDEXER";
