use crate::error::Result;
use poc_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use config::{create_strategy, env_override, resolve_config_file};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default="default_config", deny_unknown_fields)]
pub struct Config {
    pub meilisearch_url: String,
    pub meilisearch_key: Option<String>,
    pub index_name: String,
    /// PoC 模板目录
    pub poc_folder: PathBuf,
    pub timeout_secs: u64,
}


fn default_config() -> Config {
    let engine = EngineConfig::default();

    Config {
        meilisearch_url: engine.url,
        meilisearch_key: engine.api_key,
        index_name: engine.index_name,
        poc_folder: PathBuf::from("./pocs"),
        timeout_secs: engine.timeout_secs,
    }
}


impl Config {
    fn load_str(user_config_str: &str) -> Result<Config> {
        let user_config: Config = toml::from_str(user_config_str)?;
        Ok(user_config)
    }

    pub fn load() -> Result<Config> {
        let strategy = create_strategy()?;
        let config_path = resolve_config_file(&strategy);

        let config = match std::fs::read_to_string(&config_path) {
            Ok(user_config_str) => Self::load_str(&user_config_str)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // 配置文件不存在，创建示例配置文件
                Self::create_example_config(&config_path)?;
                Self::load_str("")?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(config.with_overrides(env_override))
    }

    /// 环境变量覆盖配置文件
    fn with_overrides<F>(mut self, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("MEILISEARCH_URL") {
            self.meilisearch_url = url;
        }
        if let Some(key) = lookup("MEILISEARCH_KEY") {
            self.meilisearch_key = Some(key);
        }
        if let Some(index) = lookup("INDEX_NAME") {
            self.index_name = index;
        }
        if let Some(folder) = lookup("POC_FOLDER") {
            self.poc_folder = PathBuf::from(folder);
        }
        self
    }

    pub fn engine(&self, index_name: Option<&str>) -> EngineConfig {
        EngineConfig {
            url: self.meilisearch_url.clone(),
            api_key: self.meilisearch_key.clone(),
            index_name: index_name.unwrap_or(&self.index_name).to_string(),
            timeout_secs: self.timeout_secs,
        }
    }

    fn create_example_config(config_path: &Path) -> Result<()> {
        use std::io::Write;

        // 确保配置目录存在
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let example_config = r#"# PoC 索引工具配置文件
#
# 此文件在首次运行时自动创建
# 也可以通过环境变量覆盖: POC_INDEXER_MEILISEARCH_URL, POC_INDEXER_MEILISEARCH_KEY,
# POC_INDEXER_INDEX_NAME, POC_INDEXER_POC_FOLDER

# Meilisearch 地址
meilisearch-url = "http://127.0.0.1:7700"

# Meilisearch API 密钥（未开启认证时可省略）
# meilisearch-key = "masterKey"

# 索引名称
index-name = "nuclei_pocs"

# PoC 模板目录
poc-folder = "./pocs"

# 单次请求超时（秒）
# timeout-secs = 30
"#;

        let mut file = std::fs::File::create(config_path)?;
        file.write_all(example_config.as_bytes())?;

        eprintln!("\n📝 已创建配置文件: {:?}", config_path);
        eprintln!("💡 请编辑配置文件，设置 Meilisearch 地址和 PoC 模板目录\n");

        Ok(())
    }
}
