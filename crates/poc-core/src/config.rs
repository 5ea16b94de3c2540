// poc-core/src/config.rs
//! 配置模块

use serde::{Deserialize, Serialize};

/// 搜索引擎连接配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineConfig {
    /// 引擎地址，如 `http://127.0.0.1:7700`
    pub url: String,
    /// API 密钥，为空时不发送认证头
    pub api_key: Option<String>,
    pub index_name: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7700".to_string(),
            api_key: None,
            index_name: "nuclei_pocs".to_string(),
            timeout_secs: 30,
        }
    }
}

impl EngineConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}
