// poc-core/src/template.rs
//! 模板模型 - PoC 模板文件的结构化表示
//!
//! 模板字段类型松散（字符串或列表、可选的嵌套映射），在这里一次性规范化，
//! 后续的提取逻辑不再做类型判断。

use serde::Deserialize;
use serde_yaml_ng::Value;

use crate::error::{Error, Result};

/// 字符串列表字段：单值视为单元素列表，丢弃 null 和空串
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entries(Vec<String>);

impl Entries {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let entries = scalars(value).into_iter().filter(|s| !s.is_empty()).collect();
        Ok(Entries(entries))
    }
}

/// 文本字段：接受字符串、数字、布尔或它们的列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text(Vec<String>);

impl Text {
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Text(scalars(value)))
    }
}

fn scalars(value: Value) -> Vec<String> {
    match value {
        Value::Null | Value::Mapping(_) => Vec::new(),
        Value::Bool(b) => vec![b.to_string()],
        Value::Number(n) => vec![n.to_string()],
        Value::String(s) => vec![s],
        Value::Sequence(seq) => seq.into_iter().flat_map(scalars).collect(),
        Value::Tagged(tagged) => scalars(tagged.value),
    }
}

/// 解析后的模板
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateRecord {
    #[serde(default)]
    pub id: Text,
    #[serde(default)]
    pub info: Option<TemplateInfo>,
    #[serde(default)]
    pub http: Option<Vec<RequestBlock>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateInfo {
    #[serde(default)]
    pub name: Text,
    #[serde(default)]
    pub author: Text,
    #[serde(default)]
    pub severity: Text,
    #[serde(default)]
    pub description: Text,
    #[serde(default)]
    pub tags: Text,
    /// 不透明映射，原样透传
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// HTTP 请求块
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBlock {
    #[serde(default)]
    pub path: Entries,
    #[serde(default)]
    pub raw: Entries,
}

impl TemplateRecord {
    /// 模板 id，缺失时为空字符串
    pub fn poc_id(&self) -> String {
        self.id.joined()
    }

    /// `http` 下的所有请求块
    pub fn request_blocks(&self) -> impl Iterator<Item = &RequestBlock> {
        self.http.iter().flatten()
    }

    pub fn info(&self) -> TemplateInfo {
        self.info.clone().unwrap_or_default()
    }
}

/// 解析模板文本
///
/// 空文本、`null` 或空映射返回 `Ok(None)`，调用方应静默跳过。
pub fn parse_template(text: &str) -> Result<Option<TemplateRecord>> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_yaml_ng::from_str(text)?;
    match &value {
        Value::Null => return Ok(None),
        Value::Mapping(m) if m.is_empty() => return Ok(None),
        Value::Mapping(_) => {}
        other => {
            return Err(Error::Parse(format!(
                "模板根节点必须是映射，实际为 {}",
                value_kind(other)
            )));
        }
    }

    let record: TemplateRecord = serde_yaml_ng::from_value(value)?;
    Ok(Some(record))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_template() {
        let yaml = r#"
id: CVE-2021-1234
info:
  name: Demo Login Bypass
  author: alice
  severity: high
  description: bypass
  tags: cve,login
  metadata:
    max-request: 2
http:
  - path:
      - "{{BaseURL}}/login"
      - "{{BaseURL}}/admin"
  - raw:
      - |
        GET /status HTTP/1.1
        Host: {{Hostname}}
"#;
        let record = parse_template(yaml).unwrap().unwrap();
        assert_eq!(record.poc_id(), "CVE-2021-1234");
        let info = record.info();
        assert_eq!(info.name.joined(), "Demo Login Bypass");
        assert_eq!(info.severity.joined(), "high");
        assert_eq!(info.tags.joined(), "cve,login");
        assert!(info.metadata.is_some());

        let blocks: Vec<_> = record.request_blocks().collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].path.as_slice().len(), 2);
        assert_eq!(blocks[1].raw.as_slice().len(), 1);
    }

    #[test]
    fn test_single_path_normalized_to_list() {
        let record = parse_template("http:\n  - path: /a\n").unwrap().unwrap();
        let block = record.request_blocks().next().unwrap();
        assert_eq!(block.path.as_slice(), ["/a".to_string()]);
        assert!(block.raw.is_empty());
    }

    #[test]
    fn test_author_list_joined() {
        let record = parse_template("info:\n  author: [alice, bob]\n").unwrap().unwrap();
        assert_eq!(record.info().author.joined(), "alice,bob");
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let record = parse_template("id: x\n").unwrap().unwrap();
        let info = record.info();
        assert_eq!(info.name.joined(), "");
        assert_eq!(info.description.joined(), "");
        assert_eq!(record.request_blocks().count(), 0);
    }

    #[test]
    fn test_only_http_blocks_are_requests() {
        let yaml = "id: legacy\nrequests:\n  - path: \"{{BaseURL}}/legacy.php\"\n";
        let record = parse_template(yaml).unwrap().unwrap();
        assert_eq!(record.request_blocks().count(), 0);
    }

    #[test]
    fn test_null_and_empty_entries_dropped() {
        let yaml = "http:\n  - path:\n      - \"{{BaseURL}}/a\"\n      - ~\n      - \"\"\n    raw: ~\n";
        let record = parse_template(yaml).unwrap().unwrap();
        let block = record.request_blocks().next().unwrap();
        assert_eq!(block.path.as_slice(), ["{{BaseURL}}/a".to_string()]);
        assert!(block.raw.is_empty());
    }

    #[test]
    fn test_empty_documents_are_skipped() {
        assert!(parse_template("").unwrap().is_none());
        assert!(parse_template("   \n").unwrap().is_none());
        assert!(parse_template("~\n").unwrap().is_none());
        assert!(parse_template("{}\n").unwrap().is_none());
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = parse_template("id: [unclosed\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_scalar_root_is_parse_error() {
        let err = parse_template("just a string\n").unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("string")));
    }

    #[test]
    fn test_numeric_id_accepted() {
        let record = parse_template("id: 12345\ninfo:\n  severity: 3\n").unwrap().unwrap();
        assert_eq!(record.poc_id(), "12345");
        assert_eq!(record.info().severity.joined(), "3");
    }

    #[test]
    fn test_id_missing_is_empty() {
        let record = parse_template("info:\n  name: n\n").unwrap().unwrap();
        assert_eq!(record.poc_id(), "");
    }
}
