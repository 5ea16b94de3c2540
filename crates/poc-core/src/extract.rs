// poc-core/src/extract.rs
//! 特征提取模块 - 从请求块中提取 URL 路径和关键词

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::template::{RequestBlock, TemplateRecord};

/// `{{...}}` 占位符（非贪婪）
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{.*?\}\}").expect("placeholder regex"));

/// 原始请求首行：`METHOD TARGET HTTP/x`
static REQUEST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(GET|POST|PUT|DELETE|PATCH|HEAD|OPTIONS)\s+(\S+)\s+HTTP")
        .expect("request line regex")
});

/// 一个模板的提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub urls: BTreeSet<String>,
    pub url_keywords: BTreeSet<String>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// 提取模板的 URL 集合和关键词集合
///
/// 没有任何可识别请求的模板返回空集合，不视为错误。
pub fn extract_facets(record: &TemplateRecord) -> Facets {
    let mut urls = BTreeSet::new();
    for block in record.request_blocks() {
        collect_urls(block, &mut urls);
    }

    let url_keywords = derive_keywords(&urls);
    Facets { urls, url_keywords }
}

fn collect_urls(block: &RequestBlock, urls: &mut BTreeSet<String>) {
    for path in block.path.as_slice() {
        if let Some(clean) = clean_path(path) {
            urls.insert(clean);
        }
    }

    for raw in block.raw.as_slice() {
        if let Some(target) = raw_target(raw) {
            urls.insert(target);
        }
    }
}

/// 规范化 `path` 条目：去空白、去占位符，丢弃空值和根路径
fn clean_path(path: &str) -> Option<String> {
    let clean = strip_placeholders(path.trim());
    keep_url(clean)
}

/// 从原始请求文本首行取出目标路径
fn raw_target(raw: &str) -> Option<String> {
    let first_line = raw.trim_start().lines().next()?;
    let caps = REQUEST_LINE.captures(first_line)?;
    let target = caps.get(2)?.as_str();
    let clean = strip_placeholders(target).trim().to_string();
    keep_url(clean)
}

pub fn strip_placeholders(text: &str) -> String {
    PLACEHOLDER.replace_all(text, "").into_owned()
}

fn keep_url(clean: String) -> Option<String> {
    if clean.is_empty() || clean == "/" {
        None
    } else {
        Some(clean)
    }
}

/// 关键词：每个 URL 的基础路径（`?` 之前）本身，以及它按 `/` 切分后的非空片段
pub fn derive_keywords<'a, I>(urls: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut keywords = BTreeSet::new();
    for url in urls {
        let base = url.split('?').next().unwrap_or("");
        if base.is_empty() {
            continue;
        }
        keywords.insert(base.to_string());
        keywords.extend(
            base.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_template;
    use rstest::rstest;

    fn facets(yaml: &str) -> Facets {
        let record = parse_template(yaml).unwrap().unwrap();
        extract_facets(&record)
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ==================== path ====================

    #[test]
    fn test_placeholder_in_middle_keeps_double_slash() {
        let f = facets("http:\n  - path: \"/api/{{ver}}/login\"\n");
        assert_eq!(f.urls, set(&["/api//login"]));
        assert_eq!(f.url_keywords, set(&["/api//login", "api", "login"]));
    }

    #[rstest]
    #[case("{{BaseURL}}/")]
    #[case("{{BaseURL}}")]
    #[case("/")]
    #[case("   ")]
    #[case("{{BaseURL}}{{path}}")]
    fn test_root_and_empty_paths_dropped(#[case] path: &str) {
        let yaml = format!("http:\n  - path: {:?}\n", path);
        let f = facets(&yaml);
        assert!(f.urls.is_empty(), "{path:?} -> {:?}", f.urls);
        assert!(f.url_keywords.is_empty());
    }

    #[rstest]
    #[case("{{BaseURL}}/wp-login.php", "/wp-login.php")]
    #[case("  {{BaseURL}}/a/b  ", "/a/b")]
    #[case("{{RootURL}}/x?id={{rand}}", "/x?id=")]
    fn test_path_normalization(#[case] path: &str, #[case] expected: &str) {
        let yaml = format!("http:\n  - path: {:?}\n", path);
        assert_eq!(facets(&yaml).urls, set(&[expected]));
    }

    #[test]
    fn test_path_list_deduplicated() {
        let yaml = r#"
http:
  - path:
      - "{{BaseURL}}/a"
      - "{{Hostname}}/a"
  - path: "{{BaseURL}}/b"
"#;
        assert_eq!(facets(yaml).urls, set(&["/a", "/b"]));
    }

    #[test]
    fn test_no_placeholders_survive() {
        let yaml = r#"
http:
  - path:
      - "{{BaseURL}}/{{a}}/x/{{b}}"
      - "/y/{{c}}"
"#;
        let f = facets(yaml);
        for url in &f.urls {
            assert!(!url.contains("{{") && !url.contains("}}"), "{url}");
        }
    }

    // ==================== raw ====================

    #[test]
    fn test_raw_request_line() {
        let f = facets("http:\n  - raw:\n      - \"GET /admin/config.php HTTP/1.1\"\n");
        assert_eq!(f.urls, set(&["/admin/config.php"]));
        assert_eq!(
            f.url_keywords,
            set(&["/admin/config.php", "admin", "config.php"])
        );
    }

    #[test]
    fn test_raw_multiline_with_placeholders() {
        let yaml = r#"
http:
  - raw:
      - |
        post /api/{{endpoint}}/upload?x=1 HTTP/1.1
        Host: {{Hostname}}
        Content-Type: application/json
"#;
        let f = facets(yaml);
        assert_eq!(f.urls, set(&["/api//upload?x=1"]));
        assert_eq!(f.url_keywords, set(&["/api//upload", "api", "upload"]));
    }

    #[rstest]
    #[case("CONNECT /tunnel HTTP/1.1")]
    #[case("GET /missing-version")]
    #[case("not a request at all")]
    #[case("GET {{BaseURL}}/ HTTP/1.1")]
    fn test_raw_unmatched_or_root_skipped(#[case] raw: &str) {
        let yaml = format!("http:\n  - raw:\n      - {:?}\n", raw);
        assert!(facets(&yaml).urls.is_empty());
    }

    #[test]
    fn test_raw_only_first_line_considered() {
        let yaml = r#"
http:
  - raw:
      - |
        Host: example
        GET /second HTTP/1.1
"#;
        assert!(facets(yaml).urls.is_empty());
    }

    #[test]
    fn test_null_path_entry_does_not_drop_siblings() {
        let yaml = "id: mixed\nhttp:\n  - path:\n      - \"{{BaseURL}}/a\"\n      - ~\n";
        assert_eq!(facets(yaml).urls, set(&["/a"]));
    }

    #[test]
    fn test_requests_block_not_read() {
        let f = facets("id: legacy\nrequests:\n  - path: \"{{BaseURL}}/legacy.php\"\n");
        assert!(f.urls.is_empty());
        assert!(f.url_keywords.is_empty());
    }

    #[test]
    fn test_path_and_raw_combined() {
        let yaml = r#"
http:
  - path: "{{BaseURL}}/one"
    raw:
      - "PUT /two HTTP/1.1"
"#;
        assert_eq!(facets(yaml).urls, set(&["/one", "/two"]));
    }

    // ==================== 空结果 ====================

    #[rstest]
    #[case("id: x\n")]
    #[case("http: []\n")]
    #[case("http:\n  - method: GET\n")]
    #[case("http:\n  - path: ~\n    raw: ~\n")]
    fn test_empty_facets(#[case] yaml: &str) {
        let f = facets(yaml);
        assert!(f.is_empty());
        assert!(f.url_keywords.is_empty());
    }

    // ==================== 关键词 ====================

    #[test]
    fn test_keywords_strip_query() {
        let urls = set(&["/search?q=1&x=2", "/search"]);
        assert_eq!(derive_keywords(&urls), set(&["/search", "search"]));
    }

    #[test]
    fn test_keywords_skip_empty_base() {
        let urls = set(&["?debug=1"]);
        assert!(derive_keywords(&urls).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let record = parse_template(
            "http:\n  - path: [\"{{BaseURL}}/a/b?c=d\", \"/e\"]\n    raw: [\"GET /f HTTP/1.1\"]\n",
        )
        .unwrap()
        .unwrap();
        let first = extract_facets(&record);
        let second = extract_facets(&record);
        assert_eq!(first, second);
        assert_eq!(first.urls.len(), 3);
    }
}
