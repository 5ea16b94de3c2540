// poc-core/src/schema/settings.rs
//! 索引配置构建器
//!
//! 可搜索/可过滤/可排序字段与排序规则，每次上传后重新下发

use super::fields::*;

/// 索引配置项类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    SearchableAttributes,
    FilterableAttributes,
    SortableAttributes,
    RankingRules,
}

impl SettingKind {
    /// 对应的 settings 子路由
    pub fn route(self) -> &'static str {
        match self {
            SettingKind::SearchableAttributes => "searchable-attributes",
            SettingKind::FilterableAttributes => "filterable-attributes",
            SettingKind::SortableAttributes => "sortable-attributes",
            SettingKind::RankingRules => "ranking-rules",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    /// 顺序即相关性权重，靠前优先
    pub searchable: Vec<String>,
    pub filterable: Vec<String>,
    pub sortable: Vec<String>,
    pub ranking_rules: Vec<String>,
}

impl IndexSettings {
    /// PoC 索引的固定配置
    pub fn poc_default() -> Self {
        Self {
            searchable: owned(&[
                FIELD_URLS,
                FIELD_URL_KEYWORDS,
                FIELD_POC_ID,
                FIELD_NAME,
                FIELD_DESCRIPTION,
                FIELD_TAGS,
                FIELD_AUTHOR,
            ]),
            filterable: owned(&[FIELD_SEVERITY, FIELD_AUTHOR, FIELD_TAGS, FIELD_POC_ID]),
            sortable: owned(&[FIELD_INDEXED_AT, FIELD_SEVERITY]),
            ranking_rules: owned(&["words", "typo", "proximity", "attribute", "sort", "exactness"]),
        }
    }

    /// 按下发顺序展开
    pub fn updates(&self) -> [(SettingKind, &[String]); 4] {
        [
            (SettingKind::SearchableAttributes, self.searchable.as_slice()),
            (SettingKind::FilterableAttributes, self.filterable.as_slice()),
            (SettingKind::SortableAttributes, self.sortable.as_slice()),
            (SettingKind::RankingRules, self.ranking_rules.as_slice()),
        ]
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::poc_default()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
