use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 語言或主題名稱 → 計數
pub type CountMap = HashMap<String, u64>;

/// 代碼託管來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Github,
    Bitbucket,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Github => write!(f, "GitHub"),
            Source::Bitbucket => write!(f, "Bitbucket"),
        }
    }
}

/// 單一來源抓取成功後的統一摘要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSummary {
    pub public_repos: u64,
    pub forked_repos: u64,
    pub watchers: u64,
    pub languages: CountMap,
    pub topics: CountMap,
}

/// 所有成功來源合併後的結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_public_repos: u64,
    pub total_forked_repos: u64,
    pub total_watchers: u64,
    pub languages: CountMap,
    pub topics: CountMap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub github: bool,
    pub bitbucket: bool,
}

impl SourceStatus {
    pub fn any(&self) -> bool {
        self.github || self.bitbucket
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub data: AggregateSummary,
    pub sources: SourceStatus,
}

/// Adds every count of `from` into `into`, inserting keys that are not present yet.
pub fn add_counts(into: &mut CountMap, from: &CountMap) {
    for (key, count) in from {
        *into.entry(key.clone()).or_insert(0) += count;
    }
}
