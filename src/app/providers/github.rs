use crate::adapters::http::{endpoint, get_json};
use crate::domain::model::{add_counts, CountMap, NormalizedSummary, Source};
use crate::domain::ports::ProviderClient;
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// 語言請求預設並發數
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

#[derive(Debug, Deserialize)]
struct GithubOrg {
    #[serde(default)]
    watchers: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    #[serde(default)]
    private: Option<bool>,
    #[serde(default)]
    fork: Option<bool>,
    #[serde(default)]
    languages_url: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
}

/// GitHub 組織抓取：組織資訊、倉庫列表（單頁）、每個倉庫的語言位元組數
pub struct GithubClient {
    client: Client,
    api_base: String,
    headers: HeaderMap,
    concurrent_requests: usize,
}

impl GithubClient {
    pub fn new(client: Client, api_base: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            headers,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
        }
    }

    /// 語言請求的並發上限，1 代表逐一請求
    pub fn with_concurrency(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    /// Best-effort: any failure is logged and the repository contributes no language data.
    async fn fetch_languages(&self, url: &str) -> Option<CountMap> {
        match get_json::<CountMap>(&self.client, url, &self.headers).await {
            Ok(languages) => Some(languages),
            Err(e) => {
                tracing::warn!(
                    "⚠️ Skipping languages for {} ({:?}): {}",
                    url,
                    e.category(),
                    e
                );
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl ProviderClient for GithubClient {
    fn source(&self) -> Source {
        Source::Github
    }

    async fn fetch(&self, org: &str) -> Result<NormalizedSummary> {
        tracing::info!("🚀 Fetching GitHub organization: {}", org);

        let org_url = endpoint(&self.api_base, &["orgs", org])?;
        let org_data: GithubOrg = get_json(&self.client, &org_url, &self.headers).await?;

        let repos_url = endpoint(&self.api_base, &["orgs", org, "repos"])?;
        let repos: Vec<GithubRepo> = get_json(&self.client, &repos_url, &self.headers).await?;
        tracing::debug!("GitHub organization {} listed {} repositories", org, repos.len());

        let mut summary = NormalizedSummary {
            watchers: org_data.watchers.unwrap_or(0),
            ..Default::default()
        };

        let mut language_urls = Vec::with_capacity(repos.len());
        for repo in &repos {
            if !repo.private.unwrap_or(false) {
                summary.public_repos += 1;
            }
            if repo.fork.unwrap_or(false) {
                summary.forked_repos += 1;
            }
            for topic in repo.topics.iter().flatten() {
                *summary.topics.entry(topic.clone()).or_insert(0) += 1;
            }
            match &repo.languages_url {
                Some(url) => language_urls.push(url.clone()),
                None => tracing::debug!("Repository in {} has no languages_url", org),
            }
        }

        summary.languages = stream::iter(language_urls)
            .map(|url: String| async move { self.fetch_languages(&url).await })
            .buffer_unordered(self.concurrent_requests)
            .fold(CountMap::new(), |mut total, partial| async move {
                if let Some(partial) = partial {
                    add_counts(&mut total, &partial);
                }
                total
            })
            .await;

        tracing::info!(
            "✅ GitHub {}: {} public, {} forked, {} languages, {} topics",
            org,
            summary.public_repos,
            summary.forked_repos,
            summary.languages.len(),
            summary.topics.len()
        );
        Ok(summary)
    }
}
