use crate::adapters::http::{endpoint, get_json};
use crate::domain::model::{NormalizedSummary, Source};
use crate::domain::ports::ProviderClient;
use crate::utils::error::Result;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.bitbucket.org/2.0";

#[derive(Debug, Deserialize)]
struct RepositoryPage {
    #[serde(default)]
    values: Vec<BitbucketRepo>,
}

#[derive(Debug, Deserialize)]
struct BitbucketRepo {
    #[serde(default)]
    is_private: Option<bool>,
    #[serde(default)]
    language: Option<String>,
}

/// Bitbucket workspace 抓取：公開倉庫列表（單頁），語言以出現次數計
pub struct BitbucketClient {
    client: Client,
    api_base: String,
    headers: HeaderMap,
    send_credentials: bool,
}

impl BitbucketClient {
    pub fn new(client: Client, api_base: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            headers,
            send_credentials: false,
        }
    }

    /// 預設不送出驗證標頭（公開端點）；開啟後才附加
    pub fn with_send_credentials(mut self, send_credentials: bool) -> Self {
        self.send_credentials = send_credentials;
        self
    }
}

#[async_trait::async_trait]
impl ProviderClient for BitbucketClient {
    fn source(&self) -> Source {
        Source::Bitbucket
    }

    async fn fetch(&self, team: &str) -> Result<NormalizedSummary> {
        tracing::info!("🚀 Fetching Bitbucket workspace: {}", team);

        let repos_url = endpoint(&self.api_base, &["repositories", team])?;
        let no_headers = HeaderMap::new();
        let headers = if self.send_credentials {
            &self.headers
        } else {
            &no_headers
        };
        let page: RepositoryPage = get_json(&self.client, &repos_url, headers).await?;
        tracing::debug!("Bitbucket workspace {} listed {} repositories", team, page.values.len());

        let summary = page
            .values
            .iter()
            .filter(|repo| !repo.is_private.unwrap_or(true))
            .fold(NormalizedSummary::default(), |mut summary, repo| {
                summary.public_repos += 1;
                if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
                    *summary.languages.entry(language.to_string()).or_insert(0) += 1;
                }
                summary
            });

        tracing::info!(
            "✅ Bitbucket {}: {} public, {} languages",
            team,
            summary.public_repos,
            summary.languages.len()
        );
        Ok(summary)
    }
}
