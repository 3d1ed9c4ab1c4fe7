use crate::adapters::auth::Credentials;
use crate::adapters::http::build_client;
use crate::app::providers::{BitbucketClient, GithubClient};
use crate::core::{ConfigProvider, NormalizedSummary, ProfileReport, ProviderClient, SourceStatus};
use crate::domain::services::merge;
use crate::utils::error::Result;

/// 組合兩個來源的抓取結果
///
/// 兩個來源並行抓取，彼此不共享狀態。任何來源失敗只會讓對應的
/// `sources` 旗標為 false，`get_profiles` 本身永遠成功。
pub struct ProfileService<G: ProviderClient, B: ProviderClient> {
    github: G,
    bitbucket: B,
}

pub type DefaultProfileService = ProfileService<GithubClient, BitbucketClient>;

impl<G: ProviderClient, B: ProviderClient> ProfileService<G, B> {
    pub fn new(github: G, bitbucket: B) -> Self {
        Self { github, bitbucket }
    }

    pub async fn get_profiles(&self, github_org: &str, bitbucket_team: &str) -> ProfileReport {
        let (github, bitbucket) = tokio::join!(
            collect(&self.github, github_org),
            collect(&self.bitbucket, bitbucket_team)
        );

        let sources = SourceStatus {
            github: github.is_some(),
            bitbucket: bitbucket.is_some(),
        };
        if !sources.any() {
            tracing::warn!(
                "⚠️ No source succeeded for {}/{}, returning empty profile",
                github_org,
                bitbucket_team
            );
        }

        ProfileReport {
            data: merge([github.as_ref(), bitbucket.as_ref()]),
            sources,
        }
    }
}

impl ProfileService<GithubClient, BitbucketClient> {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::with_credentials(config, &Credentials::from_config(config))
    }

    pub fn with_credentials<C: ConfigProvider + ?Sized>(
        config: &C,
        credentials: &Credentials,
    ) -> Result<Self> {
        let client = build_client(config.request_timeout_seconds(), config.user_agent())?;

        let github = GithubClient::new(
            client.clone(),
            config.github_api_base(),
            credentials.github_headers()?,
        )
        .with_concurrency(config.concurrent_requests());

        let bitbucket = BitbucketClient::new(
            client,
            config.bitbucket_api_base(),
            credentials.bitbucket_headers()?,
        )
        .with_send_credentials(config.bitbucket_send_credentials());

        Ok(Self::new(github, bitbucket))
    }
}

async fn collect<P: ProviderClient + ?Sized>(
    provider: &P,
    account: &str,
) -> Option<NormalizedSummary> {
    match provider.fetch(account).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::error!(
                "❌ {} fetch failed for '{}': {} (Category: {:?})",
                provider.source(),
                account,
                e,
                e.category()
            );
            None
        }
    }
}
