use crate::domain::model::{NormalizedSummary, Source};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 代碼託管平台的抓取能力
///
/// 實作負責一次完整的抓取：任何頂層請求失敗都回傳 `Err`，
/// 不回傳部分結果。
#[async_trait]
pub trait ProviderClient: Send + Sync {
    fn source(&self) -> Source;

    async fn fetch(&self, account: &str) -> Result<NormalizedSummary>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn github_api_base(&self) -> &str;
    fn bitbucket_api_base(&self) -> &str;
    fn github_token(&self) -> Option<&str>;
    fn bitbucket_username(&self) -> Option<&str>;
    fn bitbucket_password(&self) -> Option<&str>;
    fn bitbucket_send_credentials(&self) -> bool;
    fn request_timeout_seconds(&self) -> u64;
    fn concurrent_requests(&self) -> usize;
    fn user_agent(&self) -> &str;
}
