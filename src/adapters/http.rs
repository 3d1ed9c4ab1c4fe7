use crate::utils::error::{ProfileError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// 錯誤訊息中保留的回應內容長度上限
const MAX_ERROR_BODY_CHARS: usize = 200;

/// 建立共用的 HTTP client，所有對外請求都套用同一個逾時設定
pub fn build_client(timeout_seconds: u64, user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// 在 `base` 之後逐段附加路徑；每個片段各自編碼，`/`、`?`、`..` 不會改變請求目標
pub fn endpoint(base: &str, segments: &[&str]) -> Result<String> {
    let mut url = Url::parse(base).map_err(|e| ProfileError::ConfigError {
        message: format!("Invalid API base URL '{}': {}", base, e),
    })?;
    url.path_segments_mut()
        .map_err(|_| ProfileError::ConfigError {
            message: format!("API base URL '{}' cannot carry a path", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

/// GET `url` and decode a JSON body.
///
/// Anything other than `200 OK` is an [`ProfileError::HttpStatusError`]; a body that does not
/// decode into `T` is a [`ProfileError::DecodeError`].
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
) -> Result<T> {
    tracing::debug!("Making API request to: {}", url);
    let response = client.get(url).headers(headers.clone()).send().await?;
    let status = response.status();
    tracing::debug!("API response status: {} ({})", status, url);

    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(ProfileError::HttpStatusError {
            url: url.to_string(),
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| ProfileError::DecodeError {
        url: url.to_string(),
        source,
    })
}
