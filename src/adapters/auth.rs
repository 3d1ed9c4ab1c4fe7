use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ProfileError, Result};
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::fmt;

pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
pub const BITBUCKET_ACCEPT: &str = "application/json";

/// 呼叫端提供的各平台憑證，全部可省略
#[derive(Clone, Default)]
pub struct Credentials {
    pub github_token: Option<String>,
    pub bitbucket_username: Option<String>,
    pub bitbucket_password: Option<String>,
}

impl Credentials {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            github_token: non_empty(config.github_token()),
            bitbucket_username: non_empty(config.bitbucket_username()),
            bitbucket_password: non_empty(config.bitbucket_password()),
        }
    }

    pub fn github_headers(&self) -> Result<HeaderMap> {
        github_headers(self.github_token.as_deref())
    }

    pub fn bitbucket_headers(&self) -> Result<HeaderMap> {
        bitbucket_headers(
            self.bitbucket_username.as_deref(),
            self.bitbucket_password.as_deref(),
        )
    }
}

/// `Debug` 輸出用：只顯示是否有值
pub(crate) fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "***")
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &redacted(&self.github_token))
            .field("bitbucket_username", &self.bitbucket_username)
            .field("bitbucket_password", &redacted(&self.bitbucket_password))
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn sensitive_value(raw: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(raw).map_err(|e| ProfileError::ConfigError {
        message: format!("Invalid auth header: {}", e),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// GitHub 標頭：固定 v3 Accept，有 token 時加上 `Authorization: token ...`
pub fn github_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

    if let Some(token) = token {
        headers.insert(AUTHORIZATION, sensitive_value(&format!("token {}", token))?);
    }

    Ok(headers)
}

/// Bitbucket 標頭：帳號密碼都存在時才使用 Basic 驗證
pub fn bitbucket_headers(username: Option<&str>, password: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BITBUCKET_ACCEPT));

    match (username, password) {
        (Some(username), Some(password)) => {
            let auth_string = format!("{}:{}", username, password);
            let auth_encoded = base64::engine::general_purpose::STANDARD.encode(auth_string);
            headers.insert(
                AUTHORIZATION,
                sensitive_value(&format!("Basic {}", auth_encoded))?,
            );
        }
        (None, None) => {}
        _ => {
            tracing::warn!(
                "Bitbucket credentials need both username and password, continuing unauthenticated"
            );
        }
    }

    Ok(headers)
}
