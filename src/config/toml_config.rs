use crate::adapters::auth::redacted;
use crate::app::providers::{bitbucket, github};
use crate::config::{
    validate_provider_config, DEFAULT_BIND, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{ProfileError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub github: GithubConfig,
    pub bitbucket: BitbucketConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_base: Option<String>,
    pub token: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BitbucketConfig {
    pub api_base: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub send_credentials: Option<bool>,
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_base", &self.api_base)
            .field("token", &redacted(&self.token))
            .finish()
    }
}

impl fmt::Debug for BitbucketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitbucketConfig")
            .field("api_base", &self.api_base)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("send_credentials", &self.send_credentials)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub concurrent_requests: Option<usize>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProfileError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_TOKEN})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProfileError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

/// 未替換的 `${VAR}` 不能當作憑證送出
fn credential(value: &Option<String>) -> Option<&str> {
    let value = value.as_deref()?.trim();
    if value.is_empty() {
        return None;
    }
    if value.starts_with("${") && value.ends_with('}') {
        tracing::warn!("⚠️ Credential placeholder {} was not resolved, ignoring it", value);
        return None;
    }
    Some(value)
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> &str {
        self.server.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    fn github_api_base(&self) -> &str {
        self.github
            .api_base
            .as_deref()
            .unwrap_or(github::DEFAULT_API_BASE)
    }

    fn bitbucket_api_base(&self) -> &str {
        self.bitbucket
            .api_base
            .as_deref()
            .unwrap_or(bitbucket::DEFAULT_API_BASE)
    }

    fn github_token(&self) -> Option<&str> {
        credential(&self.github.token)
    }

    fn bitbucket_username(&self) -> Option<&str> {
        credential(&self.bitbucket.username)
    }

    fn bitbucket_password(&self) -> Option<&str> {
        credential(&self.bitbucket.password)
    }

    fn bitbucket_send_credentials(&self) -> bool {
        self.bitbucket.send_credentials.unwrap_or(false)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.http.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn concurrent_requests(&self) -> usize {
        self.http
            .concurrent_requests
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }

    fn user_agent(&self) -> &str {
        self.http.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider_config(self)
    }
}
