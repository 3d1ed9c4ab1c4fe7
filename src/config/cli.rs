use crate::adapters::auth::redacted;
use crate::app::providers::{bitbucket, github};
use crate::config::{
    validate_provider_config, DEFAULT_BIND, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::fmt;

#[derive(Clone, Parser)]
#[command(name = "org-profiles")]
#[command(about = "Serve merged GitHub and Bitbucket organization profiles")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file; replaces the server/provider flags below")]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    #[arg(long, default_value = github::DEFAULT_API_BASE)]
    pub github_api_base: String,

    #[arg(long, default_value = bitbucket::DEFAULT_API_BASE)]
    pub bitbucket_api_base: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "BITBUCKET_USERNAME")]
    pub bitbucket_username: Option<String>,

    #[arg(long, env = "BITBUCKET_PASSWORD", hide_env_values = true)]
    pub bitbucket_password: Option<String>,

    #[arg(long, help = "Send Bitbucket credentials on the repository listing call")]
    pub bitbucket_send_credentials: bool,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS, help = "Per-request timeout in seconds")]
    pub request_timeout: u64,

    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("config", &self.config)
            .field("bind", &self.bind)
            .field("github_api_base", &self.github_api_base)
            .field("bitbucket_api_base", &self.bitbucket_api_base)
            .field("github_token", &redacted(&self.github_token))
            .field("bitbucket_username", &self.bitbucket_username)
            .field("bitbucket_password", &redacted(&self.bitbucket_password))
            .field("bitbucket_send_credentials", &self.bitbucket_send_credentials)
            .field("request_timeout", &self.request_timeout)
            .field("concurrent_requests", &self.concurrent_requests)
            .field("user_agent", &self.user_agent)
            .field("verbose", &self.verbose)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn github_api_base(&self) -> &str {
        &self.github_api_base
    }

    fn bitbucket_api_base(&self) -> &str {
        &self.bitbucket_api_base
    }

    fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    fn bitbucket_username(&self) -> Option<&str> {
        self.bitbucket_username.as_deref()
    }

    fn bitbucket_password(&self) -> Option<&str> {
        self.bitbucket_password.as_deref()
    }

    fn bitbucket_send_credentials(&self) -> bool {
        self.bitbucket_send_credentials
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider_config(self)
    }
}
