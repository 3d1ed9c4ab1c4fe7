#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub use crate::app::providers::github::DEFAULT_CONCURRENT_REQUESTS;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url};

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("org-profiles/", env!("CARGO_PKG_VERSION"));

/// 所有設定來源共用的檢查
pub fn validate_provider_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_non_empty_string("server.bind", config.bind_address())?;
    validate_url("github.api_base", config.github_api_base())?;
    validate_url("bitbucket.api_base", config.bitbucket_api_base())?;
    validate_range("http.timeout_seconds", config.request_timeout_seconds(), 1, 300)?;
    validate_range("http.concurrent_requests", config.concurrent_requests(), 1, 64)?;
    validate_non_empty_string("http.user_agent", config.user_agent())?;

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}
