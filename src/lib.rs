pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::auth::Credentials;
pub use app::providers::{BitbucketClient, GithubClient};
pub use crate::core::profile_service::{DefaultProfileService, ProfileService};
pub use crate::core::{AggregateSummary, NormalizedSummary, ProfileReport, SourceStatus};
pub use utils::error::{ProfileError, Result};
