pub mod profile_service;

pub use crate::domain::model::{
    AggregateSummary, NormalizedSummary, ProfileReport, Source, SourceStatus,
};
pub use crate::domain::ports::{ConfigProvider, ProviderClient};
pub use crate::utils::error::Result;
