// Adapters layer: concrete implementations for external systems (http client, credentials).

pub mod auth;
pub mod http;
