use crate::core::profile_service::ProfileService;
use crate::core::{ConfigProvider, ProfileReport, ProviderClient};
use crate::utils::error::{ProfileError, Result};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: ProfileReport,
}

pub fn router<G, B>(service: Arc<ProfileService<G, B>>) -> Router
where
    G: ProviderClient + 'static,
    B: ProviderClient + 'static,
{
    Router::new()
        .route("/health-check", get(health_check))
        .route(
            "/profiles/{github_org}/{bitbucket_team}",
            get(profiles::<G, B>),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(service)
}

async fn health_check() -> &'static str {
    tracing::info!("Health Check!");
    "All Good!"
}

/// 永遠回 200：來源失敗只反映在 `sources` 旗標
async fn profiles<G, B>(
    State(service): State<Arc<ProfileService<G, B>>>,
    Path((github_org, bitbucket_team)): Path<(String, String)>,
) -> Json<ProfileResponse>
where
    G: ProviderClient + 'static,
    B: ProviderClient + 'static,
{
    let report = service.get_profiles(&github_org, &bitbucket_team).await;
    Json(ProfileResponse {
        status: "success",
        report,
    })
}

pub async fn serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let service = Arc::new(ProfileService::from_config(config)?);
    let listener = TcpListener::bind(config.bind_address())
        .await
        .map_err(|e| ProfileError::ServerError {
            message: format!("failed to bind {}: {}", config.bind_address(), e),
        })?;
    tracing::info!("🌐 Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ProfileError::ServerError {
            message: e.to_string(),
        })?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    struct BusyPortConfig {
        bind: String,
    }

    impl ConfigProvider for BusyPortConfig {
        fn bind_address(&self) -> &str {
            &self.bind
        }
        fn github_api_base(&self) -> &str {
            "https://api.github.com"
        }
        fn bitbucket_api_base(&self) -> &str {
            "https://api.bitbucket.org/2.0"
        }
        fn github_token(&self) -> Option<&str> {
            None
        }
        fn bitbucket_username(&self) -> Option<&str> {
            None
        }
        fn bitbucket_password(&self) -> Option<&str> {
            None
        }
        fn bitbucket_send_credentials(&self) -> bool {
            false
        }
        fn request_timeout_seconds(&self) -> u64 {
            5
        }
        fn concurrent_requests(&self) -> usize {
            2
        }
        fn user_agent(&self) -> &str {
            "org-profiles-test"
        }
    }

    #[tokio::test]
    async fn test_bind_failure_is_server_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = BusyPortConfig {
            bind: taken.local_addr().unwrap().to_string(),
        };

        let err = serve(&config).await.unwrap_err();

        assert!(matches!(err, ProfileError::ServerError { .. }));
        assert_eq!(err.category(), ErrorCategory::System);
    }
}
