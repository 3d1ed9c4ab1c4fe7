use httpmock::prelude::*;
use org_profiles::core::ConfigProvider;
use org_profiles::{AggregateSummary, Credentials, ProfileService, SourceStatus};
use std::collections::HashMap;
use std::time::Duration;

struct TestConfig {
    github_api_base: String,
    bitbucket_api_base: String,
    github_token: Option<String>,
    timeout_seconds: u64,
}

impl TestConfig {
    fn new(server: &MockServer) -> Self {
        Self {
            github_api_base: server.url("/github"),
            bitbucket_api_base: server.url("/bitbucket"),
            github_token: None,
            timeout_seconds: 5,
        }
    }
}

impl ConfigProvider for TestConfig {
    fn bind_address(&self) -> &str {
        "127.0.0.1:0"
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
        None
    }

    fn bitbucket_password(&self) -> Option<&str> {
        None
    }

    fn bitbucket_send_credentials(&self) -> bool {
        false
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn concurrent_requests(&self) -> usize {
        4
    }

    fn user_agent(&self) -> &str {
        "org-profiles-test"
    }
}

fn mock_github_success(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/github/orgs/mailchimp");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"watchers": 100}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/github/orgs/mailchimp/repos");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {
                    "private": false,
                    "fork": false,
                    "languages_url": server.url("/github/repos/mailchimp/repo1/languages"),
                    "topics": ["api"]
                }
            ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/github/repos/mailchimp/repo1/languages");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"Python": 1000}));
    });
}

fn mock_bitbucket_success(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/bitbucket/repositories/mailchimp");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "values": [{"is_private": false, "language": "JavaScript", "name": "repo2"}]
            }));
    });
}

#[tokio::test]
async fn test_get_profiles_success() {
    let server = MockServer::start();
    mock_github_success(&server);
    mock_bitbucket_success(&server);

    let service = ProfileService::from_config(&TestConfig::new(&server)).unwrap();
    let report = service.get_profiles("mailchimp", "mailchimp").await;

    assert_eq!(
        report.data,
        AggregateSummary {
            total_public_repos: 2,
            total_forked_repos: 0,
            total_watchers: 100,
            languages: HashMap::from([
                ("Python".to_string(), 1000),
                ("JavaScript".to_string(), 1)
            ]),
            topics: HashMap::from([("api".to_string(), 1)]),
        }
    );
    assert_eq!(
        report.sources,
        SourceStatus {
            github: true,
            bitbucket: true
        }
    );
}

#[tokio::test]
async fn test_get_profiles_both_sources_fail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/github/orgs/mailchimp");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/bitbucket/repositories/mailchimp");
        then.status(401)
            .json_body(serde_json::json!({"error": "Unauthorized"}));
    });

    let service = ProfileService::from_config(&TestConfig::new(&server)).unwrap();
    let report = service.get_profiles("mailchimp", "mailchimp").await;

    assert_eq!(report.data, AggregateSummary::default());
    assert_eq!(
        report.sources,
        SourceStatus {
            github: false,
            bitbucket: false
        }
    );
}

#[tokio::test]
async fn test_get_profiles_partial_failure() {
    let server = MockServer::start();
    mock_github_success(&server);
    server.mock(|when, then| {
        when.method(GET).path("/bitbucket/repositories/mailchimp");
        then.status(200).body("{\"values\": [");
    });

    let service = ProfileService::from_config(&TestConfig::new(&server)).unwrap();
    let report = service.get_profiles("mailchimp", "mailchimp").await;

    assert!(report.sources.github);
    assert!(!report.sources.bitbucket);
    assert_eq!(report.data.total_public_repos, 1);
    assert_eq!(report.data.total_watchers, 100);
    assert_eq!(report.data.languages.get("JavaScript"), None);
}

#[tokio::test]
async fn test_explicit_credentials_are_used() {
    let server = MockServer::start();
    let org_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/github/orgs/acme")
            .header("authorization", "token per_request_token");
        then.status(200).json_body(serde_json::json!({"watchers": 3}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/github/orgs/acme/repos")
            .header("authorization", "token per_request_token");
        then.status(200).json_body(serde_json::json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/bitbucket/repositories/acme");
        then.status(200).json_body(serde_json::json!({"values": []}));
    });

    let mut config = TestConfig::new(&server);
    config.github_token = Some("config_token".to_string());
    let credentials = Credentials {
        github_token: Some("per_request_token".to_string()),
        ..Default::default()
    };

    let service = ProfileService::with_credentials(&config, &credentials).unwrap();
    let report = service.get_profiles("acme", "acme").await;

    org_mock.assert();
    assert!(report.sources.github);
    assert!(report.sources.bitbucket);
    assert_eq!(report.data.total_watchers, 3);
}

#[tokio::test]
async fn test_slow_github_org_times_out_as_source_failure() {
    let server = MockServer::start();
    let org_mock = server.mock(|when, then| {
        when.method(GET).path("/github/orgs/mailchimp");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({"watchers": 100}));
    });
    let repos_mock = server.mock(|when, then| {
        when.method(GET).path("/github/orgs/mailchimp/repos");
        then.status(200).json_body(serde_json::json!([]));
    });
    mock_bitbucket_success(&server);

    let mut config = TestConfig::new(&server);
    config.timeout_seconds = 1;
    let service = ProfileService::from_config(&config).unwrap();
    let report = service.get_profiles("mailchimp", "mailchimp").await;

    org_mock.assert();
    assert_eq!(repos_mock.hits(), 0);
    assert_eq!(
        report.sources,
        SourceStatus {
            github: false,
            bitbucket: true
        }
    );
    assert_eq!(report.data.total_public_repos, 1);
    assert_eq!(report.data.total_watchers, 0);
    assert_eq!(
        report.data.languages,
        HashMap::from([("JavaScript".to_string(), 1)])
    );
}
