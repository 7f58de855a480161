//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: settings → request descriptors → paged
//! HTTP requests → accumulated items and terminal status

use repo_scout::api::{ApiClient, CommitFilter, CommitSummary, RepoRef, RepoSearch};
use repo_scout::auth::AuthConfig;
use repo_scout::decode::{ItemsLocation, MissingItems};
use repo_scout::http::{HttpClient, HttpClientConfig, RequestDescriptor};
use repo_scout::pagination::{FetchStatus, PaginatedFetcher, PaginationConfig};
use repo_scout::resource::{fetch_resource, ResourceOutcome};
use repo_scout::types::BackoffType;
use repo_scout::{FailureKind, Settings};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn numbered(start: usize, count: usize) -> Value {
    Value::Array((start..start + count).map(|id| json!({ "id": id })).collect())
}

// ============================================================================
// Generic Paginated Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_any_listing_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/members"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(numbered(0, 3)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/members"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(numbered(3, 1)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/members"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let config = PaginationConfig::new()
        .with_page_size(3)
        .with_max_pages(None);
    let request = RequestDescriptor::new(format!("{}/orgs/acme/members", server.uri()));

    let outcome = PaginatedFetcher::new(&client, config)
        .fetch_all(&request)
        .await;

    assert_eq!(outcome.status, FetchStatus::Complete);
    assert_eq!(outcome.requests, 3);
    let ids: Vec<u64> = outcome
        .items
        .iter()
        .filter_map(|item| item["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_custom_parameter_names_and_nested_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("p", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": numbered(0, 2)})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("p", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": numbered(2, 2)})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let mut config = PaginationConfig::new()
        .with_param_names("p", "limit")
        .with_page_size(2)
        .with_max_pages(Some(2))
        .with_items(ItemsLocation::field("data"));
    config.start_page = 0;

    let outcome = PaginatedFetcher::new(&client, config)
        .fetch_all(&RequestDescriptor::new(format!("{}/events", server.uri())))
        .await;

    assert_eq!(outcome.status, FetchStatus::StoppedLimit);
    assert_eq!(outcome.len(), 4);
}

#[tokio::test]
async fn test_missing_collection_policy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Validation Failed"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let request = RequestDescriptor::new(format!("{}/search/repositories", server.uri()));
    let config = PaginationConfig::new().with_items(ItemsLocation::field("items"));

    let stop = PaginatedFetcher::new(&client, config.clone())
        .fetch_all(&request)
        .await;
    assert!(!stop.is_failed());
    assert!(stop.is_empty());

    let fail = PaginatedFetcher::new(&client, config.with_on_missing(MissingItems::Fail))
        .fetch_all(&request)
        .await;
    assert_eq!(fail.status, FetchStatus::Failed(FailureKind::TransportError));
}

// ============================================================================
// Retries and Pacing
// ============================================================================

#[tokio::test]
async fn test_retry_recovers_transient_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"sha": "1111111aaaa", "commit": {"message": "first"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Settings {
        base_url: server.uri(),
        ..Default::default()
    };
    let api = settings
        .api_settings(AuthConfig::None)
        .unwrap()
        .with_pagination(PaginationConfig::new().with_max_pages(Some(1)));
    let http = HttpClientConfig::builder()
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
        .build();
    let client = ApiClient::new(api, http).unwrap();

    let outcome = client
        .list_commits(&RepoRef::new("o", "r"), &CommitFilter::default())
        .await;

    assert_eq!(outcome.status, FetchStatus::StoppedLimit);
    let commits: Vec<CommitSummary> = outcome.items_as().unwrap();
    assert_eq!(commits[0].headline(), "first");
}

#[tokio::test]
async fn test_auth_failure_is_never_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!("base_url: {}\nhttp:\n  max_retries: 3\n", server.uri());
    let settings = Settings::from_yaml_str(&yaml).unwrap();
    let api = settings
        .api_settings(settings.auth(Some("expired".to_string())))
        .unwrap();
    let client = ApiClient::new(api, settings.http_config()).unwrap();

    let outcome = client.search_repositories(&RepoSearch::new("x")).await;

    assert_eq!(outcome.status, FetchStatus::Failed(FailureKind::AuthFailure));
    assert!(outcome.is_empty());
    assert!(outcome.error.unwrap().to_string().contains("Bad credentials"));
}

#[tokio::test]
async fn test_rate_limiter_paces_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(numbered(0, 1)))
        .expect(3)
        .mount(&server)
        .await;

    let yaml = format!(
        "base_url: {}\nhttp:\n  requests_per_second: 10\npagination:\n  max_pages: 3\n",
        server.uri()
    );
    let settings = Settings::from_yaml_str(&yaml).unwrap();
    let client = HttpClient::with_config(settings.http_config()).unwrap();

    let started = std::time::Instant::now();
    let outcome = PaginatedFetcher::new(&client, settings.pagination_config())
        .fetch_all(&RequestDescriptor::new(format!("{}/items", server.uri())))
        .await;

    assert_eq!(outcome.len(), 3);
    // Burst of 10 per second, so three requests go out without waiting
    assert!(started.elapsed() < Duration::from_secs(5));
}

// ============================================================================
// Credentials
// ============================================================================

#[tokio::test]
async fn test_credentials_are_per_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/contents/a.txt"))
        .and(header("Authorization", "Bearer alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path": "a.txt", "encoding": "base64", "content": "YWxpY2UK"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/contents/a.txt"))
        .and(header("Authorization", "token bob"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Settings {
        base_url: server.uri(),
        ..Default::default()
    };
    let alice = ApiClient::new(
        settings
            .api_settings(AuthConfig::Bearer {
                token: "alice".to_string(),
            })
            .unwrap(),
        settings.http_config(),
    )
    .unwrap();
    let bob = ApiClient::new(
        settings
            .api_settings(AuthConfig::Token {
                token: "bob".to_string(),
            })
            .unwrap(),
        settings.http_config(),
    )
    .unwrap();

    let repo = RepoRef::new("o", "r");
    match alice.file_content(&repo, "a.txt", None).await {
        ResourceOutcome::Found(resource) => {
            assert_eq!(resource.text().unwrap().unwrap(), "alice\n");
        }
        other => panic!("Expected Found, got {other:?}"),
    }

    let denied = bob.file_content(&repo, "a.txt", None).await;
    assert_eq!(denied.failure(), Some(FailureKind::RateLimited));
}

// ============================================================================
// Single Resource Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_resource_without_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "o/r", "default_branch": "main"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let outcome = fetch_resource(
        &client,
        &RequestDescriptor::new(format!("{}/repos/o/r", server.uri())),
    )
    .await;

    let resource = outcome.into_result("o/r").unwrap();
    assert_eq!(resource.content, None);
    assert_eq!(resource.field("default_branch"), Some("main"));
}
