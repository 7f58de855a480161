//! Tests for the CLI module

use super::*;
use crate::error::{Error, FailureKind};
use crate::resource::Resource;
use crate::types::SortOrder;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("repo-scout").chain(args.iter().copied())).unwrap()
}

fn rendered(runner: &Runner, items: &[serde_json::Value]) -> String {
    let mut out = Vec::new();
    runner
        .write_items::<crate::api::RepositorySummary>(&mut out, items)
        .unwrap();
    String::from_utf8(out).unwrap()
}

// ============================================================================
// Argument Parsing
// ============================================================================

#[test]
fn test_parse_search() {
    let cli = parse(&["search", "language:rust", "--sort", "stars", "--order", "asc"]);
    match cli.command {
        Commands::Search { query, sort, order } => {
            assert_eq!(query, "language:rust");
            assert_eq!(sort.as_deref(), Some("stars"));
            assert_eq!(order, Some(SortOrder::Asc));
        }
        other => panic!("Expected Search, got {other:?}"),
    }
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_parse_commits_with_dates() {
    let cli = parse(&[
        "commits",
        "rust-lang/rust",
        "--since",
        "2024-01-01T00:00:00Z",
        "--path",
        "src",
    ]);
    match cli.command {
        Commands::Commits {
            repo, since, path, ..
        } => {
            assert_eq!(repo, "rust-lang/rust");
            assert_eq!(path.as_deref(), Some("src"));
            assert_eq!(
                since.map(|d| d.to_rfc3339()),
                Some("2024-01-01T00:00:00+00:00".to_string())
            );
        }
        other => panic!("Expected Commits, got {other:?}"),
    }
}

#[test]
fn test_parse_content_global_flags_after_subcommand() {
    let cli = parse(&[
        "content",
        "o/r",
        "README.md",
        "--ref",
        "v1",
        "--format",
        "pretty",
        "--per-page",
        "20",
    ]);
    assert_eq!(cli.format, OutputFormat::Pretty);
    assert_eq!(cli.per_page, Some(20));
    match cli.command {
        Commands::Content { git_ref, path, .. } => {
            assert_eq!(git_ref.as_deref(), Some("v1"));
            assert_eq!(path, "README.md");
        }
        other => panic!("Expected Content, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_conflicts() {
    let args = ["repo-scout", "--max-pages", "3", "--no-page-limit", "search", "x"];
    assert!(Cli::try_parse_from(args).is_err());

    // --order only makes sense with --sort
    assert!(Cli::try_parse_from(["repo-scout", "search", "x", "--order", "asc"]).is_err());

    assert!(Cli::try_parse_from(["repo-scout", "commits", "o/r", "--since", "yesterday"]).is_err());
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_log_filter_defaults() {
    use tracing_subscriber::filter::LevelFilter;

    let quiet = parse(&["search", "x"]);
    assert_eq!(quiet.log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(quiet.log_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));

    let verbose = parse(&["--verbose", "search", "x"]);
    assert_eq!(verbose.log_filter(None).max_level_hint(), Some(LevelFilter::DEBUG));
}

#[test]
fn test_log_filter_honours_rust_log() {
    use tracing_subscriber::filter::LevelFilter;

    let cli = parse(&["search", "x"]);
    assert_eq!(
        cli.log_filter(Some("debug")).max_level_hint(),
        Some(LevelFilter::DEBUG)
    );
    assert_eq!(
        cli.log_filter(Some("trace")).max_level_hint(),
        Some(LevelFilter::TRACE)
    );
    assert_eq!(
        cli.log_filter(Some("warn")).max_level_hint(),
        Some(LevelFilter::WARN)
    );
}

// ============================================================================
// Settings Overrides
// ============================================================================

#[test]
fn test_settings_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("scout.yaml");
    std::fs::write(&file, "pagination:\n  per_page: 30\n  max_pages: 4\n").unwrap();
    let file = file.to_string_lossy().to_string();

    let runner = Runner::new(parse(&["--config", &file, "search", "x"]));
    let settings = runner.settings().unwrap();
    assert_eq!(settings.pagination.per_page, 30);
    assert_eq!(settings.pagination.max_pages, Some(4));

    let runner = Runner::new(parse(&[
        "--config",
        &file,
        "--per-page",
        "50",
        "--no-page-limit",
        "--retries",
        "2",
        "--base-url",
        "http://localhost:9999",
        "search",
        "x",
    ]));
    let settings = runner.settings().unwrap();
    assert_eq!(settings.pagination.per_page, 50);
    assert_eq!(settings.pagination.max_pages, None);
    assert_eq!(settings.http.max_retries, 2);
    assert_eq!(settings.base_url, "http://localhost:9999");
}

#[test]
fn test_settings_overrides_are_validated() {
    let runner = Runner::new(parse(&["--per-page", "0", "search", "x"]));
    assert!(matches!(
        runner.settings(),
        Err(Error::InvalidConfigValue { .. })
    ));

    let runner = Runner::new(parse(&["--max-pages", "0", "search", "x"]));
    assert!(runner.settings().is_err());
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_write_items_json_lines() {
    let runner = Runner::new(parse(&["search", "x"]));
    let items = vec![json!({"full_name": "a/b", "html_url": "u"}), json!({"x": 1})];

    assert_eq!(
        rendered(&runner, &items),
        "{\"full_name\":\"a/b\",\"html_url\":\"u\"}\n{\"x\":1}\n"
    );
}

#[test]
fn test_write_items_pretty() {
    let runner = Runner::new(parse(&["--format", "pretty", "search", "x"]));
    let items = vec![json!({
        "full_name": "a/b",
        "html_url": "u",
        "stargazers_count": 7,
        "language": "Rust"
    })];

    let text = rendered(&runner, &items);
    assert!(text.starts_with("a/b"));
    assert!(text.contains("★7"));
    assert!(text.contains("Rust"));

    // Items outside the model fall back to JSON
    let text = rendered(&runner, &[json!({"x": 1})]);
    assert!(text.contains("\"x\": 1"));
}

#[test]
fn test_write_resource() {
    let resource = Resource {
        body: json!({"path": "README.md", "content": "aGk=", "encoding": "base64"}),
        content: Some(b"hi".to_vec()),
    };

    let mut out = Vec::new();
    Runner::new(parse(&["--format", "pretty", "content", "o/r", "README.md"]))
        .write_resource(&mut out, &resource)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "hi");

    let mut out = Vec::new();
    Runner::new(parse(&["content", "o/r", "README.md"]))
        .write_resource(&mut out, &resource)
        .unwrap();
    assert!(String::from_utf8(out).unwrap().contains("\"path\":\"README.md\""));

    let directory = Resource {
        body: json!([{"path": "src/lib.rs"}]),
        content: None,
    };
    let err = Runner::new(parse(&["--format", "pretty", "content", "o/r", "src"]))
        .write_resource(&mut Vec::new(), &directory)
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn test_run_commits_surfaces_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"sha": "abc1234", "commit": {"message": "one"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API rate limit exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let runner = Runner::new(parse(&["--base-url", &uri, "--token", "t", "commits", "o/r"]));
    let err = runner.run().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::RateLimited);
}

#[tokio::test]
async fn test_run_content_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/contents/missing.md"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let runner = Runner::new(parse(&["--base-url", &uri, "content", "o/r", "missing.md"]));
    let err = runner.run().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
    assert!(err.to_string().contains("o/r:missing.md"));
}

#[tokio::test]
async fn test_run_rejects_bad_repo() {
    let runner = Runner::new(parse(&["commits", "not-a-repo"]));
    let err = runner.run().await.unwrap_err();
    assert!(err.to_string().contains("owner/name"));
}
