//! Single resource fetch
//!
//! One GET for a non-paged resource such as a file's content. The outcome
//! separates "found", "not found" and every other failure, and inline
//! base64 payloads are decoded on the way out.

use crate::decode::decode_content;
use crate::error::{Error, FailureKind, Result};
use crate::http::{HttpClient, RequestDescriptor};
use serde_json::Value;
use tracing::{debug, warn};

/// A successfully retrieved resource
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// The JSON body as returned by the API
    pub body: Value,
    /// Decoded `content` payload, when the body carries one
    pub content: Option<Vec<u8>>,
}

impl Resource {
    /// Decoded content as UTF-8 text
    pub fn text(&self) -> Option<Result<String>> {
        self.content.as_ref().map(|bytes| {
            String::from_utf8(bytes.clone())
                .map_err(|e| Error::decode(format!("Content is not valid UTF-8: {e}")))
        })
    }

    /// A string field of the body (e.g. `path`, `sha`)
    pub fn field(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }
}

/// Outcome of a single resource fetch
#[derive(Debug)]
pub enum ResourceOutcome {
    /// The resource exists
    Found(Resource),
    /// 404
    NotFound,
    /// Any other failure
    Failed(Error),
}

impl ResourceOutcome {
    /// Failure kind, or `None` when found
    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            Self::Found(_) => None,
            Self::NotFound => Some(FailureKind::NotFound),
            Self::Failed(e) => Some(e.kind()),
        }
    }

    /// Convert into a `Result`, turning not-found into an error
    pub fn into_result(self, what: &str) -> Result<Resource> {
        match self {
            Self::Found(resource) => Ok(resource),
            Self::NotFound => Err(Error::NotFound {
                url: what.to_string(),
                body: String::new(),
            }),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Fetch a single resource
pub async fn fetch_resource(client: &HttpClient, request: &RequestDescriptor) -> ResourceOutcome {
    let body = match client.get_json(request).await {
        Ok(body) => body,
        Err(Error::NotFound { url, body }) => {
            debug!("Resource not found: {} ({})", url, body);
            return ResourceOutcome::NotFound;
        }
        Err(e) => {
            warn!("Fetch of {} failed ({}): {}", request.url, e.kind(), e);
            return ResourceOutcome::Failed(e);
        }
    };

    match decode_content(&body) {
        Ok(content) => ResourceOutcome::Found(Resource { body, content }),
        Err(e) => {
            warn!("Could not decode content of {}: {}", request.url, e);
            ResourceOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpClient {
        HttpClient::with_config(HttpClientConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_resource_decodes_base64() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/contents/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "path": "README.md",
                "encoding": "base64",
                "content": "IyBIZWxs\nbwp3b3Js\nZAo=\n"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request =
            RequestDescriptor::new(format!("{}/repos/o/r/contents/README.md", server.uri()));
        let outcome = fetch_resource(&client(), &request).await;

        assert_eq!(outcome.failure(), None);
        let resource = outcome.into_result("README.md").unwrap();
        assert_eq!(resource.field("path"), Some("README.md"));
        assert_eq!(resource.text().unwrap().unwrap(), "# Hello\nworld\n");
    }

    #[tokio::test]
    async fn test_fetch_resource_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestDescriptor::new(format!("{}/repos/o/r/contents/nope", server.uri()));
        let outcome = fetch_resource(&client(), &request).await;

        assert!(matches!(outcome, ResourceOutcome::NotFound));
        assert_eq!(outcome.failure(), Some(FailureKind::NotFound));
        assert!(outcome.into_result("nope").is_err());
    }

    #[tokio::test]
    async fn test_fetch_resource_directory_has_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"name": "a.rs", "type": "file"}])),
            )
            .mount(&server)
            .await;

        let outcome = fetch_resource(&client(), &RequestDescriptor::new(server.uri())).await;
        match outcome {
            ResourceOutcome::Found(resource) => {
                assert!(resource.content.is_none());
                assert!(resource.text().is_none());
            }
            other => panic!("Expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_resource_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;

        let outcome = fetch_resource(&client(), &RequestDescriptor::new(server.uri())).await;
        assert_eq!(outcome.failure(), Some(FailureKind::AuthFailure));
    }

    #[tokio::test]
    async fn test_fetch_resource_transport_failure() {
        let outcome = fetch_resource(
            &client(),
            &RequestDescriptor::new("http://127.0.0.1:1/contents"),
        )
        .await;
        assert_eq!(outcome.failure(), Some(FailureKind::TransportError));
    }

    #[test]
    fn test_resource_text_rejects_invalid_utf8() {
        let resource = Resource {
            body: json!({}),
            content: Some(vec![0xff, 0xfe]),
        };
        assert!(resource.text().unwrap().is_err());
    }
}
