//! Integration tests for the articles endpoints against a mock server.

use std::error::Error as _;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordsmith_client::{ErrorKind, WordsmithClient};

fn client_for(server: &MockServer) -> WordsmithClient {
    WordsmithClient::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap()
}

/// Mount a catch-all that fails verification if any request arrives.
async fn expect_no_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

// ─────────────────────────────────────────────────────────────────────────────
// Input validation
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_blank_keyword_sends_nothing() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let client = client_for(&server);

    for keyword in ["", "   ", "\t\n"] {
        let err = client.generate_article(keyword, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status_code(), None);
    }
}

#[tokio::test]
async fn test_blank_article_id_sends_nothing() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let client = client_for(&server);

    for id in ["", "  "] {
        let err = client.get_article(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Successful exchanges
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_generate_sends_trimmed_keyword_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/articles"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(header(
            "user-agent",
            format!("wordsmith-client/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .and(body_json(json!({"target_keyword": "artificial intelligence"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Article generation started",
            "article_ids": ["art_1", "art_2"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .generate_article("  artificial intelligence  ", None)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, "Article generation started");
    assert!(response.has_article_ids());
    assert_eq!(response.first_article_id(), Some("art_1"));
    assert_eq!(response.all_article_ids(), ["art_1", "art_2"]);
    assert!(response.article_id.is_none());
    assert!(response.error_code.is_none());
}

#[tokio::test]
async fn test_generate_includes_project_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/articles"))
        .and(body_json(json!({
            "target_keyword": "rust",
            "project_name": "Engineering Blog"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "queued",
            "article_id": "art_9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .articles()
        .generate("rust", Some("Engineering Blog"))
        .await
        .unwrap();

    assert!(!response.has_article_ids());
    assert_eq!(response.first_article_id(), Some("art_9"));
}

#[tokio::test]
async fn test_get_article_completed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/abc"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "article": {
                "id": "abc",
                "status": "completed",
                "progress": 100,
                "target_keyword": "x"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).get_article("abc").await.unwrap();
    let article = response.article.unwrap();

    assert_eq!(article.id, "abc");
    assert_eq!(article.progress, 100);
    assert_eq!(article.target_keyword, "x");
    assert!(article.is_completed());
    assert!(!article.has_failed());
    assert!(!article.is_in_progress());
    assert!(article.title.is_none());
    assert!(article.content.is_none());
}

#[tokio::test]
async fn test_article_id_stays_in_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(4)
        .mount(&server)
        .await;
    let client = client_for(&server);

    for id in ["abc?x=1", "abc#frag", "../projects", "a/b"] {
        client.get_article(id).await.unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        [
            "/api/articles/abc%3Fx=1",
            "/api/articles/abc%23frag",
            "/api/articles/..%2Fprojects",
            "/api/articles/a%2Fb",
        ]
    );
    for request in &requests {
        assert_eq!(request.url.path_segments().unwrap().count(), 3);
        assert!(request.url.query().is_none());
    }
}

#[tokio::test]
async fn test_dot_article_ids_send_nothing() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let client = client_for(&server);

    for id in [".", ".."] {
        let err = client.get_article(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[tokio::test]
async fn test_get_article_round_trips_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/art_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "article": {
                "id": "art_7",
                "title": "Intro to Rust",
                "content": "Rust is a systems language.",
                "status": "processing",
                "progress": 42,
                "target_keyword": "rust",
                "project_name": "blog",
                "created_at": "2024-03-01T10:00:00Z",
                "updated_at": "2024-03-01T10:05:30Z"
            }
        })))
        .mount(&server)
        .await;

    let article = client_for(&server)
        .get_article("art_7")
        .await
        .unwrap()
        .article
        .unwrap();

    assert_eq!(article.title.as_deref(), Some("Intro to Rust"));
    assert_eq!(article.content.as_deref(), Some("Rust is a systems language."));
    assert_eq!(article.progress, 42);
    assert_eq!(article.project_name.as_deref(), Some("blog"));
    assert!(article.is_in_progress());
    assert_eq!(
        article.updated_at.unwrap().to_rfc3339(),
        "2024-03-01T10:05:30+00:00"
    );
}

#[tokio::test]
async fn test_get_article_not_found_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let response = client_for(&server).get_article("missing").await.unwrap();
    assert!(response.article.is_none());
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/articles/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = WordsmithClient::builder()
        .api_key("test-key")
        .base_url(format!("{}/v2", server.uri()))
        .build()
        .unwrap();

    client.get_article("abc").await.unwrap();
}

#[tokio::test]
async fn test_concurrent_requests_on_one_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cloned = client.clone();
    let articles = client.articles();
    let (a, b, c, d) = tokio::join!(
        client.get_article("a"),
        client.get_article("b"),
        cloned.get_article("c"),
        articles.get("d"),
    );
    for result in [a, b, c, d] {
        assert!(result.unwrap().article.is_none());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Status classification
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_401_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_article("rust", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status_code(), Some(401));
    assert!(err.is_auth_error());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_429_carries_retry_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3.5"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_article("abc").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.message(), "Rate limit exceeded");
    assert_eq!(err.retry_after(), Some(Duration::from_secs_f64(3.5)));
}

#[tokio::test]
async fn test_429_without_header_has_no_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server).get_article("abc").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.retry_after(), None);
}

#[tokio::test]
async fn test_4xx_uses_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "bad input"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_article("rust", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "bad input");
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_4xx_without_json_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_article("nope").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "Client error");
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_5xx_uses_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_article("abc").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "db down");
    assert_eq!(err.status_code(), Some(503));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_5xx_empty_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).get_article("abc").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "Server error");
}

#[tokio::test]
async fn test_undecodable_success_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_article("rust", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), Some(200));
    assert!(err.message().starts_with("Failed to decode response"));
}

#[tokio::test]
async fn test_unexpected_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let err = client_for(&server).get_article("abc").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.message(), "Unexpected status code: 304");
}

// ─────────────────────────────────────────────────────────────────────────────
// Transport failures
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then release a port so nothing is listening on it.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = WordsmithClient::builder()
        .api_key("test-key")
        .base_url(uri)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client.get_article("abc").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().starts_with("Network error:"));
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = WordsmithClient::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client.get_article("slow").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.source().is_some());
}
