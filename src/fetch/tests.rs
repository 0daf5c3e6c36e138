// Fetch module tests.

use httptest::{matchers::*, responders::*, Expectation, Server};
use reqwest::Client;
use url::Url;

use super::*;

fn origin_of(server: &Server) -> Url {
    Url::parse(&server.url("/").to_string()).expect("mock server URL should parse")
}

#[test]
fn test_resolve_joins_absolute_path() {
    let origin = Url::parse("https://halal-guard.centonk.my.id").unwrap();
    let url = resolve(&origin, "/api/transactions").unwrap();
    assert_eq!(url.as_str(), "https://halal-guard.centonk.my.id/api/transactions");
}

#[test]
fn test_resolve_ignores_origin_path() {
    // Asset paths are absolute, so they replace whatever path the origin carries
    let origin = Url::parse("https://example.com/app/").unwrap();
    let url = resolve(&origin, "/assets/app-123.js").unwrap();
    assert_eq!(url.as_str(), "https://example.com/assets/app-123.js");
}

#[tokio::test]
async fn test_fetch_page_success() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .body("<html><div id=\"root\"></div></html>"),
        ),
    );

    let page = fetch_page(&Client::new(), &origin_of(&server), "/")
        .await
        .expect("fetch should succeed");
    assert_eq!(page.status, 200);
    assert_eq!(page.content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert_eq!(page.byte_len(), page.body.len());
    assert!(page.body.contains("root"));
}

#[tokio::test]
async fn test_fetch_page_missing_content_type() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/plain"))
            .respond_with(status_code(200).body("ok")),
    );

    let page = fetch_page(&Client::new(), &origin_of(&server), "/plain")
        .await
        .expect("fetch should succeed");
    assert_eq!(page.body, "ok");
}

#[tokio::test]
async fn test_fetch_page_error_status_is_failure() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/transactions"))
            .respond_with(status_code(502)),
    );

    let err = fetch_page(&Client::new(), &origin_of(&server), "/api/transactions")
        .await
        .expect_err("502 should be an error");
    match err {
        ProbeError::Request(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(502)),
        other => panic!("expected a request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_timeout() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/slow")).respond_with(delay_and_then(
            std::time::Duration::from_secs(2),
            status_code(200),
        )),
    );

    let client = Client::builder()
        .timeout(std::time::Duration::from_millis(200))
        .build()
        .unwrap();
    let err = fetch_page(&client, &origin_of(&server), "/slow")
        .await
        .expect_err("request should time out");
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_locate_bundle_found() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200).body(r#"<script type="module" src="/assets/index-abc.js"></script>"#),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/assets/index-abc.js"))
            .respond_with(status_code(200).body("fetch('https://halal-guard.centonk.my.id/api')")),
    );

    let lookup = locate_bundle(&Client::new(), &origin_of(&server))
        .await
        .expect("lookup should succeed");
    match lookup {
        BundleLookup::Found(bundle) => {
            assert_eq!(bundle.path, "/assets/index-abc.js");
            assert!(bundle.page.body.contains("/api"));
        }
        BundleLookup::NotFound => panic!("bundle should be found"),
    }
}

#[tokio::test]
async fn test_locate_bundle_not_found_skips_fetch() {
    let server = Server::run();
    // Only the homepage is expected; any bundle request would fail the server's verification
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(1)
            .respond_with(status_code(200).body("<html><body>no scripts</body></html>")),
    );

    let lookup = locate_bundle(&Client::new(), &origin_of(&server))
        .await
        .expect("lookup should succeed");
    assert!(matches!(lookup, BundleLookup::NotFound));
}

#[tokio::test]
async fn test_locate_bundle_missing_asset_is_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(200).body(r#"<script src="/assets/gone.js"></script>"#)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/assets/gone.js"))
            .respond_with(status_code(404)),
    );

    let result = locate_bundle(&Client::new(), &origin_of(&server)).await;
    assert!(result.is_err());
}
