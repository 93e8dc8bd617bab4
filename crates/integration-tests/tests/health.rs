mod harness;

use fitroom_config::{AnyOrList, CorsConfig};
use harness::config::ConfigBuilder;
use harness::server::TestServer;

const UNUSED_PROVIDER: &str = "http://127.0.0.1:9/v1beta";

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = TestServer::start(ConfigBuilder::new(UNUSED_PROVIDER).build()).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let server = TestServer::start(ConfigBuilder::new(UNUSED_PROVIDER).without_health().build())
        .await
        .unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn cors_preflight_from_listed_origin() {
    let cors = CorsConfig {
        origins: AnyOrList::List(vec!["https://shop.example".to_owned()]),
        ..CorsConfig::default()
    };
    let server = TestServer::start(ConfigBuilder::new(UNUSED_PROVIDER).with_cors(cors).build())
        .await
        .unwrap();

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/generate"))
        .header("origin", "https://shop.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "https://shop.example");
}
