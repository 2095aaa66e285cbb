mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.get("/health").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    let stamp = body["timestamp"].as_str().unwrap_or_default();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "bad timestamp {}", stamp);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.get("/nope").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn collections_report_503_when_store_is_down() -> Result<()> {
    let server = common::TestServer::start().await?;
    server.store.set_offline(true);

    for path in ["/properties", "/blogs", "/testimonials"] {
        let res = server.get(path).await?;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE, "{}", path);
        let body: Value = res.json().await?;
        assert_eq!(body["message"], "Database connection failed");
    }

    let res = server
        .client
        .get(server.url("/messages"))
        .bearer_auth(server.token())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    server.store.set_offline(false);
    assert_eq!(server.get("/properties").await?.status(), StatusCode::OK);
    Ok(())
}
