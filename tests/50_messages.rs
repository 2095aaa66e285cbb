mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{contact_message, TestServer};

async fn submit(server: &TestServer, body: &Value) -> Result<reqwest::Response> {
    Ok(server
        .client
        .post(server.url("/messages"))
        .json(body)
        .send()
        .await?)
}

async fn inbox(server: &TestServer) -> Result<Value> {
    Ok(server
        .client
        .get(server.url("/messages"))
        .bearer_auth(server.token())
        .send()
        .await?
        .json()
        .await?)
}

#[tokio::test]
async fn contact_form_applies_defaults() -> Result<()> {
    let server = TestServer::start().await?;

    let res = submit(&server, &contact_message()).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Message created successfully");

    let data = &body["data"];
    assert_eq!(data["interest"], "other");
    assert_eq!(data["isRead"], false);
    assert_eq!(data["location"], "Lavasa");
    assert!(data["createdAt"].is_string());

    let messages = inbox(&server).await?;
    assert_eq!(messages.as_array().map(Vec::len), Some(1));
    assert_eq!(messages[0]["email"], "rahul@example.com");
    Ok(())
}

#[tokio::test]
async fn submitted_read_flag_is_ignored() -> Result<()> {
    let server = TestServer::start().await?;
    let mut body = contact_message();
    body["isRead"] = json!(true);
    body["interest"] = json!("farm land");

    let created: Value = submit(&server, &body).await?.json().await?;
    assert_eq!(created["data"]["isRead"], false);
    assert_eq!(created["data"]["interest"], "farm land");
    Ok(())
}

#[tokio::test]
async fn invalid_email_is_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    let mut body = contact_message();
    body["email"] = json!("rahul-at-example");

    let res = submit(&server, &body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Invalid message data");
    assert_eq!(body["errors"][0]["path"], "email");

    assert_eq!(inbox(&server).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn read_status_toggles() -> Result<()> {
    let server = TestServer::start().await?;
    let created: Value = submit(&server, &contact_message()).await?.json().await?;
    let path = format!("/messages/{}/read", created["data"]["id"]);

    let res = server.put_json(&path, &json!({ "isRead": true })).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["isRead"], true);
    assert_eq!(updated["createdAt"], created["data"]["createdAt"]);

    let updated: Value = server
        .put_json(&path, &json!({ "isRead": false }))
        .await?
        .json()
        .await?;
    assert_eq!(updated["isRead"], false);
    Ok(())
}

#[tokio::test]
async fn read_status_must_be_boolean() -> Result<()> {
    let server = TestServer::start().await?;
    let created: Value = submit(&server, &contact_message()).await?.json().await?;
    let path = format!("/messages/{}/read", created["data"]["id"]);

    let res = server.put_json(&path, &json!({ "isRead": "yes" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "isRead field must be a boolean");

    let res = server.put_json("/messages/42/read", &json!({ "isRead": true })).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn single_message_and_delete() -> Result<()> {
    let server = TestServer::start().await?;
    let created: Value = submit(&server, &contact_message()).await?.json().await?;
    let path = format!("/messages/{}", created["data"]["id"]);

    let res = server
        .client
        .get(server.url(&path))
        .bearer_auth(server.token())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, created["data"]);

    // Reading a message is admin-only
    let res = server.client.get(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.delete(&path).await?;
    assert_eq!(res.json::<Value>().await?, json!({ "success": true }));
    assert_eq!(server.delete(&path).await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn inbox_mutations_without_token_change_nothing() -> Result<()> {
    let server = TestServer::start().await?;
    let created: Value = submit(&server, &contact_message()).await?.json().await?;
    let path = format!("/messages/{}", created["data"]["id"]);

    let res = server
        .client
        .put(server.url(&format!("{}/read", path)))
        .json(&json!({ "isRead": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.client.delete(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.client.get(server.url("/messages")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let messages = inbox(&server).await?;
    assert_eq!(messages.as_array().map(Vec::len), Some(1));
    assert_eq!(messages[0], created["data"]);
    assert_eq!(messages[0]["isRead"], false);
    Ok(())
}
