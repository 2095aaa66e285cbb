mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{testimonial, TestServer};

#[tokio::test]
async fn rating_bounds_are_enforced() -> Result<()> {
    let server = TestServer::start().await?;

    for rating in [1, 5] {
        let res = server.post_json("/testimonials", &testimonial(json!(rating))).await?;
        assert_eq!(res.status(), StatusCode::CREATED, "rating {}", rating);
    }

    for rating in [json!(0), json!(6), json!(4.5)] {
        let res = server.post_json("/testimonials", &testimonial(rating.clone())).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "rating {}", rating);
        let body: Value = res.json().await?;
        assert_eq!(body["message"], "Invalid testimonial data");
        assert_eq!(body["errors"][0]["path"], "rating");
    }

    let list: Value = server.get("/testimonials").await?.json().await?;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn created_testimonial_is_wrapped_and_gets_avatar() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.post_json("/testimonials", &testimonial(json!(4))).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Testimonial created successfully");
    assert_eq!(body["data"]["image"], "/images/default-avatar.png");
    assert_eq!(body["data"]["rating"], 4);

    let fetched: Value = server
        .get(&format!("/testimonials/{}", body["data"]["id"]))
        .await?
        .json()
        .await?;
    assert_eq!(fetched, body["data"]);
    Ok(())
}

#[tokio::test]
async fn testimonial_update_is_validated() -> Result<()> {
    let server = TestServer::start().await?;
    let created: Value = server
        .post_json("/testimonials", &testimonial(json!(3)))
        .await?
        .json()
        .await?;
    let path = format!("/testimonials/{}", created["data"]["id"]);

    let res = server.put_json(&path, &json!({ "rating": 9 })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let updated: Value = server.put_json(&path, &json!({ "rating": 5 })).await?.json().await?;
    assert_eq!(updated["rating"], 5);
    assert_eq!(updated["name"], "Sunita P.");

    assert_eq!(
        server.put_json("/testimonials/99", &json!({ "rating": 5 })).await?.status(),
        StatusCode::NOT_FOUND
    );
    Ok(())
}

#[tokio::test]
async fn creating_testimonial_needs_a_token() -> Result<()> {
    let server = TestServer::start().await?;
    let res = server
        .client
        .post(server.url("/testimonials"))
        .json(&testimonial(json!(5)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let list: Value = server.get("/testimonials").await?.json().await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn updating_testimonial_needs_a_token() -> Result<()> {
    let server = TestServer::start().await?;
    let created: Value = server
        .post_json("/testimonials", &testimonial(json!(3)))
        .await?
        .json()
        .await?;
    let path = format!("/testimonials/{}", created["data"]["id"]);

    let res = server
        .client
        .put(server.url(&path))
        .json(&json!({ "rating": 1, "name": "Someone else" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth("not-a-token")
        .json(&json!({ "rating": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Unauthorized: Invalid token");

    let fetched: Value = server.get(&path).await?.json().await?;
    assert_eq!(fetched, created["data"]);
    assert_eq!(fetched["rating"], 3);
    Ok(())
}
