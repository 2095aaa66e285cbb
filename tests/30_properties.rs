mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{property, TestServer};

async fn create(server: &TestServer, body: &Value) -> Result<Value> {
    let res = server.post_json("/properties", body).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(res.json().await?)
}

#[tokio::test]
async fn empty_catalogue_is_an_empty_array() -> Result<()> {
    let server = TestServer::start().await?;
    let body: Value = server.get("/properties").await?.json().await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn numeric_price_round_trips_as_a_number() -> Result<()> {
    let server = TestServer::start().await?;
    let created = create(&server, &property("Plot A", json!(4500000))).await?;
    assert_eq!(created["price"], json!(4500000));

    let fetched: Value = server
        .get(&format!("/properties/{}", created["id"]))
        .await?
        .json()
        .await?;
    assert_eq!(fetched["price"], json!(4500000));
    assert_eq!(fetched["sizeUnit"], "Guntha");
    assert_eq!(fetched["isFeatured"], false);
    assert_eq!(fetched["features"], json!([]));
    assert_eq!(fetched["images"], json!([]));
    assert_eq!(fetched["videoUrl"], Value::Null);
    assert!(fetched["createdAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn label_price_round_trips_verbatim() -> Result<()> {
    let server = TestServer::start().await?;
    let created = create(&server, &property("Plot B", json!("Call for Price"))).await?;

    let fetched: Value = server
        .get(&format!("/properties/{}", created["id"]))
        .await?
        .json()
        .await?;
    assert_eq!(fetched["price"], "Call for Price");
    Ok(())
}

#[tokio::test]
async fn zero_price_is_kept_as_zero() -> Result<()> {
    let server = TestServer::start().await?;
    let created = create(&server, &property("On request", json!(0))).await?;
    assert_eq!(created["price"], json!(0));
    Ok(())
}

#[tokio::test]
async fn comma_separated_lists_are_split() -> Result<()> {
    let server = TestServer::start().await?;
    let mut body = property("Farm", json!(100));
    body["features"] = json!("Well, Fencing, ,Mango trees");
    body["images"] = json!(["/a.jpg", "/b.jpg"]);

    let created = create(&server, &body).await?;
    assert_eq!(created["features"], json!(["Well", "Fencing", "Mango trees"]));
    assert_eq!(created["images"], json!(["/a.jpg", "/b.jpg"]));
    Ok(())
}

#[tokio::test]
async fn invalid_property_lists_every_problem() -> Result<()> {
    let server = TestServer::start().await?;
    let mut body = property("", json!(""));
    body["size"] = json!(0);

    let res = server.post_json("/properties", &body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Invalid property data");
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let paths: Vec<&str> = body["errors"]
        .as_array()
        .map(|errs| errs.iter().filter_map(|e| e["path"].as_str()).collect())
        .unwrap_or_default();
    for field in ["title", "price", "size"] {
        assert!(paths.contains(&field), "missing {} in {:?}", field, paths);
    }

    let list: Value = server.get("/properties").await?.json().await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn type_filter_wins_over_featured() -> Result<()> {
    let server = TestServer::start().await?;

    let mut featured_plot = property("Featured plot", json!(1));
    featured_plot["isFeatured"] = json!(true);
    create(&server, &featured_plot).await?;

    let mut farm = property("Farm", json!(2));
    farm["propertyType"] = json!("Farm");
    create(&server, &farm).await?;

    let mut featured_farm = property("Featured farm", json!(3));
    featured_farm["propertyType"] = json!("Farm");
    featured_farm["isFeatured"] = json!(true);
    create(&server, &featured_farm).await?;

    let titles = |v: Value| -> Vec<String> {
        v.as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|p| p["title"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };

    let farms = titles(server.get("/properties?type=Farm&featured=true").await?.json().await?);
    assert_eq!(farms, vec!["Farm", "Featured farm"]);

    let featured = titles(server.get("/properties?featured=true").await?.json().await?);
    assert_eq!(featured, vec!["Featured plot", "Featured farm"]);

    let all = titles(server.get("/properties?featured=yes").await?.json().await?);
    assert_eq!(all.len(), 3);
    Ok(())
}

#[tokio::test]
async fn featured_only_update_leaves_other_fields_alone() -> Result<()> {
    let server = TestServer::start().await?;
    let mut body = property("Lake view", json!("Call for Price"));
    body["videoUrl"] = json!("https://youtu.be/abc");
    body["features"] = json!(["Lake"]);
    let created = create(&server, &body).await?;
    let path = format!("/properties/{}", created["id"]);

    let res = server.put_json(&path, &json!({ "isFeatured": true })).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;

    assert_eq!(updated["isFeatured"], true);
    for field in ["title", "price", "videoUrl", "features", "size", "createdAt"] {
        assert_eq!(updated[field], created[field], "{} changed", field);
    }
    Ok(())
}

#[tokio::test]
async fn update_of_missing_property_is_404() -> Result<()> {
    let server = TestServer::start().await?;
    let res = server.put_json("/properties/99", &json!({ "title": "x" })).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_reports_whether_anything_was_removed() -> Result<()> {
    let server = TestServer::start().await?;
    let created = create(&server, &property("Gone soon", json!(10))).await?;
    let path = format!("/properties/{}", created["id"]);

    let res = server.delete(&path).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "success": true }));

    assert_eq!(server.get(&path).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.delete(&path).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.delete("/properties/abc").await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn mutations_without_token_change_nothing() -> Result<()> {
    let server = TestServer::start().await?;
    let created = create(&server, &property("Keep me", json!(10))).await?;
    let path = format!("/properties/{}", created["id"]);

    let res = server
        .client
        .post(server.url("/properties"))
        .json(&property("Sneaky", json!(1)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .put(server.url(&path))
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.client.delete(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let list: Value = server.get("/properties").await?.json().await?;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["title"], "Keep me");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected_in_api_shape() -> Result<()> {
    let server = TestServer::start().await?;
    let res = server
        .client
        .post(server.url("/properties"))
        .bearer_auth(server.token())
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
