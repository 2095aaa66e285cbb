#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use nainaland_api::auth::provision_admin;
use nainaland_api::config::AppConfig;
use nainaland_api::database::{MemoryStorage, Storage};
use nainaland_api::{app, AppState};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// The real router served on a free local port over a fresh in-memory store.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryStorage>,
    state: AppState,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryStorage::new());
        let storage: Arc<dyn Storage> = store.clone();
        let state = AppState::new(AppConfig::development(), storage);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let router = app(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            store,
            state,
        })
    }

    /// Like `start`, with the admin account provisioned for login tests.
    pub async fn with_admin() -> Result<Self> {
        let server = Self::start().await?;
        provision_admin(server.state.storage.clone(), ADMIN_USERNAME, ADMIN_PASSWORD).await?;
        Ok(server)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// A valid bearer token without going through login.
    pub fn token(&self) -> String {
        self.state.tokens.issue_token(1).expect("token signing")
    }

    pub fn token_issued_at(&self, issued_at: DateTime<Utc>) -> String {
        self.state
            .tokens
            .issue_token_at(1, issued_at)
            .expect("token signing")
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(self.token())
            .json(body)
            .send()
            .await?)
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(self.token())
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(self.token())
            .send()
            .await?)
    }
}

pub fn property(title: &str, price: Value) -> Value {
    json!({
        "title": title,
        "description": "Clear title, road touch, electricity available",
        "price": price,
        "location": "Mulshi, Pune",
        "size": 10,
        "propertyType": "Plot"
    })
}

pub fn blog_post(title: &str) -> Value {
    json!({
        "title": title,
        "content": "Check the 7/12 extract before anything else.",
        "excerpt": "What to verify before buying agricultural land.",
        "author": "Naina Land",
        "image": "/images/blog/land.jpg"
    })
}

pub fn contact_message() -> Value {
    json!({
        "name": "Rahul K",
        "email": "rahul@example.com",
        "phone": "9876543210",
        "location": "Lavasa",
        "message": "Interested in the 10 guntha plot."
    })
}

pub fn testimonial(rating: Value) -> Value {
    json!({
        "name": "Sunita P.",
        "location": "Hadapsar",
        "message": "Smooth registration and honest pricing.",
        "rating": rating
    })
}
