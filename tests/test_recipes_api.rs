//! End-to-end HTTP tests: the router is served on an ephemeral port backed by an
//! in-memory SQLite store and driven with reqwest.

use reqwest::StatusCode;
use recipe_share::{transport, Recipe, RecipeService, RecipeStore, SqliteRecipeStore};
use serde_json::{json, Value};
use std::sync::Arc;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(seed: &[Recipe]) -> Result<Self, Box<dyn std::error::Error>> {
        let store = SqliteRecipeStore::in_memory().await?;
        for r in seed {
            store.insert(r).await?;
        }

        let state = transport::http::AppState {
            recipes: RecipeService::new(Arc::new(store)),
        };
        let router = transport::http::create_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: format!("http://{}", addr),
            client,
            handle,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn seed_salad_and_curry() -> Vec<Recipe> {
    vec![
        Recipe {
            title: "Vegan Salad".into(),
            dietary_tags: Some("vegan,healthy".into()),
            ..Default::default()
        },
        Recipe {
            title: "Chicken Curry".into(),
            dietary_tags: Some("meat,spicy".into()),
            ..Default::default()
        },
    ]
}

#[tokio::test]
async fn list_returns_all_recipes_without_tag() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&seed_salad_and_curry()).await?;

    let resp = server.client.get(server.url("/api/recipes")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Vec<Recipe> = resp.json().await?;
    assert_eq!(body.len(), 2);
    Ok(())
}

#[tokio::test]
async fn list_filters_by_tag() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&seed_salad_and_curry()).await?;

    let body: Value = server
        .client
        .get(server.url("/api/recipes"))
        .query(&[("tag", "vegan")])
        .send()
        .await?
        .json()
        .await?;
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["title"], "Vegan Salad");
    assert_eq!(items[0]["dietaryTags"], "vegan,healthy");

    let none: Vec<Recipe> = server
        .client
        .get(server.url("/api/recipes?tag=keto"))
        .send()
        .await?
        .json()
        .await?;
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn get_missing_recipe_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[]).await?;

    let resp = server.client.get(server.url("/api/recipes/99")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn post_creates_recipe_with_location_header() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[]).await?;

    let resp = server
        .client
        .post(server.url("/api/recipes"))
        .json(&json!({ "id": 1, "title": "New Recipe", "cookingTime": 25 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("Location header");
    let created: Recipe = resp.json().await?;
    assert_eq!(created.title, "New Recipe");
    assert_eq!(created.cooking_time, 25);
    assert_eq!(created.ingredients, "");
    assert_eq!(location, format!("/api/recipes/{}", created.id));

    let fetched: Recipe = server.client.get(server.url(&location)).send().await?.json().await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn post_with_malformed_body_is_422() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[]).await?;

    let resp = server
        .client
        .post(server.url("/api/recipes"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"title\": 5}")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn put_replaces_recipe() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[Recipe {
        title: "Old Title".into(),
        ..Default::default()
    }])
    .await?;

    let resp = server
        .client
        .put(server.url("/api/recipes/1"))
        .json(&json!({ "id": 1, "title": "Updated Title" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.text().await?.is_empty());

    let fetched: Recipe = server.client.get(server.url("/api/recipes/1")).send().await?.json().await?;
    assert_eq!(fetched.title, "Updated Title");
    Ok(())
}

#[tokio::test]
async fn put_with_id_mismatch_is_400_and_leaves_store_alone() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[Recipe {
        title: "Original".into(),
        ..Default::default()
    }])
    .await?;

    let resp = server
        .client
        .put(server.url("/api/recipes/2"))
        .json(&json!({ "id": 1, "title": "Test" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let fetched: Recipe = server.client.get(server.url("/api/recipes/1")).send().await?.json().await?;
    assert_eq!(fetched.title, "Original");
    Ok(())
}

#[tokio::test]
async fn put_missing_recipe_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[]).await?;

    let resp = server
        .client
        .put(server.url("/api/recipes/3"))
        .json(&json!({ "id": 3, "title": "Ghost" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_removes_recipe() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[Recipe {
        title: "Doomed".into(),
        ..Default::default()
    }])
    .await?;

    let resp = server.client.delete(server.url("/api/recipes/1")).send().await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = server.client.get(server.url("/api/recipes/1")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = server.client.delete(server.url("/api/recipes/1")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start(&[]).await?;

    let resp = server.client.get(server.url("/health")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}
