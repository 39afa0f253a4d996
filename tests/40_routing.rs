mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn unbound_methods_are_405() -> Result<()> {
    let server = common::spawn_server().await?;

    for (method, path) in [
        (Method::PATCH, "/movies"),
        (Method::PUT, "/movies"),
        (Method::DELETE, "/reviews"),
        (Method::POST, "/movies/5f0c7c1e-8d4b-4c7a-9a57-0d7f3e2b1a90"),
        (Method::PATCH, "/reviews/5f0c7c1e-8d4b-4c7a-9a57-0d7f3e2b1a90"),
        (Method::GET, "/signup"),
        (Method::DELETE, "/signin"),
    ] {
        let res = server.client.request(method.clone(), server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, path);
        assert_eq!(res.json::<Value>().await?, json!({ "message": "HTTP method not supported." }));
    }
    Ok(())
}

#[tokio::test]
async fn guard_rejects_before_the_store() -> Result<()> {
    let (server, stores) = common::spawn_counting().await?;

    for (method, path) in [
        (Method::GET, "/movies"),
        (Method::POST, "/movies"),
        (Method::GET, "/movies/5f0c7c1e-8d4b-4c7a-9a57-0d7f3e2b1a90"),
        (Method::PUT, "/reviews/5f0c7c1e-8d4b-4c7a-9a57-0d7f3e2b1a90"),
        (Method::DELETE, "/reviews/5f0c7c1e-8d4b-4c7a-9a57-0d7f3e2b1a90"),
    ] {
        let res = server
            .client
            .request(method.clone(), server.url(path))
            .json(&json!({ "title": "Blocked" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, path);
    }

    assert_eq!(stores.movies.calls(), 0);
    assert_eq!(stores.reviews.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn unknown_routes_are_404() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/actors")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "success": false, "message": "Route not found" })
    );
    Ok(())
}

#[tokio::test]
async fn root_and_health_are_public() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "movie-reviews-api");

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "status": "ok", "store": "memory" }));
    Ok(())
}
