//! End-to-end checks against a spawned server binary.

mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn root_responds_with_success_envelope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("success").and_then(|v| v.as_bool()).unwrap_or(false), "success flag false or missing: {}", body);
    assert!(body.get("data").is_some(), "missing data field: {}", body);

    Ok(())
}

#[tokio::test]
async fn whoami_reflects_the_identity_header() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/whoami", server.base_url))
        .header("x-user-id", "7")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["identity"]["id"], 7, "unexpected identity: {}", body);

    let res = client.get(format!("{}/api/whoami", server.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"]["identity"].is_null(), "expected anonymous identity: {}", body);

    Ok(())
}
