mod common;

use anyhow::Result;
use serde_json::Value;

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let server = common::ensure_server().await?;

    let resp = reqwest::get(format!("{}/", server.base_url)).await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: Value = resp.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Jobly API");
    assert!(body["data"]["endpoints"]["companies"].is_string());
    Ok(())
}

#[tokio::test]
async fn health_reports_database_state() -> Result<()> {
    let server = common::ensure_server().await?;

    let resp = reqwest::get(format!("{}/health", server.base_url)).await?;
    let status = resp.status();
    let body: Value = resp.json().await?;

    match status {
        reqwest::StatusCode::OK => assert_eq!(body["data"]["database"], "ok"),
        reqwest::StatusCode::SERVICE_UNAVAILABLE => {
            assert_eq!(body["success"], false);
            assert_eq!(body["data"]["status"], "degraded");
        }
        other => panic!("unexpected health status {}", other),
    }
    Ok(())
}

#[tokio::test]
async fn mutation_without_token_is_rejected_over_http() -> Result<()> {
    let server = common::ensure_server().await?;

    let resp = reqwest::Client::new()
        .delete(format!("{}/companies/anything", server.base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}
