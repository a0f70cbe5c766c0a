mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Validation runs before any database work, so these assertions hold with or
// without a reachable database. Tests that need a real insert tolerate a
// missing database the same way the rest of the suite does.

#[tokio::test]
async fn editor_token_cannot_write_content() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(common::token_for_role("editor"))
        .json(&json!({"name": "Acme"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);

    Ok(())
}

#[tokio::test]
async fn unknown_field_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(common::token_for_role("admin"))
        .json(&json!({
            "name": "Acme",
            "category": "strategic",
            "logo": {"url": "https://cdn.example.com/acme.png"},
            "sponsorTier": "gold"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert!(
        body["error"].as_str().unwrap_or("").contains("sponsorTier"),
        "unexpected error: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn missing_required_field_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(common::token_for_role("admin"))
        .json(&json!({"name": "Acme", "category": "strategic"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn put_without_id_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(common::token_for_role("admin"))
        .json(&json!({"website": "https://acme.example"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert!(
        body["error"].as_str().unwrap_or("").contains("_id"),
        "unexpected error: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn put_with_malformed_id_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(common::token_for_role("admin"))
        .json(&json!({"_id": "not-a-uuid", "website": "https://acme.example"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn delete_requires_id_parameter() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(common::token_for_role("admin"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .delete(format!(
            "{}/api/content/partners?id=not-a-uuid",
            server.base_url
        ))
        .bearer_auth(common::token_for_role("admin"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn delete_with_absent_id_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!(
            "{}/api/content/partners?id=00000000-0000-0000-0000-000000000001",
            server.base_url
        ))
        .bearer_auth(common::token_for_role("admin"))
        .send()
        .await?;

    // 404 with a database; infrastructure error without one
    assert!(
        res.status() == StatusCode::NOT_FOUND
            || res.status() == StatusCode::INTERNAL_SERVER_ERROR
            || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status {}",
        res.status()
    );

    Ok(())
}

#[tokio::test]
async fn partner_create_then_public_read() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(common::token_for_role("admin"))
        .json(&json!({
            "name": "Acme",
            "category": "strategic",
            "logo": {"url": "https://cdn.example.com/acme.png", "alt": "Acme"},
            "order": 1,
            "isActive": true
        }))
        .send()
        .await?;

    // Without a database the insert fails with an infrastructure error;
    // with one, the full create/read contract must hold.
    if res.status() == StatusCode::INTERNAL_SERVER_ERROR
        || res.status() == StatusCode::SERVICE_UNAVAILABLE
    {
        return Ok(());
    }

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true, "unexpected body: {}", body);
    let created = &body["data"];
    assert!(created["_id"].is_string());
    assert_eq!(created["name"], "Acme");
    assert_eq!(created["isActive"], true);

    let res = client
        .get(format!("{}/api/content/partners", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    let names: Vec<&str> = body["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i["name"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert!(names.contains(&"Acme"), "created partner missing: {}", body);

    Ok(())
}

#[tokio::test]
async fn config_singleton_absence_is_null_not_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/content/site-settings", server.base_url))
        .send()
        .await?;

    if res.status() != StatusCode::OK {
        // No database in this environment
        return Ok(());
    }

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert!(
        body["data"].is_null() || body["data"].is_object(),
        "unexpected data: {}",
        body
    );

    Ok(())
}
