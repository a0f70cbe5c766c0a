use anyhow::Context;

/// Probe a running server's database-backed health endpoint and print the
/// result.
pub async fn check(base_url: &str) -> anyhow::Result<()> {
    let url = format!("{}/api/health/db", base_url.trim_end_matches('/'));

    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;

    let status = response.status();
    let body = response
        .json::<serde_json::Value>()
        .await
        .context("server returned a non-JSON body")?;

    println!("{} {}", status, serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        anyhow::bail!("server reported degraded health");
    }
    Ok(())
}
