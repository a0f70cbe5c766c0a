//! Passthrough client for the external headless CMS.
//!
//! A minority of public pages render CMS-hosted content; this service only
//! proxies those reads. The CMS is a black box: anything other than a clean
//! JSON response maps to a gateway error.

use serde_json::Value;
use std::sync::Arc;

use crate::config::CmsConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct CmsClient {
    inner: Option<Arc<Inner>>,
}

struct Inner {
    base_url: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl CmsClient {
    pub fn from_config(config: &CmsConfig) -> Self {
        let inner = config.base_url.as_ref().map(|base_url| {
            Arc::new(Inner {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_token: config.api_token.clone(),
                client: reqwest::Client::new(),
            })
        });

        Self { inner }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn fetch(&self, path: &str, query: Option<&str>) -> Result<Value, ApiError> {
        let inner = self
            .inner
            .as_ref()
            .ok_or_else(|| ApiError::service_unavailable("CMS is not configured"))?;

        let mut url = format!("{}/{}", inner.base_url, path.trim_start_matches('/'));
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }

        let mut request = inner.client.get(&url);
        if let Some(token) = &inner.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("CMS request to {} failed: {}", url, e);
            ApiError::bad_gateway("CMS request failed")
        })?;

        if !response.status().is_success() {
            return Err(ApiError::bad_gateway(format!(
                "CMS responded with status {}",
                response.status()
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            tracing::error!("CMS returned invalid JSON from {}: {}", url, e);
            ApiError::bad_gateway("CMS returned invalid JSON")
        })
    }
}
