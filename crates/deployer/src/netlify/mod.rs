// Netlify REST API client

use crate::{CreateSite, HostingProvider, ProviderError};
use async_trait::async_trait;
use folio_relay_core::config::NetlifyConfig;
use folio_relay_core::{DeployRecord, SiteRecord};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub struct NetlifyClient {
    client: reqwest::Client,
    api_base: String,
    has_token: bool,
}

#[derive(Serialize)]
struct CreateSiteRequest<'a> {
    name: &'a str,
}

impl NetlifyClient {
    /// Create new Netlify API client
    ///
    /// Without a token the client still builds, but every call fails with
    /// `ProviderError::MissingToken` so the server can start and report it.
    pub fn new(config: &NetlifyConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ProviderError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("folio-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            has_token: config.token.is_some(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn require_token(&self) -> Result<(), ProviderError> {
        if self.has_token {
            Ok(())
        } else {
            Err(ProviderError::MissingToken)
        }
    }
}

#[async_trait]
impl HostingProvider for NetlifyClient {
    async fn create_site(&self, name: &str) -> Result<CreateSite, ProviderError> {
        self.require_token()?;

        let response = self
            .client
            .post(self.url("/sites"))
            .json(&CreateSiteRequest { name })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, name, "create site response");

        // 422 covers every validation failure; only a claimed subdomain is retryable
        if status == StatusCode::UNPROCESSABLE_ENTITY && is_name_taken(&body) {
            return Ok(CreateSite::NameTaken);
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let site: SiteRecord =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;
        if site.id.is_empty() {
            return Ok(CreateSite::NameTaken);
        }
        Ok(CreateSite::Created(site))
    }

    async fn upload_deploy(
        &self,
        site_id: &str,
        archive: Vec<u8>,
    ) -> Result<DeployRecord, ProviderError> {
        self.require_token()?;

        let response = self
            .client
            .post(self.url(&format!("/sites/{}/deploys", site_id)))
            .header(CONTENT_TYPE, "application/zip")
            .body(archive)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn delete_site(&self, site_id: &str) -> Result<(), ProviderError> {
        self.require_token()?;

        let response = self
            .client
            .delete(self.url(&format!("/sites/{}", site_id)))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(ProviderError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}

/// Whether a 422 body reports the requested name as already claimed.
///
/// ```text
/// {"errors":{"subdomain":["must be unique"]}}  → true
/// {"errors":{"name":["is invalid"]}}           → false
/// ```
fn is_name_taken(body: &str) -> bool {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return mentions_taken(body);
    };

    if let Some(errors) = value.get("errors") {
        return ["subdomain", "name"]
            .iter()
            .filter_map(|field| errors.get(field))
            .any(|messages| match messages {
                Value::Array(items) => items.iter().filter_map(Value::as_str).any(mentions_taken),
                Value::String(s) => mentions_taken(s),
                _ => false,
            });
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .is_some_and(mentions_taken)
}

fn mentions_taken(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    text.contains("unique") || text.contains("taken") || text.contains("already")
}
