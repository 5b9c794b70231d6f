use serde::{Deserialize, Serialize};

/// A client's request to publish one HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Tenant identifier, used only to derive the site name
    pub username: String,
    pub html: String,
    /// Per-request override of `deploy.decode_escaped_html`
    pub decode_escapes: Option<bool>,
}

impl DeployRequest {
    pub fn new(username: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            html: html.into(),
            decode_escapes: None,
        }
    }

    pub fn with_decode_escapes(mut self, decode: bool) -> Self {
        self.decode_escapes = Some(decode);
        self
    }
}

/// Site as reported by the hosting provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_url: Option<String>,
}

/// Deployment as reported by the hosting provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_url: Option<String>,
}

/// Result of a successful deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployOutcome {
    pub url: String,
    pub site_id: String,
    pub deploy_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_url: Option<String>,
    #[serde(skip)]
    pub site_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_record_tolerates_missing_id() {
        let site: SiteRecord = serde_json::from_str(r#"{"name":"taken"}"#).unwrap();
        assert!(site.id.is_empty());
        assert_eq!(site.name, "taken");
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = DeployOutcome {
            url: "https://portfolio-ada.netlify.app".into(),
            site_id: "s1".into(),
            deploy_id: "d1".into(),
            ssl_url: None,
            site_name: "portfolio-ada".into(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["siteId"], "s1");
        assert_eq!(value["deployId"], "d1");
        assert!(value.get("sslUrl").is_none());
        assert!(value.get("siteName").is_none());
    }
}
