// Deployment pipeline: provision a site, package the HTML, upload it

pub mod archive;
pub mod netlify;
pub mod orchestrator;
pub mod provision;
pub mod upload;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use folio_relay_core::{DeployRecord, SiteRecord};
use thiserror::Error;

pub use archive::build_archive;
pub use netlify::NetlifyClient;
pub use orchestrator::DeployOrchestrator;
pub use provision::provision_site;
pub use upload::dispatch_upload;

/// Errors surfaced by a hosting provider client
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("No API token configured")]
    MissingToken,

    #[error("Configured API token is not a valid HTTP header value")]
    InvalidToken,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Outcome of a single site-creation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateSite {
    Created(SiteRecord),
    /// The requested name is already in use
    NameTaken,
}

/// Hosting platform operations the pipeline depends on
#[async_trait]
pub trait HostingProvider: Send + Sync {
    async fn create_site(&self, name: &str) -> Result<CreateSite, ProviderError>;

    async fn upload_deploy(
        &self,
        site_id: &str,
        archive: Vec<u8>,
    ) -> Result<DeployRecord, ProviderError>;

    async fn delete_site(&self, site_id: &str) -> Result<(), ProviderError>;

    /// Hostname suffix for sites that report no URL
    fn default_domain(&self) -> &str {
        "netlify.app"
    }
}
