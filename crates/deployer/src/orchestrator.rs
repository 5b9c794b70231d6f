use crate::{HostingProvider, build_archive, dispatch_upload, provision_site};
use folio_relay_core::{
    DeployError, DeployOutcome, DeployRequest, DeploySettings, Result, base_site_name,
    decode_escaped_html,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one deployment end to end: provision → archive → upload.
///
/// Holds no per-request state, so a single instance is shared by every
/// request handler.
pub struct DeployOrchestrator {
    provider: Arc<dyn HostingProvider>,
    settings: DeploySettings,
}

impl DeployOrchestrator {
    pub fn new(provider: Arc<dyn HostingProvider>, settings: DeploySettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &DeploySettings {
        &self.settings
    }

    pub async fn deploy(&self, request: DeployRequest) -> Result<DeployOutcome> {
        if request.username.trim().is_empty() {
            return Err(DeployError::missing_field("username"));
        }
        if request.html.trim().is_empty() {
            return Err(DeployError::missing_field("html"));
        }

        let html = if request
            .decode_escapes
            .unwrap_or(self.settings.decode_escaped_html)
        {
            decode_escaped_html(&request.html)
        } else {
            request.html
        };

        let base = base_site_name(
            &self.settings.name_prefix,
            &request.username,
            self.settings.max_name_len,
        );
        info!(username = %request.username, base_name = %base, "Starting deployment");

        // Package first so a packaging failure never leaves a site behind
        let archive = build_archive(&html)?;
        let site = provision_site(self.provider.as_ref(), &base, self.settings.max_attempts).await?;

        match dispatch_upload(self.provider.as_ref(), &site, archive).await {
            Ok(outcome) => {
                info!(site_id = %outcome.site_id, url = %outcome.url, "Deployment complete");
                Ok(outcome)
            }
            Err(e) => {
                if self.settings.cleanup_on_failure {
                    self.remove_orphan(&site.id).await;
                } else {
                    warn!(site_id = %site.id, "Upload failed; leaving site in place");
                }
                Err(e)
            }
        }
    }

    /// Delete a site outright
    pub async fn teardown(&self, site_id: &str) -> Result<()> {
        self.provider
            .delete_site(site_id)
            .await
            .map_err(|e| DeployError::Unexpected(format!("Failed to delete site {}: {}", site_id, e)))
    }

    async fn remove_orphan(&self, site_id: &str) {
        match self.provider.delete_site(site_id).await {
            Ok(()) => info!(site_id, "Removed site after failed upload"),
            Err(e) => warn!(site_id, error = %e, "Could not remove site after failed upload"),
        }
    }
}
