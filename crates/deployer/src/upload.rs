use crate::{HostingProvider, ProviderError};
use folio_relay_core::{DeployError, DeployOutcome, DeployRecord, Result, SiteRecord};
use tracing::info;

/// Upload an archive as a new deployment of `site`.
///
/// A non-success response becomes `DeployError::Upload` carrying the
/// provider's body verbatim.
pub async fn dispatch_upload(
    provider: &dyn HostingProvider,
    site: &SiteRecord,
    archive: Vec<u8>,
) -> Result<DeployOutcome> {
    let size = archive.len();
    let deploy = provider
        .upload_deploy(&site.id, archive)
        .await
        .map_err(|e| match e {
            ProviderError::Status { status, body } => DeployError::Upload { status, body },
            other => DeployError::Unexpected(format!("Upload request failed: {}", other)),
        })?;

    info!(site_id = %site.id, deploy_id = %deploy.id, bytes = size, "Deployment uploaded");

    Ok(DeployOutcome {
        url: public_url(site, &deploy, provider.default_domain()),
        site_id: site.id.clone(),
        deploy_id: deploy.id,
        ssl_url: site.ssl_url.clone(),
        site_name: site.name.clone(),
    })
}

/// Public URL for a deployed site, preferring HTTPS
fn public_url(site: &SiteRecord, deploy: &DeployRecord, domain: &str) -> String {
    site.ssl_url
        .clone()
        .or_else(|| site.url.clone())
        .or_else(|| deploy.ssl_url.clone())
        .unwrap_or_else(|| format!("https://{}.{}", site.name, domain))
}
