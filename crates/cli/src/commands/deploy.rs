use anyhow::{Context, Result};
use folio_relay_core::{Config, DeployError, DeployRequest};
use folio_relay_deployer::{DeployOrchestrator, NetlifyClient};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load configuration and build an orchestrator backed by Netlify
fn orchestrator(config_path: Option<&Path>) -> Result<DeployOrchestrator> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    if !config.has_token() {
        anyhow::bail!(
            "No Netlify token configured.\nSet NETLIFY_TOKEN or add [netlify] token to folio-relay.toml"
        );
    }

    let client = NetlifyClient::new(&config.netlify).context("Failed to build Netlify client")?;
    Ok(DeployOrchestrator::new(Arc::new(client), config.deploy))
}

/// Publish a local HTML file as a fresh Netlify site
pub async fn publish(
    username: String,
    file: PathBuf,
    decode_escapes: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    println!("🚀 Publishing portfolio to Netlify...\n");

    let html = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    println!("📋 Deployment Plan:");
    println!("   User: {}", username);
    println!("   File: {} ({} bytes)", file.display(), html.len());
    if decode_escapes {
        println!("   Decoding escaped HTML");
    }
    println!();

    let deployer = orchestrator(config_path.as_deref())?;

    let mut request = DeployRequest::new(username, html);
    if decode_escapes {
        request = request.with_decode_escapes(true);
    }

    match deployer.deploy(request).await {
        Ok(outcome) => {
            println!("✅ Deployment complete!");
            println!("   Site: {} ({})", outcome.site_name, outcome.site_id);
            println!("   Deploy: {}", outcome.deploy_id);
            println!("   Live URL: {}", outcome.url);
            Ok(())
        }
        Err(DeployError::Upload { status, body }) => {
            anyhow::bail!("Upload failed ({}): {}", status, body)
        }
        Err(e) => Err(e).context("Deployment failed"),
    }
}

/// Delete a site from Netlify
pub async fn teardown(site_id: String, force: bool, config_path: Option<PathBuf>) -> Result<()> {
    println!("🗑️  Tearing down Netlify site...\n");

    println!("⚠️  WARNING: This will permanently delete:");
    println!("   Site: {}", site_id);
    println!("   All deployments and history");
    println!();

    let deployer = orchestrator(config_path.as_deref())?;

    // Confirmation prompt
    if !force {
        println!("⚠️  Type the site id to confirm deletion:");
        print!("   > ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim() != site_id {
            println!("❌ Site id doesn't match. Teardown cancelled.");
            return Ok(());
        }
    }

    deployer
        .teardown(&site_id)
        .await
        .context("Failed to delete site")?;

    println!("✅ Teardown complete!");
    println!("   Site {} has been deleted", site_id);

    Ok(())
}
