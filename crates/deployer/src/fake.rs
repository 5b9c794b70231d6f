// In-memory provider for pipeline tests

use crate::{CreateSite, HostingProvider, ProviderError};
use async_trait::async_trait;
use folio_relay_core::{DeployRecord, SiteRecord};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeProvider {
    /// Number of leading create calls answered with `NameTaken`
    pub collisions: usize,
    /// Status returned for every create call instead of a site
    pub create_status: Option<u16>,
    /// Status and body returned for every upload
    pub upload_failure: Option<(u16, String)>,
    pub delete_fails: bool,
    pub ssl_url: bool,

    pub create_calls: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
    pub deleted: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn create_calls(&self) -> Vec<String> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostingProvider for FakeProvider {
    async fn create_site(&self, name: &str) -> Result<CreateSite, ProviderError> {
        let mut calls = self.create_calls.lock().unwrap();
        calls.push(name.to_string());

        if let Some(status) = self.create_status {
            return Err(ProviderError::Status {
                status,
                body: "denied".to_string(),
            });
        }
        if calls.len() <= self.collisions {
            return Ok(CreateSite::NameTaken);
        }

        Ok(CreateSite::Created(SiteRecord {
            id: format!("site-{}", calls.len()),
            name: name.to_string(),
            url: Some(format!("http://{}.netlify.app", name)),
            ssl_url: self.ssl_url.then(|| format!("https://{}.netlify.app", name)),
        }))
    }

    async fn upload_deploy(
        &self,
        site_id: &str,
        archive: Vec<u8>,
    ) -> Result<DeployRecord, ProviderError> {
        self.uploads
            .lock()
            .unwrap()
            .push((site_id.to_string(), archive));

        if let Some((status, body)) = &self.upload_failure {
            return Err(ProviderError::Status {
                status: *status,
                body: body.clone(),
            });
        }

        Ok(DeployRecord {
            id: format!("deploy-for-{}", site_id),
            state: Some("uploaded".to_string()),
            ssl_url: None,
        })
    }

    async fn delete_site(&self, site_id: &str) -> Result<(), ProviderError> {
        self.deleted.lock().unwrap().push(site_id.to_string());
        if self.delete_fails {
            return Err(ProviderError::Transport("connection reset".to_string()));
        }
        Ok(())
    }
}
