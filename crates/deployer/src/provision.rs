use crate::{CreateSite, HostingProvider};
use folio_relay_core::{DeployError, Result, SiteRecord, candidate_name};
use tracing::{info, warn};

/// Create a site named after `base`, retrying with `base-1`, `base-2`, ...
/// while the provider reports the name as taken.
///
/// Gives up with `NamesExhausted` after `max_attempts` collisions. Any other
/// provider failure ends the loop immediately.
pub async fn provision_site(
    provider: &dyn HostingProvider,
    base: &str,
    max_attempts: u32,
) -> Result<SiteRecord> {
    for attempt in 0..max_attempts {
        let name = candidate_name(base, attempt);

        match provider.create_site(&name).await {
            Ok(CreateSite::Created(site)) => {
                info!(site_id = %site.id, site_name = %site.name, attempt, "Site created");
                return Ok(site);
            }
            Ok(CreateSite::NameTaken) => {
                warn!(site_name = %name, attempt, "Site name taken, trying next candidate");
            }
            Err(e) => return Err(DeployError::Provision(e.to_string())),
        }
    }

    Err(DeployError::NamesExhausted {
        base: base.to_string(),
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeProvider;

    #[tokio::test]
    async fn test_first_name_free() {
        let provider = FakeProvider::default();
        let site = provision_site(&provider, "portfolio-ada", 5).await.unwrap();

        assert_eq!(site.name, "portfolio-ada");
        assert_eq!(provider.create_calls(), vec!["portfolio-ada"]);
    }

    #[tokio::test]
    async fn test_n_collisions_take_n_plus_one_calls() {
        for collisions in [1usize, 2, 4] {
            let provider = FakeProvider {
                collisions,
                ..Default::default()
            };
            let site = provision_site(&provider, "portfolio-ada", 10).await.unwrap();

            let calls = provider.create_calls();
            assert_eq!(calls.len(), collisions + 1);
            assert_eq!(calls[0], "portfolio-ada");
            assert_eq!(calls[1], "portfolio-ada-1");
            assert_eq!(site.name, format!("portfolio-ada-{}", collisions));
        }
    }

    #[tokio::test]
    async fn test_exhaustion_after_cap() {
        let provider = FakeProvider {
            collisions: usize::MAX,
            ..Default::default()
        };
        let err = provision_site(&provider, "portfolio-ada", 3)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::NamesExhausted { ref base, attempts: 3 } if base == "portfolio-ada"
        ));
        assert_eq!(
            provider.create_calls(),
            vec!["portfolio-ada", "portfolio-ada-1", "portfolio-ada-2"]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_fatal() {
        let provider = FakeProvider {
            create_status: Some(401),
            ..Default::default()
        };
        let err = provision_site(&provider, "portfolio-ada", 5)
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Provision(_)));
        assert!(err.to_string().contains("401"));
        assert_eq!(provider.create_calls().len(), 1);
    }
}
