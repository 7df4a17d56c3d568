use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use models::seed::seed_services;
use models::service::{DeleteOutcome, Service, ServiceDraft, ServiceStatus, ServiceUpdate};

use crate::errors::ServiceError;
use crate::storage::SnapshotStore;

/// Durable key holding the JSON-encoded service collection.
pub const SERVICES_KEY: &str = "services";

/// CRUD over the partner service collection.
///
/// The collection is one snapshot under a single key: every mutation reads
/// the whole list, rewrites it, and persists it back in full. Absence of
/// the key is not an error; reads fall back to the built-in seed catalog.
/// Concurrent tabs/processes over the same file are last-writer-wins; only
/// mutations within one process are serialized.
pub struct ServiceCatalog {
    store: Arc<dyn SnapshotStore>,
    read_delay: Duration,
    write_lock: Mutex<()>,
}

impl ServiceCatalog {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store, read_delay: Duration::ZERO, write_lock: Mutex::new(()) }
    }

    /// Artificial delay applied before reads, simulating the network
    /// latency the dashboard was built against.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    /// Full persisted collection, seed catalog when nothing was written.
    pub async fn get_services(&self) -> Result<Vec<Service>, ServiceError> {
        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }
        self.load().await
    }

    pub async fn get_service(&self, id: &str) -> Result<Option<Service>, ServiceError> {
        Ok(self.get_services().await?.into_iter().find(|s| s.id == id))
    }

    /// Persist a new record assembled from a validated draft. System
    /// fields are assigned here: fresh id, both timestamps, zeroed rating
    /// and popularity. The record is prepended so recent entries list
    /// first.
    pub async fn create_service(&self, draft: ServiceDraft) -> Result<Service, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let now = Utc::now();
        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            detailed_description: draft.detailed_description,
            category: draft.category,
            tags: draft.tags,
            status: draft.status,
            pricing_model: draft.pricing_model,
            price: draft.price,
            duration: draft.duration,
            is_active: draft.is_active,
            rating: 0.0,
            popularity: 0,
            created_at: now,
            updated_at: now,
            contact_email: draft.contact_email,
            visibility: draft.visibility,
            banner_image_url: draft.banner_image_url,
        };

        let mut services = self.load().await?;
        services.insert(0, service.clone());
        self.persist(&services).await?;
        info!(id = %service.id, name = %service.name, status = %service.status, "created service");
        Ok(service)
    }

    /// Merge a typed partial onto the record matching `id` and refresh
    /// `updated_at`. Returns `None` when the id is absent; callers decide
    /// whether that is an error.
    pub async fn update_service(
        &self,
        id: &str,
        update: ServiceUpdate,
    ) -> Result<Option<Service>, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut services = self.load().await?;
        let mut updated = None;
        for service in services.iter_mut() {
            if service.id == id {
                update.apply(service);
                service.updated_at = Utc::now();
                updated = Some(service.clone());
                break;
            }
        }
        self.persist(&services).await?;
        match &updated {
            Some(s) => info!(id = %s.id, status = %s.status, "updated service"),
            None => debug!(%id, "update target not found"),
        }
        Ok(updated)
    }

    pub async fn update_service_status(
        &self,
        id: &str,
        status: ServiceStatus,
    ) -> Result<Option<Service>, ServiceError> {
        self.update_service(id, ServiceUpdate::status(status)).await
    }

    /// Remove the record matching `id`. Deliberately idempotent: a missing
    /// id still reports success and leaves the collection as it was.
    pub async fn delete_service(&self, id: &str) -> Result<DeleteOutcome, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut services = self.load().await?;
        let before = services.len();
        services.retain(|s| s.id != id);
        self.persist(&services).await?;
        info!(%id, removed = before - services.len(), "deleted service");
        Ok(DeleteOutcome { id: id.to_string(), success: true })
    }

    async fn load(&self) -> Result<Vec<Service>, ServiceError> {
        match self.store.get(SERVICES_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| ServiceError::Storage(e.to_string()))
            }
            None => Ok(seed_services()),
        }
    }

    async fn persist(&self, services: &[Service]) -> Result<(), ServiceError> {
        let raw =
            serde_json::to_string(services).map_err(|e| ServiceError::Storage(e.to_string()))?;
        self.store.set(SERVICES_KEY, raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStore, MemoryStore};
    use models::service::{PricingModel, ServiceCategory, Visibility};

    fn draft(name: &str, status: ServiceStatus) -> ServiceDraft {
        ServiceDraft {
            name: name.into(),
            description: "A short pitch.".into(),
            detailed_description: "The long-form pitch.".into(),
            category: ServiceCategory::Integration,
            tags: vec!["Enterprise".into()],
            status,
            pricing_model: PricingModel::Fixed,
            price: "1200".into(),
            duration: "2 weeks".into(),
            is_active: true,
            contact_email: "team@example.com".into(),
            visibility: Visibility::Public,
            banner_image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn empty_store_falls_back_to_seed() -> Result<(), anyhow::Error> {
        let catalog = ServiceCatalog::new(MemoryStore::new());
        let services = catalog.get_services().await?;
        assert_eq!(services, seed_services());
        Ok(())
    }

    #[tokio::test]
    async fn create_assigns_system_fields_and_prepends() -> Result<(), anyhow::Error> {
        let catalog = ServiceCatalog::new(MemoryStore::new());
        let created = catalog.create_service(draft("Zero Trust Review", ServiceStatus::Published)).await?;

        assert!(!created.id.is_empty());
        assert_eq!(created.rating, 0.0);
        assert_eq!(created.popularity, 0);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.status, ServiceStatus::Published);

        let services = catalog.get_services().await?;
        assert_eq!(services.len(), seed_services().len() + 1);
        assert_eq!(services[0], created);
        Ok(())
    }

    #[tokio::test]
    async fn create_round_trip_preserves_draft_fields() -> Result<(), anyhow::Error> {
        let catalog = ServiceCatalog::new(MemoryStore::new());
        let d = draft("Process Mining Pilot", ServiceStatus::Draft);
        let created = catalog.create_service(d.clone()).await?;

        let stored = catalog
            .get_service(&created.id)
            .await?
            .expect("created record listed");
        assert_eq!(stored.name, d.name);
        assert_eq!(stored.description, d.description);
        assert_eq!(stored.detailed_description, d.detailed_description);
        assert_eq!(stored.category, d.category);
        assert_eq!(stored.tags, d.tags);
        assert_eq!(stored.pricing_model, d.pricing_model);
        assert_eq!(stored.price, d.price);
        assert_eq!(stored.duration, d.duration);
        assert_eq!(stored.is_active, d.is_active);
        assert_eq!(stored.contact_email, d.contact_email);
        assert_eq!(stored.visibility, d.visibility);
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_and_refreshes_timestamp() -> Result<(), anyhow::Error> {
        let catalog = ServiceCatalog::new(MemoryStore::new());
        let created = catalog.create_service(draft("Legacy Uplift", ServiceStatus::Draft)).await?;

        let update = ServiceUpdate {
            price: Some("9000".into()),
            duration: Some("6 weeks".into()),
            ..ServiceUpdate::default()
        };
        let merged = catalog
            .update_service(&created.id, update)
            .await?
            .expect("target exists");

        assert_eq!(merged.price, "9000");
        assert_eq!(merged.duration, "6 weeks");
        assert_eq!(merged.name, "Legacy Uplift");
        assert!(merged.updated_at >= created.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_id_returns_none_without_error() -> Result<(), anyhow::Error> {
        let catalog = ServiceCatalog::new(MemoryStore::new());
        let before = catalog.get_services().await?;
        let out = catalog.update_service("no-such-id", ServiceUpdate::status(ServiceStatus::Archived)).await?;
        assert!(out.is_none());
        assert_eq!(catalog.get_services().await?.len(), before.len());
        Ok(())
    }

    #[tokio::test]
    async fn status_change_is_update_sugar() -> Result<(), anyhow::Error> {
        let catalog = ServiceCatalog::new(MemoryStore::new());
        let created = catalog.create_service(draft("Payroll Onboarding", ServiceStatus::Draft)).await?;

        let published = catalog
            .update_service_status(&created.id, ServiceStatus::Published)
            .await?
            .expect("target exists");
        assert_eq!(published.status, ServiceStatus::Published);

        // Archived back to Published is allowed; there is no workflow.
        catalog.update_service_status(&created.id, ServiceStatus::Archived).await?;
        let republished = catalog
            .update_service_status(&created.id, ServiceStatus::Published)
            .await?
            .expect("target exists");
        assert_eq!(republished.status, ServiceStatus::Published);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent_for_missing_ids() -> Result<(), anyhow::Error> {
        let catalog = ServiceCatalog::new(MemoryStore::new());
        let before = catalog.get_services().await?.len();

        let outcome = catalog.delete_service("no-such-id").await?;
        assert_eq!(outcome, DeleteOutcome { id: "no-such-id".into(), success: true });
        assert_eq!(catalog.get_services().await?.len(), before);

        let created = catalog.create_service(draft("Short Lived", ServiceStatus::Draft)).await?;
        let outcome = catalog.delete_service(&created.id).await?;
        assert!(outcome.success);
        assert!(catalog.get_service(&created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_error() {
        let store = MemoryStore::new();
        let catalog = ServiceCatalog::new(store.clone());
        store.poison();

        let err = catalog
            .create_service(draft("Doomed", ServiceStatus::Draft))
            .await
            .expect_err("poisoned store fails");
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn snapshot_survives_catalog_restart() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("catalog_{}", Uuid::new_v4()));
        let created = {
            let catalog = ServiceCatalog::new(JsonFileStore::new(&dir).await?);
            catalog.create_service(draft("Persistent", ServiceStatus::Published)).await?
        };

        let reopened = ServiceCatalog::new(JsonFileStore::new(&dir).await?);
        let services = reopened.get_services().await?;
        assert_eq!(services[0], created);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
