//! # Configuration Repository
//!
//! CRUD for the saved discount/margin configurations.
//!
//! Configurations never expire; they are created, edited and deleted
//! explicitly by the operator. Names are unique case-insensitively, so the
//! picker in the frontend can't show two "finolex standard" entries that
//! differ only in capitalization.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::gateway::{BlobGateway, CONFIGURATIONS_KEY};
use crate::identity::Identity;
use crate::repository::{load_list, next_time_id, save_list};
use pipequote_core::types::Configuration;
use pipequote_core::validation::validate_configuration;

/// Operator input for creating or updating a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConfiguration {
    pub name: String,
    pub first_discount: Decimal,
    pub second_discount: Decimal,
    pub margin: Decimal,
}

/// Repository for configuration operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ConfigurationRepository::new(gateway);
/// let config = repo.create(&identity, &input)?;
/// let all = repo.list(&identity)?;
/// ```
#[derive(Debug, Clone)]
pub struct ConfigurationRepository<G: BlobGateway> {
    gateway: G,
}

impl<G: BlobGateway> ConfigurationRepository<G> {
    /// Creates a new ConfigurationRepository.
    pub fn new(gateway: G) -> Self {
        ConfigurationRepository { gateway }
    }

    /// Lists all configurations.
    pub fn list(&self, identity: &Identity) -> StoreResult<Vec<Configuration>> {
        debug!(subject = identity.subject(), "listing configurations");
        self.load()
    }

    /// Gets a configuration by its ID.
    pub fn get(&self, identity: &Identity, id: &str) -> StoreResult<Option<Configuration>> {
        debug!(subject = identity.subject(), id, "fetching configuration");
        Ok(self.load()?.into_iter().find(|c| c.id == id))
    }

    /// Creates a configuration.
    ///
    /// Assigns a time-derived id and `createdAt`. Rejects input before the
    /// list is written: a failed create leaves storage untouched.
    pub fn create(
        &self,
        identity: &Identity,
        input: &NewConfiguration,
    ) -> StoreResult<Configuration> {
        let mut all = self.load()?;

        let now_ms = Utc::now().timestamp_millis();
        let config = Configuration {
            id: next_time_id(now_ms, all.iter().map(|c| c.id.as_str())),
            name: input.name.trim().to_string(),
            first_discount: input.first_discount,
            second_discount: input.second_discount,
            margin: input.margin,
            created_at: now_ms,
        };

        validate_configuration(&config).map_err(pipequote_core::CoreError::from)?;
        self.reject_duplicate_name(&all, &config.name, None)?;

        all.push(config.clone());
        save_list(&self.gateway, CONFIGURATIONS_KEY, &all)?;

        info!(
            subject = identity.subject(),
            id = %config.id,
            name = %config.name,
            "configuration created"
        );
        Ok(config)
    }

    /// Replaces a configuration's content, keeping its id and `createdAt`.
    pub fn update(
        &self,
        identity: &Identity,
        id: &str,
        input: &NewConfiguration,
    ) -> StoreResult<Configuration> {
        let mut all = self.load()?;

        let index = all
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Configuration", id))?;

        let updated = Configuration {
            id: all[index].id.clone(),
            name: input.name.trim().to_string(),
            first_discount: input.first_discount,
            second_discount: input.second_discount,
            margin: input.margin,
            created_at: all[index].created_at,
        };

        validate_configuration(&updated).map_err(pipequote_core::CoreError::from)?;
        self.reject_duplicate_name(&all, &updated.name, Some(id))?;

        all[index] = updated.clone();
        save_list(&self.gateway, CONFIGURATIONS_KEY, &all)?;

        info!(subject = identity.subject(), id, "configuration updated");
        Ok(updated)
    }

    /// Deletes a configuration.
    pub fn delete(&self, identity: &Identity, id: &str) -> StoreResult<()> {
        let mut all = self.load()?;

        let before = all.len();
        all.retain(|c| c.id != id);
        if all.len() == before {
            return Err(StoreError::not_found("Configuration", id));
        }

        save_list(&self.gateway, CONFIGURATIONS_KEY, &all)?;
        info!(subject = identity.subject(), id, "configuration deleted");
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<Configuration>> {
        load_list(&self.gateway, CONFIGURATIONS_KEY, |c: &Configuration| {
            validate_configuration(c).is_ok()
        })
    }

    /// Case-insensitive name uniqueness; `exclude_id` skips the record
    /// being updated so renaming a config to itself stays legal.
    fn reject_duplicate_name(
        &self,
        all: &[Configuration],
        name: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<()> {
        let lowered = name.to_lowercase();
        let clash = all.iter().any(|c| {
            c.name.to_lowercase() == lowered && exclude_id.map_or(true, |id| c.id != id)
        });

        if clash {
            return Err(StoreError::duplicate("name", name));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;
    use crate::identity::{authenticate, StaticTokenGateway};
    use rust_decimal_macros::dec;

    fn operator() -> Identity {
        authenticate(&StaticTokenGateway::new("secret", "operator"), "secret").unwrap()
    }

    fn repo() -> ConfigurationRepository<MemoryGateway> {
        ConfigurationRepository::new(MemoryGateway::new())
    }

    fn standard() -> NewConfiguration {
        NewConfiguration {
            name: "Finolex Standard".to_string(),
            first_discount: dec!(5),
            second_discount: dec!(2.5),
            margin: dec!(15),
        }
    }

    #[test]
    fn test_create_assigns_id_and_created_at() {
        let repo = repo();
        let config = repo.create(&operator(), &standard()).unwrap();

        assert!(!config.id.is_empty());
        assert!(config.created_at > 0);
        assert_eq!(repo.list(&operator()).unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_duplicate_name_case_insensitively() {
        let repo = repo();
        repo.create(&operator(), &standard()).unwrap();

        let mut dup = standard();
        dup.name = "FINOLEX STANDARD".to_string();
        assert!(matches!(
            repo.create(&operator(), &dup).unwrap_err(),
            StoreError::Duplicate { .. }
        ));
        assert_eq!(repo.list(&operator()).unwrap().len(), 1);
    }

    #[test]
    fn test_rejected_create_leaves_storage_untouched() {
        let repo = repo();
        let mut bad = standard();
        bad.margin = dec!(150);

        assert!(repo.create(&operator(), &bad).is_err());
        assert!(repo.list(&operator()).unwrap().is_empty());
    }

    #[test]
    fn test_rapid_creates_get_unique_ids() {
        let repo = repo();
        let a = repo.create(&operator(), &standard()).unwrap();
        let mut other = standard();
        other.name = "Supreme Heavy".to_string();
        let b = repo.create(&operator(), &other).unwrap();

        assert_ne!(a.id, b.id);
        assert!(b.id.parse::<i64>().unwrap() > a.id.parse::<i64>().unwrap());
    }

    #[test]
    fn test_update_keeps_identity_and_changes_content() {
        let repo = repo();
        let created = repo.create(&operator(), &standard()).unwrap();

        let mut input = standard();
        input.margin = dec!(20);
        let updated = repo.update(&operator(), &created.id, &input).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.margin, dec!(20));
    }

    #[test]
    fn test_update_can_keep_own_name_but_not_take_anothers() {
        let repo = repo();
        let first = repo.create(&operator(), &standard()).unwrap();
        let mut other = standard();
        other.name = "Supreme Heavy".to_string();
        repo.create(&operator(), &other).unwrap();

        // Same name on itself: fine
        assert!(repo.update(&operator(), &first.id, &standard()).is_ok());

        // Stealing the other record's name: rejected
        let mut stolen = standard();
        stolen.name = "supreme heavy".to_string();
        assert!(matches!(
            repo.update(&operator(), &first.id, &stolen).unwrap_err(),
            StoreError::Duplicate { .. }
        ));
    }

    #[test]
    fn test_delete_and_not_found() {
        let repo = repo();
        let created = repo.create(&operator(), &standard()).unwrap();

        repo.delete(&operator(), &created.id).unwrap();
        assert!(repo.list(&operator()).unwrap().is_empty());

        assert!(matches!(
            repo.delete(&operator(), &created.id).unwrap_err(),
            StoreError::NotFound { .. }
        ));
        assert!(matches!(
            repo.update(&operator(), "missing", &standard()).unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[test]
    fn test_load_skips_out_of_range_stored_record() {
        let gateway = MemoryGateway::new();
        gateway
            .put(
                CONFIGURATIONS_KEY,
                r#"[
                    {"id":"1","name":"Good","firstDiscount":5,"secondDiscount":2.5,"margin":15,"createdAt":1},
                    {"id":"2","name":"Bad","firstDiscount":500,"secondDiscount":0,"margin":0,"createdAt":2}
                ]"#,
            )
            .unwrap();

        let repo = ConfigurationRepository::new(gateway);
        let all = repo.list(&operator()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Good");
    }
}
