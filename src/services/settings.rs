//! Account settings: notification preferences and the saved address book.
//!
//! Every call waits the same 300 ms baseline. The address book keeps at most
//! one address flagged `is_default`: creating or updating an address as
//! default clears the flag on every other address in the same store
//! transaction.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

use super::collection::Collection;
use super::{Repository, ServiceContext};
use crate::domain::error::{CourierError, Result};
use crate::domain::record::Record;
use crate::domain::{
    Address, AddressPatch, NewAddress, NotificationPreferences, NotificationPreferencesPatch,
};
use crate::storage::Store;

const SETTINGS_DELAY: Duration = Duration::from_millis(300);

/// Notification preferences plus the address book.
pub struct SettingsService {
    preferences: Mutex<NotificationPreferences>,
    addresses: AddressBook,
    ctx: ServiceContext,
}

impl SettingsService {
    #[must_use]
    pub fn new(
        preferences: NotificationPreferences,
        addresses: Arc<dyn Store<Address>>,
        ctx: ServiceContext,
    ) -> Self {
        Self {
            preferences: Mutex::new(preferences),
            addresses: AddressBook::new(addresses, ctx.clone()),
            ctx,
        }
    }

    /// Current notification preferences.
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the other service calls.
    pub async fn preferences(&self) -> Result<NotificationPreferences> {
        self.wait().await;
        Ok(*self.preferences.lock())
    }

    /// Merges `patch` into the stored preferences and returns the result.
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the other service calls.
    pub async fn update_preferences(
        &self,
        patch: NotificationPreferencesPatch,
    ) -> Result<NotificationPreferences> {
        self.wait().await;
        let mut prefs = self.preferences.lock();
        patch.apply_to(&mut prefs);
        tracing::debug!(
            email = ?prefs.email,
            sms = ?prefs.sms,
            push = prefs.push.enabled,
            "notification preferences updated"
        );
        Ok(*prefs)
    }

    /// The saved address book.
    #[must_use]
    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    async fn wait(&self) {
        crate::storage::simulate(self.ctx.latency.as_ref(), SETTINGS_DELAY).await;
    }
}

/// Saved addresses, identified by numeric ids.
pub struct AddressBook {
    addresses: Collection<Address>,
    ctx: ServiceContext,
}

impl AddressBook {
    #[must_use]
    pub fn new(store: Arc<dyn Store<Address>>, ctx: ServiceContext) -> Self {
        Self {
            addresses: Collection::new(store, ctx.latency.clone()),
            ctx,
        }
    }
}

fn clear_other_defaults(addresses: &mut [Address], keep: i64) {
    for address in addresses.iter_mut().filter(|a| a.id != keep) {
        address.is_default = false;
    }
}

#[async_trait]
impl Repository<Address> for AddressBook {
    type New = NewAddress;
    type Patch = AddressPatch;

    async fn list(&self) -> Result<Vec<Address>> {
        self.addresses.list(SETTINGS_DELAY).await
    }

    async fn get(&self, id: &i64) -> Result<Address> {
        self.addresses.get(id, SETTINGS_DELAY).await
    }

    async fn create(&self, input: NewAddress) -> Result<Address> {
        self.addresses.wait(SETTINGS_DELAY).await;

        let now = self.ctx.clock.now();
        let address = Address {
            id: self.ctx.ids.next(now),
            label: input.label,
            street: input.street,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            country: input.country,
            is_default: input.is_default,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let record = address.clone();
        let mut pending = Some(address);
        self.addresses.store().apply(&mut |all| {
            if let Some(address) = pending.take() {
                if address.is_default {
                    clear_other_defaults(all, address.id);
                }
                all.push(address);
            }
            Ok(())
        })?;

        tracing::debug!(id = record.id, is_default = record.is_default, "address saved");
        Ok(record)
    }

    async fn update(&self, id: &i64, patch: AddressPatch) -> Result<Address> {
        let span = tracing::debug_span!("address_update", id = *id, sets_default = patch.sets_default());
        self.addresses.wait(SETTINGS_DELAY).instrument(span).await;

        let now = self.ctx.clock.now();
        let id = *id;
        let mut patch = Some(patch);
        let mut updated = None;
        self.addresses.store().apply(&mut |all| {
            let index = all
                .iter()
                .position(|a| a.id == id)
                .ok_or_else(|| CourierError::not_found(Address::KIND, id))?;
            if let Some(patch) = patch.take() {
                if patch.sets_default() {
                    clear_other_defaults(all, id);
                }
                patch.apply_to(&mut all[index]);
            }
            all[index].updated_at = Some(now);
            updated = Some(all[index].clone());
            Ok(())
        })?;

        let updated = updated.ok_or_else(|| CourierError::not_found(Address::KIND, id))?;
        tracing::debug!(id, is_default = updated.is_default, "address updated");
        Ok(updated)
    }

    async fn delete(&self, id: &i64) -> Result<()> {
        self.addresses.remove(id, SETTINGS_DELAY).await
    }
}
