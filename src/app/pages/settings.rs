//! Settings page: notification toggles and the saved address book.

use futures_util::try_join;
use parking_lot::Mutex;
use serde::Serialize;

use crate::app::state::{LoadSlot, Loadable, Notices};
use crate::domain::error::Result;
use crate::domain::{Address, AddressPatch, NewAddress, NotificationPreferences};
use crate::services::{Repository, Services};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsData {
    pub preferences: NotificationPreferences,
    pub addresses: Vec<Address>,
}

/// State of the add/edit address form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub open: bool,
    /// Address being edited; `None` when adding a new one.
    pub editing: Option<i64>,
    pub fields: NewAddress,
}

pub struct SettingsPage {
    services: Services,
    notices: Notices,
    data: LoadSlot<SettingsData>,
    form: Mutex<AddressForm>,
}

impl SettingsPage {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            data: LoadSlot::new(),
            form: Mutex::new(AddressForm::default()),
        }
    }

    /// Loads preferences and addresses together.
    pub async fn load(&self) {
        self.data
            .run(&self.notices, "Failed to load settings", fetch(&self.services))
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn unmount(&self) {
        self.data.unmount();
    }

    #[must_use]
    pub fn state(&self) -> Loadable<SettingsData> {
        self.data.snapshot()
    }

    /// Flips toggles locally; nothing is sent until
    /// [`save_preferences`](Self::save_preferences).
    pub fn edit_preferences(&self, f: impl FnOnce(&mut NotificationPreferences)) {
        self.data.update(|data| f(&mut data.preferences));
    }

    /// Sends the locally edited preferences.
    pub async fn save_preferences(&self) {
        let Some(prefs) = self.data.snapshot().ready().map(|d| d.preferences) else {
            return;
        };

        match self.services.settings.update_preferences(prefs.into()).await {
            Ok(saved) => {
                self.data.update(|data| data.preferences = saved);
                self.notices.success("Notification preferences saved successfully");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save notification preferences");
                self.notices.error("Failed to save notification preferences");
            }
        }
    }

    #[must_use]
    pub fn form(&self) -> AddressForm {
        self.form.lock().clone()
    }

    pub fn open_new_address(&self) {
        *self.form.lock() = AddressForm {
            open: true,
            ..AddressForm::default()
        };
    }

    /// Opens the form prefilled with `address`.
    pub fn edit_address(&self, address: &Address) {
        *self.form.lock() = AddressForm {
            open: true,
            editing: Some(address.id),
            fields: NewAddress::from(address),
        };
    }

    pub fn edit_form(&self, f: impl FnOnce(&mut NewAddress)) {
        f(&mut self.form.lock().fields);
    }

    pub fn cancel_form(&self) {
        *self.form.lock() = AddressForm::default();
    }

    /// Creates or updates the address in the form, then reloads.
    ///
    /// The form stays open when saving fails.
    pub async fn submit_address(&self) {
        let form = self.form();
        let saved = match form.editing {
            Some(id) => self
                .services
                .settings
                .addresses()
                .update(&id, AddressPatch::from(form.fields))
                .await
                .map(|_| "Address updated successfully"),
            None => self
                .services
                .settings
                .addresses()
                .create(form.fields)
                .await
                .map(|_| "Address added successfully"),
        };

        match saved {
            Ok(message) => {
                self.notices.success(message);
                self.load().await;
                self.cancel_form();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save address");
                self.notices.error("Failed to save address");
            }
        }
    }

    pub async fn delete_address(&self, id: i64) {
        match self.services.settings.addresses().delete(&id).await {
            Ok(()) => {
                self.notices.success("Address deleted successfully");
                self.load().await;
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to delete address");
                self.notices.error("Failed to delete address");
            }
        }
    }
}

async fn fetch(services: &Services) -> Result<SettingsData> {
    let settings = &services.settings;
    let (preferences, addresses) = try_join!(settings.preferences(), settings.addresses().list())?;
    Ok(SettingsData {
        preferences,
        addresses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NoticeLevel;

    async fn loaded() -> (SettingsPage, Notices) {
        let notices = Notices::new();
        let page = SettingsPage::new(Services::immediate().unwrap(), notices.clone());
        page.load().await;
        (page, notices)
    }

    fn addresses(page: &SettingsPage) -> Vec<Address> {
        page.state().ready().unwrap().addresses.clone()
    }

    #[tokio::test]
    async fn toggled_preferences_are_saved() {
        let (page, notices) = loaded().await;
        let before = page.state().ready().unwrap().preferences;

        page.edit_preferences(|p| p.push.enabled = !p.push.enabled);
        page.save_preferences().await;

        let saved = page.state().ready().unwrap().preferences;
        assert_eq!(saved.push.enabled, !before.push.enabled);
        assert_eq!(saved.email, before.email);
        assert_eq!(notices.drain()[0].level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn adding_a_default_address_reloads_with_single_default() {
        let (page, notices) = loaded().await;
        let count = addresses(&page).len();

        page.open_new_address();
        page.edit_form(|f| {
            f.label = "Depot".into();
            f.street = "1 Pier 70".into();
            f.is_default = true;
        });
        page.submit_address().await;

        let after = addresses(&page);
        assert_eq!(after.len(), count + 1);
        let defaults: Vec<_> = after.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].label, "Depot");
        assert!(!page.form().open);
        assert_eq!(notices.drain()[0].message, "Address added successfully");
    }

    #[tokio::test]
    async fn editing_an_address_updates_it() {
        let (page, _) = loaded().await;
        let target = addresses(&page).into_iter().find(|a| !a.is_default).unwrap();

        page.edit_address(&target);
        page.edit_form(|f| f.label = "Back Office".into());
        page.submit_address().await;

        let updated = addresses(&page).into_iter().find(|a| a.id == target.id).unwrap();
        assert_eq!(updated.label, "Back Office");
        assert_eq!(updated.street, target.street);
    }

    #[tokio::test]
    async fn deleting_reloads_and_missing_ids_raise_errors() {
        let (page, notices) = loaded().await;
        let first = addresses(&page)[0].id;

        page.delete_address(first).await;
        assert!(addresses(&page).iter().all(|a| a.id != first));

        page.delete_address(first).await;
        let raised = notices.drain();
        assert_eq!(raised.last().unwrap().message, "Failed to delete address");
    }
}
