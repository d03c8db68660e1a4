//! Account settings: saved addresses and notification preferences.
//!
//! Saved addresses carry an `is_default` flag; the address service keeps at
//! most one address flagged at any time. Notification preferences are a
//! singleton grouped by channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::Record;

/// A saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub label: String,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Address {
    type Id = i64;
    const KIND: &'static str = "Address";

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// Address form contents, used for both create and the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
}

impl From<&Address> for NewAddress {
    fn from(address: &Address) -> Self {
        Self {
            label: address.label.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
            is_default: address.is_default,
        }
    }
}

/// Fields an address update may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPatch {
    pub label: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressPatch {
    /// Whether applying this patch makes the address the default.
    #[must_use]
    pub fn sets_default(&self) -> bool {
        self.is_default == Some(true)
    }

    pub fn apply_to(self, address: &mut Address) {
        if let Some(v) = self.label {
            address.label = v;
        }
        if let Some(v) = self.street {
            address.street = v;
        }
        if let Some(v) = self.city {
            address.city = v;
        }
        if let Some(v) = self.state {
            address.state = v;
        }
        if let Some(v) = self.zip_code {
            address.zip_code = v;
        }
        if let Some(v) = self.country {
            address.country = v;
        }
        if let Some(v) = self.is_default {
            address.is_default = v;
        }
    }
}

impl From<NewAddress> for AddressPatch {
    /// Full-form update: every field is replaced.
    fn from(form: NewAddress) -> Self {
        Self {
            label: Some(form.label),
            street: Some(form.street),
            city: Some(form.city),
            state: Some(form.state),
            zip_code: Some(form.zip_code),
            country: Some(form.country),
            is_default: Some(form.is_default),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPreferences {
    #[serde(default)]
    pub order_updates: bool,
    #[serde(default)]
    pub promotions: bool,
    #[serde(default)]
    pub weekly_summary: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsPreferences {
    #[serde(default)]
    pub delivery_notifications: bool,
    #[serde(default)]
    pub urgent_updates: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPreferences {
    #[serde(default)]
    pub enabled: bool,
}

/// Notification toggles grouped by channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default)]
    pub email: EmailPreferences,
    #[serde(default)]
    pub sms: SmsPreferences,
    #[serde(default)]
    pub push: PushPreferences,
}

/// Channel-level merge: a set channel replaces that channel's toggles as a
/// whole, unset channels are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationPreferencesPatch {
    pub email: Option<EmailPreferences>,
    pub sms: Option<SmsPreferences>,
    pub push: Option<PushPreferences>,
}

impl NotificationPreferencesPatch {
    pub fn apply_to(self, prefs: &mut NotificationPreferences) {
        if let Some(v) = self.email {
            prefs.email = v;
        }
        if let Some(v) = self.sms {
            prefs.sms = v;
        }
        if let Some(v) = self.push {
            prefs.push = v;
        }
    }
}

impl From<NotificationPreferences> for NotificationPreferencesPatch {
    fn from(prefs: NotificationPreferences) -> Self {
        Self {
            email: Some(prefs.email),
            sms: Some(prefs.sms),
            push: Some(prefs.push),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_patch_replaces_only_named_channels() {
        let mut prefs = NotificationPreferences {
            email: EmailPreferences { order_updates: true, promotions: true, weekly_summary: false },
            sms: SmsPreferences { delivery_notifications: true, urgent_updates: true },
            push: PushPreferences { enabled: true },
        };

        NotificationPreferencesPatch {
            push: Some(PushPreferences { enabled: false }),
            ..Default::default()
        }
        .apply_to(&mut prefs);

        assert!(!prefs.push.enabled);
        assert!(prefs.email.order_updates);
        assert!(prefs.sms.urgent_updates);
    }

    #[test]
    fn address_patch_leaves_unset_fields() {
        let mut address = Address {
            id: 1,
            label: "Home".into(),
            street: "1 Market St".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            zip_code: "94105".into(),
            country: "USA".into(),
            is_default: false,
            created_at: None,
            updated_at: None,
        };

        AddressPatch { label: Some("Office".into()), ..Default::default() }.apply_to(&mut address);

        assert_eq!(address.label, "Office");
        assert_eq!(address.street, "1 Market St");
        assert!(!address.is_default);
    }
}
