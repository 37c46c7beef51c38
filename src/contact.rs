//! Recipient contact record consumed by the email channel.
//!
//! Written when the user's identity becomes known, read at email send time.
//! Stored separately from the scheduler state.

use crate::error::Result;
use crate::store::{self, KeyValueStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Store key of the contact record.
pub const CONTACT_KEY: &str = "currentUserProfile";

/// Older key consulted when [`CONTACT_KEY`] is absent.
pub const LEGACY_CONTACT_KEY: &str = "userProfile";

/// Email address and display name of the advice recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContact {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UserContact {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            name: Some(name.into()),
        }
    }

    /// Non-blank email address, if any.
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// Non-blank display name, if any.
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Load the contact record, trying the legacy key second.
    ///
    /// Unreadable or corrupt records are logged and treated as absent.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        for key in [CONTACT_KEY, LEGACY_CONTACT_KEY] {
            match store::load_json::<UserContact>(store, key) {
                Ok(Some(contact)) => return contact,
                Ok(None) => {}
                Err(e) => {
                    warn!("cannot read contact info from '{key}': {e}");
                    return Self::default();
                }
            }
        }
        Self::default()
    }

    /// Overwrite the stored contact record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or written.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store::save_json(store, CONTACT_KEY, self)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
