//! Credential store
//!
//! Thin typed layer over a [`KeyValueStore`]. It owns every persisted key;
//! nothing else in the crate touches the store directly.

use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use crate::domain::result::Result;
use crate::domain::{CachedProfile, Session};
use crate::ports::KeyValueStore;

pub const KEY_TOKEN: &str = "jwt_token";
pub const KEY_USER_NAME: &str = "user_name";
pub const KEY_USER_EMAIL: &str = "user_email";
pub const KEY_USER_IMAGE: &str = "user_image";
pub const KEY_REMEMBER_ME: &str = "remember_me";
pub const KEY_NOTIFICATIONS: &str = "notifications_enabled";

pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";

/// Persisted auth token, cached profile and user preferences
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn string(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .store
            .get(key)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    fn flag(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.store.get(key)?.and_then(|v| v.as_bool()))
    }

    pub fn save_token(&self, token: &str) -> Result<()> {
        self.store.set(&[(KEY_TOKEN, json!(token))])
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.string(KEY_TOKEN)?.filter(|t| !t.is_empty()))
    }

    /// Cache the display fields of the signed-in user
    ///
    /// `image_url: None` leaves any previously cached image in place.
    pub fn save_user(&self, name: &str, email: &str, image_url: Option<&str>) -> Result<()> {
        let mut entries: Vec<(&str, JsonValue)> =
            vec![(KEY_USER_NAME, json!(name)), (KEY_USER_EMAIL, json!(email))];
        if let Some(url) = image_url {
            entries.push((KEY_USER_IMAGE, json!(url)));
        }
        self.store.set(&entries)
    }

    /// Replace only the cached image
    pub fn save_user_image(&self, image_url: &str) -> Result<()> {
        self.store.set(&[(KEY_USER_IMAGE, json!(image_url))])
    }

    pub fn user_name(&self) -> Result<String> {
        Ok(self
            .string(KEY_USER_NAME)?
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()))
    }

    pub fn user_email(&self) -> Result<String> {
        Ok(self
            .string(KEY_USER_EMAIL)?
            .unwrap_or_else(|| DEFAULT_USER_EMAIL.to_string()))
    }

    pub fn user_image(&self) -> Result<Option<String>> {
        self.string(KEY_USER_IMAGE)
    }

    pub fn set_remember_me(&self, remember: bool) -> Result<()> {
        self.store.set(&[(KEY_REMEMBER_ME, json!(remember))])
    }

    pub fn remember_me(&self) -> Result<bool> {
        Ok(self.flag(KEY_REMEMBER_ME)?.unwrap_or(false))
    }

    pub fn save_notification_preference(&self, enabled: bool) -> Result<()> {
        self.store.set(&[(KEY_NOTIFICATIONS, json!(enabled))])
    }

    pub fn notification_preference(&self) -> Result<bool> {
        Ok(self.flag(KEY_NOTIFICATIONS)?.unwrap_or(true))
    }

    /// Wipe every persisted key
    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }

    pub fn session(&self) -> Result<Session> {
        Ok(Session {
            token: self.token()?,
            remember_me: self.remember_me()?,
        })
    }

    pub fn cached_profile(&self) -> Result<CachedProfile> {
        Ok(CachedProfile {
            name: self.user_name()?,
            email: self.user_email()?,
            image_url: self.user_image()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::prefs::MemoryPreferences;

    fn store() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryPreferences::new()))
    }

    #[test]
    fn test_defaults_when_empty() {
        let creds = store();
        assert_eq!(creds.token().unwrap(), None);
        assert!(!creds.remember_me().unwrap());
        assert!(creds.notification_preference().unwrap());
        assert_eq!(creds.user_name().unwrap(), "User");
        assert_eq!(creds.user_email().unwrap(), "user@example.com");
        assert_eq!(creds.user_image().unwrap(), None);
    }

    #[test]
    fn test_save_user_keeps_image_when_none() {
        let creds = store();
        creds.save_user("Ada", "ada@example.com", Some("https://img/1.png")).unwrap();
        creds.save_user("Ada L", "ada@example.com", None).unwrap();

        let cached = creds.cached_profile().unwrap();
        assert_eq!(cached.name, "Ada L");
        assert_eq!(cached.image_url.as_deref(), Some("https://img/1.png"));
    }

    #[test]
    fn test_empty_token_reads_as_absent() {
        let creds = store();
        creds.save_token("").unwrap();
        assert_eq!(creds.token().unwrap(), None);
        assert!(!creds.session().unwrap().has_token());
    }

    #[test]
    fn test_clear_wipes_everything() {
        let creds = store();
        creds.save_token("t").unwrap();
        creds.set_remember_me(true).unwrap();
        creds.save_notification_preference(false).unwrap();
        creds.clear().unwrap();

        assert_eq!(creds.session().unwrap(), Session::default());
        assert!(creds.notification_preference().unwrap());
    }
}
