use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::UserSettings;

/// Shared notification settings, mutated over the API and read by the
/// trend watcher on every scan.
pub struct SettingsStore {
    inner: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(defaults: UserSettings) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(defaults) })
    }

    /// Clone of the current settings.
    pub async fn snapshot(&self) -> UserSettings {
        self.inner.read().await.clone()
    }

    /// Replace both fields in one write.
    pub async fn update(&self, whatsapp_notifications: bool, whatsapp_number: String) {
        let mut guard = self.inner.write().await;
        guard.whatsapp_notifications = whatsapp_notifications;
        guard.whatsapp_number = whatsapp_number;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> UserSettings {
        UserSettings {
            whatsapp_notifications: true,
            whatsapp_number: "+10000000000".to_string(),
        }
    }

    #[tokio::test]
    async fn update_replaces_both_fields() {
        let store = SettingsStore::new(defaults());

        store.update(false, "+19998887777".to_string()).await;

        let settings = store.snapshot().await;
        assert!(!settings.whatsapp_notifications);
        assert_eq!(settings.whatsapp_number, "+19998887777");
    }

    #[tokio::test]
    async fn snapshot_is_a_copy() {
        let store = SettingsStore::new(defaults());

        let before = store.snapshot().await;
        store.update(false, "+15550001111".to_string()).await;

        assert!(before.whatsapp_notifications);
        assert_eq!(store.snapshot().await.whatsapp_number, "+15550001111");
    }
}
