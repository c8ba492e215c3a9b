use std::sync::Arc;

use quiz_core::model::{QuizSettings, QuizSettingsDraft};
use storage::keys;
use storage::repository::KeyValueStore;

use crate::error::SettingsServiceError;
use crate::kv::{load_or_default, save_json};

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persisted settings, or defaults if missing, corrupt or unreadable.
    pub async fn load(&self) -> QuizSettings {
        load_or_default(self.store.as_ref(), keys::SETTINGS, QuizSettings::default).await
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation or the write fails.
    pub async fn save(&self, draft: QuizSettingsDraft) -> Result<QuizSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        save_json(self.store.as_ref(), keys::SETTINGS, &settings).await?;
        Ok(settings)
    }

    /// Flip the timer on or off, keeping the duration.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Storage` if the write fails.
    pub async fn set_timer_enabled(
        &self,
        enabled: bool,
    ) -> Result<QuizSettings, SettingsServiceError> {
        let settings = self.load().await.with_timer_enabled(enabled);
        save_json(self.store.as_ref(), keys::SETTINGS, &settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::test_support::BrokenStore;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn first_run_loads_defaults() {
        let service = SettingsService::new(Arc::new(InMemoryStore::new()));
        assert_eq!(service.load().await, QuizSettings::default());
    }

    #[tokio::test]
    async fn saved_settings_survive_reload() {
        let store = Arc::new(InMemoryStore::new());
        let service = SettingsService::new(store.clone());
        service
            .save(QuizSettingsDraft {
                timer_enabled: true,
                question_time_secs: 20,
            })
            .await
            .unwrap();

        let reloaded = SettingsService::new(store).load().await;
        assert!(reloaded.timer_enabled());
        assert_eq!(reloaded.question_time_secs(), 20);
    }

    #[tokio::test]
    async fn zero_duration_is_rejected_before_writing() {
        let store = Arc::new(InMemoryStore::new());
        let service = SettingsService::new(store.clone());
        let err = service
            .save(QuizSettingsDraft {
                timer_enabled: true,
                question_time_secs: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsServiceError::Settings(_)));
        assert_eq!(store.get(keys::SETTINGS).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_record_degrades_to_default() {
        let store = Arc::new(InMemoryStore::new());
        store
            .set(keys::SETTINGS, r#"{"timerEnabled":true,"questionTime":0}"#)
            .await
            .unwrap();
        let service = SettingsService::new(store);
        assert_eq!(service.load().await, QuizSettings::default());
    }

    #[tokio::test]
    async fn toggle_keeps_duration() {
        let service = SettingsService::new(Arc::new(InMemoryStore::new()));
        service
            .save(QuizSettingsDraft {
                timer_enabled: false,
                question_time_secs: 45,
            })
            .await
            .unwrap();
        let toggled = service.set_timer_enabled(true).await.unwrap();
        assert!(toggled.timer_enabled());
        assert_eq!(toggled.question_time_secs(), 45);
    }

    #[tokio::test]
    async fn broken_store_reads_defaults_and_reports_writes() {
        let service = SettingsService::new(Arc::new(BrokenStore));
        assert_eq!(service.load().await, QuizSettings::default());
        assert!(matches!(
            service.set_timer_enabled(true).await,
            Err(SettingsServiceError::Storage(_))
        ));
    }
}
