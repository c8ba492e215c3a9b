//! JSON encoding over the opaque key/value store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use storage::repository::{KeyValueStore, StorageError};

/// Read and decode `key`, falling back to `default` on any problem.
///
/// A missing key is the normal first-run case and is not logged. Backend
/// failures and corrupt values are logged and otherwise swallowed.
pub(crate) async fn load_or_default<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "stored value is corrupt, using default");
                default()
            }
        },
        Ok(None) => default(),
        Err(err) => {
            tracing::warn!(key, error = %err, "store unavailable, using default");
            default()
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub(crate) async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw =
        serde_json::to_string(value).map_err(|err| StorageError::Serialization(err.to_string()))?;
    store.set(key, &raw).await
}


#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn round_trips_and_degrades() {
        let store = InMemoryStore::new();
        let missing: Vec<u32> = load_or_default(&store, "nums", Vec::new).await;
        assert!(missing.is_empty());

        save_json(&store, "nums", &[1_u32, 2, 3]).await.unwrap();
        let loaded: Vec<u32> = load_or_default(&store, "nums", Vec::new).await;
        assert_eq!(loaded, vec![1, 2, 3]);

        store.set("nums", "{not json").await.unwrap();
        let corrupt: Vec<u32> = load_or_default(&store, "nums", || vec![9]).await;
        assert_eq!(corrupt, vec![9]);

        let broken: Vec<u32> =
            load_or_default(&test_support::BrokenStore, "nums", || vec![7]).await;
        assert_eq!(broken, vec![7]);
    }
}
