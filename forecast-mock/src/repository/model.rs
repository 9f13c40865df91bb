//! Model Repository
//!
//! Usage counters per model id.

use super::Store;

/// Increment the usage counter of a model
///
/// # Returns
/// The counter after the increment
pub async fn increment_usage(store: &Store, model_id: &str) -> u64 {
    let mut usage = store.usage.write().await;
    let count = usage.entry(model_id.to_string()).or_insert(0);
    *count += 1;
    *count
}

/// Get the usage counter of a model, 0 if never used
pub async fn usage(store: &Store, model_id: &str) -> u64 {
    store.usage.read().await.get(model_id).copied().unwrap_or(0)
}
