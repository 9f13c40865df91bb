//! Job Repository
//!
//! Stores forecast jobs and the results of completed jobs.

use forecast_core::domain::job::ForecastJob;
use uuid::Uuid;

use super::Store;

/// Insert a new job
pub async fn insert(store: &Store, job: ForecastJob) {
    store.jobs.write().await.insert(job.id, job);
}

/// Find a job by ID
pub async fn find_by_id(store: &Store, id: Uuid) -> Option<ForecastJob> {
    store.jobs.read().await.get(&id).cloned()
}

/// Apply a change to a stored job
///
/// # Returns
/// The job after the change, or `None` if the job does not exist
pub async fn update<F>(store: &Store, id: Uuid, change: F) -> Option<ForecastJob>
where
    F: FnOnce(&mut ForecastJob),
{
    let mut jobs = store.jobs.write().await;
    let job = jobs.get_mut(&id)?;
    change(job);
    job.updated_at = chrono::Utc::now();
    Some(job.clone())
}

/// Store the results of a job
pub async fn save_results(store: &Store, id: Uuid, results: serde_json::Value) {
    store.results.write().await.insert(id, results);
}

/// Find the results of a job
pub async fn find_results(store: &Store, id: Uuid) -> Option<serde_json::Value> {
    store.results.read().await.get(&id).cloned()
}
