// Sync service - Fetches the sheet and publishes whole snapshots
use crate::application::sheet_repository::SheetRepository;
use crate::domain::sheet_layout::{Rows, SheetData};
use crate::domain::snapshot::SyncSnapshot;
use crate::infrastructure::config::FailurePolicy;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

#[derive(Clone)]
pub struct SyncService {
    repository: Arc<dyn SheetRepository>,
    policy: FailurePolicy,
    latest_generation: Arc<AtomicU64>,
    snapshot: Arc<watch::Sender<SyncSnapshot>>,
}

impl SyncService {
    pub fn new(repository: Arc<dyn SheetRepository>, policy: FailurePolicy) -> Self {
        let (snapshot, _) = watch::channel(SyncSnapshot::initial(Utc::now()));
        Self {
            repository,
            policy,
            latest_generation: Arc::new(AtomicU64::new(0)),
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn current(&self) -> SyncSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.snapshot.subscribe()
    }

    /// Run one fetch cycle and return the snapshot it leaves behind.
    ///
    /// Overlapping refreshes are allowed; only the most recently started one
    /// may publish its result.
    pub async fn refresh(&self) -> SyncSnapshot {
        let generation = self.begin();
        let result = self.repository.fetch_rows().await;
        self.complete(generation, result);
        self.current()
    }

    /// Issue a new generation and mark the snapshot as loading
    pub fn begin(&self) -> u64 {
        let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.snapshot
            .send_modify(|current| *current = current.loading(generation, Utc::now()));
        tracing::debug!("Sync generation {} started", generation);
        generation
    }

    /// Publish the outcome of a fetch. Returns false when a newer generation
    /// has been issued and the outcome was discarded.
    pub fn complete(&self, generation: u64, result: anyhow::Result<Rows>) -> bool {
        let latest = &self.latest_generation;
        let policy = self.policy;

        self.snapshot.send_if_modified(|current| {
            let newest = latest.load(Ordering::SeqCst);
            if generation != newest {
                tracing::debug!(
                    "Discarding sync generation {} (latest is {})",
                    generation,
                    newest
                );
                return false;
            }

            let now = Utc::now();
            *current = match result {
                Ok(rows) => {
                    let data = SheetData::from_rows(&rows);
                    tracing::info!(
                        "Sync generation {} loaded {} rows",
                        generation,
                        rows.len()
                    );
                    SyncSnapshot::from_sheet(data, generation, now)
                }
                Err(e) => {
                    let message = format!("{:#}", e);
                    tracing::warn!("Sync generation {} failed: {}", generation, message);
                    match policy {
                        FailurePolicy::Retain => current.failed_retaining(message, generation, now),
                        FailurePolicy::Reset => current.failed_resetting(message, generation, now),
                    }
                }
            };
            true
        })
    }
}
