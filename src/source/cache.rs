//! Time-to-live snapshot cache for the delivery table.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::{DeliverySource, SourceError};
use crate::models::DeliveryTable;

/// An immutable table plus the time it was loaded.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: Arc<DeliveryTable>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Metadata for this snapshot. TTLs past chrono's range expire at `MAX_UTC`.
    pub fn info(&self, ttl: Duration) -> SnapshotInfo {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| self.loaded_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SnapshotInfo {
            deliveries: self.table.len(),
            loaded_at: self.loaded_at,
            expires_at,
        }
    }
}

/// Snapshot metadata reported by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    pub deliveries: usize,
    pub loaded_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Holds the current snapshot and reloads it from the source once it is
/// older than the TTL.
///
/// Only one reload runs at a time, outside the snapshot lock. While it runs,
/// readers that already have a snapshot get the previous one, and a failed
/// reload keeps serving it.
pub struct SnapshotCache {
    source: Arc<dyn DeliverySource>,
    ttl: Duration,
    current: RwLock<Option<Snapshot>>,
    reload: Mutex<()>,
}

impl SnapshotCache {
    pub fn new(source: Arc<dyn DeliverySource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            current: RwLock::new(None),
            reload: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Return the current snapshot, reloading first if it has expired.
    pub async fn get(&self) -> Result<Snapshot, SourceError> {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let _reload = match self.reload.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                // A reload is already running
                if let Some(stale) = self.current.read().await.clone() {
                    debug!("Reload in progress, serving snapshot from {}", stale.loaded_at);
                    return Ok(stale);
                }
                let guard = self.reload.lock().await;
                if let Some(snapshot) = self.fresh().await {
                    return Ok(snapshot);
                }
                guard
            }
        };

        match self.load().await {
            Ok(snapshot) => {
                self.store(snapshot.clone()).await;
                Ok(snapshot)
            }
            Err(e) => match self.current.read().await.clone() {
                Some(stale) => {
                    warn!(
                        "Reload from {} failed, serving snapshot from {}: {}",
                        self.source.describe(),
                        stale.loaded_at,
                        e
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Reload now regardless of age.
    pub async fn force_refresh(&self) -> Result<Snapshot, SourceError> {
        let _reload = self.reload.lock().await;
        let snapshot = self.load().await?;
        self.store(snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Metadata for the current snapshot without triggering a load.
    pub async fn info(&self) -> Option<SnapshotInfo> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.info(self.ttl))
    }

    async fn load(&self) -> Result<Snapshot, SourceError> {
        let table = self.source.load().await?;
        info!(
            "Loaded {} deliveries from {}",
            table.len(),
            self.source.describe()
        );
        Ok(Snapshot {
            table: Arc::new(table),
            loaded_at: Utc::now(),
        })
    }

    async fn fresh(&self) -> Option<Snapshot> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|s| self.is_fresh(s))
            .cloned()
    }

    async fn store(&self, snapshot: Snapshot) {
        *self.current.write().await = Some(snapshot);
    }

    fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        let age = Utc::now().signed_duration_since(snapshot.loaded_at);
        let fresh = age
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(true);
        if !fresh {
            debug!("Snapshot from {} expired", snapshot.loaded_at);
        }
        fresh
    }
}
