// Table cache - per-URL memoization of loaded tables with optional TTL
use crate::application::table_source::TableSource;
use crate::domain::error::DashboardError;
use crate::domain::table::ObservationTable;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    table: Arc<ObservationTable>,
    loaded_at: Instant,
}

pub struct CachedTableSource<S> {
    inner: S,
    ttl: Option<Duration>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl<S: TableSource> CachedTableSource<S> {
    pub fn new(inner: S, ttl: Option<Duration>) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.ttl
            .map(|ttl| entry.loaded_at.elapsed() < ttl)
            .unwrap_or(true)
    }
}

#[async_trait]
impl<S: TableSource> TableSource for CachedTableSource<S> {
    async fn load(&self, url: &str) -> Result<Arc<ObservationTable>, DashboardError> {
        if let Some(entry) = self.entries.read().await.get(url) {
            if self.is_fresh(entry) {
                debug!("Cache hit for {}", url);
                return Ok(entry.table.clone());
            }
            debug!("Cache entry for {} expired", url);
        }

        let table = self.inner.load(url).await?;
        self.entries.write().await.insert(
            url.to_string(),
            CacheEntry {
                table: table.clone(),
                loaded_at: Instant::now(),
            },
        );
        Ok(table)
    }

    async fn invalidate(&self) {
        let mut entries = self.entries.write().await;
        debug!("Dropping {} cached tables", entries.len());
        entries.clear();
        drop(entries);
        self.inner.invalidate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::tests::{energy_table, MemorySource, ENERGY_URL};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_memoizes_per_url_without_ttl() {
        let source = MemorySource::default().with(ENERGY_URL, energy_table());
        let cache = CachedTableSource::new(source, None);

        let first = cache.load(ENERGY_URL).await.unwrap();
        let second = cache.load(ENERGY_URL).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.inner.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = CachedTableSource::new(MemorySource::default(), None);

        assert!(cache.load("memory://nowhere.csv").await.is_err());
        assert!(cache.load("memory://nowhere.csv").await.is_err());
        assert_eq!(cache.inner.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entries_reload() {
        let cache = CachedTableSource::new(
            MemorySource::default().with(ENERGY_URL, energy_table()),
            Some(Duration::from_millis(20)),
        );

        cache.load(ENERGY_URL).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.load(ENERGY_URL).await.unwrap();

        assert_eq!(cache.inner.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let source = MemorySource::default().with(ENERGY_URL, energy_table());
        let cache = CachedTableSource::new(source, None);

        cache.load(ENERGY_URL).await.unwrap();
        cache.invalidate().await;
        cache.load(ENERGY_URL).await.unwrap();

        assert_eq!(cache.inner.loads.load(Ordering::SeqCst), 2);
    }
}
