// Source trait for observation tables
use crate::domain::error::DashboardError;
use crate::domain::table::ObservationTable;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait TableSource: Send + Sync {
    /// Load the table published at `url`, sorted by its time column when it has one
    async fn load(&self, url: &str) -> Result<Arc<ObservationTable>, DashboardError>;

    /// Drop any memoized tables so the next load goes back to the origin
    async fn invalidate(&self) {}
}
