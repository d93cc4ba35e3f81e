// Remote CSV table source over HTTP
use crate::application::table_source::TableSource;
use crate::domain::error::DashboardError;
use crate::domain::table::ObservationTable;
use crate::infrastructure::csv_parser::parse_table;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CsvRepository {
    client: reqwest::Client,
}

impl CsvRepository {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn fetch_text(&self, url: &str) -> Result<String, DashboardError> {
        let fetch_error = |reason: String| DashboardError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .header("Accept", "text/csv")
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("status {}", response.status())));
        }

        response.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}

#[async_trait]
impl TableSource for CsvRepository {
    async fn load(&self, url: &str) -> Result<Arc<ObservationTable>, DashboardError> {
        tracing::debug!("Fetching CSV from {}", url);
        let text = self.fetch_text(url).await?;
        let table = parse_table(&text)?;
        tracing::info!(
            "Loaded {} rows from {} (time column: {})",
            table.row_count(),
            url,
            table.time_index().map(|t| t.name.as_str()).unwrap_or("none")
        );
        Ok(Arc::new(table))
    }
}
