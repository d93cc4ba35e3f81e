// Dashboard service - Use case for building the monitoring dashboard
use crate::application::charts::{
    correlation_heatmap, energy_composition_chart, energy_trend_chart, water_trend_chart,
};
use crate::application::table_source::TableSource;
use crate::domain::channels::{Channel, ENERGY_CHANNELS, ENERGY_REQUIRED, WATER_CHANNELS, WATER_REQUIRED};
use crate::domain::dashboard::{Dashboard, EnergySection, WaterSection};
use crate::domain::error::DashboardError;
use crate::domain::metric::MetricRecord;
use crate::domain::table::ObservationTable;
use crate::domain::trend::TrendSettings;
use std::sync::Arc;

pub const DASHBOARD_TITLE: &str = "AquaECO AI Aquaponics System Performance Dashboard";

#[derive(Debug, Clone)]
pub struct DataSources {
    pub energy_url: String,
    pub water_url: String,
}

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn TableSource>,
    sources: DataSources,
}

impl DashboardService {
    pub fn new(source: Arc<dyn TableSource>, sources: DataSources) -> Self {
        Self { source, sources }
    }

    /// Load both tables and build every card and chart. Any fetch failure or
    /// missing required column aborts the whole dashboard.
    pub async fn get_dashboard(&self, settings: &TrendSettings) -> Result<Dashboard, DashboardError> {
        let (energy, water) = futures::try_join!(
            self.source.load(&self.sources.energy_url),
            self.source.load(&self.sources.water_url)
        )?;

        energy.require_numeric(ENERGY_REQUIRED)?;
        water.require_numeric(WATER_REQUIRED)?;

        let mut metrics = self.build_metrics(&energy, ENERGY_CHANNELS, settings);
        metrics.extend(self.build_metrics(&water, WATER_CHANNELS, settings));

        Ok(Dashboard {
            title: DASHBOARD_TITLE.to_string(),
            settings: *settings,
            metrics,
            energy: EnergySection {
                trend: energy_trend_chart(&energy)?,
                composition: energy_composition_chart(&energy)?,
                table: energy,
            },
            water: WaterSection {
                trend: water_trend_chart(&water)?,
                correlations: correlation_heatmap(&water),
                table: water,
            },
        })
    }

    pub async fn refresh(&self) {
        self.source.invalidate().await;
    }

    fn build_metrics(
        &self,
        table: &ObservationTable,
        channels: &[Channel],
        settings: &TrendSettings,
    ) -> Vec<MetricRecord> {
        let mut metrics = Vec::new();

        for channel in channels {
            if !table.has_column(channel.column) {
                // Optional channel, no card
                continue;
            }

            let record = table.series(channel.column).and_then(|series| {
                MetricRecord::evaluate(
                    channel.title,
                    channel.unit,
                    channel.category,
                    &series,
                    settings,
                )
            });

            match record {
                Ok(record) => metrics.push(record),
                Err(e) => {
                    tracing::warn!("Skipping metric card {}: {}", channel.column, e);
                }
            }
        }

        metrics
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::metric::MetricCategory;
    use crate::domain::table::Column;
    use crate::domain::trend::{ComparisonWindow, Trend};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const ENERGY_URL: &str = "memory://energy.csv";
    pub const WATER_URL: &str = "memory://water.csv";

    /// In-memory source keyed by URL; unknown URLs fail like a broken fetch.
    #[derive(Default)]
    pub struct MemorySource {
        tables: HashMap<String, Arc<ObservationTable>>,
        pub loads: AtomicUsize,
    }

    impl MemorySource {
        pub fn with(mut self, url: &str, table: ObservationTable) -> Self {
            self.tables.insert(url.to_string(), Arc::new(table));
            self
        }
    }

    #[async_trait]
    impl TableSource for MemorySource {
        async fn load(&self, url: &str) -> Result<Arc<ObservationTable>, DashboardError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.tables
                .get(url)
                .cloned()
                .ok_or_else(|| DashboardError::Fetch {
                    url: url.to_string(),
                    reason: "not found".to_string(),
                })
        }
    }

    fn numeric(columns: Vec<(&str, Vec<f64>)>) -> ObservationTable {
        ObservationTable::new(
            None,
            columns
                .into_iter()
                .map(|(name, values)| (name.to_string(), Column::Numeric(values)))
                .collect(),
        )
    }

    pub fn energy_table() -> ObservationTable {
        numeric(vec![
            ("solar", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("biogas", vec![2.0, 2.0, 2.0, 2.0, 2.0]),
            ("wind", vec![5.0, 4.0, 3.0, 2.0, 1.0]),
            ("pumps", vec![f64::NAN; 5]),
        ])
    }

    pub fn water_table() -> ObservationTable {
        numeric(vec![
            ("temperature", vec![20.0, 21.0, 22.0, 23.0, 24.0]),
            ("humidity", vec![60.0, 61.0, 59.0, 60.0, 60.0]),
            ("ph", vec![7.0, 7.1, 6.9, 7.0, 7.2]),
        ])
    }

    pub fn service(source: MemorySource) -> DashboardService {
        DashboardService::new(
            Arc::new(source),
            DataSources {
                energy_url: ENERGY_URL.to_string(),
                water_url: WATER_URL.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_dashboard_builds_cards_and_charts() {
        let source = MemorySource::default()
            .with(ENERGY_URL, energy_table())
            .with(WATER_URL, water_table());
        let settings = TrendSettings::new(ComparisonWindow::GlobalAverage, 0.0);

        let dashboard = service(source).get_dashboard(&settings).await.unwrap();

        let titles: Vec<&str> = dashboard.metrics.iter().map(|m| m.title.as_str()).collect();
        // Empty pumps series is skipped, absent channels never get a card.
        assert_eq!(
            titles,
            vec![
                "Solar Generation",
                "Wind Generation",
                "Biogas Generation",
                "Temperature",
                "Humidity",
                "pH"
            ]
        );

        let solar = &dashboard.metrics[0];
        assert_eq!(solar.category, MetricCategory::Generation);
        assert_eq!(solar.trend, Trend::Rising);
        assert_eq!(dashboard.metrics[1].trend, Trend::Falling);
        assert_eq!(dashboard.metrics[2].trend, Trend::Stable);

        assert!(dashboard.water.correlations.is_some());
        assert_eq!(dashboard.energy.table.row_count(), 5);
    }

    #[tokio::test]
    async fn test_missing_required_column_fails_fast() {
        let water = numeric(vec![("temperature", vec![20.0])]);
        let source = MemorySource::default()
            .with(ENERGY_URL, energy_table())
            .with(WATER_URL, water);

        let result = service(source).get_dashboard(&TrendSettings::default()).await;
        assert!(matches!(
            result,
            Err(DashboardError::MissingColumn(name)) if name == "humidity"
        ));
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_dashboard() {
        let source = MemorySource::default().with(ENERGY_URL, energy_table());

        let result = service(source).get_dashboard(&TrendSettings::default()).await;
        assert!(matches!(result, Err(DashboardError::Fetch { url, .. }) if url == WATER_URL));
    }

    #[tokio::test]
    async fn test_two_numeric_water_columns_skip_heatmap() {
        let water = numeric(vec![
            ("temperature", vec![20.0, 21.0]),
            ("humidity", vec![60.0, 61.0]),
        ]);
        let source = MemorySource::default()
            .with(ENERGY_URL, energy_table())
            .with(WATER_URL, water);

        let dashboard = service(source)
            .get_dashboard(&TrendSettings::default())
            .await
            .unwrap();
        assert!(dashboard.water.correlations.is_none());
    }
}
