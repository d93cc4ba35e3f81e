// Dashboard domain model
use super::chart::ChartData;
use super::metric::MetricRecord;
use super::table::ObservationTable;
use super::trend::TrendSettings;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub settings: TrendSettings,
    pub metrics: Vec<MetricRecord>,
    pub energy: EnergySection,
    pub water: WaterSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnergySection {
    pub trend: ChartData,
    pub composition: ChartData,
    #[serde(skip)]
    pub table: Arc<ObservationTable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaterSection {
    pub trend: ChartData,
    pub correlations: Option<ChartData>,
    #[serde(skip)]
    pub table: Arc<ObservationTable>,
}
