// Metric presentation record
use super::error::DashboardError;
use super::table::Series;
use super::trend::{classify, compute_reference, deviation_pct, Trend, TrendSettings};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Generation,
    Consumption,
    WaterQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub title: String,
    pub latest: f64,
    pub reference: f64,
    pub unit: String,
    pub category: MetricCategory,
    pub trend: Trend,
    pub deviation_pct: f64,
}

impl MetricRecord {
    pub fn evaluate(
        title: &str,
        unit: &str,
        category: MetricCategory,
        series: &Series,
        settings: &TrendSettings,
    ) -> Result<Self, DashboardError> {
        let reference = compute_reference(series, settings.window)?;
        let latest = series.latest().ok_or(DashboardError::EmptySeries)?;

        Ok(Self {
            title: title.to_string(),
            latest,
            reference,
            unit: unit.to_string(),
            category,
            trend: classify(latest, reference, settings.tolerance_pct),
            deviation_pct: deviation_pct(latest, reference),
        })
    }

    pub fn tooltip(&self) -> String {
        format!(
            "Latest: {:.2} {unit} / Reference: {:.2} {unit} / Deviation: {:+.1}%",
            self.latest,
            self.reference,
            self.deviation_pct,
            unit = self.unit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trend::ComparisonWindow;

    #[test]
    fn test_evaluate_and_tooltip() {
        let series = Series::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let settings = TrendSettings::new(ComparisonWindow::GlobalAverage, 0.0);
        let record =
            MetricRecord::evaluate("Solar", "kWh", MetricCategory::Generation, &series, &settings)
                .unwrap();

        assert_eq!(record.reference, 3.0);
        assert_eq!(record.trend, Trend::Rising);
        assert_eq!(
            record.tooltip(),
            "Latest: 5.00 kWh / Reference: 3.00 kWh / Deviation: +66.7%"
        );
    }

    #[test]
    fn test_negative_deviation_sign() {
        let series = Series::from_values(vec![10.0, 8.0]);
        let settings = TrendSettings::new(ComparisonWindow::GlobalAverage, 0.0);
        let record =
            MetricRecord::evaluate("pH", "", MetricCategory::WaterQuality, &series, &settings)
                .unwrap();

        assert_eq!(record.trend, Trend::Falling);
        assert!(record.tooltip().ends_with("Deviation: -11.1%"));
    }

    #[test]
    fn test_empty_series_fails() {
        let series = Series::from_values(Vec::new());
        let result = MetricRecord::evaluate(
            "Wind",
            "kWh",
            MetricCategory::Generation,
            &series,
            &TrendSettings::default(),
        );
        assert!(matches!(result, Err(DashboardError::EmptySeries)));
    }
}
