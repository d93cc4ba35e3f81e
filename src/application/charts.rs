// Chart builders - Stateless transforms from tables to chart models
use crate::domain::channels::{color_for, CLIMATE_PARAMETERS, GENERATION_SOURCES};
use crate::domain::chart::{ChartData, ChartKind, ChartPoint, PieSlice, SeriesData};
use crate::domain::error::DashboardError;
use crate::domain::table::ObservationTable;
use std::collections::BTreeMap;

/// Minimum number of numeric columns before a correlation heatmap is drawn.
const MIN_CORRELATION_COLUMNS: usize = 3;

pub fn energy_trend_chart(table: &ObservationTable) -> Result<ChartData, DashboardError> {
    let mut series = Vec::with_capacity(GENERATION_SOURCES.len());
    for source in GENERATION_SOURCES {
        let values = table.numeric(source)?;
        let points = values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(row, v)| ChartPoint::new(table.axis_value(row), *v))
            .collect();
        series.push(SeriesData::new(
            source.to_string(),
            source.to_string(),
            color_for(source).map(str::to_string),
            points,
        ));
    }

    Ok(ChartData::new(
        "energy-trend".to_string(),
        "Energy Generation Over Time".to_string(),
        ChartKind::Line {
            y_title: Some("kWh".to_string()),
            series,
        },
    ))
}

pub fn energy_composition_chart(table: &ObservationTable) -> Result<ChartData, DashboardError> {
    let mut slices = Vec::with_capacity(GENERATION_SOURCES.len());
    for source in GENERATION_SOURCES {
        let total = table
            .numeric(source)?
            .iter()
            .filter(|v| !v.is_nan())
            .sum::<f64>();
        slices.push(PieSlice {
            label: source.to_string(),
            value: total,
            color: color_for(source).map(str::to_string),
        });
    }

    Ok(ChartData::new(
        "energy-composition".to_string(),
        "Energy Source Composition".to_string(),
        ChartKind::Pie { slices },
    ))
}

pub fn water_trend_chart(table: &ObservationTable) -> Result<ChartData, DashboardError> {
    let long = table.melt(&CLIMATE_PARAMETERS)?;

    // Group the long-format rows back into one trace per parameter,
    // keeping the order the parameters were requested in.
    let mut grouped: BTreeMap<usize, Vec<ChartPoint>> = BTreeMap::new();
    for row in long {
        let Some(idx) = CLIMATE_PARAMETERS.iter().position(|p| *p == row.parameter) else {
            continue;
        };
        grouped
            .entry(idx)
            .or_default()
            .push(ChartPoint::new(row.x, row.value));
    }

    let series = grouped
        .into_iter()
        .map(|(idx, points)| {
            let parameter = CLIMATE_PARAMETERS[idx];
            SeriesData::new(
                parameter.to_string(),
                parameter.to_string(),
                color_for(parameter).map(str::to_string),
                points,
            )
        })
        .collect();

    Ok(ChartData::new(
        "water-trend".to_string(),
        "Temperature and Humidity Over Time".to_string(),
        ChartKind::Line {
            y_title: Some("Values".to_string()),
            series,
        },
    ))
}

/// Pearson correlation heatmap over every numeric column, or `None` when the
/// table has too few numeric columns to be worth plotting.
pub fn correlation_heatmap(table: &ObservationTable) -> Option<ChartData> {
    let columns = table.numeric_columns();
    if columns.len() < MIN_CORRELATION_COLUMNS {
        tracing::debug!(
            "Skipping correlation heatmap: {} numeric columns",
            columns.len()
        );
        return None;
    }

    let labels = columns.iter().map(|(name, _)| name.to_string()).collect();
    let matrix = columns
        .iter()
        .map(|(_, a)| columns.iter().map(|(_, b)| pearson(a, b)).collect())
        .collect();

    Some(ChartData::new(
        "water-correlations".to_string(),
        "Water Quality Parameter Correlations".to_string(),
        ChartKind::Heatmap { labels, matrix },
    ))
}

/// Pearson coefficient over the rows where both values are present.
/// Undefined when fewer than two such rows exist or either side is constant.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(x, y)| (*x, *y))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in &pairs {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    Some((cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{AxisValue, Column};

    fn water_table(columns: Vec<(&str, Vec<f64>)>) -> ObservationTable {
        ObservationTable::new(
            None,
            columns
                .into_iter()
                .map(|(name, values)| (name.to_string(), Column::Numeric(values)))
                .collect(),
        )
    }

    #[test]
    fn test_pearson() {
        let a = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&a, &[2.0, 4.0, 6.0, 8.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &[8.0, 6.0, 4.0, 2.0]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&a, &[5.0, 5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
    }

    #[test]
    fn test_pearson_uses_pairwise_complete_rows() {
        let a = [1.0, 2.0, f64::NAN, 3.0];
        let b = [10.0, 20.0, 1000.0, 30.0];
        assert!((pearson(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_heatmap_skipped_with_two_numeric_columns() {
        let table = water_table(vec![
            ("temperature", vec![20.0, 21.0, 22.0]),
            ("humidity", vec![60.0, 55.0, 50.0]),
        ]);
        assert!(correlation_heatmap(&table).is_none());
    }

    #[test]
    fn test_heatmap_matrix() {
        let table = water_table(vec![
            ("temperature", vec![20.0, 21.0, 22.0]),
            ("humidity", vec![60.0, 55.0, 50.0]),
            ("ph", vec![7.0, 7.0, 7.0]),
        ]);
        let chart = correlation_heatmap(&table).unwrap();
        let ChartKind::Heatmap { labels, matrix } = chart.kind else {
            panic!("expected heatmap");
        };
        assert_eq!(labels, vec!["temperature", "humidity", "ph"]);
        assert!((matrix[0][1].unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(matrix[2][2], None);
        assert!((matrix[0][0].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_water_trend_groups_long_rows_by_parameter() {
        let table = water_table(vec![
            ("temperature", vec![20.0, 21.0]),
            ("humidity", vec![60.0, f64::NAN]),
        ]);
        let chart = water_trend_chart(&table).unwrap();
        let ChartKind::Line { series, .. } = chart.kind else {
            panic!("expected line chart");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].id, "temperature");
        assert_eq!(series[0].color.as_deref(), Some("#EF5350"));
        assert_eq!(series[0].points[1], ChartPoint::new(AxisValue::Index(1), 21.0));
        assert_eq!(series[1].id, "humidity");
        assert_eq!(series[1].color.as_deref(), Some("#5C6BC0"));
        assert_eq!(series[1].points.len(), 1);
    }

    #[test]
    fn test_energy_composition_sums_sources() {
        let table = water_table(vec![
            ("solar", vec![1.0, 2.0]),
            ("biogas", vec![3.0, f64::NAN]),
            ("wind", vec![0.5, 0.5]),
        ]);
        let chart = energy_composition_chart(&table).unwrap();
        let ChartKind::Pie { slices } = chart.kind else {
            panic!("expected pie chart");
        };
        let totals: Vec<(String, f64)> = slices.into_iter().map(|s| (s.label, s.value)).collect();
        assert_eq!(
            totals,
            vec![
                ("solar".to_string(), 3.0),
                ("biogas".to_string(), 3.0),
                ("wind".to_string(), 1.0)
            ]
        );
    }

    #[test]
    fn test_energy_trend_requires_sources() {
        let table = water_table(vec![("solar", vec![1.0])]);
        assert!(matches!(
            energy_trend_chart(&table),
            Err(DashboardError::MissingColumn(name)) if name == "biogas"
        ));
    }
}
