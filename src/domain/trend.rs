// Reference value and trend classification
use super::error::DashboardError;
use super::table::Series;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_TOLERANCE_PCT: f64 = 10.0;
pub const DEFAULT_TOLERANCE_PCT: f64 = 2.0;

/// Historical scope used to compute a reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonWindow {
    #[default]
    GlobalAverage,
    LastHour,
    LastSixHours,
    LastDay,
}

impl ComparisonWindow {
    pub const ALL: [ComparisonWindow; 4] = [
        ComparisonWindow::GlobalAverage,
        ComparisonWindow::LastHour,
        ComparisonWindow::LastSixHours,
        ComparisonWindow::LastDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComparisonWindow::GlobalAverage => "Global Average",
            ComparisonWindow::LastHour => "Last 1h",
            ComparisonWindow::LastSixHours => "Last 6h",
            ComparisonWindow::LastDay => "Last 24h",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ComparisonWindow::GlobalAverage => "global_average",
            ComparisonWindow::LastHour => "last_hour",
            ComparisonWindow::LastSixHours => "last_six_hours",
            ComparisonWindow::LastDay => "last_day",
        }
    }

    fn hours(&self) -> Option<i64> {
        match self {
            ComparisonWindow::GlobalAverage => None,
            ComparisonWindow::LastHour => Some(1),
            ComparisonWindow::LastSixHours => Some(6),
            ComparisonWindow::LastDay => Some(24),
        }
    }

    /// Trailing row count used when the series has no time index.
    /// Assumes one sample every five minutes.
    fn fallback_rows(&self) -> Option<usize> {
        self.hours().map(|h| h as usize * 12)
    }
}

impl fmt::Display for ComparisonWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComparisonWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparisonWindow::ALL
            .into_iter()
            .find(|w| w.key() == s || w.label() == s)
            .ok_or_else(|| format!("unknown comparison window: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSettings {
    pub window: ComparisonWindow,
    pub tolerance_pct: f64,
}

impl TrendSettings {
    pub fn new(window: ComparisonWindow, tolerance_pct: f64) -> Self {
        let tolerance_pct = if tolerance_pct.is_finite() {
            tolerance_pct.clamp(0.0, MAX_TOLERANCE_PCT)
        } else {
            DEFAULT_TOLERANCE_PCT
        };
        Self {
            window,
            tolerance_pct,
        }
    }
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self::new(ComparisonWindow::default(), DEFAULT_TOLERANCE_PCT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub fn glyph(&self) -> &'static str {
        match self {
            Trend::Rising => "▲",
            Trend::Falling => "▼",
            Trend::Stable => "●",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Rising => "trend-rising",
            Trend::Falling => "trend-falling",
            Trend::Stable => "trend-stable",
        }
    }
}

pub fn compute_reference(series: &Series, window: ComparisonWindow) -> Result<f64, DashboardError> {
    let values = series.values();
    if values.is_empty() {
        return Err(DashboardError::EmptySeries);
    }

    let Some(hours) = window.hours() else {
        return Ok(mean(values));
    };

    match series.times() {
        Some(times) => {
            // Non-empty series always has a latest timestamp.
            let latest = times[times.len() - 1];
            let cutoff = latest - Duration::hours(hours);
            let windowed: Vec<f64> = times
                .iter()
                .zip(values)
                .filter(|(t, _)| **t >= cutoff)
                .map(|(_, v)| *v)
                .collect();
            Ok(mean(&windowed))
        }
        None => {
            let rows = window.fallback_rows().unwrap_or(values.len());
            let start = values.len().saturating_sub(rows);
            Ok(mean(&values[start..]))
        }
    }
}

pub fn classify(latest: f64, reference: f64, tolerance_pct: f64) -> Trend {
    let tol = reference.abs() * tolerance_pct / 100.0;
    if latest > reference + tol {
        Trend::Rising
    } else if latest < reference - tol {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

pub fn deviation_pct(latest: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        (latest - reference) / reference.abs() * 100.0
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
