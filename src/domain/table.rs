// Observation table domain model
use super::error::DashboardError;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Column names recognised as the time index, in priority order.
pub const TIME_COLUMN_CANDIDATES: [&str; 4] = ["date", "timestamp", "time", "datetime"];

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Missing cells are stored as NaN.
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    fn reorder(&mut self, order: &[usize]) {
        match self {
            Column::Numeric(values) => *values = order.iter().map(|&i| values[i]).collect(),
            Column::Text(values) => *values = order.iter().map(|&i| values[i].clone()).collect(),
        }
    }
}

/// Position of a row on a chart's x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Time(NaiveDateTime),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndex {
    pub name: String,
    pub values: Vec<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    time: Option<TimeIndex>,
    names: Vec<String>,
    columns: Vec<Column>,
}

/// One record of a table reshaped to long format.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub x: AxisValue,
    pub parameter: String,
    pub value: f64,
}

impl ObservationTable {
    pub fn new(time: Option<TimeIndex>, columns: Vec<(String, Column)>) -> Self {
        let (names, columns) = columns.into_iter().unzip();
        Self { time, names, columns }
    }

    pub fn row_count(&self) -> usize {
        match (&self.time, self.columns.first()) {
            (Some(time), _) => time.values.len(),
            (None, Some(column)) => column.len(),
            (None, None) => 0,
        }
    }

    pub fn time_index(&self) -> Option<&TimeIndex> {
        self.time.as_ref()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, DashboardError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
    }

    pub fn numeric(&self, name: &str) -> Result<&[f64], DashboardError> {
        match self.column(name)? {
            Column::Numeric(values) => Ok(values),
            Column::Text(_) => Err(DashboardError::NotNumeric(name.to_string())),
        }
    }

    /// Fails on the first listed column that is absent or not numeric.
    pub fn require_numeric(&self, names: &[&str]) -> Result<(), DashboardError> {
        for name in names {
            self.numeric(name)?;
        }
        Ok(())
    }

    pub fn numeric_columns(&self) -> Vec<(&str, &[f64])> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter_map(|(name, column)| match column {
                Column::Numeric(values) => Some((name.as_str(), values.as_slice())),
                Column::Text(_) => None,
            })
            .collect()
    }

    pub fn axis_value(&self, row: usize) -> AxisValue {
        match &self.time {
            Some(time) => AxisValue::Time(time.values[row]),
            None => AxisValue::Index(row),
        }
    }

    /// Extracts a channel as a series, dropping missing values.
    pub fn series(&self, name: &str) -> Result<Series, DashboardError> {
        let values = self.numeric(name)?;
        let series = match &self.time {
            Some(time) => Series::timed(
                time.values
                    .iter()
                    .zip(values)
                    .filter(|(_, v)| !v.is_nan())
                    .map(|(t, v)| (*t, *v))
                    .collect(),
            ),
            None => Series::from_values(values.iter().copied().filter(|v| !v.is_nan()).collect()),
        };
        Ok(series)
    }

    /// Reshapes the listed columns into (x, parameter, value) records.
    pub fn melt(&self, value_columns: &[&str]) -> Result<Vec<LongRow>, DashboardError> {
        let mut rows = Vec::with_capacity(self.row_count() * value_columns.len());
        for name in value_columns {
            let values = self.numeric(name)?;
            for (row, value) in values.iter().enumerate() {
                if value.is_nan() {
                    continue;
                }
                rows.push(LongRow {
                    x: self.axis_value(row),
                    parameter: name.to_string(),
                    value: *value,
                });
            }
        }
        Ok(rows)
    }

    /// Stable ascending sort of every column by the time index.
    pub fn sort_by_time(&mut self) {
        let Some(time) = &mut self.time else {
            return;
        };
        let mut order: Vec<usize> = (0..time.values.len()).collect();
        order.sort_by_key(|&i| time.values[i]);
        if order.iter().enumerate().all(|(pos, &i)| pos == i) {
            return;
        }
        time.values = order.iter().map(|&i| time.values[i]).collect();
        for column in &mut self.columns {
            column.reorder(&order);
        }
    }

    /// Header row for raw rendering, time column first.
    pub fn header(&self) -> Vec<&str> {
        self.time
            .iter()
            .map(|t| t.name.as_str())
            .chain(self.column_names())
            .collect()
    }

    /// Cells of one row formatted for display, matching `header`.
    pub fn display_row(&self, row: usize) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.columns.len() + 1);
        if let Some(time) = &self.time {
            cells.push(time.values[row].format("%Y-%m-%d %H:%M:%S").to_string());
        }
        for column in &self.columns {
            cells.push(match column {
                Column::Numeric(values) if values[row].is_nan() => String::new(),
                Column::Numeric(values) => format!("{}", values[row]),
                Column::Text(values) => values[row].clone(),
            });
        }
        cells
    }
}

/// An ordered numeric sequence, optionally indexed by time.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    times: Option<Vec<NaiveDateTime>>,
    values: Vec<f64>,
}

impl Series {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { times: None, values }
    }

    pub fn timed(points: Vec<(NaiveDateTime, f64)>) -> Self {
        let (times, values) = points.into_iter().unzip();
        Self {
            times: Some(times),
            values,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn times(&self) -> Option<&[NaiveDateTime]> {
        self.times.as_deref()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }
}
