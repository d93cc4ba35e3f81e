// Error taxonomy shared by the fetcher, the calculator and the dashboard builder
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("malformed CSV: {0}")]
    Csv(String),

    #[error("cannot parse timestamp {value:?} in column '{column}'")]
    Timestamp { column: String, value: String },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("cannot compute a reference value over an empty series")]
    EmptySeries,
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::Csv(err.to_string())
    }
}
