// Domain layer - Tables, trend calculation and dashboard models
pub mod channels;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod metric;
pub mod session;
pub mod table;
pub mod trend;
