// Application layer - Use cases over the observation tables
pub mod charts;
pub mod dashboard_service;
pub mod table_source;
