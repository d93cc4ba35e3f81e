// HTML views
pub mod assistant;
pub mod cards;
pub mod dashboard;
pub mod layout;
pub mod login;
pub mod plotly;
