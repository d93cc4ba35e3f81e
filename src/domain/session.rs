// Per-session interactive state
use super::trend::TrendSettings;
use chrono::{Months, NaiveDate};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    AiAssistant,
}

impl Page {
    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::AiAssistant => "assistant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::AiAssistant => "AI Assistant",
        }
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Page::Dashboard),
            "assistant" => Ok(Page::AiAssistant),
            other => Err(format!("unknown page: {other}")),
        }
    }
}

/// Date range picked in the sidebar. Collected and echoed back, never applied
/// to the displayed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// One year back from `today`, clamped for leap days.
    pub fn last_year(today: NaiveDate) -> Self {
        let start = today.checked_sub_months(Months::new(12)).unwrap_or(today);
        Self { start, end: today }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub page: Page,
    pub trend: TrendSettings,
    pub date_range: DateRange,
    pub authenticated: bool,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            page: Page::default(),
            trend: TrendSettings::default(),
            date_range: DateRange::last_year(today),
            authenticated: false,
        }
    }

    /// Update the date range; both bounds are capped at `today`.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate, today: NaiveDate) {
        let end = end.min(today);
        let start = start.min(end);
        self.date_range = DateRange { start, end };
    }

    pub fn reset_trend(&mut self) {
        self.trend = TrendSettings::default();
    }
}
