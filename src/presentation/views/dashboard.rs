// Dashboard view
use super::cards::render_metric_grid;
use super::layout::{html_escape, render_logo};
use super::plotly::render_chart;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::domain::table::ObservationTable;
use crate::presentation::app_state::ViewSettings;

pub const NO_DATA_WARNING: &str = "No data available - please check your data sources";

pub fn render_dashboard(dashboard: &Dashboard, view: &ViewSettings) -> String {
    let energy_tabs = render_tabs(
        "energy",
        &[
            ("Trends", render_chart(&dashboard.energy.trend)),
            ("Composition", render_chart(&dashboard.energy.composition)),
            (
                "Raw Data",
                render_raw_table("View Raw Energy Data", &dashboard.energy.table, view.raw_rows),
            ),
        ],
    );

    let correlations = match &dashboard.water.correlations {
        Some(chart) => render_chart(chart),
        None => r#"<p class="info">Not enough numeric parameters to compute correlations.</p>"#
            .to_string(),
    };
    let water_tabs = render_tabs(
        "water",
        &[
            ("Temperature &amp; Humidity", render_chart(&dashboard.water.trend)),
            ("Correlations", correlations),
            (
                "Raw Data",
                render_raw_table(
                    "View Raw Water Quality Data",
                    &dashboard.water.table,
                    view.raw_rows,
                ),
            ),
        ],
    );

    format!(
        r#"<div class="main-header">{logo}</div>
<h1>🌊 {title}</h1>
<h2>System Metrics Overview</h2>
{metrics}
<hr>
<h2 class="section-title">Energy Performance Trend</h2>
{energy_tabs}
<hr>
<h2 class="section-title">Water Quality Performance Trend</h2>
{water_tabs}"#,
        logo = render_logo(view),
        title = html_escape(&dashboard.title),
        metrics = render_metric_grid(&dashboard.metrics, dashboard.settings.window),
    )
}

/// Body shown when either table failed to load: the error and a warning, nothing else
pub fn render_dashboard_error(error: &DashboardError) -> String {
    format!(
        r#"<div class="error">Error loading data: {error}</div>
<div class="warning">{NO_DATA_WARNING}</div>"#,
        error = html_escape(&error.to_string()),
    )
}

/// Tab strip; `tabs` holds (label, already rendered panel) pairs
fn render_tabs(group: &str, tabs: &[(&str, String)]) -> String {
    let mut buttons = String::new();
    let mut panels = String::new();
    for (idx, (label, panel)) in tabs.iter().enumerate() {
        let active = if idx == 0 { " active" } else { "" };
        let panel_id = format!("{group}-tab-{idx}");
        buttons.push_str(&format!(
            r#"<button type="button" class="tab-button{active}" data-tab="{panel_id}">{label}</button>"#
        ));
        panels.push_str(&format!(
            r#"<div id="{panel_id}" class="tab-panel{active}">{panel}</div>"#
        ));
    }
    format!(
        r#"<div class="tabs"><div class="tab-buttons">{buttons}</div>{panels}</div>"#
    )
}

/// Most recent `max_rows` rows in an expander
fn render_raw_table(summary: &str, table: &ObservationTable, max_rows: usize) -> String {
    let header: String = table
        .header()
        .iter()
        .map(|name| format!("<th>{}</th>", html_escape(name)))
        .collect();

    let total = table.row_count();
    let start = total.saturating_sub(max_rows);
    let rows: String = (start..total)
        .map(|row| {
            let cells: String = table
                .display_row(row)
                .iter()
                .map(|cell| format!("<td>{}</td>", html_escape(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    let note = if start > 0 {
        format!(
            r#"<p class="info">Showing the latest {} of {} rows.</p>"#,
            total - start,
            total
        )
    } else {
        String::new()
    };

    format!(
        r#"<details>
    <summary>{summary}</summary>
    {note}
    <div class="raw-table"><table><thead><tr>{header}</tr></thead><tbody>{rows}</tbody></table></div>
</details>"#,
        summary = html_escape(summary),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::tests::{
        energy_table, service, water_table, MemorySource, ENERGY_URL, WATER_URL,
    };
    use crate::domain::trend::TrendSettings;
    use crate::presentation::app_state::tests::view_settings;

    #[tokio::test]
    async fn test_dashboard_sections() {
        let source = MemorySource::default()
            .with(ENERGY_URL, energy_table())
            .with(WATER_URL, water_table());
        let dashboard = service(source)
            .get_dashboard(&TrendSettings::default())
            .await
            .unwrap();

        let html = render_dashboard(&dashboard, &view_settings());
        assert!(html.contains("System Metrics Overview"));
        assert!(html.contains("Energy Performance Trend"));
        assert!(html.contains("Water Quality Performance Trend"));
        assert!(html.contains(r#"<div id="energy-trend" class="chart">"#));
        assert!(html.contains(r#"<div id="energy-composition" class="chart">"#));
        assert!(html.contains(r#"<div id="water-trend" class="chart">"#));
        assert!(html.contains(r#"<div id="water-correlations" class="chart">"#));
        assert!(html.contains("View Raw Energy Data"));
        assert_eq!(html.matches(r#"class="metric-card "#).count(), 6);
    }

    #[test]
    fn test_error_view_has_warning_and_no_charts() {
        let error = DashboardError::Csv("found record with 1 field, expected 2".to_string());
        let html = render_dashboard_error(&error);
        assert!(html.contains(NO_DATA_WARNING));
        assert!(html.contains("Error loading data: malformed CSV"));
        assert!(!html.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_raw_table_caps_rows() {
        let html = render_raw_table("Raw", &energy_table(), 2);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("Showing the latest 2 of 5 rows."));
        assert!(html.contains("<th>solar</th>"));
    }
}
