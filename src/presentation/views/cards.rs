// Metric card renderer
use super::layout::html_escape;
use crate::domain::metric::{MetricCategory, MetricRecord};
use crate::domain::trend::ComparisonWindow;

fn category_class(category: MetricCategory) -> &'static str {
    match category {
        MetricCategory::Generation => "category-generation",
        MetricCategory::Consumption => "category-consumption",
        MetricCategory::WaterQuality => "category-water_quality",
    }
}

pub fn render_metric_card(record: &MetricRecord, window: ComparisonWindow) -> String {
    format!(
        r#"<div class="metric-card {category}" title="{tooltip}">
    <div class="metric-title">{title}</div>
    <div class="metric-value">{latest:.2} <span class="metric-unit">{unit}</span><span class="trend {trend_class}">{glyph}</span></div>
    <div class="metric-reference">{window}: {reference:.2} {unit}</div>
</div>"#,
        category = category_class(record.category),
        tooltip = html_escape(&record.tooltip()),
        title = html_escape(&record.title),
        latest = record.latest,
        unit = html_escape(&record.unit),
        trend_class = record.trend.css_class(),
        glyph = record.trend.glyph(),
        window = window.label(),
        reference = record.reference,
    )
}

pub fn render_metric_grid(records: &[MetricRecord], window: ComparisonWindow) -> String {
    if records.is_empty() {
        return r#"<p class="info">No metrics available.</p>"#.to_string();
    }
    let cards: String = records
        .iter()
        .map(|record| render_metric_card(record, window))
        .collect();
    format!(r#"<div class="metric-grid">{cards}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trend::Trend;

    fn record() -> MetricRecord {
        MetricRecord {
            title: "Solar <PV>".to_string(),
            latest: 5.0,
            reference: 3.0,
            unit: "kWh".to_string(),
            category: MetricCategory::Generation,
            trend: Trend::Rising,
            deviation_pct: 66.666_666_7,
        }
    }

    #[test]
    fn test_card_contents() {
        let html = render_metric_card(&record(), ComparisonWindow::GlobalAverage);

        assert!(html.contains(r#"class="metric-card category-generation""#));
        assert!(html.contains(
            r#"title="Latest: 5.00 kWh / Reference: 3.00 kWh / Deviation: +66.7%""#
        ));
        assert!(html.contains("Solar &lt;PV&gt;"));
        assert!(html.contains(r#"5.00 <span class="metric-unit">kWh</span>"#));
        assert!(html.contains(r#"<span class="trend trend-rising">▲</span>"#));
        assert!(html.contains("Global Average: 3.00 kWh"));
    }

    #[test]
    fn test_empty_grid() {
        assert!(render_metric_grid(&[], ComparisonWindow::LastHour).contains("No metrics"));
    }
}
