// Chart models to Plotly figures
use super::layout::{html_escape, TEXT};
use crate::domain::chart::{ChartData, ChartKind};
use serde_json::{json, Value};

pub fn to_figure(chart: &ChartData) -> Value {
    let title = json!({ "text": chart.title, "font": { "color": TEXT } });

    match &chart.kind {
        ChartKind::Line { y_title, series } => {
            let data: Vec<Value> = series
                .iter()
                .map(|s| {
                    let x: Vec<_> = s.points.iter().map(|p| p.x).collect();
                    let y: Vec<f64> = s.points.iter().map(|p| p.y).collect();
                    json!({
                        "type": "scatter",
                        "mode": "lines",
                        "name": s.name,
                        "x": x,
                        "y": y,
                        "line": { "color": s.color },
                    })
                })
                .collect();

            json!({
                "data": data,
                "layout": {
                    "title": title,
                    "hovermode": "x unified",
                    "legend": {
                        "orientation": "h",
                        "yanchor": "bottom",
                        "y": 1.02,
                        "xanchor": "right",
                        "x": 1,
                    },
                    "xaxis": { "title": { "text": "" } },
                    "yaxis": { "title": { "text": y_title } },
                    "plot_bgcolor": "white",
                    "paper_bgcolor": "white",
                },
            })
        }
        ChartKind::Pie { slices } => {
            let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
            let values: Vec<f64> = slices.iter().map(|s| s.value).collect();
            let colors: Vec<Option<&str>> = slices.iter().map(|s| s.color.as_deref()).collect();

            json!({
                "data": [{
                    "type": "pie",
                    "labels": labels,
                    "values": values,
                    "marker": { "colors": colors },
                    "sort": false,
                }],
                "layout": {
                    "title": title,
                    "paper_bgcolor": "white",
                },
            })
        }
        ChartKind::Heatmap { labels, matrix } => {
            json!({
                "data": [{
                    "type": "heatmap",
                    "x": labels,
                    "y": labels,
                    "z": matrix,
                    "zmin": -1,
                    "zmax": 1,
                    "colorscale": "Viridis",
                    "texttemplate": "%{z:.2f}",
                }],
                "layout": {
                    "title": title,
                    "yaxis": { "autorange": "reversed" },
                    "paper_bgcolor": "white",
                },
            })
        }
    }
}

/// Escape a JSON document for embedding inside an inline `<script>`
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub fn render_chart(chart: &ChartData) -> String {
    let figure = to_figure(chart);
    format!(
        r#"<div id="{id}" class="chart"></div>
<script>
(function () {{
    var figure = {figure};
    Plotly.newPlot("{id}", figure.data, figure.layout, {{ responsive: true, displaylogo: false }});
}})();
</script>"#,
        id = html_escape(&chart.id),
        figure = script_safe(&figure.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartPoint, PieSlice, SeriesData};
    use crate::domain::table::AxisValue;
    use chrono::NaiveDate;

    #[test]
    fn test_line_figure_uses_iso_timestamps() {
        let t = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        let chart = ChartData::new(
            "energy-trend".to_string(),
            "Energy".to_string(),
            ChartKind::Line {
                y_title: Some("kWh".to_string()),
                series: vec![SeriesData::new(
                    "solar".to_string(),
                    "solar".to_string(),
                    Some("#FFB300".to_string()),
                    vec![ChartPoint::new(AxisValue::Time(t), 1.5)],
                )],
            },
        );

        let figure = to_figure(&chart);
        assert_eq!(figure["data"][0]["x"][0], "2024-05-01T06:30:00");
        assert_eq!(figure["data"][0]["y"][0], 1.5);
        assert_eq!(figure["data"][0]["line"]["color"], "#FFB300");
        assert_eq!(figure["layout"]["yaxis"]["title"]["text"], "kWh");
    }

    #[test]
    fn test_pie_and_heatmap_figures() {
        let pie = ChartData::new(
            "pie".to_string(),
            "Composition".to_string(),
            ChartKind::Pie {
                slices: vec![PieSlice {
                    label: "wind".to_string(),
                    value: 2.0,
                    color: None,
                }],
            },
        );
        let figure = to_figure(&pie);
        assert_eq!(figure["data"][0]["type"], "pie");
        assert_eq!(figure["data"][0]["marker"]["colors"][0], Value::Null);

        let heatmap = ChartData::new(
            "corr".to_string(),
            "Correlations".to_string(),
            ChartKind::Heatmap {
                labels: vec!["a".to_string(), "b".to_string()],
                matrix: vec![vec![Some(1.0), None], vec![None, Some(1.0)]],
            },
        );
        let figure = to_figure(&heatmap);
        assert_eq!(figure["data"][0]["z"][0][1], Value::Null);
        assert_eq!(figure["data"][0]["colorscale"], "Viridis");
    }

    #[test]
    fn test_render_chart_escapes_script_breakout() {
        let chart = ChartData::new(
            "x".to_string(),
            "</script><script>alert(1)</script>".to_string(),
            ChartKind::Pie { slices: Vec::new() },
        );
        let html = render_chart(&chart);
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains(r#"Plotly.newPlot("x""#));
    }
}
