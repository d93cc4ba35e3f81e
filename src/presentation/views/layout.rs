// Page shell, brand styling and sidebar
use crate::domain::session::{Page, Session};
use crate::domain::trend::{ComparisonWindow, MAX_TOLERANCE_PCT};
use crate::presentation::app_state::ViewSettings;
use chrono::NaiveDate;

pub const PRIMARY: &str = "#2e7d32";
pub const SECONDARY: &str = "#4caf50";
pub const ACCENT: &str = "#8bc34a";
pub const DARK: &str = "#1b5e20";
pub const LIGHT: &str = "#c8e6c9";
pub const TEXT: &str = "#333333";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap a view in the full document with sidebar
pub fn render_page(
    title: &str,
    view: &ViewSettings,
    sidebar: &str,
    main: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} · AquaECO Dashboard</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🌿</text></svg>">
    <style>{css}</style>
    <script src="{plotly}"></script>
</head>
<body>
    <aside class="sidebar">
        <div class="sidebar-logo-container">{logo}</div>
        {sidebar}
    </aside>
    <main class="main">
        {main}
    </main>
    <script>{js}</script>
</body>
</html>"#,
        title = html_escape(title),
        css = inline_css(),
        plotly = PLOTLY_CDN,
        logo = render_logo(view),
        sidebar = sidebar,
        main = main,
        js = inline_javascript(),
    )
}

/// Brand logo linked to the brand site, or the brand name when no logo is set
pub fn render_logo(view: &ViewSettings) -> String {
    let inner = match &view.logo_url {
        Some(url) => format!(
            r#"<img class="brand-logo" src="{src}" alt="{name} Logo">"#,
            src = html_escape(url),
            name = html_escape(&view.brand_name),
        ),
        None => format!(
            r#"<span class="brand-text">{}</span>"#,
            html_escape(&view.brand_name)
        ),
    };

    match &view.brand_link {
        Some(link) => format!(
            r#"<div class="brand"><a href="{href}" target="_blank" rel="noopener">{inner}</a></div>"#,
            href = html_escape(link),
        ),
        None => format!(r#"<div class="brand">{inner}</div>"#),
    }
}

pub fn render_sidebar(session: &Session, view: &ViewSettings, today: NaiveDate) -> String {
    let nav: String = [Page::Dashboard, Page::AiAssistant]
        .iter()
        .map(|page| {
            let class = if *page == session.page { "nav-link active" } else { "nav-link" };
            format!(
                r#"<a class="{class}" href="/?page={key}">{label}</a>"#,
                key = urlencoding::encode(page.key()),
                label = page.label(),
            )
        })
        .collect();

    let controls = match session.page {
        Page::Dashboard => render_dashboard_controls(session, today),
        Page::AiAssistant => String::new(),
    };

    let logout = if view.auth_enabled {
        r#"<form method="post" action="/logout" class="sidebar-form">
            <button type="submit" class="secondary">Log out</button>
        </form>"#
    } else {
        ""
    };

    format!(
        r#"<h2>🌿 Navigation</h2>
        <nav class="nav">{nav}</nav>
        {controls}
        {logout}"#
    )
}

fn render_dashboard_controls(session: &Session, today: NaiveDate) -> String {
    let options: String = ComparisonWindow::ALL
        .iter()
        .map(|window| {
            let selected = if *window == session.trend.window { " selected" } else { "" };
            format!(
                r#"<option value="{key}"{selected}>{label}</option>"#,
                key = window.key(),
                label = window.label(),
            )
        })
        .collect();

    format!(
        r#"<hr>
        <form method="post" action="/settings" class="sidebar-form">
            <h3>Trend Settings</h3>
            <label for="window">Comparison window</label>
            <select id="window" name="window">{options}</select>
            <label for="tolerance">Tolerance: <output id="tolerance-value">{tolerance:.1}</output>%</label>
            <input id="tolerance" name="tolerance" type="range" min="0" max="{max}" step="0.5"
                   value="{tolerance}" oninput="document.getElementById('tolerance-value').value = Number(this.value).toFixed(1)">
            <h3>Date Range Selector</h3>
            <div class="date-range">
                <label>Start date<input type="date" name="start_date" value="{start}" max="{today}"></label>
                <label>End date<input type="date" name="end_date" value="{end}" max="{today}"></label>
            </div>
            <button type="submit">Apply</button>
        </form>
        <form method="post" action="/settings/reset" class="sidebar-form">
            <button type="submit" class="secondary">Reset trend settings</button>
        </form>
        <form method="post" action="/refresh" class="sidebar-form">
            <button type="submit" class="secondary">Refresh data</button>
        </form>"#,
        tolerance = session.trend.tolerance_pct,
        max = MAX_TOLERANCE_PCT,
        start = session.date_range.start.format("%Y-%m-%d"),
        end = session.date_range.end.format("%Y-%m-%d"),
        today = today.format("%Y-%m-%d"),
    )
}

fn inline_css() -> String {
    format!(
        r#"
:root {{
    --primary: {PRIMARY};
    --secondary: {SECONDARY};
    --accent: {ACCENT};
    --dark: {DARK};
    --light: {LIGHT};
    --text: {TEXT};
}}

* {{ box-sizing: border-box; }}

body {{
    margin: 0;
    display: flex;
    min-height: 100vh;
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    color: var(--text);
    background-color: #f8faf9;
}}

.sidebar {{
    width: 280px;
    flex-shrink: 0;
    padding: 1.5rem 1rem;
    background: white;
    border-right: 1px solid #e1e4e8;
}}

.sidebar h2 {{ color: var(--primary); font-size: 1.2rem; }}
.sidebar h3 {{ color: var(--dark); font-size: 1rem; margin: 1rem 0 0.5rem; }}
.sidebar label {{ display: block; font-size: 0.85rem; margin: 0.5rem 0 0.25rem; }}
.sidebar select, .sidebar input {{ width: 100%; }}
.sidebar hr {{ border: none; border-top: 1px solid #e1e4e8; margin: 1rem 0; }}
.sidebar-form {{ margin-bottom: 0.75rem; }}
.date-range {{ display: grid; grid-template-columns: 1fr 1fr; gap: 0.5rem; }}

.nav {{ display: flex; flex-direction: column; gap: 0.25rem; }}
.nav-link {{
    padding: 0.5rem 0.75rem;
    border-radius: 6px;
    color: var(--dark);
    text-decoration: none;
}}
.nav-link.active, .nav-link:hover {{ background: var(--light); font-weight: 600; }}

button {{
    width: 100%;
    margin-top: 0.75rem;
    padding: 0.5rem;
    border: none;
    border-radius: 6px;
    color: white;
    background: var(--primary);
    cursor: pointer;
}}
button.secondary {{ color: var(--dark); background: var(--light); }}

.brand {{ text-align: center; margin-bottom: 1rem; }}
.brand a {{ text-decoration: none; }}
.brand-logo {{ max-width: 180px; opacity: 0.9; transition: all 0.3s; }}
.brand-logo:hover {{ opacity: 1; filter: drop-shadow(0 0 4px var(--accent)); }}
.brand-text {{ color: var(--primary); font-weight: 700; font-size: 1.5rem; }}

.main {{ flex: 1; padding: 1.5rem 2rem; min-width: 0; }}
.main-header {{ display: flex; align-items: center; gap: 20px; margin-bottom: 1.5rem; }}
.main h1 {{ color: var(--dark); }}
.section-title {{ color: var(--primary); }}
.main hr {{ border: none; border-top: 1px solid #e1e4e8; margin: 2rem 0; }}

.metric-grid {{
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
    gap: 1rem;
}}

.metric-card {{
    border-left: 4px solid var(--primary);
    background: white;
    padding: 15px;
    border-radius: 8px;
    box-shadow: 0 2px 8px rgba(0,0,0,0.08);
    transition: all 0.2s ease;
    height: 100%;
}}
.metric-card:hover {{ transform: translateY(-3px); box-shadow: 0 4px 12px rgba(0,0,0,0.12); }}
.metric-card.category-consumption {{ border-left-color: #f9a825; }}
.metric-card.category-water_quality {{ border-left-color: #0288d1; }}
.metric-title {{ color: var(--primary); font-size: 0.9rem; font-weight: 600; margin-bottom: 5px; }}
.metric-value {{ color: var(--dark); font-size: 1.6rem; font-weight: 700; }}
.metric-unit {{ font-size: 0.9rem; font-weight: 400; }}
.metric-reference {{ font-size: 0.8rem; color: #6b7280; margin-top: 4px; }}
.trend {{ font-size: 1rem; margin-left: 0.25rem; }}
.trend-rising {{ color: {SECONDARY}; }}
.trend-falling {{ color: #e53935; }}
.trend-stable {{ color: #9e9e9e; }}

.tabs {{ margin-top: 1rem; }}
.tab-buttons {{ display: flex; gap: 0.5rem; border-bottom: 1px solid #e1e4e8; }}
.tab-button {{
    width: auto;
    margin: 0;
    padding: 0.5rem 1rem;
    color: var(--text);
    background: none;
    border-bottom: 2px solid transparent;
    border-radius: 0;
}}
.tab-button.active {{ color: var(--primary); border-bottom-color: var(--primary); }}
.tab-panel {{ display: none; padding-top: 1rem; }}
.tab-panel.active {{ display: block; }}

.chart {{
    min-height: 420px;
    border-radius: 10px;
    box-shadow: 0 4px 6px rgba(0,0,0,0.05);
    border: 1px solid #e1e4e8;
    background: white;
    padding: 10px;
}}

.raw-table {{ max-height: 480px; overflow: auto; }}
.raw-table table {{ border-collapse: collapse; width: 100%; font-size: 0.85rem; background: white; }}
.raw-table th, .raw-table td {{ padding: 4px 8px; border-bottom: 1px solid #eef0f2; text-align: right; }}
.raw-table th {{ position: sticky; top: 0; background: var(--light); }}

.warning, .error {{ padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }}
.warning {{ background: #fff8e1; border-left: 4px solid #f9a825; }}
.error {{ background: #ffebee; border-left: 4px solid #e53935; }}
.info {{ color: #6b7280; font-size: 0.9rem; }}

.assistant-frame {{ width: 100%; height: 700px; border: none; border-radius: 10px; background: white; }}
.tips {{
    margin-top: 20px;
    padding: 20px;
    background-color: var(--light);
    border-radius: 10px;
    border-left: 4px solid var(--primary);
}}
.tips h4 {{ color: var(--primary); margin-top: 0; }}
.tips ul {{ color: var(--dark); }}

.login {{ max-width: 360px; margin: 4rem auto; padding: 2rem; background: white; border-radius: 10px;
         box-shadow: 0 2px 8px rgba(0,0,0,0.08); }}
.login input {{ width: 100%; padding: 0.5rem; }}

@media (max-width: 768px) {{
    body {{ flex-direction: column; }}
    .sidebar {{ width: 100%; border-right: none; border-bottom: 1px solid #e1e4e8; }}
    .main-header {{ flex-direction: column; align-items: flex-start; gap: 10px; }}
}}
"#
    )
}

fn inline_javascript() -> &'static str {
    r#"
document.querySelectorAll('.tabs').forEach(function (tabs) {
    tabs.querySelectorAll('.tab-button').forEach(function (button) {
        button.addEventListener('click', function () {
            tabs.querySelectorAll('.tab-button').forEach(function (b) { b.classList.remove('active'); });
            tabs.querySelectorAll('.tab-panel').forEach(function (p) { p.classList.remove('active'); });
            button.classList.add('active');
            var panel = document.getElementById(button.dataset.tab);
            panel.classList.add('active');
            panel.querySelectorAll('.js-plotly-plot').forEach(function (plot) { Plotly.Plots.resize(plot); });
        });
    });
});
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::app_state::tests::view_settings;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_logo_falls_back_to_brand_name() {
        let mut view = view_settings();
        view.logo_url = None;
        let html = render_logo(&view);
        assert!(html.contains(r#"<span class="brand-text">Omfeonix</span>"#));

        view.logo_url = Some("https://cdn.example.org/logo.png".to_string());
        assert!(render_logo(&view).contains(r#"src="https://cdn.example.org/logo.png""#));
    }

    #[test]
    fn test_sidebar_marks_active_page_and_controls() {
        let today = day(2024, 6, 1);
        let mut session = Session::new(today);
        let view = view_settings();

        let html = render_sidebar(&session, &view, today);
        assert!(html.contains(r#"<a class="nav-link active" href="/?page=dashboard">Dashboard</a>"#));
        assert!(html.contains(r#"<option value="global_average" selected>Global Average</option>"#));
        assert!(html.contains(r#"value="2023-06-01""#));
        assert!(!html.contains("/logout"));

        session.page = Page::AiAssistant;
        let html = render_sidebar(&session, &view, today);
        assert!(html.contains(r#"<a class="nav-link active" href="/?page=assistant">AI Assistant</a>"#));
        assert!(!html.contains("/settings"));
    }
}
