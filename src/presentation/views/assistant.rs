// AI assistant view
use super::layout::{html_escape, render_logo};
use crate::presentation::app_state::ViewSettings;

const TIPS: [&str; 4] = [
    "Ask \"How can I optimize energy usage in my system?\"",
    "Request \"Show me ideal water parameters for tilapia\"",
    "Try \"What's causing these temperature fluctuations?\"",
    "Ask \"How can I reduce my system's carbon footprint?\"",
];

pub fn render_assistant(view: &ViewSettings) -> String {
    let tips: String = TIPS
        .iter()
        .map(|tip| format!("<li>{}</li>", html_escape(tip)))
        .collect();

    format!(
        r#"<div class="main-header">{logo}</div>
<h1>🤖 AquaECO AI Assistant</h1>
<iframe class="assistant-frame" src="{src}" title="AquaECO AI Assistant" allow="clipboard-write"></iframe>
<div class="tips">
    <h4>💡 Assistant Tips</h4>
    <ul>{tips}</ul>
</div>"#,
        logo = render_logo(view),
        src = html_escape(&view.assistant_url),
    )
}
