// Password gate view
use super::layout::html_escape;

pub fn render_login(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();

    format!(
        r#"<div class="login">
    <h2>🔒 Sign in</h2>
    {error}
    <form method="post" action="/login">
        <label for="password">Password</label>
        <input id="password" name="password" type="password" autocomplete="current-password" autofocus>
        <button type="submit">Enter dashboard</button>
    </form>
</div>"#
    )
}
