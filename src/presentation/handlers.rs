// HTTP request handlers
use crate::domain::session::{Page, Session};
use crate::domain::trend::{ComparisonWindow, TrendSettings};
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use crate::presentation::session_store::{today, SessionHandle};
use crate::presentation::views::assistant::render_assistant;
use crate::presentation::views::dashboard::{render_dashboard, render_dashboard_error};
use crate::presentation::views::layout::{render_page, render_sidebar};
use crate::presentation::views::login::render_login;
use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    pub window: Option<String>,
    pub tolerance: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the active view; `?page=` switches it for the session
pub async fn index(
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let requested = query.page.as_deref().and_then(|p| p.parse::<Page>().ok());
    let handle = match requested {
        Some(page) => state.sessions.update(&headers, |s| s.page = page).await,
        None => state.sessions.resolve(&headers).await,
    };

    if state.requires_login(handle.session.authenticated) {
        return redirect(&handle, "/login");
    }

    let sidebar = render_sidebar(&handle.session, &state.view, today());
    let (title, main) = match handle.session.page {
        Page::Dashboard => {
            let main = match state
                .dashboard_service
                .get_dashboard(&handle.session.trend)
                .await
            {
                Ok(dashboard) => render_dashboard(&dashboard, &state.view),
                Err(e) => {
                    tracing::warn!("Dashboard unavailable: {}", e);
                    render_dashboard_error(&e)
                }
            };
            ("Dashboard", main)
        }
        Page::AiAssistant => ("AI Assistant", render_assistant(&state.view)),
    };

    let html = render_page(title, &state.view, &sidebar, &main);
    page_response(&headers, StatusCode::OK, html, &handle).await
}

/// Apply the sidebar's trend and date-range controls
pub async fn update_settings(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let current = state.sessions.resolve(&headers).await;
    if state.requires_login(current.session.authenticated) {
        return redirect(&current, "/login");
    }

    let today = today();
    let handle = state
        .sessions
        .update(&headers, |session| apply_settings(session, &form, today))
        .await;
    tracing::debug!(
        "Session {} trend settings: {} at {:.1}%",
        handle.id,
        handle.session.trend.window,
        handle.session.trend.tolerance_pct
    );
    redirect(&handle, "/")
}

pub async fn reset_settings(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let current = state.sessions.resolve(&headers).await;
    if state.requires_login(current.session.authenticated) {
        return redirect(&current, "/login");
    }

    let handle = state.sessions.update(&headers, Session::reset_trend).await;
    redirect(&handle, "/")
}

/// Drop cached tables so the next render refetches both CSV sources
pub async fn refresh_data(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let handle = state.sessions.resolve(&headers).await;
    if state.requires_login(handle.session.authenticated) {
        return redirect(&handle, "/login");
    }

    state.dashboard_service.refresh().await;
    tracing::info!("Data cache cleared by session {}", handle.id);
    redirect(&handle, "/")
}

pub async fn login_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let handle = state.sessions.resolve(&headers).await;
    if !state.requires_login(handle.session.authenticated) {
        return redirect(&handle, "/");
    }

    let html = render_page("Sign in", &state.view, "", &render_login(None));
    page_response(&headers, StatusCode::OK, html, &handle).await
}

pub async fn login(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state.view.auth_enabled {
        let handle = state.sessions.resolve(&headers).await;
        return redirect(&handle, "/");
    }

    if state.check_password(&form.password) {
        let handle = state
            .sessions
            .update(&headers, |s| s.authenticated = true)
            .await;
        tracing::info!("Session {} signed in", handle.id);
        return redirect(&handle, "/");
    }

    let handle = state.sessions.resolve(&headers).await;
    tracing::warn!("Rejected sign-in for session {}", handle.id);
    let html = render_page(
        "Sign in",
        &state.view,
        "",
        &render_login(Some("Incorrect password")),
    );
    page_response(&headers, StatusCode::UNAUTHORIZED, html, &handle).await
}

pub async fn logout(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let handle = state
        .sessions
        .update(&headers, |s| s.authenticated = false)
        .await;
    let target = if state.view.auth_enabled { "/login" } else { "/" };
    redirect(&handle, target)
}

/// The dashboard model for the session's trend settings as JSON
pub async fn dashboard_json(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let handle = state.sessions.resolve(&headers).await;

    let mut response = if state.requires_login(handle.session.authenticated) {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "login required" })),
        )
            .into_response()
    } else {
        match state
            .dashboard_service
            .get_dashboard(&handle.session.trend)
            .await
        {
            Ok(dashboard) => Json(dashboard).into_response(),
            Err(e) => {
                tracing::warn!("Dashboard unavailable: {}", e);
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() }))).into_response()
            }
        }
    };

    attach_cookie(&mut response, &handle);
    response
}

fn apply_settings(session: &mut Session, form: &SettingsForm, today: NaiveDate) {
    let window = form
        .window
        .as_deref()
        .and_then(|w| w.parse::<ComparisonWindow>().ok())
        .unwrap_or(session.trend.window);
    let tolerance = form
        .tolerance
        .as_deref()
        .and_then(|t| t.trim().parse::<f64>().ok())
        .unwrap_or(session.trend.tolerance_pct);
    session.trend = TrendSettings::new(window, tolerance);

    let start = parse_date(form.start_date.as_deref()).unwrap_or(session.date_range.start);
    let end = parse_date(form.end_date.as_deref()).unwrap_or(session.date_range.end);
    session.set_date_range(start, end, today);
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

async fn page_response(
    headers: &HeaderMap,
    status: StatusCode,
    html: String,
    handle: &SessionHandle,
) -> Response {
    let mut response = match html_response(status, html, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    };
    attach_cookie(&mut response, handle);
    response
}

fn redirect(handle: &SessionHandle, to: &str) -> Response {
    let mut response = Redirect::to(to).into_response();
    attach_cookie(&mut response, handle);
    response
}

fn attach_cookie(response: &mut Response, handle: &SessionHandle) {
    if let Some(cookie) = handle.set_cookie() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
}
