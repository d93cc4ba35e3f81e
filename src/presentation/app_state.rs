// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::AppConfig;
use crate::presentation::session_store::SessionStore;

/// Presentation settings shared by every view
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub brand_name: String,
    pub brand_link: Option<String>,
    pub logo_url: Option<String>,
    pub assistant_url: String,
    pub raw_rows: usize,
    pub auth_enabled: bool,
}

impl ViewSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            brand_name: config.branding.brand_name.clone(),
            brand_link: config.branding.brand_link.clone(),
            logo_url: config.branding.logo_url.clone(),
            assistant_url: config.branding.assistant_url.clone(),
            raw_rows: config.display.raw_rows,
            auth_enabled: config.auth.enabled(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub sessions: SessionStore,
    pub view: ViewSettings,
    pub password: Option<String>,
}

impl AppState {
    pub fn requires_login(&self, authenticated: bool) -> bool {
        self.view.auth_enabled && !authenticated
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        match &self.password {
            Some(expected) if !expected.is_empty() => expected == candidate,
            _ => false,
        }
    }
}
