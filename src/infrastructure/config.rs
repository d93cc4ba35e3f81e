use serde::Deserialize;

const CONFIG_FILE: &str = "config/dashboard";
const ENV_PREFIX: &str = "AQUAECO";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub sources: SourceSettings,
    pub branding: BrandingSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    /// Sessions untouched for this long are dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_session_idle_secs() -> u64 {
    24 * 60 * 60
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub energy_url: String,
    pub water_url: String,
    /// Unset keeps fetched tables for the lifetime of the process.
    pub cache_ttl_secs: Option<u64>,
    /// Unset waits on the remote endpoint indefinitely.
    pub fetch_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrandingSettings {
    pub logo_url: Option<String>,
    pub brand_name: String,
    pub brand_link: Option<String>,
    pub assistant_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub raw_rows: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { raw_rows: 500 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthSettings {
    /// Enables the login gate when set. Meant to come from the environment.
    pub password: Option<String>,
}

impl AuthSettings {
    pub fn enabled(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Built-in defaults, then `config/dashboard.*`, then `AQUAECO__*` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("branding.brand_name", "Omfeonix")?
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
