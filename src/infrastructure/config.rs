use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub branding: BrandingSettings,
    pub sheet: SheetSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
    #[serde(default)]
    pub sync: SyncSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrandingSettings {
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self { title: default_title() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetSettings {
    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
    pub spreadsheet_id: String,
    #[serde(default = "default_range")]
    pub range: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default = "default_weather_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_weather_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_weather_base_url(),
            latitude: 0.0,
            longitude: 0.0,
            timeout_secs: default_weather_timeout_secs(),
            cache_ttl_secs: default_weather_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SyncSettings {
    #[serde(default)]
    pub on_failure: FailurePolicy,
}

/// What a failed sync does to the values already on screen
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep showing the last good values next to the error
    #[default]
    Retain,
    /// Blank every tile and feed
    Reset,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_title() -> String {
    "Venue Dashboard".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_range() -> String {
    "Dashboard!A1:G16".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_weather_timeout_secs() -> u64 {
    3
}

fn default_weather_cache_ttl_secs() -> u64 {
    300
}

/// Load `config/dashboard.*`, overridable with `DASHBOARD__SECTION__KEY` variables
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config: DashboardConfig = toml::from_str(
            r#"
            [sheet]
            spreadsheet_id = "abc123"
            api_key = "key"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.branding.title, "Venue Dashboard");
        assert_eq!(config.sheet.range, "Dashboard!A1:G16");
        assert_eq!(config.sheet.base_url, "https://sheets.googleapis.com");
        assert!(!config.weather.enabled);
        assert_eq!(config.weather.timeout_secs, 3);
        assert_eq!(config.weather.cache_ttl_secs, 300);
        assert_eq!(config.sync.on_failure, FailurePolicy::Retain);
    }

    #[test]
    fn test_reset_policy() {
        let config: DashboardConfig = toml::from_str(
            r#"
            [sheet]
            spreadsheet_id = "abc123"
            api_key = "key"

            [sync]
            on_failure = "reset"

            [weather]
            enabled = true
            latitude = 45.52
            longitude = -122.68
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.sync.on_failure, FailurePolicy::Reset);
        assert!(config.weather.enabled);
        assert_eq!(config.weather.latitude, 45.52);
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.weather.cache_ttl_secs, 300);
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let result: Result<DashboardConfig, _> = toml::from_str("[branding]\ntitle = \"x\"\n");
        assert!(result.is_err());
    }
}
