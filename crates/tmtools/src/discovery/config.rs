use crate::error::Error;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Discovery API v2 base URL. Every request path is joined onto this.
pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2/";

/// Last-resort key so the binary still starts with zero configuration.
/// Real use requires a key from the config file or TICKETMASTER_API_KEY.
pub const FALLBACK_API_KEY: &str = "demo-api-key";

const DEFAULT_PAGE_SIZE: u64 = 200;
const DEFAULT_MAX_PAGES: u64 = 100;
const DEFAULT_THROTTLE_DELAY_SECS: u64 = 3;
const DEFAULT_PAGE_DELAY_SECS: u64 = 1;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Two path conventions are in circulation for the same endpoints:
/// `venues?...` and `venues.json?...`. Which one a deployment expects is a
/// policy, so it is configuration rather than a hard-coded choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    #[default]
    Plain,
    Json,
}

impl PathStyle {
    pub fn listing_path(&self, resource: &str) -> String {
        match self {
            PathStyle::Plain => resource.to_string(),
            PathStyle::Json => format!("{resource}.json"),
        }
    }

    pub fn detail_path(&self, resource: &str, id: &str) -> String {
        match self {
            PathStyle::Plain => format!("{resource}/{id}"),
            PathStyle::Json => format!("{resource}/{id}.json"),
        }
    }
}

/// Optional TOML config file. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    base_url: Option<String>,
    path_style: Option<PathStyle>,
    page_size: Option<u64>,
    max_pages: Option<u64>,
    throttle_delay_secs: Option<u64>,
    page_delay_secs: Option<u64>,
    cache_ttl_secs: Option<u64>,
}

/// Resolved Discovery configuration: connection details plus the engine
/// knobs (page size, throttle backoff, safety ceiling, courtesy delay).
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub base_url: String,
    pub api_key: String,
    pub path_style: PathStyle,
    pub page_size: u64,
    pub max_pages: u64,
    pub throttle_delay: Duration,
    pub page_delay: Duration,
    pub cache_ttl: Duration,
}

impl DiscoveryConfig {
    /// Load configuration. API key precedence: config file, then the
    /// TICKETMASTER_API_KEY environment variable, then the fallback default.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let file = read_config_file(path)?;
        let env_key = std::env::var("TICKETMASTER_API_KEY").ok();

        Ok(Self {
            base_url: file
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: resolve_api_key(file.api_key, env_key, None),
            path_style: file.path_style.unwrap_or_default(),
            page_size: file.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            max_pages: file.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            throttle_delay: Duration::from_secs(
                file.throttle_delay_secs.unwrap_or(DEFAULT_THROTTLE_DELAY_SECS),
            ),
            page_delay: Duration::from_secs(file.page_delay_secs.unwrap_or(DEFAULT_PAGE_DELAY_SECS)),
            cache_ttl: Duration::from_secs(file.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS)),
        })
    }

    /// Apply CLI overrides to the configuration.
    pub fn with_overrides(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        self
    }
}

/// An explicitly given path must exist; the implicit ./tmtools.toml is
/// optional and silently skipped when absent.
fn read_config_file(path: Option<&Path>) -> Result<ConfigFile, Error> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (std::path::PathBuf::from("tmtools.toml"), false),
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(ConfigFile::default());
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

fn resolve_api_key(
    file: Option<String>,
    env: Option<String>,
    cli_override: Option<String>,
) -> String {
    cli_override
        .or(file)
        .or(env)
        .unwrap_or_else(|| FALLBACK_API_KEY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_precedence_is_file_then_env_then_fallback() {
        assert_eq!(
            resolve_api_key(Some("file".into()), Some("env".into()), None),
            "file"
        );
        assert_eq!(resolve_api_key(None, Some("env".into()), None), "env");
        assert_eq!(resolve_api_key(None, None, None), FALLBACK_API_KEY);
    }

    #[test]
    fn cli_override_beats_everything() {
        assert_eq!(
            resolve_api_key(Some("file".into()), Some("env".into()), Some("cli".into())),
            "cli"
        );
    }

    #[test]
    fn path_style_controls_the_format_suffix() {
        assert_eq!(PathStyle::Plain.listing_path("venues"), "venues");
        assert_eq!(PathStyle::Json.listing_path("venues"), "venues.json");
        assert_eq!(PathStyle::Plain.detail_path("events", "e1"), "events/e1");
        assert_eq!(PathStyle::Json.detail_path("events", "e1"), "events/e1.json");
    }

    #[test]
    fn config_file_fields_are_all_optional() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.api_key.is_none());

        let file: ConfigFile = toml::from_str(
            r#"
            api_key = "abc"
            path_style = "json"
            max_pages = 50
            throttle_delay_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(file.api_key.as_deref(), Some("abc"));
        assert_eq!(file.path_style, Some(PathStyle::Json));
        assert_eq!(file.max_pages, Some(50));
        assert_eq!(file.throttle_delay_secs, Some(5));
    }
}
