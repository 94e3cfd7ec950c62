use serde::Deserialize;
use std::time::Duration;

/// Default desktop-browser user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

/// Main configuration structure for Den-Harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub harvester: HarvesterConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(rename = "query")]
    pub queries: Vec<SearchQuery>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog: CatalogConfig::default(),
            harvester: HarvesterConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
            queries: default_queries(),
        }
    }
}

/// Catalog site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the catalog site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of search-result pages to paginate per query
    #[serde(rename = "max-search-pages")]
    pub max_search_pages: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: "https://www.scoutshop.org".to_string(),
            max_search_pages: 6,
        }
    }
}

/// Harvester behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvesterConfig {
    /// Maximum number of attempts per page fetch
    #[serde(rename = "retry-cap")]
    pub retry_cap: u32,

    /// Base delay between retry attempts (milliseconds); scaled by attempt number
    #[serde(rename = "retry-base-delay-ms")]
    pub retry_base_delay_ms: u64,

    /// Politeness delay between search-result pages (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Politeness delay after each image download (milliseconds)
    #[serde(rename = "download-delay-ms")]
    pub download_delay_ms: u64,

    /// Per-request socket timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        HarvesterConfig {
            retry_cap: 5,
            retry_base_delay_ms: 1200,
            page_delay_ms: 300,
            download_delay_ms: 400,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl HarvesterConfig {
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Request identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// User-Agent header value
    pub agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        UserAgentConfig {
            agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for downloaded images and the manifest
    #[serde(rename = "root-dir")]
    pub root_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            root_dir: "scout_awards_media".to_string(),
        }
    }
}

/// A single catalog search query
///
/// The type and den hints describe what the query is expected to surface;
/// they are informational only. Classification is always re-derived from the
/// fetched product page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "type-hint", default)]
    pub type_hint: String,

    #[serde(rename = "den-hint", default)]
    pub den_hint: String,

    pub text: String,
}

impl SearchQuery {
    fn new(type_hint: &str, den_hint: &str, text: &str) -> Self {
        SearchQuery {
            type_hint: type_hint.to_string(),
            den_hint: den_hint.to_string(),
            text: text.to_string(),
        }
    }
}

/// The built-in query list covering every award category and den
fn default_queries() -> Vec<SearchQuery> {
    vec![
        // Adventure Loops
        SearchQuery::new("loop", "lion", "lion adventure loop"),
        SearchQuery::new("loop", "tiger", "tiger adventure loop"),
        SearchQuery::new("loop", "wolf", "wolf adventure loop"),
        SearchQuery::new("loop", "bear", "bear adventure loop"),
        // Adventure Pins
        SearchQuery::new("pin", "webelos", "webelos adventure pin"),
        SearchQuery::new("pin", "arrow_of_light", "arrow of light adventure pin"),
        // Rank Emblems
        SearchQuery::new("rank_patch", "lion", "lion rank emblem patch"),
        SearchQuery::new("rank_patch", "tiger", "tiger rank emblem patch"),
        SearchQuery::new("rank_patch", "wolf", "wolf rank emblem patch"),
        SearchQuery::new("rank_patch", "bear", "bear rank emblem patch"),
        SearchQuery::new("rank_patch", "webelos", "webelos rank emblem patch"),
        SearchQuery::new(
            "rank_patch",
            "arrow_of_light",
            "arrow of light rank emblem patch",
        ),
    ]
}
