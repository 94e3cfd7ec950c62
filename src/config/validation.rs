use crate::config::types::{
    CatalogConfig, Config, HarvesterConfig, OutputConfig, SearchQuery, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_harvester_config(&config.harvester)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_queries(&config.queries)?;
    Ok(())
}

/// Validates catalog site configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must use HTTP or HTTPS, got '{}'",
            url.scheme()
        )));
    }

    if config.max_search_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_search_pages must be >= 1, got {}",
            config.max_search_pages
        )));
    }

    Ok(())
}

/// Validates harvester behavior configuration
fn validate_harvester_config(config: &HarvesterConfig) -> Result<(), ConfigError> {
    if config.retry_cap < 1 {
        return Err(ConfigError::Validation(format!(
            "retry_cap must be >= 1, got {}",
            config.retry_cap
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates request identification configuration
///
/// Header values must be visible ASCII so they survive conversion into HTTP
/// header values when the client is built.
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent agent cannot be empty".to_string(),
        ));
    }

    validate_header_value("agent", &config.agent)?;
    validate_header_value("accept-language", &config.accept_language)?;

    Ok(())
}

fn validate_header_value(name: &str, value: &str) -> Result<(), ConfigError> {
    if !value.chars().all(|c| (' '..='~').contains(&c)) {
        return Err(ConfigError::Validation(format!(
            "{} must contain only visible ASCII characters, got '{}'",
            name, value
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root_dir.is_empty() {
        return Err(ConfigError::Validation(
            "root_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the search query list
fn validate_queries(queries: &[SearchQuery]) -> Result<(), ConfigError> {
    if queries.is_empty() {
        return Err(ConfigError::Validation(
            "at least one search query is required".to_string(),
        ));
    }

    for query in queries {
        if query.text.trim().is_empty() {
            return Err(ConfigError::Validation(
                "query text cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_zero_retry_cap() {
        let mut config = Config::default();
        config.harvester.retry_cap = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_max_search_pages() {
        let mut config = Config::default();
        config.catalog.max_search_pages = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let mut config = Config::default();
        config.catalog.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.catalog.base_url = "ftp://catalog.example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_root_dir() {
        let mut config = Config::default();
        config.output.root_dir = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_query_list() {
        let mut config = Config::default();
        config.queries.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_blank_query_text() {
        let mut config = Config::default();
        config.queries[0].text = "   ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_ascii_user_agent() {
        let mut config = Config::default();
        config.user_agent.agent = "harvester\u{2603}".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
