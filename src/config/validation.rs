use crate::config::types::{Config, CrawlerConfig, OutputConfig, TargetConfig};
use crate::resource::ResourceId;
use crate::ConfigError;
use url::Url;

/// Upper bound for `request-timeout-secs`
const MAX_TIMEOUT_SECS: u64 = 600;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_target_config(&config.target)?;
    validate_output_config(&config.output)?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

/// Validates the target service configuration
fn validate_target_config(config: &TargetConfig) -> Result<(), ConfigError> {
    if config.scheme != "https" && config.scheme != "http" {
        return Err(ConfigError::Validation(format!(
            "scheme must be 'https' or 'http', got '{}'",
            config.scheme
        )));
    }

    validate_host(&config.scheme, &config.host)?;

    ResourceId::parse(&config.start_resource)?;

    match (&config.username, &config.password) {
        (Some(_), None) => {
            return Err(ConfigError::Validation(
                "username is set but password is missing".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(ConfigError::Validation(
                "password is set but username is missing".to_string(),
            ));
        }
        (Some(username), Some(_)) if username.is_empty() => {
            return Err(ConfigError::Validation(
                "username cannot be empty".to_string(),
            ));
        }
        _ => {}
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the host, which must be a bare `host` or `host:port`
pub(crate) fn validate_host(scheme: &str, host: &str) -> Result<Url, ConfigError> {
    if host.is_empty() {
        return Err(ConfigError::InvalidHost("host cannot be empty".to_string()));
    }

    if host.contains('/') || host.contains('@') || host.contains('?') || host.contains('#') {
        return Err(ConfigError::InvalidHost(format!(
            "'{}' must be a host or host:port, not a URL",
            host
        )));
    }

    let origin = Url::parse(&format!("{}://{}/", scheme, host))
        .map_err(|e| ConfigError::InvalidHost(format!("'{}': {}", host, e)))?;

    if origin.host_str().is_none() {
        return Err(ConfigError::InvalidHost(format!("'{}' has no host", host)));
    }

    Ok(origin)
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if let Some(report_path) = &config.report_path {
        if report_path.is_empty() {
            return Err(ConfigError::Validation(
                "report-path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if let Some(prefix) = &config.link_prefix {
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "link-prefix must start with '/', got '{}'",
                prefix
            )));
        }
    }

    Ok(())
}
