use crate::config::types::{Config, LimitsConfig, OutputConfig, ServerConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_server_config(&config.server)?;
    validate_limits_config(&config.limits)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target service address
fn validate_server_config(config: &ServerConfig) -> ConfigResult<()> {
    if config.host.is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation(
            "port must be between 1 and 65535".to_string(),
        ));
    }

    // The host must form a syntactically valid gopher URL, since every
    // derived resource URL embeds it
    let candidate = format!("gopher://{}:{}/", config.host, config.port);
    Url::parse(&candidate).map_err(|e| {
        ConfigError::Validation(format!("host '{}' is not a valid hostname: {}", config.host, e))
    })?;

    Ok(())
}

/// Validates download limits
fn validate_limits_config(config: &LimitsConfig) -> ConfigResult<()> {
    if config.max_download_bytes < 1 {
        return Err(ConfigError::Validation(format!(
            "max_download_bytes must be >= 1, got {}",
            config.max_download_bytes
        )));
    }

    if config.download_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "download_timeout_secs must be >= 1, got {}",
            config.download_timeout_secs
        )));
    }

    if config.request_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "request_retries must be >= 1, got {}",
            config.request_retries
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.download_dir.is_empty() {
        return Err(ConfigError::Validation(
            "download_dir cannot be empty".to_string(),
        ));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "gopher.example.org".to_string(),
                port: 70,
                root_selector: String::new(),
            },
            limits: LimitsConfig::default(),
            output: OutputConfig {
                download_dir: "./downloads".to_string(),
                summary_path: "./summary.md".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut config = valid_config();
        config.server.host = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_byte_cap_rejected() {
        let mut config = valid_config();
        config.limits.max_download_bytes = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_retries_rejected() {
        let mut config = valid_config();
        config.limits.request_retries = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_download_dir_rejected() {
        let mut config = valid_config();
        config.output.download_dir = String::new();
        assert!(validate(&config).is_err());
    }
}
