//! Semantic configuration checks, run after deserialization.

use url::Url;

use crate::config::schema::CustodianConfig;

/// A single failed semantic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Validate a parsed configuration. Collects all failures rather than
/// stopping at the first one.
pub fn validate_config(config: &CustodianConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(err("listener.bind_address", "not a valid socket address"));
    }

    if Url::parse(&config.vault.address).is_err() {
        errors.push(err("vault.address", "not a valid URL"));
    }
    if config.vault.mount.is_empty()
        || !config
            .vault
            .mount
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        errors.push(err("vault.mount", "must be non-empty [A-Za-z0-9_-]"));
    }
    if config.vault.token_env.is_empty() {
        errors.push(err("vault.token_env", "must not be empty"));
    }
    if config.vault.timeout_secs == 0 {
        errors.push(err("vault.timeout_secs", "must be greater than zero"));
    }

    if Url::parse(&config.node.url).is_err() {
        errors.push(err("node.url", "not a valid URL"));
    }
    if config.node.timeout_secs == 0 {
        errors.push(err("node.timeout_secs", "must be greater than zero"));
    }
    if config.node.validity_window == 0 {
        errors.push(err("node.validity_window", "must be greater than zero"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(err("timeouts.request_secs", "must be greater than zero"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(err(
            "observability.metrics_address",
            "not a valid socket address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::CustodianConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CustodianConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_multiple_errors() {
        let mut config = CustodianConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.vault.address = "::::".into();
        config.node.validity_window = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "node.validity_window"));
    }

    #[test]
    fn test_rejects_bad_mount_charset() {
        let mut config = CustodianConfig::default();
        config.vault.mount = "cubby/hole".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "vault.mount");
    }
}
