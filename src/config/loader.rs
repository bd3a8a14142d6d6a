//! Configuration loading from disk and credential loading from the
//! environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{CustodianConfig, VaultConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    /// The configured credential environment variable is unset or empty.
    MissingToken(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::MissingToken(var) => {
                write!(f, "environment variable {} is not set", var)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CustodianConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CustodianConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read the Vault bearer token from the configured environment variable.
///
/// The token never appears in config files or source; a missing or
/// empty variable is a fatal startup error.
pub fn load_vault_token(vault: &VaultConfig) -> Result<String, ConfigError> {
    match std::env::var(&vault.token_env) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ConfigError::MissingToken(vault.token_env.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let vault = VaultConfig {
            token_env: "CUSTODIAN_TEST_UNSET_TOKEN_VAR".into(),
            ..VaultConfig::default()
        };
        let result = load_vault_token(&vault);
        assert!(matches!(result, Err(ConfigError::MissingToken(_))));
    }

    #[test]
    fn test_token_read_from_env() {
        std::env::set_var("CUSTODIAN_TEST_TOKEN_VAR", "s.abc123");
        let vault = VaultConfig {
            token_env: "CUSTODIAN_TEST_TOKEN_VAR".into(),
            ..VaultConfig::default()
        };
        assert_eq!(load_vault_token(&vault).unwrap(), "s.abc123");
        std::env::remove_var("CUSTODIAN_TEST_TOKEN_VAR");
    }
}
