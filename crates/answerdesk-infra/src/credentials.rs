//! Airtable credential resolution.
//!
//! The access token only ever comes from the environment. The base id comes
//! from the environment first, then from `config.toml`.

use secrecy::SecretString;

use answerdesk_types::config::AirtableConfig;
use answerdesk_types::error::TableError;

pub const TOKEN_ENV: &str = "AIRTABLE_TOKEN";
pub const BASE_ID_ENV: &str = "AIRTABLE_BASE_ID";

/// Token and base id for one Airtable base.
///
/// Not `Debug`: the token must not end up in logs.
pub struct AirtableCredentials {
    pub token: SecretString,
    pub base_id: String,
}

/// Resolve credentials from the process environment and `config`.
pub fn resolve_credentials(config: &AirtableConfig) -> Result<AirtableCredentials, TableError> {
    resolve_credentials_with(config, read_env)
}

/// Resolve credentials using `lookup` in place of the environment.
pub fn resolve_credentials_with(
    config: &AirtableConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AirtableCredentials, TableError> {
    let token = lookup(TOKEN_ENV)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| TableError::Configuration(format!("{TOKEN_ENV} is not set")))?;

    let base_id = lookup(BASE_ID_ENV)
        .or_else(|| config.base_id.clone())
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            TableError::Configuration(format!(
                "no base id: set {BASE_ID_ENV} or airtable.base_id in config.toml"
            ))
        })?;

    Ok(AirtableCredentials {
        token: SecretString::from(token.trim().to_string()),
        base_id,
    })
}

fn read_env(key: &str) -> Option<String> {
    // Non-unicode values are treated as unset.
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_config_base_id() {
        let config = AirtableConfig {
            base_id: Some("appFromConfig".to_string()),
            ..AirtableConfig::default()
        };
        let creds = resolve_credentials_with(
            &config,
            env(&[(TOKEN_ENV, "patSecret"), (BASE_ID_ENV, "appFromEnv")]),
        )
        .unwrap();
        assert_eq!(creds.base_id, "appFromEnv");
        assert_eq!(creds.token.expose_secret(), "patSecret");
    }

    #[test]
    fn test_config_base_id_used_without_env() {
        let config = AirtableConfig {
            base_id: Some("appFromConfig".to_string()),
            ..AirtableConfig::default()
        };
        let creds = resolve_credentials_with(&config, env(&[(TOKEN_ENV, "patSecret")])).unwrap();
        assert_eq!(creds.base_id, "appFromConfig");
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let result = resolve_credentials_with(
            &AirtableConfig::default(),
            env(&[(BASE_ID_ENV, "app1")]),
        );
        assert!(matches!(result, Err(TableError::Configuration(_))));
    }

    #[test]
    fn test_missing_base_id_is_configuration_error() {
        let result =
            resolve_credentials_with(&AirtableConfig::default(), env(&[(TOKEN_ENV, "pat")]));
        match result {
            Err(TableError::Configuration(msg)) => assert!(msg.contains(BASE_ID_ENV)),
            _ => panic!("expected configuration error"),
        }
    }
}
