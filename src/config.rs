//! Process configuration read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TOUCHLINE_BIND_ADDR` | `0.0.0.0:8000` |
//! | `TOUCHLINE_MAX_HANDOFF_CHAIN` | `10` |
//! | `TOUCHLINE_NEW_REGISTRATION_PARTICIPANT` | `New Registration Agent` |
//! | `TOUCHLINE_RENEWAL_PARTICIPANT` | `Renew Registration Agent` |
//! | `OPENAI_API_KEY` | required |
//! | `OPENAI_MODEL` | `gpt-4o-mini` |
//! | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
//! | `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID`, `AIRTABLE_TABLE_ID` | optional, all or none |

use std::net::SocketAddr;

use thiserror::Error;

use crate::conversation::adapters::memory::{NEW_REGISTRATION_AGENT, RENEW_REGISTRATION_AGENT};
use crate::conversation::domain::ParticipantName;
use crate::conversation::services::{DEFAULT_MAX_HANDOFF_CHAIN, TurnSettings};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable could not be parsed.
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },

    /// Only some of the Airtable variables are set.
    #[error("AIRTABLE_API_KEY, AIRTABLE_BASE_ID and AIRTABLE_TABLE_ID must be set together")]
    PartialAirtable,
}

/// Credentials for the hosted language model.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    /// Bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// API base URL, without the `/chat/completions` suffix.
    pub base_url: String,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Credentials and location of the Airtable player table.
#[derive(Clone, PartialEq, Eq)]
pub struct AirtableConfig {
    /// Personal access token.
    pub api_key: String,
    /// Base identifier.
    pub base_id: String,
    /// Table identifier.
    pub table_id: String,
}

impl std::fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("table_id", &self.table_id)
            .finish()
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Turn controller settings.
    pub turn: TurnSettings,
    /// Language model credentials.
    pub openai: OpenAiConfig,
    /// Record store credentials; `None` selects the in-memory store.
    pub airtable: Option<AirtableConfig>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `OPENAI_API_KEY` is unset,
    /// [`ConfigError::Invalid`] for unparseable values, and
    /// [`ConfigError::PartialAirtable`] when only some Airtable variables are
    /// set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_raw = get("TOUCHLINE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                name: "TOUCHLINE_BIND_ADDR",
                value: bind_raw.clone(),
                reason: err.to_string(),
            })?;

        let max_handoff_chain = match get("TOUCHLINE_MAX_HANDOFF_CHAIN") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|err| ConfigError::Invalid {
                    name: "TOUCHLINE_MAX_HANDOFF_CHAIN",
                    value: raw.clone(),
                    reason: err.to_string(),
                })?,
            None => DEFAULT_MAX_HANDOFF_CHAIN,
        };

        let new_registration = participant(
            "TOUCHLINE_NEW_REGISTRATION_PARTICIPANT",
            get("TOUCHLINE_NEW_REGISTRATION_PARTICIPANT"),
            NEW_REGISTRATION_AGENT,
        )?;
        let renewal = participant(
            "TOUCHLINE_RENEWAL_PARTICIPANT",
            get("TOUCHLINE_RENEWAL_PARTICIPANT"),
            RENEW_REGISTRATION_AGENT,
        )?;

        let openai = OpenAiConfig {
            api_key: get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_owned()),
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_owned()),
        };

        let airtable = match (
            get("AIRTABLE_API_KEY"),
            get("AIRTABLE_BASE_ID"),
            get("AIRTABLE_TABLE_ID"),
        ) {
            (Some(api_key), Some(base_id), Some(table_id)) => Some(AirtableConfig {
                api_key,
                base_id,
                table_id,
            }),
            (None, None, None) => None,
            _ => return Err(ConfigError::PartialAirtable),
        };

        Ok(Self {
            bind_addr,
            turn: TurnSettings::new(new_registration, renewal)
                .with_max_handoff_chain(max_handoff_chain),
            openai,
            airtable,
        })
    }
}

fn participant(
    name: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<ParticipantName, ConfigError> {
    let raw = value.unwrap_or_else(|| default.to_owned());
    ParticipantName::new(raw.as_str()).map_err(|err| ConfigError::Invalid {
        name,
        value: raw,
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn defaults_apply_when_only_the_api_key_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")]))
            .expect("config loads");

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.turn.max_handoff_chain(), DEFAULT_MAX_HANDOFF_CHAIN);
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert!(config.airtable.is_none());
    }

    #[rstest]
    fn missing_api_key_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[])).expect_err("key required");
        assert_eq!(err, ConfigError::Missing("OPENAI_API_KEY"));
    }

    #[rstest]
    fn blank_values_count_as_unset() {
        let err = AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")]))
            .expect_err("blank key rejected");
        assert_eq!(err, ConfigError::Missing("OPENAI_API_KEY"));
    }

    #[rstest]
    #[case("TOUCHLINE_BIND_ADDR", "not-an-address")]
    #[case("TOUCHLINE_MAX_HANDOFF_CHAIN", "ten")]
    #[case("TOUCHLINE_MAX_HANDOFF_CHAIN", "-1")]
    fn unparseable_values_are_rejected(#[case] name: &str, #[case] value: &str) {
        let err = AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk"), (name, value)]))
            .expect_err("invalid value rejected");
        assert!(matches!(err, ConfigError::Invalid { name: n, .. } if n == name));
    }

    #[rstest]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk"),
            ("TOUCHLINE_BIND_ADDR", "127.0.0.1:9000"),
            ("TOUCHLINE_MAX_HANDOFF_CHAIN", "3"),
            ("TOUCHLINE_RENEWAL_PARTICIPANT", "Renewals Desk"),
            ("AIRTABLE_API_KEY", "pat"),
            ("AIRTABLE_BASE_ID", "app1"),
            ("AIRTABLE_TABLE_ID", "tbl1"),
        ]))
        .expect("config loads");

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.turn.max_handoff_chain(), 3);
        assert_eq!(
            config
                .turn
                .starting_participant(crate::registration::domain::CodeType::RenewalRegistration)
                .as_str(),
            "Renewals Desk"
        );
        let airtable = config.airtable.expect("airtable configured");
        assert_eq!(airtable.base_id, "app1");
        assert_eq!(airtable.table_id, "tbl1");
    }

    #[rstest]
    fn partial_airtable_settings_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk"),
            ("AIRTABLE_API_KEY", "pat"),
        ]))
        .expect_err("partial settings rejected");
        assert_eq!(err, ConfigError::PartialAirtable);
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let config = AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-secret")]))
            .expect("config loads");
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
