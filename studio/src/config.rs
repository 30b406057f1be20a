use crate::error::{StudioError, StudioResult};
use crate::models::GeminiGenerationConfig;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub generation: GeminiGenerationConfig,
    pub bind_addr: SocketAddr,
    /// Sessions untouched for this long are ended.
    pub session_idle: Duration,
}

impl StudioConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> StudioResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> StudioResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(StudioError::MissingApiKey)?;

        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base = lookup("GEMINI_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let generation = GeminiGenerationConfig {
            temperature: parse_optional(&lookup, "GEMINI_TEMPERATURE")?,
            max_output_tokens: parse_optional(&lookup, "GEMINI_MAX_OUTPUT_TOKENS")?,
        };

        let bind_addr = lookup("STUDIO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| {
            StudioError::InvalidConfig(format!("STUDIO_BIND_ADDR '{}' is not a socket address", bind_addr))
        })?;

        let idle_secs = parse_optional(&lookup, "STUDIO_SESSION_IDLE_SECS")?
            .unwrap_or(DEFAULT_SESSION_IDLE_SECS);
        if idle_secs == 0 {
            return Err(StudioError::InvalidConfig(
                "STUDIO_SESSION_IDLE_SECS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            model,
            api_base,
            generation,
            bind_addr,
            session_idle: Duration::from_secs(idle_secs),
        })
    }
}

fn parse_optional<F, T>(lookup: &F, key: &str) -> StudioResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| StudioError::InvalidConfig(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = StudioConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, StudioError::MissingApiKey));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = StudioConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, StudioError::MissingApiKey));
    }

    #[test]
    fn defaults_apply() {
        let config = StudioConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.generation.is_empty());
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.session_idle, Duration::from_secs(3600));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = StudioConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9000/"),
            ("GEMINI_TEMPERATURE", "0.3"),
            ("GEMINI_MAX_OUTPUT_TOKENS", "1000"),
            ("STUDIO_BIND_ADDR", "127.0.0.1:8080"),
            ("STUDIO_SESSION_IDLE_SECS", "600"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.generation.temperature, Some(0.3));
        assert_eq!(config.generation.max_output_tokens, Some(1000));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.session_idle, Duration::from_secs(600));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = StudioConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MAX_OUTPUT_TOKENS", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, StudioError::InvalidConfig(_)));
    }

    #[test]
    fn zero_idle_timeout_is_rejected() {
        let err = StudioConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("STUDIO_SESSION_IDLE_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, StudioError::InvalidConfig(_)));
    }
}
