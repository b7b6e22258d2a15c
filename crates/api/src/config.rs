use axum::http::HeaderValue;
use tally_core::auth::token::{TokenConfig, DEFAULT_EXPIRY_MINS, MAX_EXPIRY_MINS};

/// Startup configuration problems. Any of these stops the process before it
/// begins serving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token signing secret and lifetime.
    pub tokens: TokenConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Required | Default                 |
    /// |------------------------|----------|-------------------------|
    /// | `DATABASE_URL`         | **yes**  | --                      |
    /// | `JWT_SECRET`           | **yes**  | --                      |
    /// | `JWT_EXPIRY_MINS`      | no       | `15`                    |
    /// | `HOST`                 | no       | `0.0.0.0`               |
    /// | `PORT`                 | no       | `3000`                  |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let secret = required("JWT_SECRET")?;

        let expiry_mins: i64 = parse_or(&lookup, "JWT_EXPIRY_MINS", DEFAULT_EXPIRY_MINS)?;
        if !(1..=MAX_EXPIRY_MINS).contains(&expiry_mins) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRY_MINS",
                reason: format!("must be between 1 and {MAX_EXPIRY_MINS}"),
            });
        }

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    reason: format!("'{origin}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            tokens: TokenConfig::new(secret).with_expiry_mins(expiry_mins),
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/tally"),
        ("JWT_SECRET", "super-secret"),
    ];

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.tokens.expiry_mins, DEFAULT_EXPIRY_MINS);
        assert_eq!(config.tokens.secret, "super-secret");
        assert_eq!(config.cors_origins.len(), 1);
    }

    #[test]
    fn missing_secret_is_fatal() {
        assert_matches!(
            load(&[("DATABASE_URL", "postgres://localhost/tally")]),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        assert_matches!(
            load(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "  ")]),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn missing_database_url_is_fatal() {
        assert_matches!(
            load(&[("JWT_SECRET", "s")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "not-a-port"));
        assert_matches!(load(&vars), Err(ConfigError::Invalid { name: "PORT", .. }));

        let mut vars = REQUIRED.to_vec();
        vars.push(("JWT_EXPIRY_MINS", "0"));
        assert_matches!(
            load(&vars),
            Err(ConfigError::Invalid { name: "JWT_EXPIRY_MINS", .. })
        );
    }

    #[test]
    fn token_lifetime_is_bounded() {
        for value in ["-5", "1441", "200000000000000000"] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("JWT_EXPIRY_MINS", value));
            assert_matches!(
                load(&vars),
                Err(ConfigError::Invalid { name: "JWT_EXPIRY_MINS", .. }),
                "{value}"
            );
        }

        let mut vars = REQUIRED.to_vec();
        vars.push(("JWT_EXPIRY_MINS", "1440"));
        assert_eq!(load(&vars).unwrap().tokens.expiry_mins, MAX_EXPIRY_MINS);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("CORS_ORIGINS", "http://a.test, http://b.test,,"));
        let config = load(&vars).unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }
}
