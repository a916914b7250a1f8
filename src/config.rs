//! Environment configuration for the broker, gateway and listener binaries.
//!
//! Every struct has `from_env()` for the binaries and `from_lookup()` for
//! tests, which takes any `key -> Option<value>` function.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value could not be parsed.
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
    /// A list that must have at least one entry is empty.
    Empty(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value, reason } => {
                write!(f, "invalid value {:?} for {}: {}", value, key, reason)
            }
            ConfigError::Empty(name) => write!(f, "{} needs at least one endpoint", name),
        }
    }
}

impl Error for ConfigError {}

/// Broker settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    /// `PORT`, default 4000.
    pub port: u16,
    /// `DELIVERY_TIMEOUT_MS`, default 5000.
    pub delivery_timeout: Duration,
}

impl BrokerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_or(&lookup, "PORT", 4000)?,
            delivery_timeout: millis_or(&lookup, "DELIVERY_TIMEOUT_MS", 5000)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// `PORT`, default 3000.
    pub port: u16,
    /// `ORDER_SERVICE_URLS`, comma separated.
    pub order_services: Vec<String>,
    /// `RESTAURANT_SERVICE`.
    pub restaurant_service: String,
    /// `USER_SERVICE`.
    pub user_service: String,
    /// `UPSTREAM_TIMEOUT_MS`, default 10000.
    pub upstream_timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let order_services: Vec<String> = lookup("ORDER_SERVICE_URLS")
            .unwrap_or_else(|| "http://localhost:8001,http://localhost:8002".to_string())
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect();
        if order_services.is_empty() {
            return Err(ConfigError::Empty("ORDER_SERVICE_URLS".into()));
        }

        Ok(Self {
            port: parse_or(&lookup, "PORT", 3000)?,
            order_services,
            restaurant_service: lookup("RESTAURANT_SERVICE")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            user_service: lookup("USER_SERVICE")
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            upstream_timeout: millis_or(&lookup, "UPSTREAM_TIMEOUT_MS", 10_000)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Event listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// `PORT`, default 8080.
    pub port: u16,
    /// `BROKER_URL`, the broker's base URL.
    pub broker_url: String,
    /// `SELF_URL`, the callback URL sent when subscribing.
    pub self_url: String,
    /// `TOPIC`, default `ORDER_CREATED`.
    pub topic: String,
    /// `SERVICE_NAME`, reported by `/health`.
    pub service: String,
}

impl ListenerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "PORT", 8080)?;
        Ok(Self {
            port,
            broker_url: lookup("BROKER_URL").unwrap_or_else(|| "http://localhost:4000".to_string()),
            self_url: lookup("SELF_URL")
                .unwrap_or_else(|| format!("http://localhost:{}/events", port)),
            topic: lookup("TOPIC").unwrap_or_else(|| "ORDER_CREATED".to_string()),
            service: lookup("SERVICE_NAME").unwrap_or_else(|| "restaurant-service".to_string()),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default_ms: u64,
) -> Result<Duration, ConfigError> {
    parse_or(lookup, key, default_ms).map(Duration::from_millis)
}
