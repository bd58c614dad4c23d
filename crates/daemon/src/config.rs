//! Daemon configuration (environment variables)

use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;
use waitline_api_http::HttpServerConfig;
use waitline_core::application::advancer::constants::{
    DEFAULT_ADVANCE_INTERVAL, DEFAULT_SERVE_PROBABILITY,
};
use waitline_core::application::queue::PartySizePolicy;
use waitline_infra_memory::SeedConfig;

pub const DEFAULT_LOG_FILTER: &str = "waitline=info,tower_http=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Development: coloured multi-line output
    Pretty,
    /// Production: one JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => bail!("unknown log format '{}' (expected 'pretty' or 'json')", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub http: HttpServerConfig,
    pub advance_interval: Duration,
    pub serve_probability: f64,
    pub seed: SeedConfig,
    pub party_size_policy: PartySizePolicy,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take defaults; malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = HttpServerConfig::default();

        let host = lookup("WAITLINE_HOST").unwrap_or(defaults.host);
        let port = parse_or(&lookup, "WAITLINE_PORT", defaults.port)?;

        let interval_ms = parse_or(
            &lookup,
            "WAITLINE_ADVANCE_INTERVAL_MS",
            DEFAULT_ADVANCE_INTERVAL.as_millis() as u64,
        )?;
        if interval_ms == 0 {
            bail!("WAITLINE_ADVANCE_INTERVAL_MS must be greater than zero");
        }

        let serve_probability =
            parse_or(&lookup, "WAITLINE_SERVE_PROBABILITY", DEFAULT_SERVE_PROBABILITY)?;
        if !(0.0..=1.0).contains(&serve_probability) {
            bail!(
                "WAITLINE_SERVE_PROBABILITY must be within 0.0..=1.0, got {}",
                serve_probability
            );
        }

        let seed_defaults = SeedConfig::default().range();
        let seed_min = parse_or(&lookup, "WAITLINE_SEED_MIN", *seed_defaults.start())?;
        let seed_max = parse_or(&lookup, "WAITLINE_SEED_MAX", *seed_defaults.end())?;
        let seed = SeedConfig::new(seed_min, seed_max)?;

        let party_size_policy = match lookup("WAITLINE_PARTY_SIZE_POLICY") {
            Some(raw) => raw.parse::<PartySizePolicy>()?,
            None => PartySizePolicy::default(),
        };

        let log_format = match lookup("WAITLINE_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::Pretty,
        };

        Ok(Self {
            http: HttpServerConfig { host, port },
            advance_interval: Duration::from_millis(interval_ms),
            serve_probability,
            seed,
            party_size_policy,
            log_format,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
