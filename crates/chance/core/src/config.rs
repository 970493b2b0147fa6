//! Environment-driven configuration for the default engine.
use std::env;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ChanceError, ErrorSeverity};
use crate::stream::{Position, Seed, StreamError, StreamState};

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl ChanceError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            Self::Stream(err) => err.error_code(),
        }
    }
}

/// Initial stream state for an engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChanceConfig {
    /// Seed for the stream. `None` derives one from the wall clock.
    pub seed: Option<Seed>,
    /// Position to seek to after seeding.
    pub position: Position,
}

impl ChanceConfig {
    pub const SEED_ENV: &'static str = "CHANCE_SEED";
    pub const POSITION_ENV: &'static str = "CHANCE_POSITION";

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CHANCE_SEED` - stream seed (default: derived from the clock)
    /// - `CHANCE_POSITION` - starting position, must not be negative (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = read_var::<Seed, _>(&lookup, Self::SEED_ENV)? {
            config.seed = Some(seed);
        }
        if let Some(position) = read_var::<i64, _>(&lookup, Self::POSITION_ENV)? {
            config.position = StreamState::try_from_signed(0, position)?.position;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Resolves the configured state, drawing a clock seed if none was set.
    pub fn initial_state(&self) -> StreamState {
        StreamState::new(self.seed.unwrap_or_else(clock_seed), self.position)
    }
}

/// Milliseconds since the epoch, truncated to 31 bits.
pub fn clock_seed() -> Seed {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    (millis & 0x7FFF_FFFF) as Seed
}

fn read_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ChanceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ChanceConfig::default());
        assert_eq!(config.seed, None);
        assert_eq!(config.position, 0);
    }

    #[test]
    fn reads_seed_and_position() {
        let config = ChanceConfig::from_lookup(lookup(&[
            ("CHANCE_SEED", "42"),
            ("CHANCE_POSITION", " 7 "),
        ]))
        .unwrap();
        assert_eq!(config.initial_state(), StreamState::new(42, 7));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ChanceConfig::from_lookup(lookup(&[("CHANCE_SEED", "  ")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn rejects_garbage_and_negative_position() {
        let err = ChanceConfig::from_lookup(lookup(&[("CHANCE_SEED", "forty-two")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "CHANCE_SEED", .. }));
        assert_eq!(err.error_code(), "CONFIG_INVALID_VALUE");

        let err = ChanceConfig::from_lookup(lookup(&[("CHANCE_POSITION", "-3")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Stream(StreamError::NegativePosition(-3))
        ));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn clock_seed_fits_in_31_bits() {
        assert!(clock_seed() <= 0x7FFF_FFFF);
        let state = ChanceConfig::default().with_position(3).initial_state();
        assert_eq!(state.position, 3);
    }
}
