//! Engine configuration loaded from TOML.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use waypoint_defence_core::{GeometryError, GridGeometry, DEFAULT_CELL_SIZE, TICKS_PER_SECOND};

/// Seed used for wave composition when none is configured.
pub const DEFAULT_WAVE_SEED: u64 = 0x5eed;

/// Highest tick rate the runtime accepts.
pub const MAX_TICK_RATE_HZ: u32 = 1_000;

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse engine configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configured grid is unusable.
    #[error("invalid grid geometry: {0}")]
    Geometry(#[from] GeometryError),
    /// The tick rate would never advance the simulation.
    #[error("tick rate must be at least one tick per second")]
    ZeroTickRate,
    /// The tick rate is too high for a usable fixed step.
    #[error("tick rate must not exceed {MAX_TICK_RATE_HZ} ticks per second, got {0}")]
    TickRateTooHigh(u32),
}

/// Tunable parameters of the simulation runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of fixed ticks per simulated second.
    pub tick_rate_hz: u32,
    /// Side length of a grid cell in pixels.
    pub cell_size: f32,
    /// Seed that drives the enemy composition of every wave.
    pub wave_seed: u64,
}

impl EngineConfig {
    /// Parses a configuration from a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.geometry()?;
        let _ = self.tick_interval()?;
        Ok(())
    }

    /// Grid geometry described by the configuration.
    pub fn geometry(&self) -> Result<GridGeometry, ConfigError> {
        Ok(GridGeometry::with_cell_size(self.cell_size)?)
    }

    /// Fixed simulated duration of a single tick.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.tick_rate_hz > MAX_TICK_RATE_HZ {
            return Err(ConfigError::TickRateTooHigh(self.tick_rate_hz));
        }
        Ok(Duration::from_secs(1) / self.tick_rate_hz)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICKS_PER_SECOND,
            cell_size: DEFAULT_CELL_SIZE,
            wave_seed: DEFAULT_WAVE_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.tick_interval().expect("valid rate"), Duration::from_millis(50));
    }

    #[test]
    fn partial_document_overrides_selected_keys() {
        let config = EngineConfig::from_toml_str("cell_size = 32.0\nwave_seed = 7\n")
            .expect("valid config");
        assert_eq!(config.tick_rate_hz, TICKS_PER_SECOND);
        assert_eq!(config.wave_seed, 7);
        assert_eq!(
            config.geometry().expect("valid geometry").cell_size(),
            32.0
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = EngineConfig::from_toml_str("tick_rate = 30").expect_err("typo rejected");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn degenerate_values_are_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("tick_rate_hz = 0"),
            Err(ConfigError::ZeroTickRate)
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("cell_size = -1.0"),
            Err(ConfigError::Geometry(GeometryError::InvalidCellSize(_)))
        ));
    }

    #[test]
    fn tick_rates_above_the_cap_are_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("tick_rate_hz = 2000000000"),
            Err(ConfigError::TickRateTooHigh(2_000_000_000))
        ));

        let fastest = EngineConfig {
            tick_rate_hz: MAX_TICK_RATE_HZ,
            ..EngineConfig::default()
        };
        assert_eq!(
            fastest.tick_interval().expect("rate at the cap"),
            Duration::from_millis(1)
        );
    }
}
