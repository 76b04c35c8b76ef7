//! Scenario configuration for the two-stock forest model
//!
//! One `ScenarioConfig` subsumes the historical engine variants: zeroing
//! `fire_base_pressure` and `recovery_rate` reproduces the single-stock
//! constant-pressure model, and the regime-shift and episodic-amplification
//! flags switch the channelized shocks on and off. Defaults carry the
//! Colombian Amazon reference parameterization (IDEAM 2021 forest cover,
//! post-accord regime shift, El Niño fire years).

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Reference intact forest cover, hectares (IDEAM Amazon biome, 2021)
pub const REFERENCE_INTACT_HA: f64 = 39_011_117.0;

/// Reference baseline human-conversion demand, hectares/year
pub const REFERENCE_HUMAN_PRESSURE: f64 = 81_240.0;

/// Immutable per-run configuration: time horizon, initial stocks, and the
/// named scenario parameters driving the human, fire, and recovery flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// First calendar year of the run
    pub start_year: i32,
    /// Number of annual steps to simulate
    pub horizon_years: u32,
    /// Intact forest at step 0 (ha)
    pub initial_intact: f64,
    /// Degraded forest at step 0 (ha)
    pub initial_degraded: f64,

    /// Baseline annual human-conversion demand (ha/year)
    pub base_human_pressure: f64,
    /// Multiplicative dampener on human pressure; lower = stronger enforcement
    pub enforcement_factor: f64,
    /// Apply the persistent regime shift to human pressure
    pub regime_shift_enabled: bool,
    /// First year the regime shift applies
    pub regime_shift_start_year: i32,
    /// Persistent fractional increase to human pressure from the shift year on
    pub regime_shift_multiplier: f64,
    /// Fraction of conversion demand directed at degraded land first, in [0, 1]
    pub degraded_targeting_weight: f64,

    /// Baseline annual fire-driven degradation pressure (ha/year)
    pub fire_base_pressure: f64,
    /// Scalar amplifying fire pressure uniformly
    pub climate_stress_multiplier: f64,
    /// Coefficient coupling degraded share back into fire pressure
    pub vulnerability_feedback_strength: f64,
    /// Apply the episodic fire amplification in the designated years
    pub episodic_amplification_enabled: bool,
    /// Calendar years receiving the episodic boost
    pub episodic_amplification_years: FxHashSet<i32>,
    /// Fractional fire-pressure boost in designated years
    pub episodic_amplification_multiplier: f64,

    /// Fraction of degraded area reverting to intact per year, in [0, 1)
    pub recovery_rate: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            start_year: 2000,
            horizon_years: 200,
            initial_intact: REFERENCE_INTACT_HA,
            initial_degraded: 0.0,
            base_human_pressure: REFERENCE_HUMAN_PRESSURE,
            enforcement_factor: 1.0,
            regime_shift_enabled: true,
            regime_shift_start_year: 2017,
            regime_shift_multiplier: 0.30,
            degraded_targeting_weight: 0.20,
            fire_base_pressure: 20_000.0,
            climate_stress_multiplier: 1.0,
            vulnerability_feedback_strength: 2.0,
            episodic_amplification_enabled: true,
            episodic_amplification_years: [2015, 2016, 2023, 2024].into_iter().collect(),
            episodic_amplification_multiplier: 0.20,
            recovery_rate: 0.01,
        }
    }
}

impl ScenarioConfig {
    /// Reference scenario: regime shift on, neutral climate, moderate feedback
    pub fn baseline() -> Self {
        ScenarioConfig::default()
    }

    /// Stronger enforcement lowers human conversion pressure by 30%
    pub fn strong_enforcement() -> Self {
        ScenarioConfig {
            enforcement_factor: 0.7,
            ..ScenarioConfig::default()
        }
    }

    /// Hotter climate: more fire pressure and a stronger vulnerability loop
    pub fn climate_stress() -> Self {
        ScenarioConfig {
            climate_stress_multiplier: 1.7,
            vulnerability_feedback_strength: 4.0,
            ..ScenarioConfig::default()
        }
    }

    /// Single-stock worst case: constant human pressure, no fire, no recovery
    pub fn constant_pressure() -> Self {
        ScenarioConfig {
            regime_shift_enabled: false,
            fire_base_pressure: 0.0,
            episodic_amplification_enabled: false,
            recovery_rate: 0.0,
            ..ScenarioConfig::default()
        }
    }

    /// Validate parameter ranges before any simulation step runs
    ///
    /// # Errors
    /// Returns a `ConfigError` naming the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("initial_intact", self.initial_intact)?;
        non_negative("initial_degraded", self.initial_degraded)?;
        non_negative("base_human_pressure", self.base_human_pressure)?;
        non_negative("enforcement_factor", self.enforcement_factor)?;
        non_negative("regime_shift_multiplier", self.regime_shift_multiplier)?;
        non_negative("fire_base_pressure", self.fire_base_pressure)?;
        non_negative("climate_stress_multiplier", self.climate_stress_multiplier)?;
        non_negative(
            "vulnerability_feedback_strength",
            self.vulnerability_feedback_strength,
        )?;
        non_negative(
            "episodic_amplification_multiplier",
            self.episodic_amplification_multiplier,
        )?;
        in_range(
            "degraded_targeting_weight",
            self.degraded_targeting_weight,
            0.0,
            1.0,
        )?;
        if !self.recovery_rate.is_finite() {
            return Err(ConfigError::NonFinite {
                parameter: "recovery_rate",
            });
        }
        // Half-open range: a rate of exactly 1 would empty the degraded stock
        // in one step, which the model treats as out of domain
        if !(0.0..1.0).contains(&self.recovery_rate) {
            return Err(ConfigError::OutOfRange {
                parameter: "recovery_rate",
                value: self.recovery_rate,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { parameter });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { parameter, value });
    }
    Ok(())
}

fn in_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { parameter });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            parameter,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Configuration rejected before the first simulation step
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Parameter is NaN or infinite
    NonFinite { parameter: &'static str },
    /// Parameter must be non-negative
    Negative { parameter: &'static str, value: f64 },
    /// Parameter falls outside its documented range
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonFinite { parameter } => {
                write!(f, "Parameter '{parameter}' must be finite")
            }
            ConfigError::Negative { parameter, value } => {
                write!(f, "Parameter '{parameter}' must be non-negative, got {value}")
            }
            ConfigError::OutOfRange {
                parameter,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "Parameter '{parameter}' must be within [{min}, {max}], got {value}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScenarioConfig::default().validate().is_ok());
        assert!(ScenarioConfig::strong_enforcement().validate().is_ok());
        assert!(ScenarioConfig::climate_stress().validate().is_ok());
        assert!(ScenarioConfig::constant_pressure().validate().is_ok());
    }

    #[test]
    fn test_negative_pressure_rejected() {
        let config = ScenarioConfig {
            base_human_pressure: -1.0,
            ..ScenarioConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                parameter: "base_human_pressure",
                value: -1.0,
            })
        );
    }

    #[test]
    fn test_targeting_weight_bounded() {
        let config = ScenarioConfig {
            degraded_targeting_weight: 1.5,
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                parameter: "degraded_targeting_weight",
                ..
            })
        ));
    }

    #[test]
    fn test_full_recovery_rate_rejected() {
        let config = ScenarioConfig {
            recovery_rate: 1.0,
            ..ScenarioConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScenarioConfig {
            recovery_rate: 0.999,
            ..ScenarioConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let config = ScenarioConfig {
            climate_stress_multiplier: f64::NAN,
            ..ScenarioConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                parameter: "climate_stress_multiplier",
            })
        );
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = ScenarioConfig::climate_stress();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScenarioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
