//! Per-step state transition for the two-stock forest model
//!
//! `step` is pure and total: invalid demand is absorbed by clamping rather
//! than rejected, so the model stays well-defined for any validated
//! configuration. Flow ordering matters: conversion is resolved before fire
//! degradation draws on the same intact stock, and recovery draws on the
//! degraded stock net of this step's conversion.

use crate::config::ScenarioConfig;
use crate::state::SimulationState;

/// Ignore clamp engagements below this magnitude (float dust, not over-allocation)
const CLAMP_TOLERANCE: f64 = 1e-9;

/// Realized flow components of one step (all in hectares)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFlows {
    /// Human conversion demand after enforcement and regime shift
    pub human_demand: f64,
    /// Conversion satisfied from the degraded stock
    pub converted_degraded: f64,
    /// Conversion spilling onto the intact stock
    pub converted_intact: f64,
    /// Fire pressure after climate, vulnerability, and episodic factors
    pub fire_pressure: f64,
    /// Intact area degraded by fire this step
    pub degraded_by_fire: f64,
    /// Degraded area recovered to intact this step
    pub recovered: f64,
    /// True when a clamp curtailed a flow by more than float tolerance,
    /// i.e. the configuration demanded more area than was available
    pub clamped: bool,
}

/// Advance the stocks by one annual step
///
/// Deterministic and never fails; see module docs for the clamping policy.
pub fn step(
    state: &SimulationState,
    calendar_year: i32,
    config: &ScenarioConfig,
) -> (SimulationState, StepFlows) {
    let intact = state.intact;
    let degraded = state.degraded;

    // 1. Human conversion demand, with the persistent regime shift
    let regime_multiplier = if config.regime_shift_enabled
        && calendar_year >= config.regime_shift_start_year
    {
        config.regime_shift_multiplier
    } else {
        0.0
    };
    let human_demand =
        config.base_human_pressure * config.enforcement_factor * (1.0 + regime_multiplier);

    // 2. Allocate conversion, degraded land first; unmet demand spills onto intact
    let converted_degraded = degraded.min(human_demand * config.degraded_targeting_weight);
    let remaining_demand = (human_demand - converted_degraded).max(0.0);
    let converted_intact = intact.min(remaining_demand);

    // 3. Fire pressure with the reinforcing vulnerability feedback
    let vulnerability_factor =
        1.0 + config.vulnerability_feedback_strength * state.degraded_share();
    let episodic_bonus = if config.episodic_amplification_enabled
        && config.episodic_amplification_years.contains(&calendar_year)
    {
        config.episodic_amplification_multiplier
    } else {
        0.0
    };
    let fire_pressure = config.fire_base_pressure
        * config.climate_stress_multiplier
        * vulnerability_factor
        * (1.0 + episodic_bonus);

    // 4. Fire degrades only what conversion left standing
    let degraded_by_fire = (intact - converted_intact).min(fire_pressure).max(0.0);

    // 5. Recovery draws on degraded area net of this step's conversion
    let recovered = (degraded - converted_degraded)
        .min(config.recovery_rate * degraded)
        .max(0.0);

    // 6. Apply flows; the non-negative floors absorb float error only, the
    //    min clamps above already keep every flow within its source stock
    let next_intact = (intact - converted_intact - degraded_by_fire + recovered).max(0.0);
    let next_degraded = (degraded - converted_degraded + degraded_by_fire - recovered).max(0.0);

    let clamped = human_demand - (converted_degraded + converted_intact) > CLAMP_TOLERANCE
        || fire_pressure - degraded_by_fire > CLAMP_TOLERANCE
        || config.recovery_rate * degraded - recovered > CLAMP_TOLERANCE;

    let flows = StepFlows {
        human_demand,
        converted_degraded,
        converted_intact,
        fire_pressure,
        degraded_by_fire,
        recovered,
        clamped,
    };

    (SimulationState::new(next_intact, next_degraded), flows)
}
