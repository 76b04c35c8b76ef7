//! Trajectory driver: applies the engine across the configured horizon
//!
//! A run validates its configuration first, then advances year by year.
//! Each step depends on the previous one, so a single trajectory is strictly
//! sequential; independent scenarios share nothing and run in parallel in
//! `run_batch`.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ScenarioConfig};
use crate::engine::{step, StepFlows};
use crate::state::SimulationState;

/// Completed simulation run: one state per year plus the realized flows of
/// each transition. Never mutated after finalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    years: Vec<i32>,
    states: Vec<SimulationState>,
    flows: Vec<StepFlows>,
    initial_total: f64,
}

impl Trajectory {
    /// Calendar years, one per entry including the initial state
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// States, aligned with `years`
    pub fn states(&self) -> &[SimulationState] {
        &self.states
    }

    /// Realized flows, one per transition (length = horizon)
    pub fn flows(&self) -> &[StepFlows] {
        &self.flows
    }

    /// Total area at step 0
    pub fn initial_total(&self) -> f64 {
        self.initial_total
    }

    /// Number of entries (horizon + 1)
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True only for a zero-entry trajectory, which `run` never produces
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Final state of the run
    pub fn final_state(&self) -> SimulationState {
        self.states[self.states.len() - 1]
    }

    /// Total-area series in chronological order
    pub fn totals(&self) -> impl Iterator<Item = f64> + '_ {
        self.states.iter().map(SimulationState::total)
    }

    /// (year, total) pairs in chronological order
    pub fn year_totals(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.totals())
    }

    /// Number of steps in which a clamp curtailed a flow
    pub fn clamped_step_count(&self) -> usize {
        self.flows.iter().filter(|f| f.clamped).count()
    }
}

/// Run one scenario over its full horizon
///
/// Deterministic: the same configuration always yields an identical
/// trajectory.
///
/// # Errors
/// Returns `ConfigError` if the configuration fails validation; nothing is
/// rejected mid-run.
pub fn run(config: &ScenarioConfig) -> Result<Trajectory, ConfigError> {
    config.validate()?;

    let horizon = config.horizon_years as usize;
    let mut years = Vec::with_capacity(horizon + 1);
    let mut states = Vec::with_capacity(horizon + 1);
    let mut flows = Vec::with_capacity(horizon);

    let mut state = SimulationState::new(config.initial_intact, config.initial_degraded);
    let initial_total = state.total();
    years.push(config.start_year);
    states.push(state);

    for t in 0..horizon {
        let year = config.start_year + t as i32;
        let (next, flow) = step(&state, year, config);
        debug!(
            year,
            intact = next.intact,
            degraded = next.degraded,
            converted = flow.converted_degraded + flow.converted_intact,
            degraded_by_fire = flow.degraded_by_fire,
            recovered = flow.recovered,
            "step complete"
        );
        years.push(year + 1);
        states.push(next);
        flows.push(flow);
        state = next;
    }

    let trajectory = Trajectory {
        years,
        states,
        flows,
        initial_total,
    };

    let clamped = trajectory.clamped_step_count();
    if clamped > 0 {
        warn!(
            clamped_steps = clamped,
            "configuration demanded more area than available; flows were clamped"
        );
    }
    info!(
        start_year = config.start_year,
        horizon = config.horizon_years,
        final_total = trajectory.final_state().total(),
        "trajectory complete"
    );

    Ok(trajectory)
}

/// Run independent named scenarios in parallel
///
/// Scenario order is preserved in the output.
///
/// # Errors
/// Returns the first `ConfigError` encountered; valid scenarios in the same
/// batch are discarded.
pub fn run_batch(
    scenarios: &[(String, ScenarioConfig)],
) -> Result<Vec<(String, Trajectory)>, ConfigError> {
    scenarios
        .par_iter()
        .map(|(name, config)| Ok((name.clone(), run(config)?)))
        .collect()
}
