//! Forest Conversion Dynamics Core Library
//!
//! Discrete-time two-stock model of a forested land area under competing
//! pressures: human land conversion, fire-driven degradation with a
//! reinforcing vulnerability feedback, and balancing natural recovery.
//! Built to explore qualitative sensitivities (does a policy lever shift the
//! year a collapse threshold is crossed?), not calibrated forecasts.
//!
//! ## Structure
//!
//! - `engine::step`: pure per-step state transition over the intact and
//!   degraded stocks, with conservation clamping
//! - `trajectory::run`: advances one scenario across its horizon;
//!   `run_batch` evaluates independent scenarios in parallel
//! - `analysis`: threshold-crossing scan and derived metric series
//! - `config` / `scenario`: validated scenario parameters, presets, and
//!   JSON persistence

pub mod analysis;
pub mod config;
pub mod engine;
pub mod scenario;
pub mod state;
pub mod trajectory;

pub use analysis::{
    constant_pressure_crossing_year, first_crossing, TrajectoryMetrics, DEFAULT_THRESHOLDS,
};
pub use config::{ConfigError, ScenarioConfig};
pub use engine::{step, StepFlows};
pub use scenario::{NamedScenario, ScenarioFileError, ScenarioSet};
pub use state::SimulationState;
pub use trajectory::{run, run_batch, Trajectory};
