use serde::{Deserialize, Serialize};

/// Land stocks at one point in time, in hectares
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Intact forest area (ha)
    pub intact: f64,
    /// Degraded forest area (ha)
    pub degraded: f64,
}

impl SimulationState {
    /// Create a new state from stock values
    pub fn new(intact: f64, degraded: f64) -> Self {
        SimulationState { intact, degraded }
    }

    /// Total remaining forest area (ha)
    pub fn total(&self) -> f64 {
        self.intact + self.degraded
    }

    /// Total floored at 1 ha so ratios stay finite when both stocks are exhausted
    pub fn effective_total(&self) -> f64 {
        self.total().max(1.0)
    }

    /// Fraction of the remaining forest that is degraded, in [0, 1]
    pub fn degraded_share(&self) -> f64 {
        self.degraded / self.effective_total()
    }
}
