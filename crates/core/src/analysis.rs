//! Threshold-crossing analysis and derived metrics over a finished trajectory

use crate::trajectory::Trajectory;

/// Precautionary loss thresholds reported by the reference model
pub const DEFAULT_THRESHOLDS: [(&str, f64); 2] = [
    ("20% loss (80% remaining)", 0.80),
    ("25% loss (75% remaining)", 0.75),
];

/// First calendar year in which total remaining area falls to or below
/// `threshold_fraction` of the initial total, or `None` if the threshold is
/// never crossed within the horizon.
///
/// Scans in chronological order; the series is not assumed monotonic since
/// recovery can cause local increases in total area. The initial state is
/// the reference the threshold is measured against, not a crossing
/// candidate, so the scan starts at step 1.
pub fn first_crossing(trajectory: &Trajectory, threshold_fraction: f64) -> Option<i32> {
    let threshold_value = threshold_fraction * trajectory.initial_total();
    trajectory
        .year_totals()
        .skip(1)
        .find(|&(_, total)| total <= threshold_value)
        .map(|(year, _)| year)
}

/// Closed-form crossing year for the constant-pressure special case
/// (no fire, no recovery): solves `F0 - D * t <= fraction * F0` for the
/// smallest step `t >= 1`. `None` when pressure is not positive, since a
/// constant series below its starting point never crosses.
pub fn constant_pressure_crossing_year(
    start_year: i32,
    initial_total: f64,
    annual_pressure: f64,
    threshold_fraction: f64,
) -> Option<i32> {
    if annual_pressure <= 0.0 {
        return None;
    }
    let threshold_value = threshold_fraction * initial_total;
    let steps = ((initial_total - threshold_value) / annual_pressure).ceil().max(1.0);
    Some(start_year + steps as i32)
}

/// Per-step series derived from a finalized trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryMetrics {
    /// Cumulative loss against the initial total, floored at zero (ha)
    pub deforested_to_date: Vec<f64>,
    /// Degraded share of the remaining forest, as a percentage
    pub degraded_percentage: Vec<f64>,
    /// Maximum of `degraded_percentage` over the run
    pub peak_degraded_percentage: f64,
}

impl TrajectoryMetrics {
    /// Compute all derived series from a trajectory
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        let initial_total = trajectory.initial_total();

        let deforested_to_date = trajectory
            .totals()
            .map(|total| (initial_total - total).max(0.0))
            .collect();

        let degraded_percentage: Vec<f64> = trajectory
            .states()
            .iter()
            .map(|state| 100.0 * state.degraded / state.total().max(1.0))
            .collect();

        let peak_degraded_percentage = degraded_percentage.iter().copied().fold(0.0, f64::max);

        TrajectoryMetrics {
            deforested_to_date,
            degraded_percentage,
            peak_degraded_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::trajectory::run;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_crossing_returns_first_matching_year() {
        let config = ScenarioConfig::constant_pressure();
        let trajectory = run(&config).unwrap();

        // Any positive loss crosses a 100% threshold at the first step
        assert_eq!(first_crossing(&trajectory, 1.0), Some(2001));
    }

    #[test]
    fn test_never_crossed_returns_none() {
        let config = ScenarioConfig {
            horizon_years: 5,
            ..ScenarioConfig::constant_pressure()
        };
        let trajectory = run(&config).unwrap();

        // 5 years of constant pressure cannot remove 20% of the stock
        assert_eq!(first_crossing(&trajectory, 0.80), None);
    }

    #[test]
    fn test_scan_matches_closed_form_for_constant_pressure() {
        let config = ScenarioConfig::constant_pressure();
        let trajectory = run(&config).unwrap();

        for fraction in [0.95, 0.80, 0.75] {
            let expected = constant_pressure_crossing_year(
                config.start_year,
                config.initial_intact,
                config.base_human_pressure,
                fraction,
            );
            assert_eq!(first_crossing(&trajectory, fraction), expected);
        }
    }

    #[test]
    fn test_closed_form_edge_cases() {
        // A full-remaining threshold is met by the first step with any loss
        assert_eq!(
            constant_pressure_crossing_year(2000, 100.0, 10.0, 1.0),
            Some(2001)
        );
        // No pressure, never crossed
        assert_eq!(constant_pressure_crossing_year(2000, 100.0, 0.0, 0.8), None);
        // Exact division still counts the final step
        assert_eq!(
            constant_pressure_crossing_year(2000, 100.0, 10.0, 0.8),
            Some(2002)
        );
    }

    #[test]
    fn test_derived_metrics() {
        let config = ScenarioConfig {
            horizon_years: 3,
            ..ScenarioConfig::constant_pressure()
        };
        let trajectory = run(&config).unwrap();
        let metrics = TrajectoryMetrics::from_trajectory(&trajectory);

        assert_eq!(metrics.deforested_to_date.len(), 4);
        assert_eq!(metrics.deforested_to_date[0], 0.0);
        assert_relative_eq!(metrics.deforested_to_date[3], 3.0 * 81_240.0);
        // No fire model in this preset, so nothing ever degrades
        assert_eq!(metrics.peak_degraded_percentage, 0.0);
    }

    #[test]
    fn test_peak_degraded_percentage_tracks_fire_buildup() {
        let config = ScenarioConfig {
            base_human_pressure: 0.0,
            horizon_years: 50,
            ..ScenarioConfig::default()
        };
        let trajectory = run(&config).unwrap();
        let metrics = TrajectoryMetrics::from_trajectory(&trajectory);

        // Fire keeps degrading and recovery only damps it; the peak must be
        // the final entry and strictly positive
        let last = *metrics.degraded_percentage.last().unwrap();
        assert!(last > 0.0);
        assert_relative_eq!(metrics.peak_degraded_percentage, last);
    }
}
