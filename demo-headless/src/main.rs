use clap::Parser;
use forest_sim_core::{
    first_crossing, run_batch, NamedScenario, ScenarioConfig, ScenarioSet, Trajectory,
    TrajectoryMetrics, DEFAULT_THRESHOLDS,
};
use tracing_subscriber::EnvFilter;

/// Forest conversion dynamics demo with configurable scenarios
#[derive(Parser, Debug)]
#[command(name = "forest-sim-demo")]
#[command(about = "Two-stock forest conversion simulation demo", long_about = None)]
struct Args {
    /// Run a single preset (base, enforcement, climate-stress, constant-pressure)
    #[arg(short, long)]
    preset: Option<String>,

    /// Load scenarios from a JSON file instead of the built-in presets
    #[arg(short, long)]
    scenarios: Option<String>,

    /// Write the built-in preset scenarios to a JSON file and exit
    #[arg(long)]
    write_scenarios: Option<String>,

    /// Override the simulation horizon in years
    #[arg(long)]
    horizon: Option<u32>,

    /// Override the first calendar year of the run
    #[arg(long)]
    start_year: Option<i32>,

    /// Override the enforcement factor (lower = stronger enforcement)
    #[arg(short, long)]
    enforcement: Option<f64>,

    /// Override the climate stress multiplier
    #[arg(short, long)]
    climate_stress: Option<f64>,

    /// Override the annual recovery rate
    #[arg(short, long)]
    recovery: Option<f64>,

    /// Print a year-by-year table for each scenario
    #[arg(short, long)]
    table: bool,

    /// Table row interval in years
    #[arg(long, default_value_t = 25)]
    table_interval: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Some(path) = &args.write_scenarios {
        match ScenarioSet::presets().save(path) {
            Ok(()) => println!("Wrote preset scenarios to {path}"),
            Err(e) => {
                eprintln!("Error writing scenarios: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut set = load_scenarios(&args);
    for scenario in &mut set.scenarios {
        apply_overrides(&mut scenario.config, &args);
    }

    let results = match run_batch(&set.as_batch()) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    println!("=== Threshold Crossing Years (total forest remaining) ===");
    for (name, trajectory) in &results {
        println!("\nScenario: {name}");
        for (label, fraction) in DEFAULT_THRESHOLDS {
            match first_crossing(trajectory, fraction) {
                Some(year) => println!("  {label}: {year}"),
                None => println!("  {label}: Not crossed within horizon"),
            }
        }

        let metrics = TrajectoryMetrics::from_trajectory(trajectory);
        let final_state = trajectory.final_state();
        println!(
            "  Final: {:.0} ha intact, {:.0} ha degraded, peak degraded {:.1}%",
            final_state.intact, final_state.degraded, metrics.peak_degraded_percentage
        );
        let clamped = trajectory.clamped_step_count();
        if clamped > 0 {
            println!(
                "  Note: flows were clamped in {clamped} step(s); demand exceeded available area"
            );
        }

        if args.table {
            print_table(trajectory, &metrics, args.table_interval.max(1));
        }
    }
}

fn load_scenarios(args: &Args) -> ScenarioSet {
    if let Some(path) = &args.scenarios {
        match ScenarioSet::load(path) {
            Ok(set) => set,
            Err(e) => {
                eprintln!("Error loading scenarios: {e}");
                std::process::exit(1);
            }
        }
    } else if let Some(preset_name) = &args.preset {
        let (name, config) = match preset_name.to_lowercase().as_str() {
            "base" | "baseline" => ("Base", ScenarioConfig::baseline()),
            "enforcement" => ("Enforcement", ScenarioConfig::strong_enforcement()),
            "climate-stress" | "climate" => ("Climate stress", ScenarioConfig::climate_stress()),
            "constant-pressure" | "constant" => {
                ("Constant pressure", ScenarioConfig::constant_pressure())
            }
            _ => {
                eprintln!(
                    "Unknown preset '{preset_name}' (expected base, enforcement, climate-stress, constant-pressure)"
                );
                std::process::exit(1);
            }
        };
        ScenarioSet {
            scenarios: vec![NamedScenario {
                name: name.to_string(),
                config,
            }],
        }
    } else {
        ScenarioSet::presets()
    }
}

fn apply_overrides(config: &mut ScenarioConfig, args: &Args) {
    if let Some(horizon) = args.horizon {
        config.horizon_years = horizon;
    }
    if let Some(start_year) = args.start_year {
        config.start_year = start_year;
    }
    if let Some(enforcement) = args.enforcement {
        config.enforcement_factor = enforcement;
    }
    if let Some(climate_stress) = args.climate_stress {
        config.climate_stress_multiplier = climate_stress;
    }
    if let Some(recovery) = args.recovery {
        config.recovery_rate = recovery;
    }
}

fn print_table(trajectory: &Trajectory, metrics: &TrajectoryMetrics, interval: u32) {
    println!("\n  Year | Intact (ha) | Degraded (ha) | Total (ha) | Lost (ha) | Degraded %");
    println!("  -----|-------------|---------------|------------|-----------|-----------");
    let last = trajectory.len() - 1;
    for (i, (year, state)) in trajectory
        .years()
        .iter()
        .zip(trajectory.states())
        .enumerate()
    {
        if i % interval as usize != 0 && i != last {
            continue;
        }
        println!(
            "  {year} | {:11.0} | {:13.0} | {:10.0} | {:9.0} | {:9.2}%",
            state.intact,
            state.degraded,
            state.total(),
            metrics.deforested_to_date[i],
            metrics.degraded_percentage[i],
        );
    }
}
