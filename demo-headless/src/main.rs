use clap::Parser;
use fire_ca_core::{
    scenario, strategy_for, wind_direction_sweep, GridEngine, SimulationConfig, StopReason,
    WaterDropPlan, WindModel,
};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Wildfire cellular automaton demo on the real domain
#[derive(Parser, Debug)]
#[command(name = "fire-ca-demo")]
#[command(about = "Stochastic wildfire CA simulation demo", long_about = None)]
struct Args {
    /// Load the run configuration from a JSON file (CLI flags below
    /// override nothing when this is set)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save the effective configuration to this path and exit without
    /// running
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Generation budget
    #[arg(short, long, default_value_t = 250)]
    generations: usize,

    /// RNG seed of the run
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Mean wind speed in m/s
    #[arg(long, default_value_t = 13.892)]
    wind_speed: f32,

    /// Prevailing wind bearing in degrees (0 = north, 90 = east)
    #[arg(short = 'd', long, default_value_t = 0.0, allow_negative_numbers = true)]
    wind_direction: f32,

    /// Weibull shape parameter of the wind speed distribution
    #[arg(long, default_value_t = 37.284)]
    weibull_k: f32,

    /// Weibull scale parameter of the wind speed distribution
    #[arg(long, default_value_t = 14.778)]
    weibull_c: f32,

    /// Place the power-plant ignition source
    #[arg(long)]
    power_plant: bool,

    /// Place the incinerator ignition source
    #[arg(long)]
    incinerator: bool,

    /// Enable intervention 1 (extend the forest westward)
    #[arg(long)]
    intervention_1: bool,

    /// Enable intervention 2 (extend the forest southward)
    #[arg(long)]
    intervention_2: bool,

    /// Enable intervention 3 (flood the canyon)
    #[arg(long)]
    intervention_3: bool,

    /// Run the post-fire regrowth strategy on an all-burnt domain
    #[arg(long)]
    regrow: bool,

    /// Water-dropping plan JSON file
    #[arg(short = 'p', long)]
    water_plan: Option<PathBuf>,

    /// Write the run timeline to this JSON file
    #[arg(short = 't', long)]
    timeline_out: Option<PathBuf>,

    /// Sweep wind directions (start,end inclusive) instead of a single run
    #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
    sweep: Option<Vec<i32>>,

    /// CSV output path of the sweep results
    #[arg(long, default_value = "wind_dir_effect_results.csv")]
    sweep_out: PathBuf,
}

impl Args {
    fn to_config(&self) -> Result<SimulationConfig, Box<dyn Error>> {
        if let Some(path) = &self.config {
            return Ok(SimulationConfig::load(path)?);
        }
        Ok(SimulationConfig {
            width: scenario::REAL_DOMAIN_SIZE,
            height: scenario::REAL_DOMAIN_SIZE,
            num_generations: self.generations,
            seed: self.seed,
            run_regrow: self.regrow,
            power_plant_enabled: self.power_plant,
            incinerator_enabled: self.incinerator,
            intervention_1_enabled: self.intervention_1,
            intervention_2_enabled: self.intervention_2,
            intervention_3_enabled: self.intervention_3,
            ..SimulationConfig::default()
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    if let Some(path) = &args.save_config {
        config.save(path)?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    config.validate()?;
    if let Some(cell_steps) = config.complexity_warning() {
        eprintln!("Warning: {cell_steps} cell-steps, this run may take a long time");
    }

    let wind = WindModel::new(
        args.wind_speed,
        args.wind_direction,
        args.weibull_k,
        args.weibull_c,
    );
    let plan = match &args.water_plan {
        Some(path) => WaterDropPlan::load(path)?,
        None => WaterDropPlan::empty(),
    };

    if let Some(range) = &args.sweep {
        let (start, end) = (range[0], range[1]);
        let directions: Vec<i32> = (start..=end).collect();
        let outcomes = wind_direction_sweep(&config, &wind, &directions, &plan)?;

        for outcome in &outcomes {
            match outcome.town_ignition_step {
                Some(step) => println!(
                    "{:>5}°  town ignited at generation {step} (coverage {:.4})",
                    outcome.direction, outcome.burning_fraction
                ),
                None => println!("{:>5}°  town never ignited", outcome.direction),
            }
        }
        fire_ca_core::save_csv(&outcomes, &args.sweep_out)?;
        println!("Sweep results saved to {}", args.sweep_out.display());
        return Ok(());
    }

    let grid = scenario::real_domain(&config);
    let mut strategy = strategy_for(&config, wind, plan);
    let mut engine = GridEngine::new(&config, grid)?;

    let summary = engine.run(strategy.as_mut());

    println!("=== Run complete ===");
    println!("Strategy:        {}", strategy.name());
    println!("Generations run: {}", summary.generations_run);
    match summary.stop_reason {
        StopReason::StopCondition => {
            let step = summary.town_ignition_step.unwrap_or(summary.generations_run);
            println!("Stopping condition met: town ignited at generation {step}");
        }
        StopReason::BudgetExhausted => println!("Generation budget exhausted"),
    }
    let last = engine.timeline().len() - 1;
    if let Some(fraction) = engine.timeline().burning_fraction(last) {
        println!("Final burning coverage: {:.4}", fraction);
    }

    if let Some(path) = &args.timeline_out {
        engine.timeline().save(path)?;
        println!("Timeline saved to {}", path.display());
    }

    Ok(())
}
