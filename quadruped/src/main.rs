use std::path::PathBuf;

use clap::Parser;
use miette::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quadruped::prelude::*;

/// Standard gravity, in m/s².
const GRAVITY: f64 = 9.81;

#[derive(Parser, Debug)]
#[clap(about = "Load a quadruped configuration and report the initial stance")]
struct Cli {
    /// Directory containing `quadruped.toml`.
    #[clap(long, short, default_value = "config")]
    config: PathBuf,

    /// Robot specific directory with values overriding the main configuration.
    #[clap(long, short)]
    overlay: Option<PathBuf>,

    /// Mass of the robot in kilograms, shared equally by the four feet.
    #[clap(long, short, default_value_t = 12.0)]
    mass: f64,
}

fn main() -> Result<()> {
    miette::set_panic_hook();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Cli::parse();

    let config = match &args.overlay {
        Some(overlay) => QuadrupedConfig::load_with_overlay(&args.config, overlay)?,
        None => QuadrupedConfig::load(&args.config)?,
    };
    let cycle = GaitCycle::from_config(&config)?;

    info!(
        base_link = %config.links.base_link,
        command = ?config.robot_cmd.linear_velocity,
        "loaded configuration"
    );

    for leg in Leg::ALL {
        info!(%leg, foot = ?cycle.last_reference(leg).position.inner, "initial foot position");
    }

    // every foot carries a quarter of the weight
    let force_per_foot = args.mass * GRAVITY / 4.0;
    let forces: Vec<f64> = Leg::ALL
        .into_iter()
        .flat_map(|_| [0.0, 0.0, force_per_foot])
        .collect();

    let joints = cycle.joints().initial_positions().to_vec();
    let torques = cycle.kinematics().force_to_torque(&joints, &forces)?;

    for (name, torque) in cycle.joints().names().to_vec().iter().zip(&torques) {
        info!(joint = name.as_str(), torque, "standing torque");
    }

    let feet = cycle.kinematics().forward_kinematics(&joints)?;
    let height = -feet.values().map(|foot| foot.z).sum::<f64>() / 4.0;
    info!(
        height,
        configured = config.robot_state.position[2],
        "standing height"
    );

    Ok(())
}
