//! Drive the gait cycle with simple stand-ins for the scheduler, the foothold planner and the
//! swing trajectory generator, and log the resulting joint commands.
//!
//! ```sh
//! RUST_LOG=trot=info,quadruped=debug cargo run --example trot
//! ```
use std::path::Path;
use std::time::Duration;

use miette::Result;
use nalgebra as na;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quadruped::prelude::*;
use spatial::types::Vector3;

const CYCLE_TIME: Duration = Duration::from_millis(10);
const PERIODS: u32 = 3;

/// Straight swing between the bounds with a parabolic lift.
struct ParabolicSwing {
    stance_phase: f64,
    height: f64,
    plans: LegMap<Option<SwingBounds>>,
}

impl FootTrajectory for ParabolicSwing {
    fn plan(&mut self, leg: Leg, bounds: SwingBounds) {
        self.plans[leg] = Some(bounds);
    }

    fn reference_state(&self, leg: Leg, phase: f64) -> Option<FootState> {
        let SwingBounds { start, end } = self.plans[leg]?;
        let s = ((phase - self.stance_phase) / (1.0 - self.stance_phase)).clamp(0.0, 1.0);

        let lift = 4.0 * self.height * s * (1.0 - s);
        let position = start.inner.coords.lerp(&end.inner.coords, s) + na::Vector3::z() * lift;

        Some(FootState::at_rest(na::Point3::from(position).into()))
    }
}

/// Every leg runs through the same gait period, shifted by its offset phase.
fn schedule(timing: &GaitTiming, offsets: &LegMap<f64>, time: Duration) -> GaitMap {
    let stance_phase = timing.stance_phase();
    let period_phase = time.as_secs_f64() / timing.period().as_secs_f64();

    offsets.map(|offset| {
        let phase = (period_phase + offset).fract();
        if phase < stance_phase {
            LegGait::stance(phase)
        } else {
            LegGait::swing(phase)
        }
    })
}

fn main() -> Result<()> {
    miette::set_panic_hook();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config");
    let config = QuadrupedConfig::load(config_dir)?;

    let mut cycle = GaitCycle::from_config(&config)?;
    let timing = *cycle.timing();
    let offsets = config.gait.offset_phases();

    let mut trajectory = ParabolicSwing {
        stance_phase: timing.stance_phase(),
        height: timing.height,
        plans: LegMap::default(),
    };

    let mut body = config.robot_state.pose()?;
    let velocity = na::Vector3::from(config.robot_cmd.linear_velocity);
    let stride: Vector3<World> = (velocity * timing.period().as_secs_f64()).into();

    let cycles_per_period = timing.cycles_per_period(CYCLE_TIME);
    let mut time = Duration::ZERO;

    for i in 0..u128::from(PERIODS) * cycles_per_period {
        let footholds = if i % cycles_per_period == 0 {
            Footholds::new(LegMap::from_fn(|leg| {
                cycle.last_reference(leg).position + stride
            }))
        } else {
            Footholds::none()
        };

        let input = CycleInput {
            gait: schedule(&timing, &offsets, time),
            footholds,
            body,
        };
        let output = cycle.run_cycle(&input, &mut trajectory)?;

        if output.replanned() {
            let samples: usize = output.trajectories.iter().map(|t| t.points.len()).sum();
            info!(?time, samples, "planned new footholds");
        }
        info!(?time, command = ?output.command.to_vec(), "joint command");

        body.position += Vector3::new(body.orientation * velocity * CYCLE_TIME.as_secs_f64());
        time += CYCLE_TIME;
    }

    Ok(())
}
