//! The body of the control loop, turning gait states and footholds into joint commands.
//!
//! [`GaitCycle::run_cycle`] is a step function: the caller decides when cycles run and provides
//! everything a cycle needs, so the same code drives the robot, the demos and the tests.
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, trace};

use crate::body::BodyPose;
use crate::config::QuadrupedConfig;
use crate::error::{ConfigurationError, Result};
use crate::gait::{FootState, FootTrajectory, Footholds, GaitMap, LegState, SwingBounds};
use crate::joints::{NUM_JOINTS, QuadrupedJoints};
use crate::kinematics::QuadrupedKinematics;
use crate::leg::{Leg, LegMap};
use crate::visualization::TrajectorySamples;

/// Durations of the two segments of a gait period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaitTiming {
    pub stance: Duration,
    pub swing: Duration,
    /// Height the feet are lifted to during swing, in meters.
    pub height: f64,
}

impl GaitTiming {
    /// # Errors
    ///
    /// Fails if either duration is zero, or if the swing height is negative or not finite.
    pub fn new(stance: Duration, swing: Duration, height: f64) -> Result<Self, ConfigurationError> {
        if stance.is_zero() {
            return Err(ConfigurationError::InvalidTiming {
                name: "stance_duration",
            });
        }
        if swing.is_zero() {
            return Err(ConfigurationError::InvalidTiming {
                name: "swing_duration",
            });
        }
        if !(height.is_finite() && height >= 0.0) {
            return Err(ConfigurationError::InvalidTiming { name: "height" });
        }

        Ok(Self {
            stance,
            swing,
            height,
        })
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.stance + self.swing
    }

    /// Fraction of the gait period the feet spend on the ground.
    #[must_use]
    pub fn stance_phase(&self) -> f64 {
        self.stance.as_secs_f64() / self.period().as_secs_f64()
    }

    /// Number of control cycles of length `cycle_time` in a gait period, at least one.
    #[must_use]
    pub fn cycles_per_period(&self, cycle_time: Duration) -> u128 {
        (self.period().as_nanos() / cycle_time.as_nanos().max(1)).max(1)
    }
}

/// Names and initial positions of the 12 joints.
#[derive(Debug, Clone, PartialEq)]
pub struct JointConfiguration {
    names: QuadrupedJoints<String>,
    initial_positions: QuadrupedJoints<f64>,
}

impl JointConfiguration {
    /// # Errors
    ///
    /// Fails unless `num_joints`, the number of names and the number of initial positions are all
    /// equal to [`NUM_JOINTS`].
    pub fn new(
        num_joints: usize,
        names: &[String],
        initial_positions: &[f64],
    ) -> Result<Self, ConfigurationError> {
        if num_joints != NUM_JOINTS
            || names.len() != num_joints
            || initial_positions.len() != num_joints
        {
            let error = ConfigurationError::JointCountMismatch {
                num_joints,
                joint_names: names.len(),
                init_positions: initial_positions.len(),
            };
            error!(%error, "rejecting joint configuration");
            return Err(error);
        }

        Ok(Self {
            names: QuadrupedJoints::try_from_slice(names)?,
            initial_positions: QuadrupedJoints::try_from_slice(initial_positions)?,
        })
    }

    #[must_use]
    pub fn names(&self) -> &QuadrupedJoints<String> {
        &self.names
    }

    #[must_use]
    pub fn initial_positions(&self) -> &QuadrupedJoints<f64> {
        &self.initial_positions
    }
}

/// Joint positions for all 12 joints, together with their names.
#[derive(Debug, Clone, PartialEq)]
pub struct JointCommand {
    pub names: Arc<[String]>,
    pub positions: QuadrupedJoints<f64>,
}

impl JointCommand {
    /// The positions in joint state order, matching [`JointCommand::names`].
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.positions.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.positions.to_vec())
    }
}

/// Everything a single cycle consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleInput {
    pub gait: GaitMap,
    pub footholds: Footholds,
    pub body: BodyPose,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutput {
    pub command: JointCommand,
    /// Samples of the trajectories that were planned this cycle.
    pub trajectories: Vec<TrajectorySamples>,
}

impl CycleOutput {
    /// Whether new swing trajectories were planned this cycle.
    #[must_use]
    pub fn replanned(&self) -> bool {
        !self.trajectories.is_empty()
    }
}

/// Per cycle joint command generation for all four legs.
///
/// Apart from the immutable configuration, the only state carried between cycles is the last
/// reference foot state of every leg. It is the start of the next planned swing and the
/// fallback target while the trajectory generator has nothing planned for a leg.
#[derive(Debug, Clone)]
pub struct GaitCycle {
    kinematics: QuadrupedKinematics,
    joints: JointConfiguration,
    joint_names: Arc<[String]>,
    timing: GaitTiming,
    last_reference: LegMap<FootState>,
}

impl GaitCycle {
    /// Create the gait cycle, with every foot referenced at the position of the initial joint
    /// configuration.
    #[must_use]
    pub fn new(
        kinematics: QuadrupedKinematics,
        joints: JointConfiguration,
        timing: GaitTiming,
        initial_pose: &BodyPose,
    ) -> Self {
        let last_reference = kinematics
            .forward_kinematics_joints(joints.initial_positions())
            .map(|foot| FootState::at_rest(initial_pose.to_world(&foot)));

        let joint_names = joints.names().to_vec().into();

        info!(
            stance_phase = timing.stance_phase(),
            ?timing.stance,
            ?timing.swing,
            "initialized gait cycle"
        );

        Self {
            kinematics,
            joints,
            joint_names,
            timing,
            last_reference,
        }
    }

    /// Build the gait cycle described by a configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not describe a 4 leg, 12 joint robot with valid timing.
    pub fn from_config(config: &QuadrupedConfig) -> Result<Self> {
        let joints = config.validate()?;
        let timing = config.gait.timing()?;

        Ok(Self::new(
            QuadrupedKinematics::new(&config.dimensions),
            joints,
            timing,
            &config.robot_state.pose()?,
        ))
    }

    #[must_use]
    pub fn kinematics(&self) -> &QuadrupedKinematics {
        &self.kinematics
    }

    #[must_use]
    pub fn joints(&self) -> &JointConfiguration {
        &self.joints
    }

    #[must_use]
    pub fn timing(&self) -> &GaitTiming {
        &self.timing
    }

    /// The reference state the foot of `leg` was last commanded to, in the world frame.
    #[must_use]
    pub fn last_reference(&self, leg: Leg) -> &FootState {
        &self.last_reference[leg]
    }

    /// Run a single cycle.
    ///
    /// Legs in stance are commanded to their initial joint positions. Legs in swing follow the
    /// reference state of `trajectory` at their phase. When `input` contains footholds, a new
    /// swing is planned for every leg first, starting at the leg's last reference position.
    ///
    /// # Errors
    ///
    /// Fails without commanding anything if the phase of any leg is outside of `[0, 1]`.
    pub fn run_cycle(
        &mut self,
        input: &CycleInput,
        trajectory: &mut impl FootTrajectory,
    ) -> Result<CycleOutput> {
        for (leg, gait) in input.gait.iter() {
            gait.validate(leg).inspect_err(|error| {
                error!(%error, "rejecting gait state");
            })?;
        }

        let trajectories = self.plan_footholds(&input.footholds, trajectory);

        let mut positions = *self.joints.initial_positions();
        for (leg, gait) in input.gait.iter() {
            if gait.state == LegState::Stance {
                continue;
            }

            let reference = trajectory
                .reference_state(leg, gait.phase)
                .unwrap_or(self.last_reference[leg]);
            self.last_reference[leg] = reference;

            let foot = input.body.to_body(&reference.position);
            positions[leg] = self.kinematics.leg_inverse_kinematics(leg, &foot);

            trace!(%leg, phase = gait.phase, ?foot, joints = ?positions[leg], "swing leg");
        }

        Ok(CycleOutput {
            command: JointCommand {
                names: Arc::clone(&self.joint_names),
                positions,
            },
            trajectories,
        })
    }

    fn plan_footholds(
        &self,
        footholds: &Footholds,
        trajectory: &mut impl FootTrajectory,
    ) -> Vec<TrajectorySamples> {
        Leg::ALL
            .into_iter()
            .filter_map(|leg| footholds.get(leg).map(|end| (leg, *end)))
            .map(|(leg, end)| {
                let bounds = SwingBounds {
                    start: self.last_reference[leg].position,
                    end,
                };
                debug!(%leg, ?bounds.start, ?bounds.end, "planning swing");
                trajectory.plan(leg, bounds);

                TrajectorySamples::sample(
                    &*trajectory,
                    leg,
                    self.timing.stance_phase(),
                    self.timing.swing,
                )
            })
            .collect()
    }
}
