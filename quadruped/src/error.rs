//! Error types of the quadruped controller.
use miette::Diagnostic;
use thiserror::Error;

use crate::leg::Leg;

/// Type alias for [`std::result::Result`], defaulting to a quadruped [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Enum describing the possible errors that can occur in the controller.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] robot_config::Error),
}

/// Inputs or configuration that are inconsistent with the 4 leg, 12 joint layout.
///
/// These are reported before any kinematics is evaluated, the controller never substitutes
/// defaults for them.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error(
        "Invalid joint configuration. Num(joints): {num_joints}, Num(joint names): {joint_names}, \
         Num(joint initial positions): {init_positions}"
    )]
    #[diagnostic(
        code(configuration::joint_count),
        help("`num_joints`, `joint_names` and `init_joint_positions` must all describe 12 joints")
    )]
    JointCountMismatch {
        num_joints: usize,
        joint_names: usize,
        init_positions: usize,
    },

    #[error("Expected a joint vector with {expected} entries, found {found}")]
    #[diagnostic(code(configuration::joint_vector))]
    JointVectorLength { expected: usize, found: usize },

    #[error("Invalid leg names {found:?}")]
    #[diagnostic(
        code(configuration::leg_names),
        help("the joint groups are ordered RL, FL, RR, FR, so `leg_names` must be exactly that")
    )]
    LegNames { found: Vec<String> },

    #[error("No entry for leg {0}")]
    #[diagnostic(code(configuration::missing_leg))]
    MissingLeg(Leg),

    #[error("Leg {0} has more than one entry")]
    #[diagnostic(code(configuration::duplicate_leg))]
    DuplicateLeg(Leg),

    #[error("Expected footholds for none or all four legs, got {0}")]
    #[diagnostic(code(configuration::foothold_count))]
    FootholdCount(usize),

    #[error("Phase {phase} of leg {leg} is outside of [0, 1]")]
    #[diagnostic(code(configuration::phase))]
    InvalidPhase { leg: Leg, phase: f64 },

    #[error("Gait parameter `{name}` is out of range")]
    #[diagnostic(
        code(configuration::timing),
        help("durations must be positive, the swing height finite and not negative")
    )]
    InvalidTiming { name: &'static str },

    #[error("Robot dimension `{name}` is {value}")]
    #[diagnostic(
        code(configuration::dimension),
        help("every dimension must be finite, the link lengths `l2` and `l3` also positive")
    )]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Orientation {orientation:?} is not a rotation quaternion")]
    #[diagnostic(
        code(configuration::orientation),
        help("the quaternion is given as `[x, y, z, w]` and needs a finite, non-zero norm")
    )]
    InvalidOrientation { orientation: [f64; 4] },

    #[error("`{name}` has non-finite entries {values:?}")]
    #[diagnostic(code(configuration::non_finite))]
    NonFinite { name: &'static str, values: Vec<f64> },
}
