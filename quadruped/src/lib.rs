//! Leg kinematics and per cycle joint command generation for a 12 joint quadruped.
//!
//! The crate is split into the closed form kinematics of the legs ([`kinematics`]) and the body
//! of the control loop ([`cycle`]), which turns the gait state of every leg into a joint command.
//! Gait scheduling, foothold selection and swing trajectory generation are provided by the
//! caller, see [`gait::FootTrajectory`].

pub mod body;
pub mod config;
pub mod cycle;
pub mod error;
pub mod gait;
pub mod joints;
pub mod kinematics;
pub mod leg;
pub mod visualization;

pub use error::{Error, Result};

/// Commonly needed types for running the gait cycle.
pub mod prelude {
    pub use crate::body::BodyPose;
    pub use crate::config::QuadrupedConfig;
    pub use crate::cycle::{CycleInput, CycleOutput, GaitCycle, GaitTiming, JointCommand};
    pub use crate::gait::{
        FootState, FootTrajectory, Footholds, GaitMap, LegGait, LegState, SwingBounds,
    };
    pub use crate::joints::{LegJoints, QuadrupedJoints};
    pub use crate::kinematics::prelude::*;
    pub use crate::leg::{Leg, LegMap};
    pub use crate::{Error, Result};
    pub use robot_config::Config;
}
