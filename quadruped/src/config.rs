//! Configuration of the quadruped controller, stored in `quadruped.toml`.
use std::time::Duration;

use robot_config::Config;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use tracing::error;

use crate::body::BodyPose;
use crate::cycle::{GaitTiming, JointConfiguration};
use crate::error::ConfigurationError;
use crate::kinematics::dimensions::RobotDimensions;
use crate::leg::{Leg, LegMap};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct QuadrupedConfig {
    pub links: LinksConfig,
    pub legs: LegsConfig,
    pub joints: JointsConfig,
    pub dimensions: RobotDimensions,
    pub gait: GaitConfig,
    pub robot_state: RobotStateConfig,
    pub robot_cmd: RobotCommandConfig,
}

impl Config for QuadrupedConfig {
    const PATH: &'static str = "quadruped.toml";
}

impl QuadrupedConfig {
    /// Check that the configuration describes the 4 leg, 12 joint layout, with dimensions, gait
    /// and initial state that the kinematics can work with.
    ///
    /// This has to succeed before any cycle runs.
    pub fn validate(&self) -> Result<JointConfiguration, ConfigurationError> {
        self.check()
            .inspect_err(|error| error!(%error, "rejecting configuration"))
    }

    fn check(&self) -> Result<JointConfiguration, ConfigurationError> {
        self.legs.validate()?;
        self.dimensions.validate()?;
        self.gait.validate()?;
        self.robot_state.pose()?;

        JointConfiguration::new(
            self.joints.num_joints,
            &self.joints.joint_names,
            &self.joints.init_joint_positions,
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LinksConfig {
    /// Name of the frame the body pose refers to.
    pub base_link: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LegsConfig {
    pub leg_names: Vec<String>,
}

impl LegsConfig {
    /// The leg names have to list every leg once, in joint state order.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let expected = Leg::ALL.map(|leg| leg.to_string());

        if self.leg_names != expected {
            return Err(ConfigurationError::LegNames {
                found: self.leg_names.clone(),
            });
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct JointsConfig {
    pub num_joints: usize,
    pub joint_names: Vec<String>,
    pub init_joint_positions: Vec<f64>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct GaitConfig {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub stance_duration: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub swing_duration: Duration,
    /// Swing height in meters.
    pub height: f64,
    /// Phase offset of every leg within the gait period, in joint state order.
    pub offset_phases: [f64; 4],
}

impl GaitConfig {
    /// # Errors
    ///
    /// Fails if the timing is out of range or an offset phase is not finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.timing()?;

        if !self.offset_phases.iter().all(|phase| phase.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                name: "offset_phases",
                values: self.offset_phases.to_vec(),
            });
        }

        Ok(())
    }

    pub fn timing(&self) -> Result<GaitTiming, ConfigurationError> {
        GaitTiming::new(self.stance_duration, self.swing_duration, self.height)
    }

    #[must_use]
    pub fn offset_phases(&self) -> LegMap<f64> {
        LegMap::from_fn(|leg| self.offset_phases[leg.index()])
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RobotStateConfig {
    pub position: [f64; 3],
    /// Orientation quaternion as `[x, y, z, w]`.
    pub orientation: [f64; 4],
    pub linear_velocity: [f64; 3],
}

impl RobotStateConfig {
    /// # Errors
    ///
    /// Fails if the position or velocity is not finite, or if the orientation is not a rotation.
    pub fn pose(&self) -> Result<BodyPose, ConfigurationError> {
        if !self.linear_velocity.iter().all(|v| v.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                name: "linear_velocity",
                values: self.linear_velocity.to_vec(),
            });
        }

        Ok(BodyPose {
            linear_velocity: nalgebra::Vector3::from(self.linear_velocity).into(),
            ..BodyPose::from_xyzw(self.position, self.orientation)?
        })
    }
}

/// Commanded body velocity, in the body frame.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RobotCommandConfig {
    pub linear_velocity: [f64; 3],
    pub angular_velocity: [f64; 3],
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    const CONFIG: &str = include_str!("../../config/quadruped.toml");

    fn config() -> QuadrupedConfig {
        toml::from_str(CONFIG).unwrap()
    }

    #[test]
    fn shipped_configuration_is_valid() {
        let config = config();
        let joints = config.validate().unwrap();

        assert_eq!(joints.names()[Leg::RearLeft].hip_yaw, "RL_hip_joint");
        assert_eq!(joints.names()[Leg::FrontRight].knee_pitch, "FR_calf_joint");
        assert_eq!(config.dimensions, RobotDimensions::default());

        let timing = config.gait.timing().unwrap();
        assert_eq!(timing.stance, Duration::from_millis(300));
        assert_eq!(timing.swing, Duration::from_millis(200));
        assert_eq!(config.gait.offset_phases()[Leg::RearLeft], 0.5);
        assert_eq!(config.gait.offset_phases()[Leg::FrontLeft], 0.0);
    }

    #[test]
    fn missing_joint_name_is_rejected() {
        let mut config = config();
        config.joints.joint_names.pop();

        assert_eq!(
            config.validate(),
            Err(ConfigurationError::JointCountMismatch {
                num_joints: 12,
                joint_names: 11,
                init_positions: 12
            })
        );
    }

    #[test]
    fn leg_names_must_follow_joint_order() {
        let mut config = config();
        config.legs.leg_names.swap(0, 1);

        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::LegNames { .. })
        ));
    }

    #[test]
    fn zero_orientation_is_rejected() {
        let mut config = config();
        config.robot_state.orientation = [0.0; 4];

        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidOrientation {
                orientation: [0.0; 4]
            })
        );
    }

    #[test]
    fn link_lengths_are_checked() {
        let mut config = config();
        config.dimensions.l2 = 0.0;

        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidDimension { name: "l2", .. })
        ));

        config.dimensions.l2 = 0.211;
        config.dimensions.xbh = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidDimension { name: "xbh", .. })
        ));
    }

    #[test]
    fn gait_values_must_be_finite() {
        let mut offsets = config();
        offsets.gait.offset_phases[2] = f64::NAN;
        assert!(matches!(
            offsets.validate(),
            Err(ConfigurationError::NonFinite {
                name: "offset_phases",
                ..
            })
        ));

        let mut height = config();
        height.gait.height = f64::NAN;
        assert_eq!(
            height.validate(),
            Err(ConfigurationError::InvalidTiming { name: "height" })
        );

        let mut velocity = config();
        velocity.robot_state.linear_velocity[0] = f64::INFINITY;
        assert!(matches!(
            velocity.validate(),
            Err(ConfigurationError::NonFinite {
                name: "linear_velocity",
                ..
            })
        ));
    }

    #[test]
    fn robot_state_becomes_the_initial_pose() {
        let pose = config().robot_state.pose().unwrap();

        assert_eq!(pose.position.inner, nalgebra::point![0.0, 0.0, 0.35]);
        assert_eq!(pose.orientation, nalgebra::UnitQuaternion::identity());
    }

    #[test]
    fn overlay_changes_the_gait() {
        let temp_dir = tempdir().unwrap();
        let overlay_dir = temp_dir.path().join("overlay");
        fs::create_dir_all(&overlay_dir).unwrap();

        fs::write(temp_dir.path().join(QuadrupedConfig::PATH), CONFIG).unwrap();
        fs::write(
            overlay_dir.join(QuadrupedConfig::PATH),
            "[gait]\nswing_duration = 250\n",
        )
        .unwrap();

        let config = QuadrupedConfig::load_with_overlay(temp_dir.path(), &overlay_dir).unwrap();
        assert_eq!(config.gait.swing_duration, Duration::from_millis(250));
        assert_eq!(config.gait.stance_duration, Duration::from_millis(300));
    }
}
