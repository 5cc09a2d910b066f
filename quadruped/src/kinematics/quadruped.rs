//! Composition of the four legs into whole body kinematics.
use nalgebra as na;

use spatial::types::{Isometry3, Point3, Vector3};
use spatial::Transform;

use super::dimensions::RobotDimensions;
use super::leg::{self, LegLinks};
use super::spaces::{Body, Hip};
use crate::error::ConfigurationError;
use crate::joints::{LegJoints, QuadrupedJoints};
use crate::leg::{End, Leg, LegMap, Side};

/// Placement and link lengths of a single leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegLinkConfig {
    /// Translation from the body origin to the hip of the leg.
    pub hip_offset: Vector3<Body>,
    pub links: LegLinks,
}

impl LegLinkConfig {
    /// Mirror the shared dimensions into the configuration of `leg`.
    #[must_use]
    pub fn new(leg: Leg, dimensions: &RobotDimensions) -> Self {
        let x = match leg.end() {
            End::Front => dimensions.xbh,
            End::Rear => -dimensions.xbh,
        };
        let (y, links) = match leg.side() {
            Side::Left => (dimensions.ybh, LegLinks::left(dimensions)),
            Side::Right => (-dimensions.ybh, LegLinks::right(dimensions)),
        };

        Self {
            hip_offset: Vector3::new(na::vector![x, y, dimensions.zbh]),
            links,
        }
    }
}

/// Kinematics of all four legs.
///
/// Built once from the robot dimensions and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrupedKinematics {
    links: LegMap<LegLinkConfig>,
}

impl Default for QuadrupedKinematics {
    fn default() -> Self {
        Self::new(&RobotDimensions::default())
    }
}

impl QuadrupedKinematics {
    #[must_use]
    pub fn new(dimensions: &RobotDimensions) -> Self {
        Self {
            links: LegMap::from_fn(|leg| LegLinkConfig::new(leg, dimensions)),
        }
    }

    #[must_use]
    pub fn link_config(&self, leg: Leg) -> &LegLinkConfig {
        &self.links[leg]
    }

    /// Transform from the hip frame of `leg` into the body frame.
    #[must_use]
    pub fn hip_to_body(&self, leg: Leg) -> Isometry3<Hip, Body> {
        let offset = self.links[leg].hip_offset.inner;
        na::Isometry3::translation(offset.x, offset.y, offset.z).into()
    }

    /// Foot position of `leg` in its hip frame.
    #[must_use]
    pub fn leg_forward_kinematics(&self, leg: Leg, joints: &LegJoints<f64>) -> Point3<Hip> {
        leg::forward_position(&self.links[leg].links, joints)
    }

    /// Foot positions of all legs in the body frame, for a joint vector in joint state order.
    ///
    /// # Errors
    ///
    /// Fails if `joints` does not hold exactly 12 values.
    pub fn forward_kinematics(
        &self,
        joints: &[f64],
    ) -> Result<LegMap<Point3<Body>>, ConfigurationError> {
        let joints = QuadrupedJoints::try_from_slice(joints)?;

        Ok(self.forward_kinematics_joints(&joints))
    }

    #[must_use]
    pub fn forward_kinematics_joints(&self, joints: &QuadrupedJoints<f64>) -> LegMap<Point3<Body>> {
        LegMap::from_fn(|leg| {
            let foot = self.leg_forward_kinematics(leg, &joints[leg]);
            self.hip_to_body(leg).transform(&foot)
        })
    }

    /// Jacobian of the foot position of `leg` with respect to its joint angles.
    ///
    /// The hip frame is a pure translation of the body frame, so this is the jacobian in both.
    #[must_use]
    pub fn jacobian(&self, leg: Leg, joints: &LegJoints<f64>) -> na::Matrix3<f64> {
        leg::jacobian(&self.links[leg].links, joints)
    }

    /// Map foot forces to joint torques using the transposed jacobian of every leg.
    ///
    /// Both `joints` and `forces` hold 12 values; forces are grouped as (x, y, z) per leg, in
    /// the same leg order as the joints.
    ///
    /// # Errors
    ///
    /// Fails if either vector does not hold exactly 12 values.
    pub fn force_to_torque(
        &self,
        joints: &[f64],
        forces: &[f64],
    ) -> Result<Vec<f64>, ConfigurationError> {
        let joints = QuadrupedJoints::try_from_slice(joints)?;
        let forces = QuadrupedJoints::try_from_slice(forces)?
            .map(|force| Vector3::new(na::Vector3::from(force)));

        Ok(self.joint_torques(&joints, &forces).to_vec())
    }

    /// Quasi static joint torques that make each foot exert `forces`.
    ///
    /// Velocity and acceleration terms are not modelled. Near singular configurations the
    /// torques are ill conditioned.
    #[must_use]
    pub fn joint_torques(
        &self,
        joints: &QuadrupedJoints<f64>,
        forces: &LegMap<Vector3<Body>>,
    ) -> QuadrupedJoints<f64> {
        LegMap::from_fn(|leg| {
            let jacobian = self.jacobian(leg, &joints[leg]);
            LegJoints::from(jacobian.transpose() * forces[leg].inner)
        })
    }

    /// Joint angles that place the foot of `leg` at `foot`.
    ///
    /// See [`leg::inverse_position`] for the assumptions of the solution.
    #[must_use]
    pub fn leg_inverse_kinematics(&self, leg: Leg, foot: &Point3<Body>) -> LegJoints<f64> {
        let foot = self.hip_to_body(leg).inverse_transform(foot);

        if !leg::is_reachable(&self.links[leg].links, &foot) {
            tracing::warn!(%leg, ?foot, "foot target is out of reach, clamping");
        }

        leg::inverse_position(&self.links[leg].links, &foot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::NUM_JOINTS;

    fn assert_close(actual: &na::Point3<f64>, expected: [f64; 3]) {
        assert!(
            (actual - na::Point3::from(expected)).norm() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn hip_offsets_are_mirrored() {
        let kinematics = QuadrupedKinematics::default();

        let offset = |leg| kinematics.link_config(leg).hip_offset.inner;
        assert_eq!(offset(Leg::RearLeft), na::vector![-0.196, 0.050, 0.0]);
        assert_eq!(offset(Leg::FrontLeft), na::vector![0.196, 0.050, 0.0]);
        assert_eq!(offset(Leg::RearRight), na::vector![-0.196, -0.050, 0.0]);
        assert_eq!(offset(Leg::FrontRight), na::vector![0.196, -0.050, 0.0]);

        assert_eq!(kinematics.link_config(Leg::FrontLeft).links.l1, 0.077);
        assert_eq!(kinematics.link_config(Leg::FrontRight).links.l1, -0.077);
    }

    #[test]
    fn zero_joints_place_feet_below_the_hips() {
        let feet = QuadrupedKinematics::default()
            .forward_kinematics(&[0.0; NUM_JOINTS])
            .unwrap();

        assert_close(&feet[Leg::RearLeft], [-0.196, 0.127, -0.441]);
        assert_close(&feet[Leg::FrontLeft], [0.196, 0.127, -0.441]);
        assert_close(&feet[Leg::RearRight], [-0.196, -0.127, -0.441]);
        assert_close(&feet[Leg::FrontRight], [0.196, -0.127, -0.441]);
    }

    #[test]
    fn legs_are_independent() {
        let kinematics = QuadrupedKinematics::default();

        let mut joints = [0.0; NUM_JOINTS];
        let before = kinematics.forward_kinematics(&joints).unwrap();
        // only bend the front left knee
        joints[5] = -1.2;
        let after = kinematics.forward_kinematics(&joints).unwrap();

        for leg in [Leg::RearLeft, Leg::RearRight, Leg::FrontRight] {
            assert_eq!(before[leg], after[leg]);
        }
        assert_ne!(before[Leg::FrontLeft], after[Leg::FrontLeft]);
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        let kinematics = QuadrupedKinematics::default();

        assert_eq!(
            kinematics.forward_kinematics(&[0.0; 11]),
            Err(ConfigurationError::JointVectorLength {
                expected: 12,
                found: 11
            })
        );
        assert!(
            kinematics
                .force_to_torque(&[0.0; NUM_JOINTS], &[0.0; 13])
                .is_err()
        );
    }

    #[test]
    fn torque_is_linear_in_force() {
        let kinematics = QuadrupedKinematics::default();
        let joints: Vec<f64> = (0..NUM_JOINTS)
            .map(|i| [0.1, 0.7, -1.4][i % 3] * if i < 6 { 1.0 } else { -1.0 })
            .collect();
        let forces: Vec<f64> = (0..12).map(|i| f64::from(i) - 5.5).collect();
        let doubled: Vec<f64> = forces.iter().map(|f| 2.0 * f).collect();

        let single = kinematics.force_to_torque(&joints, &forces).unwrap();
        let double = kinematics.force_to_torque(&joints, &doubled).unwrap();

        assert_eq!(single.len(), NUM_JOINTS);
        for (a, b) in single.iter().zip(&double) {
            assert!((2.0 * a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn vertical_force_on_a_stretched_leg_loads_the_hip_yaw() {
        let kinematics = QuadrupedKinematics::default();
        let mut forces = [0.0; NUM_JOINTS];
        forces[5] = 10.0;

        let torques = kinematics.force_to_torque(&[0.0; NUM_JOINTS], &forces).unwrap();

        // front left hip yaw: l1 * f_z, the pitch joints are aligned with the force
        assert!((torques[3] - 0.77).abs() < 1e-12);
        assert!(torques[4].abs() < 1e-12);
        assert!(torques[5].abs() < 1e-12);
    }

    #[test]
    fn inverse_kinematics_goes_through_the_hip() {
        let kinematics = QuadrupedKinematics::default();
        let joints = LegJoints::new(-0.1, 0.6, -1.2);

        for leg in Leg::ALL {
            let foot = kinematics
                .hip_to_body(leg)
                .transform(&kinematics.leg_forward_kinematics(leg, &joints));
            let solved = kinematics.leg_inverse_kinematics(leg, &foot);

            for (expected, actual) in joints.iter().zip(solved.iter()) {
                assert!((expected - actual).abs() < 1e-6, "{leg}: {solved:?}");
            }
        }
    }
}
