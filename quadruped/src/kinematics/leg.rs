//! Closed form kinematics of a single 3 degree of freedom leg.
//!
//! Positions are expressed in the [`Hip`] frame of the leg. The joint angles are the hip yaw
//! (rotation about the x-axis of the hip, moving the leg sideways), the hip pitch and the knee
//! pitch.
//!
//! Mirrored legs are described by the sign of the link lengths, not by different formulas. See
//! [`LegLinks::left`] and [`LegLinks::right`].
use std::f64::consts::{PI, TAU};

use nalgebra::{Matrix3, Point3};
use serde::{Deserialize, Serialize};

use super::dimensions::RobotDimensions;
use super::spaces::Hip;
use crate::joints::LegJoints;

/// Signed link lengths of a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegLinks {
    pub l1: f64,
    pub l2: f64,
    pub l3: f64,
}

impl LegLinks {
    #[must_use]
    pub fn new(l1: f64, l2: f64, l3: f64) -> Self {
        Self { l1, l2, l3 }
    }

    /// Link lengths of a leg on the left side of the body.
    #[must_use]
    pub fn left(dimensions: &RobotDimensions) -> Self {
        Self::new(dimensions.l1, -dimensions.l2, -dimensions.l3)
    }

    /// Link lengths of a leg on the right side of the body, the hip offset points the other way.
    #[must_use]
    pub fn right(dimensions: &RobotDimensions) -> Self {
        Self::new(-dimensions.l1, -dimensions.l2, -dimensions.l3)
    }
}

/// Compute the foot position in the hip frame for the given joint angles.
#[must_use]
pub fn forward_position(links: &LegLinks, joints: &LegJoints<f64>) -> spatial::types::Point3<Hip> {
    let LegLinks { l1, l2, l3 } = *links;
    let LegJoints {
        hip_yaw: t1,
        hip_pitch: t2,
        knee_pitch: t3,
    } = *joints;

    // reach of the thigh and calf in the plane of the leg
    let reach = l2 * t2.cos() + l3 * (t2 + t3).cos();

    spatial::types::Point3::new(Point3::new(
        l2 * t2.sin() + l3 * (t2 + t3).sin(),
        l1 * t1.cos() - reach * t1.sin(),
        l1 * t1.sin() + reach * t1.cos(),
    ))
}

/// Compute the jacobian of the foot position with respect to the joint angles.
///
/// Row `i` holds the derivatives of foot coordinate `i`, column `j` the derivatives with
/// respect to joint `j`.
///
/// Near singular configurations (e.g. a fully stretched leg) the matrix loses rank. This is not
/// detected here, users of the jacobian have to cope with ill conditioned results.
#[must_use]
pub fn jacobian(links: &LegLinks, joints: &LegJoints<f64>) -> Matrix3<f64> {
    let LegLinks { l1, l2, l3 } = *links;
    let LegJoints {
        hip_yaw: t1,
        hip_pitch: t2,
        knee_pitch: t3,
    } = *joints;

    let (s1, c1) = t1.sin_cos();
    let (s2, c2) = t2.sin_cos();
    let (s23, c23) = (t2 + t3).sin_cos();

    Matrix3::new(
        0.0,
        l2 * c2 + l3 * c23,
        l3 * c23,
        -l1 * s1 - l2 * c1 * c2 - l3 * c1 * c23,
        (l2 * s2 + l3 * s23) * s1,
        l3 * s1 * s23,
        l1 * c1 - l2 * s1 * c2 - l3 * s1 * c23,
        -(l2 * s2 + l3 * s23) * c1,
        -l3 * s23 * c1,
    )
}

/// Compute the joint angles that place the foot at `foot`, in the hip frame.
///
/// The solution is unique under two assumptions:
/// - the foot is below the hip, so the in-plane reach of the thigh and calf has the same sign
///   as the (signed) thigh length,
/// - the knee bends backwards, i.e. the knee pitch is negative.
///
/// Positions outside of the workspace are projected onto its boundary, see [`is_reachable`].
/// All angles are wrapped to (-π, π].
#[must_use]
pub fn inverse_position(links: &LegLinks, foot: &spatial::types::Point3<Hip>) -> LegJoints<f64> {
    let LegLinks { l1, l2, l3 } = *links;
    let (x, y, z) = (foot.x, foot.y, foot.z);

    let reach = (y.powi(2) + z.powi(2) - l1.powi(2)).max(0.0).sqrt().copysign(l2);
    let hip_yaw = z.atan2(y) - reach.atan2(l1);

    let knee_cos = (x.powi(2) + reach.powi(2) - l2.powi(2) - l3.powi(2)) / (2.0 * l2 * l3);
    let knee_pitch = -knee_cos.clamp(-1.0, 1.0).acos();

    let hip_pitch =
        x.atan2(reach) - (l3 * knee_pitch.sin()).atan2(l2 + l3 * knee_pitch.cos());

    LegJoints::new(hip_yaw, hip_pitch, knee_pitch).map(wrap_angle)
}

/// Whether `foot` lies inside the workspace of the leg, so that [`inverse_position`] does not
/// need to clamp.
#[must_use]
pub fn is_reachable(links: &LegLinks, foot: &spatial::types::Point3<Hip>) -> bool {
    let LegLinks { l1, l2, l3 } = *links;

    let planar = foot.y.powi(2) + foot.z.powi(2) - l1.powi(2);
    if planar < 0.0 {
        return false;
    }

    let distance = (foot.x.powi(2) + planar).sqrt();
    distance <= l2.abs() + l3.abs() && distance >= (l2.abs() - l3.abs()).abs()
}

fn wrap_angle(angle: f64) -> f64 {
    let angle = angle.rem_euclid(TAU);
    if angle > PI { angle - TAU } else { angle }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left() -> LegLinks {
        LegLinks::left(&RobotDimensions::default())
    }

    fn right() -> LegLinks {
        LegLinks::right(&RobotDimensions::default())
    }

    const CONFIGURATIONS: [[f64; 3]; 6] = [
        [0.0, 0.67, -1.3],
        [0.1, 0.8, -1.5],
        [-0.2, 0.3, -0.9],
        [0.63, 1.04, -1.6],
        [0.0, -0.4, -1.2],
        [0.3, 0.0, -0.5],
    ];

    #[test]
    fn forward_position_is_deterministic() {
        let joints = LegJoints::new(0.3, 0.9, -1.7);

        let a = forward_position(&left(), &joints);
        let b = forward_position(&left(), &joints);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.z.to_bits(), b.z.to_bits());
    }

    #[test]
    fn stretched_leg_points_down() {
        let foot = forward_position(&left(), &LegJoints::default());

        assert!(foot.x.abs() < 1e-12);
        assert!((foot.y - 0.077).abs() < 1e-12);
        assert!((foot.z + 0.441).abs() < 1e-12);
    }

    #[test]
    fn mirrored_legs_mirror_the_foot() {
        for [t1, t2, t3] in CONFIGURATIONS {
            let l = forward_position(&left(), &LegJoints::new(t1, t2, t3));
            let r = forward_position(&right(), &LegJoints::new(-t1, t2, t3));

            assert!((l.x - r.x).abs() < 1e-12);
            assert!((l.y + r.y).abs() < 1e-12);
            assert!((l.z - r.z).abs() < 1e-12);
        }
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let h = 1e-6;

        for links in [left(), right()] {
            for q in CONFIGURATIONS {
                let joints = LegJoints::from(q);
                let analytic = jacobian(&links, &joints);

                for column in 0..3 {
                    let mut plus = q;
                    let mut minus = q;
                    plus[column] += h;
                    minus[column] -= h;

                    let numeric = (forward_position(&links, &plus.into()).inner
                        - forward_position(&links, &minus.into()).inner)
                        / (2.0 * h);

                    for row in 0..3 {
                        assert!(
                            (analytic[(row, column)] - numeric[row]).abs() < 1e-6,
                            "J[{row}, {column}] = {}, expected {}",
                            analytic[(row, column)],
                            numeric[row]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn jacobian_loses_rank_when_stretched() {
        let j = jacobian(&left(), &LegJoints::default());

        assert!(j.determinant().abs() < 1e-12);
    }

    #[test]
    fn inverse_recovers_joint_angles() {
        for links in [left(), right()] {
            for q in CONFIGURATIONS {
                let joints = LegJoints::from(q);
                let foot = forward_position(&links, &joints);
                assert!(is_reachable(&links, &foot));

                let solved = inverse_position(&links, &foot);
                for (expected, actual) in joints.iter().zip(solved.iter()) {
                    assert!(
                        (expected - actual).abs() < 1e-6,
                        "{joints:?} solved as {solved:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn unreachable_targets_are_clamped() {
        let far = spatial::types::Point3::new(Point3::new(0.0, 0.077, -1.0));
        assert!(!is_reachable(&left(), &far));

        let joints = inverse_position(&left(), &far);
        assert!(joints.iter().all(|angle| angle.is_finite()));
        // the closest the foot can get is the fully stretched leg
        assert!(joints.knee_pitch.abs() < 1e-6);
    }
}
