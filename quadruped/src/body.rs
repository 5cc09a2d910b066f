//! Pose of the robot's base in the world.
use nalgebra as na;

use spatial::types::{Isometry3, Point3, Vector3};
use spatial::Transform;

use crate::error::ConfigurationError;
use crate::kinematics::spaces::{Body, World};

/// Quaternions with a smaller norm do not describe a rotation.
const MIN_QUATERNION_NORM: f64 = 1e-6;

/// Position, orientation and velocity of the base link, expressed in the world frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Point3<World>,
    pub orientation: na::UnitQuaternion<f64>,
    pub linear_velocity: Vector3<World>,
    pub angular_velocity: Vector3<World>,
}

impl Default for BodyPose {
    fn default() -> Self {
        Self::new(na::Point3::origin().into(), na::UnitQuaternion::identity())
    }
}

impl BodyPose {
    /// A pose at rest, without any velocity.
    #[must_use]
    pub fn new(position: Point3<World>, orientation: na::UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
            linear_velocity: na::Vector3::zeros().into(),
            angular_velocity: na::Vector3::zeros().into(),
        }
    }

    /// Build the orientation from an `[x, y, z, w]` quaternion, normalizing it.
    ///
    /// # Errors
    ///
    /// Fails if the position is not finite, or if the quaternion cannot be normalized.
    pub fn from_xyzw(
        position: [f64; 3],
        orientation: [f64; 4],
    ) -> Result<Self, ConfigurationError> {
        if !position.iter().all(|x| x.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                name: "position",
                values: position.to_vec(),
            });
        }

        let [x, y, z, w] = orientation;
        let quaternion = na::Quaternion::new(w, x, y, z);
        let norm = quaternion.norm();
        if !norm.is_finite() || norm < MIN_QUATERNION_NORM {
            return Err(ConfigurationError::InvalidOrientation { orientation });
        }

        Ok(Self::new(
            na::Point3::from(position).into(),
            na::UnitQuaternion::from_quaternion(quaternion),
        ))
    }

    #[must_use]
    pub fn body_to_world(&self) -> Isometry3<Body, World> {
        na::Isometry3::from_parts(
            na::Translation3::from(self.position.inner.coords),
            self.orientation,
        )
        .into()
    }

    #[must_use]
    pub fn to_world(&self, point: &Point3<Body>) -> Point3<World> {
        self.body_to_world().transform(point)
    }

    /// Express a world position relative to the base, `Rᵀ (p - x)`.
    #[must_use]
    pub fn to_body(&self, point: &Point3<World>) -> Point3<Body> {
        self.body_to_world().inverse_transform(point)
    }
}
