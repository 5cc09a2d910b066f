//! Joint value containers.
use std::ops::{Add, Mul, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::leg::{Leg, LegMap};

/// Number of joints of a single leg.
pub const JOINTS_PER_LEG: usize = 3;

/// Number of joints of the robot.
pub const NUM_JOINTS: usize = JOINTS_PER_LEG * Leg::ALL.len();

/// Wrapper struct containing the joints of a single leg, ordered from the body outwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegJoints<T> {
    pub hip_yaw: T,
    pub hip_pitch: T,
    pub knee_pitch: T,
}

impl<T> LegJoints<T> {
    pub fn new(hip_yaw: T, hip_pitch: T, knee_pitch: T) -> Self {
        Self {
            hip_yaw,
            hip_pitch,
            knee_pitch,
        }
    }

    /// Transforms each element in the [`LegJoints`] using the provided closure `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use quadruped::joints::LegJoints;
    ///
    /// let joints = LegJoints::new(1, 2, 3);
    /// assert_eq!(joints.map(|x| x * 2), LegJoints::new(2, 4, 6));
    /// ```
    pub fn map<F, U>(self, mut f: F) -> LegJoints<U>
    where
        F: FnMut(T) -> U,
    {
        LegJoints {
            hip_yaw: f(self.hip_yaw),
            hip_pitch: f(self.hip_pitch),
            knee_pitch: f(self.knee_pitch),
        }
    }

    pub fn zip<U>(self, other: LegJoints<U>) -> LegJoints<(T, U)> {
        LegJoints {
            hip_yaw: (self.hip_yaw, other.hip_yaw),
            hip_pitch: (self.hip_pitch, other.hip_pitch),
            knee_pitch: (self.knee_pitch, other.knee_pitch),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.hip_yaw, &self.hip_pitch, &self.knee_pitch].into_iter()
    }
}

impl<T> From<[T; 3]> for LegJoints<T> {
    fn from([hip_yaw, hip_pitch, knee_pitch]: [T; 3]) -> Self {
        Self::new(hip_yaw, hip_pitch, knee_pitch)
    }
}

impl<T> From<LegJoints<T>> for [T; 3] {
    fn from(joints: LegJoints<T>) -> Self {
        [joints.hip_yaw, joints.hip_pitch, joints.knee_pitch]
    }
}

impl From<Vector3<f64>> for LegJoints<f64> {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<LegJoints<f64>> for Vector3<f64> {
    fn from(joints: LegJoints<f64>) -> Self {
        Vector3::new(joints.hip_yaw, joints.hip_pitch, joints.knee_pitch)
    }
}

impl<T> Add for LegJoints<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            hip_yaw: self.hip_yaw + rhs.hip_yaw,
            hip_pitch: self.hip_pitch + rhs.hip_pitch,
            knee_pitch: self.knee_pitch + rhs.knee_pitch,
        }
    }
}

impl<T> Sub for LegJoints<T>
where
    T: Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            hip_yaw: self.hip_yaw - rhs.hip_yaw,
            hip_pitch: self.hip_pitch - rhs.hip_pitch,
            knee_pitch: self.knee_pitch - rhs.knee_pitch,
        }
    }
}

impl<T> Mul<T> for LegJoints<T>
where
    T: Mul<Output = T> + Clone,
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self {
            hip_yaw: self.hip_yaw * rhs.clone(),
            hip_pitch: self.hip_pitch * rhs.clone(),
            knee_pitch: self.knee_pitch * rhs,
        }
    }
}

/// Joint values for the whole robot, three per leg.
///
/// Flattened, the joints are ordered RL, FL, RR, FR, which is the order of the robot's joint
/// state and cannot be changed from this side.
pub type QuadrupedJoints<T> = LegMap<LegJoints<T>>;

impl<T: Clone> LegMap<LegJoints<T>> {
    /// Split a flat joint vector into per-leg joints.
    ///
    /// # Example
    ///
    /// ```
    /// use quadruped::joints::QuadrupedJoints;
    /// use quadruped::leg::Leg;
    ///
    /// let values: Vec<u32> = (0..12).collect();
    /// let joints = QuadrupedJoints::try_from_slice(&values).unwrap();
    ///
    /// assert_eq!(joints[Leg::FrontLeft].knee_pitch, 5);
    /// assert_eq!(joints.to_vec(), values);
    /// ```
    pub fn try_from_slice(values: &[T]) -> Result<Self, ConfigurationError> {
        if values.len() != NUM_JOINTS {
            return Err(ConfigurationError::JointVectorLength {
                expected: NUM_JOINTS,
                found: values.len(),
            });
        }

        Ok(LegMap::from_fn(|leg| {
            let offset = leg.index() * JOINTS_PER_LEG;
            LegJoints::new(
                values[offset].clone(),
                values[offset + 1].clone(),
                values[offset + 2].clone(),
            )
        }))
    }

    /// Flatten into a vector of 12 values in joint state order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.values()
            .flat_map(|joints| joints.iter().cloned())
            .collect()
    }
}
