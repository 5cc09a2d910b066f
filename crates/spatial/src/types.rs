//! Convenience type aliases for wrapped [`nalgebra`] types.

use nalgebra as na;

use super::space::InSpace;
use super::transform::BetweenSpaces;

pub type Point3<S> = InSpace<na::Point3<f64>, S>;
pub type Vector3<S> = InSpace<na::Vector3<f64>, S>;

pub type Isometry3<S1, S2> = BetweenSpaces<na::Isometry3<f64>, S1, S2>;
