//! # spatial
//!
//! Frame-tagged linear algebra for the quadruped controller.
//!
//! A foot position is only meaningful together with the frame it is expressed in. spatial wraps
//! common [`nalgebra`] types such as [`nalgebra::Point3`] and [`nalgebra::Vector3`] in types that
//! carry the coordinate frame as a type argument, so that using a world-frame position where a
//! hip-frame position is expected fails to compile instead of silently producing wrong angles.
//!
//! ## [`Space`] and [`SpaceOver<T>`]
//!
//! [`Space`] is implemented for marker types that represent a coordinate frame.
//! [`SpaceOver<T>`] additionally declares which values may live in that frame.
//!
//! ```rust
//! use nalgebra as na;
//! use spatial::{Space, SpaceOver};
//!
//! struct Body;
//! struct World;
//!
//! impl Space for Body {}
//! impl Space for World {}
//!
//! impl SpaceOver<na::Point3<f64>> for Body {}
//! impl SpaceOver<na::Point3<f64>> for World {}
//! ```
//!
//! ## [`InSpace<T, S>`] and [`BetweenSpaces<T, S1, S2>`]
//!
//! [`InSpace<T, S>`] wraps a `T` expressed in `S`. [`BetweenSpaces<T, S1, S2>`] wraps a
//! transformation that maps values in `S1` into `S2`, applied through the [`Transform`] trait.
//!
//! ```rust
//! # use nalgebra as na;
//! # use spatial::{Space, SpaceOver};
//! # struct Body;
//! # impl Space for Body {}
//! # impl SpaceOver<na::Point3<f64>> for Body {}
//! # struct World;
//! # impl Space for World {}
//! # impl SpaceOver<na::Point3<f64>> for World {}
//! use spatial::{types::*, Transform};
//!
//! let body_to_world: Isometry3<Body, World> =
//!     na::Isometry3::translation(1.0, 2.0, 3.0).into();
//!
//! let foot: Point3<Body> = na::point![0.2, 0.1, -0.4].into();
//!
//! // ERROR: `foot` is in body space!
//! // let foot_in_world: Point3<World> = foot;
//! let foot_in_world: Point3<World> = body_to_world.transform(&foot);
//! assert!((foot_in_world.inner - na::point![1.2, 2.1, 2.6]).norm() < 1e-12);
//!
//! let back: Point3<Body> = body_to_world.inverse_transform(&foot_in_world);
//! assert!((back.inner - foot.inner).norm() < 1e-12);
//! ```

pub mod space;
pub use space::*;

pub mod transform;
pub use transform::*;

pub mod types;
