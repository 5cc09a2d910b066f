//! The coordinate frames foot positions and forces are expressed in.
//!
//! All frames share the convention that the x-axis points forward, the y-axis points left and
//! the z-axis points up, when the robot is standing level.
use nalgebra as na;
use spatial::{Space, SpaceOver};

macro_rules! impl_space {
    ($(#[$meta:meta])* $space:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $space;
        impl Space for $space {}
        impl SpaceOver<na::Point3<f64>> for $space {}
        impl SpaceOver<na::Vector3<f64>> for $space {}
    };
}

impl_space! {
    /// Fixed inertial frame the gait is planned in.
    World
}

impl_space! {
    /// Frame attached to the robot's base link.
    Body
}

impl_space! {
    /// Frame at the hip of a single leg, translated from [`Body`] by the leg's hip offset.
    Hip
}
