//! Kinematics of the quadruped.
//!
//! Every leg is an independent 3 degree of freedom chain attached to the body at its hip. The
//! closed form expressions for a single leg live in [`leg`], the composition of the four legs in
//! [`quadruped`].

pub mod dimensions;
pub mod leg;
pub mod quadruped;
pub mod spaces;

pub mod prelude {
    pub use super::QuadrupedKinematics;
    pub use super::dimensions::RobotDimensions;
    pub use super::leg::LegLinks;
    pub use super::quadruped::LegLinkConfig;
    pub use super::spaces::*;
}

pub use quadruped::QuadrupedKinematics;
