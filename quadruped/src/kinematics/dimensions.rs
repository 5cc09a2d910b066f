//! Contains the dimensions of the robot in meters.
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Link lengths and hip placement shared by all four legs.
///
/// The hip offsets are mirrored per leg, see [`LegLinkConfig`](super::quadruped::LegLinkConfig).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotDimensions {
    /// Sideways offset from the hip joint to the thigh.
    pub l1: f64,
    /// Length of the thigh.
    pub l2: f64,
    /// Length of the calf, up to the center of the foot.
    pub l3: f64,
    /// Forward distance from the body origin to the front hips.
    pub xbh: f64,
    /// Sideways distance from the body origin to the left hips.
    pub ybh: f64,
    /// Vertical distance from the body origin to the hips.
    pub zbh: f64,
}

impl Default for RobotDimensions {
    fn default() -> Self {
        Self {
            l1: 0.077,
            l2: 0.211,
            l3: 0.230,
            xbh: 0.196,
            ybh: 0.050,
            zbh: 0.0,
        }
    }
}

impl RobotDimensions {
    /// The thigh and calf need a positive length for the inverse kinematics, the offsets only
    /// have to be finite.
    ///
    /// # Errors
    ///
    /// Returns the first dimension that is out of range.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let links = [("l2", self.l2), ("l3", self.l3)];
        let offsets = [
            ("l1", self.l1),
            ("xbh", self.xbh),
            ("ybh", self.ybh),
            ("zbh", self.zbh),
        ];

        let invalid = links
            .into_iter()
            .find(|(_, length)| !(length.is_finite() && *length > 0.0))
            .or_else(|| offsets.into_iter().find(|(_, offset)| !offset.is_finite()));

        match invalid {
            Some((name, value)) => Err(ConfigurationError::InvalidDimension { name, value }),
            None => Ok(()),
        }
    }
}
