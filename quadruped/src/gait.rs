//! Inputs produced by the gait scheduler and foothold planner, and the seam to the swing
//! trajectory generator.
use serde::{Deserialize, Serialize};

use spatial::types::{Point3, Vector3};

use crate::error::ConfigurationError;
use crate::kinematics::spaces::World;
use crate::leg::{Leg, LegMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegState {
    /// The foot is on the ground and carries load.
    Stance,
    /// The foot is in the air, moving towards its next foothold.
    Swing,
}

/// Gait state of a single leg for the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegGait {
    pub state: LegState,
    /// Progress through the current stance or swing segment, in `[0, 1]`.
    pub phase: f64,
}

impl LegGait {
    #[must_use]
    pub fn stance(phase: f64) -> Self {
        Self {
            state: LegState::Stance,
            phase,
        }
    }

    #[must_use]
    pub fn swing(phase: f64) -> Self {
        Self {
            state: LegState::Swing,
            phase,
        }
    }

    /// Check that the phase lies in `[0, 1]`.
    pub fn validate(&self, leg: Leg) -> Result<(), ConfigurationError> {
        if (0.0..=1.0).contains(&self.phase) {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidPhase {
                leg,
                phase: self.phase,
            })
        }
    }
}

/// Gait state of all four legs.
pub type GaitMap = LegMap<LegGait>;

/// Target world positions for the swing that is planned this cycle.
///
/// Footholds are planned for all legs at once, so there are either none or four of them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Footholds(Option<LegMap<Point3<World>>>);

impl Footholds {
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn new(targets: LegMap<Point3<World>>) -> Self {
        Self(Some(targets))
    }

    /// Collect footholds from `(leg, target)` pairs.
    ///
    /// # Errors
    ///
    /// Fails unless the entries are either empty or name every leg exactly once.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (Leg, Point3<World>)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();

        match entries.len() {
            0 => Ok(Self::none()),
            4 => LegMap::try_from_entries(entries).map(Self::new),
            count => Err(ConfigurationError::FootholdCount(count)),
        }
    }

    #[must_use]
    pub fn get(&self, leg: Leg) -> Option<&Point3<World>> {
        self.0.as_ref().map(|targets| &targets[leg])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Reference position and velocity of a foot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootState {
    pub position: Point3<World>,
    pub velocity: Vector3<World>,
}

impl FootState {
    /// A foot that is not moving.
    #[must_use]
    pub fn at_rest(position: Point3<World>) -> Self {
        Self {
            position,
            velocity: nalgebra::Vector3::zeros().into(),
        }
    }
}

/// Start and end point of a planned swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingBounds {
    pub start: Point3<World>,
    pub end: Point3<World>,
}

/// Generator of swing foot trajectories.
///
/// Implementations decide the shape of the swing. The gait cycle only asks for new plans when
/// footholds were chosen, and samples the current plan every cycle.
pub trait FootTrajectory {
    /// Replace the trajectory of `leg` by one that moves the foot between `bounds`.
    fn plan(&mut self, leg: Leg, bounds: SwingBounds);

    /// Reference state of the foot of `leg` at `phase`, or `None` if nothing was planned yet.
    fn reference_state(&self, leg: Leg, phase: f64) -> Option<FootState>;
}
