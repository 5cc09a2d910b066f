//! Leg identifiers and per-leg storage.
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ConfigurationError;

/// One of the four legs of the robot.
///
/// The short names match the leg prefixes of the robot's joint names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Leg {
    #[serde(rename = "RL")]
    #[strum(serialize = "RL")]
    RearLeft,
    #[serde(rename = "FL")]
    #[strum(serialize = "FL")]
    FrontLeft,
    #[serde(rename = "RR")]
    #[strum(serialize = "RR")]
    RearRight,
    #[serde(rename = "FR")]
    #[strum(serialize = "FR")]
    FrontRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    Front,
    Rear,
}

impl Leg {
    /// All legs, in the order in which their joints appear in the joint state.
    pub const ALL: [Leg; 4] = [Leg::RearLeft, Leg::FrontLeft, Leg::RearRight, Leg::FrontRight];

    /// Position of this leg in [`Leg::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Leg::RearLeft => 0,
            Leg::FrontLeft => 1,
            Leg::RearRight => 2,
            Leg::FrontRight => 3,
        }
    }

    #[must_use]
    pub fn side(self) -> Side {
        match self {
            Leg::RearLeft | Leg::FrontLeft => Side::Left,
            Leg::RearRight | Leg::FrontRight => Side::Right,
        }
    }

    #[must_use]
    pub fn end(self) -> End {
        match self {
            Leg::FrontLeft | Leg::FrontRight => End::Front,
            Leg::RearLeft | Leg::RearRight => End::Rear,
        }
    }
}

/// A value for each of the four legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegMap<T> {
    pub rear_left: T,
    pub front_left: T,
    pub rear_right: T,
    pub front_right: T,
}

impl<T> LegMap<T> {
    /// Build a [`LegMap`] by calling `f` for every leg, in [`Leg::ALL`] order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Leg) -> T,
    {
        Self {
            rear_left: f(Leg::RearLeft),
            front_left: f(Leg::FrontLeft),
            rear_right: f(Leg::RearRight),
            front_right: f(Leg::FrontRight),
        }
    }

    /// Build a [`LegMap`] from `(leg, value)` pairs, every leg must occur exactly once.
    ///
    /// # Example
    ///
    /// ```
    /// use quadruped::leg::{Leg, LegMap};
    ///
    /// let map = LegMap::try_from_entries(Leg::ALL.map(|leg| (leg, leg.index()))).unwrap();
    /// assert_eq!(map[Leg::RearRight], 2);
    ///
    /// assert!(LegMap::try_from_entries([(Leg::RearLeft, 0)]).is_err());
    /// ```
    pub fn try_from_entries<I>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (Leg, T)>,
    {
        let mut slots = LegMap::<Option<T>>::default();

        for (leg, value) in entries {
            if slots[leg].replace(value).is_some() {
                return Err(ConfigurationError::DuplicateLeg(leg));
            }
        }

        slots.transpose()
    }

    pub fn map<F, U>(self, mut f: F) -> LegMap<U>
    where
        F: FnMut(T) -> U,
    {
        LegMap {
            rear_left: f(self.rear_left),
            front_left: f(self.front_left),
            rear_right: f(self.rear_right),
            front_right: f(self.front_right),
        }
    }

    pub fn zip<U>(self, other: LegMap<U>) -> LegMap<(T, U)> {
        LegMap {
            rear_left: (self.rear_left, other.rear_left),
            front_left: (self.front_left, other.front_left),
            rear_right: (self.rear_right, other.rear_right),
            front_right: (self.front_right, other.front_right),
        }
    }

    /// Iterate over `(leg, value)` pairs, in [`Leg::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Leg, &T)> {
        Leg::ALL.into_iter().map(move |leg| (leg, &self[leg]))
    }

    /// Iterate over the values, in [`Leg::ALL`] order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        [
            &self.rear_left,
            &self.front_left,
            &self.rear_right,
            &self.front_right,
        ]
        .into_iter()
    }
}

impl<T: Clone> LegMap<T> {
    pub fn fill(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> LegMap<Option<T>> {
    /// Turn a map of optional values into a map of values, failing on the first missing leg.
    pub fn transpose(self) -> Result<LegMap<T>, ConfigurationError> {
        let LegMap {
            rear_left,
            front_left,
            rear_right,
            front_right,
        } = self;

        Ok(LegMap {
            rear_left: rear_left.ok_or(ConfigurationError::MissingLeg(Leg::RearLeft))?,
            front_left: front_left.ok_or(ConfigurationError::MissingLeg(Leg::FrontLeft))?,
            rear_right: rear_right.ok_or(ConfigurationError::MissingLeg(Leg::RearRight))?,
            front_right: front_right.ok_or(ConfigurationError::MissingLeg(Leg::FrontRight))?,
        })
    }
}

impl<T> Index<Leg> for LegMap<T> {
    type Output = T;

    fn index(&self, leg: Leg) -> &T {
        match leg {
            Leg::RearLeft => &self.rear_left,
            Leg::FrontLeft => &self.front_left,
            Leg::RearRight => &self.rear_right,
            Leg::FrontRight => &self.front_right,
        }
    }
}

impl<T> IndexMut<Leg> for LegMap<T> {
    fn index_mut(&mut self, leg: Leg) -> &mut T {
        match leg {
            Leg::RearLeft => &mut self.rear_left,
            Leg::FrontLeft => &mut self.front_left,
            Leg::RearRight => &mut self.rear_right,
            Leg::FrontRight => &mut self.front_right,
        }
    }
}
