//! Samples of planned swing trajectories, for drawing them in a viewer.
//!
//! Only the data is produced here, publishing and rendering is left to the caller.
use std::time::Duration;

use spatial::types::Point3;

use crate::gait::FootTrajectory;
use crate::kinematics::spaces::World;
use crate::leg::Leg;

/// Number of points sampled from every swing trajectory.
pub const TRAJECTORY_SAMPLES: usize = 30;

/// Diameter of the spheres drawn for every sample, in meters.
pub const SAMPLE_SCALE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Legs that swing together share a color.
    #[must_use]
    pub fn for_leg(leg: Leg) -> Self {
        match leg {
            Leg::FrontLeft | Leg::RearRight => Self::RED,
            Leg::RearLeft | Leg::FrontRight => Self::BLUE,
        }
    }
}

/// Points along the swing of a single leg.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySamples {
    pub leg: Leg,
    pub points: Vec<Point3<World>>,
    pub color: Color,
    pub scale: f64,
    /// How long the samples stay valid, the duration of one swing.
    pub lifetime: Duration,
}

impl TrajectorySamples {
    /// Sample the trajectory of `leg` over the swing part of the gait, which starts at
    /// `stance_phase`.
    ///
    /// Phases without a reference state are skipped.
    #[must_use]
    pub fn sample(
        trajectory: &impl FootTrajectory,
        leg: Leg,
        stance_phase: f64,
        swing_duration: Duration,
    ) -> Self {
        let step = (1.0 - stance_phase) / TRAJECTORY_SAMPLES as f64;

        let points = (0..TRAJECTORY_SAMPLES)
            .filter_map(|i| trajectory.reference_state(leg, stance_phase + step * i as f64))
            .map(|state| state.position)
            .collect();

        Self {
            leg,
            points,
            color: Color::for_leg(leg),
            scale: SAMPLE_SCALE,
            lifetime: swing_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra as na;

    use super::*;
    use crate::gait::{FootState, SwingBounds};

    /// Reports the phase as the x coordinate.
    struct PhaseEcho;

    impl FootTrajectory for PhaseEcho {
        fn plan(&mut self, _leg: Leg, _bounds: SwingBounds) {}

        fn reference_state(&self, _leg: Leg, phase: f64) -> Option<FootState> {
            Some(FootState::at_rest(na::point![phase, 0.0, 0.0].into()))
        }
    }

    #[test]
    fn samples_cover_the_swing_phase() {
        let samples =
            TrajectorySamples::sample(&PhaseEcho, Leg::FrontLeft, 0.4, Duration::from_millis(300));

        assert_eq!(samples.points.len(), TRAJECTORY_SAMPLES);
        assert!((samples.points[0].x - 0.4).abs() < 1e-12);
        assert!((samples.points[29].x - 0.98).abs() < 1e-12);
        assert_eq!(samples.color, Color::RED);
        assert_eq!(samples.lifetime, Duration::from_millis(300));
    }

    #[test]
    fn diagonal_pairs_share_colors() {
        assert_eq!(Color::for_leg(Leg::FrontLeft), Color::for_leg(Leg::RearRight));
        assert_eq!(Color::for_leg(Leg::RearLeft), Color::for_leg(Leg::FrontRight));
        assert_ne!(Color::for_leg(Leg::FrontLeft), Color::for_leg(Leg::FrontRight));
    }
}
