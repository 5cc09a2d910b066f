//! Rigid transforms between spaces.

use std::marker::PhantomData;
use std::ops::Mul;

use nalgebra as na;

use super::space::{InSpace, Space, SpaceOver};

/// Maps `T`s from `S1` into `S2`, and back.
pub trait Transform<T, S1, S2>
where
    S1: SpaceOver<T>,
    S2: SpaceOver<T>,
{
    /// Express `x` in `S2`.
    fn transform(&self, x: &InSpace<T, S1>) -> InSpace<T, S2>;

    /// Express `x` in `S1`.
    fn inverse_transform(&self, x: &InSpace<T, S2>) -> InSpace<T, S1>;
}

/// A `T` that maps values from `S1` into `S2`.
///
/// Spaces are plain marker types, so the derived impls only need them to be unit structs that
/// derive the same traits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetweenSpaces<T, S1: Space, S2: Space> {
    pub inner: T,
    spaces: PhantomData<(S1, S2)>,
}

impl<T, S1: Space, S2: Space> BetweenSpaces<T, S1, S2> {
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            spaces: PhantomData,
        }
    }

    /// Apply `self` first and `next` second, giving a transform from `S1` to `S3`.
    pub fn chain<U, S3>(self, next: BetweenSpaces<U, S2, S3>) -> BetweenSpaces<U::Output, S1, S3>
    where
        U: Mul<T>,
        S3: Space,
    {
        BetweenSpaces::new(next.inner * self.inner)
    }

    /// Change the wrapped transform, keeping the spaces it maps between.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BetweenSpaces<U, S1, S2> {
        BetweenSpaces::new(f(self.inner))
    }
}

impl<T, S1: Space, S2: Space> From<T> for BetweenSpaces<T, S1, S2> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

impl<S1: Space, S2: Space> BetweenSpaces<na::Isometry3<f64>, S1, S2> {
    #[must_use]
    pub fn identity() -> Self {
        Self::new(na::Isometry3::identity())
    }

    /// The transform mapping `S2` back into `S1`.
    #[must_use]
    pub fn inverse(&self) -> BetweenSpaces<na::Isometry3<f64>, S2, S1> {
        BetweenSpaces::new(self.inner.inverse())
    }
}

impl<S1, S2> Transform<na::Point3<f64>, S1, S2> for BetweenSpaces<na::Isometry3<f64>, S1, S2>
where
    S1: SpaceOver<na::Point3<f64>>,
    S2: SpaceOver<na::Point3<f64>>,
{
    fn transform(&self, x: &InSpace<na::Point3<f64>, S1>) -> InSpace<na::Point3<f64>, S2> {
        self.inner.transform_point(&x.inner).into()
    }

    fn inverse_transform(&self, x: &InSpace<na::Point3<f64>, S2>) -> InSpace<na::Point3<f64>, S1> {
        self.inner.inverse_transform_point(&x.inner).into()
    }
}

/// Vectors are directions, only the rotation applies to them.
impl<S1, S2> Transform<na::Vector3<f64>, S1, S2> for BetweenSpaces<na::Isometry3<f64>, S1, S2>
where
    S1: SpaceOver<na::Vector3<f64>>,
    S2: SpaceOver<na::Vector3<f64>>,
{
    fn transform(&self, x: &InSpace<na::Vector3<f64>, S1>) -> InSpace<na::Vector3<f64>, S2> {
        self.inner.transform_vector(&x.inner).into()
    }

    fn inverse_transform(
        &self,
        x: &InSpace<na::Vector3<f64>, S2>,
    ) -> InSpace<na::Vector3<f64>, S1> {
        self.inner.inverse_transform_vector(&x.inner).into()
    }
}
