//! Traits and types for defining spaces and tagging data with spaces.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Deref, Div, Mul, Neg, Sub, SubAssign};

/// Marker trait for spaces which can be mapped between.
pub trait Space {}

/// Marker trait for spaces which contain `T`s within them.
pub trait SpaceOver<T>: Space {}

/// A `T` expressed in the space `S`.
///
/// Values in different spaces cannot be mixed, moving a value into another space requires a
/// [`Transform`](crate::Transform).
#[derive(Clone, Copy, PartialEq)]
pub struct InSpace<T, S: SpaceOver<T>> {
    pub inner: T,
    space: PhantomData<S>,
}

impl<T, S: SpaceOver<T>> InSpace<T, S> {
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            space: PhantomData,
        }
    }

    /// Unwrap the value, dropping the space it was tagged with.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T, S: SpaceOver<T>> From<T> for InSpace<T, S> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

impl<T: fmt::Debug, S: SpaceOver<T>> fmt::Debug for InSpace<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let space = std::any::type_name::<S>();
        let space = space.rsplit("::").next().unwrap_or(space);

        write!(f, "{:?} in {space}", self.inner)
    }
}

impl<T, S: SpaceOver<T>> Deref for InSpace<T, S> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

/// Implements a binary operator between two values in the same space, for owned and borrowed
/// right hand sides.
macro_rules! impl_same_space_op {
    ($op:ident, $method:ident) => {
        impl<T1, T2, S> $op<InSpace<T2, S>> for InSpace<T1, S>
        where
            T1: $op<T2>,
            S: SpaceOver<T1> + SpaceOver<T2> + SpaceOver<T1::Output>,
        {
            type Output = InSpace<T1::Output, S>;

            fn $method(self, rhs: InSpace<T2, S>) -> Self::Output {
                self.inner.$method(rhs.inner).into()
            }
        }

        impl<'a, T1, T2, S> $op<&'a InSpace<T2, S>> for InSpace<T1, S>
        where
            T1: $op<&'a T2>,
            S: SpaceOver<T1> + SpaceOver<T2> + SpaceOver<T1::Output>,
        {
            type Output = InSpace<T1::Output, S>;

            fn $method(self, rhs: &'a InSpace<T2, S>) -> Self::Output {
                self.inner.$method(&rhs.inner).into()
            }
        }
    };
}

impl_same_space_op!(Add, add);
impl_same_space_op!(Sub, sub);

impl<T1, T2, S> AddAssign<InSpace<T2, S>> for InSpace<T1, S>
where
    T1: AddAssign<T2>,
    S: SpaceOver<T1> + SpaceOver<T2>,
{
    fn add_assign(&mut self, rhs: InSpace<T2, S>) {
        self.inner += rhs.inner;
    }
}

impl<T1, T2, S> SubAssign<InSpace<T2, S>> for InSpace<T1, S>
where
    T1: SubAssign<T2>,
    S: SpaceOver<T1> + SpaceOver<T2>,
{
    fn sub_assign(&mut self, rhs: InSpace<T2, S>) {
        self.inner -= rhs.inner;
    }
}

impl<T, S> Neg for InSpace<T, S>
where
    T: Neg<Output = T>,
    S: SpaceOver<T>,
{
    type Output = InSpace<T, S>;

    fn neg(self) -> Self::Output {
        (-self.inner).into()
    }
}

impl<T, S> Mul<f64> for InSpace<T, S>
where
    T: Mul<f64, Output = T>,
    S: SpaceOver<T>,
{
    type Output = InSpace<T, S>;

    fn mul(self, rhs: f64) -> Self::Output {
        (self.inner * rhs).into()
    }
}

impl<T, S> Mul<InSpace<T, S>> for f64
where
    f64: Mul<T, Output = T>,
    S: SpaceOver<T>,
{
    type Output = InSpace<T, S>;

    fn mul(self, rhs: InSpace<T, S>) -> Self::Output {
        (self * rhs.inner).into()
    }
}

impl<T, S> Div<f64> for InSpace<T, S>
where
    T: Div<f64, Output = T>,
    S: SpaceOver<T>,
{
    type Output = InSpace<T, S>;

    fn div(self, rhs: f64) -> Self::Output {
        (self.inner / rhs).into()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra as na;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Local;
    impl Space for Local {}
    impl SpaceOver<na::Point3<f64>> for Local {}
    impl SpaceOver<na::Vector3<f64>> for Local {}

    #[test]
    fn point_minus_point_is_vector_in_same_space() {
        let a: InSpace<na::Point3<f64>, Local> = na::point![1.0, 2.0, 3.0].into();
        let b: InSpace<na::Point3<f64>, Local> = na::point![0.5, 0.5, 0.5].into();

        let d: InSpace<na::Vector3<f64>, Local> = a - b;
        assert_eq!(d.inner, na::vector![0.5, 1.5, 2.5]);
    }

    #[test]
    fn point_plus_vector_stays_in_space() {
        let mut p: InSpace<na::Point3<f64>, Local> = na::Point3::origin().into();
        let v: InSpace<na::Vector3<f64>, Local> = na::vector![0.0, 0.0, -1.0].into();

        p += v;
        p -= v * 0.5;
        assert_eq!(p.inner, na::point![0.0, 0.0, -0.5]);
    }

    #[test]
    fn scaling_and_negation() {
        let v: InSpace<na::Vector3<f64>, Local> = na::vector![1.0, -2.0, 4.0].into();

        assert_eq!((2.0 * v).inner, na::vector![2.0, -4.0, 8.0]);
        assert_eq!((v / 2.0).inner, na::vector![0.5, -1.0, 2.0]);
        assert_eq!((-v).inner, na::vector![-1.0, 2.0, -4.0]);
    }
}
