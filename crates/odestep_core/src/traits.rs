use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as state components.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// An autonomous vector field `x' = f(x)` over a dense state of fixed dimension.
///
/// Implementations must be referentially transparent: a stepper may evaluate
/// the field several times per step and expects identical output for
/// identical input. Explicit time dependence belongs in the field's own
/// parameters.
pub trait VectorField<T: Scalar> {
    /// Returns the dimension of the state space this field expects.
    fn dimension(&self) -> usize;

    /// Smallest dimension the field is defined for.
    fn min_dimension(&self) -> usize {
        1
    }

    /// Evaluates the field.
    /// x: current state (length `dimension()`)
    /// out: buffer receiving dx/dt (length `dimension()`)
    fn apply(&self, x: &[T], out: &mut [T]);
}

/// A one-dimensional autonomous field `x' = f(x)`.
pub trait ScalarField<T: Scalar> {
    fn apply(&self, x: T) -> T;
}

impl<T: Scalar, F: Fn(T) -> T> ScalarField<T> for F {
    fn apply(&self, x: T) -> T {
        self(x)
    }
}

/// Binds a plain function with extra parameters into a [`VectorField`].
///
/// The function receives `(out, x, dimension, params)`, mirroring the usual
/// C-style right-hand-side signature.
pub struct FnField<P, F> {
    dimension: usize,
    min_dimension: usize,
    params: P,
    func: F,
}

impl<P, F> FnField<P, F> {
    pub fn new(dimension: usize, params: P, func: F) -> Self {
        Self {
            dimension,
            min_dimension: 1,
            params,
            func,
        }
    }

    /// Declares the smallest dimension `func` can handle.
    pub fn with_min_dimension(mut self, min_dimension: usize) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    pub fn params(&self) -> &P {
        &self.params
    }
}

impl<T, P, F> VectorField<T> for FnField<P, F>
where
    T: Scalar,
    F: Fn(&mut [T], &[T], usize, &P),
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn min_dimension(&self) -> usize {
        self.min_dimension
    }

    fn apply(&self, x: &[T], out: &mut [T]) {
        (self.func)(out, x, self.dimension, &self.params)
    }
}

/// Scalar counterpart of [`FnField`]: `func(x, params)`.
pub struct ScalarFnField<P, F> {
    params: P,
    func: F,
}

impl<P, F> ScalarFnField<P, F> {
    pub fn new(params: P, func: F) -> Self {
        Self { params, func }
    }
}

impl<T, P, F> ScalarField<T> for ScalarFnField<P, F>
where
    T: Scalar,
    F: Fn(T, &P) -> T,
{
    fn apply(&self, x: T) -> T {
        (self.func)(x, &self.params)
    }
}

/// Presents a [`ScalarField`] as a one-dimensional [`VectorField`].
pub struct AsVector<S>(pub S);

impl<T: Scalar, S: ScalarField<T>> VectorField<T> for AsVector<S> {
    fn dimension(&self) -> usize {
        1
    }

    fn apply(&self, x: &[T], out: &mut [T]) {
        out[0] = self.0.apply(x[0]);
    }
}
