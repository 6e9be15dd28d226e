use crate::error::OdeError;
use crate::scheme::Scheme;
use crate::trajectory::Trajectory;
use crate::traits::{Scalar, VectorField};
use serde::{Deserialize, Serialize};

/// How a step's result is written into the next trajectory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// `u1 = u + increment`. Prior contents of the target slot are ignored.
    #[default]
    Overwrite,
    /// `u1 += u + increment`. The target slot must be zeroed unless the caller
    /// deliberately pre-seeds it (for instance with noise increments).
    Accumulate,
}

impl WriteMode {
    #[inline(always)]
    pub(crate) fn store<T: Scalar>(self, target: &mut T, value: T) {
        match self {
            WriteMode::Overwrite => *target = value,
            WriteMode::Accumulate => *target = *target + value,
        }
    }
}

/// A scheme that advances one state block to the next.
///
/// Implementors own their scratch buffers, sized once for a fixed dimension,
/// so repeated calls do not allocate.
pub trait Steppable<T: Scalar> {
    /// Computes the state following `u` and writes it into `u1`.
    /// u: current state
    /// u1: next trajectory slot
    /// h: step size
    fn step(&mut self, field: &impl VectorField<T>, u: &[T], u1: &mut [T], h: T, mode: WriteMode);
}

/// Forward Euler
pub struct Euler<T: Scalar> {
    udot: Vec<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            udot: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Euler<T> {
    fn step(&mut self, field: &impl VectorField<T>, u: &[T], u1: &mut [T], h: T, mode: WriteMode) {
        field.apply(u, &mut self.udot);
        for i in 0..u.len() {
            mode.store(&mut u1[i], u[i] + h * self.udot[i]);
        }
    }
}

/// Heun's method (improved Euler, RK2)
pub struct Heun<T: Scalar> {
    udot1: Vec<T>,
    udot2: Vec<T>,
    v: Vec<T>,
}

impl<T: Scalar> Heun<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::zero();
        Self {
            udot1: vec![z; dim],
            udot2: vec![z; dim],
            v: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Heun<T> {
    fn step(&mut self, field: &impl VectorField<T>, u: &[T], u1: &mut [T], h: T, mode: WriteMode) {
        let h2 = h / (T::one() + T::one());

        // predictor
        field.apply(u, &mut self.udot1);
        for i in 0..u.len() {
            self.v[i] = u[i] + h * self.udot1[i];
        }
        field.apply(&self.v, &mut self.udot2);

        // u1 = u + h/2 * (udot1 + udot2)
        for i in 0..u.len() {
            mode.store(&mut u1[i], u[i] + h2 * (self.udot1[i] + self.udot2[i]));
        }
    }
}

/// Classic Runge-Kutta 4th Order
pub struct Rk4<T: Scalar> {
    udot1: Vec<T>,
    udot2: Vec<T>,
    udot3: Vec<T>,
    udot4: Vec<T>,
    v: Vec<T>,
}

impl<T: Scalar> Rk4<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::zero();
        Self {
            udot1: vec![z; dim],
            udot2: vec![z; dim],
            udot3: vec![z; dim],
            udot4: vec![z; dim],
            v: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Rk4<T> {
    fn step(&mut self, field: &impl VectorField<T>, u: &[T], u1: &mut [T], h: T, mode: WriteMode) {
        let two = T::one() + T::one();
        let h2 = h / two;
        let h6 = h / (two + two + two);

        // udot1 = f(u)
        field.apply(u, &mut self.udot1);

        // udot2 = f(u + h/2 * udot1)
        for i in 0..u.len() {
            self.v[i] = u[i] + h2 * self.udot1[i];
        }
        field.apply(&self.v, &mut self.udot2);

        // udot3 = f(u + h/2 * udot2)
        for i in 0..u.len() {
            self.v[i] = u[i] + h2 * self.udot2[i];
        }
        field.apply(&self.v, &mut self.udot3);

        // udot4 = f(u + h * udot3)
        for i in 0..u.len() {
            self.v[i] = u[i] + h * self.udot3[i];
        }
        field.apply(&self.v, &mut self.udot4);

        // u1 = u + h/6 * (udot1 + 2 udot2 + 2 udot3 + udot4)
        for i in 0..u.len() {
            mode.store(
                &mut u1[i],
                u[i] + h6
                    * (self.udot1[i] + two * self.udot2[i] + two * self.udot3[i] + self.udot4[i]),
            );
        }
    }
}

fn drive<T, V, S>(stepper: &mut S, field: &V, trajectory: &mut Trajectory<'_, T>, h: T, mode: WriteMode)
where
    T: Scalar,
    V: VectorField<T>,
    S: Steppable<T>,
{
    for k in 0..trajectory.steps().saturating_sub(1) {
        let (u, u1) = trajectory.split_step(k);
        stepper.step(field, u, u1, h, mode);
    }
}

pub(crate) fn check_step_size<T: Scalar>(h: T) -> Result<(), OdeError> {
    if !h.is_finite() {
        return Err(OdeError::InvalidStepSize(h.to_f64().unwrap_or(f64::NAN)));
    }
    Ok(())
}

fn check_field<T: Scalar>(field: &impl VectorField<T>, dimension: usize) -> Result<(), OdeError> {
    if field.dimension() != dimension {
        return Err(OdeError::DimensionMismatch {
            field: field.dimension(),
            trajectory: dimension,
        });
    }
    if dimension < field.min_dimension() {
        return Err(OdeError::DimensionTooSmall {
            required: field.min_dimension(),
            actual: dimension,
        });
    }
    Ok(())
}

/// Advances `trajectory` in place from slot 0 through its last slot using
/// `scheme` with fixed step `h`.
///
/// Slot 0 must already hold the initial state. A trajectory of one step (or
/// none) is left untouched. All checks run before the first step, so an
/// error leaves the buffer unmodified.
pub fn integrate<T, V>(
    scheme: Scheme,
    field: &V,
    trajectory: &mut Trajectory<'_, T>,
    h: T,
    mode: WriteMode,
) -> Result<(), OdeError>
where
    T: Scalar,
    V: VectorField<T>,
{
    let dim = trajectory.dimension();
    check_field(field, dim)?;
    check_step_size(h)?;

    match scheme {
        Scheme::Euler => drive(&mut Euler::new(dim), field, trajectory, h, mode),
        Scheme::Heun => drive(&mut Heun::new(dim), field, trajectory, h, mode),
        Scheme::Rk4 => drive(&mut Rk4::new(dim), field, trajectory, h, mode),
    }
    Ok(())
}

/// [`integrate`] over a raw time-major buffer of `dimension`-sized states.
pub fn integrate_fn<T, V>(
    scheme: Scheme,
    field: &V,
    buffer: &mut [T],
    dimension: usize,
    h: T,
    mode: WriteMode,
) -> Result<(), OdeError>
where
    T: Scalar,
    V: VectorField<T>,
{
    let mut trajectory = Trajectory::from_buffer(buffer, dimension)?;
    integrate(scheme, field, &mut trajectory, h, mode)
}
