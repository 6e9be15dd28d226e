//! Allocation-free stepping for one-dimensional systems.
//!
//! Stage order and operand association match [`crate::stepper`] exactly, so a
//! scalar run is bit-identical to an N = 1 run through the general engine.

use crate::error::OdeError;
use crate::scheme::Scheme;
use crate::stepper::{check_step_size, WriteMode};
use crate::traits::{Scalar, ScalarField};

#[inline(always)]
fn euler<T: Scalar>(field: &impl ScalarField<T>, u: T, h: T) -> T {
    let udot = field.apply(u);
    u + h * udot
}

#[inline(always)]
fn heun<T: Scalar>(field: &impl ScalarField<T>, u: T, h: T, h2: T) -> T {
    let udot1 = field.apply(u);
    let udot2 = field.apply(u + h * udot1);
    u + h2 * (udot1 + udot2)
}

#[inline(always)]
fn rk4<T: Scalar>(field: &impl ScalarField<T>, u: T, h: T, h2: T, h6: T, two: T) -> T {
    let udot1 = field.apply(u);
    let udot2 = field.apply(u + h2 * udot1);
    let udot3 = field.apply(u + h2 * udot2);
    let udot4 = field.apply(u + h * udot3);
    u + h6 * (udot1 + two * udot2 + two * udot3 + udot4)
}

fn drive<T: Scalar>(buffer: &mut [T], mode: WriteMode, mut next: impl FnMut(T) -> T) {
    for k in 1..buffer.len() {
        let value = next(buffer[k - 1]);
        mode.store(&mut buffer[k], value);
    }
}

/// Advances a scalar trajectory in place. `buffer[0]` holds the initial
/// value; every later slot receives one step. Buffers shorter than two
/// elements are left untouched.
pub fn integrate_scalar<T, S>(
    scheme: Scheme,
    field: &S,
    buffer: &mut [T],
    h: T,
    mode: WriteMode,
) -> Result<(), OdeError>
where
    T: Scalar,
    S: ScalarField<T>,
{
    check_step_size(h)?;

    let two = T::one() + T::one();
    let h2 = h / two;
    let h6 = h / (two + two + two);

    match scheme {
        Scheme::Euler => drive(buffer, mode, |u| euler(field, u, h)),
        Scheme::Heun => drive(buffer, mode, |u| heun(field, u, h, h2)),
        Scheme::Rk4 => drive(buffer, mode, |u| rk4(field, u, h, h2, h6, two)),
    }
    Ok(())
}
