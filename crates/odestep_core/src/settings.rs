use crate::error::OdeError;
use crate::scalar::integrate_scalar;
use crate::scheme::Scheme;
use crate::stepper::{check_step_size, integrate, WriteMode};
use crate::trajectory::{zeroed_buffer, Trajectory};
use crate::traits::{Scalar, ScalarField, VectorField};
use serde::{Deserialize, Serialize};

/// Run configuration for a fixed-step integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    pub scheme: Scheme,
    pub step_size: f64,
    /// Number of stored states, including the initial one.
    pub steps: usize,
    pub write_mode: WriteMode,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            scheme: Scheme::Heun,
            step_size: 0.001,
            steps: 10_000,
            write_mode: WriteMode::Overwrite,
        }
    }
}

impl IntegrationSettings {
    pub fn new(scheme: Scheme, step_size: f64, steps: usize) -> Self {
        Self {
            scheme,
            step_size,
            steps,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), OdeError> {
        if self.steps == 0 {
            return Err(OdeError::NoSteps);
        }
        check_step_size(self.step_size)
    }

    /// Total simulated time covered by the trajectory.
    pub fn duration(&self) -> f64 {
        self.steps.saturating_sub(1) as f64 * self.step_size
    }

    fn step_size_as<T: Scalar>(&self) -> Result<T, OdeError> {
        T::from_f64(self.step_size).ok_or(OdeError::InvalidStepSize(self.step_size))
    }
}

/// Allocates a zeroed trajectory, seeds it with `initial_state` and integrates.
/// Returns the time-major buffer of `settings.steps` states.
pub fn simulate<T, V>(
    settings: &IntegrationSettings,
    field: &V,
    initial_state: &[T],
) -> Result<Vec<T>, OdeError>
where
    T: Scalar,
    V: VectorField<T>,
{
    settings.validate()?;
    let h = settings.step_size_as::<T>()?;
    let dimension = initial_state.len();
    if dimension == 0 {
        return Err(OdeError::ZeroDimension);
    }
    if dimension != field.dimension() {
        return Err(OdeError::InitialState {
            expected: field.dimension(),
            actual: dimension,
        });
    }

    let mut buffer = zeroed_buffer::<T>(dimension, settings.steps);
    let mut trajectory = Trajectory::new(&mut buffer, dimension, settings.steps)?;
    trajectory.set_initial(initial_state)?;
    integrate(settings.scheme, field, &mut trajectory, h, settings.write_mode)?;
    Ok(buffer)
}

/// Scalar counterpart of [`simulate`].
pub fn simulate_scalar<T, S>(
    settings: &IntegrationSettings,
    field: &S,
    initial_value: T,
) -> Result<Vec<T>, OdeError>
where
    T: Scalar,
    S: ScalarField<T>,
{
    settings.validate()?;
    let h = settings.step_size_as::<T>()?;
    let mut buffer = zeroed_buffer::<T>(1, settings.steps);
    buffer[0] = initial_value;
    integrate_scalar(settings.scheme, field, &mut buffer, h, settings.write_mode)?;
    Ok(buffer)
}
