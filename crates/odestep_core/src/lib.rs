pub mod error;
pub mod scalar;
pub mod scheme;
pub mod settings;
pub mod stepper;
pub mod trajectory;
/// The `odestep_core` crate is a fixed-step explicit ODE integration engine.
/// It advances a caller-owned, time-major trajectory buffer in place using
/// one of three classical single-step schemes.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `VectorField` / `ScalarField` (right-hand sides).
/// - **Scheme**: the closed set {Euler, Heun, RK4} and its name mapping.
/// - **Stepper**: the N-dimensional engine (`integrate`) and per-scheme `Steppable` types.
/// - **Scalar**: the allocation-free N = 1 engine (`integrate_scalar`).
/// - **Trajectory**: a checked view over the caller's buffer.
/// - **Settings**: serialisable run configuration and `simulate` helpers.
pub mod traits;

pub use error::OdeError;
pub use scalar::integrate_scalar;
pub use scheme::{scheme_name, Scheme};
pub use settings::{simulate, simulate_scalar, IntegrationSettings};
pub use stepper::{integrate, integrate_fn, Euler, Heun, Rk4, Steppable, WriteMode};
pub use trajectory::{zeroed_buffer, Trajectory};
pub use traits::{AsVector, FnField, Scalar, ScalarField, ScalarFnField, VectorField};
