use crate::error::OdeError;
use crate::traits::Scalar;

/// Time-major view over a caller-owned trajectory buffer.
///
/// The state at step `k` occupies `buffer[k * dimension..(k + 1) * dimension]`.
/// The view never resizes or reallocates the underlying storage.
#[derive(Debug)]
pub struct Trajectory<'a, T> {
    data: &'a mut [T],
    dimension: usize,
    steps: usize,
}

impl<'a, T: Scalar> Trajectory<'a, T> {
    /// Wraps `data`, which must hold exactly `dimension * steps` elements.
    pub fn new(data: &'a mut [T], dimension: usize, steps: usize) -> Result<Self, OdeError> {
        if dimension == 0 {
            return Err(OdeError::ZeroDimension);
        }
        let expected = dimension
            .checked_mul(steps)
            .ok_or(OdeError::BufferSize {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(OdeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            dimension,
            steps,
        })
    }

    /// Wraps `data` and infers the step count from its length.
    pub fn from_buffer(data: &'a mut [T], dimension: usize) -> Result<Self, OdeError> {
        if dimension == 0 {
            return Err(OdeError::ZeroDimension);
        }
        if data.len() % dimension != 0 {
            return Err(OdeError::BufferSize {
                expected: (data.len() / dimension + 1) * dimension,
                actual: data.len(),
            });
        }
        let steps = data.len() / dimension;
        Self::new(data, dimension, steps)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps == 0
    }

    /// State at step `k`, or `None` past the end.
    pub fn state(&self, k: usize) -> Option<&[T]> {
        if k >= self.steps {
            return None;
        }
        let start = k * self.dimension;
        Some(&self.data[start..start + self.dimension])
    }

    pub fn state_mut(&mut self, k: usize) -> Option<&mut [T]> {
        if k >= self.steps {
            return None;
        }
        let start = k * self.dimension;
        Some(&mut self.data[start..start + self.dimension])
    }

    /// Copies `initial` into slot 0.
    pub fn set_initial(&mut self, initial: &[T]) -> Result<(), OdeError> {
        if initial.len() != self.dimension {
            return Err(OdeError::InitialState {
                expected: self.dimension,
                actual: initial.len(),
            });
        }
        let dimension = self.dimension;
        match self.state_mut(0) {
            Some(slot) => {
                slot.copy_from_slice(initial);
                Ok(())
            }
            None => Err(OdeError::BufferSize {
                expected: dimension,
                actual: 0,
            }),
        }
    }

    pub fn final_state(&self) -> Option<&[T]> {
        self.steps.checked_sub(1).and_then(|k| self.state(k))
    }

    /// Iterates over states in time order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.dimension)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data[..]
    }

    /// Splits out the source block `u` (step `k`) and target block `u1`
    /// (step `k + 1`). Requires `k + 1 < steps`.
    pub(crate) fn split_step(&mut self, k: usize) -> (&[T], &mut [T]) {
        let n = self.dimension;
        let (head, tail) = self.data.split_at_mut((k + 1) * n);
        (&head[k * n..], &mut tail[..n])
    }
}

/// Allocates a zero-filled buffer for `steps` states of `dimension` components.
pub fn zeroed_buffer<T: Scalar>(dimension: usize, steps: usize) -> Vec<T> {
    vec![T::zero(); dimension * steps]
}

#[cfg(test)]
mod tests {
    use super::{zeroed_buffer, Trajectory};
    use crate::error::OdeError;

    #[test]
    fn new_rejects_wrong_buffer_size() {
        let mut data = vec![0.0_f64; 7];
        let err = Trajectory::new(&mut data, 2, 4).expect_err("size mismatch");
        assert_eq!(
            err,
            OdeError::BufferSize {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn new_rejects_zero_dimension() {
        let mut data: Vec<f64> = Vec::new();
        assert_eq!(
            Trajectory::new(&mut data, 0, 4).expect_err("zero dimension"),
            OdeError::ZeroDimension
        );
    }

    #[test]
    fn from_buffer_infers_steps() {
        let mut data = zeroed_buffer::<f64>(3, 5);
        let traj = Trajectory::from_buffer(&mut data, 3).expect("trajectory");
        assert_eq!(traj.steps(), 5);
        assert_eq!(traj.rows().count(), 5);

        let mut ragged = vec![0.0_f64; 10];
        assert!(Trajectory::from_buffer(&mut ragged, 3).is_err());
    }

    #[test]
    fn states_are_time_major() {
        let mut data: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let traj = Trajectory::new(&mut data, 2, 3).expect("trajectory");
        assert_eq!(traj.state(0), Some(&[0.0, 1.0][..]));
        assert_eq!(traj.state(2), Some(&[4.0, 5.0][..]));
        assert_eq!(traj.state(3), None);
        assert_eq!(traj.final_state(), Some(&[4.0, 5.0][..]));
    }

    #[test]
    fn set_initial_checks_length() {
        let mut data = zeroed_buffer::<f64>(2, 3);
        let mut traj = Trajectory::new(&mut data, 2, 3).expect("trajectory");
        assert_eq!(
            traj.set_initial(&[1.0]),
            Err(OdeError::InitialState {
                expected: 2,
                actual: 1
            })
        );
        traj.set_initial(&[1.0, 2.0]).expect("initial state");
        assert_eq!(traj.as_slice(), &[1.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn split_step_yields_adjacent_blocks() {
        let mut data: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let mut traj = Trajectory::new(&mut data, 2, 3).expect("trajectory");
        let (u, u1) = traj.split_step(1);
        assert_eq!(u, &[2.0, 3.0]);
        assert_eq!(u1, &[4.0, 5.0]);
    }

    #[test]
    fn empty_trajectory_has_no_states() {
        let mut data: Vec<f64> = Vec::new();
        let mut traj = Trajectory::new(&mut data, 2, 0).expect("empty trajectory");
        assert!(traj.is_empty());
        assert!(traj.final_state().is_none());
        assert!(traj.set_initial(&[0.0, 0.0]).is_err());
    }
}
