//! State-space model records.

use nalgebra::SMatrix;

/// Continuous-time model `ẋ = A·x + B·u`, `y = C·x`.
///
/// `N` states, `I` inputs, `O` outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousModel<const N: usize, const I: usize, const O: usize> {
    pub a: SMatrix<f64, N, N>,
    pub b: SMatrix<f64, N, I>,
    pub c: SMatrix<f64, O, N>,
}

impl<const N: usize, const I: usize, const O: usize> ContinuousModel<N, I, O> {
    pub fn new(a: SMatrix<f64, N, N>, b: SMatrix<f64, N, I>, c: SMatrix<f64, O, N>) -> Self {
        Self { a, b, c }
    }
}

/// Zero-order-hold discrete equivalent `x[k+1] = Ad·x[k] + Bd·u[k]`,
/// `y[k] = Cd·x[k]`.
///
/// Derived from a [`ContinuousModel`] by the discretizer, or supplied
/// directly by callers that already hold a discrete model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteModel<const N: usize, const I: usize, const O: usize> {
    pub ad: SMatrix<f64, N, N>,
    pub bd: SMatrix<f64, N, I>,
    pub cd: SMatrix<f64, O, N>,
}

impl<const N: usize, const I: usize, const O: usize> DiscreteModel<N, I, O> {
    pub fn new(ad: SMatrix<f64, N, N>, bd: SMatrix<f64, N, I>, cd: SMatrix<f64, O, N>) -> Self {
        Self { ad, bd, cd }
    }

    /// All-zero model: blocks every input, outputs zero.
    pub fn zeros() -> Self {
        Self {
            ad: SMatrix::zeros(),
            bd: SMatrix::zeros(),
            cd: SMatrix::zeros(),
        }
    }
}

impl<const N: usize, const I: usize, const O: usize> Default for DiscreteModel<N, I, O> {
    fn default() -> Self {
        Self::zeros()
    }
}
