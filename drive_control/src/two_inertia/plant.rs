//! Continuous two-inertia plant matrices.
//!
//! ```text
//! Jl·ω̇l = −Dl·ωl + Ks·θs − τl
//! θ̇s    = −ωl + ωm/Rg
//! Jm·ω̇m = Kt·iq − Ks·θs/Rg − Dm·ωm
//! τ̇l    = 0                          (4th order only)
//! ```
//!
//! ```text
//!     ┌ a11  a12   0   a14 ┐        ┌ 0  ┐
//! A = │ −1    0   a23   0  │    b = │ 0  │    c = [0 0 1 0]
//!     │  0   a32  a33   0  │        │ b3 │
//!     └  0    0    0    0  ┘        └ 0  ┘
//! ```
//!
//! The 3rd-order model is the upper-left 3×3 block.

use drive_common::plant::TwoInertiaParams;
use nalgebra::{
    Matrix3, Matrix3x2, Matrix4, RowVector3, RowVector4, Vector3, Vector4,
};

use crate::linear::model::ContinuousModel;

/// Nonzero entries of the plant matrices.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coefficients {
    pub a11: f64,
    pub a12: f64,
    pub a14: f64,
    pub a23: f64,
    pub a32: f64,
    pub a33: f64,
    pub b3: f64,
}

impl Coefficients {
    pub(crate) fn new(p: &TwoInertiaParams) -> Self {
        Self {
            a11: -p.dl / p.jl,
            a12: p.ks / p.jl,
            a14: -1.0 / p.jl,
            a23: 1.0 / p.rg,
            a32: -p.ks / (p.jm * p.rg),
            a33: -p.dm / p.jm,
            b3: p.kt / p.jm,
        }
    }
}

/// State matrix of `[ωl, θs, ωm]`.
pub fn state_matrix_3rd(p: &TwoInertiaParams) -> Matrix3<f64> {
    let k = Coefficients::new(p);
    Matrix3::new(
        k.a11, k.a12, 0.0, //
        -1.0, 0.0, k.a23, //
        0.0, k.a32, k.a33,
    )
}

/// Current input column.
pub fn input_vector_3rd(p: &TwoInertiaParams) -> Vector3<f64> {
    Vector3::new(0.0, 0.0, Coefficients::new(p).b3)
}

/// Load torque input column.
pub fn disturbance_vector_3rd(p: &TwoInertiaParams) -> Vector3<f64> {
    Vector3::new(Coefficients::new(p).a14, 0.0, 0.0)
}

/// Motor speed measurement row.
pub fn output_row_3rd() -> RowVector3<f64> {
    RowVector3::new(0.0, 0.0, 1.0)
}

/// State matrix of `[ωl, θs, ωm, τl]`.
pub fn state_matrix_4th(p: &TwoInertiaParams) -> Matrix4<f64> {
    let k = Coefficients::new(p);
    Matrix4::new(
        k.a11, k.a12, 0.0, k.a14, //
        -1.0, 0.0, k.a23, 0.0, //
        0.0, k.a32, k.a33, 0.0, //
        0.0, 0.0, 0.0, 0.0,
    )
}

pub fn input_vector_4th(p: &TwoInertiaParams) -> Vector4<f64> {
    Vector4::new(0.0, 0.0, Coefficients::new(p).b3, 0.0)
}

pub fn output_row_4th() -> RowVector4<f64> {
    RowVector4::new(0.0, 0.0, 1.0, 0.0)
}

/// Plant with inputs `[iq, τl]` and full-state output.
pub fn plant_3rd(p: &TwoInertiaParams) -> ContinuousModel<3, 2, 3> {
    ContinuousModel::new(
        state_matrix_3rd(p),
        Matrix3x2::from_columns(&[input_vector_3rd(p), disturbance_vector_3rd(p)]),
        Matrix3::identity(),
    )
}
