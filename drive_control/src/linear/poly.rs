//! Polynomial helpers for pole placement.
//!
//! Coefficient vectors are ordered highest power first and are monic:
//! `[1, c₍ₙ₋₁₎, …, c₀]` represents `sⁿ + c₍ₙ₋₁₎·sⁿ⁻¹ + … + c₀`.

use nalgebra::SMatrix;
use num_complex::Complex64;

/// Characteristic polynomial `det(sI − A)` via Faddeev–LeVerrier.
pub fn characteristic_polynomial<const N: usize>(a: &SMatrix<f64, N, N>) -> Vec<f64> {
    let identity = SMatrix::<f64, N, N>::identity();
    let mut coeffs = Vec::with_capacity(N + 1);
    coeffs.push(1.0);

    let mut m = SMatrix::<f64, N, N>::zeros();
    let mut c_prev = 1.0;
    for k in 1..=N {
        m = a * m + identity * c_prev;
        let c = -(a * m).trace() / k as f64;
        coeffs.push(c);
        c_prev = c;
    }
    coeffs
}

/// Monic polynomial with the given (possibly complex) roots.
pub fn poly_from_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex64::new(1.0, 0.0));
    for &root in roots {
        // Multiply by (s − root).
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}

/// Monic polynomial with the given real roots.
pub fn poly_from_real_roots(roots: &[f64]) -> Vec<f64> {
    let roots: Vec<Complex64> = roots.iter().map(|&r| Complex64::new(r, 0.0)).collect();
    poly_from_roots(&roots).iter().map(|c| c.re).collect()
}
