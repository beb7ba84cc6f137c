//! Pole placement checked through the characteristic polynomial.
//!
//! The closed-form gains are never compared against stored numbers here:
//! each one is plugged back into its closed-loop matrix and the resulting
//! polynomial must equal the requested one.

use approx::assert_relative_eq;
use drive_common::design::PoleSpec;
use drive_common::plant::TwoInertiaParams;
use drive_control::error::DesignError;
use drive_control::linear::discretize::DiscretizeOptions;
use drive_control::linear::poly::{characteristic_polynomial, poly_from_real_roots, poly_from_roots};
use drive_control::linear::system::LinearSystem;
use drive_control::observer::LuenbergerObserver;
use drive_control::two_inertia::plant::{
    input_vector_3rd, input_vector_4th, output_row_3rd, output_row_4th, state_matrix_3rd,
    state_matrix_4th,
};
use drive_control::two_inertia::{
    feedback_gain, feedback_gain_complex, feedback_gain_real, observer_gain_3rd,
    observer_gain_4th,
};
use num_complex::Complex64;

const TS: f64 = 1e-4;

fn geared_axis() -> TwoInertiaParams {
    TwoInertiaParams {
        kt: 0.5,
        jm: 1e-4,
        jl: 1e-3,
        dm: 1e-3,
        dl: 1e-3,
        ks: 100.0,
        rg: 50.0,
    }
}

fn soft_axis() -> TwoInertiaParams {
    TwoInertiaParams {
        ks: 10.0,
        rg: 5.0,
        ..geared_axis()
    }
}

fn assert_poly_eq(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (g, w) in got.iter().zip(want) {
        assert_relative_eq!(*g, *w, epsilon = 1e-6, max_relative = 1e-7);
    }
}

#[test]
fn observer_poles_follow_bandwidth() {
    for p in [geared_axis(), soft_axis()] {
        let a = state_matrix_3rd(&p);
        let c = output_row_3rd();
        for bandwidth in [200.0, 500.0, 1000.0] {
            let k = observer_gain_3rd(&p, bandwidth).unwrap();
            assert_poly_eq(
                &characteristic_polynomial(&(a - k * c)),
                &poly_from_real_roots(&[-bandwidth; 3]),
            );
        }
    }
}

#[test]
fn disturbance_observer_poles_follow_bandwidth() {
    for p in [geared_axis(), soft_axis()] {
        let a = state_matrix_4th(&p);
        let c = output_row_4th();
        for bandwidth in [200.0, 500.0, 1000.0] {
            let k = observer_gain_4th(&p, bandwidth).unwrap();
            assert_poly_eq(
                &characteristic_polynomial(&(a - k * c)),
                &poly_from_real_roots(&[-bandwidth; 4]),
            );
        }
    }
}

#[test]
fn discrete_observer_poles_map_through_exponential() {
    let p = geared_axis();
    let bandwidth = 500.0;
    let k = observer_gain_3rd(&p, bandwidth).unwrap();
    let model = LuenbergerObserver::<3>::continuous_model(
        &state_matrix_3rd(&p),
        &input_vector_3rd(&p),
        &output_row_3rd(),
        &k,
    );
    let system = LinearSystem::from_continuous(&model, TS, DiscretizeOptions::ACCURATE).unwrap();

    let z = (-bandwidth * TS).exp();
    let got = characteristic_polynomial(&system.discrete_model().ad);
    let want = poly_from_real_roots(&[z; 3]);
    for (g, w) in got.iter().zip(&want) {
        assert_relative_eq!(*g, *w, epsilon = 1e-9);
    }
}

#[test]
fn discrete_disturbance_observer_has_quadruple_pole() {
    let p = geared_axis();
    let bandwidth = 500.0;
    let k = observer_gain_4th(&p, bandwidth).unwrap();
    let model = LuenbergerObserver::<4>::continuous_model(
        &state_matrix_4th(&p),
        &input_vector_4th(&p),
        &output_row_4th(),
        &k,
    );
    let system = LinearSystem::from_continuous(&model, TS, DiscretizeOptions::ACCURATE).unwrap();

    let got = characteristic_polynomial(&system.discrete_model().ad);
    let want = poly_from_real_roots(&[(-bandwidth * TS).exp(); 4]);
    for (g, w) in got.iter().zip(&want) {
        assert_relative_eq!(*g, *w, epsilon = 1e-9);
    }
}

#[test]
fn real_feedback_poles_are_placed() {
    for p in [geared_axis(), soft_axis()] {
        let a = state_matrix_3rd(&p);
        let b = input_vector_3rd(&p);
        for poles in [[-100.0, -120.0, -140.0], [-60.0, -80.0, -100.0], [-300.0, -300.0, -300.0]] {
            let f = feedback_gain_real(&p, poles).unwrap();
            assert_poly_eq(
                &characteristic_polynomial(&(a - b * f)),
                &poly_from_real_roots(&poles),
            );
        }
    }
}

#[test]
fn conjugate_feedback_poles_are_placed() {
    for p in [geared_axis(), soft_axis()] {
        let a = state_matrix_3rd(&p);
        let b = input_vector_3rd(&p);
        for (real, re, im) in [(-150.0, -120.0, 90.0), (-100.0, -80.0, 60.0), (-200.0, -50.0, 300.0)] {
            let pair = Complex64::new(re, im);
            let f = feedback_gain_complex(&p, real, pair, pair.conj()).unwrap();
            let want: Vec<f64> = poly_from_roots(&[Complex64::new(real, 0.0), pair, pair.conj()])
                .iter()
                .map(|c| c.re)
                .collect();
            assert_poly_eq(&characteristic_polynomial(&(a - b * f)), &want);
        }
    }
}

#[test]
fn pole_spec_dispatches_to_closed_form() {
    let p = soft_axis();
    let real = feedback_gain(&p, &PoleSpec::default()).unwrap();
    assert_eq!(real, feedback_gain_real(&p, [-100.0, -120.0, -140.0]).unwrap());

    let spec = PoleSpec::Complex {
        real: -100.0,
        re: -80.0,
        im: 60.0,
    };
    let pair = Complex64::new(-80.0, 60.0);
    assert_eq!(
        feedback_gain(&p, &spec).unwrap(),
        feedback_gain_complex(&p, -100.0, pair, pair.conj()).unwrap()
    );
}

#[test]
fn conjugate_pair_with_zero_imaginary_part_matches_real_design() {
    let p = geared_axis();
    let f_complex =
        feedback_gain_complex(&p, -100.0, Complex64::new(-120.0, 0.0), Complex64::new(-120.0, 0.0))
            .unwrap();
    let f_real = feedback_gain_real(&p, [-100.0, -120.0, -120.0]).unwrap();
    for i in 0..3 {
        assert_relative_eq!(f_complex[i], f_real[i], max_relative = 1e-12);
    }
}

#[test]
fn mismatched_pair_is_rejected() {
    let p = geared_axis();
    let r = feedback_gain_complex(&p, -100.0, Complex64::new(-80.0, 60.0), Complex64::new(-80.0, 61.0));
    assert!(matches!(r, Err(DesignError::NotConjugatePair(_, _))));
}

#[test]
fn invalid_plant_refuses_every_design() {
    let p = TwoInertiaParams {
        ks: 0.0,
        ..geared_axis()
    };
    assert!(matches!(observer_gain_3rd(&p, 500.0), Err(DesignError::Config(_))));
    assert!(matches!(observer_gain_4th(&p, 500.0), Err(DesignError::Config(_))));
    assert!(matches!(
        feedback_gain(&p, &PoleSpec::default()),
        Err(DesignError::Config(_))
    ));
}

#[test]
fn non_positive_bandwidth_is_rejected() {
    let p = geared_axis();
    for bandwidth in [0.0, -500.0, f64::NAN] {
        assert!(matches!(
            observer_gain_3rd(&p, bandwidth),
            Err(DesignError::InvalidParameters(_))
        ));
        assert!(observer_gain_4th(&p, bandwidth).is_err());
    }
}
