//! Transfer-function responses against closed-form solutions.
//!
//! A zero-order-hold discretization is exact for piecewise-constant input,
//! so a step response must hit the analytic curve at every sample.

use approx::assert_relative_eq;
use drive_control::bank::AxisBank;
use drive_control::linear::discretize::DiscretizeOptions;
use drive_control::linear::system::LinearSystem;
use drive_control::transfer::TransferFunction;
use nalgebra::Vector1;

const TS: f64 = 1e-3;

#[test]
fn first_order_step_matches_analytic_curve() {
    let a0 = 20.0;
    let mut tf = TransferFunction::<1>::new(&[1.0], &[1.0, a0], TS, DiscretizeOptions::ACCURATE).unwrap();

    for n in 0..500 {
        let y = tf.respond(1.0);
        let t = (n + 1) as f64 * TS;
        let expected = (1.0 - (-a0 * t).exp()) / a0;
        assert_relative_eq!(y, expected, epsilon = 1e-12, max_relative = 1e-8);
    }
}

#[test]
fn second_order_step_matches_analytic_curve() {
    // 1 / ((s + 1)(s + 2))
    let mut tf =
        TransferFunction::<2>::new(&[1.0], &[1.0, 3.0, 2.0], TS, DiscretizeOptions::ACCURATE).unwrap();

    let mut last = 0.0;
    for n in 0..8000 {
        let y = tf.respond(1.0);
        let t = (n + 1) as f64 * TS;
        let expected = 0.5 - (-t).exp() + 0.5 * (-2.0 * t).exp();
        assert_relative_eq!(y, expected, epsilon = 1e-10);
        last = y;
    }
    assert_relative_eq!(last, 0.5, epsilon = 1e-3);
}

#[test]
fn cancelled_zero_reduces_order() {
    // (s + 1) / ((s + 1)(s + 2)) = 1 / (s + 2)
    let opts = DiscretizeOptions::ACCURATE;
    let mut full = TransferFunction::<2>::new(&[1.0, 1.0], &[1.0, 3.0, 2.0], TS, opts).unwrap();
    let mut reduced = TransferFunction::<1>::new(&[1.0], &[1.0, 2.0], TS, opts).unwrap();

    for n in 0..2000 {
        let u = if n < 1000 { 1.0 } else { -0.5 };
        assert_relative_eq!(full.respond(u), reduced.respond(u), epsilon = 1e-10);
    }
}

#[test]
fn delayed_output_lags_immediate_output_by_one_tick() {
    let model = TransferFunction::<2>::realize(&[4.0, 1.0], &[1.0, 0.8, 16.0]).unwrap();
    let opts = DiscretizeOptions::ACCURATE;
    let mut delayed = LinearSystem::from_continuous(&model, TS, opts).unwrap();
    let mut immediate = LinearSystem::from_continuous(&model, TS, opts).unwrap();

    let inputs: Vec<f64> = (0..300).map(|n| ((n as f64) * 0.05).sin()).collect();
    let lagged: Vec<f64> = inputs.iter().map(|&u| delayed.step(&Vector1::new(u))[0]).collect();
    let direct: Vec<f64> = inputs.iter().map(|&u| immediate.step_immediate(&Vector1::new(u))[0]).collect();

    assert_eq!(lagged[0], 0.0);
    for n in 1..inputs.len() {
        assert_eq!(lagged[n], direct[n - 1]);
    }
}

#[test]
fn reset_restarts_response() {
    let mut tf =
        TransferFunction::<2>::new(&[1.0], &[1.0, 3.0, 2.0], TS, DiscretizeOptions::FAST).unwrap();
    let first: Vec<f64> = (0..50).map(|_| tf.respond(1.0)).collect();
    tf.reset();
    let again: Vec<f64> = (0..50).map(|_| tf.respond(1.0)).collect();
    assert_eq!(first, again);
}

#[test]
fn bank_axes_share_one_discretization() {
    let mut bank = AxisBank::<TransferFunction<2>, 4>::transfer_functions(
        &[1.0],
        &[1.0, 3.0, 2.0],
        TS,
        DiscretizeOptions::ACCURATE,
    )
    .unwrap();
    let mut single =
        TransferFunction::<2>::new(&[1.0], &[1.0, 3.0, 2.0], TS, DiscretizeOptions::ACCURATE).unwrap();

    for axis in 0..4 {
        assert_eq!(
            bank.axis(axis).unwrap().discrete_model(),
            single.discrete_model()
        );
    }
    for _ in 0..100 {
        let y = bank.respond(&[1.0, 2.0, 0.0, -1.0]);
        let y0 = single.respond(1.0);
        assert_relative_eq!(y[1], 2.0 * y0, max_relative = 1e-12);
        assert_eq!(y[2], 0.0);
        assert_relative_eq!(y[3], -y0, max_relative = 1e-12);
    }
}
