//! Closed-loop validation on the simulated two-inertia plant.
//!
//! Plant simulator, observer-based state feedback and the load-torque
//! observer run together at 10 kHz. After the transients die out the loop
//! must sit exactly at the equilibrium of the continuous design, and the
//! disturbance observer must report the applied load torque.

use approx::assert_relative_eq;
use drive_common::design::PoleSpec;
use drive_common::plant::TwoInertiaParams;
use drive_control::linear::discretize::DiscretizeOptions;
use drive_control::two_inertia::plant::{
    disturbance_vector_3rd, input_vector_3rd, output_row_3rd, state_matrix_3rd,
};
use drive_control::two_inertia::{
    TwoInertiaDisturbanceObserver, TwoInertiaSimulator, TwoInertiaStateFeedback, feedback_gain,
    observer_gain_3rd,
};
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const TS: f64 = 1e-4;
const BANDWIDTH: f64 = 500.0;

/// Servo axis with a soft shaft and a 5:1 gearbox, resonance near 118 rad/s.
fn axis_params() -> TwoInertiaParams {
    TwoInertiaParams {
        kt: 0.5,
        jm: 1e-4,
        jl: 1e-3,
        dm: 1e-3,
        dl: 1e-3,
        ks: 10.0,
        rg: 5.0,
    }
}

/// Equilibrium `(x, x̂)` of plant + 3rd-order observer + `iq = iq_ref − f·x̂`.
///
/// ```text
/// 0 = A·x − b·f·x̂ + b·iq_ref + e·τl
/// 0 = k·c·x + (A − k·c − b·f)·x̂ + b·iq_ref
/// ```
fn equilibrium(
    p: &TwoInertiaParams,
    poles: &PoleSpec,
    iq_ref: f64,
    tau_l: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let a = state_matrix_3rd(p);
    let b = input_vector_3rd(p);
    let e = disturbance_vector_3rd(p);
    let c = output_row_3rd();
    let k = observer_gain_3rd(p, BANDWIDTH).unwrap();
    let f = feedback_gain(p, poles).unwrap();

    let bf: Matrix3<f64> = b * f;
    let kc: Matrix3<f64> = k * c;
    let mut m = SMatrix::<f64, 6, 6>::zeros();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&a);
    m.fixed_view_mut::<3, 3>(0, 3).copy_from(&(-bf));
    m.fixed_view_mut::<3, 3>(3, 0).copy_from(&kc);
    m.fixed_view_mut::<3, 3>(3, 3).copy_from(&(a - kc - bf));

    let mut rhs = SVector::<f64, 6>::zeros();
    rhs.fixed_rows_mut::<3>(0).copy_from(&(b * iq_ref + e * tau_l));
    rhs.fixed_rows_mut::<3>(3).copy_from(&(b * iq_ref));

    let z = -m.try_inverse().unwrap() * rhs;
    (
        z.fixed_rows::<3>(0).into_owned(),
        z.fixed_rows::<3>(3).into_owned(),
    )
}

struct Loop {
    plant: TwoInertiaSimulator,
    regulator: TwoInertiaStateFeedback,
    dob: TwoInertiaDisturbanceObserver,
}

impl Loop {
    fn new(p: &TwoInertiaParams, poles: &PoleSpec) -> Self {
        let opts = DiscretizeOptions::ACCURATE;
        Self {
            plant: TwoInertiaSimulator::new(p, TS, opts).unwrap(),
            regulator: TwoInertiaStateFeedback::new(p, poles, BANDWIDTH, TS, opts).unwrap(),
            dob: TwoInertiaDisturbanceObserver::new(p, BANDWIDTH, TS, opts).unwrap(),
        }
    }

    fn run(&mut self, ticks: usize, iq_ref: f64, tau_l: f64) -> f64 {
        let mut peak = 0.0_f64;
        for _ in 0..ticks {
            let omega_m = self.plant.motor_speed();
            let iq = self.regulator.command(iq_ref, omega_m);
            self.dob.estimate(iq, omega_m);
            self.plant.step(iq, tau_l);
            peak = peak.max(iq.abs());
        }
        peak
    }
}

#[test]
fn real_poles_settle_at_design_equilibrium() {
    let p = axis_params();
    let poles = PoleSpec::default();
    let mut cl = Loop::new(&p, &poles);

    let peak = cl.run(8000, 1.0, 0.0);
    assert!(peak.is_finite());

    let (x, x_hat) = equilibrium(&p, &poles, 1.0, 0.0);
    assert_relative_eq!(*cl.plant.state(), x, epsilon = 1e-9, max_relative = 1e-6);
    // Without a load torque the 3rd-order model is exact, so x̂ = x.
    assert_relative_eq!(x_hat, x, epsilon = 1e-12, max_relative = 1e-9);
    assert_relative_eq!(*cl.regulator.estimate(), x, epsilon = 1e-9, max_relative = 1e-6);
    assert_relative_eq!(cl.dob.load_torque(), 0.0, epsilon = 1e-6);
}

#[test]
fn load_torque_step_is_estimated() {
    let p = axis_params();
    let poles = PoleSpec::Complex {
        real: -100.0,
        re: -80.0,
        im: 60.0,
    };
    let mut cl = Loop::new(&p, &poles);
    let tau_l = 0.2;

    cl.run(4000, 1.0, 0.0);
    cl.run(8000, 1.0, tau_l);

    let (x, x_hat) = equilibrium(&p, &poles, 1.0, tau_l);
    assert_relative_eq!(*cl.plant.state(), x, epsilon = 1e-9, max_relative = 1e-6);
    assert_relative_eq!(*cl.regulator.estimate(), x_hat, epsilon = 1e-9, max_relative = 1e-6);
    assert_relative_eq!(cl.dob.load_torque(), tau_l, epsilon = 1e-6);
    assert_relative_eq!(cl.dob.load_speed(), x[0], epsilon = 1e-9, max_relative = 1e-6);
}

#[test]
fn feedback_current_matches_applied_correction() {
    let p = axis_params();
    let mut cl = Loop::new(&p, &PoleSpec::default());
    cl.run(500, 1.0, 0.0);

    let omega_m = cl.plant.motor_speed();
    let fb = cl.regulator.feedback_current();
    let iq = cl.regulator.command(1.0, omega_m);
    assert_relative_eq!(iq, 1.0 - fb, max_relative = 1e-12);
}
