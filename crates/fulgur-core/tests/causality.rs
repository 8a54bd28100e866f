//! End-to-end checks of retardation against the closed-form dipole field.

use std::sync::Arc;

use approx::assert_relative_eq;

use fulgur_core::constants::{COULOMB, SPEED_OF_LIGHT};
use fulgur_core::{FieldComponents, FieldEngine, LineOptions, TransmissionLine, Vec3};
use fulgur_waveforms::{BiGaussian, CurrentSource, CurrentWaveform};

fn pulse() -> BiGaussian {
    BiGaussian::new(10e3, 20e-6, 2e-6).unwrap()
}

/// A single unit-length vertical dipole centred on the origin.
fn origin_dipole() -> TransmissionLine {
    let line = TransmissionLine::build(
        Arc::new(CurrentWaveform::from(pulse())),
        Vec3::new(0.0, 0.0, -0.5),
        Vec3::new(0.0, 0.0, 0.5),
        1.5e8,
        f64::INFINITY,
        1,
        LineOptions::default(),
    )
    .unwrap();
    assert_eq!(line.dipoles()[0].position, Vec3::zeros());
    line
}

#[test]
fn test_field_is_exactly_zero_before_light_arrives() {
    let line = origin_dipole();
    let rho = 100.0;
    let arrival = rho / SPEED_OF_LIGHT;

    let times: Vec<f64> = (-50..34).map(|i| i as f64 * 1e-8).collect();
    assert!(times.iter().all(|&t| t < arrival));

    let field = FieldEngine::default()
        .evaluate(&line, &Vec3::new(0.0, 0.0, rho), &times)
        .unwrap();
    for f in &field {
        assert_eq!(f.total(), Vec3::zeros());
        assert_eq!(*f, FieldComponents::zero());
    }
}

#[test]
fn test_on_axis_field_matches_closed_form() {
    // Along the dipole axis: E_z = 2/(4πε₀) [q/ρ³ + i/(cρ²)], no radiation.
    let line = origin_dipole();
    let rho = 100.0;
    let arrival = rho / SPEED_OF_LIGHT;
    let p = pulse();

    let times: Vec<f64> = (1..60).map(|k| arrival + k as f64 * 0.5e-6).collect();
    let field = FieldEngine::default()
        .evaluate(&line, &Vec3::new(0.0, 0.0, rho), &times)
        .unwrap();

    for (f, &t) in field.iter().zip(&times) {
        let tr = t - arrival;
        let es = 2.0 * COULOMB * p.integral(tr) / rho.powi(3);
        let ind = 2.0 * COULOMB * p.current(tr) / (rho * rho * SPEED_OF_LIGHT);

        let total = f.total();
        assert!(total.iter().all(|c| c.is_finite()));
        assert!(total.z != 0.0);
        assert_relative_eq!(f.electrostatic.z, es, max_relative = 1e-9);
        assert_relative_eq!(f.induction.z, ind, max_relative = 1e-9, epsilon = 1e-12);
        assert_eq!(f.radiation, Vec3::zeros());
        assert_eq!(total.x, 0.0);
        assert_eq!(total.y, 0.0);
    }
}

#[test]
fn test_broadside_field_matches_closed_form() {
    // Perpendicular to the axis: every regime is −(1/4πε₀)(...) ẑ.
    let line = origin_dipole();
    let rho = 250.0;
    let arrival = rho / SPEED_OF_LIGHT;
    let p = pulse();

    let times: Vec<f64> = (1..60).map(|k| arrival + k as f64 * 0.5e-6).collect();
    let field = FieldEngine::default()
        .evaluate(&line, &Vec3::new(rho, 0.0, 0.0), &times)
        .unwrap();

    for (f, &t) in field.iter().zip(&times) {
        let tr = t - arrival;
        let es = -COULOMB * p.integral(tr) / rho.powi(3);
        let ind = -COULOMB * p.current(tr) / (rho * rho * SPEED_OF_LIGHT);
        let rad = -COULOMB * p.derivative(tr) / (rho * SPEED_OF_LIGHT * SPEED_OF_LIGHT);

        assert_relative_eq!(f.electrostatic.z, es, max_relative = 1e-9);
        assert_relative_eq!(f.induction.z, ind, max_relative = 1e-9, epsilon = 1e-12);
        assert_relative_eq!(f.radiation.z, rad, max_relative = 1e-9, epsilon = 1e-12);
        assert_relative_eq!(f.total().z, es + ind + rad, max_relative = 1e-9, epsilon = 1e-12);
    }
}

#[test]
fn test_front_delay_shifts_the_onset() {
    // A dipole 300 m up the channel starts radiating only after s/v + ρ/c.
    let wf = Arc::new(CurrentWaveform::from(pulse()));
    let v = 1.5e8;
    let line = TransmissionLine::build(
        wf,
        Vec3::zeros(),
        Vec3::new(0.0, 0.0, 600.0),
        v,
        f64::INFINITY,
        2,
        LineOptions::default(),
    )
    .unwrap();
    let upper = TransmissionLine::from_dipoles(vec![line.dipoles()[1].clone()]);
    let observer = Vec3::new(400.0, 0.0, 450.0);
    let onset = 300.0 / v + (observer - upper.dipoles()[0].position).norm() / SPEED_OF_LIGHT;

    let engine = FieldEngine::default();
    let before = engine.evaluate(&upper, &observer, &[onset * 0.999]).unwrap();
    let after = engine.evaluate(&upper, &observer, &[onset * 1.5]).unwrap();
    assert_eq!(before[0], FieldComponents::zero());
    assert!(after[0].total().norm() > 0.0);
}
