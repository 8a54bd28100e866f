//! Perfect-conductor ground: the mirrored line cancels tangential fields on
//! the ground plane.

use std::sync::Arc;

use approx::assert_abs_diff_eq;

use fulgur_core::{FieldComponents, FieldEngine, LineOptions, TransmissionLine, Vec3};
use fulgur_waveforms::{BiGaussian, CurrentWaveform};

fn slanted_channel(mirror: bool) -> TransmissionLine {
    let wf = Arc::new(CurrentWaveform::from(BiGaussian::new(30e3, 25e-6, 1.5e-6).unwrap()));
    TransmissionLine::build(
        wf,
        Vec3::new(0.0, 0.0, 50.0),
        Vec3::new(200.0, 100.0, 800.0),
        1.2e8,
        1500.0,
        5,
        LineOptions { mirror, ..Default::default() },
    )
    .unwrap()
}

/// Sum of the regime magnitudes, a scale that never cancels.
fn magnitude(f: &FieldComponents) -> f64 {
    f.electrostatic.norm() + f.induction.norm() + f.radiation.norm()
}

#[test]
fn test_mirrored_line_has_twice_the_dipoles() {
    assert_eq!(slanted_channel(false).len(), 5);
    assert_eq!(slanted_channel(true).len(), 10);
}

#[test]
fn test_tangential_field_vanishes_on_ground() {
    let line = slanted_channel(true);
    let direct = slanted_channel(false);
    let observer = Vec3::new(600.0, -250.0, 0.0);
    let times: Vec<f64> = (0..120).map(|i| i as f64 * 0.2e-6).collect();

    let engine = FieldEngine::default();
    let combined = engine.evaluate(&line, &observer, &times).unwrap();
    let reference = engine.evaluate(&direct, &observer, &times).unwrap();

    let mut checked = 0;
    for (f, r) in combined.iter().zip(&reference) {
        let scale = r.electrostatic.norm();
        if scale == 0.0 {
            continue;
        }
        checked += 1;
        assert!(f.electrostatic.x.abs() <= 1e-12 * scale);
        assert!(f.electrostatic.y.abs() <= 1e-12 * scale);

        let total_scale = magnitude(r);
        assert!(f.total().x.abs() <= 1e-12 * total_scale);
        assert!(f.total().y.abs() <= 1e-12 * total_scale);
    }
    assert!(checked > 0, "field never arrived within the sampled window");
}

#[test]
fn test_vertical_field_doubles_on_ground() {
    // The image adds an equal vertical component on the plane.
    let direct = slanted_channel(false);
    let image = direct.image(0.0);
    let observer = Vec3::new(-300.0, 400.0, 0.0);
    let times: Vec<f64> = (0..80).map(|i| i as f64 * 0.25e-6).collect();

    let engine = FieldEngine::default();
    let both = engine.evaluate_lines(&[&direct, &image], &observer, &times).unwrap();
    let single = engine.evaluate(&direct, &observer, &times).unwrap();
    for (b, s) in both.iter().zip(&single) {
        assert_abs_diff_eq!(b.total().z, 2.0 * s.total().z, epsilon = 1e-12 * magnitude(s));
        assert_abs_diff_eq!(b.electrostatic.x, 0.0, epsilon = 1e-12 * magnitude(s));
    }
}
