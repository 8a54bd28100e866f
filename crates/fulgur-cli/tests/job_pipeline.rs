use std::fs;

use approx::assert_relative_eq;
use fulgur_cli::{config, runner};

const TABULATED_JOB: &str = r#"
[waveform]
kind = "tabulated"
file = "current.csv"

[[line]]
start = [0.0, 0.0, 0.0]
end = [0.0, 0.0, 300.0]
velocity = 1.0e8
attenuation_length = 1000.0
segments = 6
mirror = true

[observer]
position = [500.0, 0.0, 0.0]

[time]
range = [0.0, 2.0e-5]
points = 21

[simulation]
mode = "parallel"

[output]
save_json = true
"#;

const CURRENT: &str = "\
# synthetic record
t,i
0.0,0.0
1e-6,4000.0
2e-6,9000.0
4e-6,6000.0
8e-6,2000.0
1.6e-5,0.0
";

#[test]
fn test_tabulated_job_writes_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("current.csv"), CURRENT).unwrap();
    let job_path = dir.path().join("job.toml");
    fs::write(&job_path, TABULATED_JOB).unwrap();

    let job = config::load_config(&job_path).unwrap();
    let output = runner::run_simulation(&job, dir.path()).unwrap();
    assert_eq!(output.times.len(), 21);
    assert_eq!(output.field.len(), 21);

    // Nothing reaches the observer at t = 0.
    assert_eq!(output.field[0].total(), fulgur_core::Vec3::zeros());

    let out_dir = dir.path().join("out");
    runner::write_field_csv(&output, &out_dir.join("field.csv"), &job).unwrap();
    runner::write_field_json(&output, &out_dir.join("field.json")).unwrap();

    let csv = fs::read_to_string(out_dir.join("field.csv")).unwrap();
    let rows: Vec<&str> = csv.lines().filter(|l| !l.starts_with('#')).collect();
    assert!(rows[0].starts_with("time_s,"));
    assert_eq!(rows.len(), 22);
    for row in &rows {
        assert_eq!(row.split(',').count(), 13);
    }
    let last_t: f64 = rows[21].split(',').next().unwrap().parse().unwrap();
    assert_relative_eq!(last_t, 2.0e-5, max_relative = 1e-8);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("field.json")).unwrap()).unwrap();
    let samples = json.as_array().unwrap();
    assert_eq!(samples.len(), 21);
    assert_eq!(samples[5]["total"].as_array().unwrap().len(), 3);
    assert_eq!(samples[5]["electrostatic"].as_array().unwrap().len(), 3);
    assert!(samples[5]["time_s"].is_number());
}

#[test]
fn test_serial_and_parallel_jobs_agree() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("current.csv"), CURRENT).unwrap();

    let parallel = config::parse_config(TABULATED_JOB).unwrap();
    let serial = config::parse_config(&TABULATED_JOB.replace("\"parallel\"", "\"serial\"")).unwrap();

    let a = runner::run_simulation(&parallel, dir.path()).unwrap();
    let b = runner::run_simulation(&serial, dir.path()).unwrap();
    assert_eq!(a.field, b.field);
}

#[test]
fn test_missing_record_and_bad_mode_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let job = config::parse_config(TABULATED_JOB).unwrap();
    assert!(runner::prepare(&job, dir.path()).is_err());

    fs::write(dir.path().join("current.csv"), CURRENT).unwrap();
    let job = config::parse_config(&TABULATED_JOB.replace("\"parallel\"", "\"gpu\"")).unwrap();
    let err = runner::prepare(&job, dir.path()).err().unwrap();
    assert!(err.to_string().contains("Unknown execution mode"));
}

#[test]
fn test_bigaussian_job_with_two_lines() {
    let dir = tempfile::tempdir().unwrap();
    let job = config::parse_config(
        r#"
        [waveform]
        kind = "bigaussian"
        peak_current = 10e3
        tau1 = 20e-6
        tau2 = 2e-6

        [[line]]
        start = [0.0, 0.0, 0.0]
        end = [0.0, 0.0, 1000.0]
        velocity = 1.5e8
        segments = 20

        [[line]]
        start = [0.0, 0.0, 1000.0]
        end = [200.0, 0.0, 1500.0]
        velocity = 1.5e8
        segments = 10
        t0 = 6.67e-6

        [observer]
        position = [3000.0, 0.0, 0.0]

        [time]
        values = [1e-6, 2e-5, 5e-5]
        "#,
    )
    .unwrap();

    let prepared = runner::prepare(&job, dir.path()).unwrap();
    assert_eq!(prepared.lines.len(), 2);
    assert_eq!(prepared.lines[0].len() + prepared.lines[1].len(), 30);

    let output = runner::run_simulation(&job, dir.path()).unwrap();
    // 3 km at c is 10 µs, so the first sample is still quiet.
    assert_eq!(output.field[0].total(), fulgur_core::Vec3::zeros());
    assert!(output.field[1].total().norm() > 0.0);
}
