//! Job runner: ties together waveform, lines and the field engine.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use fulgur_core::{
    ExecutionMode, FieldComponents, FieldEngine, LineOptions, TransmissionLine, Vec3,
};
use fulgur_waveforms::{BiGaussian, CurrentWaveform, FunctionWaveform, SplineWaveform};

use crate::config::{JobConfig, LineConfig, WaveformConfig};

/// Everything needed to evaluate a job, built but not yet run.
pub struct PreparedJob {
    pub waveform: Arc<CurrentWaveform>,
    pub lines: Vec<TransmissionLine>,
    pub observer: Vec3,
    pub times: Vec<f64>,
    pub engine: FieldEngine,
}

/// Field time series at the observer.
pub struct SimulationOutput {
    pub times: Vec<f64>,
    pub field: Vec<FieldComponents>,
}

/// One row of the JSON output.
#[derive(Debug, Serialize)]
struct FieldSample {
    time_s: f64,
    #[serde(flatten)]
    components: FieldComponents,
    total: [f64; 3],
}

/// Build waveform, lines and engine from a parsed job configuration.
///
/// `base_dir` resolves relative paths inside the job (tabulated waveforms).
pub fn prepare(job: &JobConfig, base_dir: &Path) -> Result<PreparedJob> {
    let waveform = Arc::new(build_waveform(&job.waveform, base_dir)?);
    println!("Waveform: {}", waveform.kind());

    let mut lines = Vec::with_capacity(job.lines.len());
    for (i, cfg) in job.lines.iter().enumerate() {
        let line = build_line(cfg, &waveform).with_context(|| format!("Line #{}", i + 1))?;
        println!(
            "  Line #{}: {} dipoles ({} segments{})",
            i + 1,
            line.len(),
            cfg.segments,
            if cfg.mirror { ", with ground image" } else { "" }
        );
        lines.push(line);
    }
    if lines.is_empty() {
        anyhow::bail!("No lines configured; add at least one [[line]] table");
    }

    let times = job.time.samples();
    if times.is_empty() {
        anyhow::bail!("Time grid is empty");
    }

    let mode = match job.simulation.mode.as_str() {
        "serial" => ExecutionMode::Serial,
        "parallel" => ExecutionMode::Parallel,
        other => anyhow::bail!(
            "Unknown execution mode '{}'. Valid modes: serial, parallel",
            other
        ),
    };

    Ok(PreparedJob {
        waveform,
        lines,
        observer: Vec3::from(job.observer.position),
        times,
        engine: FieldEngine::new(mode),
    })
}

/// Run a full field evaluation from a parsed job configuration.
pub fn run_simulation(job: &JobConfig, base_dir: &Path) -> Result<SimulationOutput> {
    let prepared = prepare(job, base_dir)?;
    let total_dipoles: usize = prepared.lines.iter().map(|l| l.len()).sum();
    println!(
        "Evaluating {} dipoles at {} time samples",
        total_dipoles,
        prepared.times.len()
    );
    log::info!("Observer at {:?}", prepared.observer);

    let refs: Vec<&TransmissionLine> = prepared.lines.iter().collect();
    let field = prepared
        .engine
        .evaluate_lines(&refs, &prepared.observer, &prepared.times)
        .map_err(|e| anyhow::anyhow!("Field evaluation failed: {}", e))?;

    let peak = field
        .iter()
        .map(|f| f.total().norm())
        .fold(0.0_f64, f64::max);
    println!("Peak |E| = {:.4e} V/m", peak);

    Ok(SimulationOutput {
        times: prepared.times,
        field,
    })
}

fn build_waveform(cfg: &WaveformConfig, base_dir: &Path) -> Result<CurrentWaveform> {
    let waveform: CurrentWaveform = match cfg {
        WaveformConfig::BiGaussian { peak_current, tau1, tau2 } => {
            BiGaussian::new(*peak_current, *tau1, *tau2)?.into()
        }
        WaveformConfig::Heidler { peak_current, tau1, tau2, n, duration, step } => {
            FunctionWaveform::heidler(*peak_current, *tau1, *tau2, *n, *duration, *step)?.into()
        }
        WaveformConfig::Tabulated { file } => {
            let path = base_dir.join(file);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Reading current record {}", path.display()))?;
            let (times, currents) = parse_current_csv(&content)
                .with_context(|| format!("Parsing current record {}", path.display()))?;
            SplineWaveform::new(times, currents)?.into()
        }
    };
    Ok(waveform)
}

fn build_line(cfg: &LineConfig, waveform: &Arc<CurrentWaveform>) -> Result<TransmissionLine> {
    let options = LineOptions {
        mirror: cfg.mirror,
        w0: cfg.w0,
        t0: cfg.t0,
    };
    Ok(TransmissionLine::build(
        Arc::clone(waveform),
        Vec3::from(cfg.start),
        Vec3::from(cfg.end),
        cfg.velocity,
        cfg.attenuation_length,
        cfg.segments,
        options,
    )?)
}

/// Parse a two-column `t,i` CSV. Blank lines and lines starting with `#` are
/// skipped, as is a single non-numeric header row before the data.
pub fn parse_current_csv(content: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut times = Vec::new();
    let mut currents = Vec::new();
    let mut header_skipped = false;

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut cols = line.split(',').map(str::trim);
        let (t, i) = match (cols.next(), cols.next()) {
            (Some(t), Some(i)) => (t, i),
            _ => anyhow::bail!("line {}: expected two columns", lineno + 1),
        };
        match (t.parse::<f64>(), i.parse::<f64>()) {
            (Ok(t), Ok(i)) => {
                times.push(t);
                currents.push(i);
            }
            _ if times.is_empty() && !header_skipped => header_skipped = true,
            _ => anyhow::bail!("line {}: could not parse '{}'", lineno + 1, line),
        }
    }

    Ok((times, currents))
}

/// Write the field time series to a CSV file with a metadata header.
pub fn write_field_csv(output: &SimulationOutput, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;

    // Metadata header
    writeln!(file, "# Fulgur: electric field time series")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    let p = job.observer.position;
    writeln!(file, "# observer: [{}, {}, {}] m", p[0], p[1], p[2])?;
    for (i, line) in job.lines.iter().enumerate() {
        writeln!(
            file,
            "# line {}: {:?} -> {:?} m, v={} m/s, lambda={} m, segments={}, mirror={}",
            i + 1,
            line.start,
            line.end,
            line.velocity,
            line.attenuation_length,
            line.segments,
            line.mirror
        )?;
    }
    writeln!(file, "#")?;
    writeln!(
        file,
        "time_s,es_x,es_y,es_z,ind_x,ind_y,ind_z,rad_x,rad_y,rad_z,total_x,total_y,total_z"
    )?;

    for (t, f) in output.times.iter().zip(&output.field) {
        let total = f.total();
        write!(file, "{:.9e}", t)?;
        for v in [&f.electrostatic, &f.induction, &f.radiation, &total] {
            write!(file, ",{:.6e},{:.6e},{:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(file)?;
    }

    println!("Field written to: {}", path.display());
    Ok(())
}

/// Write the field time series to a JSON file.
pub fn write_field_json(output: &SimulationOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rows: Vec<FieldSample> = output
        .times
        .iter()
        .zip(&output.field)
        .map(|(&time_s, f)| FieldSample {
            time_s,
            components: *f,
            total: f.total().into(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&rows)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Field (JSON) written to: {}", path.display());
    Ok(())
}
