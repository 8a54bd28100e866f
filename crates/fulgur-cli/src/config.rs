//! TOML configuration deserialisation for field jobs.

use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub waveform: WaveformConfig,
    #[serde(rename = "line")]
    pub lines: Vec<LineConfig>,
    pub observer: ObserverConfig,
    pub time: TimeSpec,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Baseline current pulse shared by every line.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WaveformConfig {
    /// Closed-form bi-Gaussian pulse.
    BiGaussian {
        peak_current: f64,
        tau1: f64,
        tau2: f64,
    },
    /// Heidler channel-base current sampled on `[0, duration]`.
    Heidler {
        peak_current: f64,
        tau1: f64,
        tau2: f64,
        #[serde(default = "default_heidler_n")]
        n: f64,
        duration: f64,
        #[serde(default = "default_step")]
        step: f64,
    },
    /// Measured record: two-column CSV `t,i` fitted with a cubic spline.
    Tabulated { file: String },
}

fn default_heidler_n() -> f64 {
    10.0
}
fn default_step() -> f64 {
    1e-9
}

/// A straight transmission-line channel.
#[derive(Debug, Deserialize)]
pub struct LineConfig {
    /// Injection point (m).
    pub start: [f64; 3],
    /// Far end (m).
    pub end: [f64; 3],
    /// Front propagation speed (m/s).
    pub velocity: f64,
    /// Attenuation length (m). Omit for no attenuation.
    #[serde(default = "default_attenuation_length")]
    pub attenuation_length: f64,
    pub segments: usize,
    /// Append the perfect-ground image about z = 0.
    #[serde(default)]
    pub mirror: bool,
    #[serde(default = "default_w0")]
    pub w0: f64,
    #[serde(default)]
    pub t0: f64,
}

fn default_attenuation_length() -> f64 {
    f64::INFINITY
}
fn default_w0() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct ObserverConfig {
    /// Observation point (m).
    pub position: [f64; 3],
}

/// Time specification: either a range or explicit list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TimeSpec {
    Range { range: [f64; 2], points: usize },
    List { values: Vec<f64> },
}

impl TimeSpec {
    /// Expand into the sample instants (s).
    pub fn samples(&self) -> Vec<f64> {
        match self {
            TimeSpec::Range { range, points } => {
                let (start, end) = (range[0], range[1]);
                (0..*points)
                    .map(|i| start + (end - start) * i as f64 / (*points - 1).max(1) as f64)
                    .collect()
            }
            TimeSpec::List { values } => values.clone(),
        }
    }
}

/// Engine settings.
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Execution mode: "serial" or "parallel". Default: "serial".
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { mode: default_mode() }
    }
}

fn default_mode() -> String {
    "serial".into()
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the field time series as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also save it as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Parse a TOML job configuration.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    Ok(toml::from_str(content)?)
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}
