//! Fulgur command-line interface.
//!
//! Run field computations from TOML job files:
//! ```sh
//! fulgur-cli run job.toml
//! fulgur-cli validate job.toml
//! fulgur-cli waveforms
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use fulgur_cli::{config, runner};

#[derive(Parser)]
#[command(name = "fulgur-cli")]
#[command(about = "Fulgur: transmission-line dipole field engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the field described by a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build waveform and lines without evaluating the field.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the supported waveform kinds.
    Waveforms,
}

fn job_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Fulgur Field Engine");
            println!("===================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_simulation(&job, job_dir(&config))?;

            // Determine output directory
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_csv {
                runner::write_field_csv(&result, &out_dir.join("field.csv"), &job)?;
            }
            if job.output.save_json {
                runner::write_field_json(&result, &out_dir.join("field.json"))?;
            }

            println!("Simulation complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            runner::prepare(&job, job_dir(&config))?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Waveforms => {
            println!("Available waveform kinds:");
            println!();
            println!("  bigaussian  peak_current, tau1, tau2");
            println!("              exact current, derivative and charge");
            println!("  heidler     peak_current, tau1, tau2, duration [, n = 10, step = 1e-9]");
            println!("              sampled function, charge tabulated by trapezoid rule");
            println!("  tabulated   file = \"record.csv\" (columns t,i)");
            println!("              cubic spline through measured samples");
            Ok(())
        }
    }
}
