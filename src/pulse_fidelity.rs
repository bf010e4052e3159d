//! Command-line front end for the pulse-fidelity helpers.
//!
//! ```bash
//! # fidelity of predicted RY pulses against their targets
//! pulse_fidelity evaluate --gate ry --predicted pred.npy --target target.npy
//!
//! # expand 5-parameter predictions into the solver's 20-parameter layout
//! pulse_fidelity expand preds.npy preds_full.npy
//!
//! # model identifier for the configured network
//! pulse_fidelity model-id --experiment x-rotation --input-width 4
//! ```
//!
//! Diagnostics are logged at `info` by default; set `RUST_LOG=debug` for
//! solver invocation details.

use std::path::PathBuf;
use anyhow::{ bail, Context };
use clap::{ Parser, Subcommand };
use log::info;
use ndarray::s;
use pulse_fidelity::{
    npy::{ read_matrix, write_matrix },
    EvalOptions,
    ExperimentConfig,
    FidelityEvaluator,
    Gate,
    PlotOptions,
    PulsePlotter,
    recover_original_structure,
};

#[derive(Parser)]
#[command(name = "pulse_fidelity")]
#[command(about = "Fidelity evaluation for machine-learned gate pulses")]
struct Cli {
    /// Experiment preset (`x-rotation`, `y-rotation`) or path to a TOML file
    #[arg(short, long, global = true, default_value = "y-rotation")]
    experiment: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the mean fidelity of predicted pulses
    Evaluate {
        /// Gate the pulses implement (u, rx, ry)
        #[arg(short, long, default_value = "ry")]
        gate: Gate,

        /// Predicted pulses, one per row (.npy)
        #[arg(long)]
        predicted: PathBuf,

        /// Target pulses, one per row (.npy)
        #[arg(long)]
        target: PathBuf,

        /// Only evaluate the first N pulses
        #[arg(short, long)]
        limit: Option<usize>,

        /// Directory the checking script is run from [default: per gate]
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Solver config, relative to the base directory [default: the
        /// experiment's config template]
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        pulse_data_path: Option<PathBuf>,

        #[arg(long)]
        output_path: Option<PathBuf>,

        /// Keep the temporary pulse and objective files
        #[arg(long)]
        keep_files: bool,

        /// Show the solver's output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Expand 5-parameter predictions to the full 20-parameter layout
    Expand {
        input: PathBuf,
        output: PathBuf,
    },

    /// Print the model identifier of the experiment's network
    ModelId {
        #[arg(short, long, default_value_t = 4)]
        input_width: usize,

        /// Print the directory the model is saved to instead
        #[arg(long)]
        dir: bool,
    },

    /// Draw a single predicted pulse against its target
    Plot {
        #[arg(long)]
        predicted: PathBuf,

        #[arg(long)]
        target: PathBuf,

        /// Which pulse (row) to draw
        #[arg(long, default_value_t = 0)]
        row: usize,

        #[arg(long, default_value = "..")]
        base_dir: PathBuf,

        #[arg(long)]
        image: Option<PathBuf>,

        /// Keep the temporary pulse file
        #[arg(long)]
        keep_files: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the effective experiment configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let experiment
        = ExperimentConfig::from_arg(&cli.experiment)
        .with_context(|| format!("loading experiment {:?}", cli.experiment))?;

    match cli.command {
        Commands::Evaluate {
            gate,
            predicted,
            target,
            limit,
            base_dir,
            config,
            pulse_data_path,
            output_path,
            keep_files,
            verbose,
        } => {
            let x = read_matrix(&predicted)?;
            let y = read_matrix(&target)?;
            let base_dir = base_dir.unwrap_or_else(|| gate.default_base_dir());
            let evaluator = FidelityEvaluator::for_gate(gate, base_dir, verbose);

            let mut opts
                = EvalOptions::for_gate(gate)
                .limit(limit)
                .config_path(
                    config.unwrap_or_else(|| experiment.config_template().into()))
                .cleanup(!keep_files);
            if let Some(path) = pulse_data_path { opts = opts.pulse_data_path(path); }
            if let Some(path) = output_path { opts = opts.output_path(path); }

            info!("evaluating {} {} pulses", x.nrows(), gate);
            match evaluator.evaluate(&x, &y, &opts)? {
                Some(fid) => println!("{}", fid),
                None => bail!("no fidelity computed: solver config not found"),
            }
        },

        Commands::Expand { input, output } => {
            let preds = read_matrix(&input)?;
            let full = recover_original_structure(&preds)
                .with_context(|| format!("expanding {:?}", input))?;
            write_matrix(&output, &full)?;
            info!("wrote {} rows to {:?}", full.nrows(), output);
        },

        Commands::ModelId { input_width, dir } => {
            if dir {
                println!("{}", experiment.model_dir(input_width).display());
            } else {
                println!("{}", experiment.model_id(input_width));
            }
        },

        Commands::Plot {
            predicted,
            target,
            row,
            base_dir,
            image,
            keep_files,
            verbose,
        } => {
            let x = read_matrix(&predicted)?;
            let y = read_matrix(&target)?;
            if row >= x.nrows() || row >= y.nrows() {
                bail!(
                    "row {} out of range for {} predicted and {} target pulses",
                    row, x.nrows(), y.nrows(),
                );
            }
            let mut opts = PlotOptions { cleanup: !keep_files, ..PlotOptions::default() };
            if let Some(path) = image { opts.image_path = path; }
            let plotter = PulsePlotter::julia(base_dir, verbose);
            let image = plotter.plot(&x.slice(s![row, ..]), &y.slice(s![row, ..]), &opts)?;
            println!("{}", image.display());
        },

        Commands::Config => {
            print!("{}", toml::to_string(&experiment)?);
        },
    }
    Ok(())
}
