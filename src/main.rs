//! Frame Trace Studio CLI
//!
//! Analysis tools and timeline diagrams for traces captured by the frame
//! benchmark harness.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use frame_trace_studio::aggregator::MergeGroup;
use frame_trace_studio::commands::{
    display_version, execute_add_ms_per_frame, execute_fix_throughput, execute_merge,
    execute_render, execute_summary, inspect_trace, validate_args, BatchArgs, MergeArgs,
    RenderArgs, SummaryArgs,
};
use frame_trace_studio::parser::TimingDomain;

/// Frame Trace Studio - frame benchmark trace analysis
#[derive(Parser, Debug)]
#[command(name = "fbt-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw a timeline diagram of a frame window
    Render {
        /// Trace file to visualize
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the SVG diagram
        #[arg(short, long)]
        output: PathBuf,

        /// Use GPU timer query pairs instead of CPU timestamps
        #[arg(short = 'g', long)]
        use_gl_times: bool,

        /// First highlighted frame
        #[arg(short = 'f', long, default_value = "0")]
        in_point: usize,

        /// Number of highlighted frames
        #[arg(short = 'n', long, default_value = "5")]
        number_of_frames: usize,

        /// Title bar text (session name if not set)
        #[arg(short, long)]
        title: Option<String>,

        /// Width of the visible span in points
        #[arg(short, long)]
        width: Option<f64>,

        /// TOML file overriding drawing constants
        #[arg(long, env = "FBT_RENDER_CONFIG")]
        config: Option<PathBuf>,

        /// Stage names to leave out (defaults to FrameInput and FrameOutput)
        #[arg(long = "skip-stage")]
        skip_stages: Vec<String>,
    },

    /// Add (or verify) the average frame time of every trace below a folder
    AddMsPerFrame {
        /// Folder searched recursively for trace files
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Convert stored throughput from mebibytes/s to megabytes/s
    FixThroughput {
        /// Folder searched recursively for trace files
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Collapse pipeline stages into coarse groups
    Merge {
        /// Trace file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Trace file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Group as NAME=START..END (end exclusive); repeat in output order
        #[arg(long = "group")]
        groups: Vec<MergeGroup>,
    },

    /// Write a summary table of every trace below a folder
    Summary {
        /// Folder searched recursively for trace files
        #[arg(short, long)]
        input: PathBuf,

        /// Folder receiving summary.csv
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print an overview of a trace file
    Inspect {
        /// Path to trace file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output,
            use_gl_times,
            in_point,
            number_of_frames,
            title,
            width,
            config,
            skip_stages,
        } => {
            let mut args = RenderArgs {
                input,
                output,
                domain: if use_gl_times {
                    TimingDomain::Gpu
                } else {
                    TimingDomain::Cpu
                },
                in_point,
                frame_count: number_of_frames,
                title,
                width,
                config,
                ..Default::default()
            };
            if !skip_stages.is_empty() {
                args.excluded_stages = skip_stages;
            }

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::AddMsPerFrame { input } => {
            execute_add_ms_per_frame(BatchArgs { folder: input })?;
        }

        Commands::FixThroughput { input } => {
            execute_fix_throughput(BatchArgs { folder: input })?;
        }

        Commands::Merge {
            input,
            output,
            groups,
        } => {
            execute_merge(MergeArgs {
                input,
                output,
                groups,
            })?;
        }

        Commands::Summary { input, output } => {
            execute_summary(SummaryArgs {
                input_folder: input,
                output_folder: output,
            })?;
        }

        Commands::Inspect { file } => {
            inspect_trace(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
