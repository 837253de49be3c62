use crate::aggregator::MergeGroup;
use crate::parser::event::TimingDomain;
use crate::utils::config::{DEFAULT_EXCLUDED_STAGES, TRACE_FILE_NAME};
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Trace file to visualize
    pub input: PathBuf,

    /// Output path for the SVG diagram
    pub output: PathBuf,

    /// CPU or GPU timer pairs
    pub domain: TimingDomain,

    /// First highlighted frame
    pub in_point: usize,

    /// Number of highlighted frames
    pub frame_count: usize,

    /// Title bar text (session name if not set)
    pub title: Option<String>,

    /// Scale the visible span to this many points
    pub width: Option<f64>,

    /// TOML file overriding drawing constants
    pub config: Option<PathBuf>,

    /// Stages left out of the diagram by name
    pub excluded_stages: Vec<String>,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(TRACE_FILE_NAME),
            output: PathBuf::from("trace.svg"),
            domain: TimingDomain::Cpu,
            in_point: 0,
            frame_count: 5,
            title: None,
            width: None,
            config: None,
            excluded_stages: DEFAULT_EXCLUDED_STAGES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Arguments for the commands rewriting every trace below a folder
#[derive(Debug, Clone)]
pub struct BatchArgs {
    /// Folder searched recursively for trace files
    pub folder: PathBuf,
}

/// Arguments for the merge command
#[derive(Debug, Clone)]
pub struct MergeArgs {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Groups in output order; the standard grouping when empty
    pub groups: Vec<MergeGroup>,
}

/// Arguments for the summary command
#[derive(Debug, Clone)]
pub struct SummaryArgs {
    /// Folder searched recursively for trace files
    pub input_folder: PathBuf,

    /// Folder receiving the summary table
    pub output_folder: PathBuf,
}

/// Outcome of a batch over many trace files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}
