//! Render command implementation.
//!
//! The render command:
//! 1. Loads the render configuration
//! 2. Reads the trace file
//! 3. Lays out the requested frame window
//! 4. Renders the diagram
//! 5. Writes the SVG file

use super::models::RenderArgs;
use crate::output::{read_session, write_svg};
use crate::timeline::{compute_layout, load_render_config, render_timeline_svg, LayoutOptions, RenderConfig};
use anyhow::{Context, Result};
use colored::*;
use log::{debug, info};
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or corrupt trace file
/// * Invalid render configuration
/// * Frame window outside the recorded data
/// * Missing statistics needed for the labels
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Rendering '{}'", args.input.display());

    // Step 1: Drawing constants
    let config = match &args.config {
        Some(path) => load_render_config(path)
            .with_context(|| format!("Failed to load render config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    // Step 2: Trace
    let session = read_session(&args.input)
        .with_context(|| format!("Failed to read trace {}", args.input.display()))?;

    debug!(
        "Session '{}' with {} stages",
        session.name,
        session.stage_traces.len()
    );

    // Step 3: Layout
    let options = LayoutOptions::new(args.in_point, args.frame_count)
        .with_domain(args.domain)
        .with_target_width(args.width)
        .with_excluded_stages(args.excluded_stages.clone());
    let layout = compute_layout(&session, &options, &config).context("Failed to lay out timeline")?;

    // Step 4: Render
    let svg = render_timeline_svg(&session, &layout, &config, args.title.as_deref())
        .context("Failed to render timeline")?;

    // Step 5: Write
    write_svg(&svg, &args.output).context("Failed to write diagram")?;

    println!(
        "{} Diagram written to {}",
        "✓".green(),
        args.output.display().to_string().cyan()
    );

    info!("Render completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.frame_count == 0 {
        anyhow::bail!("Number of frames must be greater than 0");
    }

    if let Some(width) = args.width {
        if !width.is_finite() || width <= 0.0 {
            anyhow::bail!("Width must be a positive number of points");
        }
    }

    if args.input == args.output {
        anyhow::bail!("Input and output must be different files");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_defaults() {
        assert!(validate_args(&RenderArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_zero_frames() {
        let args = RenderArgs {
            frame_count: 0,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_negative_width() {
        let args = RenderArgs {
            width: Some(-10.0),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_same_paths() {
        let args = RenderArgs {
            input: PathBuf::from("trace.fbt"),
            output: PathBuf::from("trace.fbt"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }
}
