//! Extract one summary table row per trace.

use crate::parser::event::EventType;
use crate::parser::schema::TraceSession;
use crate::utils::config::SUMMARY_STAGE_COLUMNS;
use crate::utils::error::AnalysisError;
use crate::utils::units::{ns_to_ms, ns_to_us};
use log::debug;
use serde::Serialize;
use std::path::Path;

/// One row of the summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Unique Key")]
    pub unique_key: String,

    #[serde(rename = "Configuration Name")]
    pub configuration_name: String,

    #[serde(rename = "GL Renderer")]
    pub gl_renderer: String,

    #[serde(rename = "Avg. mb/sec")]
    pub avg_mb_per_sec: f64,

    #[serde(rename = "Avg. msec/frame")]
    pub avg_ms_per_frame: f64,

    /// Median frame latency in milliseconds
    #[serde(rename = "Median latency")]
    pub median_latency_ms: f64,

    #[serde(rename = "Formatconv-dec (med)")]
    pub format_conversion_decode_us: f64,

    #[serde(rename = "Render (med)")]
    pub render_us: f64,

    #[serde(rename = "Formatconv-enc (med)")]
    pub format_conversion_encode_us: f64,
}

/// Build the summary row for one session
///
/// **Public** - used by the summary command
///
/// Stage medians are looked up by fixed pipeline position and expected name
/// on the GPU timer pair; a stage that is missing, misnamed or lacks the
/// statistic reports `0`.
///
/// # Errors
/// * `AnalysisError::MissingField` - No session statistic, or one of its figures is absent
pub fn build_summary_row(
    session: &TraceSession,
    unique_key: impl Into<String>,
) -> Result<SummaryRow, AnalysisError> {
    let stat = session
        .session_statistic
        .as_ref()
        .ok_or_else(|| AnalysisError::MissingField("session_statistic".to_string()))?;

    let avg_mb_per_sec = stat.avg_throughput_mb_per_sec.ok_or_else(|| {
        AnalysisError::MissingField("session_statistic.avg_throughput_mb_per_sec".to_string())
    })?;
    let avg_ms_per_frame = stat.avg_millisecs_per_frame.ok_or_else(|| {
        AnalysisError::MissingField("session_statistic.avg_millisecs_per_frame".to_string())
    })?;
    let median_latency_ns = stat.med_frame_processing_time_per_frame_ns.ok_or_else(|| {
        AnalysisError::MissingField(
            "session_statistic.med_frame_processing_time_per_frame_ns".to_string(),
        )
    })?;

    let medians: Vec<f64> = SUMMARY_STAGE_COLUMNS
        .iter()
        .map(|(position, name)| stage_median_us(session, *position, name))
        .collect();

    Ok(SummaryRow {
        unique_key: unique_key.into(),
        configuration_name: session.name.clone(),
        gl_renderer: session.opengl_info.renderer.clone(),
        avg_mb_per_sec,
        avg_ms_per_frame,
        median_latency_ms: ns_to_ms(median_latency_ns),
        format_conversion_decode_us: medians[0],
        render_us: medians[1],
        format_conversion_encode_us: medians[2],
    })
}

/// Key a trace by `<configuration folder>_<run number>`
///
/// **Public** - traces live at `<configuration>/<run>/trace.fbt`
///
/// Numeric run folders are zero-padded to three digits; anything else is
/// used verbatim.
pub fn unique_key_for(trace_path: &Path) -> String {
    let run_dir = trace_path.parent();
    let run = run_dir
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let configuration = run_dir
        .and_then(|dir| dir.parent())
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match run.parse::<u32>() {
        Ok(number) => format!("{}_{:03}", configuration, number),
        Err(_) => format!("{}_{}", configuration, run),
    }
}

fn stage_median_us(session: &TraceSession, position: usize, expected_name: &str) -> f64 {
    let Some(stage) = session.stage_traces.get(position) else {
        return 0.0;
    };
    if stage.name != expected_name {
        debug!(
            "Stage {} is '{}', expected '{}'",
            position, stage.name, expected_name
        );
        return 0.0;
    }

    stage
        .delta_statistic(EventType::GlTaskBegin, EventType::GlTaskEnd)
        .map(|stat| ns_to_us(stat.median_ns))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_key_pads_run_number() {
        let key = unique_key_for(Path::new("results/hd_v210/7/trace.fbt"));
        assert_eq!(key, "hd_v210_007");
    }

    #[test]
    fn test_unique_key_non_numeric_run() {
        let key = unique_key_for(Path::new("results/hd_v210/warmup/trace.fbt"));
        assert_eq!(key, "hd_v210_warmup");
    }
}
