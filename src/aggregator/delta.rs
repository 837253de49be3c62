//! Recompute duration statistics from raw per-frame timestamps.

use crate::parser::event::EventType;
use crate::parser::schema::{DeltaStatistic, StageTrace};
use crate::utils::error::AnalysisError;

/// Build a delta statistic from a stage's begin/end sequences
///
/// **Public** - lets tools compare stored statistics against the raw data
///
/// Durations are `end[i] - begin[i]`. Average and even-count median use
/// integer division; the standard deviation is the sample deviation (n - 1).
///
/// # Errors
/// * `AnalysisError::MissingField` - Stage lacks the begin or end trace
/// * `AnalysisError::InsufficientSamples` - The sequences are empty
pub fn compute_delta_statistic(
    stage: &StageTrace,
    begin: EventType,
    end: EventType,
) -> Result<DeltaStatistic, AnalysisError> {
    let begin_trace = stage.event_trace(begin).ok_or_else(|| {
        AnalysisError::MissingField(format!("stage '{}': {} event trace", stage.name, begin))
    })?;
    let end_trace = stage.event_trace(end).ok_or_else(|| {
        AnalysisError::MissingField(format!("stage '{}': {} event trace", stage.name, end))
    })?;

    let mut deltas: Vec<i64> = begin_trace
        .trace_times_ns
        .iter()
        .zip(&end_trace.trace_times_ns)
        .map(|(b, e)| e - b)
        .collect();

    let n = deltas.len();
    if n == 0 {
        return Err(AnalysisError::InsufficientSamples {
            available: 0,
            frames: 1,
        });
    }

    let sum: i64 = deltas.iter().sum();
    let average = sum / n as i64;
    let expected = sum as f64 / n as f64;
    let std_deviation = if n > 1 {
        let squared: f64 = deltas
            .iter()
            .map(|d| (*d as f64 - expected).powi(2))
            .sum();
        (squared / (n - 1) as f64).sqrt() as i64
    } else {
        0
    };

    deltas.sort_unstable();
    let median = if n % 2 == 1 {
        deltas[n / 2]
    } else {
        (deltas[n / 2] + deltas[n / 2 - 1]) / 2
    };

    Ok(DeltaStatistic {
        begin_event: begin,
        end_event: end,
        name: String::new(),
        median_ns: median,
        average_ns: Some(average),
        minimum_ns: deltas.first().copied(),
        maximum_ns: deltas.last().copied(),
        std_deviation_ns: Some(std_deviation),
        num_samples: Some(n as u64),
    })
}
