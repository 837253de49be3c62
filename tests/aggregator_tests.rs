use frame_trace_studio::aggregator::{
    build_summary_row, compute_avg_ms_per_frame, compute_delta_statistic,
    compute_or_validate_avg_ms_per_frame, fix_throughput_units, merge_stages, unique_key_for,
    AvgFrameTimeOutcome, MergeGroup,
};
use frame_trace_studio::parser::{
    DeltaStatistic, EventTrace, EventType, SessionStatistic, StageTrace, TraceSession,
};
use frame_trace_studio::utils::error::AnalysisError;
use pretty_assertions::assert_eq;
use std::path::Path;

const MS: i64 = 1_000_000;

fn cpu_stage(name: &str, begins: Vec<i64>, duration_ns: i64) -> StageTrace {
    let ends = begins.iter().map(|b| b + duration_ns).collect();
    let mut stage = StageTrace::new(name);
    stage.event_traces = vec![
        EventTrace::new(EventType::TaskBegin, begins),
        EventTrace::new(EventType::TaskEnd, ends),
    ];
    stage.delta_statistics = vec![DeltaStatistic::with_median(
        EventType::TaskBegin,
        EventType::TaskEnd,
        duration_ns,
    )];
    stage
}

/// 100 processed frames; the first stage carries 102 begin events
fn hundred_frame_session() -> TraceSession {
    let mut session = TraceSession::new("hd_v210");
    session.session_statistic = Some(SessionStatistic {
        number_of_frames_processed: 100,
        ..Default::default()
    });
    session.stage_traces = vec![
        cpu_stage("FrameInput", (0..102).map(|i| i * 16 * MS).collect(), MS),
        cpu_stage("FrameOutput", (0..101).map(|i| i * 16 * MS + 5 * MS).collect(), MS),
    ];
    session
}

fn five_stage_session() -> TraceSession {
    let mut session = TraceSession::new("merge");
    session.stage_traces = (0..5)
        .map(|s| {
            let begins = (0..6).map(|f| f * 10 * MS + s * MS).collect();
            cpu_stage(&format!("Stage{}", s), begins, (s + 1) * 100_000)
        })
        .collect();
    session
}

#[test]
fn test_avg_ms_per_frame_uses_in_point_one() {
    let session = hundred_frame_session();

    // (begin of last stage at index 100) - (begin of first stage at index 1)
    let expected = (1605.0 - 16.0) / 100.0;
    let computed = compute_avg_ms_per_frame(&session).unwrap();

    assert!((computed - expected).abs() < 1e-9);
}

#[test]
fn test_avg_ms_per_frame_added_then_verified() {
    let mut session = hundred_frame_session();

    let first = compute_or_validate_avg_ms_per_frame(&mut session).unwrap();
    let AvgFrameTimeOutcome::Added(added) = first else {
        panic!("expected the value to be added, got {:?}", first);
    };

    let second = compute_or_validate_avg_ms_per_frame(&mut session).unwrap();
    match second {
        AvgFrameTimeOutcome::Verified { computed, stored } => {
            assert_eq!(stored, added);
            assert!((computed - stored).abs() < 1e-5);
        }
        other => panic!("expected verification, got {:?}", other),
    }
}

#[test]
fn test_avg_ms_per_frame_mismatch_keeps_stored_value() {
    let mut session = hundred_frame_session();
    session
        .session_statistic
        .as_mut()
        .unwrap()
        .avg_millisecs_per_frame = Some(20.0);

    let result = compute_or_validate_avg_ms_per_frame(&mut session);

    assert!(matches!(
        result,
        Err(AnalysisError::StatisticMismatch { stored, .. }) if stored == 20.0
    ));
    assert_eq!(
        session.session_statistic.unwrap().avg_millisecs_per_frame,
        Some(20.0)
    );
}

#[test]
fn test_avg_ms_per_frame_requires_statistic() {
    let mut session = hundred_frame_session();
    session.session_statistic = None;

    assert!(matches!(
        compute_or_validate_avg_ms_per_frame(&mut session),
        Err(AnalysisError::MissingField(_))
    ));
}

#[test]
fn test_avg_ms_per_frame_too_few_samples() {
    let mut session = hundred_frame_session();
    session.session_statistic.as_mut().unwrap().number_of_frames_processed = 101;

    assert!(matches!(
        compute_avg_ms_per_frame(&session),
        Err(AnalysisError::InsufficientSamples {
            available: 102,
            frames: 101
        })
    ));
}

#[test]
fn test_fix_throughput_converts_mebibytes() {
    let mut session = hundred_frame_session();
    session
        .session_statistic
        .as_mut()
        .unwrap()
        .avg_throughput_mb_per_sec = Some(10.0);

    let fix = fix_throughput_units(&mut session).unwrap();

    assert_eq!(fix.before, 10.0);
    assert_eq!(fix.after, 10.48576);
    assert_eq!(
        session.session_statistic.unwrap().avg_throughput_mb_per_sec,
        Some(10.48576)
    );
}

#[test]
fn test_merge_upload_example() {
    let mut session = five_stage_session();
    let original = session.stage_traces.clone();

    merge_stages(&mut session, &[MergeGroup::new("Upload", 2..4)]).unwrap();

    assert_eq!(session.stage_traces.len(), 1);
    let upload = &session.stage_traces[0];
    assert_eq!(upload.name, "Upload");
    assert_eq!(
        upload.event_trace(EventType::TaskBegin),
        original[2].event_trace(EventType::TaskBegin)
    );
    assert_eq!(
        upload.event_trace(EventType::TaskEnd),
        original[3].event_trace(EventType::TaskEnd)
    );
    assert_eq!(upload.delta_statistics, original[2].delta_statistics);
}

#[test]
fn test_merge_length_follows_sources() {
    let mut session = five_stage_session();
    session.stage_traces[1] = cpu_stage("Short", (0..4).map(|f| f * 10 * MS).collect(), MS);
    session.stage_traces[2] = cpu_stage("Long", (0..9).map(|f| f * 10 * MS).collect(), MS);

    merge_stages(&mut session, &[MergeGroup::new("Mixed", 1..3)]).unwrap();

    let mixed = &session.stage_traces[0];
    assert_eq!(mixed.event_trace(EventType::TaskBegin).unwrap().len(), 4);
    assert_eq!(mixed.event_trace(EventType::TaskEnd).unwrap().len(), 9);
}

#[test]
fn test_merge_groups_in_order() {
    let mut session = five_stage_session();

    merge_stages(
        &mut session,
        &[
            MergeGroup::new("Front", 0..2),
            MergeGroup::new("Middle", 2..3),
            MergeGroup::new("Back", 3..5),
        ],
    )
    .unwrap();

    let names: Vec<&str> = session.stage_traces.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Front", "Middle", "Back"]);
}

#[test]
fn test_merge_invalid_range_leaves_session_untouched() {
    let mut session = five_stage_session();
    let original = session.clone();

    let result = merge_stages(
        &mut session,
        &[MergeGroup::new("Ok", 0..2), MergeGroup::new("Broken", 3..9)],
    );

    assert!(matches!(
        result,
        Err(AnalysisError::InvalidRange {
            start: 3,
            end: 9,
            stage_count: 5
        })
    ));
    assert_eq!(session, original);
}

#[test]
fn test_merge_empty_range_rejected() {
    let mut session = five_stage_session();

    assert!(matches!(
        merge_stages(&mut session, &[MergeGroup::new("Empty", 2..2)]),
        Err(AnalysisError::InvalidRange { .. })
    ));
}

#[test]
fn test_delta_statistic_recomputed() {
    let mut stage = StageTrace::new("Render");
    stage.event_traces = vec![
        EventTrace::new(EventType::TaskBegin, vec![0, 100, 200, 300]),
        EventTrace::new(EventType::TaskEnd, vec![10, 130, 220, 340]),
    ];

    let stat = compute_delta_statistic(&stage, EventType::TaskBegin, EventType::TaskEnd).unwrap();

    // durations 10, 30, 20, 40
    assert_eq!(stat.median_ns, 25);
    assert_eq!(stat.average_ns, Some(25));
    assert_eq!(stat.minimum_ns, Some(10));
    assert_eq!(stat.maximum_ns, Some(40));
    assert_eq!(stat.num_samples, Some(4));
}

#[test]
fn test_summary_row_from_pipeline() {
    let names = [
        "FrameInput",
        "MapBuffer",
        "Upload",
        "UnpackFormat",
        "ConvertFormat",
        "Render",
        "ConvertFormat",
    ];
    let mut session = TraceSession::new("hd_v210");
    session.opengl_info.renderer = "Quadro K5000".to_string();
    session.session_statistic = Some(SessionStatistic {
        number_of_frames_processed: 10,
        avg_millisecs_per_frame: Some(16.25),
        avg_throughput_mb_per_sec: Some(512.5),
        med_frame_processing_time_per_frame_ns: Some(40 * MS),
    });
    session.stage_traces = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let mut stage = StageTrace::new(*name);
            stage.delta_statistics = vec![DeltaStatistic::with_median(
                EventType::GlTaskBegin,
                EventType::GlTaskEnd,
                (index as i64) * 100_000,
            )];
            stage
        })
        .collect();
    // Render has no GPU statistic, only a CPU one
    session.stage_traces[5].delta_statistics = vec![DeltaStatistic::with_median(
        EventType::TaskBegin,
        EventType::TaskEnd,
        999_000,
    )];

    let key = unique_key_for(Path::new("results/hd_v210/3/trace.fbt"));
    let row = build_summary_row(&session, key).unwrap();

    assert_eq!(row.unique_key, "hd_v210_003");
    assert_eq!(row.configuration_name, "hd_v210");
    assert_eq!(row.gl_renderer, "Quadro K5000");
    assert_eq!(row.avg_mb_per_sec, 512.5);
    assert_eq!(row.avg_ms_per_frame, 16.25);
    assert_eq!(row.median_latency_ms, 40.0);
    assert_eq!(row.format_conversion_decode_us, 400.0);
    assert_eq!(row.render_us, 0.0);
    assert_eq!(row.format_conversion_encode_us, 600.0);
}

#[test]
fn test_summary_row_requires_all_figures() {
    let mut session = TraceSession::new("partial");
    session.session_statistic = Some(SessionStatistic {
        number_of_frames_processed: 10,
        avg_millisecs_per_frame: Some(16.25),
        avg_throughput_mb_per_sec: None,
        med_frame_processing_time_per_frame_ns: Some(40 * MS),
    });

    assert!(matches!(
        build_summary_row(&session, "partial_001"),
        Err(AnalysisError::MissingField(_))
    ));
}
