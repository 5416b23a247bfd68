use super::*;
use crate::encode::sink::InMemorySink;
use crate::scene::plan::{SceneKind, SceneTiming, SceneTimings};

fn timings() -> SceneTimings {
    SceneTimings {
        intro: SceneTiming {
            duration_secs: 1.0,
            fade_in_secs: 0.5,
        },
        title: SceneTiming {
            duration_secs: 0.5,
            fade_in_secs: 0.0,
        },
        key_point: SceneTiming {
            duration_secs: 1.0,
            fade_in_secs: 0.0,
        },
        call_to_action: SceneTiming {
            duration_secs: 0.2,
            fade_in_secs: 0.0,
        },
    }
}

fn solid(v: u8) -> Frame {
    Frame::from_rgba8(2, 2, [v, v, v, 255].repeat(4), true).unwrap()
}

fn plan(points: [&str; 3]) -> ScenePlan {
    ScenePlan::build(&points.map(String::from), &timings()).unwrap()
}

fn fps10() -> Fps {
    Fps::new(10, 1).unwrap()
}

#[test]
fn frame_count_matches_plan_duration() {
    let plan = plan(["a", "", "c"]);
    let frames: Vec<Frame> = (0..plan.len()).map(|i| solid(10 * i as u8 + 10)).collect();
    let mut sink = InMemorySink::new();
    let stats = assemble(&plan, &frames, fps10(), &mut sink).unwrap();

    // 10 + 5 + 10 + 10 + 2
    assert_eq!(stats.frames_written, 37);
    assert_eq!(sink.frames().len(), 37);
    assert!((stats.duration_secs - plan.total_duration_secs()).abs() < 1e-9);
    assert!(sink.is_finished());
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..37).collect::<Vec<_>>());
}

#[test]
fn fade_in_ramps_from_black() {
    let plan = plan(["", "", ""]);
    let frames = vec![solid(255), solid(200), solid(100)];
    let mut sink = InMemorySink::new();
    assemble(&plan, &frames, fps10(), &mut sink).unwrap();

    let out = sink.frames();
    assert_eq!(out[0].1.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(out[1].1.pixel(0, 0), [51, 51, 51, 255]);
    assert_eq!(out[5].1, frames[0]);
    assert_eq!(out[9].1, frames[0]);
    // Title has no fade and starts at frame 10.
    assert_eq!(out[10].1, frames[1]);
    assert_eq!(out[15].1, frames[2]);
}

#[test]
fn fade_factor_is_linear_and_clamped() {
    let scene = Scene {
        kind: SceneKind::Intro,
        duration_secs: 3.0,
        fade_in_secs: 0.6,
    };
    let fps = Fps::new(24, 1).unwrap();
    assert_eq!(fade_factor(&scene, fps, 0), 0.0);
    assert!((fade_factor(&scene, fps, 12) - (0.5 / 0.6)).abs() < 1e-9);
    assert_eq!(fade_factor(&scene, fps, 48), 1.0);
}

#[test]
fn fractional_durations_do_not_drift() {
    let scene = SceneTiming {
        duration_secs: 1.02,
        fade_in_secs: 0.0,
    };
    let timings = SceneTimings {
        intro: scene,
        title: scene,
        key_point: scene,
        call_to_action: scene,
    };
    let plan = ScenePlan::build(&["a", "b", "c"].map(String::from), &timings).unwrap();
    let fps = Fps::new(24, 1).unwrap();

    let counts = scene_frame_counts(&plan, fps);
    // 6.12 s at 24 fps is 146.88 frames; per-scene rounding alone would give 6 * 24 = 144.
    assert_eq!(counts.iter().sum::<u64>(), 147);
    assert!(counts.iter().all(|&n| n == 24 || n == 25), "{counts:?}");

    let frames = vec![solid(9); plan.len()];
    let mut sink = InMemorySink::new();
    let stats = assemble(&plan, &frames, fps, &mut sink).unwrap();
    assert_eq!(stats.frames_written, 147);
    assert!((stats.duration_secs - plan.total_duration_secs()).abs() <= 0.5 / 24.0);
}

#[test]
fn whole_second_scenes_keep_exact_counts() {
    let plan = plan(["a", "", "c"]);
    assert_eq!(scene_frame_counts(&plan, fps10()), vec![10, 5, 10, 10, 2]);
}

#[test]
fn mismatched_inputs_are_rejected() {
    let plan = plan(["a", "", ""]);
    let mut sink = InMemorySink::new();
    assert!(assemble(&plan, &[solid(1)], fps10(), &mut sink).is_err());

    let mut frames = vec![solid(1); plan.len()];
    frames[2] = Frame::from_rgba8(1, 1, vec![0; 4], true).unwrap();
    assert!(assemble(&plan, &frames, fps10(), &mut sink).is_err());
}
