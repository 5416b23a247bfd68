use super::*;

fn points(a: &str, b: &str, c: &str) -> [String; 3] {
    [a.to_string(), b.to_string(), c.to_string()]
}

#[test]
fn full_plan_has_six_scenes_lasting_32_seconds() {
    let plan = ScenePlan::build(&points("A", "B", "C"), &SceneTimings::default()).unwrap();
    assert_eq!(plan.len(), 6);
    assert_eq!(plan.kinds(), SceneKind::canonical().to_vec());
    assert_eq!(plan.total_duration_secs(), 32.0);
}

#[test]
fn empty_middle_key_point_is_skipped() {
    let plan = ScenePlan::build(&points("A", "", "C"), &SceneTimings::default()).unwrap();
    assert_eq!(
        plan.kinds(),
        vec![
            SceneKind::Intro,
            SceneKind::Title,
            SceneKind::KeyPoint(1),
            SceneKind::KeyPoint(3),
            SceneKind::CallToAction,
        ]
    );
    assert_eq!(plan.total_duration_secs(), 25.0);
}

#[test]
fn all_empty_key_points_leave_three_scenes() {
    let plan = ScenePlan::build(&points("", "", ""), &SceneTimings::default()).unwrap();
    assert_eq!(
        plan.kinds(),
        vec![SceneKind::Intro, SceneKind::Title, SceneKind::CallToAction]
    );
    assert_eq!(plan.total_duration_secs(), 11.0);
    assert!(!plan.is_empty());
}

#[test]
fn scenes_carry_their_fade_in() {
    let plan = ScenePlan::build(&points("A", "", ""), &SceneTimings::default()).unwrap();
    let fades: Vec<f64> = plan.scenes().iter().map(|s| s.fade_in_secs).collect();
    assert_eq!(fades, vec![0.6, 0.8, 0.6, 0.5]);
}

#[test]
fn invalid_timings_are_rejected() {
    let mut timings = SceneTimings::default();
    timings.title.fade_in_secs = 6.0;
    assert!(ScenePlan::build(&points("", "", ""), &timings).is_err());

    let mut timings = SceneTimings::default();
    timings.key_point.duration_secs = 0.0;
    assert!(timings.validate().is_err());

    let mut timings = SceneTimings::default();
    timings.intro.duration_secs = f64::NAN;
    assert!(timings.validate().is_err());
}

#[test]
fn scene_names_round_trip_through_display() {
    for kind in SceneKind::canonical() {
        assert_eq!(kind.to_string().parse::<SceneKind>().unwrap(), kind);
    }
    assert!("key-point-4".parse::<SceneKind>().is_err());
    assert!("outro".parse::<SceneKind>().is_err());
}
