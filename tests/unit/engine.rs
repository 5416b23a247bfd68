use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::text::resolver::FontConfig;

fn small_config() -> EngineConfig {
    EngineConfig {
        canvas: Canvas {
            width: 108,
            height: 192,
        },
        fps: 10,
        fonts: FontConfig::builtin_only(),
        ..EngineConfig::default()
    }
}

fn payload(points: &[&str]) -> ArticlePayload {
    ArticlePayload {
        title: "Dubai property market keeps double-digit growth".to_string(),
        key_points: points.iter().map(|p| p.to_string()).collect(),
        country: "uae".to_string(),
        hashtags: "dubai, property".to_string(),
        genre: "Business".to_string(),
        ..ArticlePayload::default()
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!(
        "reelsmith_engine_{tag}_{}_{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn new_rejects_invalid_config() {
    let mut cfg = small_config();
    cfg.fps = 0;
    assert!(ShortsEngine::new(cfg).is_err());

    let mut cfg = small_config();
    cfg.canvas.width = 107;
    assert!(ShortsEngine::new(cfg).is_err());
}

#[test]
fn plan_skips_empty_key_points() {
    let engine = ShortsEngine::new(small_config()).unwrap();
    let plan = engine.plan(&payload(&["first", "  ", "third"])).unwrap();
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
}

#[test]
fn generate_into_streams_every_frame() {
    let engine = ShortsEngine::new(small_config()).unwrap();
    let mut sink = InMemorySink::new();
    let (plan, stats) = engine
        .generate_into(&payload(&["first", "", "third"]), &mut sink)
        .unwrap();

    // 3 + 5 + 7 + 7 + 3 seconds at 10 fps.
    assert_eq!(plan.total_duration_secs(), 25.0);
    assert_eq!(stats.frames_written, 250);
    assert_eq!(sink.frames().len(), 250);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (108, 192));
    assert!((stats.duration_secs - 25.0).abs() < 1e-9);
}

#[test]
fn first_frame_is_black_and_scene_end_is_full_brightness() {
    let engine = ShortsEngine::new(small_config()).unwrap();
    let p = payload(&["only"]);
    let mut sink = InMemorySink::new();
    engine.generate_into(&p, &mut sink).unwrap();

    let first = &sink.frames()[0].1;
    assert!(first.data.chunks_exact(4).all(|px| px[..3] == [0, 0, 0]));

    let intro = engine.compose_scene(&p, SceneKind::Intro).unwrap();
    // Intro lasts 30 frames with a 6-frame fade.
    assert_eq!(sink.frames()[29].1, intro);
}

#[test]
fn parallel_composition_matches_sequential() {
    let p = payload(&["first", "second", "third"]);
    let sequential = ShortsEngine::new(small_config()).unwrap();
    let parallel = ShortsEngine::new(EngineConfig {
        parallel: true,
        threads: Some(2),
        ..small_config()
    })
    .unwrap();

    let plan = sequential.plan(&p).unwrap();
    let a = sequential.render_frames(&p, &plan).unwrap();
    let b = parallel.render_frames(&p, &plan).unwrap();
    assert_eq!(a.len(), 6);
    assert_eq!(a, b);
}

#[test]
fn default_output_path_is_grouped_by_country() {
    let engine = ShortsEngine::new(EngineConfig {
        output_dir: PathBuf::from("out"),
        ..small_config()
    })
    .unwrap();
    let path = engine.default_output_path(&payload(&[]));
    assert!(path.starts_with("out/uae"));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(
        name.ends_with("_dubai-property-market-keeps-double-digit-growth.mp4"),
        "{name}"
    );
    assert_eq!(name.find('_'), Some(10));
}

#[test]
fn batch_skips_existing_outputs() {
    let dir = temp_dir("skip");
    let engine = ShortsEngine::new(EngineConfig {
        output_dir: dir.clone(),
        ..small_config()
    })
    .unwrap();
    let p = payload(&["first"]);
    let existing = engine.default_output_path(&p);
    std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
    std::fs::write(&existing, b"done").unwrap();

    let summary = engine.generate_batch(&[p.clone(), p]);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.succeeded + summary.failed, 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn batch_records_failures_and_continues() {
    let dir = temp_dir("fail");
    let blocker = dir.join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    let engine = ShortsEngine::new(EngineConfig {
        output_dir: blocker,
        ..small_config()
    })
    .unwrap();

    let mut second = payload(&["x"]);
    second.title = "Second article".to_string();
    let summary = engine.generate_batch(&[payload(&["x"]), second]);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.failures[1].index, 1);
    assert_eq!(summary.failures[1].title, "Second article");
    assert!(summary.reports.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn title_prefix_counts_characters() {
    assert_eq!(title_prefix("ドバイ不動産", 3), "ドバイ");
    assert_eq!(title_prefix("abc", 10), "abc");
}

#[test]
fn parallel_engine_owns_one_pool_for_every_call() {
    let engine = ShortsEngine::new(EngineConfig {
        parallel: true,
        threads: Some(3),
        ..small_config()
    })
    .unwrap();
    assert_eq!(engine.pool.as_ref().unwrap().current_num_threads(), 3);

    let p = payload(&["first"]);
    let plan = engine.plan(&p).unwrap();
    let a = engine.render_frames(&p, &plan).unwrap();
    let b = engine.render_frames(&p, &plan).unwrap();
    assert_eq!(a, b);

    assert!(ShortsEngine::new(small_config()).unwrap().pool.is_none());
}
