use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reelsmith::{
    ArticlePayload, EngineConfig, FontWeight, GenreClassifier as _, KeywordGenreClassifier,
    SceneKind, ScriptHint, ShortsEngine,
};

#[derive(Parser, Debug)]
#[command(name = "reelsmith", version)]
struct Cli {
    /// Engine config JSON (absent fields keep their defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an article to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single scene frame as a PNG.
    Frame(FrameArgs),
    /// Print the scene plan for an article.
    Plan(PlanArgs),
    /// Render every article of a JSON array, skipping existing outputs.
    Batch(BatchArgs),
    /// Print which font each weight/script combination resolves to.
    Fonts,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input article JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path (derived from country, date and title when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Fill an empty genre with the keyword classifier.
    #[arg(long)]
    classify_genre: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input article JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene to compose: intro, title, key-point-1..3 or cta.
    #[arg(long)]
    scene: SceneKind,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input article JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON array of articles.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Fill empty genres with the keyword classifier.
    #[arg(long)]
    classify_genre: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Render(args) => cmd_render(config, args),
        Command::Frame(args) => cmd_frame(config, args),
        Command::Plan(args) => cmd_plan(config, args),
        Command::Batch(args) => cmd_batch(config, args),
        Command::Fonts => cmd_fonts(config),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let mut config = match path {
        Some(p) => EngineConfig::from_path(p)?,
        None => EngineConfig::default(),
    };
    config.apply_env();
    Ok(config)
}

fn read_payload(path: &Path, classify_genre: bool) -> anyhow::Result<ArticlePayload> {
    let mut payload = ArticlePayload::from_path(path)?;
    if classify_genre {
        fill_genre(&mut payload, &KeywordGenreClassifier::default());
    }
    Ok(payload)
}

fn fill_genre(payload: &mut ArticlePayload, classifier: &KeywordGenreClassifier) {
    if payload.genre.trim().is_empty() {
        payload.genre = classifier.classify(&format!("{} {}", payload.title, payload.body));
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{s}");
    Ok(())
}

fn cmd_render(config: EngineConfig, args: RenderArgs) -> anyhow::Result<()> {
    let payload = read_payload(&args.in_path, args.classify_genre)?;
    let engine = ShortsEngine::new(config)?;
    let report = engine.generate(&payload, args.out.as_deref())?;
    print_json(&report)
}

fn cmd_frame(config: EngineConfig, args: FrameArgs) -> anyhow::Result<()> {
    let payload = read_payload(&args.in_path, false)?;
    let engine = ShortsEngine::new(config)?;
    let frame = engine.compose_scene(&payload, args.scene)?;
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(config: EngineConfig, args: PlanArgs) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct PlanOut {
        scenes: Vec<SceneOut>,
        total_duration_secs: f64,
        frames: u64,
    }
    #[derive(serde::Serialize)]
    struct SceneOut {
        kind: String,
        duration_secs: f64,
        fade_in_secs: f64,
    }

    let payload = read_payload(&args.in_path, false)?;
    let engine = ShortsEngine::new(config)?;
    let plan = engine.plan(&payload)?;
    let fps = engine.config().frame_rate()?;

    print_json(&PlanOut {
        scenes: plan
            .scenes()
            .iter()
            .map(|s| SceneOut {
                kind: s.kind.to_string(),
                duration_secs: s.duration_secs,
                fade_in_secs: s.fade_in_secs,
            })
            .collect(),
        total_duration_secs: plan.total_duration_secs(),
        frames: reelsmith::scene_frame_counts(&plan, fps).iter().sum(),
    })
}

fn cmd_batch(config: EngineConfig, args: BatchArgs) -> anyhow::Result<()> {
    let mut payloads = ArticlePayload::list_from_path(&args.in_path)?;
    if args.classify_genre {
        let classifier = KeywordGenreClassifier::default();
        for p in &mut payloads {
            fill_genre(p, &classifier);
        }
    }
    let engine = ShortsEngine::new(config)?;
    let summary = engine.generate_batch(&payloads);
    print_json(&summary)
}

fn cmd_fonts(config: EngineConfig) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct FontOut {
        weight: FontWeight,
        script: ScriptHint,
        family: Option<String>,
        origin: reelsmith::FontOrigin,
    }

    let engine = ShortsEngine::new(config)?;
    let mut out = Vec::new();
    for script in [ScriptHint::Cjk, ScriptHint::Latin] {
        for weight in [FontWeight::Bold, FontWeight::Regular] {
            let face = engine.fonts().resolve_face(weight, script);
            out.push(FontOut {
                weight,
                script,
                family: face.family_name(),
                origin: face.origin().clone(),
            });
        }
    }
    print_json(&out)
}
