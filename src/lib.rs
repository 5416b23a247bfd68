#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! Procedural vertical short-form video synthesis from news articles.
//!
//! An [`ArticlePayload`] becomes a short sequence of still scenes (intro, title, up to three key
//! points, call to action), each composed on the CPU with [`vello_cpu`], held for its duration
//! with a fade from black, and streamed into the system `ffmpeg` as an H.264 MP4.
//!
//! The entry point is [`ShortsEngine`]:
//!
//! ```no_run
//! use reelsmith::{ArticlePayload, EngineConfig, ShortsEngine};
//!
//! let engine = ShortsEngine::new(EngineConfig::default())?;
//! let payload = ArticlePayload::from_path("article.json")?;
//! let report = engine.generate(&payload, None)?;
//! println!("{} ({:.1}s)", report.path.display(), report.duration_secs);
//! # Ok::<(), reelsmith::ReelError>(())
//! ```

mod article;
mod assemble;
mod config;
mod encode;
mod engine;
mod foundation;
mod render;
mod scene;
mod text;
mod theme;

pub use article::genre::{GenreClassifier, KeywordGenreClassifier};
pub use article::payload::{ArticlePayload, KEY_POINT_SLOTS, normalize_hashtags};
pub use article::slug::{
    SLUG_FALLBACK, SLUG_MAX_LEN, country_dir_name, default_output_path, slugify,
};
pub use assemble::budget::{
    PLATFORM_SIZE_CEILING_BYTES, RejectOverage, SizeBudgetPolicy, SizeVerdict, WarnOnOverage,
    check_file, size_verdict,
};
pub use assemble::clip::{AssemblyStats, assemble, fade_factor, scene_frame_counts};
pub use config::{BrandConfig, EngineConfig, FontConfig};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ffmpeg_tools_available, is_ffmpeg_on_path};
pub use encode::probe::probe_duration_secs;
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use engine::{BatchFailure, BatchSummary, GenerationReport, ShortsEngine};
pub use foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
pub use foundation::error::{ReelError, ReelResult};
pub use render::compositor::{
    FrameCompositor, HASHTAG_MAX_LINES, KEY_POINT_MAX_LINES, SceneContent, TITLE_MAX_LINES,
};
pub use render::frame::Frame;
pub use scene::plan::{Scene, SceneKind, ScenePlan, SceneTiming, SceneTimings};
pub use text::font::{FontFace, FontHandle, FontOrigin, FontWeight, GlyphMeter, LineMetrics, ScriptHint};
pub use text::resolver::{
    FontCandidate, FontResolver, OsFamily, SYSTEM_CANDIDATES, probe_order,
};
pub use text::wrap::{ELLIPSIS, wrap};
pub use theme::flags::{Flag, FlagRaster};
pub use theme::palette::{
    CountryProfile, Theme, country_label, country_profile, known_countries, resolve_theme,
};
