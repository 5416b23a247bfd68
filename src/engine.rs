use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::article::payload::ArticlePayload;
use crate::article::slug::default_output_path;
use crate::assemble::budget::{SizeBudgetPolicy, SizeVerdict, WarnOnOverage, check_file};
use crate::assemble::clip::{AssemblyStats, assemble};
use crate::config::EngineConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::FrameSink;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::compositor::{FrameCompositor, SceneContent};
use crate::render::frame::Frame;
use crate::scene::plan::{SceneKind, ScenePlan};
use crate::text::resolver::FontResolver;
use crate::theme::palette::resolve_theme;

/// Structured result of one successful generation call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GenerationReport {
    /// Where the video was written.
    pub path: PathBuf,
    /// Encoded duration in seconds (frames / fps).
    pub duration_secs: f64,
    /// Frames written.
    pub frames: u64,
    /// Artifact size in bytes.
    pub bytes: u64,
    /// Scenes in emission order.
    pub scenes: Vec<SceneKind>,
    /// Size check against the platform ceiling.
    pub verdict: SizeVerdict,
}

/// One article that failed inside a batch.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BatchFailure {
    /// Position in the input list.
    pub index: usize,
    /// Article title.
    pub title: String,
    /// Rendered error message.
    pub error: String,
}

/// Outcome of [`ShortsEngine::generate_batch`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct BatchSummary {
    /// Articles in the input list.
    pub total: usize,
    /// Articles rendered successfully.
    pub succeeded: usize,
    /// Articles whose output already existed.
    pub skipped: usize,
    /// Articles that failed.
    pub failed: usize,
    /// Reports of the successful articles, in input order.
    pub reports: Vec<GenerationReport>,
    /// Failures, in input order.
    pub failures: Vec<BatchFailure>,
}

/// Article-to-video engine.
///
/// One engine can serve many calls, sequentially or from several threads; calls share only the
/// font resolver's read-mostly cache.
pub struct ShortsEngine {
    config: EngineConfig,
    fonts: Arc<FontResolver>,
    compositor: FrameCompositor,
    size_policy: Box<dyn SizeBudgetPolicy>,
    // Built once when `parallel` is set.
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for ShortsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortsEngine")
            .field("config", &self.config)
            .field("threads", &self.pool.as_ref().map(rayon::ThreadPool::current_num_threads))
            .finish_non_exhaustive()
    }
}

impl ShortsEngine {
    /// Validate `config` and build an engine with its own font resolver.
    pub fn new(config: EngineConfig) -> ReelResult<Self> {
        let fonts = Arc::new(FontResolver::new(config.fonts.clone()));
        Self::with_font_resolver(config, fonts)
    }

    /// Build an engine sharing an existing resolver (and its cache).
    pub fn with_font_resolver(config: EngineConfig, fonts: Arc<FontResolver>) -> ReelResult<Self> {
        config.validate()?;
        let compositor = FrameCompositor::new(config.canvas, config.brand.clone());
        let pool = if config.parallel {
            Some(build_thread_pool(config.threads)?)
        } else {
            None
        };
        Ok(Self {
            config,
            fonts,
            compositor,
            size_policy: Box::new(WarnOnOverage),
            pool,
        })
    }

    /// Replace the post-encode size policy (default: [`WarnOnOverage`]).
    pub fn with_size_policy(mut self, policy: impl SizeBudgetPolicy + 'static) -> Self {
        self.size_policy = Box::new(policy);
        self
    }

    /// Validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared font resolver.
    pub fn fonts(&self) -> &Arc<FontResolver> {
        &self.fonts
    }

    /// Scene plan for `payload`.
    pub fn plan(&self, payload: &ArticlePayload) -> ReelResult<ScenePlan> {
        ScenePlan::build(&payload.normalized_key_points(), &self.config.timings)
    }

    /// Compose a single scene frame (used for previews).
    pub fn compose_scene(&self, payload: &ArticlePayload, kind: SceneKind) -> ReelResult<Frame> {
        let theme = resolve_theme(&payload.country_key());
        let content = SceneContent::from_payload(payload);
        self.compositor
            .compose(kind, &theme, &self.fonts, &content)
    }

    /// Compose every frame of `plan`, in plan order.
    pub fn render_frames(&self, payload: &ArticlePayload, plan: &ScenePlan) -> ReelResult<Vec<Frame>> {
        let theme = resolve_theme(&payload.country_key());
        let content = SceneContent::from_payload(payload);
        let compose = |kind: SceneKind| {
            self.compositor
                .compose(kind, &theme, &self.fonts, &content)
        };

        let Some(pool) = &self.pool else {
            return plan.scenes().iter().map(|s| compose(s.kind)).collect();
        };
        pool.install(|| {
            plan.scenes()
                .par_iter()
                .map(|s| compose(s.kind))
                .collect::<ReelResult<Vec<_>>>()
        })
    }

    /// Default output path for `payload` dated today (UTC).
    pub fn default_output_path(&self, payload: &ArticlePayload) -> PathBuf {
        default_output_path(
            &self.config.output_dir,
            &payload.country_key(),
            &payload.title,
            chrono::Utc::now().date_naive(),
        )
    }

    /// Plan, compose and assemble into any sink.
    pub fn generate_into(
        &self,
        payload: &ArticlePayload,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<(ScenePlan, AssemblyStats)> {
        let plan = self.plan(payload)?;
        let frames = self.render_frames(payload, &plan)?;
        let stats = assemble(&plan, &frames, self.config.frame_rate()?, sink)?;
        Ok((plan, stats))
    }

    /// Generate the MP4 for `payload` at `out_path` (or the derived default path).
    ///
    /// An artifact over the size ceiling is reported through the size policy; with the
    /// default policy the call still succeeds.
    #[tracing::instrument(skip_all, fields(country = %payload.country_key()))]
    pub fn generate(
        &self,
        payload: &ArticlePayload,
        out_path: Option<&Path>,
    ) -> ReelResult<GenerationReport> {
        let path = match out_path {
            Some(p) => p.to_path_buf(),
            None => self.default_output_path(payload),
        };
        tracing::info!(
            title = %title_prefix(&payload.title, 40),
            path = %path.display(),
            "generating video"
        );

        let mut opts = FfmpegSinkOpts::new(&path);
        opts.overwrite = self.config.overwrite;
        opts.bitrate_kbps = self.config.bitrate_kbps;
        opts.codec = self.config.codec.clone();
        let mut sink = FfmpegSink::new(opts);

        let (plan, stats) = self.generate_into(payload, &mut sink)?;

        let verdict = check_file(&path, self.config.size_ceiling_bytes)?;
        self.size_policy.apply(&path, verdict)?;

        tracing::info!(
            path = %path.display(),
            mb = verdict.bytes() as f64 / (1024.0 * 1024.0),
            secs = stats.duration_secs,
            "video generated"
        );

        Ok(GenerationReport {
            path,
            duration_secs: stats.duration_secs,
            frames: stats.frames_written,
            bytes: verdict.bytes(),
            scenes: plan.kinds(),
            verdict,
        })
    }
}

impl ShortsEngine {
    /// Generate every payload at its derived output path.
    ///
    /// Articles whose output already exists are skipped. A failing article is recorded and the
    /// batch moves on.
    #[tracing::instrument(skip_all, fields(total = payloads.len()))]
    pub fn generate_batch(&self, payloads: &[ArticlePayload]) -> BatchSummary {
        let mut summary = BatchSummary {
            total: payloads.len(),
            ..BatchSummary::default()
        };
        for (index, payload) in payloads.iter().enumerate() {
            let path = self.default_output_path(payload);
            if path.exists() {
                tracing::info!(path = %path.display(), "output exists; skipping");
                summary.skipped += 1;
                continue;
            }
            match self.generate(payload, Some(&path)) {
                Ok(report) => {
                    summary.succeeded += 1;
                    summary.reports.push(report);
                }
                Err(err) => {
                    tracing::error!(index, title = %title_prefix(&payload.title, 40), %err, "generation failed");
                    summary.failed += 1;
                    summary.failures.push(BatchFailure {
                        index,
                        title: payload.title.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        tracing::info!(
            succeeded = summary.succeeded,
            skipped = summary.skipped,
            failed = summary.failed,
            "batch finished"
        );
        summary
    }
}

fn title_prefix(title: &str, max_chars: usize) -> String {
    title.chars().take(max_chars).collect()
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ReelError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
