use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::assemble::budget::PLATFORM_SIZE_CEILING_BYTES;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::plan::SceneTimings;

pub use crate::text::resolver::FontConfig;

/// Brand strings drawn on the intro, title and call-to-action scenes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// Wordmark on the intro and CTA scenes.
    pub wordmark: String,
    /// Muted subtitle on the intro scene.
    pub tagline: String,
    /// Site caption under the title and on the CTA scene.
    pub site: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            wordmark: "CONNECT-SEKAI".to_string(),
            tagline: "Business Intelligence Hub".to_string(),
            site: "connect-sekai.com".to_string(),
        }
    }
}

/// Engine settings. Every field has a default, so a config file only lists overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output canvas (even dimensions).
    pub canvas: Canvas,
    /// Output frame rate (integer frames per second).
    pub fps: u32,
    /// Target video bitrate in kbit/s.
    pub bitrate_kbps: u32,
    /// `ffmpeg` video encoder.
    pub codec: String,
    /// Platform upload ceiling used for the post-encode size check.
    pub size_ceiling_bytes: u64,
    /// Root of derived output paths (`<dir>/<country>/<date>_<slug>.mp4`).
    pub output_dir: PathBuf,
    /// Replace an existing file at the output path.
    pub overwrite: bool,
    /// Per-scene durations and fades.
    pub timings: SceneTimings,
    /// Brand strings.
    pub brand: BrandConfig,
    /// Font lookup.
    pub fonts: FontConfig,
    /// Compose scene frames on a rayon pool.
    pub parallel: bool,
    /// Worker threads for `parallel` (rayon default when unset).
    pub threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::VERTICAL_1080,
            fps: 24,
            bitrate_kbps: 4000,
            codec: "libx264".to_string(),
            size_ceiling_bytes: PLATFORM_SIZE_CEILING_BYTES,
            output_dir: PathBuf::from("data/videos"),
            overwrite: true,
            timings: SceneTimings::default(),
            brand: BrandConfig::default(),
            fonts: FontConfig::default(),
            parallel: false,
            threads: None,
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file; absent fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ReelError::serde(format!("parse config JSON '{}': {e}", path.display()))
        })
    }

    /// Apply `REELSMITH_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Unparseable or zero values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("REELSMITH_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(fps) = lookup("REELSMITH_FPS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.fps = fps;
        }
        if let Some(kbps) = lookup("REELSMITH_BITRATE_KBPS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.bitrate_kbps = kbps;
        }
        if let Some(bytes) = lookup("REELSMITH_SIZE_CEILING_BYTES")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.size_ceiling_bytes = bytes;
        }
        if let Some(font) = lookup("REELSMITH_FONT_PATH").filter(|v| !v.trim().is_empty()) {
            self.fonts.extra_candidates.insert(0, PathBuf::from(font));
        }
    }

    /// Output frame rate.
    pub fn frame_rate(&self) -> ReelResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Reject settings the encoder or sequencer cannot honour.
    pub fn validate(&self) -> ReelResult<()> {
        self.canvas.validate()?;
        if u16::try_from(self.canvas.width).is_err() || u16::try_from(self.canvas.height).is_err()
        {
            return Err(ReelError::validation("canvas dimensions must fit in u16"));
        }
        self.frame_rate()?;
        if self.bitrate_kbps == 0 {
            return Err(ReelError::validation("bitrate_kbps must be > 0"));
        }
        if self.codec.trim().is_empty() {
            return Err(ReelError::validation("codec must not be empty"));
        }
        if self.threads == Some(0) {
            return Err(ReelError::validation("threads must be > 0 when set"));
        }
        self.timings.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
