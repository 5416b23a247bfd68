use std::str::FromStr;

use crate::article::payload::KEY_POINT_SLOTS;
use crate::foundation::error::{ReelError, ReelResult};

/// Kind of a scene, in the fixed emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Wordmark, country label and genre badge.
    Intro,
    /// Wrapped article title.
    Title,
    /// Key point `n` (1-based slot index).
    KeyPoint(u8),
    /// Closing call to action with hashtags.
    CallToAction,
}

impl SceneKind {
    /// Canonical ordering before key-point filtering.
    pub fn canonical() -> [SceneKind; 3 + KEY_POINT_SLOTS] {
        [
            SceneKind::Intro,
            SceneKind::Title,
            SceneKind::KeyPoint(1),
            SceneKind::KeyPoint(2),
            SceneKind::KeyPoint(3),
            SceneKind::CallToAction,
        ]
    }
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneKind::Intro => f.write_str("intro"),
            SceneKind::Title => f.write_str("title"),
            SceneKind::KeyPoint(n) => write!(f, "key-point-{n}"),
            SceneKind::CallToAction => f.write_str("cta"),
        }
    }
}

impl FromStr for SceneKind {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intro" => Ok(SceneKind::Intro),
            "title" => Ok(SceneKind::Title),
            "cta" | "call-to-action" => Ok(SceneKind::CallToAction),
            other => {
                let n = other
                    .strip_prefix("key-point-")
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=KEY_POINT_SLOTS as u8).contains(n))
                    .ok_or_else(|| {
                        ReelError::validation(format!(
                            "unknown scene \"{s}\" (expected intro, title, key-point-1..3, cta)"
                        ))
                    })?;
                Ok(SceneKind::KeyPoint(n))
            }
        }
    }
}

/// Duration and fade-in of one scene kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneTiming {
    /// Hold duration in seconds.
    pub duration_secs: f64,
    /// Fade-from-black duration at the start of the scene.
    pub fade_in_secs: f64,
}

impl SceneTiming {
    const fn new(duration_secs: f64, fade_in_secs: f64) -> Self {
        Self {
            duration_secs,
            fade_in_secs,
        }
    }

    fn validate(self, name: &str) -> ReelResult<()> {
        let Self {
            duration_secs: d,
            fade_in_secs: f,
        } = self;
        if !d.is_finite() || d <= 0.0 {
            return Err(ReelError::validation(format!(
                "{name} duration must be finite and > 0, got {d}"
            )));
        }
        if !f.is_finite() || f < 0.0 || f > d {
            return Err(ReelError::validation(format!(
                "{name} fade-in must be within 0..={d}, got {f}"
            )));
        }
        Ok(())
    }
}

/// Per-kind timings. Every key point shares one timing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneTimings {
    /// Intro scene.
    pub intro: SceneTiming,
    /// Title scene.
    pub title: SceneTiming,
    /// Each key-point scene.
    pub key_point: SceneTiming,
    /// Call-to-action scene.
    pub call_to_action: SceneTiming,
}

impl Default for SceneTimings {
    fn default() -> Self {
        Self {
            intro: SceneTiming::new(3.0, 0.6),
            title: SceneTiming::new(5.0, 0.8),
            key_point: SceneTiming::new(7.0, 0.6),
            call_to_action: SceneTiming::new(3.0, 0.5),
        }
    }
}

impl SceneTimings {
    /// Timing for a scene kind.
    pub fn for_kind(&self, kind: SceneKind) -> SceneTiming {
        match kind {
            SceneKind::Intro => self.intro,
            SceneKind::Title => self.title,
            SceneKind::KeyPoint(_) => self.key_point,
            SceneKind::CallToAction => self.call_to_action,
        }
    }

    /// Reject non-finite, non-positive durations and fades outside `0..=duration`.
    pub fn validate(&self) -> ReelResult<()> {
        self.intro.validate("intro")?;
        self.title.validate("title")?;
        self.key_point.validate("key_point")?;
        self.call_to_action.validate("call_to_action")
    }
}

/// One emitted scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    /// What the scene shows.
    pub kind: SceneKind,
    /// Hold duration in seconds.
    pub duration_secs: f64,
    /// Fade-in duration in seconds.
    pub fade_in_secs: f64,
}

/// Ordered, already-filtered scene list for one article. Immutable once built.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScenePlan {
    scenes: Vec<Scene>,
}

impl ScenePlan {
    /// Build the canonical list and drop key-point scenes whose text is empty.
    pub fn build(
        key_points: &[String; KEY_POINT_SLOTS],
        timings: &SceneTimings,
    ) -> ReelResult<Self> {
        timings.validate()?;
        let scenes = SceneKind::canonical()
            .into_iter()
            .filter(|kind| match kind {
                SceneKind::KeyPoint(n) => key_points
                    .get(usize::from(*n) - 1)
                    .is_some_and(|p| !p.is_empty()),
                _ => true,
            })
            .map(|kind| {
                let t = timings.for_kind(kind);
                Scene {
                    kind,
                    duration_secs: t.duration_secs,
                    fade_in_secs: t.fade_in_secs,
                }
            })
            .collect();
        Ok(Self { scenes })
    }

    /// Scenes in emission order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Kinds in emission order.
    pub fn kinds(&self) -> Vec<SceneKind> {
        self.scenes.iter().map(|s| s.kind).collect()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false` for a built plan (intro, title and CTA are unconditional).
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Sum of scene durations.
    pub fn total_duration_secs(&self) -> f64 {
        self.scenes.iter().map(|s| s.duration_secs).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/plan.rs"]
mod tests;
