use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Number of key-point slots a video carries.
pub const KEY_POINT_SLOTS: usize = 3;

/// Article fields consumed by one generation call.
///
/// The payload is read-only for the duration of a call. `body` is carried for reference only and
/// is never rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArticlePayload {
    /// Article headline.
    pub title: String,
    /// Full article text (not rendered).
    #[serde(default)]
    pub body: String,
    /// Extracted highlights, in display order.
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Country/region key such as `uae` or `japan`.
    #[serde(default)]
    pub country: String,
    /// Free-text hashtags, separated by spaces or commas.
    #[serde(default)]
    pub hashtags: String,
    /// Genre label shown as a badge on the intro scene.
    #[serde(default)]
    pub genre: String,
}

impl ArticlePayload {
    /// Read a single payload from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read article '{}'", path.display()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ReelError::serde(format!("parse article JSON '{}': {e}", path.display()))
        })
    }

    /// Read a JSON array of payloads (batch input).
    pub fn list_from_path(path: impl AsRef<Path>) -> ReelResult<Vec<Self>> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read articles '{}'", path.display()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ReelError::serde(format!("parse article list JSON '{}': {e}", path.display()))
        })
    }

    /// Key points padded or truncated to exactly [`KEY_POINT_SLOTS`] entries.
    ///
    /// Entries beyond the third are dropped; missing entries become empty strings. Entries are
    /// trimmed, so whitespace-only points count as empty.
    pub fn normalized_key_points(&self) -> [String; KEY_POINT_SLOTS] {
        let mut out: [String; KEY_POINT_SLOTS] = Default::default();
        for (slot, point) in out.iter_mut().zip(self.key_points.iter()) {
            *slot = point.trim().to_string();
        }
        out
    }

    /// Country key lower-cased and trimmed, as used for theme lookup and output paths.
    pub fn country_key(&self) -> String {
        self.country.trim().to_lowercase()
    }

    /// Hashtags normalised to `#tag` tokens joined by single spaces.
    pub fn hashtag_line(&self) -> String {
        normalize_hashtags(&self.hashtags)
    }
}

/// Split free-text hashtags on whitespace, `,` and `、`, prefixing `#` where missing.
pub fn normalize_hashtags(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == ',' || c == '、')
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "#")
        .map(|t| {
            if t.starts_with('#') || t.starts_with('＃') {
                t.to_string()
            } else {
                format!("#{t}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/article/payload.rs"]
mod tests;
