use std::path::{Path, PathBuf};

use anyhow::Context as _;
use skrifa::instance::{LocationRef, Size};
use skrifa::string::StringId;
use skrifa::{FontRef, GlyphId, MetadataProvider};
use vello_cpu::peniko::{Blob, FontData};

use crate::foundation::error::{ReelError, ReelResult};

/// Requested stroke weight.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Normal text.
    Regular,
    /// Headlines and wordmarks.
    Bold,
}

impl FontWeight {
    /// The other weight, used as the next probe when the requested one is missing.
    pub fn other(self) -> Self {
        match self {
            FontWeight::Regular => FontWeight::Bold,
            FontWeight::Bold => FontWeight::Regular,
        }
    }
}

/// Script coverage a caller needs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ScriptHint {
    /// Japanese/CJK or mixed-script text.
    Cjk,
    /// Pure ASCII decorative text (wordmarks, numerals).
    Latin,
}

impl ScriptHint {
    /// The other script, used as the last probe tier.
    pub fn other(self) -> Self {
        match self {
            ScriptHint::Cjk => ScriptHint::Latin,
            ScriptHint::Latin => ScriptHint::Cjk,
        }
    }
}

/// Where a resolved face came from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum FontOrigin {
    /// A configured or platform candidate path.
    Candidate(PathBuf),
    /// Found by the recursive font-directory scan.
    Scanned(PathBuf),
    /// The built-in box font (no real glyphs).
    Builtin,
}

#[derive(Clone)]
enum FaceKind {
    Outline(FontData),
    Builtin,
}

/// A loaded, validated font face independent of size.
#[derive(Clone)]
pub struct FontFace {
    kind: FaceKind,
    origin: FontOrigin,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = match &self.kind {
            FaceKind::Outline(data) => data.data.data().len(),
            FaceKind::Builtin => 0,
        };
        f.debug_struct("FontFace")
            .field("origin", &self.origin)
            .field("font_bytes_len", &bytes)
            .finish()
    }
}

impl FontFace {
    /// The built-in fallback face.
    ///
    /// It has no outlines: glyphs are drawn as boxes with fixed advances (1em for wide CJK
    /// characters, 0.6em otherwise). Layout stays correct, legibility does not.
    pub fn builtin() -> Self {
        Self {
            kind: FaceKind::Builtin,
            origin: FontOrigin::Builtin,
        }
    }

    /// Load and validate face 0 of a font file (`.ttf`, `.otf` or `.ttc`).
    pub fn load(path: &Path, origin: FontOrigin) -> ReelResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes, 0, origin)
    }

    /// Validate raw font bytes and wrap them as a face.
    pub fn from_bytes(bytes: Vec<u8>, index: u32, origin: FontOrigin) -> ReelResult<Self> {
        {
            let font = FontRef::from_index(&bytes, index)
                .map_err(|e| ReelError::validation(format!("unreadable font data: {e}")))?;
            if font.charmap().map('A').is_none() && font.charmap().map('あ').is_none() {
                return Err(ReelError::validation(
                    "font has no usable character map (no 'A' or 'あ')",
                ));
            }
        }
        Ok(Self {
            kind: FaceKind::Outline(FontData::new(Blob::from(bytes), index)),
            origin,
        })
    }

    /// Where this face was found.
    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// `true` for the built-in box font.
    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, FaceKind::Builtin)
    }

    /// Family name from the `name` table, if any.
    pub fn family_name(&self) -> Option<String> {
        let FaceKind::Outline(data) = &self.kind else {
            return Some("builtin".to_string());
        };
        let font = FontRef::from_index(data.data.data(), data.index).ok()?;
        font.localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
            .map(|s| s.to_string())
    }

    /// Check whether the face maps `ch` to a real glyph.
    pub fn covers(&self, ch: char) -> bool {
        match &self.kind {
            FaceKind::Outline(data) => FontRef::from_index(data.data.data(), data.index)
                .map(|f| f.charmap().map(ch).is_some())
                .unwrap_or(false),
            FaceKind::Builtin => false,
        }
    }

    /// Bind the face to a pixel size.
    pub fn at_size(&self, size_px: f32) -> FontHandle {
        FontHandle {
            face: self.clone(),
            size_px,
        }
    }
}

/// A face bound to a pixel size: the unit text layout and drawing work with.
#[derive(Clone, Debug)]
pub struct FontHandle {
    face: FontFace,
    size_px: f32,
}

/// Vertical metrics in pixels (both positive).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
}

impl FontHandle {
    /// The built-in face at `size_px`.
    pub fn builtin(size_px: f32) -> Self {
        FontFace::builtin().at_size(size_px)
    }

    /// Pixel size.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Underlying face.
    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Same face at another size.
    pub fn with_size(&self, size_px: f32) -> Self {
        self.face.at_size(size_px)
    }

    /// Per-character measuring helper. Build once per string/paragraph, not per character.
    pub fn meter(&self) -> GlyphMeter<'_> {
        let kind = match &self.face.kind {
            FaceKind::Outline(data) => match FontRef::from_index(data.data.data(), data.index) {
                Ok(font) => MeterKind::Outline {
                    charmap: font.charmap(),
                    metrics: font.glyph_metrics(Size::new(self.size_px), LocationRef::default()),
                },
                // Validated at load time; treat a late parse failure like the builtin face.
                Err(_) => MeterKind::Builtin,
            },
            FaceKind::Builtin => MeterKind::Builtin,
        };
        GlyphMeter {
            kind,
            size_px: self.size_px,
        }
    }

    /// Width of `text` in pixels: the sum of per-character advances (no kerning, no shaping).
    pub fn measure(&self, text: &str) -> f32 {
        self.meter().measure(text)
    }

    /// Ascent/descent in pixels.
    pub fn line_metrics(&self) -> LineMetrics {
        if let FaceKind::Outline(data) = &self.face.kind
            && let Ok(font) = FontRef::from_index(data.data.data(), data.index)
        {
            let m = font.metrics(Size::new(self.size_px), LocationRef::default());
            return LineMetrics {
                ascent: m.ascent,
                descent: -m.descent,
            };
        }
        LineMetrics {
            ascent: self.size_px * 0.8,
            descent: self.size_px * 0.2,
        }
    }

    pub(crate) fn font_data(&self) -> Option<&FontData> {
        match &self.face.kind {
            FaceKind::Outline(data) => Some(data),
            FaceKind::Builtin => None,
        }
    }
}

enum MeterKind<'a> {
    Outline {
        charmap: skrifa::charmap::Charmap<'a>,
        metrics: skrifa::metrics::GlyphMetrics<'a>,
    },
    Builtin,
}

/// Glyph lookup and advance measurement bound to one [`FontHandle`].
pub struct GlyphMeter<'a> {
    kind: MeterKind<'a>,
    size_px: f32,
}

impl GlyphMeter<'_> {
    /// Glyph id and horizontal advance for `ch`. Unmapped characters use `.notdef`.
    pub fn glyph(&self, ch: char) -> (u32, f32) {
        match &self.kind {
            MeterKind::Outline { charmap, metrics } => {
                let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
                let advance = metrics
                    .advance_width(gid)
                    .unwrap_or(self.size_px * 0.6);
                (gid.to_u32(), advance)
            }
            MeterKind::Builtin => (0, builtin_advance(ch, self.size_px)),
        }
    }

    /// Horizontal advance of one character.
    pub fn advance(&self, ch: char) -> f32 {
        self.glyph(ch).1
    }

    /// Sum of advances, accumulated left to right.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().fold(0.0f32, |w, ch| w + self.advance(ch))
    }
}

fn builtin_advance(ch: char, size_px: f32) -> f32 {
    if ch.is_control() {
        0.0
    } else if ch.is_whitespace() && !is_wide(ch) {
        size_px * 0.3
    } else if is_wide(ch) {
        size_px
    } else {
        size_px * 0.6
    }
}

/// East Asian wide/fullwidth ranges (coarse).
pub(crate) fn is_wide(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1F64F
            | 0x20000..=0x3FFFD
    )
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
