use crate::article::payload::{ArticlePayload, KEY_POINT_SLOTS};
use crate::config::BrandConfig;
use crate::foundation::core::{Canvas, Rect, Rgb8, RoundedRect};
use crate::foundation::error::ReelResult;
use crate::render::draw::{Painter, Shadow};
use crate::render::frame::Frame;
use crate::scene::plan::SceneKind;
use crate::text::font::{FontHandle, FontWeight, ScriptHint};
use crate::text::resolver::FontResolver;
use crate::text::wrap::wrap;
use crate::theme::flags::Flag;
use crate::theme::palette::{Theme, country_label, country_profile};

const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
const MUTED: Rgb8 = Rgb8::new(180, 190, 210);
const SHADOW_RGBA: [u8; 4] = [0, 0, 0, 120];
const SHADOW_OFFSET: f64 = 2.0;
// Reference-layout margin kept clear on both sides of single-line labels.
const SIDE_MARGIN: f64 = 70.0;

/// Maximum wrapped headline lines on the title scene.
pub const TITLE_MAX_LINES: usize = 6;
/// Maximum wrapped lines of key-point text.
pub const KEY_POINT_MAX_LINES: usize = 8;
/// Maximum wrapped hashtag lines on the call-to-action scene.
pub const HASHTAG_MAX_LINES: usize = 4;

/// Text fields a frame can show, already normalised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneContent {
    /// Article headline.
    pub title: String,
    /// Exactly three key points; empty slots are never composed.
    pub key_points: [String; KEY_POINT_SLOTS],
    /// Lower-cased country key.
    pub country_key: String,
    /// Genre badge label (no badge when empty).
    pub genre: String,
    /// Normalised hashtag line (omitted when empty).
    pub hashtags: String,
}

impl SceneContent {
    /// Trimmed, normalised drawing inputs for `payload`.
    pub fn from_payload(payload: &ArticlePayload) -> Self {
        Self {
            title: payload.title.trim().to_string(),
            key_points: payload.normalized_key_points(),
            country_key: payload.country_key(),
            genre: payload.genre.trim().to_string(),
            hashtags: payload.hashtag_line(),
        }
    }

    /// Text of key point `n` (1-based), empty when out of range.
    pub fn key_point(&self, n: u8) -> &str {
        usize::from(n)
            .checked_sub(1)
            .and_then(|i| self.key_points.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Draws one complete frame per scene kind.
///
/// Layout coordinates are authored for a 1080-px-wide canvas and scaled to the configured one.
/// Composition is deterministic: identical inputs give byte-identical frames.
#[derive(Clone, Debug)]
pub struct FrameCompositor {
    canvas: Canvas,
    brand: BrandConfig,
}

impl FrameCompositor {
    /// Compositor drawing `brand` strings onto `canvas`-sized frames.
    pub fn new(canvas: Canvas, brand: BrandConfig) -> Self {
        Self { canvas, brand }
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Compose the frame for `kind`. Fails only on raster errors.
    pub fn compose(
        &self,
        kind: SceneKind,
        theme: &Theme,
        fonts: &FontResolver,
        content: &SceneContent,
    ) -> ReelResult<Frame> {
        tracing::debug!(scene = %kind, "compose frame");
        let mut s = Stage {
            painter: Painter::new(self.canvas)?,
            scale: self.canvas.layout_scale(),
            width: f64::from(self.canvas.width),
            fonts,
            theme,
        };
        s.painter
            .vertical_gradient(theme.background_top, theme.background_bottom);

        match kind {
            SceneKind::Intro => self.intro(&mut s, content)?,
            SceneKind::Title => self.title(&mut s, content),
            SceneKind::KeyPoint(n) => self.key_point(&mut s, n, content.key_point(n)),
            SceneKind::CallToAction => self.call_to_action(&mut s, content),
        }
        Ok(s.painter.finish())
    }

    fn intro(&self, s: &mut Stage<'_>, content: &SceneContent) -> ReelResult<()> {
        let wordmark = s.font(72.0, FontWeight::Bold, ScriptHint::Latin);
        s.centered_line(&wordmark, &self.brand.wordmark, 700.0, WHITE);
        s.rule(800.0, 200.0, 5.0);

        let label = country_label(&content.country_key);
        if !label.is_empty() {
            let flag = country_profile(&content.country_key).map(|c| c.flag);
            s.country_line(&label, flag, 840.0)?;
        }

        if !content.genre.is_empty() {
            s.badge(&content.genre, 940.0);
        }

        let tagline = s.font(28.0, FontWeight::Regular, ScriptHint::Cjk);
        s.centered_line(&tagline, &self.brand.tagline, 1100.0, MUTED);
        Ok(())
    }

    fn title(&self, s: &mut Stage<'_>, content: &SceneContent) {
        s.rule(600.0, 160.0, 4.0);

        let font = s.font(56.0, FontWeight::Bold, ScriptHint::Cjk);
        let lines = wrap(
            &content.title,
            &font,
            s.px_f32(1080.0 - 140.0),
            TITLE_MAX_LINES,
        );
        let (start, line_height) = (660.0, 80.0);
        s.block(&font, &lines, start, line_height, WHITE);

        let caption = s.font(26.0, FontWeight::Regular, ScriptHint::Cjk);
        let caption_top = start + (lines.len() as f64) * line_height + 60.0;
        s.centered_line(&caption, &self.brand.site, caption_top, MUTED);
    }

    fn key_point(&self, s: &mut Stage<'_>, n: u8, text: &str) {
        let numeral = s.font(120.0, FontWeight::Bold, ScriptHint::Latin);
        let accent = s.theme.accent.lighten(60);
        s.centered_line(&numeral, &n.to_string(), 550.0, accent);
        s.rule(710.0, 80.0, 3.0);

        let font = s.font(44.0, FontWeight::Bold, ScriptHint::Cjk);
        let lines = wrap(text, &font, s.px_f32(1080.0 - 160.0), KEY_POINT_MAX_LINES);
        s.block(&font, &lines, 750.0, 68.0, WHITE);
    }

    fn call_to_action(&self, s: &mut Stage<'_>, content: &SceneContent) {
        let wordmark = s.font(52.0, FontWeight::Bold, ScriptHint::Latin);
        s.centered_line(&wordmark, &self.brand.wordmark, 650.0, WHITE);
        s.rule(730.0, 160.0, 4.0);

        let site = s.font(40.0, FontWeight::Bold, ScriptHint::Cjk);
        s.centered_line(&site, &self.brand.site, 770.0, WHITE);

        if !content.hashtags.is_empty() {
            let font = s.font(30.0, FontWeight::Regular, ScriptHint::Cjk);
            let lines = wrap(
                &content.hashtags,
                &font,
                s.px_f32(1080.0 - 120.0),
                HASHTAG_MAX_LINES,
            );
            s.block(&font, &lines, 870.0, 48.0, MUTED);
        }
    }
}

/// Per-frame drawing state; all `f64` positions passed in are reference-layout units.
struct Stage<'a> {
    painter: Painter,
    scale: f64,
    width: f64,
    fonts: &'a FontResolver,
    theme: &'a Theme,
}

impl Stage<'_> {
    fn px(&self, v: f64) -> f64 {
        v * self.scale
    }

    fn px_f32(&self, v: f64) -> f32 {
        self.px(v) as f32
    }

    fn font(&self, size: f64, weight: FontWeight, script: ScriptHint) -> FontHandle {
        let size_px = self.px(size).max(1.0) as f32;
        self.fonts.resolve_font(size_px, weight, script)
    }

    fn shadow(&self) -> Shadow {
        Shadow {
            rgba: SHADOW_RGBA,
            offset: self.px(SHADOW_OFFSET),
        }
    }

    fn centered_x(&self, content_width: f64) -> f64 {
        ((self.width - content_width) / 2.0).floor()
    }

    fn centered_line(&mut self, font: &FontHandle, text: &str, top: f64, color: Rgb8) {
        if text.is_empty() {
            return;
        }
        let x = self.centered_x(f64::from(font.measure(text)));
        let shadow = self.shadow();
        let top = self.px(top);
        self.painter
            .shadowed_text(font, text, x, top, color.with_alpha(255), shadow);
    }

    fn block(&mut self, font: &FontHandle, lines: &[String], start: f64, line_height: f64, color: Rgb8) {
        for (i, line) in lines.iter().enumerate() {
            self.centered_line(font, line, start + (i as f64) * line_height, color);
        }
    }

    fn rule(&mut self, top: f64, width: f64, thickness: f64) {
        let w = self.px(width).round();
        let x = self.centered_x(w);
        let y = self.px(top).round();
        let t = self.px(thickness).max(1.0).round();
        self.painter
            .fill_rect(Rect::new(x, y, x + w, y + t), self.theme.accent.with_alpha(255));
    }

    /// Widest single line allowed inside the side margins.
    fn max_line_width(&self) -> f64 {
        self.px(1080.0 - 2.0 * SIDE_MARGIN)
    }

    fn country_line(&mut self, label: &str, flag: Option<Flag>, top: f64) -> ReelResult<()> {
        let font = self.font(48.0, FontWeight::Bold, ScriptHint::Cjk);
        let Some(flag) = flag else {
            let label = single_line(label, &font, self.max_line_width());
            self.centered_line(&font, &label, top, WHITE);
            return Ok(());
        };

        let metrics = font.line_metrics();
        let flag_h = (f64::from(font.size_px()) * 0.75).round().max(1.0) as u32;
        let raster = flag.rasterize(flag_h)?;
        let gap = self.px(16.0).round();
        let label = single_line(
            label,
            &font,
            self.max_line_width() - f64::from(raster.width) - gap,
        );
        let label = label.as_str();
        let text_w = f64::from(font.measure(label));
        let total = f64::from(raster.width) + gap + text_w;

        let x0 = self.centered_x(total);
        let top = self.px(top);
        let line_h = f64::from(metrics.ascent + metrics.descent);
        let flag_y = top + (line_h - f64::from(raster.height)) / 2.0;
        self.painter.raster(&raster, x0, flag_y)?;

        let shadow = self.shadow();
        self.painter.shadowed_text(
            &font,
            label,
            x0 + f64::from(raster.width) + gap,
            top,
            WHITE.with_alpha(255),
            shadow,
        );
        Ok(())
    }

    fn badge(&mut self, label: &str, top: f64) {
        let font = self.font(32.0, FontWeight::Bold, ScriptHint::Cjk);
        let metrics = font.line_metrics();
        let (pad_x, pad_y) = (self.px(24.0).round(), self.px(10.0).round());
        let label = single_line(label, &font, self.max_line_width() - pad_x * 2.0);
        if label.is_empty() {
            return;
        }
        let text_w = f64::from(font.measure(&label));
        let text_h = f64::from(metrics.ascent + metrics.descent);

        let w = text_w + pad_x * 2.0;
        let h = text_h + pad_y * 2.0;
        let x = self.centered_x(w);
        let y = self.px(top).round();
        let radius = self.px(12.0);

        self.painter.fill_rounded_rect(
            RoundedRect::new(x, y, x + w, y + h, radius),
            self.theme.accent.with_alpha(255),
        );
        self.painter
            .text(&font, &label, x + pad_x, y + pad_y, WHITE.with_alpha(255));
    }
}

/// `text` on one line, ellipsized to `max_width`.
fn single_line(text: &str, font: &FontHandle, max_width: f64) -> String {
    wrap(text, font, max_width.max(0.0) as f32, 1)
        .into_iter()
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
