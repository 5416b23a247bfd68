use std::sync::Arc;

use kurbo::Shape as _;
use vello_cpu::peniko::Color;

use crate::foundation::core::{Canvas, Rect, Rgb8, RoundedRect};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::Frame;
use crate::text::font::FontHandle;
use crate::theme::flags::FlagRaster;

/// Drop shadow drawn under text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Straight-alpha shadow colour.
    pub rgba: [u8; 4],
    /// Offset in pixels, applied to both axes.
    pub offset: f64,
}

/// Immediate-mode drawing on top of a `vello_cpu` render context.
///
/// Commands are recorded in call order and rasterized by [`Painter::finish`].
pub(crate) struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    opaque: bool,
}

impl Painter {
    pub(crate) fn new(canvas: Canvas) -> ReelResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ReelError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ReelError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ReelError::render("canvas must be non-empty"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
            opaque: false,
        })
    }

    /// Top-to-bottom blend filled one scanline at a time.
    pub(crate) fn vertical_gradient(&mut self, top: Rgb8, bottom: Rgb8) {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for y in 0..self.height {
            let y = f64::from(y);
            let c = top.lerp(bottom, y / h);
            self.ctx.set_paint(Color::from_rgba8(c.r, c.g, c.b, 255));
            self.ctx
                .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, y, w, y + 1.0));
        }
        self.opaque = true;
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, rgba: [u8; 4]) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub(crate) fn fill_rounded_rect(&mut self, rect: RoundedRect, rgba: [u8; 4]) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));
        self.ctx.fill_path(&bezpath_to_cpu(&rect.to_path(0.1)));
    }

    /// Draw one line of text with its line box's top-left corner at `(x, top)`.
    pub(crate) fn text(&mut self, font: &FontHandle, text: &str, x: f64, top: f64, rgba: [u8; 4]) {
        let metrics = font.line_metrics();
        let baseline = top + f64::from(metrics.ascent);
        let meter = font.meter();

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));

        match font.font_data() {
            Some(data) => {
                let mut pen = x as f32;
                let glyphs: Vec<vello_cpu::Glyph> = text
                    .chars()
                    .map(|ch| {
                        let (id, advance) = meter.glyph(ch);
                        let g = vello_cpu::Glyph {
                            id,
                            x: pen,
                            y: baseline as f32,
                        };
                        pen += advance;
                        g
                    })
                    .collect();
                self.ctx
                    .glyph_run(data)
                    .font_size(font.size_px())
                    .fill_glyphs(glyphs.into_iter());
            }
            None => {
                // Builtin face: one box per visible character.
                let size = f64::from(font.size_px());
                let mut pen = x;
                for ch in text.chars() {
                    let advance = f64::from(meter.advance(ch));
                    if !ch.is_whitespace() && advance > 0.0 {
                        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                            pen + advance * 0.1,
                            baseline - size * 0.7,
                            pen + advance * 0.9,
                            baseline,
                        ));
                    }
                    pen += advance;
                }
            }
        }
    }

    /// Two-pass text: offset shadow first, then the fill on top.
    pub(crate) fn shadowed_text(
        &mut self,
        font: &FontHandle,
        text: &str,
        x: f64,
        top: f64,
        rgba: [u8; 4],
        shadow: Shadow,
    ) {
        self.text(font, text, x + shadow.offset, top + shadow.offset, shadow.rgba);
        self.text(font, text, x, top, rgba);
    }

    /// Blit a premultiplied raster with its top-left corner at `(x, y)`.
    pub(crate) fn raster(&mut self, raster: &FlagRaster, x: f64, y: f64) -> ReelResult<()> {
        let pixmap = pixmap_from_premul_bytes(&raster.rgba8_premul, raster.width, raster.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x.round(), y.round())));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(raster.width),
            f64::from(raster.height),
        ));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    /// Rasterize every recorded command into a premultiplied frame.
    ///
    /// Once a gradient has covered the canvas, alpha is pinned to 255: the u8 pipeline can
    /// leave anti-aliased edges drawn over it at 253..254.
    pub(crate) fn finish(mut self) -> Frame {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        let mut data = pixmap.data_as_u8_slice().to_vec();
        if self.opaque {
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        Frame {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        }
    }
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ReelError::render("raster width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ReelError::render("raster height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ReelError::render("raster byte length mismatch"));
    }
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
