use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Decorative country flags drawn beside the country label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Flag {
    /// United Arab Emirates.
    Uae,
    /// Saudi Arabia (simplified, no inscription).
    Saudi,
    /// Brunei (simplified, emblem reduced to a disc).
    Brunei,
    /// Japan.
    Japan,
}

/// Flags are authored on a 30x20 (3:2) view box.
const VIEW_BOX: (f32, f32) = (30.0, 20.0);

impl Flag {
    /// SVG source for the flag.
    pub fn svg(self) -> &'static str {
        match self {
            Flag::Uae => {
                r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 20" width="30" height="20">
<rect width="30" height="20" fill="#ffffff"/>
<rect width="30" height="6.67" fill="#00732f"/>
<rect y="13.33" width="30" height="6.67" fill="#000000"/>
<rect width="8" height="20" fill="#ff0000"/>
</svg>"##
            }
            Flag::Saudi => {
                r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 20" width="30" height="20">
<rect width="30" height="20" fill="#006c35"/>
<rect x="7" y="7" width="16" height="2" rx="0.6" fill="#ffffff"/>
<rect x="8" y="12.5" width="14" height="1.2" rx="0.6" fill="#ffffff"/>
</svg>"##
            }
            Flag::Brunei => {
                r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 20" width="30" height="20">
<rect width="30" height="20" fill="#f7e017"/>
<polygon points="0,4 30,14 30,17.5 0,7.5" fill="#ffffff"/>
<polygon points="0,7.5 30,17.5 30,21 0,11" fill="#000000"/>
<circle cx="15" cy="10.5" r="3.4" fill="#cf1126"/>
</svg>"##
            }
            Flag::Japan => {
                r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 20" width="30" height="20">
<rect width="30" height="20" fill="#ffffff"/>
<circle cx="15" cy="10" r="6" fill="#bc002d"/>
</svg>"##
            }
        }
    }

    /// Raster width for a given raster height, keeping the 3:2 aspect.
    pub fn width_for_height(height: u32) -> u32 {
        ((height as f32) * VIEW_BOX.0 / VIEW_BOX.1).round().max(1.0) as u32
    }

    /// Rasterize the flag at `height` pixels (width follows the aspect ratio).
    pub fn rasterize(self, height: u32) -> ReelResult<FlagRaster> {
        if height == 0 {
            return Err(ReelError::validation("flag raster height must be > 0"));
        }
        let width = Self::width_for_height(height);

        let tree = usvg::Tree::from_str(self.svg(), &usvg::Options::default())
            .with_context(|| format!("parse {self:?} flag svg"))?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| ReelError::render("failed to allocate flag pixmap"))?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        Ok(FlagRaster {
            width,
            height,
            rgba8_premul: pixmap.data().to_vec(),
        })
    }
}

/// Rasterized flag in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct FlagRaster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes.
    pub rgba8_premul: Vec<u8>,
}

#[cfg(test)]
#[path = "../../tests/unit/theme/flags.rs"]
mod tests;
