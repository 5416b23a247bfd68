use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Rect, RoundedRect};

/// Zero-based index of an output video frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output frame rate as a rational `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator (must be > 0).
    pub den: u32,
}

impl Fps {
    /// Construct a validated frame rate.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as `f64`.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to a frame count, rounding to the nearest frame.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Width the reference layout coordinates are expressed in.
    pub const REFERENCE_WIDTH: f64 = 1080.0;

    /// The 9:16 vertical canvas used by short-form platforms.
    pub const VERTICAL_1080: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Multiplier mapping reference layout units onto this canvas.
    pub fn layout_scale(self) -> f64 {
        f64::from(self.width) / Self::REFERENCE_WIDTH
    }

    /// Reject zero or odd dimensions (yuv420p output needs even sizes).
    pub fn validate(self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::VERTICAL_1080
    }
}

/// Opaque 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(ReelError::validation(format!(
                "expected #RRGGBB colour, got \"{s}\""
            )));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16)
                .map_err(|_| ReelError::validation(format!("invalid hex colour \"{s}\"")))
        };
        Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1), truncating like integer raster code.
    pub fn lerp(self, other: Rgb8, t: f64) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.clamp(0.0, 255.0) as u8
        };
        Rgb8::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Add `delta` to every channel, saturating at 255.
    pub fn lighten(self, delta: u8) -> Rgb8 {
        Rgb8::new(
            self.r.saturating_add(delta),
            self.g.saturating_add(delta),
            self.b.saturating_add(delta),
        )
    }

    /// Straight-alpha RGBA8 with the given alpha.
    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
