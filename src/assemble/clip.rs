use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::Frame;
use crate::scene::plan::{Scene, ScenePlan};

/// Counters returned by [`assemble`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AssemblyStats {
    /// Frames pushed to the sink.
    pub frames_written: u64,
    /// `frames_written` expressed in seconds at the output rate.
    pub duration_secs: f64,
}

/// Output frames each scene of `plan` occupies, in plan order.
///
/// Boundaries are rounded on the cumulative timeline, so scene `k` gets
/// `round(end_k * fps) - round(start_k * fps)` frames and the total never drifts more than
/// half a frame from the summed durations.
pub fn scene_frame_counts(plan: &ScenePlan, fps: Fps) -> Vec<u64> {
    let mut start_secs = 0.0f64;
    let mut start_frame = 0u64;
    plan.scenes()
        .iter()
        .map(|scene| {
            let end_secs = start_secs + scene.duration_secs;
            let end_frame = fps.secs_to_frames_round(end_secs).max(start_frame);
            let count = end_frame - start_frame;
            start_secs = end_secs;
            start_frame = end_frame;
            count
        })
        .collect()
}

/// Fade-from-black factor for local frame `i` of `scene`, in `0.0..=1.0`.
pub fn fade_factor(scene: &Scene, fps: Fps, i: u64) -> f64 {
    if scene.fade_in_secs <= 0.0 {
        return 1.0;
    }
    (fps.frames_to_secs(i) / scene.fade_in_secs).clamp(0.0, 1.0)
}

/// Hold each scene's frame for its duration, fading in from black, and stream the result
/// into `sink` in plan order.
///
/// `frames[i]` is the composed frame for `plan.scenes()[i]`.
pub fn assemble(
    plan: &ScenePlan,
    frames: &[Frame],
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> ReelResult<AssemblyStats> {
    if plan.len() != frames.len() {
        return Err(ReelError::validation(format!(
            "scene plan has {} scenes but {} frames were composed",
            plan.len(),
            frames.len()
        )));
    }
    let first = frames
        .first()
        .ok_or_else(|| ReelError::validation("cannot assemble an empty scene plan"))?;
    let (width, height) = (first.width, first.height);
    if let Some(bad) = frames
        .iter()
        .find(|f| f.width != width || f.height != height)
    {
        return Err(ReelError::validation(format!(
            "frame size mismatch: got {}x{}, expected {width}x{height}",
            bad.width, bad.height
        )));
    }

    sink.begin(SinkConfig { width, height, fps })?;

    let mut next = 0u64;
    let mut scratch = first.clone();
    let counts = scene_frame_counts(plan, fps);
    for ((scene, frame), count) in plan.scenes().iter().zip(frames).zip(counts) {
        tracing::debug!(scene = %scene.kind, frames = count, "assemble scene");
        for i in 0..count {
            let factor = fade_factor(scene, fps, i);
            if factor < 1.0 {
                fade_into(&mut scratch, frame, factor);
                sink.push_frame(FrameIndex(next), &scratch)?;
            } else {
                sink.push_frame(FrameIndex(next), frame)?;
            }
            next += 1;
        }
    }

    sink.end()?;
    Ok(AssemblyStats {
        frames_written: next,
        duration_secs: fps.frames_to_secs(next),
    })
}

/// Scale colour channels towards black; alpha is preserved.
fn fade_into(dst: &mut Frame, src: &Frame, factor: f64) {
    let f = (factor.clamp(0.0, 1.0) * 255.0).round() as u16;
    dst.width = src.width;
    dst.height = src.height;
    dst.premultiplied = src.premultiplied;
    dst.data.resize(src.data.len(), 0);
    for (d, s) in dst.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
        d[0] = mul_div255_u16(u16::from(s[0]), f) as u8;
        d[1] = mul_div255_u16(u16::from(s[1]), f) as u8;
        d[2] = mul_div255_u16(u16::from(s[2]), f) as u8;
        d[3] = s[3];
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/clip.rs"]
mod tests;
