//! Encoding sinks.
//!
//! Sinks consume composed frames in timeline order; the clip assembler drives them.

/// `ffmpeg`-based MP4 output.
pub(crate) mod ffmpeg;
/// `ffprobe` duration probing.
pub(crate) mod probe;
/// Generic frame sink trait and the in-memory sink.
pub(crate) mod sink;
