use super::*;

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn args_describe_silent_h264_at_target_bitrate() {
    let mut opts = FfmpegSinkOpts::new("out/clip.mp4");
    opts.bitrate_kbps = 2500;
    let cfg = SinkConfig {
        width: 1080,
        height: 1920,
        fps: Fps::new(24, 1).unwrap(),
    };
    let args = opts.args(&cfg);
    let joined = args.join(" ");
    assert!(joined.starts_with("-y "));
    assert!(joined.contains("-f rawvideo -pix_fmt rgba -s 1080x1920 -r 24/1 -i pipe:0"));
    assert!(joined.contains("-an -c:v libx264 -b:v 2500k -pix_fmt yuv420p -movflags +faststart"));
    assert_eq!(args.last().map(String::as_str), Some("out/clip.mp4"));
}

#[test]
fn no_overwrite_uses_dash_n() {
    let mut opts = FfmpegSinkOpts::new("x.mp4");
    opts.overwrite = false;
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    };
    assert_eq!(opts.args(&cfg)[0], "-n");
}

#[test]
fn begin_rejects_odd_dimensions_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("reelsmith_odd_dims.mp4"),
    ));
    let err = sink
        .begin(SinkConfig {
            width: 3,
            height: 4,
            fps: Fps::new(24, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn push_before_begin_is_an_encode_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = Frame::from_rgba8(2, 2, vec![0; 16], true).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame),
        Err(ReelError::Encode(_))
    ));
}
