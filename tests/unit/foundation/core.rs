use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
    assert!(Fps::new(24, 1).is_ok());
}

#[test]
fn fps_rounds_seconds_to_frames() {
    let fps = Fps::new(24, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(3.0), 72);
    assert_eq!(fps.secs_to_frames_round(0.6), 14);
    assert_eq!(fps.secs_to_frames_round(-1.0), 0);
    assert!((fps.frames_to_secs(768) - 32.0).abs() < 1e-9);
}

#[test]
fn canvas_validation_requires_even_non_zero() {
    assert!(Canvas::VERTICAL_1080.validate().is_ok());
    assert!(
        Canvas {
            width: 0,
            height: 10
        }
        .validate()
        .is_err()
    );
    assert!(
        Canvas {
            width: 11,
            height: 10
        }
        .validate()
        .is_err()
    );
}

#[test]
fn layout_scale_tracks_width() {
    let small = Canvas {
        width: 108,
        height: 192,
    };
    assert!((small.layout_scale() - 0.1).abs() < 1e-9);
    assert!((Canvas::VERTICAL_1080.layout_scale() - 1.0).abs() < 1e-9);
}

#[test]
fn hex_parsing_accepts_optional_hash() {
    assert_eq!(Rgb8::from_hex("#D4AF37").unwrap(), Rgb8::new(0xD4, 0xAF, 0x37));
    assert_eq!(Rgb8::from_hex("bc002d").unwrap(), Rgb8::new(0xBC, 0x00, 0x2D));
    assert!(Rgb8::from_hex("#12345").is_err());
    assert!(Rgb8::from_hex("#zzzzzz").is_err());
}

#[test]
fn lerp_endpoints_and_lighten_saturates() {
    let a = Rgb8::new(10, 15, 40);
    let b = Rgb8::new(20, 35, 80);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgb8::new(15, 25, 60));
    assert_eq!(Rgb8::new(250, 0, 100).lighten(60), Rgb8::new(255, 60, 160));
}
