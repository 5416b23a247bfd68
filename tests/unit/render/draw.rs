use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 40,
        height: 80,
    }
}

#[test]
fn gradient_blends_per_scanline() {
    let mut p = Painter::new(canvas()).unwrap();
    p.vertical_gradient(Rgb8::new(0, 0, 0), Rgb8::new(200, 100, 40));
    let f = p.finish();
    assert_eq!(f.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(f.pixel(39, 0), [0, 0, 0, 255]);
    // Row 40 of 80 is exactly half way.
    assert_eq!(f.pixel(10, 40), [100, 50, 20, 255]);
    let last = f.pixel(5, 79);
    assert!(last[0] > 190 && last[0] < 200);
    assert!(f.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn rects_paint_over_the_background() {
    let mut p = Painter::new(canvas()).unwrap();
    p.vertical_gradient(Rgb8::new(0, 0, 0), Rgb8::new(0, 0, 0));
    p.fill_rect(Rect::new(10.0, 10.0, 20.0, 14.0), [255, 0, 0, 255]);
    let f = p.finish();
    assert_eq!(f.pixel(15, 12), [255, 0, 0, 255]);
    assert_eq!(f.pixel(15, 20), [0, 0, 0, 255]);
}

#[test]
fn rounded_rect_leaves_corners_unpainted() {
    let mut p = Painter::new(canvas()).unwrap();
    p.vertical_gradient(Rgb8::new(0, 0, 0), Rgb8::new(0, 0, 0));
    p.fill_rounded_rect(RoundedRect::new(0.0, 0.0, 40.0, 40.0, 12.0), [0, 255, 0, 255]);
    let f = p.finish();
    assert_eq!(f.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(f.pixel(20, 20), [0, 255, 0, 255]);
}

#[test]
fn builtin_text_and_shadow_both_draw() {
    let font = FontHandle::builtin(20.0);
    let shadow = Shadow {
        rgba: [0, 0, 0, 120],
        offset: 2.0,
    };
    let mut p = Painter::new(canvas()).unwrap();
    p.vertical_gradient(Rgb8::new(0, 0, 255), Rgb8::new(0, 0, 255));
    p.shadowed_text(&font, "A", 4.0, 10.0, [255, 255, 255, 255], shadow);
    let f = p.finish();
    // Box spans x 5.2..14.8, y 12..26 (baseline 26).
    assert_eq!(f.pixel(10, 20), [255, 255, 255, 255]);
    // Shadow-only strip just right of the box.
    let s = f.pixel(16, 25);
    assert!(s[2] < 255 && s[2] > 100, "{s:?}");
    // Untouched background.
    assert_eq!(f.pixel(30, 60), [0, 0, 255, 255]);
}

#[test]
fn raster_blits_at_position() {
    let flag = crate::theme::flags::Flag::Japan.rasterize(20).unwrap();
    let mut p = Painter::new(canvas()).unwrap();
    p.vertical_gradient(Rgb8::new(0, 0, 0), Rgb8::new(0, 0, 0));
    p.raster(&flag, 5.0, 30.0).unwrap();
    let f = p.finish();
    assert_eq!(f.pixel(6, 31), [255, 255, 255, 255]);
    let center = f.pixel(20, 40);
    assert!(center[0] > 150 && center[1] < 40);
    assert_eq!(f.pixel(2, 2), [0, 0, 0, 255]);
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let err = Painter::new(Canvas {
        width: 70_000,
        height: 10,
    })
    .err()
    .unwrap();
    assert!(matches!(err, ReelError::Render(_)));
}

#[test]
fn antialiased_edges_over_the_gradient_stay_opaque() {
    let mut p = Painter::new(canvas()).unwrap();
    p.vertical_gradient(Rgb8::new(10, 15, 40), Rgb8::new(20, 35, 80));
    p.fill_rounded_rect(
        RoundedRect::new(3.3, 5.7, 31.6, 27.2, 7.5),
        [212, 175, 55, 230],
    );
    p.shadowed_text(
        &FontHandle::builtin(13.0),
        "AB",
        2.4,
        40.6,
        [255, 255, 255, 255],
        Shadow {
            rgba: [0, 0, 0, 120],
            offset: 1.5,
        },
    );
    let f = p.finish();
    assert!(f.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn without_a_background_coverage_is_kept() {
    let mut p = Painter::new(canvas()).unwrap();
    p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), [255, 0, 0, 255]);
    let f = p.finish();
    assert_eq!(f.pixel(5, 5), [255, 0, 0, 255]);
    assert_eq!(f.pixel(30, 60)[3], 0);
}

#[test]
fn outline_glyph_runs_paint_pixels() {
    use crate::text::font::{FontWeight, ScriptHint};

    let fonts = crate::text::resolver::FontResolver::default();
    let font = fonts.resolve_font(32.0, FontWeight::Bold, ScriptHint::Latin);
    if font.face().is_builtin() {
        eprintln!("skipping: no system font found");
        return;
    }
    let canvas = Canvas {
        width: 120,
        height: 60,
    };
    let blank = {
        let mut p = Painter::new(canvas).unwrap();
        p.vertical_gradient(Rgb8::new(0, 0, 0), Rgb8::new(0, 0, 0));
        p.finish()
    };
    let mut p = Painter::new(canvas).unwrap();
    p.vertical_gradient(Rgb8::new(0, 0, 0), Rgb8::new(0, 0, 0));
    p.text(&font, "HW", 4.0, 8.0, [255, 255, 255, 255]);
    let f = p.finish();

    assert_ne!(f, blank);
    let lit = f.data.chunks_exact(4).filter(|px| px[0] > 128).count();
    assert!(lit > 20, "only {lit} lit pixels");
    assert!(f.data.chunks_exact(4).all(|px| px[3] == 255));
}
