use super::*;

#[test]
fn from_rgba8_checks_length() {
    assert!(Frame::from_rgba8(2, 2, vec![0; 16], true).is_ok());
    assert!(Frame::from_rgba8(2, 2, vec![0; 15], true).is_err());
}

#[test]
fn straight_conversion_unpremultiplies_translucent_pixels() {
    let f = Frame::from_rgba8(2, 1, vec![64, 0, 0, 128, 10, 20, 30, 255], true).unwrap();
    assert_eq!(f.to_straight_rgba8(), vec![128, 0, 0, 128, 10, 20, 30, 255]);
    assert_eq!(f.pixel(1, 0), [10, 20, 30, 255]);
}

#[test]
fn save_png_writes_a_decodable_file() {
    let dir = std::env::temp_dir().join(format!("reelsmith_frame_png_{}", std::process::id()));
    let path = dir.join("nested").join("frame.png");
    let f = Frame::from_rgba8(3, 2, [1u8, 2, 3, 255].repeat(6), true).unwrap();
    f.save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3, 255]);
    std::fs::remove_dir_all(&dir).unwrap();
}
