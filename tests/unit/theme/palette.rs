use super::*;

#[test]
fn known_keys_resolve_to_their_accent() {
    assert_eq!(resolve_theme("japan").accent, Rgb8::new(0xBC, 0x00, 0x2D));
    assert_eq!(resolve_theme("saudi").accent, Rgb8::new(0x00, 0x6C, 0x35));
    assert_eq!(resolve_theme("brunei").accent, Rgb8::new(0xF7, 0xE0, 0x17));
    assert_eq!(resolve_theme("uae").accent, Rgb8::new(0xD4, 0xAF, 0x37));
}

#[test]
fn unknown_and_empty_keys_fall_back_to_default() {
    assert_eq!(resolve_theme("atlantis"), Theme::default());
    assert_eq!(resolve_theme(""), Theme::default());
    // Lookup is exact; callers normalise case first.
    assert_eq!(resolve_theme("JAPAN"), Theme::default());
}

#[test]
fn all_themes_share_the_navy_gradient() {
    for c in known_countries() {
        assert_eq!(c.theme.background_top, Rgb8::new(10, 15, 40));
        assert_eq!(c.theme.background_bottom, Rgb8::new(20, 35, 80));
    }
}

#[test]
fn labels_fall_back_to_upper_cased_key() {
    assert_eq!(country_label("saudi"), "Saudi Arabia");
    assert_eq!(country_label("oman"), "OMAN");
    assert_eq!(country_label(""), "");
}
