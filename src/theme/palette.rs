use crate::foundation::core::Rgb8;
use crate::theme::flags::Flag;

/// Colour theme resolved once per generation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Theme {
    /// Accent colour for rules, badges and numerals.
    pub accent: Rgb8,
    /// Gradient stop at the top scanline.
    pub background_top: Rgb8,
    /// Gradient stop at the bottom scanline.
    pub background_bottom: Rgb8,
}

const BACKGROUND_TOP: Rgb8 = Rgb8::new(10, 15, 40);
const BACKGROUND_BOTTOM: Rgb8 = Rgb8::new(20, 35, 80);

impl Theme {
    const fn with_accent(accent: Rgb8) -> Self {
        Self {
            accent,
            background_top: BACKGROUND_TOP,
            background_bottom: BACKGROUND_BOTTOM,
        }
    }
}

impl Default for Theme {
    /// Gold accent on the navy gradient.
    fn default() -> Self {
        Self::with_accent(Rgb8::new(0xD4, 0xAF, 0x37))
    }
}

/// Static description of a known country.
#[derive(Clone, Copy, Debug)]
pub struct CountryProfile {
    /// Lookup key (`uae`, `saudi`, ...).
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Decorative flag drawn next to the label.
    pub flag: Flag,
    /// Colour theme.
    pub theme: Theme,
}

static COUNTRIES: [CountryProfile; 4] = [
    CountryProfile {
        key: "uae",
        label: "UAE",
        flag: Flag::Uae,
        theme: Theme::with_accent(Rgb8::new(0xD4, 0xAF, 0x37)),
    },
    CountryProfile {
        key: "saudi",
        label: "Saudi Arabia",
        flag: Flag::Saudi,
        theme: Theme::with_accent(Rgb8::new(0x00, 0x6C, 0x35)),
    },
    CountryProfile {
        key: "brunei",
        label: "Brunei",
        flag: Flag::Brunei,
        theme: Theme::with_accent(Rgb8::new(0xF7, 0xE0, 0x17)),
    },
    CountryProfile {
        key: "japan",
        label: "Japan",
        flag: Flag::Japan,
        theme: Theme::with_accent(Rgb8::new(0xBC, 0x00, 0x2D)),
    },
];

/// Known country profiles in table order.
pub fn known_countries() -> &'static [CountryProfile] {
    &COUNTRIES
}

/// Exact-match lookup of a country profile.
pub fn country_profile(country_key: &str) -> Option<&'static CountryProfile> {
    COUNTRIES.iter().find(|c| c.key == country_key)
}

/// Map a country key to its theme; unmatched keys (including `""`) get [`Theme::default`].
pub fn resolve_theme(country_key: &str) -> Theme {
    country_profile(country_key)
        .map(|c| c.theme)
        .unwrap_or_default()
}

/// Display label for a country key: the table label, else the upper-cased key.
pub fn country_label(country_key: &str) -> String {
    match country_profile(country_key) {
        Some(c) => c.label.to_string(),
        None => country_key.to_uppercase(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/palette.rs"]
mod tests;
