use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 50;

/// Slug used when a title carries no ASCII letters.
pub const SLUG_FALLBACK: &str = "article";

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid regex"));
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid regex"));

/// Filesystem-safe slug of an article title.
///
/// Lower-cases, strips everything except ASCII word characters, whitespace and hyphens,
/// collapses whitespace/underscore runs to one hyphen, trims hyphens and caps the length. A
/// result without any ASCII letter (pure CJK titles, or only the digits of a date) falls back to
/// [`SLUG_FALLBACK`].
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let kept = NON_SLUG_CHARS.replace_all(&lower, "");
    let joined = SEPARATOR_RUNS.replace_all(&kept, "-");
    let slug: String = joined.trim_matches('-').chars().take(SLUG_MAX_LEN).collect();

    if slug.chars().any(|c| c.is_ascii_alphabetic()) {
        slug
    } else {
        SLUG_FALLBACK.to_string()
    }
}

/// Directory name for a country key; unknown or empty keys share `default`.
pub fn country_dir_name(country_key: &str) -> String {
    let name: String = country_key
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if name.is_empty() {
        "default".to_string()
    } else {
        name
    }
}

/// `<output_dir>/<country>/<YYYY-MM-DD>_<slug>.mp4`
pub fn default_output_path(
    output_dir: &Path,
    country_key: &str,
    title: &str,
    date: chrono::NaiveDate,
) -> PathBuf {
    output_dir.join(country_dir_name(country_key)).join(format!(
        "{}_{}.mp4",
        date.format("%Y-%m-%d"),
        slugify(title)
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/article/slug.rs"]
mod tests;
