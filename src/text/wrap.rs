use crate::text::font::{FontHandle, GlyphMeter};

/// Marker appended to the last permitted line when text is truncated.
pub const ELLIPSIS: char = '…';

/// Greedy per-character line breaking.
///
/// Japanese text has no reliable word boundaries, so the break decision is made for every
/// character rather than every word. Explicit `\n` always breaks; paragraphs are trimmed and
/// blank ones are dropped. A character wider than `max_width` on its own cannot be placed and
/// is skipped.
///
/// At most `max_lines` lines are returned (`0` is treated as `1`). When the text needs more,
/// the last permitted line is shortened until it fits together with [`ELLIPSIS`]. Every
/// returned line measures `<= max_width` under `font`.
///
/// Empty (or all-blank) input yields exactly one empty line.
pub fn wrap(text: &str, font: &FontHandle, max_width: f32, max_lines: usize) -> Vec<String> {
    let max_lines = max_lines.max(1);
    let meter = font.meter();
    let mut lines = break_lines(text, &meter, max_width);

    if lines.is_empty() {
        return vec![String::new()];
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = ellipsize(std::mem::take(last), &meter, max_width);
        }
    }
    lines
}

fn break_lines(text: &str, meter: &GlyphMeter<'_>, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        let mut current = String::new();
        let mut width = 0.0f32;
        for ch in paragraph.chars() {
            let advance = meter.advance(ch);
            if !current.is_empty() && width + advance > max_width {
                let closed = std::mem::take(&mut current);
                lines.push(closed.trim_end().to_string());
                width = 0.0;
            }
            if current.is_empty() {
                if ch.is_whitespace() {
                    continue;
                }
                if advance > max_width {
                    tracing::debug!(%ch, advance, max_width, "glyph wider than line box; skipped");
                    continue;
                }
            }
            current.push(ch);
            width += advance;
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn ellipsize(mut line: String, meter: &GlyphMeter<'_>, max_width: f32) -> String {
    loop {
        let trimmed_len = line.trim_end().len();
        line.truncate(trimmed_len);
        let mut candidate = line.clone();
        candidate.push(ELLIPSIS);
        if meter.measure(&candidate) <= max_width {
            return candidate;
        }
        if line.pop().is_none() {
            // Not even the marker fits.
            return String::new();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
