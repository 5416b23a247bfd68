use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Container duration of an encoded file in seconds, read through `ffprobe`.
pub fn probe_duration_secs(path: &Path) -> ReelResult<f64> {
    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()
        .map_err(|e| ReelError::encode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(ReelError::encode(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_format_duration(&out.stdout)
}

fn parse_format_duration(json: &[u8]) -> ReelResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: ProbeFormat,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| ReelError::serde(format!("ffprobe json parse failed: {e}")))?;
    let raw = parsed
        .format
        .duration
        .ok_or_else(|| ReelError::encode("missing format duration from ffprobe"))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| ReelError::encode(format!("invalid ffprobe duration \"{raw}\": {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/probe.rs"]
mod tests;
