use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Upload ceiling of the short-form target platform (50 MiB).
pub const PLATFORM_SIZE_CEILING_BYTES: u64 = 50 * 1024 * 1024;

/// Outcome of comparing an artifact's size to a ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SizeVerdict {
    /// `bytes <= ceiling`.
    Within {
        /// Artifact size.
        bytes: u64,
        /// Ceiling it was checked against.
        ceiling: u64,
    },
    /// `bytes > ceiling`; the artifact is still kept.
    OverCeiling {
        /// Artifact size.
        bytes: u64,
        /// Ceiling it was checked against.
        ceiling: u64,
    },
}

impl SizeVerdict {
    /// Artifact size in bytes.
    pub fn bytes(self) -> u64 {
        match self {
            SizeVerdict::Within { bytes, .. } | SizeVerdict::OverCeiling { bytes, .. } => bytes,
        }
    }

    /// Whether the artifact exceeds its ceiling.
    pub fn is_over(self) -> bool {
        matches!(self, SizeVerdict::OverCeiling { .. })
    }
}

/// Pure size comparison.
pub fn size_verdict(bytes: u64, ceiling: u64) -> SizeVerdict {
    if bytes > ceiling {
        SizeVerdict::OverCeiling { bytes, ceiling }
    } else {
        SizeVerdict::Within { bytes, ceiling }
    }
}

/// Stat `path` and compare its size to `ceiling`.
pub fn check_file(path: &Path, ceiling: u64) -> ReelResult<SizeVerdict> {
    let bytes = std::fs::metadata(path)
        .with_context(|| format!("stat output '{}'", path.display()))?
        .len();
    Ok(size_verdict(bytes, ceiling))
}

/// What to do with a verdict once the artifact exists.
pub trait SizeBudgetPolicy: Send + Sync {
    /// Returning an error fails the generation call; the file is left in place either way.
    fn apply(&self, path: &Path, verdict: SizeVerdict) -> ReelResult<()>;
}

/// Log a warning on overage and succeed.
#[derive(Clone, Copy, Debug, Default)]
pub struct WarnOnOverage;

impl SizeBudgetPolicy for WarnOnOverage {
    fn apply(&self, path: &Path, verdict: SizeVerdict) -> ReelResult<()> {
        if let SizeVerdict::OverCeiling { bytes, ceiling } = verdict {
            tracing::warn!(
                path = %path.display(),
                mb = bytes as f64 / (1024.0 * 1024.0),
                ceiling_mb = ceiling as f64 / (1024.0 * 1024.0),
                "output exceeds the platform size ceiling"
            );
        }
        Ok(())
    }
}

/// Treat overage as a validation failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectOverage;

impl SizeBudgetPolicy for RejectOverage {
    fn apply(&self, path: &Path, verdict: SizeVerdict) -> ReelResult<()> {
        match verdict {
            SizeVerdict::OverCeiling { bytes, ceiling } => Err(ReelError::validation(format!(
                "'{}' is {bytes} bytes, over the {ceiling}-byte ceiling",
                path.display()
            ))),
            SizeVerdict::Within { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/budget.rs"]
mod tests;
