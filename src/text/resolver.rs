use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::text::font::{FontFace, FontHandle, FontOrigin, FontWeight, ScriptHint};

/// Operating-system family a candidate path belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    /// macOS.
    MacOs,
    /// Linux and other Unix-likes.
    Linux,
    /// Windows.
    Windows,
}

impl OsFamily {
    /// Family of the running process.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            OsFamily::MacOs
        } else if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Linux
        }
    }

    /// Well-known font directories scanned when no candidate path exists.
    pub fn font_dirs(self) -> &'static [&'static str] {
        match self {
            OsFamily::MacOs => &["/System/Library/Fonts", "/Library/Fonts"],
            OsFamily::Linux => &["/usr/share/fonts", "/usr/local/share/fonts"],
            OsFamily::Windows => &["C:/Windows/Fonts"],
        }
    }
}

/// One row of the platform candidate table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontCandidate {
    /// Platform the path is meaningful on.
    pub os: OsFamily,
    /// Script the face is expected to cover.
    pub script: ScriptHint,
    /// Weight of the face.
    pub weight: FontWeight,
    /// Absolute path.
    pub path: &'static str,
}

const fn row(
    os: OsFamily,
    script: ScriptHint,
    weight: FontWeight,
    path: &'static str,
) -> FontCandidate {
    FontCandidate {
        os,
        script,
        weight,
        path,
    }
}

use FontWeight::{Bold, Regular};
use OsFamily::{Linux, MacOs, Windows};
use ScriptHint::{Cjk, Latin};

/// Platform candidate table, in priority order within each `(os, script, weight)` group.
pub const SYSTEM_CANDIDATES: &[FontCandidate] = &[
    row(MacOs, Cjk, Bold, "/System/Library/Fonts/ヒラギノ角ゴシック W6.ttc"),
    row(MacOs, Cjk, Bold, "/System/Library/Fonts/ヒラギノ角ゴ ProN W6.otf"),
    row(MacOs, Cjk, Bold, "/Library/Fonts/ヒラギノ角ゴシック W6.ttc"),
    row(MacOs, Cjk, Bold, "/System/Library/Fonts/ヒラギノ角ゴシック W5.ttc"),
    row(MacOs, Cjk, Regular, "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc"),
    row(MacOs, Cjk, Regular, "/System/Library/Fonts/ヒラギノ角ゴシック W4.ttc"),
    row(MacOs, Cjk, Regular, "/System/Library/Fonts/Hiragino Sans GB.ttc"),
    row(Linux, Cjk, Bold, "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc"),
    row(Linux, Cjk, Bold, "/usr/share/fonts/noto-cjk/NotoSansCJK-Bold.ttc"),
    row(Linux, Cjk, Bold, "/usr/share/fonts/truetype/noto/NotoSansCJKjp-Bold.otf"),
    row(Linux, Cjk, Regular, "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
    row(Linux, Cjk, Regular, "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
    row(Linux, Cjk, Regular, "/usr/share/fonts/truetype/noto/NotoSansCJKjp-Regular.otf"),
    row(Windows, Cjk, Bold, "C:/Windows/Fonts/YuGothB.ttc"),
    row(Windows, Cjk, Bold, "C:/Windows/Fonts/meiryob.ttc"),
    row(Windows, Cjk, Regular, "C:/Windows/Fonts/YuGothM.ttc"),
    row(Windows, Cjk, Regular, "C:/Windows/Fonts/meiryo.ttc"),
    row(MacOs, Latin, Bold, "/Library/Fonts/Arial Bold.ttf"),
    row(MacOs, Latin, Bold, "/System/Library/Fonts/Supplemental/Arial Bold.ttf"),
    row(MacOs, Latin, Regular, "/System/Library/Fonts/Helvetica.ttc"),
    row(MacOs, Latin, Regular, "/System/Library/Fonts/SFPro.ttf"),
    row(Linux, Latin, Bold, "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
    row(Linux, Latin, Bold, "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"),
    row(Linux, Latin, Regular, "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    row(Linux, Latin, Regular, "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf"),
    row(Windows, Latin, Bold, "C:/Windows/Fonts/arialbd.ttf"),
    row(Windows, Latin, Regular, "C:/Windows/Fonts/arial.ttf"),
];

/// File-name keywords that mark a scanned font as CJK/Gothic capable (matched lower-cased).
const SCAN_KEYWORDS: &[&str] = &[
    "cjk",
    "gothic",
    "goth",
    "hiragino",
    "ヒラギノ",
    "notosansjp",
    "meiryo",
    "ipag",
    "takao",
    "droidsansfallback",
];

const SCAN_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Candidate tiers for a request: exact, other weight, other script, then both flipped.
pub fn probe_order(weight: FontWeight, script: ScriptHint) -> [(ScriptHint, FontWeight); 4] {
    [
        (script, weight),
        (script, weight.other()),
        (script.other(), weight),
        (script.other(), weight.other()),
    ]
}

/// Font lookup settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font files probed before the platform table, in order.
    pub extra_candidates: Vec<PathBuf>,
    /// Whether to probe the built-in platform candidate table.
    pub system_candidates: bool,
    /// Directories scanned recursively as a last resort. `None` uses the platform defaults;
    /// an empty list disables scanning.
    pub scan_roots: Option<Vec<PathBuf>>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            extra_candidates: Vec::new(),
            system_candidates: true,
            scan_roots: None,
        }
    }
}

impl FontConfig {
    /// No filesystem access at all: every request resolves to the built-in face.
    pub fn builtin_only() -> Self {
        Self {
            extra_candidates: Vec::new(),
            system_candidates: false,
            scan_roots: Some(Vec::new()),
        }
    }
}

type FaceKey = (FontWeight, ScriptHint);
type HandleKey = (u32, FontWeight, ScriptHint);

/// Resolves `(size, weight, script)` requests to font handles through the candidate chain.
///
/// Owns its caches; two resolvers never share state. Lookups never fail: the worst case is
/// the built-in face plus a warning.
#[derive(Debug)]
pub struct FontResolver {
    config: FontConfig,
    os: OsFamily,
    faces: RwLock<HashMap<FaceKey, FontFace>>,
    handles: RwLock<HashMap<HandleKey, FontHandle>>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(FontConfig::default())
    }
}

impl FontResolver {
    /// Resolver for the running platform.
    pub fn new(config: FontConfig) -> Self {
        Self::for_os(config, OsFamily::current())
    }

    /// Resolver probing another platform's table (useful for diagnostics).
    pub fn for_os(config: FontConfig, os: OsFamily) -> Self {
        Self {
            config,
            os,
            faces: RwLock::new(HashMap::new()),
            handles: RwLock::new(HashMap::new()),
        }
    }

    /// Resolver that never touches the filesystem.
    pub fn builtin_only() -> Self {
        Self::new(FontConfig::builtin_only())
    }

    /// Lookup settings.
    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Resolve a handle at `size_px`. Cached per `(size, weight, script)` for the resolver's
    /// lifetime.
    pub fn resolve_font(&self, size_px: f32, weight: FontWeight, script: ScriptHint) -> FontHandle {
        let key = (size_px.to_bits(), weight, script);
        if let Some(hit) = self
            .handles
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
        {
            return hit.clone();
        }

        let handle = self.resolve_face(weight, script).at_size(size_px);
        self.handles
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(key)
            .or_insert(handle)
            .clone()
    }

    /// Resolve the size-independent face for `(weight, script)`.
    pub fn resolve_face(&self, weight: FontWeight, script: ScriptHint) -> FontFace {
        let key = (weight, script);
        if let Some(hit) = self
            .faces
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
        {
            return hit.clone();
        }

        let face = self.probe(weight, script);
        self.faces
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(key)
            .or_insert(face)
            .clone()
    }

    /// Ordered candidate paths for a request (extra candidates first, then the table tiers).
    pub fn candidate_paths(&self, weight: FontWeight, script: ScriptHint) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self.config.extra_candidates.clone();
        if self.config.system_candidates {
            for (s, w) in probe_order(weight, script) {
                out.extend(
                    SYSTEM_CANDIDATES
                        .iter()
                        .filter(|c| c.os == self.os && c.script == s && c.weight == w)
                        .map(|c| PathBuf::from(c.path)),
                );
            }
        }
        out
    }

    fn probe(&self, weight: FontWeight, script: ScriptHint) -> FontFace {
        for path in self.candidate_paths(weight, script) {
            if !path.is_file() {
                continue;
            }
            match FontFace::load(&path, FontOrigin::Candidate(path.clone())) {
                Ok(face) => {
                    tracing::debug!(path = %path.display(), ?weight, ?script, "font candidate resolved");
                    return face;
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "font candidate rejected");
                }
            }
        }

        for path in self.scan(weight) {
            match FontFace::load(&path, FontOrigin::Scanned(path.clone())) {
                Ok(face) => {
                    tracing::debug!(path = %path.display(), ?weight, ?script, "font found by directory scan");
                    return face;
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "scanned font rejected");
                }
            }
        }

        tracing::warn!(
            ?weight,
            ?script,
            "no usable font found; falling back to the built-in face (CJK will render as boxes)"
        );
        FontFace::builtin()
    }

    fn scan_roots(&self) -> Vec<PathBuf> {
        match &self.config.scan_roots {
            Some(roots) => roots.clone(),
            None => self.os.font_dirs().iter().map(PathBuf::from).collect(),
        }
    }

    /// Recursively collect keyword-matching font files, sorted for determinism; bold-named
    /// files first when `weight` is bold.
    fn scan(&self, weight: FontWeight) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = self
            .scan_roots()
            .iter()
            .filter(|root| root.is_dir())
            .flat_map(|root| walkdir::WalkDir::new(root).follow_links(true))
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|p| is_scan_match(p))
            .collect();
        found.sort();
        if weight == FontWeight::Bold {
            found.sort_by_key(|p| !file_name_lower(p).contains("bold"));
        }
        found
    }
}

fn file_name_lower(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Scan filter: font extension plus a CJK/Gothic family keyword in the file name.
pub(crate) fn is_scan_match(path: &Path) -> bool {
    let ext_ok = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| SCAN_EXTENSIONS.contains(&e.as_str()));
    if !ext_ok {
        return false;
    }
    let name = file_name_lower(path);
    SCAN_KEYWORDS.iter().any(|k| name.contains(k))
}

#[cfg(test)]
#[path = "../../tests/unit/text/resolver.rs"]
mod tests;
