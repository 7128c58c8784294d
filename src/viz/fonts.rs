//! Registration of the "sans-serif" font for the `ab_glyph` text path.
//!
//! `ab_glyph` doesn't discover OS fonts, so a TTF has to be registered by hand
//! before any chart text can be measured or drawn. The registration is
//! process-wide: the most recently activated file is the one plotters uses.

use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use plotters::style::{FontStyle, register_font};

/// Common locations of a sans-serif TTF on Linux, macOS and Windows.
const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Each file is read at most once; its bytes stay loaded for the process.
struct Registry {
    active: Option<PathBuf>,
    loaded: BTreeMap<PathBuf, &'static [u8]>,
    rejected: BTreeSet<PathBuf>,
}

static REGISTRY: Mutex<Registry> = Mutex::new(Registry {
    active: None,
    loaded: BTreeMap::new(),
    rejected: BTreeSet::new(),
});

impl Registry {
    fn activate(&mut self, path: &Path) -> bool {
        if self.active.as_deref() == Some(path) {
            return true;
        }
        if self.rejected.contains(path) {
            return false;
        }
        let bytes = match self.loaded.get(path) {
            Some(bytes) => *bytes,
            None => {
                // Missing files are not remembered; they may show up later.
                let Ok(data) = std::fs::read(path) else {
                    return false;
                };
                let bytes: &'static [u8] = Box::leak(data.into_boxed_slice());
                self.loaded.insert(path.to_path_buf(), bytes);
                bytes
            }
        };
        if register_font("sans-serif", FontStyle::Normal, bytes).is_err() {
            warn!("{} is not a usable TTF", path.display());
            self.loaded.remove(path);
            self.rejected.insert(path.to_path_buf());
            return false;
        }
        debug!("registered sans-serif font from {}", path.display());
        self.active = Some(path.to_path_buf());
        true
    }
}

/// Make sure a "sans-serif" font is registered; returns the active font file.
///
/// `preferred` replaces the active font when it can be registered. Otherwise
/// the active font is kept, or the built-in candidates are tried. A failed
/// lookup is retried on the next call.
pub fn ensure_fonts_registered(preferred: Option<&Path>) -> Option<PathBuf> {
    let mut reg = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(path) = preferred {
        if reg.activate(path) {
            return Some(path.to_path_buf());
        }
        warn!("could not register font {}; falling back", path.display());
    }
    if let Some(active) = &reg.active {
        return Some(active.clone());
    }
    for candidate in CANDIDATES.iter().map(Path::new) {
        if reg.activate(candidate) {
            return Some(candidate.to_path_buf());
        }
    }
    warn!("no sans-serif font found; set `font_path` in the configuration");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn failed_font_paths_do_not_stick() {
        let dir = tempdir().unwrap();
        let junk = dir.path().join("junk.ttf");
        std::fs::write(&junk, b"not a font").unwrap();

        let fallback = ensure_fonts_registered(Some(&junk));
        assert_ne!(fallback.as_deref(), Some(junk.as_path()));
        assert_eq!(ensure_fonts_registered(None), fallback);

        let later = dir.path().join("later.ttf");
        assert_ne!(
            ensure_fonts_registered(Some(&later)).as_deref(),
            Some(later.as_path())
        );
        // Machines without any system font can't exercise the switch.
        if let Some(real) = fallback {
            std::fs::copy(&real, &later).unwrap();
            assert_eq!(ensure_fonts_registered(Some(&later)), Some(later.clone()));
            assert_eq!(ensure_fonts_registered(None), Some(later));
            assert_eq!(ensure_fonts_registered(Some(&real)), Some(real));
        }
    }
}
