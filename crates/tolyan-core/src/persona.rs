//! Persona loading with modification-time cache.
//!
//! The persona is an opaque text blob appended to the system prompt.
//! Reloads only when the file's mtime changes; concurrent refreshes may
//! race, and readers get either the old or the new text.

use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Returned when the persona file cannot be read.
pub const PERSONA_PLACEHOLDER: &str = "Личность не найдена. Проверьте файл PERSONA.md.";

/// Bundled default persona, embedded at compile time.
const BUNDLED_PERSONA: &str = include_str!("../../../prompts/PERSONA.md");

/// Deploy the bundled persona file, creating parent directories if needed.
///
/// Never overwrites an existing file so user edits are preserved.
pub fn install_bundled_persona(path: &str) {
    let dest = Path::new(path);
    if dest.exists() {
        return;
    }
    if let Some(parent) = dest.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("persona: failed to create {}: {e}", parent.display());
            return;
        }
    }
    if let Err(e) = std::fs::write(dest, BUNDLED_PERSONA) {
        warn!("persona: failed to write {}: {e}", dest.display());
    } else {
        tracing::info!("persona: deployed bundled file to {}", dest.display());
    }
}

struct CacheState {
    text: String,
    modified: Option<SystemTime>,
}

/// Mtime-cached persona source.
pub struct PersonaCache {
    path: PathBuf,
    state: RwLock<CacheState>,
}

impl PersonaCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(CacheState {
                text: PERSONA_PLACEHOLDER.to_string(),
                modified: None,
            }),
        }
    }

    /// Current persona text, re-read from disk when the file changed.
    ///
    /// A missing or unreadable file yields the placeholder, never an error.
    pub fn load(&self) -> String {
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok();

        if let Ok(state) = self.state.read() {
            if state.modified == modified {
                return state.text.clone();
            }
        }

        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) => {
                debug!("persona: {} unreadable: {e}", self.path.display());
                PERSONA_PLACEHOLDER.to_string()
            }
        };

        if let Ok(mut state) = self.state.write() {
            state.text = text.clone();
            state.modified = modified;
        }

        text
    }
}
