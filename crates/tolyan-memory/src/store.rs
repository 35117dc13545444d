//! Keyed store of bounded dialogue windows.
//!
//! One window per conversation, created lazily, never persisted. A single
//! lock guards the map; appends are atomic and windows evict FIFO.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Turns kept per conversation.
pub const MAX_TURNS: usize = 8;
/// Per-turn character cap when rendering.
pub const TURN_CHAR_CAP: usize = 220;
/// Overall character cap of a rendered context block.
pub const CONTEXT_CHAR_CAP: usize = 1200;

/// One recorded message in a conversation's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: String,
    pub text: String,
}

/// In-memory map of conversation id to its rolling window.
#[derive(Debug, Default)]
pub struct DialogStore {
    windows: Mutex<HashMap<i64, VecDeque<Turn>>>,
}

impl DialogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, evicting the oldest when the window is full.
    ///
    /// Text is whitespace-normalized before storage; turns that normalize
    /// to nothing are not recorded.
    pub fn remember(&self, chat_id: i64, speaker: &str, text: &str) {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return;
        }
        let mut windows = self.lock();
        let window = windows.entry(chat_id).or_default();
        if window.len() == MAX_TURNS {
            window.pop_front();
        }
        window.push_back(Turn {
            speaker: speaker.to_string(),
            text: normalized,
        });
    }

    /// Render the window as `speaker: text` lines, most recent last.
    ///
    /// Each turn is clipped to [`TURN_CHAR_CAP`] characters; the whole block
    /// is truncated from the front to [`CONTEXT_CHAR_CAP`], keeping the most
    /// recent turns. Empty string when the conversation has no history.
    pub fn render(&self, chat_id: i64) -> String {
        let windows = self.lock();
        let Some(window) = windows.get(&chat_id) else {
            return String::new();
        };
        let lines: Vec<String> = window
            .iter()
            .map(|turn| format!("{}: {}", turn.speaker, clip(&turn.text)))
            .collect();
        let block = lines.join("\n");
        tail_chars(&block, CONTEXT_CHAR_CAP).to_string()
    }

    /// Number of turns currently held for a conversation.
    pub fn turn_count(&self, chat_id: i64) -> usize {
        self.lock().get(&chat_id).map_or(0, VecDeque::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<i64, VecDeque<Turn>>> {
        match self.windows.lock() {
            Ok(guard) => guard,
            // A panicked appender cannot leave a half-written turn behind,
            // so the poisoned state is still consistent.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clip(text: &str) -> String {
    if text.chars().count() <= TURN_CHAR_CAP {
        return text.to_string();
    }
    let head: String = text.chars().take(TURN_CHAR_CAP).collect();
    format!("{head}…")
}

/// Last `cap` characters of `s`, respecting char boundaries.
fn tail_chars(s: &str, cap: usize) -> &str {
    let total = s.chars().count();
    if total <= cap {
        return s;
    }
    let skip = total - cap;
    s.char_indices()
        .nth(skip)
        .map(|(i, _)| &s[i..])
        .unwrap_or(s)
}
