//! Reply sanitation and content policy.
//!
//! Everything here is a deterministic text transform driven by declarative
//! pattern tables. The sanitizer never fails: a table entry that does not
//! compile is skipped with a warning, and a step that would leave nothing
//! falls back to the least-processed variant.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::config::ContentMode;

/// Hard reply length cap, in characters.
const REPLY_CHAR_CAP: usize = 240;
/// Where an over-long reply is cut before the ellipsis.
const REPLY_CUT_AT: usize = 237;
/// Maximum sentences kept in a reply.
const MAX_SENTENCES: usize = 2;
/// Maximum pictographic emoji kept in a reply.
const MAX_EMOJI: usize = 1;

/// Pictographic codepoint ranges treated as emoji. Tuning data.
const EMOJI_RANGES: &[(u32, u32)] = &[(0x1F300, 0x1FAFF)];

/// Sentences matching any of these are dropped wholesale.
const FLATTERY_PATTERNS: &[&str] = &[
    r"\bты( такой| такая)? (красав(чик|ица)|умница|классн(ый|ая)|молодец)\b",
    r"\bвы( такой| такая)? (красав(чик|ица)|умница|классн(ый|ая)|молодцы)\b",
    r"\bобалденн(ый|ая|о)\b",
    r"\bвеликолепн(ый|ая|о)\b",
    r"\bлучш(ий|ая)\b",
    r"\bлюблю тебя\b",
    r"\bобожаю\b",
];

/// Filler preambles stripped from the start of a reply, one removal each.
const FILLER_PREFIXES: &[&str] = &[
    r"^если честно[,\s]+",
    r"^честно[,\s]+",
    r"^короче[,\s]+",
    r"^в целом[,\s]+",
    r"^скажу так[,\s]+",
    r"^по факту[,\s]+",
    r"^ну[,\s]+",
    r"^смотри[,\s]+",
    r"^если кратко[,\s]+",
];

/// Topics that short-circuit the pipeline before any completion call.
const HARD_BAN_PATTERNS: &[&str] = &[
    r"\b(несовершеннолет|школьниц|малолет|минор|minor)",
    r"\b(изнасил|насил|rape)",
    r"\b(инцест|incest)",
    r"\b(зоофил|звер|животн|bestial)",
    r"\b(порн[оа]|hardcore)",
    r"\b(проституц|эскорт|купить\s+секс|sex\s+for\s+sale)",
];

/// Graphic vocabulary softened into vaguer stand-ins in permissive mode.
const SOFTEN_TABLE: &[(&str, &str)] = &[
    (r"\bпенис\b", "он"),
    (r"\bвагин[ауы]\b", "она"),
    (r"\bсперма\b", "это"),
    (r"\bэрекци[яи]\b", "возбуждение"),
    (r"\bорга[зс]м\b", "разрядка"),
    (r"\bанус\b", "там"),
    (r"\bклитор\b", "там"),
    (r"\bлаби[иы]\b", "там"),
];

/// Canned reply sent instead of a completion when a hard ban trips.
pub const HARD_BAN_REFUSAL: &str =
    "Не, такое не обсуждаю. Могу по-взрослому, но без жести и запретных тем.";

static FLATTERY_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile_table(FLATTERY_PATTERNS));
static FILLER_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile_table(FILLER_PREFIXES));
static HARD_BAN_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile_table(HARD_BAN_PATTERNS));
static SOFTEN_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SOFTEN_TABLE
        .iter()
        .filter_map(|(pattern, replacement)| compile_one(pattern).map(|re| (re, *replacement)))
        .collect()
});

fn compile_one(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("(?i){pattern}")) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("skipping unparseable pattern {pattern:?}: {e}");
            None
        }
    }
}

fn compile_table(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| compile_one(p)).collect()
}

fn matches_any(tables: &[Regex], text: &str) -> bool {
    tables.iter().any(|re| re.is_match(text))
}

/// Whether the inbound message hits a disallowed topic.
///
/// Only consulted in permissive mode; in restricted mode the prompt's own
/// policy line is relied upon instead.
pub fn is_hard_banned(text: &str) -> bool {
    matches_any(&HARD_BAN_RES, text)
}

/// Split on whitespace that follows `.`, `!` or `?`.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        // A boundary needs whitespace after the terminal; "?!" stays together.
        if !matches!(iter.peek(), Some(&(_, next)) if next.is_whitespace()) {
            continue;
        }
        let end = i + c.len_utf8();
        if start < end {
            sentences.push(&text[start..end]);
        }
        while matches!(iter.peek(), Some(&(_, w)) if w.is_whitespace()) {
            iter.next();
        }
        start = iter.peek().map(|&(j, _)| j).unwrap_or(text.len());
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn drop_flattery(text: &str) -> String {
    let kept: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|s| !matches_any(&FLATTERY_RES, s))
        .collect();
    if kept.is_empty() {
        text.to_string()
    } else {
        kept.join(" ")
    }
}

fn strip_fillers(mut text: String) -> String {
    for re in FILLER_RES.iter() {
        text = re.replacen(&text, 1, "").into_owned();
    }
    text
}

fn soften(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in SOFTEN_RES.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    out
}

fn is_pictographic(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

fn cap_emoji(text: &str) -> String {
    let mut kept = 0;
    text.chars()
        .filter(|&c| {
            if is_pictographic(c) {
                kept += 1;
                kept <= MAX_EMOJI
            } else {
                true
            }
        })
        .collect()
}

fn cap_sentences(text: &str) -> String {
    split_sentences(text)
        .into_iter()
        .take(MAX_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}

fn cap_chars(text: &str) -> String {
    if text.chars().count() <= REPLY_CHAR_CAP {
        return text.to_string();
    }
    let cut: String = text.chars().take(REPLY_CUT_AT).collect();
    format!("{}…", cut.trim_end())
}

/// Post-process a raw model reply into deliverable form.
///
/// Order matters: flattery drop, filler strip, softening (permissive only),
/// emoji cap, sentence cap, length cap.
pub fn sanitize(raw: &str, mode: ContentMode) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let text = drop_flattery(trimmed);
    let text = strip_fillers(text);
    let text = if mode.is_permissive() {
        soften(&text)
    } else {
        text
    };
    let text = cap_emoji(&text);
    let text = cap_sentences(&text);
    cap_chars(text.trim())
}
