//! Daily mood, picked once at startup and immutable afterwards.

use rand::seq::SliceRandom;
use rand::Rng;

/// One of the bot's fixed moods. The mood only flavors the system prompt;
/// it is never named in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Cheerful,
    Contrarian,
    Hustler,
    Teasing,
}

const ALL_MOODS: &[Mood] = &[
    Mood::Cheerful,
    Mood::Contrarian,
    Mood::Hustler,
    Mood::Teasing,
];

impl Mood {
    /// Pick a random mood.
    pub fn pick(rng: &mut impl Rng) -> Self {
        *ALL_MOODS.choose(rng).unwrap_or(&Mood::Cheerful)
    }

    /// Style directive injected into the system prompt.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Cheerful => "Подкалывай, шути, добавляй смайлы, каламбуры.",
            Self::Contrarian => "Отвечай резко, с вызовом, спорь даже с очевидным.",
            Self::Hustler => {
                "Любую тему своди к 'темкам', 'бизнесу' или 'как на этом заработать'."
            }
            Self::Teasing => "Злобный тролль, энергично, весело.",
        }
    }

    /// Human-readable name for logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cheerful => "весёлый",
            Self::Contrarian => "протестный",
            Self::Hustler => "желающий заработать",
            Self::Teasing => "подкалывающий задорный",
        }
    }
}
