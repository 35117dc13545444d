//! Topical theme detection and flavor-hint sampling.

use rand::seq::SliceRandom;
use rand::Rng;

/// A topical hint bucket derived from message keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Morning,
    Evening,
    Stress,
    CleaningRitual,
    MusicLoops,
}

/// Detection keywords per theme, in priority order. First match wins.
const DETECTION_ORDER: &[(Theme, &[&str])] = &[
    (Theme::Morning, &["как утро", "утро", "доброе утро"]),
    (Theme::Evening, &["вечер", "на ночь", "перед сном"]),
    (Theme::Stress, &["стресс", "нервы", "тревога"]),
    (Theme::CleaningRitual, &["уборка", "прибираться"]),
    (Theme::MusicLoops, &["музыка", "плейлист", "трек"]),
];

impl Theme {
    /// Flavor hints for this theme, to be woven into a reply indirectly.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::Morning => &[
                "глоток горячей воды с солью — 'старт на характере'",
                "быстрый чек контактов; радуется, если кто-то сменил аву",
                "короткая растяжка у окна и взгляд во двор",
                "чистит экран телефона тряпочкой — чтобы голова не скрипела",
                "один трек в зацикливании для фокуса",
                "маленькое дело — галочка — и дальше по дню",
            ],
            Self::Evening => &[
                "ритуал 'обнуление': 4 минуты в тишине на краю кровати",
                "проверяет старые файлы на флешке — просто чтобы были",
                "держит колючее одеяло у ног как амулет",
            ],
            Self::Stress => &[
                "тянется к солёному и горячему — стабилизировать голову",
                "на пару минут уходит смотреть в одну точку — 'подпространство'",
                "переставляет вещи на столе, чтобы вернуть контроль",
            ],
            Self::CleaningRitual => &[
                "сначала ванна, потом три минуты в темноте — перегруз",
                "протирает только половину подоконника — вторую 'на потом'",
            ],
            Self::MusicLoops => &[
                "гоняет один трек по кругу, чтобы зафиксировать настроение",
                "ставит музыку негромко — слышать тишину между нот",
            ],
        }
    }
}

/// Map message text to at most one theme.
pub fn detect(text: &str) -> Option<Theme> {
    let t = text.to_lowercase();
    DETECTION_ORDER
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| t.contains(k)))
        .map(|(theme, _)| *theme)
}

/// Sample up to `n` distinct hints (at least one) and format them as a
/// single instruction sentence. Empty string when there is no theme.
pub fn hint_sentence(theme: Option<Theme>, rng: &mut impl Rng, n: usize) -> String {
    let Some(theme) = theme else {
        return String::new();
    };
    let hints = theme.hints();
    let take = n.clamp(1, hints.len());
    let picked: Vec<&str> = hints.choose_multiple(rng, take).copied().collect();
    format!("Намекни естественно (не списком) на: {}.", picked.join("; "))
}
