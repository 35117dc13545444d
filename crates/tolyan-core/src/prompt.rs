//! Prompt composition: persona, mood, policy, and situational context
//! assembled into a system instruction and a user instruction.

use rand::Rng;

use crate::config::ContentMode;
use crate::message::InboundMessage;
use crate::mood::Mood;
use crate::theme;

/// Region-flavor keywords, kept as tuning data. Any of these in the
/// message earns the reply a line of local color.
const AKTOBE_KEYWORDS: &[&str] = &[
    "актобе",
    "казахстан",
    "степь",
    "кумыс",
    "бауырсак",
    "самса",
    "шанырак",
    "наурыз",
    "бекон",
    "бешбармак",
    "домбыра",
    "чокан",
    "жусай",
    "тюльпан",
    "батыр",
];

const AKTOBE_HINT: &str =
    " Если в сообщении есть отсылки к Казахстану/Актобе — добавь уместный колорит.";

/// How many theme hints are woven into a user prompt.
const THEME_HINTS_PER_MESSAGE: usize = 2;

fn mentions_region(text: &str) -> bool {
    let low = text.to_lowercase();
    AKTOBE_KEYWORDS.iter().any(|k| low.contains(k))
}

fn policy_line(mode: ContentMode) -> &'static str {
    match mode {
        ContentMode::Permissive => {
            "Допустим взрослый разговор (18+) в мягком ключе: флирт, намёки, бытовые обсуждения близости — без графичных деталей. \
             Строго запрещено: несовершеннолетние, насилие, инцест, зоофилия, эксплуатация, покупка секса. \
             Не используй анатомические подробности и порнографические описания."
        }
        ContentMode::Restricted => "Избегай сексуально откровенных тем и графичных описаний.",
    }
}

/// Build the system instruction: identity, context-usage rule, response
/// contract, style rule, content policy, mood note, persona body, in that
/// fixed order.
pub fn compose_system(persona: &str, mood: Mood, mode: ContentMode) -> String {
    format!(
        "Ты — Толян Бесович. Отвечай в духе своей личности, как живой человек, не говори, что ты бот.\n\
         Используй диалоговый контекст и биографию только как фон для интонации и уместных мелких штрихов; не пересказывай и не цитируй их.\n\
         Контракт ответа: сначала дай прямой и конкретный ответ одним коротким предложением. Затем при желании добавь 0–1 очень короткую бытовую деталь из жизни персонажа (если помогает смыслу). Никакой философии и длинных заходов.\n\
         Стиль: 1–2 фразы максимум. Без пустых вводных и штампов вроде 'если честно', 'в целом', 'короче', 'скажу так'. Не льсти и не делай комплименты без повода.\n\
         {policy}\n\
         Пусть сегодняшнее настроение влияет на стиль, но не называй его вслух: {mood}\n\n\
         {persona}\n",
        policy = policy_line(mode),
        mood = mood.directive(),
        persona = persona,
    )
}

/// Build the user instruction: author, chat, message text, the fixed
/// response-shape reminder, plus conditional region and theme hints.
pub fn compose_user(msg: &InboundMessage, rng: &mut impl Rng) -> String {
    let text = msg.text.as_deref().unwrap_or("");
    let theme_hint = theme::hint_sentence(theme::detect(text), rng, THEME_HINTS_PER_MESSAGE);
    let theme_part = if theme_hint.is_empty() {
        String::new()
    } else {
        format!(" {theme_hint}")
    };
    let region_part = if mentions_region(text) { AKTOBE_HINT } else { "" };

    format!(
        "Автор: {author}\n\
         Чат: {chat}\n\
         Сообщение:\n{text}\n\n\
         Отвечай по сути (1–3 коротких фразы), по-доброму живо, без длинных заходов.{region_part}{theme_part}",
        author = msg.author,
        chat = msg.chat_title,
    )
}

/// Compose the full prompt pair. A non-empty dialogue context block is
/// prepended to the user instruction under its header.
pub fn compose(
    msg: &InboundMessage,
    persona: &str,
    mood: Mood,
    mode: ContentMode,
    context_block: &str,
    rng: &mut impl Rng,
) -> (String, String) {
    let system = compose_system(persona, mood, mode);
    let mut user = compose_user(msg, rng);
    if !context_block.is_empty() {
        user = format!("Контекст последних сообщений:\n{context_block}\n---\n{user}");
    }
    (system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatKind;
    use chrono::Utc;

    fn msg(text: &str) -> InboundMessage {
        InboundMessage {
            chat_id: -1,
            chat_kind: ChatKind::Group,
            chat_title: "Двор".into(),
            message_id: 10,
            author: "Саня".into(),
            text: Some(text.into()),
            reply_to: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_system_prompt_section_order() {
        let system = compose_system("БИОГРАФИЯ", Mood::Cheerful, ContentMode::Restricted);
        let identity = system.find("Толян Бесович").unwrap();
        let context_rule = system.find("не пересказывай и не цитируй").unwrap();
        let contract = system.find("Контракт ответа").unwrap();
        let style = system.find("Стиль: 1–2 фразы").unwrap();
        let policy = system.find("Избегай сексуально откровенных").unwrap();
        let mood = system.find("настроение влияет на стиль").unwrap();
        let persona = system.find("БИОГРАФИЯ").unwrap();
        assert!(identity < context_rule);
        assert!(context_rule < contract);
        assert!(contract < style);
        assert!(style < policy);
        assert!(policy < mood);
        assert!(mood < persona);
    }

    #[test]
    fn test_system_prompt_mood_not_named() {
        let system = compose_system("", Mood::Hustler, ContentMode::Restricted);
        assert!(system.contains(Mood::Hustler.directive()));
        assert!(!system.contains(Mood::Hustler.display_name()));
    }

    #[test]
    fn test_policy_line_per_mode() {
        let permissive = compose_system("", Mood::Cheerful, ContentMode::Permissive);
        assert!(permissive.contains("Строго запрещено"));
        assert!(!permissive.contains("Избегай сексуально откровенных"));

        let restricted = compose_system("", Mood::Cheerful, ContentMode::Restricted);
        assert!(restricted.contains("Избегай сексуально откровенных"));
        assert!(!restricted.contains("Строго запрещено"));
    }

    #[test]
    fn test_user_prompt_contains_message_fields() {
        let mut rng = rand::thread_rng();
        let user = compose_user(&msg("как дела?"), &mut rng);
        assert!(user.contains("Автор: Саня"));
        assert!(user.contains("Чат: Двор"));
        assert!(user.contains("Сообщение:\nкак дела?"));
        assert!(user.contains("Отвечай по сути"));
        assert!(!user.contains("Актобе"));
        assert!(!user.contains("Намекни"));
    }

    #[test]
    fn test_region_hint_appended() {
        let mut rng = rand::thread_rng();
        let user = compose_user(&msg("пробовал бешбармак?"), &mut rng);
        assert!(user.contains("Казахстану/Актобе"));
    }

    #[test]
    fn test_theme_hint_appended() {
        let mut rng = rand::thread_rng();
        let user = compose_user(&msg("расскажи про вечер"), &mut rng);
        assert!(user.contains("Намекни естественно"));
    }

    #[test]
    fn test_context_block_prepended_with_header() {
        let mut rng = rand::thread_rng();
        let block = "Саня: привет\nТолян: здорово";
        let (_, user) = compose(
            &msg("как дела?"),
            "",
            Mood::Cheerful,
            ContentMode::Restricted,
            block,
            &mut rng,
        );
        assert!(user.starts_with("Контекст последних сообщений:\n"));
        assert!(user.contains(block));
        assert!(user.contains("\n---\n"));
    }

    #[test]
    fn test_empty_context_block_adds_no_header() {
        let mut rng = rand::thread_rng();
        let (_, user) = compose(
            &msg("как дела?"),
            "",
            Mood::Cheerful,
            ContentMode::Restricted,
            "",
            &mut rng,
        );
        assert!(!user.contains("Контекст последних сообщений"));
        assert!(user.starts_with("Автор:"));
    }

    #[test]
    fn test_absent_text_composes_empty_message() {
        let mut rng = rand::thread_rng();
        let mut m = msg("");
        m.text = None;
        let user = compose_user(&m, &mut rng);
        assert!(user.contains("Сообщение:\n\n"));
    }
}
