use serde::{Deserialize, Serialize};

/// The two prompt blocks handed to a completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// System instruction: persona, style contract, content policy, mood.
    pub system_prompt: String,
    /// User instruction: dialogue context block plus the current message.
    pub user_prompt: String,
}

/// A structured message for API-based providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

impl Context {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }

    /// Convert to structured API messages.
    ///
    /// Returns `(system_prompt, messages)` — the system prompt is separated
    /// because some APIs require it outside the messages array.
    pub fn to_api_messages(&self) -> (String, Vec<ApiMessage>) {
        (
            self.system_prompt.clone(),
            vec![ApiMessage {
                role: "user".to_string(),
                content: self.user_prompt.clone(),
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_api_messages() {
        let ctx = Context::new("Будь собой.", "Привет");
        let (system, messages) = ctx.to_api_messages();
        assert_eq!(system, "Будь собой.");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "Привет");
    }

    #[test]
    fn test_context_serde_round_trip() {
        let ctx = Context::new("s", "u");
        let json = serde_json::to_string(&ctx).unwrap();
        let back: Context = serde_json::from_str(&json).unwrap();
        assert_eq!(back.system_prompt, "s");
        assert_eq!(back.user_prompt, "u");
    }
}
