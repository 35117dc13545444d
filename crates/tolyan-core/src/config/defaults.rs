//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "Толян".to_string()
}

pub fn default_data_dir() -> String {
    "~/.tolyan".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_persona_path() -> String {
    "~/.tolyan/prompts/PERSONA.md".to_string()
}

pub fn default_provider() -> String {
    "openai".to_string()
}

pub fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

pub fn default_openai_model() -> String {
    "gpt-5".to_string()
}

pub fn default_webhook_secret() -> String {
    "changeme".to_string()
}

pub fn default_listen_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_listen_port() -> u16 {
    8080
}
