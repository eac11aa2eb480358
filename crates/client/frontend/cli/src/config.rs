//! Console-specific settings.
use std::env;

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub prompt: String,
    /// Print the status block after every accepted cast.
    pub auto_status: bool,
    /// Recent messages shown by the `status` command.
    pub status_messages: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            auto_status: false,
            status_messages: 5,
        }
    }
}

impl CliConfig {
    /// Environment variables:
    /// - `CLI_PROMPT` - Input prompt (default: `> `)
    /// - `CLI_AUTO_STATUS` - Show status after each cast (default: false)
    /// - `CLI_STATUS_MESSAGES` - Messages listed under the status block (default: 5)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(prompt) = env::var("CLI_PROMPT") {
            config.prompt = prompt;
        }
        if let Ok(value) = env::var("CLI_AUTO_STATUS") {
            config.auto_status = matches!(
                value.trim().to_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            );
        }
        if let Some(count) = env::var("CLI_STATUS_MESSAGES")
            .ok()
            .and_then(|value| value.trim().parse().ok())
        {
            config.status_messages = count;
        }

        config
    }
}
