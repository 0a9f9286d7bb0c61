use super::Config;

/// First of `names` that is set to something other than whitespace, trimmed.
fn first_non_empty(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = first_non_empty(&["BIJOCHAT_API_KEY", "GEMINI_API_KEY"]) {
            self.api_key = Some(key);
        }

        if let Ok(models) = std::env::var("BIJOCHAT_MODELS") {
            let models: Vec<String> = models
                .split(',')
                .map(str::trim)
                .filter(|model| !model.is_empty())
                .map(String::from)
                .collect();
            if !models.is_empty() {
                self.llm.models = models;
            }
        }

        if let Some(port_str) = first_non_empty(&["BIJOCHAT_PORT", "PORT"])
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = first_non_empty(&["BIJOCHAT_HOST", "HOST"]) {
            self.gateway.host = host;
        }

        if let Ok(temp_str) = std::env::var("BIJOCHAT_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.llm.temperature = Some(temp);
        }
    }
}
