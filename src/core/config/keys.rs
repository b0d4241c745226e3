//! String keys accepted by `relaychat set` / `relaychat unset`.

use std::fmt;

use crate::core::config::data::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    ServerHost,
    ServerPort,
    ServerBaseUrl,
    ServerModel,
    ServerSystemPrompt,
}

pub const ALL_KEYS: [ConfigKey; 6] = [
    ConfigKey::Endpoint,
    ConfigKey::ServerHost,
    ConfigKey::ServerPort,
    ConfigKey::ServerBaseUrl,
    ConfigKey::ServerModel,
    ConfigKey::ServerSystemPrompt,
];

impl ConfigKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "endpoint",
            ConfigKey::ServerHost => "server.host",
            ConfigKey::ServerPort => "server.port",
            ConfigKey::ServerBaseUrl => "server.base-url",
            ConfigKey::ServerModel => "server.model",
            ConfigKey::ServerSystemPrompt => "server.system-prompt",
        }
    }

    pub fn parse(key: &str) -> Result<Self, String> {
        ALL_KEYS
            .iter()
            .copied()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| {
                let known: Vec<&str> = ALL_KEYS.iter().map(|k| k.as_str()).collect();
                format!("Unknown config key: {key} (expected one of: {})", known.join(", "))
            })
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Config {
    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {key}"));
        }

        match key {
            ConfigKey::Endpoint => {
                reqwest::Url::parse(value).map_err(|err| format!("Invalid endpoint URL: {err}"))?;
                self.endpoint = Some(value.to_string());
            }
            ConfigKey::ServerHost => self.server.host = Some(value.to_string()),
            ConfigKey::ServerPort => {
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid port: {value}"))?;
                self.server.port = Some(port);
            }
            ConfigKey::ServerBaseUrl => {
                reqwest::Url::parse(value).map_err(|err| format!("Invalid base URL: {err}"))?;
                self.server.base_url = Some(value.to_string());
            }
            ConfigKey::ServerModel => self.server.model = Some(value.to_string()),
            ConfigKey::ServerSystemPrompt => self.server.system_prompt = Some(value.to_string()),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::Endpoint => self.endpoint = None,
            ConfigKey::ServerHost => self.server.host = None,
            ConfigKey::ServerPort => self.server.port = None,
            ConfigKey::ServerBaseUrl => self.server.base_url = None,
            ConfigKey::ServerModel => self.server.model = None,
            ConfigKey::ServerSystemPrompt => self.server.system_prompt = None,
        }
    }
}
