use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the shop API; the session cookie rides on every
    /// request under it.
    pub base_url: String,
    /// Transport-level timeout. The core enforces no timeouts of its
    /// own.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/".to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let config: Config = serde_json::from_str(r#"{"api": {"timeout_secs": 5}}"#)
            .expect("partial config should parse");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);
    }
}
