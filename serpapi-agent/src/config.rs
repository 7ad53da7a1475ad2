//! Agent configuration, read once from the environment at startup.

pub const AGENT_NAME: &str = "serpapi-hotel-agent";
pub const DEFAULT_PORT: u16 = 8083;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search";

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// `None` when no credential is set; skills then answer with a
    /// configuration error instead of calling out.
    pub serpapi_api_key: Option<String>,
    pub serpapi_base_url: String,
    pub host: String,
    pub port: u16,
    /// URL advertised in the agent card.
    pub public_url: String,
}

impl AgentConfig {
    pub fn new(serpapi_api_key: Option<String>) -> Self {
        Self {
            serpapi_api_key: serpapi_api_key.filter(|key| !key.is_empty()),
            serpapi_base_url: DEFAULT_SERPAPI_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_url: format!("http://localhost:{}", DEFAULT_PORT),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let mut config = Self::new(lookup("SERPAPI_API_KEY"));
        config.port = port;
        config.host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        config.public_url = lookup("AGENT_PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port));
        if let Some(url) = lookup("SERPAPI_BASE_URL") {
            config.serpapi_base_url = url;
        }
        config
    }

    pub fn serpapi_configured(&self) -> bool {
        self.serpapi_api_key.is_some()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AgentConfig::from_lookup(lookup_from(&[]));
        assert!(!config.serpapi_configured());
        assert_eq!(config.port, 8083);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_addr(), "0.0.0.0:8083");
        assert_eq!(config.public_url, "http://localhost:8083");
        assert_eq!(config.serpapi_base_url, "https://serpapi.com/search");
    }

    #[test]
    fn test_overrides() {
        let config = AgentConfig::from_lookup(lookup_from(&[
            ("SERPAPI_API_KEY", "secret"),
            ("PORT", "9090"),
            ("HOST", "127.0.0.1"),
            ("SERPAPI_BASE_URL", "http://localhost:1234/search"),
        ]));
        assert_eq!(config.serpapi_api_key.as_deref(), Some("secret"));
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.public_url, "http://localhost:9090");
        assert_eq!(config.serpapi_base_url, "http://localhost:1234/search");
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let config = AgentConfig::from_lookup(lookup_from(&[("SERPAPI_API_KEY", "")]));
        assert!(!config.serpapi_configured());
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = AgentConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
