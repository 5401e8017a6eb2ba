//! Server configuration module

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Whether every origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// First configured origin that is not a bare `http(s)://host[:port]`
    ///
    /// Blank entries and the `*` wildcard are accepted.
    pub fn invalid_origin(&self) -> Option<&str> {
        self.allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty() && *origin != "*")
            .find(|origin| !is_valid_origin(origin))
    }
}

fn is_valid_origin(origin: &str) -> bool {
    let Some(authority) = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
    else {
        return false;
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };

    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    let port_ok = port.map_or(true, |port| port.parse::<u16>().is_ok());

    host_ok && port_ok
}

fn default_max_age() -> usize {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_cors_any_origin() {
        assert!(CorsConfig::default().allows_any_origin());

        let restricted = CorsConfig {
            allowed_origins: vec!["https://app.ticklist.dev".to_string()],
            ..Default::default()
        };
        assert!(!restricted.allows_any_origin());
    }

    #[test]
    fn test_invalid_origin_detection() {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://app.ticklist.dev".to_string(),
                "http://localhost:3000".to_string(),
                " ".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(config.invalid_origin(), None);

        for bad in [
            "app.ticklist.dev",
            "https://",
            "https://app.ticklist.dev/",
            "https://app ticklist.dev",
            "http://localhost:99999",
            "ftp://files.ticklist.dev",
        ] {
            let config = CorsConfig {
                allowed_origins: vec!["https://ok.dev".to_string(), bad.to_string()],
                ..Default::default()
            };
            assert_eq!(config.invalid_origin(), Some(bad), "{bad} should be rejected");
        }
    }
}
