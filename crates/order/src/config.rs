//! Service configuration loaded from environment variables.

/// Order server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `5001`)
/// - `CATALOG_URL` — catalog service base URL, also the token-issuing
///   authority (default: `"http://127.0.0.1:5000"`)
/// - `NOTIFICATION_URL` — notification service base URL
///   (default: `"http://127.0.0.1:5002"`)
/// - `HTTP_TIMEOUT_SECS` — timeout applied to every outbound call
///   (default: `30`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub catalog_url: String,
    pub notification_url: String,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
            catalog_url: std::env::var("CATALOG_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            notification_url: std::env::var("NOTIFICATION_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5002".to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            catalog_url: "http://127.0.0.1:5000".to_string(),
            notification_url: "http://127.0.0.1:5002".to_string(),
            http_timeout_secs: 30,
        }
    }
}
