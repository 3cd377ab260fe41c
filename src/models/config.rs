use serde::Deserialize;

/// Minimum length of the session secret accepted by the cookie key.
pub const MIN_SECRET_LEN: usize = 64;

/// Configuration options of the forum service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Key material for the encrypted session cookie.
    pub secret: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Mark the session cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_pool_size() -> u32 {
    8
}
