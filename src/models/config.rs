use serde::Deserialize;

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_database_url() -> String {
    "reelbase.db".to_string()
}

/// Configuration options for the Reelbase server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Path to the SQLite database.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Secret used to derive cookie signing keys.
    pub secret_key: String,
    /// Admin account accepted by the login form.
    pub admin_email: String,
    pub admin_password: String,
    /// Display name shown in the navigation bar.
    #[serde(default)]
    pub admin_name: Option<String>,
}
