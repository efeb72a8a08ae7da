use secrecy::Secret;
use service_core::error::AppError;
use std::env;
use std::path::Path;

const DEFAULT_BACKEND_IP: &str = "192.168.1.1";
const DEFAULT_PORT: u16 = 3107;
const DEFAULT_AUTH_TOKEN: &str = "default";

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiSettings,
    pub auth: AuthConfig,
}

/// Settings read from the optional plain-text config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend_ip: String,
    pub port: String,
    pub auth_token: String,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub require_auth: bool,
    pub jwt_secret: Secret<String>,
    pub access_token_expiry_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            backend_ip: DEFAULT_BACKEND_IP.to_string(),
            port: DEFAULT_PORT.to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read the plain-text config file: one `key: value` pair per line,
    /// split on the first colon, whitespace trimmed on both sides.
    ///
    /// Recognized keys are `backend_ip`, `port` and `X-Auth-Token`; anything
    /// else is ignored. A missing or unreadable file falls back to the
    /// defaults. This never fails the process.
    pub fn load(path: &Path) -> Self {
        let mut config = Self::default();

        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return config;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config file, using defaults"
                );
                return config;
            }
        };

        for line in contents.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            match key.trim() {
                "backend_ip" => config.backend_ip = value.trim().to_string(),
                "port" => config.port = value.trim().to_string(),
                "X-Auth-Token" => config.auth_token = value.trim().to_string(),
                _ => {}
            }
        }

        tracing::info!(
            path = %path.display(),
            backend_ip = %config.backend_ip,
            port = %config.port,
            custom_auth_token = config.auth_token != DEFAULT_AUTH_TOKEN,
            "Loaded server config"
        );
        config
    }

    /// Listener port parsed from the file value, falling back to the
    /// default when the text is not a valid port number.
    pub fn listen_port(&self) -> u16 {
        match self.port.parse() {
            Ok(port) => port,
            Err(_) => {
                tracing::warn!(
                    port = %self.port,
                    "Configured port is not a number, using {}",
                    DEFAULT_PORT
                );
                DEFAULT_PORT
            }
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let config_path =
            env::var("PACKET_CONFIG_PATH").unwrap_or_else(|_| "backendcfg.txt".to_string());
        let server = ServerConfig::load(Path::new(&config_path));

        let gemini = GeminiSettings {
            api_key: Secret::new(get_env("GEMINI_API_KEY", Some(""), is_prod)?),
            model: get_env("GEMINI_TEXT_MODEL", Some("gemini-2.0-flash"), is_prod)?,
            api_base_url: get_env("GEMINI_API_BASE_URL", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
            timeout_seconds: env::var("GEMINI_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_GEMINI_TIMEOUT_SECONDS.to_string())
                .parse()
                .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECONDS),
        };

        let auth = AuthConfig {
            require_auth: env::var("PACKET_AUTH_REQUIRED")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            jwt_secret: Secret::new(
                env::var("JWT_SECRET_KEY").unwrap_or_else(|_| "dev-secret".to_string()),
            ),
            access_token_expiry_minutes: env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
        };

        Ok(Config {
            server,
            gemini,
            auth,
        })
    }
}

/// Read an environment variable with prod/dev awareness. In production a
/// missing variable with no hard requirement is still an error; in dev the
/// default applies.
fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(default) = default {
                Ok(default.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
