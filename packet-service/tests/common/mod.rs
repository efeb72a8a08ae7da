use packet_service::config::{AuthConfig, Config, GeminiSettings, ServerConfig};
use packet_service::services::providers::mock::MockTextProvider;
use packet_service::services::providers::TextProvider;
use packet_service::startup::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// The fixed message the service returns for any validation failure.
pub const VALIDATION_ERROR_MESSAGE: &str =
    "Error while handling request! Please check your request.";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mock_provider: Arc<MockTextProvider>,
}

/// Config for tests: random port, mock-friendly defaults, auth off.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            backend_ip: "127.0.0.1".to_string(),
            port: "0".to_string(),
            auth_token: "default".to_string(),
        },
        gemini: GeminiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            model: "gemini-2.0-flash".to_string(),
            // Connection-refused fast if anything ever resolves this.
            api_base_url: "http://127.0.0.1:1".to_string(),
            timeout_seconds: 5,
        },
        auth: AuthConfig {
            require_auth: false,
            jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()),
            access_token_expiry_minutes: 15,
        },
    }
}

/// A descriptor that passes every presence check.
pub fn valid_packet() -> Value {
    json!({
        "packet_size": 100,
        "packet_rate": 5,
        "protocol_type": "TCP",
        "connection_state": "ESTABLISHED",
        "payload_pattern": "random"
    })
}

impl TestApp {
    /// Spawn the app with an enabled echo mock provider.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config(), MockTextProvider::new(true)).await
    }

    /// Spawn with a specific mock, e.g. a disabled one to exercise
    /// provider failures.
    pub async fn spawn_with_mock(mock: MockTextProvider) -> Self {
        Self::spawn_with(test_config(), mock).await
    }

    /// Spawn with custom config (auth flags and the like).
    pub async fn spawn_with_config(config: Config) -> Self {
        Self::spawn_with(config, MockTextProvider::new(true)).await
    }

    pub async fn spawn_with(config: Config, mock: MockTextProvider) -> Self {
        let mock_provider = Arc::new(mock);
        let provider: Arc<dyn TextProvider> = mock_provider.clone();

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            mock_provider,
        }
    }
}
