//! Gateway configuration
//!
//! Everything the simulation can be steered with lives here and is read
//! once at startup; the settlement policy is built from these values and
//! injected, so no process-global flag is consulted afterwards.

use serde::Deserialize;

use domain_merchant::SeedMerchant;

/// Gateway configuration, loaded from `GATEWAY_`-prefixed environment
/// variables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Deterministic test mode: fixed delay, forced outcome
    pub test_mode: bool,
    /// Settlement delay in test mode, milliseconds
    pub test_processing_delay_ms: u64,
    /// Forced outcome in test mode
    pub test_payment_success: bool,
    /// Success probability for UPI payments outside test mode
    pub upi_success_rate: f64,
    /// Success probability for card payments outside test mode
    pub card_success_rate: f64,
    /// Seeded merchant identity
    pub test_merchant_name: String,
    pub test_merchant_email: String,
    pub test_api_key: String,
    pub test_api_secret: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let seed = SeedMerchant::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: "postgres://localhost/gateway".to_string(),
            log_level: "info".to_string(),
            test_mode: false,
            test_processing_delay_ms: 1000,
            test_payment_success: true,
            upi_success_rate: 0.90,
            card_success_rate: 0.95,
            test_merchant_name: seed.name,
            test_merchant_email: seed.email,
            test_api_key: seed.api_key,
            test_api_secret: seed.api_secret,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("GATEWAY"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Seed identity for the startup merchant
    pub fn seed_merchant(&self) -> SeedMerchant {
        SeedMerchant {
            name: self.test_merchant_name.clone(),
            email: self.test_merchant_email.clone(),
            api_key: self.test_api_key.clone(),
            api_secret: self.test_api_secret.clone(),
        }
    }
}
