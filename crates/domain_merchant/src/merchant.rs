//! Merchant entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MerchantError;
use core_kernel::MerchantId;

/// A merchant account holding API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    /// Unique identifier
    pub id: MerchantId,
    /// Display name
    pub name: String,
    /// Unique contact email
    pub email: String,
    /// Public half of the credential pair, sent as `X-Api-Key`
    pub api_key: String,
    /// Private half, sent as `X-Api-Secret`
    pub api_secret: String,
    /// Webhook endpoint; stored but not delivered to
    pub webhook_url: Option<String>,
    /// Deactivated merchants fail authentication
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Merchant {
    /// Checks a presented key/secret pair against the stored credentials.
    ///
    /// Both halves must match exactly and the merchant must be active.
    /// Every failure collapses to `InvalidCredentials` so the response
    /// carries no hint about which check failed.
    pub fn verify_credentials(&self, api_key: &str, api_secret: &str) -> Result<(), MerchantError> {
        let key_ok = constant_time_eq(self.api_key.as_bytes(), api_key.as_bytes());
        let secret_ok = constant_time_eq(self.api_secret.as_bytes(), api_secret.as_bytes());
        if !(key_ok && secret_ok) || !self.is_active {
            return Err(MerchantError::InvalidCredentials);
        }
        Ok(())
    }
}

/// Identity fields for the merchant seeded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMerchant {
    pub name: String,
    pub email: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Default for SeedMerchant {
    fn default() -> Self {
        Self {
            name: "Test Merchant".to_string(),
            email: "test@example.com".to_string(),
            api_key: "key_test_abc123".to_string(),
            api_secret: "secret_test_xyz789".to_string(),
        }
    }
}

// Comparison time depends on length only, not on where the mismatch sits.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merchant() -> Merchant {
        let now = Utc::now();
        Merchant {
            id: MerchantId::new(),
            name: "Acme Retail".to_string(),
            email: "payments@acme.example".to_string(),
            api_key: "key_live_abc".to_string(),
            api_secret: "secret_live_xyz".to_string(),
            webhook_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_matching_credentials_pass() {
        assert!(merchant()
            .verify_credentials("key_live_abc", "secret_live_xyz")
            .is_ok());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let err = merchant()
            .verify_credentials("key_live_abc", "nope")
            .unwrap_err();
        assert!(matches!(err, MerchantError::InvalidCredentials));
    }

    #[test]
    fn test_wrong_key_fails_identically_to_wrong_secret() {
        let by_key = merchant()
            .verify_credentials("nope", "secret_live_xyz")
            .unwrap_err();
        let by_secret = merchant()
            .verify_credentials("key_live_abc", "nope")
            .unwrap_err();
        assert_eq!(by_key.to_string(), by_secret.to_string());
    }

    #[test]
    fn test_inactive_merchant_fails_with_same_error() {
        let mut m = merchant();
        m.is_active = false;
        let err = m
            .verify_credentials("key_live_abc", "secret_live_xyz")
            .unwrap_err();
        assert!(matches!(err, MerchantError::InvalidCredentials));
    }

    #[test]
    fn test_seed_merchant_defaults() {
        let seed = SeedMerchant::default();
        assert_eq!(seed.email, "test@example.com");
        assert!(seed.api_key.starts_with("key_test_"));
    }
}
