//! Merchant DTOs

use serde::Serialize;

use core_kernel::MerchantId;
use domain_merchant::Merchant;

/// Seeded merchant identity exposed by the test endpoint
#[derive(Debug, Serialize)]
pub struct TestMerchantResponse {
    pub id: MerchantId,
    pub email: String,
    pub api_key: String,
    pub api_secret: String,
    pub seeded: bool,
}

impl From<Merchant> for TestMerchantResponse {
    fn from(merchant: Merchant) -> Self {
        Self {
            id: merchant.id,
            email: merchant.email,
            api_key: merchant.api_key,
            api_secret: merchant.api_secret,
            seeded: true,
        }
    }
}
